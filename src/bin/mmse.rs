//! Pack and unpack Motorsport Manager save files.
//!
//!   mmse <game.sav>                  unpack to game_info.json + game_data.json
//!   mmse <info.json> <data.json>     pack to <data basename>.sav

use anyhow::{Context, Result};
use mmsave::{pack_files, unpack_file, SaveReaderConfiguration, SaveWriterConfiguration};

fn print_usage(program: &str) {
    println!("Usage: {program}\t<game.sav>");
    println!("Or:\t{program} <info.json> <data.json>");
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("mmse");

    match args.len() {
        2 => {
            let outcome = unpack_file(&args[1], &SaveReaderConfiguration::default())
                .with_context(|| format!("unable to unpack {}", args[1]))?;
            log::info!(
                "unpacked {} into {} and {}",
                args[1],
                outcome.info_path.display(),
                outcome.data_path.display()
            );
        }
        3 => {
            let outcome = pack_files(&args[1], &args[2], &SaveWriterConfiguration::default())
                .with_context(|| format!("unable to pack {} and {}", args[1], args[2]))?;
            log::info!("packed {}", outcome.save_path.display());
        }
        _ => print_usage(program),
    }

    Ok(())
}
