/// Frame diagnostic: print the header and both frames' size prefixes of a
/// save container without decoding anything.

use std::fs::File;
use std::io::BufReader;

use anyhow::{bail, Context, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use mmsave::io::constants::{HEADER_SIZE, MAGIC, SIZE_PREFIX_SIZE, VERSION};
use mmsave::io::EncodedFrame;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("diag_frames");
    if args.len() != 2 {
        bail!("Usage: {program} <game.sav>");
    }

    let file = File::open(&args[1]).with_context(|| format!("unable to open {}", args[1]))?;
    let len = file.metadata()?.len();
    let mut reader = BufReader::new(file);

    let magic = reader.read_i32::<LittleEndian>().context("reading magic")?;
    let version = reader.read_i32::<LittleEndian>().context("reading version")?;
    println!("file size : {} bytes", len);
    println!(
        "magic     : {:#010X} {}",
        magic,
        if magic == MAGIC { "ok" } else { "MISMATCH" }
    );
    println!(
        "version   : {} {}",
        version,
        if version == VERSION { "ok" } else { "MISMATCH" }
    );

    let mut offset = (HEADER_SIZE + 2 * SIZE_PREFIX_SIZE) as u64;
    for name in ["info", "data"] {
        let frame = EncodedFrame::read_size_prefix(&mut reader)
            .with_context(|| format!("reading {name} size prefix"))?;
        println!(
            "{name:<10}: block @ {offset:#X}, {} compressed, {} raw{}",
            frame.size_compressed(),
            frame.size_raw(),
            if frame.is_stored() { " (sizes equal)" } else { "" }
        );
        offset += frame.size_compressed() as u64;
    }

    if offset < len {
        println!("trailing  : {} bytes after the data block", len - offset);
    } else if offset > len {
        println!("truncated : {} bytes missing", offset - len);
    }

    Ok(())
}
