//! Container reader: the unpack direction.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mmsave::io::SaveReader;
//!
//! let doc = SaveReader::from_file("career.sav")?.read()?;
//! println!("{} bytes of game state", doc.data.len());
//! ```

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::document::{validate_json, SaveDocument};
use crate::error::{Result, StepExt};
use crate::notification::{NotificationCollection, NotificationType};

use super::frame::{EncodedFrame, RawFrame};
use super::header::check_header;
use super::naming::{base_name, payload_path, PayloadKind};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration options for unpacking.
#[derive(Debug, Clone)]
pub struct SaveReaderConfiguration {
    /// Directory that receives `<base>_info.json` and `<base>_data.json`.
    ///
    /// Default: the current directory.
    pub output_dir: PathBuf,

    /// When `true`, each decoded payload must parse as JSON before it is
    /// written.
    ///
    /// Default: `false`.
    pub validate_json: bool,
}

impl Default for SaveReaderConfiguration {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            validate_json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// SaveReader
// ---------------------------------------------------------------------------

/// Reads a save container and yields its two decoded payloads.
///
/// The read pipeline is:
///
/// 1. Check the magic number and version.
/// 2. Read the info and data size prefixes.
/// 3. Read and decode the info block, hand it to the caller.
/// 4. Read and decode the data block, hand it to the caller.
pub struct SaveReader<R: Read> {
    reader: R,
    config: SaveReaderConfiguration,
    notifications: NotificationCollection,
}

impl SaveReader<BufReader<File>> {
    /// Open a save file by path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).step("opening save file")?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: Read> SaveReader<R> {
    /// Create a reader over any byte stream positioned at the container start.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            config: SaveReaderConfiguration::default(),
            notifications: NotificationCollection::new(),
        }
    }

    /// Set configuration options.
    pub fn with_config(mut self, config: SaveReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SaveReaderConfiguration {
        &self.config
    }

    /// Notifications raised so far.
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    /// Read the container, calling `sink` with the info payload and then the
    /// data payload.
    ///
    /// The info payload is delivered before the data block is read. The
    /// first error from the container or from `sink` aborts the read.
    pub fn read_with<F>(&mut self, mut sink: F) -> Result<()>
    where
        F: FnMut(PayloadKind, RawFrame) -> Result<()>,
    {
        check_header(&mut self.reader).step("checking header")?;

        let info = EncodedFrame::read_size_prefix(&mut self.reader)
            .step("reading info size prefix")?;
        let data = EncodedFrame::read_size_prefix(&mut self.reader)
            .step("reading data size prefix")?;

        let raw = self.read_frame(info, PayloadKind::Info)?;
        sink(PayloadKind::Info, raw)?;

        let raw = self.read_frame(data, PayloadKind::Data)?;
        sink(PayloadKind::Data, raw)
    }

    fn read_frame(&mut self, mut frame: EncodedFrame, kind: PayloadKind) -> Result<RawFrame> {
        let (fill_step, decode_step) = match kind {
            PayloadKind::Info => ("reading info block", "decoding info frame"),
            PayloadKind::Data => ("reading data block", "decoding data frame"),
        };

        frame.fill_compressed(&mut self.reader).step(fill_step)?;
        let raw = frame.decode().step(decode_step)?;

        if frame.is_stored() && raw.bytes() == frame.bytes() {
            self.notifications.notify(
                NotificationType::Info,
                format!("{} frame is stored uncompressed ({} bytes)", kind, frame.size_raw()),
            );
        }
        log::debug!(
            "decoded {} frame: {} -> {} bytes",
            kind,
            frame.size_compressed(),
            raw.size_raw()
        );
        Ok(raw)
    }

    /// Read the whole container into memory.
    pub fn read(mut self) -> Result<SaveDocument> {
        let validate = self.config.validate_json;
        let mut doc = SaveDocument::default();
        self.read_with(|kind, raw| {
            if validate {
                validate_json(raw.bytes(), Path::new(kind.file_suffix()))?;
            }
            doc.set_payload(kind, raw.into_bytes());
            Ok(())
        })?;
        Ok(doc)
    }
}

// ---------------------------------------------------------------------------
// Unpack
// ---------------------------------------------------------------------------

/// Files written by [`unpack_file`].
#[derive(Debug, Clone)]
pub struct UnpackOutcome {
    pub info_path: PathBuf,
    pub data_path: PathBuf,
    pub notifications: NotificationCollection,
}

/// Unpack `save_path` into `<base>_info.json` and `<base>_data.json`.
///
/// The info file is written before the data block is read, so a corrupt data
/// frame can leave the info file behind.
pub fn unpack_file<P: AsRef<Path>>(
    save_path: P,
    config: &SaveReaderConfiguration,
) -> Result<UnpackOutcome> {
    let save_path = save_path.as_ref();
    let mut notifications = NotificationCollection::new();

    let (base, recognized) = base_name(save_path)?;
    if !recognized {
        notifications.notify(
            NotificationType::Warning,
            format!(
                "{} has no .sav or .json extension, using it as the output prefix",
                save_path.display()
            ),
        );
    }

    let info_path = payload_path(&config.output_dir, &base, PayloadKind::Info);
    let data_path = payload_path(&config.output_dir, &base, PayloadKind::Data);

    let mut reader = SaveReader::from_file(save_path)?.with_config(config.clone());
    reader.read_with(|kind, raw| {
        let (path, step) = match kind {
            PayloadKind::Info => (&info_path, "writing info json"),
            PayloadKind::Data => (&data_path, "writing data json"),
        };
        if config.validate_json {
            validate_json(raw.bytes(), path)?;
        }
        fs::write(path, raw.bytes()).step(step)?;
        log::debug!("wrote {} ({} bytes)", path.display(), raw.size_raw());
        Ok(())
    })?;
    notifications.extend(reader.notifications);

    Ok(UnpackOutcome {
        info_path,
        data_path,
        notifications,
    })
}
