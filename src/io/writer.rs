//! Container writer: the pack direction.
//!
//! # Usage
//!
//! ```no_run
//! use mmsave::document::SaveDocument;
//! use mmsave::io::SaveWriter;
//!
//! let doc = SaveDocument::new(br#"{"a":1}"#.to_vec(), br#"{"b":2}"#.to_vec());
//! let bytes = SaveWriter::write(&doc).unwrap();
//! std::fs::write("career.sav", &bytes).unwrap();
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::document::{validate_json, SaveDocument};
use crate::error::{Result, StepExt};
use crate::notification::{NotificationCollection, NotificationType};

use super::frame::{EncodedFrame, RawFrame};
use super::header::write_header;
use super::naming::{pack_base_name, save_path, PayloadKind};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration options for packing.
#[derive(Debug, Clone)]
pub struct SaveWriterConfiguration {
    /// Directory that receives `<base>.sav`.
    ///
    /// Default: the current directory.
    pub output_dir: PathBuf,

    /// When `true`, both input payloads must parse as JSON before anything is
    /// encoded.
    ///
    /// Default: `false`.
    pub validate_json: bool,
}

impl Default for SaveWriterConfiguration {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            validate_json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// SaveWriter
// ---------------------------------------------------------------------------

/// Save container writer.
///
/// Both payloads are encoded before the first byte is written, so an encode
/// failure never leaves a partial container behind.
pub struct SaveWriter;

impl SaveWriter {
    /// Encode `doc` and return the complete container bytes.
    pub fn write(doc: &SaveDocument) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        Self::write_to(doc, &mut out)?;
        Ok(out)
    }

    /// Encode `doc` into `writer`.
    pub fn write_to<W: Write>(doc: &SaveDocument, writer: &mut W) -> Result<NotificationCollection> {
        let mut notifications = NotificationCollection::new();
        let info = Self::encode_payload(doc, PayloadKind::Info, &mut notifications)?;
        let data = Self::encode_payload(doc, PayloadKind::Data, &mut notifications)?;
        Self::write_frames(&info, &data, writer)?;
        Ok(notifications)
    }

    fn encode_payload(
        doc: &SaveDocument,
        kind: PayloadKind,
        notifications: &mut NotificationCollection,
    ) -> Result<EncodedFrame> {
        let step = match kind {
            PayloadKind::Info => "encoding info frame",
            PayloadKind::Data => "encoding data frame",
        };
        let payload = doc.payload(kind);
        let frame = RawFrame::new(payload.to_vec()).encode().step(step)?;

        if frame.is_stored() && frame.bytes() == payload {
            notifications.notify(
                NotificationType::Info,
                format!("{} payload is not compressible, storing {} bytes", kind, frame.size_raw()),
            );
        }
        log::debug!(
            "encoded {} frame: {} -> {} bytes",
            kind,
            frame.size_raw(),
            frame.size_compressed()
        );
        Ok(frame)
    }

    /// Header, both size prefixes, then both blocks.
    fn write_frames<W: Write>(info: &EncodedFrame, data: &EncodedFrame, writer: &mut W) -> Result<()> {
        write_header(writer).step("writing header")?;
        info.write_size_prefix(writer).step("writing info size prefix")?;
        data.write_size_prefix(writer).step("writing data size prefix")?;
        info.write_compressed_bytes(writer).step("writing info block")?;
        data.write_compressed_bytes(writer).step("writing data block")?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Pack
// ---------------------------------------------------------------------------

/// Result of [`pack_files`].
#[derive(Debug, Clone)]
pub struct PackOutcome {
    pub save_path: PathBuf,
    pub notifications: NotificationCollection,
}

/// Pack `info_path` and `data_path` into `<base>.sav`, where `<base>` comes
/// from the data path.
pub fn pack_files<P, Q>(
    info_path: P,
    data_path: Q,
    config: &SaveWriterConfiguration,
) -> Result<PackOutcome>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let info_path = info_path.as_ref();
    let data_path = data_path.as_ref();
    let mut notifications = NotificationCollection::new();

    let (base, recognized) = pack_base_name(data_path)?;
    if !recognized {
        notifications.notify(
            NotificationType::Warning,
            format!(
                "{} has no .json or .sav extension, using it as the output prefix",
                data_path.display()
            ),
        );
    }

    let info = fs::read(info_path).step("reading info json")?;
    let data = fs::read(data_path).step("reading data json")?;
    if config.validate_json {
        validate_json(&info, info_path)?;
        validate_json(&data, data_path)?;
    }

    let doc = SaveDocument::new(info, data);
    let info = SaveWriter::encode_payload(&doc, PayloadKind::Info, &mut notifications)?;
    let data = SaveWriter::encode_payload(&doc, PayloadKind::Data, &mut notifications)?;

    let save_path = save_path(&config.output_dir, &base);
    let file = File::create(&save_path).step("creating save file")?;
    let mut writer = BufWriter::new(file);
    SaveWriter::write_frames(&info, &data, &mut writer)?;
    writer.flush().step("flushing save file")?;
    log::debug!("wrote {}", save_path.display());

    Ok(PackOutcome {
        save_path,
        notifications,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::constants::{HEADER_SIZE, MAGIC, SIZE_PREFIX_SIZE, VERSION};

    fn le_i32(bytes: &[u8], offset: usize) -> i32 {
        i32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn test_write_layout() {
        let doc = SaveDocument::new(br#"{"a":1}"#.to_vec(), br#"{"b":2}"#.to_vec());
        let bytes = SaveWriter::write(&doc).unwrap();

        assert_eq!(le_i32(&bytes, 0), MAGIC);
        assert_eq!(le_i32(&bytes, 4), VERSION);

        let info_compressed = le_i32(&bytes, HEADER_SIZE) as usize;
        assert_eq!(le_i32(&bytes, HEADER_SIZE + 4), 7);
        let data_compressed = le_i32(&bytes, HEADER_SIZE + SIZE_PREFIX_SIZE) as usize;
        assert_eq!(le_i32(&bytes, HEADER_SIZE + SIZE_PREFIX_SIZE + 4), 7);

        let blocks = HEADER_SIZE + 2 * SIZE_PREFIX_SIZE;
        assert_eq!(bytes.len(), blocks + info_compressed + data_compressed);
    }

    #[test]
    fn test_write_to_reports_stored_payloads() {
        let doc = SaveDocument::new(br#"{"a":1}"#.to_vec(), br#"{"b":2}"#.to_vec());
        let mut out = Vec::new();
        let notifications = SaveWriter::write_to(&doc, &mut out).unwrap();
        assert_eq!(notifications.len(), 2);
        assert!(notifications.has_type(NotificationType::Info));
    }

    #[test]
    fn test_write_to_failing_writer() {
        let doc = SaveDocument::new(br#"{"a":1}"#.to_vec(), br#"{"b":2}"#.to_vec());
        let mut slot = [0u8; 20];
        let mut writer = std::io::Cursor::new(&mut slot[..]);
        let err = SaveWriter::write_to(&doc, &mut writer).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
        assert!(err.to_string().starts_with("writing data size prefix"));
    }
}
