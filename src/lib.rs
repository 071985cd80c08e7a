//! # mmsave
//!
//! Pack and unpack Motorsport Manager save files.
//!
//! A save is a small binary container holding two LZ4-compressed JSON
//! payloads: `info` (the load-menu summary) and `data` (the game state).
//! Unpacking writes them out as `<name>_info.json` and `<name>_data.json`;
//! packing turns the pair back into a container the game accepts.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mmsave::io::{unpack_file, pack_files, SaveReaderConfiguration, SaveWriterConfiguration};
//!
//! let unpacked = unpack_file("career.sav", &SaveReaderConfiguration::default())?;
//! // edit career_data.json ...
//! let packed = pack_files(
//!     &unpacked.info_path,
//!     &unpacked.data_path,
//!     &SaveWriterConfiguration::default(),
//! )?;
//! assert!(packed.save_path.ends_with("career.sav"));
//! # Ok::<(), mmsave::SaveError>(())
//! ```
//!
//! ## Container Layout
//!
//! ```text
//! [magic:i32][version:i32]
//! [info size_compressed:i32][info size_raw:i32]
//! [data size_compressed:i32][data size_raw:i32]
//! [info block][data block]
//! ```
//!
//! All integers are little-endian. Blocks are raw LZ4 blocks, or the payload
//! itself when it could not be compressed.

#![warn(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod error;
pub mod io;
pub mod notification;

// Re-export commonly used types
pub use document::SaveDocument;
pub use error::{ErrorKind, Result, SaveError};
pub use io::{
    pack_files, unpack_file, EncodedFrame, Frame, PayloadKind, RawFrame, SaveReader,
    SaveReaderConfiguration, SaveWriter, SaveWriterConfiguration,
};
pub use notification::{Notification, NotificationCollection, NotificationType};
