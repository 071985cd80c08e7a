//! Save container reading and writing.
//!
//! # Module Structure
//!
//! - [`constants`]: Magic number, version, field widths, file suffixes
//! - [`header`]: 8-byte magic + version preamble
//! - [`compression`]: LZ4 block compressor/decompressor
//! - [`frame`]: Per-payload size prefix and compressed block
//! - [`naming`]: Basename and output path derivation
//! - [`reader`]: Unpack: container to two JSON payloads
//! - [`writer`]: Pack: two JSON payloads to container

pub mod compression;
pub mod constants;
pub mod frame;
pub mod header;
pub mod naming;
pub mod reader;
pub mod writer;

pub use compression::{Compressor, Decompressor, Lz4BlockCompressor, Lz4BlockDecompressor};
pub use frame::{EncodedFrame, Frame, RawFrame};
pub use header::{check_header, write_header};
pub use naming::PayloadKind;
pub use reader::{unpack_file, SaveReader, SaveReaderConfiguration, UnpackOutcome};
pub use writer::{pack_files, PackOutcome, SaveWriter, SaveWriterConfiguration};
