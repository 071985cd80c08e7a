//! Frame codec: one payload's size prefix and its compressed block.
//!
//! On disk a frame is split in two. The size prefixes of both frames come
//! first, then both blocks:
//!
//! ```text
//! [info size_compressed:i32][info size_raw:i32]
//! [data size_compressed:i32][data size_raw:i32]
//! [info block][data block]
//! ```
//!
//! A frame is either [`EncodedFrame`] (sizes known, compressed bytes
//! buffered) or [`RawFrame`] (content readable). [`Frame`] tags the two and
//! reports out-of-sequence transitions as protocol errors.
//!
//! Equal compressed and raw sizes are ambiguous: the block is either LZ4
//! that did not shrink or the payload stored verbatim. Decode always tries
//! LZ4 first and falls back to the verbatim bytes only when they are not an
//! LZ4 block at all. Encode stores verbatim only when that fallback is
//! guaranteed to apply, and writes the expanding LZ4 block otherwise.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{Result, SaveError};

use super::compression::{Compressor, Decompressor, Lz4BlockCompressor, Lz4BlockDecompressor};

// ---------------------------------------------------------------------------
// Size fields
// ---------------------------------------------------------------------------

fn read_size<R: Read>(reader: &mut R, field: &str) -> Result<usize> {
    let value = reader.read_i32::<LittleEndian>()?;
    usize::try_from(value)
        .map_err(|_| SaveError::InvalidFormat(format!("negative {field}: {value}")))
}

fn write_size<W: Write>(writer: &mut W, value: usize, field: &str) -> Result<()> {
    let value = i32::try_from(value).map_err(|_| {
        SaveError::InvalidFormat(format!("{field} {value} does not fit in 32 bits"))
    })?;
    writer.write_i32::<LittleEndian>(value)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// EncodedFrame
// ---------------------------------------------------------------------------

/// A frame holding (or about to hold) one compressed block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame {
    size_compressed: usize,
    size_raw: usize,
    bytes: Vec<u8>,
}

impl EncodedFrame {
    /// Read a size prefix (compressed size, then raw size). No block bytes
    /// are buffered yet.
    pub fn read_size_prefix<R: Read>(reader: &mut R) -> Result<Self> {
        let size_compressed = read_size(reader, "compressed size")?;
        let size_raw = read_size(reader, "raw size")?;
        log::debug!(
            "frame prefix: {} compressed, {} raw",
            size_compressed,
            size_raw
        );
        Ok(Self {
            size_compressed,
            size_raw,
            bytes: Vec::new(),
        })
    }

    /// Read exactly `size_compressed` bytes of block data.
    ///
    /// A short read fails with `UnexpectedEof`; nothing is kept.
    pub fn fill_compressed<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        let mut bytes = Vec::with_capacity(self.size_compressed.min(1 << 20));
        reader
            .take(self.size_compressed as u64)
            .read_to_end(&mut bytes)?;

        if bytes.len() != self.size_compressed {
            return Err(SaveError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!(
                    "expected {} compressed bytes, read {}",
                    self.size_compressed,
                    bytes.len()
                ),
            )));
        }

        self.bytes = bytes;
        Ok(())
    }

    /// Decompress the buffered block with LZ4.
    pub fn decode(&self) -> Result<RawFrame> {
        self.decode_with(&Lz4BlockDecompressor)
    }

    /// Decompress the buffered block with the given decompressor.
    pub fn decode_with<D: Decompressor>(&self, decompressor: &D) -> Result<RawFrame> {
        if self.bytes.len() != self.size_compressed {
            return Err(SaveError::IncompleteFrame {
                expected: self.size_compressed,
                actual: self.bytes.len(),
            });
        }

        match decompressor.decompress(&self.bytes, self.size_raw) {
            Ok(bytes) => Ok(RawFrame::new(bytes)),
            Err(SaveError::Decompression(reason)) if self.is_stored() => {
                log::debug!("block is not LZ4 ({}), taking it verbatim", reason);
                Ok(RawFrame::new(self.bytes.clone()))
            }
            Err(e) => Err(e),
        }
    }

    /// Write compressed size then raw size.
    pub fn write_size_prefix<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_size(writer, self.size_compressed, "compressed size")?;
        write_size(writer, self.size_raw, "raw size")
    }

    /// Write the buffered block.
    pub fn write_compressed_bytes<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.bytes)?;
        Ok(())
    }

    pub fn size_compressed(&self) -> usize {
        self.size_compressed
    }

    pub fn size_raw(&self) -> usize {
        self.size_raw
    }

    /// The buffered block bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// True when both sizes are equal, the shape of a payload stored
    /// verbatim.
    pub fn is_stored(&self) -> bool {
        self.size_compressed == self.size_raw
    }
}

// ---------------------------------------------------------------------------
// RawFrame
// ---------------------------------------------------------------------------

/// A frame holding readable payload content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFrame {
    bytes: Vec<u8>,
}

impl RawFrame {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Compress the content with LZ4.
    pub fn encode(&self) -> Result<EncodedFrame> {
        self.encode_with(&Lz4BlockCompressor, &Lz4BlockDecompressor)
    }

    /// Compress the content with the given codec pair, storing it verbatim
    /// when the compressor cannot shrink it.
    ///
    /// `decompressor` vets the verbatim bytes: if they parse as a block of
    /// their own, the expanding compressed block is written instead.
    pub fn encode_with<C, D>(&self, compressor: &C, decompressor: &D) -> Result<EncodedFrame>
    where
        C: Compressor,
        D: Decompressor,
    {
        let size_raw = self.bytes.len();
        if i32::try_from(size_raw).is_err() {
            return Err(SaveError::InvalidFormat(format!(
                "payload of {size_raw} bytes does not fit in 32 bits"
            )));
        }

        let bytes = match compressor.compress(&self.bytes)? {
            Some(compressed) => compressed,
            None => match decompressor.decompress(&self.bytes, size_raw) {
                Err(SaveError::Decompression(_)) => {
                    log::debug!("payload of {} bytes stored uncompressed", size_raw);
                    self.bytes.clone()
                }
                Ok(ref same) if *same == self.bytes => self.bytes.clone(),
                _ => {
                    log::debug!("payload of {} bytes reads as LZ4, keeping the block", size_raw);
                    compressor.compress_block(&self.bytes)?
                }
            },
        };

        Ok(EncodedFrame {
            size_compressed: bytes.len(),
            size_raw,
            bytes,
        })
    }

    pub fn size_raw(&self) -> usize {
        self.bytes.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// A frame in either state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Sizes read or computed, compressed block buffered.
    Encoded(EncodedFrame),
    /// Raw content buffered.
    Raw(RawFrame),
}

impl Frame {
    /// Read a size prefix into a new encoded frame.
    pub fn read_size_prefix<R: Read>(reader: &mut R) -> Result<Self> {
        EncodedFrame::read_size_prefix(reader).map(Frame::Encoded)
    }

    /// Wrap raw content.
    pub fn from_raw(bytes: Vec<u8>) -> Self {
        Frame::Raw(RawFrame::new(bytes))
    }

    /// Transition `Encoded` to `Raw`.
    pub fn decode(&mut self) -> Result<()> {
        let raw = match self {
            Frame::Encoded(frame) => frame.decode()?,
            Frame::Raw(_) => return Err(SaveError::NotEncoded),
        };
        *self = Frame::Raw(raw);
        Ok(())
    }

    /// Transition `Raw` to `Encoded`.
    pub fn encode(&mut self) -> Result<()> {
        let encoded = match self {
            Frame::Raw(frame) => frame.encode()?,
            Frame::Encoded(_) => return Err(SaveError::AlreadyEncoded),
        };
        *self = Frame::Encoded(encoded);
        Ok(())
    }

    /// Buffer the compressed block of an encoded frame.
    pub fn fill_compressed<R: Read>(&mut self, reader: &mut R) -> Result<()> {
        match self {
            Frame::Encoded(frame) => frame.fill_compressed(reader),
            Frame::Raw(_) => Err(SaveError::NotEncoded),
        }
    }

    pub fn write_size_prefix<W: Write>(&self, writer: &mut W) -> Result<()> {
        match self {
            Frame::Encoded(frame) => frame.write_size_prefix(writer),
            Frame::Raw(_) => Err(SaveError::NotEncoded),
        }
    }

    pub fn write_compressed_bytes<W: Write>(&self, writer: &mut W) -> Result<()> {
        match self {
            Frame::Encoded(frame) => frame.write_compressed_bytes(writer),
            Frame::Raw(_) => Err(SaveError::NotEncoded),
        }
    }

    pub fn is_encoded(&self) -> bool {
        matches!(self, Frame::Encoded(_))
    }

    pub fn size_raw(&self) -> usize {
        match self {
            Frame::Encoded(frame) => frame.size_raw(),
            Frame::Raw(frame) => frame.size_raw(),
        }
    }

    /// Compressed size; `None` while the frame holds raw content.
    pub fn size_compressed(&self) -> Option<usize> {
        match self {
            Frame::Encoded(frame) => Some(frame.size_compressed()),
            Frame::Raw(_) => None,
        }
    }

    /// Buffered bytes in the current state.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Frame::Encoded(frame) => frame.bytes(),
            Frame::Raw(frame) => frame.bytes(),
        }
    }
}
