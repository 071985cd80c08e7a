//! Block compression for frame payloads.
//!
//! Frames carry raw LZ4 blocks: no frame header, no checksum, no
//! end marker. The container stores both sizes, so the decompressor is
//! always handed the exact output capacity.
//!
//! The decompressor separates two failures. [`SaveError::Decompression`]
//! means the bytes are not an LZ4 block at all. [`SaveError::LengthMismatch`]
//! and [`SaveError::OutputOverrun`] mean they are one, but of another size.

use lz4_flex::block::DecompressError;

use crate::error::{Result, SaveError};

/// Trait for compressing a whole payload into one block.
pub trait Compressor {
    /// Compress `source` into one block, whatever its size.
    fn compress_block(&self, source: &[u8]) -> Result<Vec<u8>>;

    /// Compress `source`, returning `None` when the block would not be
    /// strictly smaller than the input.
    fn compress(&self, source: &[u8]) -> Result<Option<Vec<u8>>> {
        let block = self.compress_block(source)?;
        if block.len() >= source.len() {
            return Ok(None);
        }
        Ok(Some(block))
    }
}

/// Trait for decompressing a whole block.
pub trait Decompressor {
    /// Decompress `source`, returning exactly `decompressed_size` bytes.
    fn decompress(&self, source: &[u8], decompressed_size: usize) -> Result<Vec<u8>>;
}

/// LZ4 block compressor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4BlockCompressor;

impl Compressor for Lz4BlockCompressor {
    fn compress_block(&self, source: &[u8]) -> Result<Vec<u8>> {
        Ok(lz4_flex::block::compress(source))
    }
}

/// Largest output an LZ4 block of `block_len` bytes can expand to.
pub fn max_decompressed_size(block_len: usize) -> usize {
    block_len.saturating_mul(255).saturating_add(16)
}

/// LZ4 block decompressor with a strict output length check.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4BlockDecompressor;

impl Decompressor for Lz4BlockDecompressor {
    fn decompress(&self, source: &[u8], decompressed_size: usize) -> Result<Vec<u8>> {
        if decompressed_size > max_decompressed_size(source.len()) {
            return Err(SaveError::Decompression(format!(
                "{} bytes cannot come from a {}-byte block",
                decompressed_size,
                source.len()
            )));
        }

        let mut dest = vec![0u8; decompressed_size];
        let written = match lz4_flex::block::decompress_into(source, &mut dest) {
            Ok(written) => written,
            Err(DecompressError::OutputTooSmall { .. }) => {
                return Err(SaveError::OutputOverrun {
                    declared: decompressed_size,
                })
            }
            Err(e) => return Err(SaveError::Decompression(e.to_string())),
        };

        if written != decompressed_size {
            return Err(SaveError::LengthMismatch {
                expected: decompressed_size,
                actual: written,
            });
        }

        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn json_like(n: usize) -> Vec<u8> {
        let mut data = Vec::new();
        for i in 0..n {
            data.extend_from_slice(format!("{{\"driver\":{},\"team\":\"x\"}},", i % 8).as_bytes());
        }
        data
    }

    #[test]
    fn test_compress_decompress_roundtrip() {
        let data = json_like(64);
        let compressed = Lz4BlockCompressor.compress(&data).unwrap().unwrap();
        assert!(compressed.len() < data.len());

        let decompressed = Lz4BlockDecompressor
            .decompress(&compressed, data.len())
            .unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_tiny_input_is_not_compressible() {
        assert_eq!(Lz4BlockCompressor.compress(b"").unwrap(), None);
        assert_eq!(Lz4BlockCompressor.compress(b"{\"a\":1}").unwrap(), None);
    }

    #[test]
    fn test_declared_size_too_large() {
        let data = json_like(16);
        let compressed = Lz4BlockCompressor.compress(&data).unwrap().unwrap();
        let err = Lz4BlockDecompressor
            .decompress(&compressed, data.len() + 10)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_declared_size_too_small() {
        let data = json_like(16);
        let compressed = Lz4BlockCompressor.compress(&data).unwrap().unwrap();
        let err = Lz4BlockDecompressor
            .decompress(&compressed, data.len() - 10)
            .unwrap_err();
        assert!(matches!(err, SaveError::OutputOverrun { .. }));
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_unreachable_size_rejected_before_allocating() {
        let err = Lz4BlockDecompressor
            .decompress(&[], i32::MAX as usize)
            .unwrap_err();
        assert!(matches!(err, SaveError::Decompression(_)));

        let err = Lz4BlockDecompressor
            .decompress(&[0x10, 0x41], max_decompressed_size(2) + 1)
            .unwrap_err();
        assert!(matches!(err, SaveError::Decompression(_)));
    }

    #[test]
    fn test_compress_block_keeps_expanding_output() {
        let block = Lz4BlockCompressor.compress_block(b"{\"a\":1}").unwrap();
        assert!(block.len() > 7);
        let back = Lz4BlockDecompressor.decompress(&block, 7).unwrap();
        assert_eq!(back, b"{\"a\":1}");
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = Lz4BlockDecompressor
            .decompress(&[0xF0, 0xFF, 0xFF, 0x01], 64)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
