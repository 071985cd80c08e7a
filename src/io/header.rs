//! Container preamble: magic number followed by the container revision.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{Result, SaveError};

use super::constants::{MAGIC, VERSION};

/// Write the 8-byte preamble.
pub fn write_header<W: Write>(writer: &mut W) -> Result<()> {
    writer.write_i32::<LittleEndian>(MAGIC)?;
    writer.write_i32::<LittleEndian>(VERSION)?;
    Ok(())
}

/// Read the 8-byte preamble and reject anything but the supported container.
///
/// Fewer than 8 available bytes is an IO error; a wrong magic or version is
/// a format error. There is no fallback for other revisions.
pub fn check_header<R: Read>(reader: &mut R) -> Result<()> {
    let magic = reader.read_i32::<LittleEndian>()?;
    if magic != MAGIC {
        return Err(SaveError::BadMagic(magic));
    }

    let version = reader.read_i32::<LittleEndian>()?;
    if version != VERSION {
        return Err(SaveError::BadVersion(version));
    }

    log::debug!("container header ok (magic {:#010X}, version {})", magic, version);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::io::constants::HEADER_SIZE;
    use std::io::Cursor;

    fn header_bytes() -> Vec<u8> {
        let mut buf = Vec::new();
        write_header(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_write_header_layout() {
        let buf = header_bytes();
        assert_eq!(buf.len(), HEADER_SIZE);
        assert_eq!(&buf, &[0x6D, 0x6D, 0x32, 0x73, 0x04, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_check_header_roundtrip() {
        let buf = header_bytes();
        let mut cursor = Cursor::new(&buf);
        check_header(&mut cursor).unwrap();
        assert_eq!(cursor.position(), HEADER_SIZE as u64);
    }

    #[test]
    fn test_every_single_bit_flip_is_rejected() {
        let original = header_bytes();
        for bit in 0..HEADER_SIZE * 8 {
            let mut buf = original.clone();
            buf[bit / 8] ^= 1 << (bit % 8);
            let err = check_header(&mut Cursor::new(&buf)).unwrap_err();
            if bit < 32 {
                assert!(matches!(err, SaveError::BadMagic(_)), "bit {bit}: {err}");
            } else {
                assert!(matches!(err, SaveError::BadVersion(_)), "bit {bit}: {err}");
            }
            assert_eq!(err.kind(), ErrorKind::Format);
        }
    }

    #[test]
    fn test_short_header_is_io_error() {
        let buf = header_bytes();
        for len in 0..HEADER_SIZE {
            let err = check_header(&mut Cursor::new(&buf[..len])).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Io, "len {len}");
        }
    }

    #[test]
    fn test_write_header_propagates_write_failure() {
        let mut slot = [0u8; 5];
        let mut writer = Cursor::new(&mut slot[..]);
        let err = write_header(&mut writer).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
