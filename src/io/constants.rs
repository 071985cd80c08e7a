//! Magic numbers, field widths and file-name conventions of the save
//! container.

/// Magic number at offset 0 (`"mm2s"` when read as little-endian bytes).
pub const MAGIC: i32 = 0x7332_6D6D;

/// The only container revision this crate reads or writes.
pub const VERSION: i32 = 0x0000_0004;

/// Width of every integer field in the container.
pub const FIELD_SIZE: usize = 4;

/// Magic + version.
pub const HEADER_SIZE: usize = 2 * FIELD_SIZE;

/// Compressed size + raw size preceding each frame's block.
pub const SIZE_PREFIX_SIZE: usize = 2 * FIELD_SIZE;

/// File-name suffixes used by pack and unpack.
pub mod suffixes {
    /// Extension of the container file.
    pub const SAVE: &str = ".sav";
    /// Extension of the decoded payloads.
    pub const JSON: &str = ".json";
    /// Appended to the basename for the info payload.
    pub const INFO: &str = "_info.json";
    /// Appended to the basename for the data payload.
    pub const DATA: &str = "_data.json";
    /// Stripped from the data payload's stem when packing.
    pub const DATA_STEM: &str = "_data";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_bytes() {
        assert_eq!(&MAGIC.to_le_bytes(), b"mm2s");
        assert_eq!(VERSION.to_le_bytes(), [4, 0, 0, 0]);
    }
}
