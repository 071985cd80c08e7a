//! In-memory form of a save: the two decoded JSON payloads.

use std::path::Path;

use crate::error::{Result, SaveError};
use crate::io::naming::PayloadKind;

/// The decoded contents of one save container.
///
/// Payloads are kept as the exact bytes found in (or destined for) the
/// container. They are not parsed or re-serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveDocument {
    /// Save-slot summary shown by the game's load menu.
    pub info: Vec<u8>,
    /// Full game state.
    pub data: Vec<u8>,
}

impl SaveDocument {
    pub fn new(info: Vec<u8>, data: Vec<u8>) -> Self {
        Self { info, data }
    }

    /// Payload bytes by kind.
    pub fn payload(&self, kind: PayloadKind) -> &[u8] {
        match kind {
            PayloadKind::Info => &self.info,
            PayloadKind::Data => &self.data,
        }
    }

    pub(crate) fn set_payload(&mut self, kind: PayloadKind, bytes: Vec<u8>) {
        match kind {
            PayloadKind::Info => self.info = bytes,
            PayloadKind::Data => self.data = bytes,
        }
    }
}

/// Check that `bytes` parse as a single JSON value.
pub(crate) fn validate_json(bytes: &[u8], path: &Path) -> Result<()> {
    serde_json::from_slice::<serde_json::Value>(bytes)
        .map(|_| ())
        .map_err(|source| SaveError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_payload_access() {
        let mut doc = SaveDocument::new(b"{\"a\":1}".to_vec(), Vec::new());
        doc.set_payload(PayloadKind::Data, b"{\"b\":2}".to_vec());
        assert_eq!(doc.payload(PayloadKind::Info), b"{\"a\":1}");
        assert_eq!(doc.payload(PayloadKind::Data), b"{\"b\":2}");
    }

    #[test]
    fn test_validate_json() {
        validate_json(b"{\"a\":[1,2,3]}", Path::new("x_info.json")).unwrap();

        let err = validate_json(b"{\"a\":", Path::new("x_info.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert!(err.to_string().contains("x_info.json"));
    }
}
