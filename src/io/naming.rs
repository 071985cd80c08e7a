//! Output file names for pack and unpack.
//!
//! Only the file-name component of an input path is used; outputs land in
//! the configured output directory.

use std::path::{Path, PathBuf};

use crate::error::{Result, SaveError};

use super::constants::suffixes;

/// Which of the two payloads a file or frame carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Info,
    Data,
}

impl PayloadKind {
    /// Suffix appended to the basename when unpacking.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            PayloadKind::Info => suffixes::INFO,
            PayloadKind::Data => suffixes::DATA,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::Info => "info",
            PayloadKind::Data => "data",
        }
    }
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The file-name component; non-UTF-8 names are rejected rather than
/// rewritten.
fn file_name(path: &Path) -> Result<&str> {
    match path.file_name() {
        None => Ok(""),
        Some(name) => name.to_str().ok_or_else(|| {
            SaveError::InvalidFormat(format!(
                "file name {} is not valid UTF-8",
                path.display()
            ))
        }),
    }
}

/// File name with one trailing `.sav` or `.json` removed.
///
/// Returns the name unchanged (and `false`) when neither suffix matches.
pub fn base_name(path: &Path) -> Result<(String, bool)> {
    let name = file_name(path)?;
    for suffix in [suffixes::SAVE, suffixes::JSON] {
        if let Some(stem) = name.strip_suffix(suffix) {
            return Ok((stem.to_string(), true));
        }
    }
    Ok((name.to_string(), false))
}

/// Basename for the container produced from a data payload path.
///
/// Applies [`base_name`] and then drops a trailing `_data`, so the names
/// written by unpack pack back to the original save name.
pub fn pack_base_name(data_path: &Path) -> Result<(String, bool)> {
    let (base, recognized) = base_name(data_path)?;
    Ok(match base.strip_suffix(suffixes::DATA_STEM) {
        Some(stem) if recognized => (stem.to_string(), true),
        _ => (base, recognized),
    })
}

/// `<output_dir>/<base><_info.json|_data.json>`
pub fn payload_path(output_dir: &Path, base: &str, kind: PayloadKind) -> PathBuf {
    output_dir.join(format!("{}{}", base, kind.file_suffix()))
}

/// `<output_dir>/<base>.sav`
pub fn save_path(output_dir: &Path, base: &str) -> PathBuf {
    output_dir.join(format!("{}{}", base, suffixes::SAVE))
}
