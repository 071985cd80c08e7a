//! Shared test utilities for mmsave integration tests.

#![allow(dead_code)]

use mmsave::SaveDocument;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

pub const INFO_JSON: &[u8] = br#"{"a":1}"#;
pub const DATA_JSON: &[u8] = br#"{"b":2}"#;

/// The two 7-byte payloads used throughout the tests.
pub fn tiny_document() -> SaveDocument {
    SaveDocument::new(INFO_JSON.to_vec(), DATA_JSON.to_vec())
}

/// A save with a realistically sized, compressible game state.
pub fn career_document() -> SaveDocument {
    let info = br#"{"saveName":"Career","teamName":"Predator Racing","gameTime":"2018-03-04T00:00:00"}"#;
    let mut data = String::from(r#"{"championships":[{"series":"ERS","drivers":["#);
    for i in 0..500 {
        data.push_str(&format!(
            r#"{{"id":{},"name":"Driver {}","points":{},"retired":false}},"#,
            i,
            i,
            (i * 7) % 250
        ));
    }
    data.push_str("{}]}]}");
    SaveDocument::new(info.to_vec(), data.into_bytes())
}

/// Seeded high-entropy bytes that LZ4 cannot shrink.
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut buf = vec![0u8; len];
    rng.fill(&mut buf[..]);
    buf
}

pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

pub fn le_i32(bytes: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}
