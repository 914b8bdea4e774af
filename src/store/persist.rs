//! Larder - Backing-File Codec
//! Reads and writes the store's single-file on-disk format.
//!
//! ## Format
//! A JSON object mapping each key to a string that holds the value's
//! own JSON encoding (values are double-encoded so arbitrary JSON
//! shapes round-trip through a flat string-keyed object). The object
//! is pretty-printed and optionally wrapped in a gzip stream. A save
//! is always a full rewrite of the file; there is no append path.

use std::collections::BTreeMap;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::{LarderError, Result};
use crate::types::{Key, Payload};

/// Read and decode the backing file at `path`.
/// `compressed` selects gunzipping and must match how the file was
/// written; only the gzip framing produced by `write_file` is accepted.
pub(crate) fn read_file(path: &Path, compressed: bool) -> Result<BTreeMap<Key, Payload>> {
    if !path.exists() {
        return Err(LarderError::FileNotFound(path.to_path_buf()));
    }
    let raw = fs::read(path)?;

    // Decompress from the in-memory buffer so decoder failures are
    // format errors, distinct from filesystem errors.
    let bytes = if compressed {
        let mut decoder = GzDecoder::new(raw.as_slice());
        let mut buf = Vec::new();
        decoder
            .read_to_end(&mut buf)
            .map_err(|e| LarderError::Format(format!("corrupt gzip stream: {}", e)))?;
        buf
    } else {
        raw
    };

    serde_json::from_slice(&bytes)
        .map_err(|e| LarderError::Format(format!("invalid JSON: {}", e)))
}

/// Encode and write `entries` to `path`, replacing any existing file.
pub(crate) fn write_file(
    path: &Path,
    entries: &BTreeMap<Key, Payload>,
    compressed: bool,
) -> Result<()> {
    let json = serde_json::to_string_pretty(entries).map_err(LarderError::Encode)?;

    if compressed {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(json.as_bytes())?;
        fs::write(path, encoder.finish()?)?;
    } else {
        fs::write(path, json)?;
    }
    Ok(())
}
