use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use rivpack::limits::MAGIC;
use rivpack::scene::{parse_json_document, JsonDocument};

/// A loaded input file.
pub enum Input {
    /// Container bytes (the file starts with the signature).
    Stream(Vec<u8>),
    Json(JsonDocument),
}

/// Reads a file as a container stream or JSON, by its first bytes.
pub fn read_input(path: &Path) -> Result<Input> {
    let bytes = read_bytes(path)?;
    if bytes.starts_with(MAGIC) {
        return Ok(Input::Stream(bytes));
    }
    Ok(Input::Json(parse_json(path, bytes)?))
}

/// Reads a JSON scene or record list.
pub fn read_json(path: &Path) -> Result<JsonDocument> {
    let bytes = read_bytes(path)?;
    parse_json(path, bytes)
}

/// Reads raw bytes.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("reading {}", path.display()))
}

/// Writes bytes, creating or truncating the file.
pub fn write_bytes(path: &Path, bytes: impl AsRef<[u8]>) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

fn parse_json(path: &Path, bytes: Vec<u8>) -> Result<JsonDocument> {
    let text = String::from_utf8(bytes)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        .with_context(|| format!("reading {}", path.display()))?;
    parse_json_document(&text).with_context(|| format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_streams_by_signature() {
        let dir = tempfile::tempdir().unwrap();
        let stream = dir.path().join("a.riv");
        fs::write(&stream, b"RIVE\x07\x00\x00\x00").unwrap();
        assert!(matches!(read_input(&stream).unwrap(), Input::Stream(_)));

        let json = dir.path().join("a.json");
        fs::write(&json, br#"{"objects": []}"#).unwrap();
        assert!(matches!(read_input(&json).unwrap(), Input::Json(JsonDocument::Records(_))));
    }

    #[test]
    fn test_missing_file_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json(&dir.path().join("absent.json")).err().unwrap();
        assert!(format!("{err:#}").contains("absent.json"));
    }
}
