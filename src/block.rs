//! JSON block I/O.
//!
//! Pipeline steps exchange JSON files. Input blocks carry either a
//! `lines` array or a raw `content` string; outputs are written
//! atomically so a crash mid-write never corrupts an existing file.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

/// On-disk shape of an input block.
#[derive(Debug, Deserialize)]
struct Block {
    #[serde(default)]
    lines: Option<Vec<String>>,
    #[serde(default)]
    content: Option<String>,
}

/// Read a block file as a list of lines.
///
/// A `lines` array is returned as-is; a `content` string is split on
/// CRLF/LF. A block carrying neither is a fatal error.
pub fn read_block(path: &Path) -> Result<Vec<String>> {
    let block: Block = read_json(path)?;

    if let Some(lines) = block.lines {
        return Ok(lines);
    }
    if let Some(content) = block.content {
        return Ok(content
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect());
    }

    Err(ExtractError::MalformedBlock {
        path: path.to_path_buf(),
    })
}

/// Deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Serialize a value to a JSON file atomically.
///
/// Writes to a temp file in the target directory, syncs, then renames.
/// Parent directories are created as needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output.json".to_string());
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_read_block_lines_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("block.json");
        fs::write(&path, r#"{"lines": ["first", "second"]}"#).unwrap();

        let lines = read_block(&path).unwrap();
        assert_eq!(lines, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_read_block_content_string_splits_crlf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("block.json");
        fs::write(&path, r#"{"content": "first\r\nsecond\nthird"}"#).unwrap();

        let lines = read_block(&path).unwrap();
        assert_eq!(
            lines,
            vec![
                "first".to_string(),
                "second".to_string(),
                "third".to_string()
            ]
        );
    }

    #[test]
    fn test_read_block_lines_takes_precedence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("block.json");
        fs::write(&path, r#"{"lines": ["a"], "content": "b"}"#).unwrap();

        assert_eq!(read_block(&path).unwrap(), vec!["a".to_string()]);
    }

    #[test]
    fn test_read_block_neither_field_is_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("block.json");
        fs::write(&path, r#"{"other": 1}"#).unwrap();

        let err = read_block(&path).unwrap_err();
        assert!(matches!(err, ExtractError::MalformedBlock { .. }));
    }

    #[test]
    fn test_write_json_creates_parent_dirs_and_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out/result.json");

        write_json(&path, &vec!["x".to_string()]).unwrap();
        assert!(path.exists());

        let back: Vec<String> = read_json(&path).unwrap();
        assert_eq!(back, vec!["x".to_string()]);
    }

    #[test]
    fn test_write_json_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("result.json");
        write_json(&path, &serde_json::json!({"k": 1})).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("result.json")]);
    }

    #[test]
    fn test_write_json_overwrites_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("result.json");
        write_json(&path, &serde_json::json!({"v": 1})).unwrap();
        write_json(&path, &serde_json::json!({"v": 2})).unwrap();

        let back: serde_json::Value = read_json(&path).unwrap();
        assert_eq!(back["v"], 2);
    }
}
