//! This module contains functions for hashing generated files and checking if they have changed.
use crate::error::{ConfigureError, Result};
use crate::utils::log::{log, LogLevel};
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::Read;
use std::path::Path;

// Turns a digest into a lowercase hex string.
fn to_hex(digest: &[u8]) -> String {
    let mut hash = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hash.push_str(&format!("{:02x}", byte));
    }
    hash
}

/// Hashes some text and returns the hash as a string.
pub fn hash_text(text: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(text.as_bytes());
    to_hex(&hasher.finalize())
}

/// Hashes a file and returns the hash as a string.
/// Returns None if the file does not exist.
/// # Arguments
/// * `path` - The path of the file to hash.
pub fn hash_file(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    let read_error = |source: std::io::Error| ConfigureError::Read {
        path: path.to_path_buf(),
        source,
    };
    const CHUNK_SIZE: usize = 64 * 1024;

    let mut file = File::open(path).map_err(read_error)?;
    let mut buffer = vec![0; CHUNK_SIZE];
    let mut hasher = Sha1::new();
    loop {
        let read = file.read(&mut buffer).map_err(read_error)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(Some(to_hex(&hasher.finalize())))
}

/// Checks if writing `content` to `path` would change the file.
/// # Arguments
/// * `path` - The path of the file to check.
/// * `content` - The content about to be written.
pub fn is_content_changed(path: &Path, content: &str) -> Result<bool> {
    match hash_file(path)? {
        Some(old_hash) => Ok(old_hash != hash_text(content)),
        None => Ok(true),
    }
}

/// Writes `content` to `path` only if it differs from what is already there.
/// Creates the parent directories as needed.
/// Returns true if the file was written.
pub fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    if !is_content_changed(path, content)? {
        log(
            LogLevel::Debug,
            &format!("Unchanged, not writing: {}", path.display()),
        );
        return Ok(false);
    }
    let write_error = |source: std::io::Error| ConfigureError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, content).map_err(write_error)?;
    log(LogLevel::Info, &format!("Wrote {}", path.display()));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_file_hashes_agree() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.pri");
        std::fs::write(&path, "CONFIG += c++11\n").unwrap();
        assert_eq!(
            hash_file(&path).unwrap(),
            Some(hash_text("CONFIG += c++11\n"))
        );
        assert_eq!(hash_text("").len(), 40);
    }

    #[test]
    fn missing_file_has_no_hash() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(hash_file(&dir.path().join("none")).unwrap(), None);
        assert!(is_content_changed(&dir.path().join("none"), "").unwrap());
    }

    #[test]
    fn writes_only_when_content_differs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep/build/dir/.config.pri");
        assert!(write_if_changed(&path, "first\n").unwrap());
        assert!(!write_if_changed(&path, "first\n").unwrap());
        assert!(write_if_changed(&path, "second\n").unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second\n");
    }
}
