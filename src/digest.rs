//! Content fingerprints for files and directory trees
//!
//! A [`Fingerprint`] is the hex-encoded SHA-256 of some content. For a single
//! file that content is the file's bytes. For a directory it is, for every
//! regular file below it in walk order, the SHA-1 of the file's path relative
//! to the root followed by the file's bytes. Feeding the relative path means
//! empty files still change the result and a renamed file is a different tree.
//!
//! Walk order is by file name at every level, so the same tree always yields
//! the same fingerprint no matter where it lives on disk.
//!
//! ## Example
//!
//! ```rust,no_run
//! use treediff::digest::{hash_path, Fingerprint};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let a = hash_path(Path::new("left/config.toml"))?;
//! let b = hash_path(Path::new("right/config.toml"))?;
//! if a != b {
//!     println!("config.toml changed: {} -> {}", a.short(), b.short());
//! }
//! # Ok(())
//! # }
//! ```

use crate::error::{Result, TreeDiffError};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, MAIN_SEPARATOR};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Size of the read buffer used when streaming file contents
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// Fingerprint of a directory with no files in it (SHA-256 of empty input)
pub const EMPTY_FINGERPRINT: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Hex-encoded SHA-256 digest identifying a file's or tree's content
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// The full 64-character hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 hex characters, for display
    pub fn short(&self) -> &str {
        &self.0[..8]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Streaming SHA-256 accumulator shared by the file and directory digests
pub struct FileDigest {
    hasher: Sha256,
    buffer: Vec<u8>,
}

impl FileDigest {
    /// Start an empty accumulator
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
            buffer: vec![0u8; CHUNK_SIZE],
        }
    }

    /// Stream a file's bytes into the accumulator in [`CHUNK_SIZE`] reads
    pub fn update_file(&mut self, path: &Path) -> Result<u64> {
        let mut file = File::open(path)?;
        let mut total = 0u64;

        loop {
            let bytes_read = file.read(&mut self.buffer)?;
            if bytes_read == 0 {
                break;
            }
            self.hasher.update(&self.buffer[..bytes_read]);
            total += bytes_read as u64;
        }

        trace!("Hashed {} bytes from {:?}", total, path);
        Ok(total)
    }

    /// Feed the SHA-1 of a relative path string into the accumulator
    pub fn update_path_marker(&mut self, relative: &str) {
        let marker = Sha1::digest(relative.as_bytes());
        self.hasher.update(marker);
    }

    /// Consume the accumulator and produce the fingerprint
    pub fn finalize(self) -> Fingerprint {
        Fingerprint(hex::encode(self.hasher.finalize()))
    }
}

impl Default for FileDigest {
    fn default() -> Self {
        Self::new()
    }
}

/// Fingerprint a single regular file
pub fn hash_file(path: &Path) -> Result<Fingerprint> {
    let mut digest = FileDigest::new();
    digest.update_file(path)?;
    Ok(digest.finalize())
}

/// Fingerprint every regular file below `root`, including their relative paths
///
/// # Errors
///
/// - [`TreeDiffError::WalkDir`] if `root` does not exist or a subdirectory
///   cannot be listed
/// - [`TreeDiffError::Io`] if a file cannot be read
pub fn hash_directory(root: &Path) -> Result<Fingerprint> {
    let mut digest = FileDigest::new();
    let mut files = 0usize;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = relative_marker(root, entry.path())?;
        digest.update_path_marker(&relative);
        digest.update_file(entry.path())?;
        files += 1;
    }

    debug!("Fingerprinted {} files under {:?}", files, root);
    Ok(digest.finalize())
}

/// Fingerprint a file or a directory, whichever `path` is
pub fn hash_path(path: &Path) -> Result<Fingerprint> {
    if path.is_file() {
        hash_file(path)
    } else {
        hash_directory(path)
    }
}

/// Path of `path` below `root` as a string with a leading separator
fn relative_marker(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        TreeDiffError::internal(format!("{:?} is not below {:?}", path, root))
    })?;
    Ok(format!("{}{}", MAIN_SEPARATOR, relative.to_string_lossy()))
}
