//! Per-root index of file fingerprints
//!
//! [`FilenameIndex`] walks one root directory, fingerprints every regular file
//! below it and records the result under a key. By default the key is the bare
//! file name, so `docs/README` and `src/README` land on the same key and the
//! one discovered last wins. [`KeyMode::RelativePath`] keys by the path below
//! the root instead, which keeps same-named files in different directories
//! apart.
//!
//! Entries keep their discovery order. Overwriting a key updates its entry in
//! place without moving it.

use crate::digest::{hash_path, Fingerprint};
use crate::error::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// How files discovered under a root are keyed in the index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyMode {
    /// Bare file name; collisions across subdirectories keep the last file seen
    #[default]
    FileName,
    /// Path relative to the root, using `/` between components
    RelativePath,
}

/// One fingerprinted file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Where the file was found
    pub path: PathBuf,
    /// Content fingerprint of the file
    pub fingerprint: Fingerprint,
}

/// Insertion-ordered mapping from key to [`IndexEntry`]
#[derive(Debug, Clone, Default)]
pub struct FilenameIndex {
    root: PathBuf,
    entries: Vec<(String, IndexEntry)>,
    positions: HashMap<String, usize>,
}

impl FilenameIndex {
    /// Create an empty index for `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Walk `root` and fingerprint every file found
    pub fn build(root: &Path, key_mode: KeyMode) -> Result<Self> {
        Self::build_with_progress(root, key_mode, |_| {})
    }

    /// Walk `root`, calling `on_file` after each file has been fingerprinted
    ///
    /// Subdirectories are descended in file name order. Symbolic links are not
    /// followed and are not indexed.
    ///
    /// # Errors
    ///
    /// Any walk or read failure aborts the build.
    pub fn build_with_progress<F>(root: &Path, key_mode: KeyMode, mut on_file: F) -> Result<Self>
    where
        F: FnMut(&IndexEntry),
    {
        let mut index = Self::new(root);

        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let key = match key_mode {
                KeyMode::FileName => entry.file_name().to_string_lossy().into_owned(),
                KeyMode::RelativePath => relative_key(root, entry.path()),
            };

            let indexed = IndexEntry {
                path: entry.path().to_path_buf(),
                fingerprint: hash_path(entry.path())?,
            };
            on_file(&indexed);
            index.insert(key, indexed);
        }

        debug!("Indexed {} keys under {:?}", index.len(), root);
        Ok(index)
    }

    /// Insert or overwrite `key`, keeping its first position
    pub fn insert(&mut self, key: String, entry: IndexEntry) {
        match self.positions.get(&key) {
            Some(&position) => {
                trace!("Key {} collides, replacing {:?}", key, self.entries[position].1.path);
                self.entries[position].1 = entry;
            }
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, entry));
            }
        }
    }

    /// Look up a key
    pub fn get(&self, key: &str) -> Option<&IndexEntry> {
        self.positions.get(key).map(|&position| &self.entries[position].1)
    }

    /// Whether `key` is present
    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Keys and entries in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Keys in discovery order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Root the index was built from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no keys
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn relative_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
