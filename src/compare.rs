//! Comparing two directory trees
//!
//! A run is a straight pipeline:
//!
//! 1. resolve both roots against a base directory (normally the current
//!    working directory), asking the [`Prompter`] for any that were not given
//! 2. build a [`FilenameIndex`] for each root
//! 3. for every key present in both indices whose fingerprints differ, show
//!    the pair in the [`DiffViewer`] and pause before the next one
//!
//! Keys found on only one side are counted in the [`CompareReport`] but are
//! never shown. Iteration follows the discovery order of the right-hand tree.
//!
//! ## Example
//!
//! ```rust,no_run
//! use treediff::{AutoPrompter, ExternalViewer, KeyMode, TreeComparatorBuilder};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut comparator = TreeComparatorBuilder::new()
//!     .key_mode(KeyMode::RelativePath)
//!     .build(ExternalViewer::default(), AutoPrompter::yes());
//!
//! let report = comparator.run(Path::new("release-1.0"), Path::new("release-1.1"))?;
//! println!("{} of {} shared files changed", report.viewed, report.checked);
//! # Ok(())
//! # }
//! ```

use crate::digest::Fingerprint;
use crate::error::{Result, TreeDiffError};
use crate::index::{FilenameIndex, IndexEntry, KeyMode};
use crate::prompt::Prompter;
use crate::tool::{ensure_tool, ToolProvisioner, ToolStatus};
use crate::viewer::{DiffViewer, DEFAULT_VIEWER};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Terminal reset sequence printed before each screen transition
pub const CLEAR_SCREEN: &str = "\x1bc";

/// Message shown after each viewer run
pub const CONTINUE_MESSAGE: &str = "\n\n\nPress enter to continue to the next file.";

/// Settings for a comparison run
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// How files are keyed in each index
    pub key_mode: KeyMode,
    /// Emit [`CLEAR_SCREEN`] before the tool check and before each viewer run
    pub clear_screen: bool,
    /// Program the tool check looks for
    pub tool: String,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            key_mode: KeyMode::default(),
            clear_screen: false,
            tool: DEFAULT_VIEWER.to_string(),
        }
    }
}

/// A key whose fingerprints differ between the two trees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedPair {
    /// Index key shared by both sides
    pub key: String,
    /// File in the left tree
    pub left: PathBuf,
    /// File in the right tree
    pub right: PathBuf,
    /// Fingerprint of the left file
    pub left_fingerprint: Fingerprint,
    /// Fingerprint of the right file
    pub right_fingerprint: Fingerprint,
}

/// Counts gathered over one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareReport {
    /// Keys in the left index
    pub left_files: usize,
    /// Keys in the right index
    pub right_files: usize,
    /// Keys present on both sides
    pub checked: usize,
    /// Shared keys with equal fingerprints
    pub identical: usize,
    /// Pairs handed to the viewer
    pub viewed: usize,
    /// Keys only in the left index
    pub only_left: usize,
    /// Keys only in the right index
    pub only_right: usize,
}

/// Join `fragment` onto `base` and make sure the result is a directory
///
/// Absolute fragments replace `base`. An empty fragment means `base` itself.
pub fn resolve_root(base: &Path, fragment: &str) -> Result<PathBuf> {
    let trimmed = fragment.trim();
    let root = if trimmed.is_empty() {
        base.to_path_buf()
    } else {
        base.join(trimmed)
    };

    if !root.is_dir() {
        return Err(TreeDiffError::NotADirectory(root));
    }
    Ok(root)
}

/// Keys of `right` that also exist in `left`, in `right`'s order
pub fn checkable<'a>(left: &FilenameIndex, right: &'a FilenameIndex) -> Vec<&'a str> {
    right.keys().filter(|key| left.contains(key)).collect()
}

/// Shared keys whose fingerprints differ, in `right`'s order
pub fn changed(left: &FilenameIndex, right: &FilenameIndex) -> Vec<ChangedPair> {
    right
        .iter()
        .filter_map(|(key, right_entry)| {
            let left_entry = left.get(key)?;
            if left_entry.fingerprint == right_entry.fingerprint {
                return None;
            }
            Some(ChangedPair {
                key: key.to_string(),
                left: left_entry.path.clone(),
                right: right_entry.path.clone(),
                left_fingerprint: left_entry.fingerprint.clone(),
                right_fingerprint: right_entry.fingerprint.clone(),
            })
        })
        .collect()
}

/// Builder for [`TreeComparator`]
pub struct TreeComparatorBuilder {
    options: CompareOptions,
    output: Box<dyn Write>,
}

impl TreeComparatorBuilder {
    /// Builder with default options writing to stdout
    pub fn new() -> Self {
        Self {
            options: CompareOptions::default(),
            output: Box::new(io::stdout()),
        }
    }

    /// Set how files are keyed
    pub fn key_mode(mut self, key_mode: KeyMode) -> Self {
        self.options.key_mode = key_mode;
        self
    }

    /// Enable or disable screen clearing
    pub fn clear_screen(mut self, clear: bool) -> Self {
        self.options.clear_screen = clear;
        self
    }

    /// Set the program the tool check looks for
    pub fn tool(mut self, tool: impl Into<String>) -> Self {
        self.options.tool = tool.into();
        self
    }

    /// Replace all options at once
    pub fn options(mut self, options: CompareOptions) -> Self {
        self.options = options;
        self
    }

    /// Send progress output somewhere other than stdout
    pub fn output(mut self, output: Box<dyn Write>) -> Self {
        self.output = output;
        self
    }

    /// Finish with the given viewer and prompter
    pub fn build<V: DiffViewer, P: Prompter>(self, viewer: V, prompter: P) -> TreeComparator<V, P> {
        TreeComparator {
            options: self.options,
            viewer,
            prompter,
            output: self.output,
        }
    }
}

impl Default for TreeComparatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives a comparison run
pub struct TreeComparator<V: DiffViewer, P: Prompter> {
    options: CompareOptions,
    viewer: V,
    prompter: P,
    output: Box<dyn Write>,
}

impl<V: DiffViewer, P: Prompter> TreeComparator<V, P> {
    /// Options in effect
    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// The viewer, e.g. to inspect what a recording viewer saw
    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    /// The prompter
    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Check for the viewer program and offer to install it
    pub fn ensure_viewer(&mut self, provisioner: &dyn ToolProvisioner) -> Result<ToolStatus> {
        let tool = self.options.tool.clone();
        let status = ensure_tool(provisioner, &mut self.prompter, &tool)?;
        self.clear()?;
        debug!("Viewer {} status: {:?}", tool, status);
        Ok(status)
    }

    /// Resolve both roots against `base`, prompting for any that are missing
    pub fn resolve_roots(
        &mut self,
        base: &Path,
        left: Option<&str>,
        right: Option<&str>,
    ) -> Result<(PathBuf, PathBuf)> {
        let left = match left {
            Some(fragment) => fragment.to_string(),
            None => self.prompter.read_path("directory #1", base)?,
        };
        let left = resolve_root(base, &left)?;

        let right = match right {
            Some(fragment) => fragment.to_string(),
            None => self.prompter.read_path("directory #2", base)?,
        };
        let right = resolve_root(base, &right)?;

        Ok((left, right))
    }

    /// Build the index for one root, printing each file as it is hashed
    pub fn index_tree(&mut self, root: &Path) -> Result<FilenameIndex> {
        let output = &mut self.output;
        let mut write_error = None;
        let index =
            FilenameIndex::build_with_progress(root, self.options.key_mode, |entry: &IndexEntry| {
                if write_error.is_none() {
                    if let Err(e) = writeln!(output, "{}", entry.path.display()) {
                        write_error = Some(e);
                    }
                }
            })?;

        match write_error {
            Some(e) => Err(e.into()),
            None => Ok(index),
        }
    }

    /// Show every changed pair, pausing after each one
    pub fn review(&mut self, pairs: &[ChangedPair]) -> Result<usize> {
        for pair in pairs {
            info!(
                "{} differs ({} vs {})",
                pair.key,
                pair.left_fingerprint.short(),
                pair.right_fingerprint.short()
            );
            self.clear()?;
            self.viewer.view(&pair.left, &pair.right)?;
            self.prompter.pause(CONTINUE_MESSAGE)?;
        }
        Ok(pairs.len())
    }

    /// Compare two already resolved roots
    pub fn run(&mut self, left_root: &Path, right_root: &Path) -> Result<CompareReport> {
        let left = self.index_tree(left_root)?;
        let right = self.index_tree(right_root)?;

        let checked = checkable(&left, &right).len();
        let pairs = changed(&left, &right);
        let viewed = self.review(&pairs)?;

        let report = CompareReport {
            left_files: left.len(),
            right_files: right.len(),
            checked,
            identical: checked - pairs.len(),
            viewed,
            only_left: left.len() - checked,
            only_right: right.len() - checked,
        };
        debug!("Comparison finished: {:?}", report);
        Ok(report)
    }

    /// Full session: tool check, root resolution, comparison
    pub fn run_session(
        &mut self,
        provisioner: &dyn ToolProvisioner,
        base: &Path,
        left: Option<&str>,
        right: Option<&str>,
    ) -> Result<CompareReport> {
        self.ensure_viewer(provisioner)?;
        let (left_root, right_root) = self.resolve_roots(base, left, right)?;
        self.run(&left_root, &right_root)
    }

    fn clear(&mut self) -> Result<()> {
        if self.options.clear_screen {
            write!(self.output, "{}", CLEAR_SCREEN)?;
            self.output.flush()?;
        }
        Ok(())
    }
}
