//! # treediff - compare two directory trees file by file
//!
//! treediff fingerprints every file in two directory trees, pairs up files
//! that exist on both sides and opens each pair whose content differs in a
//! side-by-side diff viewer (`colordiff -y -W 70` by default).
//!
//! ## Overview
//!
//! - [`digest`]: SHA-256 fingerprints of files and whole directory trees,
//!   streamed in 1 MiB chunks
//! - [`index`]: per-root mapping from file name (or relative path) to
//!   fingerprint, in discovery order
//! - [`compare`]: the pipeline that resolves roots, builds both indices and
//!   walks the changed pairs
//! - [`viewer`], [`prompt`], [`tool`]: the external viewer, the interactive
//!   steps and viewer installation, each behind a trait so a run can be
//!   driven without a terminal
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use treediff::{AutoPrompter, RecordingViewer, TreeComparatorBuilder};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut comparator = TreeComparatorBuilder::new()
//!     .build(RecordingViewer::default(), AutoPrompter::yes());
//!
//! let report = comparator.run(Path::new("./before"), Path::new("./after"))?;
//! for (left, right) in &comparator.viewer().calls {
//!     println!("{} != {}", left.display(), right.display());
//! }
//! println!("{} shared, {} changed", report.checked, report.viewed);
//! # Ok(())
//! # }
//! ```
//!
//! ## Matching
//!
//! Files are matched by bare file name unless [`KeyMode::RelativePath`] is
//! selected. With bare names, same-named files in different subdirectories
//! of one tree collide and the last one found is kept. Files that exist on
//! only one side are never shown.
//!
//! ## Error Handling
//!
//! All operations return `Result<T, TreeDiffError>`. Unreadable files and
//! missing directories end the run; a missing viewer program is offered for
//! installation first.

pub mod compare;
pub mod digest;
pub mod error;
pub mod index;
pub mod prompt;
pub mod tool;
pub mod viewer;

pub use compare::{
    changed, checkable, resolve_root, ChangedPair, CompareOptions, CompareReport, TreeComparator,
    TreeComparatorBuilder,
};
pub use digest::{hash_directory, hash_file, hash_path, Fingerprint};
pub use error::{Result, TreeDiffError};
pub use index::{FilenameIndex, IndexEntry, KeyMode};
pub use prompt::{AutoPrompter, Prompter, TerminalPrompter};
pub use tool::{ensure_tool, AptProvisioner, ManualProvisioner, ToolProvisioner, ToolStatus};
pub use viewer::{DiffViewer, ExternalViewer, RecordingViewer};
