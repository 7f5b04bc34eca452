//! Side-by-side viewer invocation

use crate::error::{Result, TreeDiffError};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Default viewer program
pub const DEFAULT_VIEWER: &str = "colordiff";

/// Default column width passed to the viewer
pub const DEFAULT_WIDTH: u16 = 70;

/// Shows the differences between two files to the user
pub trait DiffViewer {
    /// Show `left` against `right`, returning once the user is done
    fn view(&mut self, left: &Path, right: &Path) -> Result<()>;
}

/// Runs an external program as `<program> -y -W <width> <left> <right>`
///
/// The exit status is ignored: diff tools exit non-zero whenever the inputs
/// differ, which is always the case here.
#[derive(Debug, Clone)]
pub struct ExternalViewer {
    program: String,
    width: u16,
}

impl ExternalViewer {
    /// Viewer running `program` with the given column width
    pub fn new(program: impl Into<String>, width: u16) -> Self {
        Self {
            program: program.into(),
            width,
        }
    }

    /// Program that will be run
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed for one pair of files
    pub fn args(&self, left: &Path, right: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-W".to_string(),
            self.width.to_string(),
            left.display().to_string(),
            right.display().to_string(),
        ]
    }
}

impl Default for ExternalViewer {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWER, DEFAULT_WIDTH)
    }
}

impl DiffViewer for ExternalViewer {
    fn view(&mut self, left: &Path, right: &Path) -> Result<()> {
        let status = Command::new(&self.program)
            .args(self.args(left, right))
            .status()
            .map_err(|e| TreeDiffError::ToolUnavailable {
                tool: self.program.clone(),
                reason: e.to_string(),
            })?;
        debug!("{} exited with {}", self.program, status);
        Ok(())
    }
}

/// Viewer that only remembers what it was asked to show
#[derive(Debug, Default, Clone)]
pub struct RecordingViewer {
    /// Every pair passed to [`DiffViewer::view`], in order
    pub calls: Vec<(PathBuf, PathBuf)>,
}

impl DiffViewer for RecordingViewer {
    fn view(&mut self, left: &Path, right: &Path) -> Result<()> {
        self.calls.push((left.to_path_buf(), right.to_path_buf()));
        Ok(())
    }
}
