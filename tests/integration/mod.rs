//! Integration tests for treediff
//!
//! Runs the full comparison pipeline over generated directory trees and
//! checks exactly which pairs reach the viewer.

use ::treediff::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Two sibling trees under one base directory
pub struct TreePair {
    pub base: TempDir,
    pub left: PathBuf,
    pub right: PathBuf,
}

impl TreePair {
    /// Create `left/` and `right/` under a fresh temporary base
    pub fn new() -> Self {
        let base = TempDir::new().unwrap();
        let left = base.path().join("left");
        let right = base.path().join("right");
        fs::create_dir(&left).unwrap();
        fs::create_dir(&right).unwrap();
        Self { base, left, right }
    }

    /// Write the same files into both trees
    pub fn both(self, files: &[(&str, &str)]) -> Self {
        let left = self.left.clone();
        let right = self.right.clone();
        self.write(&left, files).write(&right, files)
    }

    pub fn left(self, files: &[(&str, &str)]) -> Self {
        let root = self.left.clone();
        self.write(&root, files)
    }

    pub fn right(self, files: &[(&str, &str)]) -> Self {
        let root = self.right.clone();
        self.write(&root, files)
    }

    fn write(self, root: &Path, files: &[(&str, &str)]) -> Self {
        for (path, content) in files {
            let full = root.join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        self
    }

    /// Run a comparison and return the report plus every pair shown
    pub fn compare(&self, key_mode: KeyMode) -> (CompareReport, Vec<(PathBuf, PathBuf)>) {
        let mut comparator = TreeComparatorBuilder::new()
            .key_mode(key_mode)
            .output(Box::new(io::sink()))
            .build(RecordingViewer::default(), AutoPrompter::yes());
        let report = comparator.run(&self.left, &self.right).unwrap();
        (report, comparator.viewer().calls.clone())
    }
}

#[test]
fn test_intersection_with_identical_content_views_nothing() {
    let trees = TreePair::new()
        .left(&[("a.txt", "x"), ("b.txt", "y")])
        .right(&[("a.txt", "x"), ("c.txt", "z")]);

    let (report, calls) = trees.compare(KeyMode::FileName);
    assert_eq!(report.checked, 1);
    assert_eq!(report.identical, 1);
    assert!(calls.is_empty());
}

#[test]
fn test_single_change_views_once_with_absolute_paths() {
    let trees = TreePair::new()
        .left(&[("a.txt", "hello")])
        .right(&[("a.txt", "world")]);

    let (report, calls) = trees.compare(KeyMode::FileName);
    assert_eq!(report.viewed, 1);
    assert_eq!(calls, vec![(trees.left.join("a.txt"), trees.right.join("a.txt"))]);
    assert!(calls[0].0.is_absolute());
    assert!(calls[0].1.is_absolute());
}

#[test]
fn test_identical_trees_view_nothing() {
    let trees = TreePair::new().both(&[
        ("README.md", "# readme"),
        ("src/main.rs", "fn main() {}"),
        ("src/util/mod.rs", ""),
        ("assets/logo.bin", "\u{0}\u{1}\u{2}"),
    ]);

    let (report, calls) = trees.compare(KeyMode::FileName);
    assert_eq!(report.checked, 4);
    assert_eq!(report.viewed, 0);
    assert!(calls.is_empty());
}

#[test]
fn test_files_matched_across_subdirectories_by_name() {
    let trees = TreePair::new()
        .left(&[("old/place/config.toml", "a = 1")])
        .right(&[("config.toml", "a = 2")]);

    let (_, calls) = trees.compare(KeyMode::FileName);
    assert_eq!(
        calls,
        vec![(
            trees.left.join("old").join("place").join("config.toml"),
            trees.right.join("config.toml")
        )]
    );

    let (report, calls) = trees.compare(KeyMode::RelativePath);
    assert_eq!(report.checked, 0);
    assert!(calls.is_empty());
}

#[test]
fn test_relative_path_mode_compares_each_duplicate() {
    let trees = TreePair::new()
        .left(&[("a/mod.rs", "1"), ("b/mod.rs", "2")])
        .right(&[("a/mod.rs", "1"), ("b/mod.rs", "3")]);

    let (report, calls) = trees.compare(KeyMode::RelativePath);
    assert_eq!(report.checked, 2);
    assert_eq!(
        calls,
        vec![(trees.left.join("b").join("mod.rs"), trees.right.join("b").join("mod.rs"))]
    );

    // By name only the last mod.rs on each side survives
    let (report, _) = trees.compare(KeyMode::FileName);
    assert_eq!(report.checked, 1);
    assert_eq!(report.viewed, 1);
}

#[test]
fn test_viewer_order_follows_right_tree() {
    let trees = TreePair::new()
        .left(&[("z.txt", "1"), ("m.txt", "1"), ("a.txt", "1")])
        .right(&[("z.txt", "2"), ("m.txt", "2"), ("a.txt", "2")]);

    let (_, calls) = trees.compare(KeyMode::FileName);
    let names: Vec<_> = calls
        .iter()
        .map(|(_, right)| right.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.txt", "m.txt", "z.txt"]);
}

#[test]
fn test_session_with_missing_directory_fails() {
    let trees = TreePair::new();
    let mut comparator = TreeComparatorBuilder::new()
        .output(Box::new(io::sink()))
        .build(RecordingViewer::default(), AutoPrompter::yes());

    let err = comparator
        .resolve_roots(trees.base.path(), Some("left"), Some("nowhere"))
        .unwrap_err();
    assert!(matches!(err, TreeDiffError::NotADirectory(path) if path.ends_with("nowhere")));
}

#[cfg(unix)]
#[test]
fn test_unreadable_file_is_fatal() {
    use std::os::unix::fs::PermissionsExt;

    let trees = TreePair::new()
        .left(&[("secret", "a")])
        .right(&[("secret", "b")]);
    let secret = trees.left.join("secret");
    fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits
    if fs::read(&secret).is_ok() {
        return;
    }

    let mut comparator = TreeComparatorBuilder::new()
        .output(Box::new(io::sink()))
        .build(RecordingViewer::default(), AutoPrompter::yes());
    let result = comparator.run(&trees.left, &trees.right);
    assert!(matches!(result, Err(TreeDiffError::Io(_))));
}
