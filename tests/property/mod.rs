//! Property-based testing for treediff
//!
//! Uses proptest to check fingerprint and comparison invariants over
//! randomly generated trees.

use ::treediff::*;
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use tempfile::TempDir;

/// Generate random relative file paths (0-2 directories deep)
fn path_strategy() -> impl Strategy<Value = String> {
    let dirs = prop::collection::vec("[a-z]{1,6}", 0..=2);
    let name = prop_oneof!["file[0-9]{1,3}\\.txt", "[a-z]{3,8}\\.(rs|md)",];
    (dirs, name).prop_map(|(dirs, name)| {
        let mut parts = dirs;
        parts.push(name);
        parts.join("/")
    })
}

/// Generate random file content
fn content_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        "[a-zA-Z0-9 \n]{0,200}".prop_map(|s| s.into_bytes()),
        prop::collection::vec(any::<u8>(), 0..2000),
    ]
}

/// Generate a tree as relative path -> content
fn tree_strategy() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    prop::collection::btree_map(path_strategy(), content_strategy(), 0..12)
}

fn write_tree(root: &Path, files: &BTreeMap<String, Vec<u8>>) -> anyhow::Result<()> {
    for (path, content) in files {
        let full = root.join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full, content)?;
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_directory_fingerprint_is_deterministic(files in tree_strategy()) {
        let root = TempDir::new().unwrap();
        write_tree(root.path(), &files).unwrap();

        let first = hash_directory(root.path()).unwrap();
        let second = hash_directory(root.path()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_fingerprint_independent_of_location(files in tree_strategy()) {
        let one = TempDir::new().unwrap();
        let two = TempDir::new().unwrap();
        let nested = two.path().join("deeper").join("copy");
        fs::create_dir_all(&nested).unwrap();
        write_tree(one.path(), &files).unwrap();
        write_tree(&nested, &files).unwrap();

        prop_assert_eq!(hash_directory(one.path()).unwrap(), hash_directory(&nested).unwrap());
    }

    #[test]
    fn prop_different_content_different_fingerprint(a in content_strategy(), b in content_strategy()) {
        prop_assume!(a != b);
        let root = TempDir::new().unwrap();
        let left = root.path().join("a");
        let right = root.path().join("b");
        fs::write(&left, &a).unwrap();
        fs::write(&right, &b).unwrap();

        prop_assert_ne!(hash_file(&left).unwrap(), hash_file(&right).unwrap());
    }

    #[test]
    fn prop_identical_trees_never_reach_viewer(files in tree_strategy()) {
        let left = TempDir::new().unwrap();
        let right = TempDir::new().unwrap();
        write_tree(left.path(), &files).unwrap();
        write_tree(right.path(), &files).unwrap();

        for key_mode in [KeyMode::FileName, KeyMode::RelativePath] {
            let mut comparator = TreeComparatorBuilder::new()
                .key_mode(key_mode)
                .output(Box::new(io::sink()))
                .build(RecordingViewer::default(), AutoPrompter::yes());
            let report = comparator.run(left.path(), right.path()).unwrap();

            prop_assert_eq!(report.viewed, 0);
            prop_assert_eq!(report.only_left, 0);
            prop_assert_eq!(report.only_right, 0);
            prop_assert!(comparator.viewer().calls.is_empty());
        }
    }

    #[test]
    fn prop_report_counts_add_up(left_files in tree_strategy(), right_files in tree_strategy()) {
        let left = TempDir::new().unwrap();
        let right = TempDir::new().unwrap();
        write_tree(left.path(), &left_files).unwrap();
        write_tree(right.path(), &right_files).unwrap();

        let mut comparator = TreeComparatorBuilder::new()
            .output(Box::new(io::sink()))
            .build(RecordingViewer::default(), AutoPrompter::yes());
        let report = comparator.run(left.path(), right.path()).unwrap();

        prop_assert_eq!(report.checked, report.identical + report.viewed);
        prop_assert_eq!(report.left_files, report.checked + report.only_left);
        prop_assert_eq!(report.right_files, report.checked + report.only_right);
        prop_assert_eq!(comparator.viewer().calls.len(), report.viewed);
        prop_assert_eq!(comparator.prompter().pauses(), report.viewed);
    }
}
