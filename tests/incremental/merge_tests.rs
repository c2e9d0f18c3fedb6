//! Whole-tree incremental updates

use std::fs;

use code_outline::{snapshot, ChangeKind, FileChange, Scope};

use crate::common::TestRepo;

#[test]
fn test_noop_update_is_byte_identical() {
    let repo = TestRepo::new();
    repo.with_go_service();

    let first = repo.scan();
    snapshot::save(&first, &repo.snapshot_path(), false).unwrap();
    let before = fs::read(repo.snapshot_path()).unwrap();

    let loaded = repo.load_snapshot();
    let outcome = repo.update(loaded, &Scope::default());
    assert!(outcome.changes.is_empty());
    assert_eq!(outcome.snapshot.last_updated, first.last_updated);

    snapshot::save(&outcome.snapshot, &repo.snapshot_path(), false).unwrap();
    assert_eq!(fs::read(repo.snapshot_path()).unwrap(), before);
}

#[test]
fn test_merge_completeness() {
    let repo = TestRepo::new();
    repo.with_go_service()
        .add_file("pkg/api/routes.go", "package api\n\nfunc Routes() {}\n");

    let prior = repo.scan();
    let f = prior.files.len();

    // N = 2 added, M = 1 modified, K = 2 deleted
    repo.add_file("pkg/db/db.go", "package db\n\nfunc Open() {}\n")
        .add_file("cmd/tool.py", "def run():\n    pass\n")
        .modify_file(
            "main.go",
            "package main\n\n// main starts everything.\nfunc main() {\n\tServe()\n\tWait()\n}\n",
        )
        .remove_file("util.go")
        .remove_file("pkg/api/routes.go");

    let outcome = repo.update(prior.clone(), &Scope::default());
    assert_eq!(outcome.count(ChangeKind::Added), 2);
    assert_eq!(outcome.count(ChangeKind::Modified), 1);
    assert_eq!(outcome.count(ChangeKind::Deleted), 2);

    let files = &outcome.snapshot.files;
    assert_eq!(files.len(), f + 2 - 2);
    assert_ne!(files["main.go"], prior.files["main.go"]);
    assert_eq!(files["pkg/api/server.go"], prior.files["pkg/api/server.go"]);
    assert!(outcome.snapshot.last_updated >= prior.last_updated);

    let paths: Vec<&str> = outcome.changes.iter().map(|c| c.path.as_str()).collect();
    let mut sorted = paths.clone();
    sorted.sort_unstable();
    assert_eq!(paths, sorted);
}

#[test]
fn test_deletion_detection() {
    let repo = TestRepo::new();
    repo.with_go_service();
    let prior = repo.scan();
    assert!(prior.files.contains_key("util.go"));

    repo.remove_file("util.go");
    let outcome = repo.update(prior, &Scope::default());

    assert!(!outcome.snapshot.files.contains_key("util.go"));
    assert_eq!(
        outcome.changes,
        vec![FileChange {
            path: "util.go".into(),
            kind: ChangeKind::Deleted,
        }]
    );
}

#[test]
fn test_derived_fields_follow_file_set() {
    let repo = TestRepo::new();
    repo.add_file("main.go", "package main\n\nfunc main() {}\n");
    let prior = repo.scan();
    assert_eq!(prior.tech_stack, vec!["Go"]);

    repo.add_file("scripts/build.py", "def build():\n    pass\n");
    let outcome = repo.update(prior, &Scope::default());

    assert_eq!(outcome.snapshot.tech_stack, vec!["Go", "Python"]);
    assert_eq!(
        outcome.snapshot.module_summary["scripts"],
        "Contains 1 file: build.py"
    );
    assert_eq!(
        outcome.snapshot.module_summary["."],
        "Contains 1 file: main.go"
    );
}
