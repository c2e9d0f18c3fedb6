//! Updates restricted to explicit files and directories

use code_outline::{ChangeKind, Scope};

use crate::common::TestRepo;

fn scope(files: &[&str], dirs: &[&str]) -> Scope {
    Scope {
        files: files.iter().map(|s| s.to_string()).collect(),
        dirs: dirs.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_file_scope_ignores_changes_elsewhere() {
    let repo = TestRepo::new();
    repo.with_go_service();
    let prior = repo.scan();

    repo.modify_file("main.go", "package main\n\nfunc main() { Run() }\n")
        .remove_file("util.go");

    let outcome = repo.update(prior.clone(), &scope(&["main.go"], &[]));
    assert_eq!(outcome.changes.len(), 1);
    assert_eq!(outcome.changes[0].kind, ChangeKind::Modified);
    assert!(outcome.snapshot.files.contains_key("util.go"));
    assert_eq!(outcome.snapshot.files["util.go"], prior.files["util.go"]);
}

#[test]
fn test_missing_file_target_becomes_deletion() {
    let repo = TestRepo::new();
    repo.with_go_service();
    let prior = repo.scan();

    repo.remove_file("util.go");
    let outcome = repo.update(prior, &scope(&["util.go", "not-indexed.go"], &[]));

    assert_eq!(outcome.changes.len(), 1);
    assert_eq!(outcome.changes[0].path, "util.go");
    assert_eq!(outcome.changes[0].kind, ChangeKind::Deleted);
}

#[test]
fn test_missing_directory_target_deletes_its_files() {
    let repo = TestRepo::new();
    repo.with_go_service();
    let prior = repo.scan();

    std::fs::remove_dir_all(repo.path().join("pkg")).unwrap();
    let outcome = repo.update(prior, &scope(&[], &["pkg/"]));

    assert_eq!(outcome.count(ChangeKind::Deleted), 1);
    assert!(!outcome.snapshot.files.contains_key("pkg/api/server.go"));
    assert!(!outcome.snapshot.module_summary.contains_key("pkg/api"));
    assert!(outcome.snapshot.files.contains_key("main.go"));
}

#[test]
fn test_absolute_directory_target() {
    let repo = TestRepo::new();
    repo.with_go_service();
    let prior = repo.scan();

    repo.add_file("pkg/api/health.go", "package api\n\nfunc Health() {}\n");
    let abs = repo.path().join("pkg").display().to_string();
    let outcome = repo.update(prior, &scope(&[], &[&abs]));

    assert_eq!(outcome.changes.len(), 1);
    assert_eq!(outcome.changes[0].path, "pkg/api/health.go");
    assert_eq!(outcome.changes[0].kind, ChangeKind::Added);
}
