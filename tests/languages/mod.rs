//! Language-specific integration tests for code-outline
//!
//! Each test lays out real source files, runs the full scan (walk, parse,
//! extract) and checks the resulting snapshot, organized by language family.

pub mod managed_family;
pub mod scripting_family;
pub mod systems_family;

use crate::common::{assert_no_duplicates, assert_ranges_valid, TestRepo};

#[test]
fn test_multilang_tech_stack_and_modules() {
    let repo = TestRepo::new();
    repo.with_multilang();

    let snapshot = repo.scan();
    assert_eq!(snapshot.files.len(), 9);
    assert_eq!(
        snapshot.tech_stack,
        vec!["C", "C#", "C++", "Go", "Java", "JavaScript", "Python", "Rust", "TypeScript"]
    );
    assert_eq!(
        snapshot.module_summary["web"],
        "Contains 2 files: app.ts, legacy.js"
    );
    assert_eq!(snapshot.module_summary.len(), 8);
}

#[test]
fn test_multilang_structural_invariants() {
    let repo = TestRepo::new();
    repo.with_multilang().with_go_service();

    let snapshot = repo.scan();
    assert_ranges_valid(&snapshot, repo.path());
    assert_no_duplicates(&snapshot);
}

#[test]
fn test_unsupported_and_excluded_files_are_skipped() {
    let repo = TestRepo::new();
    repo.add_file("main.go", "package main\n\nfunc main() {}\n")
        .add_file("README.md", "# Title\n")
        .add_file("node_modules/dep/index.js", "function dep() {}\n")
        .add_file("vendor/lib/lib.go", "package lib\n")
        .add_file(".git/hooks/pre-commit.py", "def hook():\n    pass\n");

    let snapshot = repo.scan();
    assert_eq!(snapshot.files.keys().collect::<Vec<_>>(), vec!["main.go"]);
}

#[test]
fn test_uppercase_extension_is_recognized() {
    let repo = TestRepo::new();
    repo.add_file("Legacy.JAVA", "class Legacy {}\n");

    let snapshot = repo.scan();
    assert_eq!(snapshot.tech_stack, vec!["Java"]);
}
