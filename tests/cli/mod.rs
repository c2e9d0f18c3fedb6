//! CLI integration tests
//!
//! Drive the built binary end to end: exit codes, report formats and the
//! snapshot files it leaves behind.

use std::fs;

use crate::common::{assert_json_type, assert_valid_json, TestRepo};

mod generate_tests {
    use super::*;

    #[test]
    fn test_generate_text_report() {
        let repo = TestRepo::new();
        repo.with_go_service();

        let stdout = repo.run_cli_success(&["generate"]);
        assert!(stdout.contains("Snapshot generated:"));
        assert!(stdout.contains("files: 3"));
        assert!(repo.snapshot_path().exists());

        let snapshot = repo.load_snapshot();
        assert_eq!(snapshot.tech_stack, vec!["Go"]);
    }

    #[test]
    fn test_generate_json_report() {
        let repo = TestRepo::new();
        repo.with_go_service();

        let stdout = repo.run_cli_success(&["generate", "--format", "json", "--name", "svc"]);
        let json = assert_valid_json(&stdout, "generate report");
        assert_json_type(&json, "generate");
        assert_eq!(json["project"], "svc");
        assert_eq!(json["files"], 3);
        assert_eq!(json["failed"], 0);
    }

    #[test]
    fn test_generate_custom_output_and_excludes() {
        let repo = TestRepo::new();
        repo.with_go_service();

        repo.run_cli_success(&["generate", "-o", "index.json", "-e", "pkg"]);
        let text = fs::read_to_string(repo.path().join("index.json")).unwrap();
        let json = assert_valid_json(&text, "snapshot");
        assert!(json["files"].get("main.go").is_some());
        assert!(json["files"].get("pkg/api/server.go").is_none());
        assert!(!repo.snapshot_path().exists());
    }

    #[test]
    fn test_compact_snapshot_is_single_line() {
        let repo = TestRepo::new();
        repo.with_go_service();

        repo.run_cli_success(&["generate", "--compact"]);
        let text = fs::read_to_string(repo.snapshot_path()).unwrap();
        assert_eq!(text.trim_end().lines().count(), 1);
    }

    #[test]
    fn test_pretty_snapshot_keeps_ranges_on_one_line() {
        let repo = TestRepo::new();
        repo.with_go_service();

        repo.run_cli_success(&["generate"]);
        let text = fs::read_to_string(repo.snapshot_path()).unwrap();
        assert!(text.contains("\"range\": [5, 5]"));
    }

    #[test]
    fn test_missing_root_exits_1() {
        let repo = TestRepo::new();
        let (code, stderr) = repo.run_cli_failure(&["generate", "-p", "does/not/exist"]);
        assert_eq!(code, 1);
        assert!(stderr.starts_with("Error:"));
    }

    #[test]
    fn test_bad_config_exits_6() {
        let repo = TestRepo::new();
        repo.with_go_service()
            .add_file(".code-outline.toml", "[scan\nexclude = 3\n");

        let (code, _) = repo.run_cli_failure(&["generate"]);
        assert_eq!(code, 6);
    }

    #[test]
    fn test_config_file_is_honored() {
        let repo = TestRepo::new();
        repo.with_go_service().add_file(
            ".code-outline.toml",
            "[project]\nname = \"configured\"\n\n[scan]\nexclude = [\"util.go\"]\n",
        );

        repo.run_cli_success(&["generate"]);
        let snapshot = repo.load_snapshot();
        assert_eq!(snapshot.project_name, "configured");
        assert!(!snapshot.files.contains_key("util.go"));
    }
}

mod update_tests {
    use super::*;

    #[test]
    fn test_update_without_changes_leaves_file_untouched() {
        let repo = TestRepo::new();
        repo.with_go_service();

        repo.run_cli_success(&["generate"]);
        let before = fs::read(repo.snapshot_path()).unwrap();

        let stdout = repo.run_cli_success(&["update"]);
        assert!(stdout.contains("No changes detected"));
        assert_eq!(fs::read(repo.snapshot_path()).unwrap(), before);
    }

    #[test]
    fn test_update_lists_changes() {
        let repo = TestRepo::new();
        repo.with_go_service();
        repo.run_cli_success(&["generate"]);

        repo.add_file("extra.go", "package main\n\nfunc extra() {}\n")
            .remove_file("util.go");

        let stdout = repo.run_cli_success(&["update"]);
        assert!(stdout.contains("Snapshot updated: 1 added, 0 modified, 1 deleted"));
        assert!(stdout.contains("  + extra.go"));
        assert!(stdout.contains("  - util.go"));

        let snapshot = repo.load_snapshot();
        assert!(snapshot.files.contains_key("extra.go"));
        assert!(!snapshot.files.contains_key("util.go"));
    }

    #[test]
    fn test_update_json_report() {
        let repo = TestRepo::new();
        repo.with_go_service();
        repo.run_cli_success(&["generate"]);
        repo.modify_file("main.go", "package main\n\nfunc main() { Run() }\n");

        let stdout = repo.run_cli_success(&["update", "--format", "json", "-f", "main.go"]);
        let json = assert_valid_json(&stdout, "update report");
        assert_json_type(&json, "update");
        assert_eq!(json["modified"], 1);
        assert_eq!(json["written"], true);
        assert_eq!(json["changes"][0]["path"], "main.go");
        assert_eq!(json["changes"][0]["kind"], "modified");
    }

    #[test]
    fn test_update_without_snapshot_fails() {
        let repo = TestRepo::new();
        repo.with_go_service();

        let (code, stderr) = repo.run_cli_failure(&["update"]);
        assert_eq!(code, 1);
        assert!(stderr.contains("generate"));
    }

    #[test]
    fn test_invalid_snapshot_exits_5() {
        let repo = TestRepo::new();
        repo.with_go_service()
            .add_file("code-outline.json", "{ not json");

        let (code, stderr) = repo.run_cli_failure(&["update"]);
        assert_eq!(code, 5);
        assert!(stderr.contains("not a valid index"));
    }
}

mod query_tests {
    use super::*;

    #[test]
    fn test_query_prints_filtered_json() {
        let repo = TestRepo::new();
        repo.with_go_service();
        repo.run_cli_success(&["generate"]);

        let stdout = repo.run_cli_success(&["query", "-d", "pkg"]);
        let json = assert_valid_json(&stdout, "query result");
        assert_eq!(json["stats"]["total_files"], 1);
        assert!(json["files"].get("pkg/api/server.go").is_some());
        assert_eq!(json["stats"]["languages"][0], "Go");
    }

    #[test]
    fn test_query_writes_output_file() {
        let repo = TestRepo::new();
        repo.with_go_service();
        repo.run_cli_success(&["generate"]);

        let stdout = repo.run_cli_success(&["query", "-f", "util.go", "-o", "subset.json"]);
        assert!(stdout.contains("Query result written to subset.json"));
        assert!(stdout.contains("files: 1"));

        let text = fs::read_to_string(repo.path().join("subset.json")).unwrap();
        let json = assert_valid_json(&text, "query file");
        assert!(json["files"].get("util.go").is_some());
    }

    #[test]
    fn test_query_toon_format() {
        let repo = TestRepo::new();
        repo.with_go_service();
        repo.run_cli_success(&["generate"]);

        let stdout = repo.run_cli_success(&["query", "--format", "toon"]);
        assert!(!stdout.trim_start().starts_with('{'));
        assert!(stdout.contains("total_files"));
    }
}

#[test]
fn test_version_flag() {
    let repo = TestRepo::new();
    let stdout = repo.run_cli_success(&["--version"]);
    assert!(stdout.starts_with("code-outline "));
}
