//! Custom assertions for integration tests
//!
//! Structural checks over snapshots: every range inside its file, no member
//! duplicated at top level.

use std::fs;
use std::path::Path;

use serde_json::Value;

use code_outline::{ProjectSnapshot, Symbol};

/// Assert that output is valid JSON and return parsed value
pub fn assert_valid_json(output: &str, context: &str) -> Value {
    serde_json::from_str(output).unwrap_or_else(|e| {
        panic!(
            "Expected valid JSON ({}): {}\nOutput:\n{}",
            context, e, output
        )
    })
}

/// Assert that JSON output has expected type
pub fn assert_json_type(json: &Value, expected_type: &str) {
    let actual_type = json["_type"]
        .as_str()
        .unwrap_or_else(|| panic!("JSON missing '_type' field"));
    assert_eq!(
        actual_type, expected_type,
        "Expected JSON type '{}' but got '{}'",
        expected_type, actual_type
    );
}

/// Find a symbol (top-level or member) whose signature contains `needle`
pub fn find_symbol<'a>(symbols: &'a [Symbol], needle: &str) -> Option<&'a Symbol> {
    symbols.iter().find_map(|s| {
        if s.signature.contains(needle) {
            Some(s)
        } else {
            find_symbol(&s.members, needle)
        }
    })
}

/// Assert that a symbol with given signature fragment exists in a file
pub fn assert_symbol_exists(snapshot: &ProjectSnapshot, file: &str, needle: &str) {
    let record = snapshot
        .files
        .get(file)
        .unwrap_or_else(|| panic!("File '{}' missing from snapshot", file));
    assert!(
        find_symbol(&record.symbols, needle).is_some(),
        "Expected to find symbol '{}' in {}:\n{:#?}",
        needle,
        file,
        record.symbols
    );
}

/// Assert every range satisfies 1 <= start <= end <= line count
pub fn assert_ranges_valid(snapshot: &ProjectSnapshot, root: &Path) {
    fn check(symbols: &[Symbol], line_count: usize, file: &str) {
        for symbol in symbols {
            assert!(
                symbol.range.is_within(line_count),
                "{}: range {:?} of '{}' outside 1..={}",
                file,
                symbol.range,
                symbol.signature,
                line_count
            );
            check(&symbol.members, line_count, file);
        }
    }

    for (file, record) in &snapshot.files {
        let text = fs::read_to_string(root.join(file)).expect("indexed file readable");
        check(&record.symbols, text.lines().count(), file);
    }
}

/// Assert no member symbol also appears in its file's top-level list
pub fn assert_no_duplicates(snapshot: &ProjectSnapshot) {
    fn collect_members<'a>(symbols: &'a [Symbol], out: &mut Vec<&'a Symbol>) {
        for symbol in symbols {
            for member in &symbol.members {
                out.push(member);
            }
            collect_members(&symbol.members, out);
        }
    }

    for (file, record) in &snapshot.files {
        let mut members = Vec::new();
        collect_members(&record.symbols, &mut members);
        for member in members {
            assert!(
                !record.symbols.iter().any(|top| top == member),
                "{}: member '{}' duplicated at top level",
                file,
                member.signature
            );
        }
    }
}
