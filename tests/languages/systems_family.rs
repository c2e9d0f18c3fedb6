//! Systems language family integration tests
//!
//! Tests for Go, C, C++ and Rust.

use crate::common::{assert_symbol_exists, find_symbol, TestRepo};
use code_outline::LineRange;

// =============================================================================
// GO TESTS
// =============================================================================

mod go_tests {
    use super::*;

    #[test]
    fn test_signature_excises_body() {
        let repo = TestRepo::new();
        repo.add_file("add.go", "package m\n\nfunc add(a, b int) int { return a + b }\n");

        let snapshot = repo.scan();
        let symbol = &snapshot.files["add.go"].symbols[0];
        assert_eq!(symbol.signature, "func add(a, b int) int");
        assert_eq!(symbol.documentation, "");
        assert_eq!(symbol.range, LineRange(3, 3));
    }

    #[test]
    fn test_documentation_joining() {
        let repo = TestRepo::new();
        repo.with_go_service();

        let snapshot = repo.scan();
        let add = &snapshot.files["util.go"].symbols[0];
        assert_eq!(add.signature, "func add(a, b int) int");
        assert_eq!(add.documentation, "Adds two integers and returns the sum.");
    }

    #[test]
    fn test_methods_and_types() {
        let repo = TestRepo::new();
        repo.with_go_service();

        let snapshot = repo.scan();
        let server = &snapshot.files["pkg/api/server.go"];
        assert_eq!(server.symbols.len(), 2);
        assert_eq!(server.symbols[0].signature, "type Server struct { Addr string }");
        assert_eq!(server.symbols[1].signature, "func (s *Server) Start() error");
        assert_eq!(server.symbols[1].range, LineRange(7, 9));
    }
}

// =============================================================================
// C / C++ TESTS
// =============================================================================

mod c_family_tests {
    use super::*;

    #[test]
    fn test_header_prototypes_and_definitions() {
        let repo = TestRepo::new();
        repo.add_file(
            "src/util.h",
            "/* Math helpers. */\nint twice(int x);\nint counter;\n\nstruct point {\n    int x;\n    int y;\n};\n",
        )
        .add_file("src/util.c", "int twice(int x) {\n    return 2 * x;\n}\n");

        let snapshot = repo.scan();
        assert_symbol_exists(&snapshot, "src/util.h", "int twice(int x);");
        assert!(find_symbol(&snapshot.files["src/util.h"].symbols, "counter").is_none());
        assert_symbol_exists(&snapshot, "src/util.h", "struct point");
        assert_eq!(
            snapshot.files["src/util.c"].symbols[0].signature,
            "int twice(int x)"
        );
    }

    #[test]
    fn test_extern_c_header_is_indexed() {
        let repo = TestRepo::new();
        repo.add_file(
            "include/codec.hpp",
            "#pragma once\n\nextern \"C\" {\nint codec_open(const char *path);\nvoid codec_close(int handle);\n}\n",
        );

        let snapshot = repo.scan();
        let symbols = &snapshot.files["include/codec.hpp"].symbols;
        assert_eq!(symbols.len(), 2);
        assert_symbol_exists(
            &snapshot,
            "include/codec.hpp",
            "int codec_open(const char *path);",
        );
        assert_symbol_exists(&snapshot, "include/codec.hpp", "void codec_close(int handle);");
    }

    #[test]
    fn test_cpp_class_members() {
        let repo = TestRepo::new();
        repo.with_multilang();

        let snapshot = repo.scan();
        let shape = &snapshot.files["cpp/shape.hpp"].symbols[0];
        assert_eq!(shape.signature, "class Shape");
        assert_eq!(shape.members.len(), 1);
        assert_eq!(shape.members[0].signature, "double area() const;");
    }
}

// =============================================================================
// RUST TESTS
// =============================================================================

mod rust_tests {
    use super::*;

    #[test]
    fn test_impl_members_and_file_documentation() {
        let repo = TestRepo::new();
        repo.add_file(
            "src/cache.rs",
            r#"//! Bounded in-memory cache.

/// Entry store.
pub struct Cache {
    items: Vec<u8>,
}

impl Cache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
"#,
        );

        let snapshot = repo.scan();
        let record = &snapshot.files["src/cache.rs"];
        assert_eq!(record.documentation, "Bounded in-memory cache.");
        assert_eq!(record.symbols.len(), 2);
        assert_eq!(record.symbols[0].documentation, "Entry store.");

        let imp = &record.symbols[1];
        assert_eq!(imp.signature, "impl Cache");
        assert_eq!(imp.members.len(), 2);
        assert_eq!(imp.members[0].signature, "pub fn new() -> Self");
        assert_eq!(imp.members[0].documentation, "Create an empty cache.");
    }
}
