//! Scripting language family integration tests
//!
//! Tests for JavaScript, TypeScript and Python.

use crate::common::{find_symbol, TestRepo};

mod javascript_tests {
    use super::*;

    #[test]
    fn test_exported_class_and_functions() {
        let repo = TestRepo::new();
        repo.add_file(
            "src/store.js",
            r#"// Store module for app state.

/**
 * Holds state.
 */
export class Store {
  get(key) {
    return this.data[key];
  }
}

export function createStore() {
  return new Store();
}
"#,
        );

        let snapshot = repo.scan();
        let record = &snapshot.files["src/store.js"];
        assert_eq!(record.documentation, "Store module for app state.");
        assert_eq!(record.symbols.len(), 2);
        assert_eq!(record.symbols[0].signature, "export class Store");
        assert_eq!(record.symbols[0].documentation, "Holds state.");
        assert_eq!(record.symbols[0].members[0].signature, "get(key)");
        assert_eq!(record.symbols[1].signature, "export function createStore()");
    }

    #[test]
    fn test_typescript_interface_and_tsx() {
        let repo = TestRepo::new();
        repo.add_file(
            "src/types.ts",
            "export interface User {\n  name(): string;\n}\n",
        )
        .add_file(
            "src/App.tsx",
            "export function App() {\n  return <main />;\n}\n",
        );

        let snapshot = repo.scan();
        assert_eq!(
            snapshot.files["src/types.ts"].symbols[0].signature,
            "export interface User"
        );
        assert_eq!(
            snapshot.files["src/App.tsx"].symbols[0].signature,
            "export function App()"
        );
        assert_eq!(snapshot.tech_stack, vec!["TypeScript"]);
    }
}

mod python_tests {
    use super::*;

    #[test]
    fn test_class_with_docstrings() {
        let repo = TestRepo::new();
        repo.add_file(
            "app/models.py",
            r#""""Domain models for the app."""


class User(Base):
    """A registered user."""

    def greet(self, other: "User") -> str:
        """Say hello."""
        return f"hi {other}"


def load(path):
    # nested helpers are not indexed
    def parse(line):
        return line
    return [parse(l) for l in open(path)]
"#,
        );

        let snapshot = repo.scan();
        let record = &snapshot.files["app/models.py"];
        assert_eq!(record.documentation, "Domain models for the app.");
        assert_eq!(record.symbols.len(), 2);

        let user = &record.symbols[0];
        assert_eq!(user.signature, "class User(Base):");
        assert_eq!(user.documentation, "A registered user.");
        assert_eq!(user.members[0].documentation, "Say hello.");

        assert!(find_symbol(&record.symbols, "parse").is_none());
    }
}
