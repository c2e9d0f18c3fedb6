//! C symbol extractor
//!
//! Functions, header prototypes, typedefs and tagged types with a body.
//! A `declaration` is only indexed when it declares a function; tagged
//! types are skipped when they are just the inner part of a typedef.

use tree_sitter::Node;

use super::common::{
    first_child_of_kind, get_node_text, has_ancestor, normalize_whitespace, CommentSyntax,
    SourceFile, SLASH_COMMENTS,
};
use super::SymbolExtractor;

pub struct CExtractor;

const PATTERNS: &[&str] = &[
    "function_definition",
    "declaration",
    "type_definition",
    "struct_specifier",
    "union_specifier",
    "enum_specifier",
];

const BODY_KINDS: &[&str] = &[
    "compound_statement",
    "field_declaration_list",
    "enumerator_list",
];

const TAGGED_TYPES: &[&str] = &["struct_specifier", "union_specifier", "enum_specifier"];

/// True inside a function body
///
/// A tagged type defined inside a variable declaration
/// (`struct S { int a; } s;`) stays top-level.
pub(crate) fn in_function_scope(node: &Node, scopes: &[&str]) -> bool {
    has_ancestor(node, |ancestor| scopes.contains(&ancestor.kind()))
}

/// True if a declarator chain ends in a function declarator
///
/// Follows pointer and reference declarators inward. A parenthesized inner
/// declarator (`(*fp)(int)`) is a function pointer variable, not a function.
pub(crate) fn is_function_declarator(declarator: Node) -> bool {
    let mut node = declarator;
    loop {
        match node.kind() {
            "function_declarator" => {
                return node
                    .child_by_field_name("declarator")
                    .is_some_and(|inner| inner.kind() != "parenthesized_declarator");
            }
            "pointer_declarator" | "reference_declarator" => {
                match node
                    .child_by_field_name("declarator")
                    .or_else(|| node.named_child(0))
                {
                    Some(inner) => node = inner,
                    None => return false,
                }
            }
            _ => return false,
        }
    }
}

/// True if a declaration node declares at least one function
pub(crate) fn declares_function(declaration: &Node) -> bool {
    let mut cursor = declaration.walk();
    let found = declaration
        .children_by_field_name("declarator", &mut cursor)
        .any(is_function_declarator);
    found
}

/// Tagged type with its own member list, not wrapped by a typedef
pub(crate) fn is_defined_tagged_type(node: &Node, body_kinds: &[&str]) -> bool {
    first_child_of_kind(node, body_kinds).is_some()
        && !node
            .parent()
            .is_some_and(|parent| parent.kind() == "type_definition")
}

/// Enumerator list text of an enum specifier
pub(crate) fn enumerator_list(node: &Node, source: &SourceFile) -> Option<String> {
    if node.kind() != "enum_specifier" {
        return None;
    }
    first_child_of_kind(node, &["enumerator_list"])
        .map(|list| normalize_whitespace(get_node_text(&list, source)))
}

impl SymbolExtractor for CExtractor {
    fn top_level_patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn body_kinds(&self) -> &'static [&'static str] {
        BODY_KINDS
    }

    fn container_kinds(&self) -> &'static [&'static str] {
        &[]
    }

    fn comment_syntax(&self) -> &'static CommentSyntax {
        &SLASH_COMMENTS
    }

    fn is_indexable(&self, node: &Node, _source: &SourceFile) -> bool {
        match node.kind() {
            "declaration" => declares_function(node),
            kind if TAGGED_TYPES.contains(&kind) => is_defined_tagged_type(node, BODY_KINDS),
            _ => true,
        }
    }

    fn is_local(&self, node: &Node) -> bool {
        in_function_scope(node, &["function_definition"])
    }

    fn extract_body(&self, node: &Node, source: &SourceFile) -> Option<String> {
        enumerator_list(node, source)
    }
}
