//! Rust symbol extractor

use tree_sitter::Node;

use super::common::{
    first_child_of_kind, get_node_text, normalize_whitespace, CommentSyntax, SourceFile,
};
use super::SymbolExtractor;

pub struct RustExtractor;

const PATTERNS: &[&str] = &[
    "function_item",
    "function_signature_item",
    "struct_item",
    "enum_item",
    "union_item",
    "trait_item",
    "impl_item",
    "mod_item",
    "type_item",
    "const_item",
    "static_item",
];

const BODY_KINDS: &[&str] = &[
    "block",
    "declaration_list",
    "field_declaration_list",
    "enum_variant_list",
];

const CONTAINERS: &[&str] = &["impl_item", "trait_item", "mod_item"];

const LOCAL_SCOPES: &[&str] = &["closure_expression"];

static COMMENTS: CommentSyntax = CommentSyntax {
    line_prefixes: &["///", "//!", "//"],
    block: true,
    xml_doc: false,
    attribute_prefixes: &["#["],
};

impl SymbolExtractor for RustExtractor {
    fn top_level_patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn body_kinds(&self) -> &'static [&'static str] {
        BODY_KINDS
    }

    fn container_kinds(&self) -> &'static [&'static str] {
        CONTAINERS
    }

    fn comment_syntax(&self) -> &'static CommentSyntax {
        &COMMENTS
    }

    // Inline modules hold any item kind; impls and traits only ever hold
    // functions, consts and types
    fn member_kinds(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn local_scope_kinds(&self) -> &'static [&'static str] {
        LOCAL_SCOPES
    }

    fn extract_body(&self, node: &Node, source: &SourceFile) -> Option<String> {
        if node.kind() != "enum_item" {
            return None;
        }
        first_child_of_kind(node, &["enum_variant_list"])
            .map(|variants| normalize_whitespace(get_node_text(&variants, source)))
    }
}
