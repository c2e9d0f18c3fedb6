//! JavaScript/TypeScript symbol extractor
//!
//! Shared by JavaScript, JSX, TypeScript and TSX. Exported declarations are
//! anchored at their `export` statement so the keyword stays part of the
//! signature and the documentation above it is found.

use tree_sitter::Node;

use super::common::{
    first_child_of_kind, get_node_text, normalize_whitespace, CommentSyntax, SourceFile,
};
use super::SymbolExtractor;

pub struct JavaScriptExtractor;

const PATTERNS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_signature",
    "class_declaration",
    "abstract_class_declaration",
    "interface_declaration",
    "enum_declaration",
    "type_alias_declaration",
];

const BODY_KINDS: &[&str] = &[
    "statement_block",
    "class_body",
    "interface_body",
    "object_type",
    "enum_body",
];

const CONTAINERS: &[&str] = &[
    "class_declaration",
    "abstract_class_declaration",
    "class",
    "interface_declaration",
];

const LOCAL_SCOPES: &[&str] = &[
    "arrow_function",
    "function_expression",
    "generator_function",
    "method_definition",
];

const MEMBERS: &[&str] = &[
    "method_definition",
    "method_signature",
    "abstract_method_signature",
];

static COMMENTS: CommentSyntax = CommentSyntax {
    line_prefixes: &["//"],
    block: true,
    xml_doc: false,
    attribute_prefixes: &["@"],
};

impl SymbolExtractor for JavaScriptExtractor {
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

    fn member_kinds(&self) -> &'static [&'static str] {
        MEMBERS
    }

    fn local_scope_kinds(&self) -> &'static [&'static str] {
        LOCAL_SCOPES
    }

    fn anchor<'t>(&self, node: Node<'t>) -> Node<'t> {
        match node.parent() {
            Some(parent) if parent.kind() == "export_statement" => parent,
            _ => node,
        }
    }

    fn body_node<'t>(&self, node: &Node<'t>) -> Option<Node<'t>> {
        // The right-hand side of a type alias is the alias itself
        if node.kind() == "type_alias_declaration" {
            return None;
        }
        first_child_of_kind(node, BODY_KINDS)
    }

    fn extract_body(&self, node: &Node, source: &SourceFile) -> Option<String> {
        if node.kind() != "enum_declaration" {
            return None;
        }
        first_child_of_kind(node, &["enum_body"])
            .map(|body| normalize_whitespace(get_node_text(&body, source)))
    }
}
