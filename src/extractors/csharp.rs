//! C# symbol extractor
//!
//! Namespaces and types are containers. `///` XML doc comments are reduced
//! to their text content.

use tree_sitter::Node;

use super::common::{
    first_child_of_kind, get_node_text, normalize_signature, normalize_whitespace, CommentSyntax,
    SourceFile,
};
use super::SymbolExtractor;

pub struct CSharpExtractor;

const PATTERNS: &[&str] = &[
    "namespace_declaration",
    "file_scoped_namespace_declaration",
    "class_declaration",
    "struct_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "method_declaration",
    "constructor_declaration",
];

const BODY_KINDS: &[&str] = &[
    "declaration_list",
    "block",
    "arrow_expression_clause",
    "enum_member_declaration_list",
];

const CONTAINERS: &[&str] = &[
    "namespace_declaration",
    "class_declaration",
    "struct_declaration",
    "interface_declaration",
    "record_declaration",
];

const MEMBERS: &[&str] = &[
    "method_declaration",
    "constructor_declaration",
    "destructor_declaration",
    "operator_declaration",
    "namespace_declaration",
    "class_declaration",
    "struct_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
];

static COMMENTS: CommentSyntax = CommentSyntax {
    line_prefixes: &["///", "//"],
    block: true,
    xml_doc: true,
    attribute_prefixes: &["["],
};

impl SymbolExtractor for CSharpExtractor {
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

    fn extract_signature(&self, node: &Node, source: &SourceFile) -> String {
        // `namespace X;` ends at its semicolon whatever follows it
        let end = if node.kind() == "file_scoped_namespace_declaration" {
            first_child_of_kind(node, &[";"])
                .map(|semi| semi.end_byte())
                .unwrap_or_else(|| node.end_byte())
        } else {
            self.body_node(node)
                .map(|body| body.start_byte())
                .unwrap_or_else(|| node.end_byte())
        };
        normalize_signature(source.slice(node.start_byte(), end))
    }

    fn extract_body(&self, node: &Node, source: &SourceFile) -> Option<String> {
        if node.kind() != "enum_declaration" {
            return None;
        }
        first_child_of_kind(node, &["enum_member_declaration_list"])
            .map(|members| normalize_whitespace(get_node_text(&members, source)))
    }
}
