//! Java symbol extractor
//!
//! Only type declarations are top-level in Java. Methods, constructors and
//! nested types are collected as members, recursively. Enum constants are
//! kept as the enum's body; methods declared after them are members.

use tree_sitter::Node;

use super::common::{get_node_text, normalize_whitespace, CommentSyntax, SourceFile};
use super::SymbolExtractor;
use crate::schema::Symbol;

pub struct JavaExtractor;

const TYPE_DECLARATIONS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

const PATTERNS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
    "method_declaration",
    "constructor_declaration",
];

const BODY_KINDS: &[&str] = &[
    "block",
    "constructor_body",
    "class_body",
    "interface_body",
    "enum_body",
    "annotation_type_body",
];

const MEMBERS: &[&str] = &[
    "method_declaration",
    "constructor_declaration",
    "compact_constructor_declaration",
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

static COMMENTS: CommentSyntax = CommentSyntax {
    line_prefixes: &["//"],
    block: true,
    xml_doc: false,
    attribute_prefixes: &["@"],
};

impl SymbolExtractor for JavaExtractor {
    fn top_level_patterns(&self) -> &'static [&'static str] {
        PATTERNS
    }

    fn body_kinds(&self) -> &'static [&'static str] {
        BODY_KINDS
    }

    fn container_kinds(&self) -> &'static [&'static str] {
        TYPE_DECLARATIONS
    }

    fn comment_syntax(&self) -> &'static CommentSyntax {
        &COMMENTS
    }

    fn member_kinds(&self) -> &'static [&'static str] {
        MEMBERS
    }

    fn extract_members(&self, container: &Node, source: &SourceFile) -> Vec<Symbol> {
        let Some(body) = self.body_node(container) else {
            return Vec::new();
        };

        let mut declarations = Vec::new();
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            // Enum methods live in a trailing declarations block after the constants
            if child.kind() == "enum_body_declarations" {
                let mut inner = child.walk();
                declarations.extend(
                    child
                        .named_children(&mut inner)
                        .filter_map(|c| self.member_of(c)),
                );
            } else if let Some(member) = self.member_of(child) {
                declarations.push(member);
            }
        }

        declarations
            .iter()
            .map(|member| self.build_symbol(member, source))
            .collect()
    }

    fn extract_body(&self, node: &Node, source: &SourceFile) -> Option<String> {
        if node.kind() != "enum_declaration" {
            return None;
        }
        let body = self.body_node(node)?;
        let mut cursor = body.walk();
        let constants: Vec<String> = body
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "enum_constant")
            .map(|constant| normalize_whitespace(get_node_text(&constant, source)))
            .collect();
        Some(constants.join(", "))
    }
}
