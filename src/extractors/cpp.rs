//! C++ symbol extractor
//!
//! Extends the C rules with classes and namespaces as containers. Templates
//! anchor their declaration, so `template <...>` heads the signature and the
//! documentation is looked up above it.

use tree_sitter::Node;

use super::c::{declares_function, enumerator_list, in_function_scope, is_defined_tagged_type};
use super::common::{CommentSyntax, SourceFile, SLASH_COMMENTS};
use super::SymbolExtractor;

pub struct CppExtractor;

const PATTERNS: &[&str] = &[
    "function_definition",
    "declaration",
    "type_definition",
    "alias_declaration",
    "class_specifier",
    "struct_specifier",
    "union_specifier",
    "enum_specifier",
    "namespace_definition",
];

const BODY_KINDS: &[&str] = &[
    "compound_statement",
    "field_declaration_list",
    "declaration_list",
    "enumerator_list",
];

const CONTAINERS: &[&str] = &[
    "class_specifier",
    "struct_specifier",
    "union_specifier",
    "namespace_definition",
];

const TAGGED_TYPES: &[&str] = &[
    "class_specifier",
    "struct_specifier",
    "union_specifier",
    "enum_specifier",
];

impl SymbolExtractor for CppExtractor {
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
        &SLASH_COMMENTS
    }

    fn is_indexable(&self, node: &Node, _source: &SourceFile) -> bool {
        match node.kind() {
            "declaration" => declares_function(node),
            kind if TAGGED_TYPES.contains(&kind) => is_defined_tagged_type(node, BODY_KINDS),
            _ => true,
        }
    }

    fn anchor<'t>(&self, node: Node<'t>) -> Node<'t> {
        let mut anchor = node;
        while let Some(parent) = anchor.parent() {
            if parent.kind() != "template_declaration" {
                break;
            }
            anchor = parent;
        }
        anchor
    }

    fn member_of<'t>(&self, child: Node<'t>) -> Option<Node<'t>> {
        match child.kind() {
            "template_declaration" => {
                let mut cursor = child.walk();
                let inner = child
                    .named_children(&mut cursor)
                    .filter(|c| c.kind() != "template_parameter_list")
                    .find_map(|c| self.member_of(c));
                inner
            }
            "function_definition" | "namespace_definition" | "type_definition"
            | "alias_declaration" => Some(child),
            "declaration" | "field_declaration" => {
                if declares_function(&child) {
                    return Some(child);
                }
                // `struct Inner { ... };` inside a class body
                child.child_by_field_name("type").filter(|ty| {
                    TAGGED_TYPES.contains(&ty.kind()) && is_defined_tagged_type(ty, BODY_KINDS)
                })
            }
            kind if TAGGED_TYPES.contains(&kind) => {
                is_defined_tagged_type(&child, BODY_KINDS).then_some(child)
            }
            _ => None,
        }
    }

    fn is_local(&self, node: &Node) -> bool {
        in_function_scope(node, &["function_definition", "lambda_expression"])
    }

    fn extract_body(&self, node: &Node, source: &SourceFile) -> Option<String> {
        enumerator_list(node, source)
    }
}
