//! Python symbol extractor
//!
//! Python bodies are indentation-delimited, so class headers are cut at the
//! first top-level `:` instead of at a body token. Documentation prefers a
//! `#` comment above the declaration and falls back to the docstring.

use tree_sitter::Node;

use super::common::{
    get_node_text, header_through_colon, leading_file_comment, normalize_signature,
    normalize_whitespace, preceding_comment, CommentSyntax, SourceFile,
};
use super::SymbolExtractor;

pub struct PythonExtractor;

const PATTERNS: &[&str] = &["function_definition", "class_definition"];

const BODY_KINDS: &[&str] = &["block"];

const CONTAINERS: &[&str] = &["class_definition"];

const MEMBERS: &[&str] = &["function_definition", "class_definition"];

static COMMENTS: CommentSyntax = CommentSyntax {
    line_prefixes: &["#"],
    block: false,
    xml_doc: false,
    attribute_prefixes: &["@"],
};

/// Strip string prefixes and quotes from a literal
fn string_literal_contents(text: &str) -> &str {
    let body = text.trim_start_matches(|c: char| "rRuUbBfF".contains(c));
    for quote in ["\"\"\"", "'''", "\"", "'"] {
        if let Some(inner) = body
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    body
}

/// Docstring: a string literal as the first statement of a block or module
///
/// Comments before it (a shebang, an encoding line) do not count as
/// statements.
fn docstring(block: &Node, source: &SourceFile) -> String {
    let mut cursor = block.walk();
    let first = block
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    let Some(statement) = first else {
        return String::new();
    };
    if statement.kind() != "expression_statement" {
        return String::new();
    }
    match statement.named_child(0) {
        Some(literal) if literal.kind() == "string" => {
            normalize_whitespace(string_literal_contents(get_node_text(&literal, source)))
        }
        _ => String::new(),
    }
}

impl SymbolExtractor for PythonExtractor {
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

    fn anchor<'t>(&self, node: Node<'t>) -> Node<'t> {
        match node.parent() {
            Some(parent) if parent.kind() == "decorated_definition" => parent,
            _ => node,
        }
    }

    fn member_of<'t>(&self, child: Node<'t>) -> Option<Node<'t>> {
        let declaration = if child.kind() == "decorated_definition" {
            child.child_by_field_name("definition")?
        } else {
            child
        };
        MEMBERS.contains(&declaration.kind()).then_some(declaration)
    }

    /// Decorators stay out of the signature; range and documentation still
    /// start at them through `anchor`
    fn extract_signature(&self, node: &Node, source: &SourceFile) -> String {
        let text = source.slice(node.start_byte(), node.end_byte());
        if node.kind() == "class_definition" {
            if let Some(header) = header_through_colon(text) {
                return normalize_signature(header);
            }
        }
        let end = self
            .body_node(node)
            .map(|body| body.start_byte())
            .unwrap_or_else(|| node.end_byte());
        normalize_signature(source.slice(node.start_byte(), end))
    }

    fn extract_documentation(&self, node: &Node, source: &SourceFile) -> String {
        let row = self.anchor(*node).start_position().row;
        let comment = preceding_comment(row, source, &COMMENTS);
        if !comment.is_empty() {
            return comment;
        }
        self.body_node(node)
            .map(|body| docstring(&body, source))
            .unwrap_or_default()
    }

    fn extract_file_documentation(&self, root: &Node, source: &SourceFile) -> String {
        let module_doc = docstring(root, source);
        if !module_doc.is_empty() {
            return module_doc;
        }
        leading_file_comment(source, &COMMENTS)
    }
}
