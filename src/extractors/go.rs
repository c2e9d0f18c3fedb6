//! Go symbol extractor
//!
//! Go has no classes: methods are free declarations tied to a receiver, so
//! every function, method and type/const/var group is a top-level symbol and
//! nothing is a container. Type declarations keep their full text.

use super::common::{CommentSyntax, SLASH_COMMENTS};
use super::SymbolExtractor;

pub struct GoExtractor;

const PATTERNS: &[&str] = &[
    "function_declaration",
    "method_declaration",
    "type_declaration",
    "const_declaration",
    "var_declaration",
];

const BODY_KINDS: &[&str] = &["block"];

impl SymbolExtractor for GoExtractor {
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
}
