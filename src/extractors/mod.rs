//! Per-language symbol extractors
//!
//! Every grammar names and nests its declarations differently (a function
//! body is a `block` in Go, a `compound_statement` in C, a `statement_block`
//! in JavaScript), but the symbol model and the pipeline that drives it are
//! shared. Each language family supplies a [`SymbolExtractor`]: mostly
//! constant node-kind tables, plus overrides where the generic algorithm
//! does not fit (Python class headers, C prototypes, C++ templates).
//!
//! # Adding a New Language
//!
//! 1. Add the `Lang` variant and its grammar in `lang.rs`
//! 2. Create a module here with a unit struct implementing `SymbolExtractor`
//! 3. Register it in [`extractor_for`]

pub mod c;
pub mod common;
pub mod cpp;
pub mod csharp;
pub mod go;
pub mod java;
pub mod javascript;
pub mod python;
pub mod rust;

use tree_sitter::Node;

use crate::lang::{Lang, LangFamily};
use crate::schema::Symbol;

use common::{
    first_child_of_kind, has_ancestor, leading_file_comment, line_range, normalize_signature,
    preceding_comment, CommentSyntax, SourceFile,
};

/// Capability set every language family implements
///
/// Only the four tables are required; the remaining methods carry the
/// shared algorithm and are overridden where a grammar is irregular.
pub trait SymbolExtractor: Send + Sync {
    /// Node kinds indexed as standalone declarations
    fn top_level_patterns(&self) -> &'static [&'static str];

    /// Node kinds that hold a declaration's body and are cut from its signature
    fn body_kinds(&self) -> &'static [&'static str];

    /// Node kinds whose declarations own member symbols
    fn container_kinds(&self) -> &'static [&'static str];

    /// Comment conventions for documentation scanning
    fn comment_syntax(&self) -> &'static CommentSyntax;

    /// Node kinds collected as members from a container body
    fn member_kinds(&self) -> &'static [&'static str] {
        &[]
    }

    fn is_top_level_pattern(&self, kind: &str) -> bool {
        self.top_level_patterns().contains(&kind)
    }

    fn is_container(&self, kind: &str) -> bool {
        self.container_kinds().contains(&kind)
    }

    /// Extra filter applied to pattern matches (e.g. C prototypes vs variables)
    fn is_indexable(&self, _node: &Node, _source: &SourceFile) -> bool {
        true
    }

    /// Node that owns the declaration's leading text (decorators, `export`,
    /// `template<...>`); signature, range and documentation start there
    fn anchor<'t>(&self, node: Node<'t>) -> Node<'t> {
        node
    }

    /// Body child of a declaration, if it has one
    fn body_node<'t>(&self, node: &Node<'t>) -> Option<Node<'t>> {
        first_child_of_kind(node, self.body_kinds())
    }

    /// Declaration text up to (not including) the body, on one line
    fn extract_signature(&self, node: &Node, source: &SourceFile) -> String {
        let anchor = self.anchor(*node);
        let end = self
            .body_node(node)
            .map(|body| body.start_byte())
            .unwrap_or_else(|| node.end_byte());
        normalize_signature(source.slice(anchor.start_byte(), end))
    }

    fn extract_documentation(&self, node: &Node, source: &SourceFile) -> String {
        let row = self.anchor(*node).start_position().row;
        preceding_comment(row, source, self.comment_syntax())
    }

    /// Inline content kept verbatim instead of as members
    fn extract_body(&self, _node: &Node, _source: &SourceFile) -> Option<String> {
        None
    }

    /// Declaration node a body child stands for, if it is a member
    fn member_of<'t>(&self, child: Node<'t>) -> Option<Node<'t>> {
        self.member_kinds().contains(&child.kind()).then_some(child)
    }

    /// Build member symbols from the container's body, in document order
    fn extract_members(&self, container: &Node, source: &SourceFile) -> Vec<Symbol> {
        let Some(body) = self.body_node(container) else {
            return Vec::new();
        };
        let mut cursor = body.walk();
        let members: Vec<Node> = body
            .named_children(&mut cursor)
            .filter_map(|child| self.member_of(child))
            .collect();
        members
            .iter()
            .map(|member| self.build_symbol(member, source))
            .collect()
    }

    /// True if some ancestor is a container; such nodes are indexed as members
    fn is_nested_in_container(&self, node: &Node) -> bool {
        has_ancestor(node, |ancestor| self.is_container(ancestor.kind()))
    }

    /// Callable node kinds that are not declarations themselves (closures,
    /// function expressions) but still make what they enclose local
    fn local_scope_kinds(&self) -> &'static [&'static str] {
        &[]
    }

    /// True if the node sits inside a non-container declaration or a local
    /// scope (a local type, a nested function, a `var` inside a function)
    ///
    /// Conditional blocks, `extern "C"` blocks and other statement wrappers
    /// do not make a declaration local.
    fn is_local(&self, node: &Node) -> bool {
        has_ancestor(node, |ancestor| {
            let kind = ancestor.kind();
            (self.is_top_level_pattern(kind) && !self.is_container(kind))
                || self.local_scope_kinds().contains(&kind)
        })
    }

    /// File-level documentation taken from the top of the file
    fn extract_file_documentation(&self, _root: &Node, source: &SourceFile) -> String {
        leading_file_comment(source, self.comment_syntax())
    }

    fn build_symbol(&self, node: &Node, source: &SourceFile) -> Symbol {
        let members = if self.is_container(node.kind()) {
            self.extract_members(node, source)
        } else {
            Vec::new()
        };

        Symbol {
            signature: self.extract_signature(node, source),
            documentation: self.extract_documentation(node, source),
            range: line_range(&self.anchor(*node)),
            body: self.extract_body(node, source),
            members,
        }
    }
}

/// Static language → extractor table
pub fn extractor_for(lang: Lang) -> &'static dyn SymbolExtractor {
    match lang.family() {
        LangFamily::Go => &go::GoExtractor,
        LangFamily::C => &c::CExtractor,
        LangFamily::Cpp => &cpp::CppExtractor,
        LangFamily::Java => &java::JavaExtractor,
        LangFamily::JavaScript => &javascript::JavaScriptExtractor,
        LangFamily::Python => &python::PythonExtractor,
        LangFamily::Rust => &rust::RustExtractor,
        LangFamily::CSharp => &csharp::CSharpExtractor,
    }
}
