//! Symbol extraction orchestration
//!
//! Walks a parsed tree once in document order and hands every declaration
//! that is a standalone symbol to the language's [`SymbolExtractor`].
//! Declarations nested in a container are picked up through the container's
//! members instead, and declarations local to a function body are skipped.

use std::path::Path;

use tree_sitter::{Node, Tree};

use crate::error::Result;
use crate::extractors::common::{visit_all, SourceFile};
use crate::extractors::{extractor_for, SymbolExtractor};
use crate::lang::Lang;
use crate::schema::Symbol;

/// Extraction output for one file, before fingerprinting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContent {
    /// File-level purpose comment, empty if none qualifies
    pub documentation: String,

    /// Top-level symbols in document order
    pub symbols: Vec<Symbol>,
}

/// Extract the symbol outline of a parsed source file
pub fn extract(tree: &Tree, text: &str, lang: Lang) -> FileContent {
    let source = SourceFile::new(text);
    let extractor = extractor_for(lang);
    let root = tree.root_node();

    let mut candidates: Vec<Node> = Vec::new();
    visit_all(&root, |node| {
        if extractor.is_top_level_pattern(node.kind()) {
            candidates.push(*node);
        }
    });

    let symbols = candidates
        .iter()
        .filter(|node| is_standalone(extractor, node, &source))
        .map(|node| extractor.build_symbol(node, &source))
        .collect();

    FileContent {
        documentation: extractor.extract_file_documentation(&root, &source),
        symbols,
    }
}

fn is_standalone(extractor: &dyn SymbolExtractor, node: &Node, source: &SourceFile) -> bool {
    !extractor.is_nested_in_container(node)
        && !extractor.is_local(node)
        && extractor.is_indexable(node, source)
}

/// Parse and extract an in-memory snippet
///
/// The language name stands in for the path in error messages.
pub fn extract_source(text: &str, lang: Lang) -> Result<FileContent> {
    crate::parsing::parse_and_extract(Path::new(lang.name()), text, lang)
}
