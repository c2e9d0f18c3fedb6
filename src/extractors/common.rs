//! Common utilities shared across all language extractors
//!
//! Text normalization, CST traversal helpers and the line-oriented comment
//! scanners. Nothing in here knows about a specific grammar; the per-language
//! tables in the sibling modules feed it node kinds and comment syntax.

use once_cell::sync::Lazy;
use regex::Regex;
use tree_sitter::Node;

use crate::schema::LineRange;

// ============================================================================
// Source Text
// ============================================================================

/// Source text of one file plus its line index
#[derive(Debug)]
pub struct SourceFile<'a> {
    pub text: &'a str,
    pub lines: Vec<&'a str>,
}

impl<'a> SourceFile<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            lines: text.lines().collect(),
        }
    }

    /// Number of lines, counting a final line without terminator
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Trimmed content of a 0-based row, empty past the end
    pub fn trimmed_line(&self, row: usize) -> &'a str {
        self.lines.get(row).map(|l| l.trim()).unwrap_or("")
    }

    /// Byte slice of the text, clamped to valid char boundaries
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        let end = end.min(self.text.len());
        let start = start.min(end);
        self.text.get(start..end).unwrap_or("")
    }
}

/// Get text content of a node
pub fn get_node_text<'a>(node: &Node, source: &SourceFile<'a>) -> &'a str {
    source.slice(node.start_byte(), node.end_byte())
}

/// Normalize whitespace: collapse multiple spaces/newlines to single space
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse a declaration header onto one line
///
/// Whitespace runs become a single space, except that a run containing a
/// line break is dropped entirely after an opening `(`, `[` or `<` and
/// before a closing `)`, `]` or `>`.
pub fn normalize_signature(s: &str) -> String {
    let trimmed = s.trim();
    let mut out = String::with_capacity(trimmed.len());
    let mut chars = trimmed.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_whitespace() {
            out.push(c);
            continue;
        }

        let mut saw_newline = c == '\n';
        while let Some(&next) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            saw_newline |= next == '\n';
            chars.next();
        }

        let after_open = matches!(out.chars().last(), Some('(' | '[' | '<'));
        let before_close = matches!(chars.peek(), Some(')' | ']' | '>'));
        if saw_newline && (after_open || before_close) {
            continue;
        }
        out.push(' ');
    }

    out
}

// ============================================================================
// CST Helpers
// ============================================================================

/// 1-based inclusive line span of a node
///
/// A node whose end point sits at column 0 of a later row (the grammar
/// swallowed the trailing newline) ends on the previous line.
pub fn line_range(node: &Node) -> LineRange {
    let start = node.start_position().row;
    let end_point = node.end_position();
    let mut end = end_point.row;
    if end_point.column == 0 && end > start {
        end -= 1;
    }
    LineRange(start + 1, end + 1)
}

/// First direct child whose kind is in `kinds`
pub fn first_child_of_kind<'t>(node: &Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .find(|child| kinds.contains(&child.kind()));
    found
}

/// True if any ancestor of `node` satisfies `pred`
pub fn has_ancestor<F>(node: &Node, mut pred: F) -> bool
where
    F: FnMut(&Node) -> bool,
{
    let mut current = node.parent();
    while let Some(parent) = current {
        if pred(&parent) {
            return true;
        }
        current = parent.parent();
    }
    false
}

/// Visit all nodes in a tree in pre-order (iterative to avoid stack overflow)
pub fn visit_all<'t, F>(node: &Node<'t>, mut visitor: F)
where
    F: FnMut(&Node<'t>),
{
    let mut cursor = node.walk();
    let mut did_visit_children = false;

    loop {
        if !did_visit_children {
            visitor(&cursor.node());

            if cursor.goto_first_child() {
                continue;
            }
        }

        if cursor.goto_next_sibling() {
            did_visit_children = false;
            continue;
        }

        if !cursor.goto_parent() {
            break;
        }
        did_visit_children = true;
    }
}

// ============================================================================
// Comment Scanning
// ============================================================================

/// Comment conventions of one language family
#[derive(Debug, Clone, Copy)]
pub struct CommentSyntax {
    /// Line comment markers, longest first (`///` before `//`)
    pub line_prefixes: &'static [&'static str],
    /// Whether `/* ... */` block comments exist
    pub block: bool,
    /// Strip `<tag>` markup from doc comments
    pub xml_doc: bool,
    /// Lines allowed between a comment and its declaration (attributes, decorators)
    pub attribute_prefixes: &'static [&'static str],
}

pub const SLASH_COMMENTS: CommentSyntax = CommentSyntax {
    line_prefixes: &["///", "//"],
    block: true,
    xml_doc: false,
    attribute_prefixes: &[],
};

static XML_TAG: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"<[^>]+>").ok());

fn line_comment_body<'a>(line: &'a str, syntax: &CommentSyntax) -> Option<&'a str> {
    syntax
        .line_prefixes
        .iter()
        .find_map(|prefix| line.strip_prefix(prefix))
        .map(str::trim)
}

fn strip_block_line(line: &str) -> &str {
    let mut text = line.trim();
    if let Some(rest) = text.strip_suffix("*/") {
        text = rest;
    }
    if let Some(rest) = text.strip_prefix("/**") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("/*") {
        text = rest;
    }
    let text = text.trim();
    text.strip_prefix('*').unwrap_or(text).trim()
}

fn finish_comment(mut parts: Vec<String>, syntax: &CommentSyntax) -> String {
    parts.retain(|p| !p.is_empty());
    let joined = parts.join(" ");
    match XML_TAG.as_ref() {
        Some(tag) if syntax.xml_doc => normalize_whitespace(&tag.replace_all(&joined, " ")),
        _ => normalize_whitespace(&joined),
    }
}

/// Collect a block comment that ends on `end_row`, walking upward
///
/// Returns the stripped lines in document order, or `None` when no
/// well-formed opener is found.
fn block_comment_ending_at(source: &SourceFile, end_row: usize) -> Option<Vec<String>> {
    let mut lines = Vec::new();
    let mut row = end_row;
    loop {
        let line = source.trimmed_line(row);
        lines.push(strip_block_line(line).to_string());
        if line.contains("/*") {
            if !line.starts_with("/*") {
                return None;
            }
            lines.reverse();
            return Some(lines);
        }
        if row == 0 {
            return None;
        }
        row -= 1;
    }
}

/// Nearest unbroken run of comment lines directly above `start_row`
///
/// Walks upward from the line before the declaration. A blank line or a
/// code line ends the run; attribute lines are skipped only while nothing
/// has been collected yet. A block comment is taken whole and ends the
/// search.
pub fn preceding_comment(start_row: usize, source: &SourceFile, syntax: &CommentSyntax) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut row = start_row;

    while row > 0 {
        row -= 1;
        let line = source.trimmed_line(row);
        if line.is_empty() {
            break;
        }

        if parts.is_empty()
            && syntax
                .attribute_prefixes
                .iter()
                .any(|prefix| line.starts_with(prefix))
        {
            continue;
        }

        if syntax.block && line.ends_with("*/") {
            if let Some(block) = block_comment_ending_at(source, row) {
                parts.extend(block.into_iter().rev());
            }
            break;
        }

        match line_comment_body(line, syntax) {
            Some(body) => parts.push(body.to_string()),
            None => break,
        }
    }

    parts.reverse();
    finish_comment(parts, syntax)
}

/// Minimum length for a leading comment to count as a file description
pub const MIN_FILE_DOC_LEN: usize = 10;

/// Source encoding declaration (`# -*- coding: utf-8 -*-`, `# vim: set fileencoding=...`)
static ENCODING_COOKIE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^#.*coding[:=]\s*[-\w.]+").ok());

/// True for a shebang or encoding line in the first two rows of a file
pub fn is_file_prelude(row: usize, line: &str) -> bool {
    if row == 0 && line.starts_with("#!") {
        return true;
    }
    row < 2
        && ENCODING_COOKIE
            .as_ref()
            .is_some_and(|re| re.is_match(line))
}

/// Leading comment of a file, used as its file-level documentation
///
/// Skips blank lines, a shebang and an encoding line, then takes the first
/// comment run. Returns an empty string when the file opens with code or
/// the comment is too short to say anything.
pub fn leading_file_comment(source: &SourceFile, syntax: &CommentSyntax) -> String {
    let mut row = 0;
    while row < source.line_count() {
        let line = source.trimmed_line(row);
        if line.is_empty() || is_file_prelude(row, line) {
            row += 1;
            continue;
        }
        break;
    }

    let mut parts: Vec<String> = Vec::new();
    let first = source.trimmed_line(row);
    if syntax.block && first.starts_with("/*") {
        let mut end = row;
        while end < source.line_count() && !source.trimmed_line(end).contains("*/") {
            end += 1;
        }
        if end < source.line_count() {
            if let Some(block) = block_comment_ending_at(source, end) {
                parts = block;
            }
        }
    } else {
        while row < source.line_count() {
            match line_comment_body(source.trimmed_line(row), syntax) {
                Some(body) => parts.push(body.to_string()),
                None => break,
            }
            row += 1;
        }
    }

    let text = finish_comment(parts, syntax);
    if text.chars().count() > MIN_FILE_DOC_LEN {
        text
    } else {
        String::new()
    }
}

/// Cut a header at its first top-level `:` (kept), ignoring `::` and
/// colons inside brackets or string literals
pub fn header_through_colon(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        match b {
            b'\'' | b'"' => quote = Some(b),
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            b':' if depth <= 0 => {
                if bytes.get(i + 1) == Some(&b':') {
                    i += 2;
                    continue;
                }
                return text.get(..=i);
            }
            _ => {}
        }
        i += 1;
    }
    None
}
