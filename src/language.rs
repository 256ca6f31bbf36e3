//! Language Support - shared tree-sitter Go configuration
//!
//! ALL tree-sitter parser setup goes through here so every stage (extraction,
//! capability scan, sentinel rewriting, entry-point restore) parses identically.

use once_cell::sync::Lazy;
use std::path::Path;
use tree_sitter::{Language, Parser, Tree};

use crate::error::{ObfuscateError, Result};

static GO_LANGUAGE: Lazy<Language> = Lazy::new(|| tree_sitter_go::LANGUAGE.into());

/// Extension of Go compilation units
pub const GO_EXTENSION: &str = "go";

pub fn go_language() -> &'static Language {
    &GO_LANGUAGE
}

/// Check whether a path names a Go compilation unit
pub fn is_go_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(GO_EXTENSION)
}

/// Parse Go source, tolerating ERROR nodes in the result
pub fn parse_go_lenient(path: &Path, content: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser.set_language(go_language()).map_err(|e| {
        ObfuscateError::parse(path, format!("Failed to set Go parser language: {}", e))
    })?;

    parser
        .parse(content, None)
        .ok_or_else(|| ObfuscateError::parse(path, "parser produced no tree"))
}

/// Parse Go source, rejecting any tree with syntax errors
pub fn parse_go(path: &Path, content: &str) -> Result<Tree> {
    let tree = parse_go_lenient(path, content)?;
    let root = tree.root_node();
    if root.has_error() {
        let location = first_error_position(root)
            .map(|(row, column)| format!(" near line {}, column {}", row + 1, column + 1))
            .unwrap_or_default();
        return Err(ObfuscateError::parse(
            path,
            format!("syntax error{}", location),
        ));
    }
    Ok(tree)
}

fn first_error_position(node: tree_sitter::Node) -> Option<(usize, usize)> {
    if node.is_error() || node.is_missing() {
        let point = node.start_position();
        return Some((point.row, point.column));
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() {
            if let Some(position) = first_error_position(child) {
                return Some(position);
            }
        }
    }
    None
}
