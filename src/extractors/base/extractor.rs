// BaseExtractor implementation
//
// Holds one compilation unit's text and the package it belongs to, and owns
// the node-text and declaration-construction helpers every pass shares.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tree_sitter::Node;

use super::types::{Declaration, DeclarationKind, QualifiedName};
use crate::error::{ObfuscateError, Result};

/// A compilation unit read from disk
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Import path of the enclosing package
    pub package: String,
    /// File path relative to the source root, `/`-separated
    pub relative_path: String,
    pub content: String,
}

impl SourceUnit {
    pub fn load(path: &Path, source_root: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ObfuscateError::scan(path, e))?;
        let relative_path = crate::utils::paths::to_relative_unix_style(path, source_root)?;
        let package = match relative_path.rsplit_once('/') {
            Some((dir, _file)) => dir.to_string(),
            None => String::new(),
        };
        Ok(Self {
            path: path.to_path_buf(),
            package,
            relative_path,
            content,
        })
    }
}

/// Base implementation shared by the Go extractor passes
pub struct BaseExtractor {
    pub package: String,
    pub file_path: String,
    pub content: String,
    pub declarations: Vec<Declaration>,
}

impl BaseExtractor {
    pub fn new(package: String, file_path: String, content: String) -> Self {
        debug!("BaseExtractor: '{}' in package '{}'", file_path, package);
        Self {
            package,
            file_path,
            content,
            declarations: Vec::new(),
        }
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    /// Record a declaration anchored at `node`
    pub fn create_declaration(&mut self, node: &Node, kind: DeclarationKind, name: QualifiedName) {
        self.declarations.push(Declaration {
            kind,
            name,
            file_path: self.file_path.clone(),
            line: node.start_position().row as u32 + 1,
        });
    }

    pub fn take_declarations(&mut self) -> Vec<Declaration> {
        std::mem::take(&mut self.declarations)
    }
}
