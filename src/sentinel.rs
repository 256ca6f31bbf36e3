//! Sentinel comment neutralizer
//!
//! Generated Go files carry a `// Code generated ... DO NOT EDIT.` header and
//! the rename tools refuse to touch them. The marker is overwritten in place
//! with a run of `X` of the same byte length, so offsets and line numbers of
//! everything else in the file stay put.

use std::fs;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info};
use tree_sitter::Node;

use crate::error::{ObfuscateError, Result};
use crate::extractors::go::GoNode;
use crate::language::parse_go_lenient;
use crate::tree::Package;

pub struct SentinelNeutralizer {
    marker: String,
    placeholder: String,
}

impl SentinelNeutralizer {
    pub fn new(marker: impl Into<String>) -> Self {
        let marker = marker.into();
        let placeholder = "X".repeat(marker.len());
        Self {
            marker,
            placeholder,
        }
    }

    /// Rewritten source, or `None` when no comment holds the marker
    ///
    /// Occurrences outside comments (string literals, identifiers) are left alone.
    pub fn neutralize_source(&self, path: &Path, content: &str) -> Result<Option<String>> {
        if self.marker.is_empty() || !content.contains(&self.marker) {
            return Ok(None);
        }

        let tree = parse_go_lenient(path, content)?;
        let mut comments = Vec::new();
        collect_comments(tree.root_node(), &mut comments);

        let mut bytes = content.as_bytes().to_vec();
        let mut replaced = 0;
        for range in comments {
            let text = &content[range.clone()];
            for (offset, _) in text.match_indices(&self.marker) {
                let start = range.start + offset;
                bytes[start..start + self.marker.len()]
                    .copy_from_slice(self.placeholder.as_bytes());
                replaced += 1;
            }
        }

        if replaced == 0 {
            return Ok(None);
        }
        debug!("Neutralized {} sentinel markers in {}", replaced, path.display());
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| ObfuscateError::parse(path, format!("invalid UTF-8 after rewrite: {}", e)))
    }

    /// Rewrite one unit on disk; returns whether it changed
    pub fn neutralize_file(&self, path: &Path) -> Result<bool> {
        let content = fs::read_to_string(path).map_err(|e| ObfuscateError::scan(path, e))?;
        match self.neutralize_source(path, &content)? {
            Some(rewritten) => {
                fs::write(path, rewritten).map_err(|e| ObfuscateError::scan(path, e))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Rewrite every unit of every package; returns the number of files changed
    pub fn neutralize_packages(&self, packages: &[Package]) -> Result<usize> {
        let mut changed = 0;
        for package in packages {
            for unit in &package.units {
                if self.neutralize_file(unit)? {
                    changed += 1;
                }
            }
        }
        info!("Neutralized sentinel markers in {} files", changed);
        Ok(changed)
    }
}

fn collect_comments(node: Node, ranges: &mut Vec<Range<usize>>) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match GoNode::of(&child) {
            GoNode::Comment => ranges.push(child.start_byte()..child.end_byte()),
            _ => collect_comments(child, ranges),
        }
    }
}
