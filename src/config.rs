//! Pipeline configuration
//!
//! Every field has a default matching a stock Go toolchain layout, so an
//! empty JSON object (or no file at all) is a valid configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::ObfuscateError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObfuscatorConfig {
    /// Sub-directory of the tree root that holds packages (GOPATH layout)
    pub source_dir: String,
    /// Declared package name that makes a package an executable entry point
    pub entry_package: String,
    /// Program entry function, never renamed
    pub entry_function: String,
    /// Package initializer function, never renamed
    pub initializer_function: String,
    /// Comment marker that makes generated files read-only to the engine
    pub sentinel_marker: String,
    /// Reverse lookup file name, written under the tree root
    pub reverse_map_file: String,
    /// Import path of the foreign-code bridge (cgo)
    pub foreign_bridge_import: String,
    /// File extensions (without dot) of hand-written low-level sources
    pub low_level_extensions: Vec<String>,
    /// Glob patterns; a package with any path segment matching one is vendored
    pub vendored_segments: Vec<String>,
    /// Go distribution root whose `src/` packages join the capability scan
    pub goroot: Option<PathBuf>,
}

impl Default for ObfuscatorConfig {
    fn default() -> Self {
        Self {
            source_dir: "src".to_string(),
            entry_package: "main".to_string(),
            entry_function: "main".to_string(),
            initializer_function: "init".to_string(),
            sentinel_marker: "DO NOT EDIT".to_string(),
            reverse_map_file: "map.json".to_string(),
            foreign_bridge_import: "C".to_string(),
            low_level_extensions: vec!["s".to_string()],
            vendored_segments: vec!["github.com".to_string(), "vendor".to_string()],
            goroot: None,
        }
    }
}

impl ObfuscatorConfig {
    /// Load a JSON configuration file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config '{}'", path.display()))?;
        config.validate()?;
        debug!("Loaded obfuscator config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), ObfuscateError> {
        let required = [
            ("source_dir", &self.source_dir),
            ("entry_package", &self.entry_package),
            ("entry_function", &self.entry_function),
            ("initializer_function", &self.initializer_function),
            ("sentinel_marker", &self.sentinel_marker),
            ("reverse_map_file", &self.reverse_map_file),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ObfuscateError::Config(format!("{} must not be empty", name)));
            }
        }
        for pattern in &self.vendored_segments {
            glob::Pattern::new(pattern).map_err(|e| {
                ObfuscateError::Config(format!("bad vendored pattern '{}': {}", pattern, e))
            })?;
        }
        Ok(())
    }

    /// Names that must never appear as the old name of a candidate
    pub fn is_reserved_function(&self, name: &str) -> bool {
        name == self.entry_function || name == self.initializer_function
    }

    pub fn source_root(&self, tree_root: &Path) -> PathBuf {
        tree_root.join(&self.source_dir)
    }
}
