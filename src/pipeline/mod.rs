//! Obfuscation pipeline
//!
//! Drives the stages in order against a single tree: the depth-ordered package
//! pass, then sentinel neutralization, the capability scan, and three symbol
//! passes. Every engine operation is applied on its own, so each one sees the
//! cumulative effect of everything before it.

mod packages;
mod symbols;

pub use symbols::SymbolPass;

use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::config::ObfuscatorConfig;
use crate::engine::RenameEngine;
use crate::error::Result;
use crate::naming::NameHasher;
use crate::reverse_map::ReverseLookupMap;
use crate::tree::{DefaultExclusionPolicy, ExclusionPolicy, SourceTree};

/// What a best-effort run actually did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub packages_moved: usize,
    /// Excluded packages plus moves the engine rejected
    pub packages_skipped: usize,
    pub symbols_renamed: usize,
    /// Renames the engine rejected
    pub symbols_failed: usize,
    /// Distinct (old, new) pairs dropped as ambiguous
    pub candidates_dropped: usize,
}

/// Sole writer of one source tree for the duration of a run
pub struct Obfuscator<E: RenameEngine> {
    tree: SourceTree,
    config: ObfuscatorConfig,
    hasher: Box<dyn NameHasher>,
    engine: E,
    policy: Box<dyn ExclusionPolicy>,
    reverse_map: ReverseLookupMap,
    summary: RunSummary,
}

impl<E: RenameEngine> Obfuscator<E> {
    pub fn new(
        root: &Path,
        config: ObfuscatorConfig,
        hasher: impl NameHasher + 'static,
        engine: E,
    ) -> Result<Self> {
        config.validate()?;
        let tree = SourceTree::open(root, &config)?;
        let policy = DefaultExclusionPolicy::from_config(&config)?;
        Ok(Self {
            tree,
            config,
            hasher: Box::new(hasher),
            engine,
            policy: Box::new(policy),
            reverse_map: ReverseLookupMap::new(),
            summary: RunSummary::default(),
        })
    }

    /// Replace the default vendored/cgo/assembly exclusion policy
    pub fn with_policy(mut self, policy: impl ExclusionPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Package pass followed by the symbol passes
    pub fn run(&mut self) -> Result<RunSummary> {
        info!("Obfuscating tree at {}", self.tree.root().display());
        self.obfuscate_package_names()?;
        let summary = self.obfuscate_symbols()?;
        info!(
            "Run complete: {} packages moved, {} symbols renamed, {} failed, {} dropped",
            summary.packages_moved,
            summary.symbols_renamed,
            summary.symbols_failed,
            summary.candidates_dropped
        );
        Ok(summary)
    }

    pub fn tree(&self) -> &SourceTree {
        &self.tree
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    pub fn reverse_map(&self) -> &ReverseLookupMap {
        &self.reverse_map
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }
}

#[cfg(test)]
mod tests;
