//! Symbol passes
//!
//! Each pass re-reads the tree, extracts its declarations from every unit of
//! every non-excluded package in parallel, resolves ambiguity, then applies
//! the survivors one at a time.

use rayon::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::{Obfuscator, RunSummary};
use crate::analysis::{CapabilityAnalyzer, ExclusionSet};
use crate::config::ObfuscatorConfig;
use crate::engine::RenameEngine;
use crate::error::{ObfuscateError, Result};
use crate::extractors::base::{Declaration, RenameCandidate, SourceUnit};
use crate::extractors::go::GoExtractor;
use crate::language::parse_go;
use crate::resolver::resolve;
use crate::sentinel::SentinelNeutralizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPass {
    /// Functions, types, struct fields, vars and consts
    TopLevel,
    /// Methods outside the exclusion set, plus body locals
    MethodsAndLocals,
    /// Parameters of top-level functions
    Parameters,
}

impl SymbolPass {
    pub const ALL: [SymbolPass; 3] = [
        SymbolPass::TopLevel,
        SymbolPass::MethodsAndLocals,
        SymbolPass::Parameters,
    ];
}

impl fmt::Display for SymbolPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SymbolPass::TopLevel => "top-level",
            SymbolPass::MethodsAndLocals => "methods and locals",
            SymbolPass::Parameters => "parameters",
        };
        write!(f, "{}", label)
    }
}

impl<E: RenameEngine> Obfuscator<E> {
    /// Neutralize sentinels, run the three symbol passes, persist the reverse map
    pub fn obfuscate_symbols(&mut self) -> Result<RunSummary> {
        let packages = self.tree.packages(self.policy.as_ref(), &self.config)?;
        SentinelNeutralizer::new(self.config.sentinel_marker.as_str())
            .neutralize_packages(&packages)?;

        let exclusions = CapabilityAnalyzer::new(&self.tree, &self.config).analyze()?;
        debug!("Excluded method names: {:?}", exclusions.iter().collect::<Vec<_>>());

        for pass in SymbolPass::ALL {
            self.run_pass(pass, &exclusions)?;
        }

        let map_path = self.tree.root().join(&self.config.reverse_map_file);
        self.reverse_map.persist(&map_path);
        Ok(self.summary.clone())
    }

    /// Extract, resolve and apply one pass against the tree as it is now
    pub fn run_pass(&mut self, pass: SymbolPass, exclusions: &ExclusionSet) -> Result<()> {
        let units: Vec<PathBuf> = self
            .tree
            .packages(self.policy.as_ref(), &self.config)?
            .into_iter()
            .filter(|package| !package.is_excluded())
            .flat_map(|package| package.units)
            .collect();

        let source_root = self.tree.source_root();
        let config = &self.config;
        let declarations = units
            .par_iter()
            .map(|path| extract_unit(path, source_root, config, pass, exclusions))
            .collect::<Result<Vec<_>>>()?;

        let hasher = self.hasher.as_ref();
        let candidates = declarations.into_iter().flatten().map(|declaration| {
            let new_name = hasher.hash(&declaration.name.name);
            RenameCandidate::new(declaration.name, new_name)
        });
        let resolution = resolve(candidates);
        self.summary.candidates_dropped += resolution.dropped.len();

        info!(
            "Pass '{}': {} units, {} candidates, {} dropped as ambiguous",
            pass,
            units.len(),
            resolution.accepted.len(),
            resolution.dropped.len()
        );

        for candidate in resolution.accepted {
            self.apply_symbol(candidate);
        }
        Ok(())
    }

    fn apply_symbol(&mut self, candidate: RenameCandidate) {
        match self.engine.rename_symbol(&candidate.old, &candidate.new_name) {
            Ok(()) => {
                debug!("Renamed {} -> {}", candidate.old, candidate.new_name);
                self.reverse_map
                    .record(candidate.new_name, candidate.old.name);
                self.summary.symbols_renamed += 1;
            }
            Err(e) => {
                warn!("Skipping {}: {}", candidate.old, ObfuscateError::from(e));
                self.summary.symbols_failed += 1;
            }
        }
    }
}

fn extract_unit(
    path: &Path,
    source_root: &Path,
    config: &ObfuscatorConfig,
    pass: SymbolPass,
    exclusions: &ExclusionSet,
) -> Result<Vec<Declaration>> {
    let unit = SourceUnit::load(path, source_root)?;
    let tree = parse_go(path, &unit.content)?;
    let mut extractor = GoExtractor::new(&unit, config);
    Ok(match pass {
        SymbolPass::TopLevel => extractor.extract_top_level(&tree),
        SymbolPass::MethodsAndLocals => extractor.extract_methods_and_locals(&tree, exclusions),
        SymbolPass::Parameters => extractor.extract_parameters(&tree),
    })
}
