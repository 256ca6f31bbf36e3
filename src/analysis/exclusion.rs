//! Capability exclusion analysis
//!
//! Any concrete type satisfies a Go interface implicitly, by method name and
//! signature alone. Renaming a method that shares its name with an interface
//! method anywhere in the dependency graph could silently break dispatch, so
//! every such name is collected up front and never renamed.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::graph::ImportGraph;
use crate::config::ObfuscatorConfig;
use crate::error::Result;
use crate::extractors::base::SourceUnit;
use crate::extractors::go::GoExtractor;
use crate::language::{parse_go, parse_go_lenient};
use crate::tree::SourceTree;
use crate::utils::file_utils::{all_directories, go_files};

/// Method name of the predeclared `error` interface, which no source declares
const BUILTIN_ERROR_METHOD: &str = "Error";

/// Identifier names that must never be the old name of a method rename
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Where a package's sources were found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Tree,
    Goroot,
}

/// Import graph plus the interface methods each visited package declares
#[derive(Debug, Default)]
pub struct CapabilityScan {
    pub graph: ImportGraph,
    pub interface_methods: BTreeMap<String, BTreeSet<String>>,
}

impl CapabilityScan {
    /// Union of interface methods over every package connected to `seeds`
    pub fn exclusions_for<'a, I>(&'a self, seeds: I) -> ExclusionSet
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = ExclusionSet::new();
        set.insert(BUILTIN_ERROR_METHOD);
        for package in self.graph.connected_to(seeds) {
            if let Some(methods) = self.interface_methods.get(package) {
                for method in methods {
                    set.insert(method.clone());
                }
            }
        }
        set
    }
}

pub struct CapabilityAnalyzer<'a> {
    tree: &'a SourceTree,
    config: &'a ObfuscatorConfig,
}

impl<'a> CapabilityAnalyzer<'a> {
    pub fn new(tree: &'a SourceTree, config: &'a ObfuscatorConfig) -> Self {
        Self { tree, config }
    }

    /// Compute the exclusion set for the whole tree
    pub fn analyze(&self) -> Result<ExclusionSet> {
        let scan = self.scan()?;
        let seeds = self.tree_packages()?;
        let set = scan.exclusions_for(seeds.iter().map(String::as_str));
        info!(
            "Capability scan: {} packages, {} imports, {} excluded method names",
            scan.graph.node_count(),
            scan.graph.edge_count(),
            set.len()
        );
        Ok(set)
    }

    /// Walk every tree package and, transitively, everything it imports
    pub fn scan(&self) -> Result<CapabilityScan> {
        let mut scan = CapabilityScan::default();
        let mut visited: BTreeSet<String> = BTreeSet::new();
        let mut queue: VecDeque<String> = self.tree_packages()?.into_iter().collect();

        while let Some(import_path) = queue.pop_front() {
            if !visited.insert(import_path.clone()) {
                continue;
            }
            scan.graph.add_package(import_path.as_str());

            let Some((dir, origin)) = self.resolve(&import_path)? else {
                debug!("Import '{}' not found in tree or goroot, skipping", import_path);
                continue;
            };

            let (methods, imports) = self.scan_package(&dir, origin)?;
            for import in imports {
                scan.graph.add_edge(import_path.as_str(), import.as_str());
                if !visited.contains(&import) {
                    queue.push_back(import);
                }
            }
            if !methods.is_empty() {
                debug!(
                    "Package '{}' declares interface methods: {:?}",
                    import_path, methods
                );
                scan.interface_methods.insert(import_path, methods);
            }
        }

        Ok(scan)
    }

    /// Import paths of every package directory in the tree, excluded ones included
    fn tree_packages(&self) -> Result<Vec<String>> {
        let mut packages = Vec::new();
        for dir in all_directories(self.tree.source_root())? {
            if !go_files(&dir)?.is_empty() {
                packages.push(self.tree.import_path(&dir)?);
            }
        }
        Ok(packages)
    }

    fn resolve(&self, import_path: &str) -> Result<Option<(PathBuf, Origin)>> {
        if self.tree.has_package(import_path) {
            return Ok(Some((self.tree.package_dir(import_path), Origin::Tree)));
        }
        if let Some(goroot) = &self.config.goroot {
            let dir = goroot.join("src").join(import_path);
            if dir.is_dir() && !go_files(&dir)?.is_empty() {
                return Ok(Some((dir, Origin::Goroot)));
            }
        }
        Ok(None)
    }

    fn source_root_for(&self, origin: Origin) -> PathBuf {
        match (origin, &self.config.goroot) {
            (Origin::Goroot, Some(goroot)) => goroot.join("src"),
            _ => self.tree.source_root().to_path_buf(),
        }
    }

    fn scan_package(
        &self,
        dir: &Path,
        origin: Origin,
    ) -> Result<(BTreeSet<String>, BTreeSet<String>)> {
        let source_root = self.source_root_for(origin);
        let mut methods = BTreeSet::new();
        let mut imports = BTreeSet::new();

        for path in go_files(dir)? {
            let unit = SourceUnit::load(&path, &source_root)?;
            let tree = match origin {
                Origin::Tree => parse_go(&path, &unit.content)?,
                Origin::Goroot => {
                    let tree = parse_go_lenient(&path, &unit.content)?;
                    if tree.root_node().has_error() {
                        warn!("Skipping unparsable goroot unit {}", path.display());
                        continue;
                    }
                    tree
                }
            };

            let extractor = GoExtractor::new(&unit, self.config);
            methods.extend(extractor.extract_interface_methods(&tree));
            imports.extend(
                extractor
                    .extract_imports(&tree)
                    .into_iter()
                    .map(|import| import.path)
                    .filter(|path| *path != self.config.foreign_bridge_import),
            );
        }

        Ok((methods, imports))
    }
}
