//! Package classification

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::policy::{ExclusionPolicy, ExclusionReason, PackageProbe};
use super::SourceTree;
use crate::config::ObfuscatorConfig;
use crate::error::Result;
use crate::extractors::base::{Declaration, DeclarationKind, QualifiedName, SourceUnit};
use crate::extractors::go::GoExtractor;
use crate::language::parse_go_lenient;
use crate::utils::file_utils::go_files;
use crate::utils::paths::path_depth;

/// A directory holding at least one Go compilation unit
#[derive(Debug, Clone, Serialize)]
pub struct Package {
    pub dir: PathBuf,
    /// Directory relative to the source root, `/`-separated
    pub import_path: String,
    /// Compilation units, sorted by file name
    pub units: Vec<PathBuf>,
    /// First unit declares the reserved entry package name
    pub is_entry_point: bool,
    pub exclusion: Option<ExclusionReason>,
}

impl Package {
    /// Classify `dir`; `None` when it holds no Go files
    pub fn load(
        dir: &Path,
        tree: &SourceTree,
        policy: &dyn ExclusionPolicy,
        config: &ObfuscatorConfig,
    ) -> Result<Option<Self>> {
        let units = go_files(dir)?;
        if units.is_empty() {
            return Ok(None);
        }

        let import_path = tree.import_path(dir)?;
        let exclusion = policy.evaluate(&PackageProbe {
            dir,
            import_path: &import_path,
            units: &units,
            source_root: tree.source_root(),
        })?;
        let is_entry_point = declares_entry_package(&units[0], tree.source_root(), config)?;

        debug!(
            "Package '{}': {} units, entry point: {}, excluded: {}",
            import_path,
            units.len(),
            is_entry_point,
            exclusion.is_some()
        );

        Ok(Some(Self {
            dir: dir.to_path_buf(),
            import_path,
            units,
            is_entry_point,
            exclusion,
        }))
    }

    pub fn is_excluded(&self) -> bool {
        self.exclusion.is_some()
    }

    /// Last segment of the import path, the part a package move renames
    pub fn base_name(&self) -> &str {
        self.import_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.import_path)
    }

    pub fn depth(&self) -> usize {
        path_depth(Path::new(&self.import_path))
    }

    /// The package itself as a declaration: parent path plus directory name
    pub fn declaration(&self) -> Declaration {
        let parent = match self.import_path.rsplit_once('/') {
            Some((parent, _)) => parent,
            None => "",
        };
        Declaration {
            kind: DeclarationKind::Package,
            name: QualifiedName::top_level(parent, self.base_name()),
            file_path: self.import_path.clone(),
            line: 0,
        }
    }
}

/// Whether the unit's `package` clause names the reserved entry package
///
/// A unit whose clause cannot be found is simply not an entry point.
fn declares_entry_package(
    unit_path: &Path,
    source_root: &Path,
    config: &ObfuscatorConfig,
) -> Result<bool> {
    let unit = SourceUnit::load(unit_path, source_root)?;
    let tree = parse_go_lenient(unit_path, &unit.content)?;
    let extractor = GoExtractor::new(&unit, config);
    Ok(extractor
        .declared_package(&tree)
        .is_some_and(|(name, _)| name == config.entry_package))
}
