//! Permanent exclusion policy
//!
//! Decides, once per package, whether the package is off limits for both the
//! package pass and the symbol passes. The pipeline only ever asks the policy
//! trait, so widening or narrowing what is excluded never touches call sites.

use glob::Pattern;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::ObfuscatorConfig;
use crate::error::{ObfuscateError, Result};
use crate::extractors::base::SourceUnit;
use crate::extractors::go::GoExtractor;
use crate::language::parse_go_lenient;
use crate::utils::file_utils::files_matching;

/// Why a package is excluded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ExclusionReason {
    /// A unit imports the foreign-code bridge (cgo)
    ForeignBridge { file: PathBuf },
    /// The directory holds hand-written low-level sources (assembly)
    LowLevelSource { file: PathBuf },
    /// The package lies in a vendored or external dependency subtree
    Vendored { segment: String },
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExclusionReason::ForeignBridge { file } => {
                write!(f, "foreign-code bridge in {}", file.display())
            }
            ExclusionReason::LowLevelSource { file } => {
                write!(f, "low-level source {}", file.display())
            }
            ExclusionReason::Vendored { segment } => write!(f, "vendored segment '{}'", segment),
        }
    }
}

/// What the policy gets to look at for one package
pub struct PackageProbe<'a> {
    pub dir: &'a Path,
    pub import_path: &'a str,
    pub units: &'a [PathBuf],
    pub source_root: &'a Path,
}

pub trait ExclusionPolicy: Send + Sync {
    fn evaluate(&self, probe: &PackageProbe<'_>) -> Result<Option<ExclusionReason>>;
}

/// Vendored segments, low-level extensions, and the cgo bridge import
pub struct DefaultExclusionPolicy {
    config: ObfuscatorConfig,
    vendored: Vec<Pattern>,
}

impl DefaultExclusionPolicy {
    pub fn from_config(config: &ObfuscatorConfig) -> Result<Self> {
        let vendored = config
            .vendored_segments
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    ObfuscateError::Config(format!("bad vendored pattern '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            config: config.clone(),
            vendored,
        })
    }

    fn vendored_segment(&self, import_path: &str) -> Option<String> {
        import_path
            .split('/')
            .find(|segment| self.vendored.iter().any(|p| p.matches(segment)))
            .map(str::to_string)
    }

    fn low_level_file(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let extensions = &self.config.low_level_extensions;
        let files = files_matching(dir, |path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
        })?;
        Ok(files.into_iter().next())
    }

    fn foreign_bridge_file(&self, probe: &PackageProbe<'_>) -> Result<Option<PathBuf>> {
        for path in probe.units {
            let unit = SourceUnit::load(path, probe.source_root)?;
            // Only the import block matters here; tolerate syntax errors elsewhere
            let tree = parse_go_lenient(path, &unit.content)?;
            let extractor = GoExtractor::new(&unit, &self.config);
            if extractor
                .extract_imports(&tree)
                .iter()
                .any(|import| import.path == self.config.foreign_bridge_import)
            {
                return Ok(Some(path.clone()));
            }
        }
        Ok(None)
    }
}

impl ExclusionPolicy for DefaultExclusionPolicy {
    fn evaluate(&self, probe: &PackageProbe<'_>) -> Result<Option<ExclusionReason>> {
        // Cheapest checks first; the bridge check parses every unit
        let reason = if let Some(segment) = self.vendored_segment(probe.import_path) {
            Some(ExclusionReason::Vendored { segment })
        } else if let Some(file) = self.low_level_file(probe.dir)? {
            Some(ExclusionReason::LowLevelSource { file })
        } else {
            self.foreign_bridge_file(probe)?
                .map(|file| ExclusionReason::ForeignBridge { file })
        };

        if let Some(reason) = &reason {
            debug!("Excluding package '{}': {}", probe.import_path, reason);
        }
        Ok(reason)
    }
}
