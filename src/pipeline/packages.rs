//! Depth-ordered package pass
//!
//! Directories are handled one depth at a time, shallowest first. Every move at
//! depth d lands before depth d+1 is enumerated, so deeper paths are always
//! computed under the already-renamed ancestors.

use std::path::Path;
use tracing::{debug, info, warn};

use super::{Obfuscator, RunSummary};
use crate::engine::RenameEngine;
use crate::entry_point::restore_entry_package;
use crate::error::{ObfuscateError, Result};
use crate::tree::{scan_level, Package};
use crate::utils::paths::with_last_segment;

impl<E: RenameEngine> Obfuscator<E> {
    /// Move every non-excluded package to a hashed directory name
    pub fn obfuscate_package_names(&mut self) -> Result<RunSummary> {
        let source_root = self.tree.source_root().to_path_buf();
        let mut depth = 1;

        loop {
            let mut found = 0;
            // Dropping the scan on `?` cancels the producer
            for dir in scan_level(&source_root, depth)? {
                let dir = dir?;
                found += 1;
                self.move_package(&dir)?;
            }
            if found == 0 {
                break;
            }
            debug!("Package pass: {} directories at depth {}", found, depth);
            depth += 1;
        }

        info!(
            "Package pass done: {} moved, {} skipped",
            self.summary.packages_moved, self.summary.packages_skipped
        );
        Ok(self.summary.clone())
    }

    fn move_package(&mut self, dir: &Path) -> Result<()> {
        let Some(package) = Package::load(dir, &self.tree, self.policy.as_ref(), &self.config)?
        else {
            return Ok(());
        };
        if let Some(reason) = &package.exclusion {
            info!("Leaving package '{}' in place: {}", package.import_path, reason);
            self.summary.packages_skipped += 1;
            return Ok(());
        }

        // Qualified as (parent path, directory name)
        let declaration = package.declaration();
        let new_base = self.hasher.hash(&declaration.name.name);
        if new_base == declaration.name.name {
            return Ok(());
        }
        let new_import_path = match declaration.name.package.as_str() {
            "" => new_base.clone(),
            parent => format!("{}/{}", parent, new_base),
        };

        if let Err(e) = self
            .engine
            .move_package(&package.import_path, &new_import_path)
        {
            warn!("{}", ObfuscateError::from(e));
            self.summary.packages_skipped += 1;
            return Ok(());
        }
        info!("Moved package '{}' -> '{}'", package.import_path, new_import_path);
        self.summary.packages_moved += 1;

        if package.is_entry_point {
            let new_dir = with_last_segment(dir, &new_base);
            if new_dir.is_dir() {
                restore_entry_package(&new_dir, self.tree.source_root(), &self.config)?;
            } else {
                debug!(
                    "Moved entry point '{}' has no directory on disk, nothing to restore",
                    new_import_path
                );
            }
        }
        Ok(())
    }
}
