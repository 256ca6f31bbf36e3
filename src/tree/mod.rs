//! Source tree access
//!
//! The tree is a GOPATH-style root whose `src/` directory holds one directory
//! per package, keyed by import path.

pub mod package;
pub mod policy;
pub mod scanner;

pub use package::Package;
pub use policy::{DefaultExclusionPolicy, ExclusionPolicy, ExclusionReason, PackageProbe};
pub use scanner::{scan_level, LevelScan};

use std::io;
use std::path::{Path, PathBuf};

use crate::config::ObfuscatorConfig;
use crate::error::{ObfuscateError, Result};
use crate::utils::file_utils::{all_directories, go_files};
use crate::utils::paths::{to_absolute_native, to_relative_unix_style};

#[derive(Debug, Clone)]
pub struct SourceTree {
    root: PathBuf,
    source_root: PathBuf,
}

impl SourceTree {
    pub fn open(root: &Path, config: &ObfuscatorConfig) -> Result<Self> {
        let source_root = config.source_root(root);
        if !source_root.is_dir() {
            return Err(ObfuscateError::scan(
                &source_root,
                io::Error::new(io::ErrorKind::NotFound, "source directory does not exist"),
            ));
        }
        Ok(Self {
            root: root.to_path_buf(),
            source_root,
        })
    }

    /// Tree root (the GOPATH)
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the packages
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn import_path(&self, dir: &Path) -> Result<String> {
        to_relative_unix_style(dir, &self.source_root)
    }

    pub fn package_dir(&self, import_path: &str) -> PathBuf {
        to_absolute_native(import_path, &self.source_root)
    }

    /// Whether `import_path` names a package directory in this tree
    pub fn has_package(&self, import_path: &str) -> bool {
        let dir = self.package_dir(import_path);
        dir.is_dir() && go_files(&dir).is_ok_and(|files| !files.is_empty())
    }

    /// Every package in the tree, in sorted directory order
    pub fn packages(
        &self,
        policy: &dyn ExclusionPolicy,
        config: &ObfuscatorConfig,
    ) -> Result<Vec<Package>> {
        let mut packages = Vec::new();
        for dir in all_directories(&self.source_root)? {
            if let Some(package) = Package::load(&dir, self, policy, config)? {
                packages.push(package);
            }
        }
        Ok(packages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_open_requires_source_dir() {
        let temp_dir = TempDir::new().unwrap();
        let err = SourceTree::open(temp_dir.path(), &ObfuscatorConfig::default()).unwrap_err();
        assert!(matches!(err, ObfuscateError::Scan { .. }));
    }

    #[test]
    fn test_packages_skip_directories_without_go_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("src/example.com/app")).unwrap();
        fs::write(
            root.join("src/example.com/app/main.go"),
            "package main\n\nfunc main() {}\n",
        )
        .unwrap();
        fs::create_dir_all(root.join("src/lib")).unwrap();
        fs::write(root.join("src/lib/lib.go"), "package lib\n").unwrap();

        let config = ObfuscatorConfig::default();
        let tree = SourceTree::open(root, &config).unwrap();
        let policy = DefaultExclusionPolicy::from_config(&config).unwrap();
        let packages = tree.packages(&policy, &config).unwrap();

        let paths: Vec<_> = packages.iter().map(|p| p.import_path.as_str()).collect();
        assert_eq!(paths, vec!["example.com/app", "lib"]);
        assert!(packages[0].is_entry_point);
        assert!(!packages[1].is_entry_point);
        assert_eq!(packages[0].depth(), 2);
        assert_eq!(packages[0].base_name(), "app");
        assert!(tree.has_package("lib"));
        assert!(!tree.has_package("example.com"));
    }
}
