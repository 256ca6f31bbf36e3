// Utilities Module
//
// Directory listing and path helpers used by the scanner and the passes.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::error::{ObfuscateError, Result};
use crate::language::is_go_file;

pub mod paths;

/// File utilities
pub mod file_utils {
    use super::*;

    /// Walker over `root` in file-name order that never enters hidden directories
    ///
    /// The root itself is always walked, even when its own name is hidden.
    pub fn visible_walk(root: &Path) -> impl Iterator<Item = walkdir::Result<DirEntry>> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.path()))
    }

    /// Go compilation units directly inside `dir`, sorted by name
    pub fn go_files(dir: &Path) -> Result<Vec<PathBuf>> {
        files_matching(dir, is_go_file)
    }

    /// Regular files directly inside `dir` accepted by `predicate`
    pub fn files_matching(dir: &Path, predicate: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| ObfuscateError::walk(dir, e))?;
            if entry.file_type().is_file() && predicate(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// Every directory under `root` (excluding `root`), sorted
    pub fn all_directories(root: &Path) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        for entry in visible_walk(root) {
            let entry = entry.map_err(|e| ObfuscateError::walk(root, e))?;
            if entry.depth() > 0 && entry.file_type().is_dir() {
                dirs.push(entry.into_path());
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    pub fn is_hidden(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.'))
    }
}

#[cfg(test)]
mod tests {
    use super::file_utils::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_go_files_sorted_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("b.go"), "package p").unwrap();
        fs::write(dir.join("a.go"), "package p").unwrap();
        fs::write(dir.join("asm_amd64.s"), "TEXT ·f(SB)").unwrap();
        fs::create_dir(dir.join("sub.go")).unwrap();
        fs::create_dir(dir.join("nested")).unwrap();
        fs::write(dir.join("nested/c.go"), "package nested").unwrap();

        let files = go_files(dir).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.go", "b.go"]);
    }

    #[test]
    fn test_all_directories_skips_hidden() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::create_dir_all(root.join("c")).unwrap();
        fs::write(root.join("c/file.go"), "package c").unwrap();

        let dirs = all_directories(root).unwrap();
        assert_eq!(dirs, vec![root.join("a"), root.join("a/b"), root.join("c")]);
    }

    #[test]
    fn test_hidden_root_is_still_walked() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join(".work");
        fs::create_dir_all(root.join("pkg")).unwrap();

        assert_eq!(all_directories(&root).unwrap(), vec![root.join("pkg")]);
    }

    #[test]
    fn test_missing_directory_is_scan_error() {
        let err = go_files(std::path::Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, crate::error::ObfuscateError::Scan { .. }));
    }
}
