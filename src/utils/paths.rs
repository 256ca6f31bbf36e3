// Path Conversion Utilities
//
// Package paths are carried as relative Unix-style strings (Go import paths)
// and only turned back into native paths when touching the disk.

use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

use crate::error::{ObfuscateError, Result};

/// Convert an absolute path to a relative Unix-style path under `root`
///
/// Both sides are canonicalized when possible so symlinked temp directories
/// (macOS `/var` vs `/private/var`) still compare equal.
pub fn to_relative_unix_style(absolute: &Path, root: &Path) -> Result<String> {
    let (path_to_use, root_to_use) = match (absolute.canonicalize(), root.canonicalize()) {
        (Ok(canonical_abs), Ok(canonical_root)) => (canonical_abs, canonical_root),
        _ => (absolute.to_path_buf(), root.to_path_buf()),
    };

    let relative = path_to_use
        .strip_prefix(&root_to_use)
        .map_err(|_| ObfuscateError::PathResolution {
            path: absolute.to_path_buf(),
            root: root.to_path_buf(),
        })?;

    let path_str = relative
        .to_str()
        .ok_or_else(|| ObfuscateError::PathResolution {
            path: absolute.to_path_buf(),
            root: root.to_path_buf(),
        })?;

    let unix_style = if MAIN_SEPARATOR == '\\' {
        path_str.replace('\\', "/")
    } else {
        path_str.to_string()
    };

    Ok(unix_style)
}

/// Join a relative Unix-style path onto `root`
pub fn to_absolute_native(relative_unix: &str, root: &Path) -> PathBuf {
    root.join(relative_unix)
}

/// Number of normal components in a relative path (`a/b/c` is 3)
pub fn path_depth(relative: &Path) -> usize {
    relative
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count()
}

/// Replace the final component of `dir` with `new_base`
pub fn with_last_segment(dir: &Path, new_base: &str) -> PathBuf {
    match dir.parent() {
        Some(parent) => parent.join(new_base),
        None => PathBuf::from(new_base),
    }
}
