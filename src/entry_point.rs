//! Entry-point package normalizer
//!
//! Moving a package rewrites its `package` clause to the new directory name.
//! An executable must stay `package main`, so every unit of a moved entry
//! point gets its clause rewritten back.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::config::ObfuscatorConfig;
use crate::error::{ObfuscateError, Result};
use crate::extractors::base::SourceUnit;
use crate::extractors::go::GoExtractor;
use crate::language::parse_go;
use crate::utils::file_utils::go_files;

/// Restore the reserved package name in every unit of `dir`
///
/// Returns the number of units rewritten. A unit that no longer parses, or
/// that has no `package` clause, aborts the run.
pub fn restore_entry_package(
    dir: &Path,
    source_root: &Path,
    config: &ObfuscatorConfig,
) -> Result<usize> {
    let mut rewritten = 0;
    for path in go_files(dir)? {
        let unit = SourceUnit::load(&path, source_root)?;
        let tree = parse_go(&path, &unit.content)?;
        let extractor = GoExtractor::new(&unit, config);

        let Some((declared, range)) = extractor.declared_package(&tree) else {
            return Err(ObfuscateError::parse(&path, "missing package clause"));
        };
        if declared == config.entry_package {
            continue;
        }

        let mut content = unit.content;
        content.replace_range(range, &config.entry_package);
        fs::write(&path, content).map_err(|e| ObfuscateError::scan(&path, e))?;
        debug!(
            "Restored package clause '{}' -> '{}' in {}",
            declared,
            config.entry_package,
            path.display()
        );
        rewritten += 1;
    }
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_restores_every_unit() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path();
        let dir = src.join("cmd/tool_obf");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("main.go"),
            "// Command tool\npackage tool_obf\n\nfunc main() {}\n",
        )
        .unwrap();
        fs::write(dir.join("flags.go"), "package tool_obf\n\nvar verbose bool\n").unwrap();
        fs::write(dir.join("util.go"), "package main\n").unwrap();

        let count = restore_entry_package(&dir, src, &ObfuscatorConfig::default()).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            fs::read_to_string(dir.join("main.go")).unwrap(),
            "// Command tool\npackage main\n\nfunc main() {}\n"
        );
        assert_eq!(
            fs::read_to_string(dir.join("flags.go")).unwrap(),
            "package main\n\nvar verbose bool\n"
        );
    }

    #[test]
    fn test_unparsable_unit_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("app");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("main.go"), "package app\nfunc main( {\n").unwrap();

        let err =
            restore_entry_package(&dir, temp_dir.path(), &ObfuscatorConfig::default()).unwrap_err();
        assert!(matches!(err, ObfuscateError::Parse { .. }));
    }

    #[test]
    fn test_missing_clause_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("app");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("empty.go"), "").unwrap();

        let err =
            restore_entry_package(&dir, temp_dir.path(), &ObfuscatorConfig::default()).unwrap_err();
        assert!(err.to_string().contains("missing package clause"));
    }
}
