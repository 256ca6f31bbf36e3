//! Reverse lookup map (obfuscated name -> original name)

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{ObfuscateError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReverseLookupMap {
    entries: BTreeMap<String, String>,
}

impl ReverseLookupMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an applied rename; a later entry for the same new name wins
    pub fn record(&mut self, new_name: impl Into<String>, old_name: impl Into<String>) {
        self.entries.insert(new_name.into(), old_name.into());
    }

    pub fn get(&self, new_name: &str) -> Option<&str> {
        self.entries.get(new_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }

    /// Write the map as a flat JSON object, world-writable
    pub fn try_persist(&self, path: &Path) -> Result<()> {
        let persist_error = |reason: String| ObfuscateError::Persist {
            path: path.to_path_buf(),
            reason,
        };
        let json = self.to_json().map_err(|e| persist_error(e.to_string()))?;
        fs::write(path, json).map_err(|e| persist_error(e.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o777))
                .map_err(|e| persist_error(e.to_string()))?;
        }

        info!("Wrote {} reverse map entries to {}", self.len(), path.display());
        Ok(())
    }

    /// Like `try_persist`, but a failure only produces a warning
    pub fn persist(&self, path: &Path) -> bool {
        match self.try_persist(path) {
            Ok(()) => true,
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_persist_writes_flat_object() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("map.json");

        let mut map = ReverseLookupMap::new();
        map.record("Foo_obf", "Foo");
        map.record("S_obf", "S");
        assert!(map.persist(&path));

        let written: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written["Foo_obf"], "Foo");
        assert_eq!(map.get("S_obf"), Some("S"));
    }

    #[cfg(unix)]
    #[test]
    fn test_persist_is_world_writable() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("map.json");
        ReverseLookupMap::new().persist(&path);

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o777);
    }

    #[test]
    fn test_persist_failure_is_swallowed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing/dir/map.json");

        let mut map = ReverseLookupMap::new();
        map.record("a", "b");

        assert!(!map.persist(&path));
        assert!(matches!(
            map.try_persist(&path),
            Err(ObfuscateError::Persist { .. })
        ));
    }
}
