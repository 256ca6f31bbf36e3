//! Engine backed by the `gomvpkg` and `gorename` tools
//!
//! Both tools resolve packages through GOPATH, so they run with the tree root
//! as GOPATH and module mode switched off.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

use super::{RenameEngine, RenameError};
use crate::extractors::base::QualifiedName;

static AMBIGUOUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)ambiguous|multiple (objects|declarations|packages)").expect("valid regex")
});

static NOT_FOUND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)not found|can(not|'t) find|couldn't find|no (member|object|package|such)")
        .expect("valid regex")
});

static PATH_CONFLICT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)already exists|destination .* exists|is not a directory")
        .expect("valid regex")
});

pub struct GoToolsEngine {
    gopath: PathBuf,
    gomvpkg: PathBuf,
    gorename: PathBuf,
}

impl GoToolsEngine {
    /// Engine over the tree at `root`, finding both tools on PATH
    pub fn new(root: &Path) -> Self {
        Self {
            gopath: root.to_path_buf(),
            gomvpkg: PathBuf::from("gomvpkg"),
            gorename: PathBuf::from("gorename"),
        }
    }

    pub fn with_tools(mut self, gomvpkg: impl Into<PathBuf>, gorename: impl Into<PathBuf>) -> Self {
        self.gomvpkg = gomvpkg.into();
        self.gorename = gorename.into();
        self
    }

    /// Run one tool; on failure returns its diagnostics
    fn run(&self, tool: &Path, from: &str, to: &str) -> Result<Result<(), String>, RenameError> {
        debug!("{} -from {} -to {}", tool.display(), from, to);
        let output = Command::new(tool)
            .args(["-from", from, "-to", to])
            .env("GOPATH", &self.gopath)
            .env("GO111MODULE", "off")
            .current_dir(&self.gopath)
            .output()
            .map_err(|e| RenameError::Unavailable {
                tool: tool.display().to_string(),
                detail: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(Ok(()));
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let detail = if stderr.is_empty() {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        } else {
            stderr
        };
        Ok(Err(detail))
    }
}

/// Map tool diagnostics onto a rejection kind
///
/// `move_target` is the destination import path when the operation was a move.
pub fn classify(query: &str, detail: &str, move_target: Option<&str>) -> RenameError {
    let query = query.to_string();
    let detail = detail.to_string();
    if AMBIGUOUS.is_match(&detail) {
        RenameError::Ambiguous { query, detail }
    } else if let Some(target) = move_target.filter(|_| PATH_CONFLICT.is_match(&detail)) {
        RenameError::PathConflict {
            target: target.to_string(),
            detail,
        }
    } else if NOT_FOUND.is_match(&detail) {
        RenameError::NotFound { query, detail }
    } else {
        RenameError::BuildError { query, detail }
    }
}

impl RenameEngine for GoToolsEngine {
    fn move_package(&mut self, old: &str, new: &str) -> Result<(), RenameError> {
        self.run(&self.gomvpkg, old, new)?
            .map_err(|detail| classify(old, &detail, Some(new)))
    }

    fn rename_symbol(&mut self, old: &QualifiedName, new_name: &str) -> Result<(), RenameError> {
        let query = old.to_string();
        self.run(&self.gorename, &query, new_name)?
            .map_err(|detail| classify(&query, &detail, None))
    }
}
