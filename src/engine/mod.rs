//! Rename engines
//!
//! An engine performs one semantics-preserving, tree-wide operation at a
//! time: moving a package (directory plus every import of it) or renaming a
//! single symbol. The pipeline never runs two operations concurrently.

pub mod dry_run;
pub mod go_tools;

pub use dry_run::{DryRunEngine, EngineOperation};
pub use go_tools::GoToolsEngine;

use thiserror::Error;

use crate::extractors::base::QualifiedName;

/// Rejection of a single engine operation; the pipeline skips and continues
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenameError {
    #[error("'{query}' not found: {detail}")]
    NotFound { query: String, detail: String },

    #[error("'{query}' is ambiguous: {detail}")]
    Ambiguous { query: String, detail: String },

    #[error("renaming '{query}' would break the build: {detail}")]
    BuildError { query: String, detail: String },

    #[error("cannot move package to '{target}': {detail}")]
    PathConflict { target: String, detail: String },

    #[error("rename tool '{tool}' unavailable: {detail}")]
    Unavailable { tool: String, detail: String },
}

pub trait RenameEngine {
    /// Relocate the package at import path `old` to `new`, rewriting importers
    fn move_package(&mut self, old: &str, new: &str) -> Result<(), RenameError>;

    /// Rename the declaration `old` (and every reference to it) to `new_name`
    fn rename_symbol(&mut self, old: &QualifiedName, new_name: &str) -> Result<(), RenameError>;
}

impl<E: RenameEngine + ?Sized> RenameEngine for Box<E> {
    fn move_package(&mut self, old: &str, new: &str) -> Result<(), RenameError> {
        (**self).move_package(old, new)
    }

    fn rename_symbol(&mut self, old: &QualifiedName, new_name: &str) -> Result<(), RenameError> {
        (**self).rename_symbol(old, new_name)
    }
}
