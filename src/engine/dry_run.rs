use serde::Serialize;

use super::{RenameEngine, RenameError};
use crate::extractors::base::QualifiedName;

/// One operation the pipeline asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EngineOperation {
    MovePackage { from: String, to: String },
    RenameSymbol { from: QualifiedName, to: String },
}

/// Accepts every operation and changes nothing on disk
///
/// Since nothing moves, a dry run never descends below renamed packages the
/// way a real run would; it previews decisions, not final paths.
#[derive(Debug, Default)]
pub struct DryRunEngine {
    operations: Vec<EngineOperation>,
}

impl DryRunEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operations(&self) -> &[EngineOperation] {
        &self.operations
    }

    pub fn into_operations(self) -> Vec<EngineOperation> {
        self.operations
    }
}

impl RenameEngine for DryRunEngine {
    fn move_package(&mut self, old: &str, new: &str) -> Result<(), RenameError> {
        self.operations.push(EngineOperation::MovePackage {
            from: old.to_string(),
            to: new.to_string(),
        });
        Ok(())
    }

    fn rename_symbol(&mut self, old: &QualifiedName, new_name: &str) -> Result<(), RenameError> {
        self.operations.push(EngineOperation::RenameSymbol {
            from: old.clone(),
            to: new_name.to_string(),
        });
        Ok(())
    }
}
