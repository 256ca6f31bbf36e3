// Base Extractor Types
//
// - types.rs: Declaration, QualifiedName, Scope, RenameCandidate
// - extractor.rs: SourceUnit loading and the BaseExtractor helpers

pub mod extractor;
pub mod types;

// Re-export key types for external use
pub use extractor::{BaseExtractor, SourceUnit};
pub use types::{Declaration, DeclarationKind, QualifiedName, Receiver, RenameCandidate, Scope};
