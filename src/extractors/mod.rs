//! Declaration extractors
//!
//! Tree-sitter based extraction of rename candidates from Go compilation units.
//!
//! - `base` - Declaration and qualified-name types, unit loading, shared helpers
//! - `go` - The Go extractor, one method per rename pass

pub mod base;
pub mod go;

pub use base::{
    Declaration, DeclarationKind, QualifiedName, Receiver, RenameCandidate, Scope, SourceUnit,
};
pub use go::{GoExtractor, ImportSpec};
