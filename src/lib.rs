// goshroud - identifier obfuscation for GOPATH-style Go source trees
//
// Renames packages and program symbols to opaque names through a pluggable
// rename engine, one operation at a time, keeping the tree buildable.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod entry_point;
pub mod error;
pub mod extractors;
pub mod language;
pub mod naming;
pub mod pipeline;
pub mod resolver;
pub mod reverse_map;
pub mod sentinel;
pub mod tree;
pub mod utils;

pub use analysis::{CapabilityAnalyzer, ExclusionSet, ImportGraph};
pub use config::ObfuscatorConfig;
pub use engine::{DryRunEngine, GoToolsEngine, RenameEngine, RenameError};
pub use error::{ObfuscateError, Result};
pub use extractors::{Declaration, DeclarationKind, QualifiedName, RenameCandidate};
pub use naming::{KeyedHasher, NameHasher, SuffixHasher};
pub use pipeline::{Obfuscator, RunSummary, SymbolPass};
pub use resolver::{resolve, Resolution};
pub use reverse_map::ReverseLookupMap;
pub use tree::{ExclusionPolicy, ExclusionReason, Package, SourceTree};
