//! Whole-tree analysis that runs before any method is renamed

pub mod exclusion;
pub mod graph;

pub use exclusion::{CapabilityAnalyzer, CapabilityScan, ExclusionSet};
pub use graph::ImportGraph;
