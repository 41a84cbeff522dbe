// Chart Relations - Core Library
// Groups WISH chart ids into families from their "Same As" cross-references

pub mod config;
pub mod error;
pub mod identifier;     // Identifier Normalizer
pub mod dates;          // Date Normalizer
pub mod loader;         // Record Loader (CSV boundary)
pub mod graph;          // Relation Graph Builder
pub mod components;     // Component Resolver
pub mod families;       // Family Canonicalizer + Relations document
pub mod emitter;        // Result Emitter (JSON boundary)

// Re-export commonly used types
pub use config::{ColumnNames, RelationsConfig};
pub use error::{RelationsError, Result};
pub use loader::{ChartRecord, LoadReport, load_csv, load_from_reader};
pub use graph::RelationGraph;
pub use components::{Components, connected_components};
pub use families::{DateIndex, Family, Relations, RelationsSummary, resolve};
pub use emitter::{save_relations, write_relations};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
