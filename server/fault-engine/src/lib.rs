//! Fabric Fault Analysis Engine — deterministic, rule-based.
//!
//! Ingests exported fabric telemetry files (heterogeneous JSON shapes),
//! extracts and normalizes fault entries, and produces per-fabric
//! aggregate summaries and cross-fabric comparisons.
//!
//! No DB, no network; pure computation over in-memory inputs.

pub mod aggregate;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod types;

pub use config::Config;
pub use engine::Analyzer;
pub use error::EngineError;
pub use types::{ComparisonResult, FabricData, FaultRecord, FaultSummary};
