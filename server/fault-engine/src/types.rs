//! Core types for the fault engine (JSON contracts + internal models).

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Inbound types (JSON contract — what the caller sends)
// ---------------------------------------------------------------------------

/// One uploaded JSON file from a fabric export. `data` stays a raw JSON
/// value; the extractor dispatches on its shape.
#[derive(Debug, Clone, Deserialize)]
pub struct FabricFile {
  pub filename: String,
  pub data: serde_json::Value,
  #[serde(default)]
  pub size: u64,
}

/// A named collection of exported files for one site. Unknown fields are
/// silently ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct FabricData {
  pub name: String,
  #[serde(default)]
  pub files: Vec<FabricFile>,
  /// Assigned by the storage collaborator; echoed into the summary.
  #[serde(default)]
  pub id: Option<String>,
}

// ---------------------------------------------------------------------------
// Status + severity
// ---------------------------------------------------------------------------

/// Lifecycle-derived fault status (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
  Active,
  Cleared,
  Acknowledged,
}

/// Severity labels ranked highest first. The canonical ordering for
/// severity-based sorting; no current computation consumes it.
pub const SEVERITY_RANK: [(&str, u8); 5] = [
  ("critical", 4),
  ("major", 3),
  ("minor", 2),
  ("warning", 1),
  ("info", 0),
];

// ---------------------------------------------------------------------------
// Canonical fault record
// ---------------------------------------------------------------------------

/// Canonical fault record after normalization. Fields are never null:
/// absence maps to "" or "unknown".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultRecord {
  pub fault_id: String,
  /// Lowercased source severity, or "unknown".
  pub severity: String,
  /// Fault category key; drives cross-fabric comparison.
  #[serde(rename = "type")]
  pub fault_type: String,
  pub description: String,
  pub affected_object: String,
  /// Offset-preserving: timeline bucketing uses the date as written.
  pub timestamp: DateTime<FixedOffset>,
  pub status: Status,
}

// ---------------------------------------------------------------------------
// Aggregates (what we emit)
// ---------------------------------------------------------------------------

/// One entry in the top-affected-objects ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopObject {
  pub object: String,
  pub fault_count: u64,
}

/// One day of fault activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineBucket {
  /// "YYYY-MM-DD", in the offset each fault's timestamp carries.
  pub date: String,
  pub count: u64,
  pub severities: HashMap<String, u64>,
}

/// Per-fabric aggregate fault summary.
#[derive(Debug, Clone, Serialize)]
pub struct FaultSummary {
  pub fabric_id: String,
  pub fabric_name: String,
  pub total_faults: u64,
  pub active_faults: u64,
  pub cleared_faults: u64,
  pub critical_faults: u64,
  pub major_faults: u64,
  pub minor_faults: u64,
  pub warning_faults: u64,
  pub fault_categories: HashMap<String, u64>,
  pub top_affected_objects: Vec<TopObject>,
  pub fault_timeline: Vec<TimelineBucket>,
  /// Wall-clock time of the computation, distinct from any fault's own
  /// timestamp.
  pub analysis_timestamp: DateTime<Utc>,
}

/// One fabric's normalized records, as handed to the comparator.
#[derive(Debug, Clone)]
pub struct FabricFaults {
  pub name: String,
  pub records: Vec<FaultRecord>,
}

/// Multi-fabric comparison output.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
  /// Input order.
  pub fabric_names: Vec<String>,
  /// One representative record per fault type present in every fabric.
  pub common_faults: Vec<FaultRecord>,
  /// Fabric name -> records whose type appears in that fabric only.
  pub unique_faults: HashMap<String, Vec<FaultRecord>>,
  /// Fabric name -> severity -> count.
  pub severity_comparison: HashMap<String, HashMap<String, u64>>,
  pub recommendations: Vec<String>,
}

// ---------------------------------------------------------------------------
// CLI stream wrappers
// ---------------------------------------------------------------------------

/// Structured error output for invalid input lines.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
