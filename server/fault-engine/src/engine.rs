//! Analyzer facade: extract → normalize per fabric, then aggregate or
//! compare.

use tracing::debug;

use crate::aggregate;
use crate::compare;
use crate::config::Config;
use crate::error::EngineError;
use crate::extract;
use crate::normalize;
use crate::types::{ComparisonResult, FabricData, FabricFaults, FaultRecord, FaultSummary};

/// The analysis entry points. Holds only tunable limits, so one instance
/// is safe to share across independent inputs.
pub struct Analyzer {
  config: Config,
}

impl Analyzer {
  pub fn new(config: Config) -> Self {
    Self { config }
  }

  pub fn with_defaults() -> Self {
    Self::new(Config::default())
  }

  /// Analyze faults for a single fabric.
  ///
  /// Never fails: empty, unrecognized, or partially malformed fabric
  /// content yields a well-formed (possibly zero-valued) summary.
  pub fn analyze_fabric_faults(&self, fabric: &FabricData) -> FaultSummary {
    let records = self.collect_records(fabric);
    aggregate::analyze(
      &fabric.name,
      fabric.id.as_deref().unwrap_or(""),
      &records,
      &self.config,
    )
  }

  /// Compare faults across two or more fabrics.
  ///
  /// Fewer than two fabrics is a caller contract violation and surfaces
  /// as a validation error.
  pub fn compare_fabrics(&self, fabrics: &[FabricData]) -> Result<ComparisonResult, EngineError> {
    let per_fabric: Vec<FabricFaults> = fabrics
      .iter()
      .map(|fabric| FabricFaults {
        name: fabric.name.clone(),
        records: self.collect_records(fabric),
      })
      .collect();
    compare::compare(&per_fabric, &self.config)
  }

  /// Extract and normalize one fabric's files. Malformed entries are
  /// dropped and logged; one bad entry never blocks the rest of the batch.
  fn collect_records(&self, fabric: &FabricData) -> Vec<FaultRecord> {
    extract::extract_raw_faults(fabric)
      .iter()
      .filter_map(|raw| match normalize::normalize(raw) {
        Ok(record) => Some(record),
        Err(e) => {
          debug!(fabric = %fabric.name, error = %e, "skipping malformed fault entry");
          None
        }
      })
      .collect()
  }
}
