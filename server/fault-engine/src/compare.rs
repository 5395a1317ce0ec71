//! Cross-fabric comparison: common/unique fault types, severity tables,
//! rule-based recommendations.

use std::collections::{HashMap, HashSet};

use crate::aggregate;
use crate::config::Config;
use crate::error::EngineError;
use crate::types::{ComparisonResult, FabricFaults, FaultRecord};

/// Compare two or more fabrics' normalized records.
///
/// Fewer than two fabrics is a caller contract violation and fails fast;
/// malformed telemetry never reaches this layer.
pub fn compare(fabrics: &[FabricFaults], config: &Config) -> Result<ComparisonResult, EngineError> {
  if fabrics.len() < 2 {
    return Err(EngineError::validation(
      "fabrics",
      "at least 2 fabrics required for comparison",
    ));
  }

  let type_sets: Vec<HashSet<&str>> = fabrics
    .iter()
    .map(|f| f.records.iter().map(|r| r.fault_type.as_str()).collect())
    .collect();

  let common = common_types(&type_sets);
  let common_faults = representative_faults(&fabrics[0].records, &common);

  let severity_comparison = fabrics
    .iter()
    .map(|f| (f.name.clone(), aggregate::count_by_severity(&f.records)))
    .collect();

  let recommendations = recommendations(fabrics, &common_faults, config);

  Ok(ComparisonResult {
    fabric_names: fabrics.iter().map(|f| f.name.clone()).collect(),
    common_faults,
    unique_faults: unique_faults(fabrics, &type_sets),
    severity_comparison,
    recommendations,
  })
}

/// Intersection of every fabric's distinct type set.
fn common_types<'a>(type_sets: &[HashSet<&'a str>]) -> HashSet<&'a str> {
  let mut iter = type_sets.iter();
  let mut common = iter.next().cloned().unwrap_or_default();
  for set in iter {
    common.retain(|t| set.contains(t));
  }
  common
}

/// One representative record per common type: the first match in the first
/// fabric's list, ordered by first appearance there. Deterministic across
/// runs.
fn representative_faults(first: &[FaultRecord], common: &HashSet<&str>) -> Vec<FaultRecord> {
  let mut taken: HashSet<&str> = HashSet::new();
  let mut reps = Vec::new();
  for record in first {
    let fault_type = record.fault_type.as_str();
    if common.contains(fault_type) && taken.insert(fault_type) {
      reps.push(record.clone());
    }
  }
  reps
}

/// Every record whose type appears in no other fabric, keyed by fabric
/// name. Record order within a fabric is preserved.
fn unique_faults(
  fabrics: &[FabricFaults],
  type_sets: &[HashSet<&str>],
) -> HashMap<String, Vec<FaultRecord>> {
  let mut unique = HashMap::new();
  for (i, fabric) in fabrics.iter().enumerate() {
    let mut others: HashSet<&str> = HashSet::new();
    for (j, set) in type_sets.iter().enumerate() {
      if j != i {
        others.extend(set.iter().copied());
      }
    }
    let records: Vec<FaultRecord> = fabric
      .records
      .iter()
      .filter(|r| !others.contains(r.fault_type.as_str()))
      .cloned()
      .collect();
    unique.insert(fabric.name.clone(), records);
  }
  unique
}

/// Advisory strings, emitted in fixed rule order: combined critical count,
/// shared fault types, per-fabric volume, then a default when nothing
/// fired.
fn recommendations(
  fabrics: &[FabricFaults],
  common_faults: &[FaultRecord],
  config: &Config,
) -> Vec<String> {
  let mut out = Vec::new();

  let total_critical: usize = fabrics
    .iter()
    .map(|f| f.records.iter().filter(|r| r.severity == "critical").count())
    .sum();
  if total_critical > 0 {
    out.push(format!(
      "Found {} critical faults across fabrics. Immediate attention required for critical issues.",
      total_critical
    ));
  }

  if !common_faults.is_empty() {
    let preview: Vec<&str> = common_faults
      .iter()
      .take(config.common_types_in_advice)
      .map(|r| r.fault_type.as_str())
      .collect();
    out.push(format!(
      "Common fault types found across all fabrics: {}. Consider implementing fabric-wide policies to address these recurring issues.",
      preview.join(", ")
    ));
  }

  for fabric in fabrics {
    if fabric.records.len() > config.busy_fabric_threshold {
      out.push(format!(
        "Fabric '{}' has {} faults. Consider detailed investigation of this fabric's configuration.",
        fabric.name,
        fabric.records.len()
      ));
    }
  }

  if out.is_empty() {
    out.push("No critical issues detected. Continue monitoring fabric health.".to_string());
  }

  out
}
