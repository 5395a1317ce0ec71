//! Per-fabric fault aggregation: counts, categories, rankings, timeline.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;

use crate::config::Config;
use crate::types::{FaultRecord, FaultSummary, Status, TimelineBucket, TopObject};

/// Build the aggregate summary for one fabric's records.
///
/// An empty record list produces a well-formed all-zero summary.
pub fn analyze(
  fabric_name: &str,
  fabric_id: &str,
  records: &[FaultRecord],
  config: &Config,
) -> FaultSummary {
  let severity_counts = count_by_severity(records);
  let status_count = |status: Status| {
    records.iter().filter(|r| r.status == status).count() as u64
  };

  FaultSummary {
    fabric_id: fabric_id.to_string(),
    fabric_name: fabric_name.to_string(),
    total_faults: records.len() as u64,
    active_faults: status_count(Status::Active),
    cleared_faults: status_count(Status::Cleared),
    critical_faults: severity_counts.get("critical").copied().unwrap_or(0),
    major_faults: severity_counts.get("major").copied().unwrap_or(0),
    minor_faults: severity_counts.get("minor").copied().unwrap_or(0),
    warning_faults: severity_counts.get("warning").copied().unwrap_or(0),
    fault_categories: count_by(records, |r| r.fault_type.as_str()),
    top_affected_objects: top_affected_objects(records, config.top_objects_limit),
    fault_timeline: fault_timeline(records),
    analysis_timestamp: Utc::now(),
  }
}

/// Frequency table over severity labels. Keys are the literal values seen,
/// including "unknown".
pub fn count_by_severity(records: &[FaultRecord]) -> HashMap<String, u64> {
  count_by(records, |r| r.severity.as_str())
}

fn count_by<'a>(
  records: &'a [FaultRecord],
  key: impl Fn(&'a FaultRecord) -> &'a str,
) -> HashMap<String, u64> {
  let mut counts = HashMap::new();
  for record in records {
    *counts.entry(key(record).to_string()).or_insert(0) += 1;
  }
  counts
}

/// Rank affected objects by fault count, capped at `limit`. Ties keep
/// first-seen order, so rankings are stable across runs.
fn top_affected_objects(records: &[FaultRecord], limit: usize) -> Vec<TopObject> {
  let mut order: Vec<&str> = Vec::new();
  let mut counts: HashMap<&str, u64> = HashMap::new();
  for record in records {
    let object = record.affected_object.as_str();
    if !counts.contains_key(object) {
      order.push(object);
    }
    *counts.entry(object).or_insert(0) += 1;
  }

  let mut ranked: Vec<TopObject> = order
    .into_iter()
    .map(|object| TopObject {
      object: object.to_string(),
      fault_count: counts[object],
    })
    .collect();
  // Stable sort: equal counts stay in first-seen order.
  ranked.sort_by(|a, b| b.fault_count.cmp(&a.fault_count));
  ranked.truncate(limit);
  ranked
}

/// Bucket records by the calendar date their own timestamp carries — no
/// timezone normalization. BTreeMap keys keep buckets ascending by date.
fn fault_timeline(records: &[FaultRecord]) -> Vec<TimelineBucket> {
  let mut buckets: BTreeMap<String, TimelineBucket> = BTreeMap::new();
  for record in records {
    let date = record.timestamp.format("%Y-%m-%d").to_string();
    let bucket = buckets.entry(date.clone()).or_insert_with(|| TimelineBucket {
      date,
      count: 0,
      severities: HashMap::new(),
    });
    bucket.count += 1;
    *bucket.severities.entry(record.severity.clone()).or_insert(0) += 1;
  }
  buckets.into_values().collect()
}
