//! Normalize raw fault attribute maps into canonical FaultRecords.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::EngineError;
use crate::extract::RawFault;
use crate::types::{FaultRecord, Status};

/// Convert one raw attribute map into a canonical record.
///
/// Field resolution walks fallback chains; missing fields degrade to ""
/// or "unknown". A field that is present but not a JSON string is a
/// malformation and skips the record. Timestamps never skip: a missing or
/// unparsable value resolves to the current time.
pub fn normalize(raw: &RawFault) -> Result<FaultRecord, EngineError> {
  let fault_id = resolve(raw, &["dn", "id"])?
    .unwrap_or("unknown")
    .to_string();
  let severity = resolve(raw, &["severity"])?
    .map(str::to_ascii_lowercase)
    .unwrap_or_else(|| "unknown".to_string());
  let fault_type = resolve(raw, &["type", "code"])?
    .unwrap_or("unknown")
    .to_string();
  let description = resolve(raw, &["descr", "description"])?
    .unwrap_or("")
    .to_string();
  let affected_object = resolve(raw, &["affected", "dn"])?.unwrap_or("").to_string();
  let status = determine_status(raw)?;
  let timestamp = parse_timestamp(first_present(raw, &["created", "timestamp"]));

  Ok(FaultRecord {
    fault_id,
    severity,
    fault_type,
    description,
    affected_object,
    timestamp,
    status,
  })
}

/// Walk a fallback chain of keys. The first key present wins; its value
/// must be a string or the record is malformed.
fn resolve<'a>(raw: &'a RawFault, keys: &[&str]) -> Result<Option<&'a str>, EngineError> {
  for key in keys {
    if let Some(value) = raw.get(*key) {
      return match value.as_str() {
        Some(s) => Ok(Some(s)),
        None => Err(EngineError::validation(key, "expected a string value")),
      };
    }
  }
  Ok(None)
}

/// First value present along a key chain, regardless of type.
fn first_present<'a>(raw: &'a RawFault, keys: &[&str]) -> Option<&'a Value> {
  keys.iter().find_map(|key| raw.get(*key))
}

/// Status state machine.
///
/// `lc` drives raise/clear when it holds a known lifecycle value; any
/// other `lc` falls through to the `ack` check, which in turn falls back
/// to active.
fn determine_status(raw: &RawFault) -> Result<Status, EngineError> {
  if let Some(lc) = raw.get("lc").and_then(Value::as_str) {
    if matches!(lc, "raised" | "created") {
      return Ok(Status::Active);
    }
    if matches!(lc, "cleared" | "deleted") {
      return Ok(Status::Cleared);
    }
  }
  match raw.get("ack") {
    Some(Value::String(ack)) if ack.eq_ignore_ascii_case("yes") => Ok(Status::Acknowledged),
    Some(Value::String(_)) | None => Ok(Status::Active),
    Some(_) => Err(EngineError::validation("ack", "expected a string value")),
  }
}

/// Parse an ISO-8601 timestamp, preserving any offset it carries.
/// Offset-less values are taken as UTC. Anything else resolves to the
/// current time: a bad timestamp degrades the record, it does not drop it.
fn parse_timestamp(value: Option<&Value>) -> DateTime<FixedOffset> {
  let Some(text) = value.and_then(Value::as_str) else {
    return Utc::now().fixed_offset();
  };
  if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
    return dt;
  }
  if let Ok(naive) = text.parse::<NaiveDateTime>() {
    return naive.and_utc().fixed_offset();
  }
  Utc::now().fixed_offset()
}
