//! Extract raw fault attribute maps from heterogeneous fabric export files.
//!
//! Exports arrive in several known shapes: APIC-style `imdata` envelopes,
//! bare `faultInst` dumps, and lists of wrapped instances. Dispatch is an
//! ordered table of independent matchers; the first matcher that recognizes
//! a file's shape consumes it. Unrecognized shapes yield nothing — a file
//! the engine cannot read is not an error.

use serde_json::{Map, Value};

use crate::types::FabricData;

/// A raw fault attribute map as found in an export file.
pub type RawFault = Map<String, Value>;

type Matcher = fn(&Value) -> Option<Vec<RawFault>>;

/// Schema variants, in dispatch order.
const MATCHERS: &[Matcher] = &[match_imdata, match_fault_inst, match_wrapped_list];

/// Walk a fabric's files and yield every fault attribute map found.
/// File iteration order is preserved; no ordering guarantee within a file
/// beyond the source document's own.
pub fn extract_raw_faults(fabric: &FabricData) -> Vec<RawFault> {
  let mut out = Vec::new();
  for file in &fabric.files {
    for matcher in MATCHERS {
      if let Some(entries) = matcher(&file.data) {
        out.extend(entries);
        break;
      }
    }
  }
  out
}

/// APIC query envelope: `{"imdata": [{"faultInst": {"attributes": {...}}}]}`.
fn match_imdata(data: &Value) -> Option<Vec<RawFault>> {
  let imdata = data.as_object()?.get("imdata")?;
  let mut entries = Vec::new();
  if let Some(items) = imdata.as_array() {
    for item in items {
      if let Some(attrs) = item
        .get("faultInst")
        .and_then(|inst| inst.get("attributes"))
        .and_then(Value::as_object)
      {
        entries.push(attrs.clone());
      }
    }
  }
  Some(entries)
}

/// Bare fault dump: `{"faultInst": [...]}` or `{"faultInst": {...}}`.
/// Entries may carry an `attributes` wrapper or be the attribute map itself.
fn match_fault_inst(data: &Value) -> Option<Vec<RawFault>> {
  let inst = data.as_object()?.get("faultInst")?;
  let mut entries = Vec::new();
  match inst {
    Value::Array(items) => {
      for item in items {
        if let Some(attrs) = unwrap_attributes(item) {
          entries.push(attrs);
        }
      }
    }
    single => {
      if let Some(attrs) = unwrap_attributes(single) {
        entries.push(attrs);
      }
    }
  }
  Some(entries)
}

/// Wrapped list: `[{"faultInst": {...}}, ...]`.
fn match_wrapped_list(data: &Value) -> Option<Vec<RawFault>> {
  let items = data.as_array()?;
  let mut entries = Vec::new();
  for item in items {
    if let Some(attrs) = item.get("faultInst").and_then(unwrap_attributes) {
      entries.push(attrs);
    }
  }
  Some(entries)
}

/// Peel an `attributes` wrapper if present; otherwise take the map itself.
fn unwrap_attributes(value: &Value) -> Option<RawFault> {
  let obj = value.as_object()?;
  match obj.get("attributes").and_then(Value::as_object) {
    Some(attrs) => Some(attrs.clone()),
    None => Some(obj.clone()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::FabricFile;
  use serde_json::json;

  fn fabric(files: Vec<Value>) -> FabricData {
    FabricData {
      name: "lab".into(),
      files: files
        .into_iter()
        .enumerate()
        .map(|(i, data)| FabricFile {
          filename: format!("export-{}.json", i),
          data,
          size: 0,
        })
        .collect(),
      id: None,
    }
  }

  #[test]
  fn imdata_envelope_yields_attributes() {
    let data = json!({
      "imdata": [
        {"faultInst": {"attributes": {"dn": "topology/a", "code": "F001"}}},
        {"fvTenant": {"attributes": {"dn": "uni/tn-x"}}},
        {"faultInst": {"attributes": {"dn": "topology/b", "code": "F002"}}}
      ]
    });
    let raw = extract_raw_faults(&fabric(vec![data]));
    assert_eq!(raw.len(), 2);
    assert_eq!(raw[0]["dn"], "topology/a");
    assert_eq!(raw[1]["code"], "F002");
  }

  #[test]
  fn imdata_key_with_non_array_value_yields_nothing() {
    let data = json!({"imdata": {"faultInst": {"attributes": {"code": "F001"}}}});
    let raw = extract_raw_faults(&fabric(vec![data]));
    assert!(raw.is_empty());
  }

  #[test]
  fn fault_inst_array_with_and_without_attributes_wrapper() {
    let data = json!({
      "faultInst": [
        {"attributes": {"dn": "a", "code": "F001"}},
        {"dn": "b", "code": "F002"},
        "not-a-map"
      ]
    });
    let raw = extract_raw_faults(&fabric(vec![data]));
    assert_eq!(raw.len(), 2);
    assert_eq!(raw[0]["dn"], "a");
    assert_eq!(raw[1]["dn"], "b");
  }

  #[test]
  fn fault_inst_single_map_is_one_entry() {
    let data = json!({"faultInst": {"attributes": {"dn": "a", "code": "F001"}}});
    let raw = extract_raw_faults(&fabric(vec![data]));
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0]["code"], "F001");
  }

  #[test]
  fn wrapped_list_yields_inner_maps() {
    let data = json!([
      {"faultInst": {"attributes": {"code": "F001"}}},
      {"faultInst": {"code": "F002"}},
      {"healthInst": {"attributes": {"cur": "95"}}}
    ]);
    let raw = extract_raw_faults(&fabric(vec![data]));
    assert_eq!(raw.len(), 2);
    assert_eq!(raw[0]["code"], "F001");
    assert_eq!(raw[1]["code"], "F002");
  }

  #[test]
  fn imdata_wins_over_fault_inst_when_both_present() {
    let data = json!({
      "imdata": [{"faultInst": {"attributes": {"code": "F001"}}}],
      "faultInst": [{"attributes": {"code": "F999"}}]
    });
    let raw = extract_raw_faults(&fabric(vec![data]));
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0]["code"], "F001");
  }

  #[test]
  fn unknown_shapes_yield_nothing() {
    let files = vec![
      json!({"topSystem": {"attributes": {"name": "leaf-101"}}}),
      json!("just a string"),
      json!(42),
      json!(null),
      json!({}),
    ];
    let raw = extract_raw_faults(&fabric(files));
    assert!(raw.is_empty());
  }

  #[test]
  fn file_order_is_preserved() {
    let first = json!({"faultInst": {"code": "F001"}});
    let second = json!({"imdata": [{"faultInst": {"attributes": {"code": "F002"}}}]});
    let raw = extract_raw_faults(&fabric(vec![first, second]));
    assert_eq!(raw.len(), 2);
    assert_eq!(raw[0]["code"], "F001");
    assert_eq!(raw[1]["code"], "F002");
  }
}
