//! Engine configuration with sane defaults.

/// Tunable limits for summary and comparison output.
#[derive(Debug, Clone)]
pub struct Config {
  /// Max entries in the top-affected-objects ranking.
  pub top_objects_limit: usize,
  /// Fault count above which a fabric gets its own investigation advisory.
  pub busy_fabric_threshold: usize,
  /// Max common fault types named in the shared-types advisory.
  pub common_types_in_advice: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      top_objects_limit: 10,
      busy_fabric_threshold: 100,
      common_types_in_advice: 3,
    }
  }
}
