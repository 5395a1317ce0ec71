//! Binary entrypoint: read JSON lines from stdin, write JSON lines to stdout.
//!
//! Each input line is a command:
//! - `{"analyze": <fabric>}` emits a FaultSummary line
//! - `{"compare": [<fabric>, ...]}` emits a ComparisonResult line
//!
//! Invalid JSON or a contract violation emits an ErrorOutput line. Tracing
//! goes to stderr so stdout stays a pure JSON stream.

use std::io::{self, BufRead, Write};

use fault_engine::types::{ErrorOutput, FabricData};
use fault_engine::{Analyzer, EngineError};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum Command {
  Analyze(FabricData),
  Compare(Vec<FabricData>),
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_writer(io::stderr)
    .init();

  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut out = io::BufWriter::new(stdout.lock());
  let analyzer = Analyzer::with_defaults();

  for line in stdin.lock().lines() {
    let line = match line {
      Ok(l) => l,
      Err(e) => {
        let _ = writeln!(io::stderr(), "fault-engine: read error: {}", e);
        std::process::exit(1);
      }
    };

    // Skip blank lines.
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    let command: Command = match serde_json::from_str(trimmed) {
      Ok(c) => c,
      Err(e) => {
        emit_error(&mut out, &ErrorOutput::new(format!("json parse: {}", e)));
        continue;
      }
    };

    match command {
      Command::Analyze(fabric) => {
        let summary = analyzer.analyze_fabric_faults(&fabric);
        let _ = serde_json::to_writer(&mut out, &summary);
        let _ = writeln!(out);
      }
      Command::Compare(fabrics) => match analyzer.compare_fabrics(&fabrics) {
        Ok(result) => {
          let _ = serde_json::to_writer(&mut out, &result);
          let _ = writeln!(out);
        }
        Err(e) => {
          let err = match &e {
            EngineError::Validation { field, reason } => {
              ErrorOutput::new(reason.clone()).with_field(field.clone())
            }
            _ => ErrorOutput::new(e.to_string()),
          };
          emit_error(&mut out, &err);
        }
      },
    }
  }

  let _ = out.flush();
}

fn emit_error<W: Write>(out: &mut W, err: &ErrorOutput) {
  let _ = serde_json::to_writer(&mut *out, err);
  let _ = writeln!(out);
}
