use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use tracing::warn;

/// One line of the activity journal.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub action: String,
    pub input: String,
    pub output: Option<String>,
    pub input_bytes: u64,
    pub output_bytes: Option<u64>,
}

impl LogEntry {
    pub fn new(action: &str, input: &Path, input_bytes: u64) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            action: action.to_string(),
            input: input.display().to_string(),
            output: None,
            input_bytes,
            output_bytes: None,
        }
    }

    pub fn with_output(mut self, output: &Path, output_bytes: u64) -> Self {
        self.output = Some(output.display().to_string());
        self.output_bytes = Some(output_bytes);
        self
    }
}

fn append(journal: &Path, entry: &LogEntry) -> io::Result<()> {
    let json = serde_json::to_string(entry)?;
    let mut file = OpenOptions::new().create(true).append(true).open(journal)?;
    writeln!(file, "{}", json)
}

/// Append `entry` to the journal if one is configured. Failures are logged
/// and otherwise ignored.
pub fn log_action(journal: Option<&Path>, entry: &LogEntry) {
    let Some(journal) = journal else {
        return;
    };
    if let Err(e) = append(journal, entry) {
        warn!(journal = %journal.display(), error = %e, "could not write journal entry");
    }
}
