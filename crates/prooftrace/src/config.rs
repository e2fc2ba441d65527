//! Prover configuration types.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{ProverError, Result};

/// Configuration for the resolution loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProverConfig {
    /// Order in which literal-only clauses leave the work queue
    pub queue_order: QueueOrder,
    pub max_iterations: usize,
    /// Upper bound on the trace length
    pub max_clauses: usize,
    pub timeout: Option<Duration>,
    /// Record the first tautological resolvent as `$true` in the trace
    pub record_tautologies: bool,
}

/// Work queue disciplines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueOrder {
    /// Fewest literals first, insertion order among equals
    ShortestFirst,
    /// Plain insertion order
    Fifo,
}

impl Default for ProverConfig {
    fn default() -> Self {
        ProverConfig {
            queue_order: QueueOrder::ShortestFirst,
            max_iterations: 0, // 0 means no limit
            max_clauses: 0,    // 0 means no limit
            timeout: None,
            record_tautologies: false,
        }
    }
}

impl ProverConfig {
    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&text).map_err(|e| {
            ProverError::Config(format!("{}: {}", path.as_ref().display(), e))
        })
    }
}
