//! JSON export of verdicts and traces

use crate::fol::{FormulaArena, Literals};
use crate::prover::{ProofResult, Prover, ProverStats};
use crate::resolution::StopReason;
use crate::trace::TraceStep;
use serde::{Deserialize, Serialize};

/// One trace step with literals rendered as TPTP text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStepJson {
    pub index: usize,
    pub literals: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub origin: Vec<usize>,
    /// Machine name of the rule
    pub rule: String,
}

impl TraceStepJson {
    pub fn from_step(step: &TraceStep, arena: &FormulaArena) -> Self {
        TraceStepJson {
            index: step.index,
            literals: step
                .literals
                .iter()
                .map(|&lit| arena.display(lit).to_string())
                .collect(),
            origin: step.origin.clone(),
            rule: step.rule.name().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceJson {
    pub steps: Vec<TraceStepJson>,
}

impl TraceJson {
    pub fn from_steps(steps: &[TraceStep], arena: &FormulaArena) -> Self {
        TraceJson {
            steps: steps.iter().map(|s| TraceStepJson::from_step(s, arena)).collect(),
        }
    }
}

/// Verdict, statistics and (optionally) the trace of a finished attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofJson {
    /// `proved`, `not_proved`, `inconclusive` or `pending`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stop_reason: Option<StopReason>,
    pub first_order: bool,
    pub stats: ProverStats,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub proof: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trace: Option<TraceJson>,
}

impl ProofJson {
    pub fn from_prover(prover: &Prover, include_trace: bool) -> Self {
        let (status, stop_reason) = match prover.result() {
            Some(ProofResult::Proved) => ("proved", None),
            Some(ProofResult::NotProved) => ("not_proved", None),
            Some(ProofResult::Inconclusive(reason)) => ("inconclusive", Some(reason)),
            None => ("pending", None),
        };
        let trace = include_trace.then(|| TraceJson::from_steps(&prover.trace(), prover.arena()));
        ProofJson {
            status: status.to_string(),
            stop_reason,
            first_order: prover.is_first_order(),
            stats: prover.stats().clone(),
            proof: prover.proof(),
            trace,
        }
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Render a literal set as a JSON array of TPTP strings
pub fn literals_json(literals: &Literals, arena: &FormulaArena) -> serde_json::Value {
    serde_json::Value::Array(
        literals
            .iter()
            .map(|lit| serde_json::Value::String(arena.display(lit).to_string()))
            .collect(),
    )
}
