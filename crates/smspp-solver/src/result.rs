//! Solver run results.

use std::collections::BTreeMap;

use smspp_model::Block;

use crate::log::ParsedLog;
use crate::status::SolverStatus;

/// The outcome of one solver invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    /// Parsed solver status.
    pub status: SolverStatus,
    /// Objective value, `None` unless the run succeeded.
    pub objective: Option<f64>,
    /// Best lower bound reported by the solver, when printed.
    pub lower_bound: Option<f64>,
    /// Best upper bound reported by the solver, when printed.
    pub upper_bound: Option<f64>,
    /// Wall-clock seconds the solver reported for itself.
    pub elapsed_seconds: Option<f64>,
    /// Other recognized key/value lines from the log.
    pub metadata: BTreeMap<String, serde_json::Value>,
    /// The full captured log, stdout then stderr.
    pub log: String,
    /// Decoded solution tree, when a solution file was requested and written.
    pub solution: Option<Block>,
}

impl SolveResult {
    pub(crate) fn from_parsed(parsed: ParsedLog, log: String) -> Self {
        Self {
            status: parsed.status.unwrap_or(SolverStatus::Unknown),
            objective: parsed.objective,
            lower_bound: parsed.lower_bound,
            upper_bound: parsed.upper_bound,
            elapsed_seconds: parsed.elapsed_seconds,
            metadata: parsed.metadata,
            log,
            solution: None,
        }
    }

    /// Check if the run produced a usable solution value.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
