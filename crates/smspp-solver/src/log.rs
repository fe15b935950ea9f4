//! Solver log parsing.
//!
//! SMS++ tools print their results in two dialects. The unit-commitment
//! solver writes `Status = ...` together with `Upper bound = ...` and
//! `Lower bound = ...`, while the investment solvers write
//! `Solver status: ...` and `Solution value: ...`. Both are flat
//! `key = value` or `key: value` lines, so a single parser covers them.

use std::collections::BTreeMap;

use crate::status::SolverStatus;

/// Everything extracted from a solver log.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedLog {
    pub status: Option<SolverStatus>,
    pub objective: Option<f64>,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    pub elapsed_seconds: Option<f64>,
    /// Remaining recognized `key = value` lines.
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// Splits a line into a key and value on the first `=` or `:`.
fn split_line(line: &str) -> Option<(&str, &str)> {
    let sep = line.find(['=', ':'])?;
    let key = line[..sep].trim();
    let value = line[sep + 1..].trim();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

fn status_from_word(word: &str) -> SolverStatus {
    let lower = word.to_ascii_lowercase();
    // "kOK" is how the SMS++ tools spell a clean finish.
    if lower == "kok" || lower.contains("optimal") || lower.contains("success") {
        SolverStatus::Success
    } else if lower.contains("infeasib") {
        SolverStatus::Infeasible
    } else if lower.contains("unbound") {
        SolverStatus::Unbounded
    } else if lower.contains("error") || lower.contains("fail") {
        SolverStatus::Error
    } else {
        SolverStatus::Unknown
    }
}

fn metadata_value(raw: &str) -> serde_json::Value {
    if let Ok(int) = raw.parse::<i64>() {
        return serde_json::Value::from(int);
    }
    if let Ok(float) = raw.parse::<f64>() {
        if float.is_finite() {
            return serde_json::Value::from(float);
        }
    }
    serde_json::Value::from(raw)
}

/// Parses a complete solver log.
///
/// A `Solution value` line without any status line implies success, which
/// is how the investment solvers report a finished run. Non-success
/// statuses clear the objective since the printed value is meaningless
/// for an infeasible or unbounded model.
pub fn parse_log(log: &str) -> ParsedLog {
    let mut parsed = ParsedLog::default();
    let mut saw_status_line = false;

    for line in log.lines() {
        let Some((key, value)) = split_line(line) else {
            continue;
        };
        match key {
            "Status" | "Solver status" => {
                let word = status_from_word(value);
                // An unclassified status word must not downgrade the
                // success implied by an earlier finite solution value.
                let keep_implied = word == SolverStatus::Unknown
                    && parsed.status == Some(SolverStatus::Success)
                    && parsed.objective.is_some();
                if !keep_implied {
                    parsed.status = Some(word);
                }
                saw_status_line = true;
            }
            "Upper bound" => {
                let parsed_value = value.parse::<f64>().ok();
                parsed.upper_bound = parsed_value;
                parsed.objective = parsed_value.filter(|v| v.is_finite());
            }
            "Lower bound" => {
                parsed.lower_bound = value.parse::<f64>().ok();
            }
            "Solution value" => {
                parsed.objective = value.parse::<f64>().ok().filter(|v| v.is_finite());
                if !saw_status_line && parsed.objective.is_some() {
                    parsed.status = Some(SolverStatus::Success);
                }
            }
            "Elapsed time" => {
                let number = value
                    .split_whitespace()
                    .next()
                    .and_then(|n| n.parse::<f64>().ok());
                parsed.elapsed_seconds = number;
            }
            other => {
                // Short keys only, prose lines with a stray colon are noise.
                if other.split_whitespace().count() <= 3 {
                    parsed
                        .metadata
                        .insert(other.to_string(), metadata_value(value));
                }
            }
        }
    }

    if matches!(
        parsed.status,
        Some(SolverStatus::Infeasible) | Some(SolverStatus::Unbounded) | Some(SolverStatus::Error)
    ) {
        parsed.objective = None;
        parsed.upper_bound = None;
        parsed.lower_bound = None;
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ucblock_dialect() {
        let log = "Using configuration file uc_solverconfig.txt\n\
                   Status = kOK\n\
                   Upper bound = 1234.5\n\
                   Lower bound = 1234.5\n\
                   Elapsed time = 0.42 s\n";
        let parsed = parse_log(log);
        assert_eq!(parsed.status, Some(SolverStatus::Success));
        assert_eq!(parsed.objective, Some(1234.5));
        assert_eq!(parsed.upper_bound, Some(1234.5));
        assert_eq!(parsed.lower_bound, Some(1234.5));
        assert_eq!(parsed.elapsed_seconds, Some(0.42));
    }

    #[test]
    fn test_ucblock_success_word() {
        let log = "Status = Success\nUpper bound = 10\nLower bound = 9.5\n";
        let parsed = parse_log(log);
        assert_eq!(parsed.status, Some(SolverStatus::Success));
        assert_eq!(parsed.objective, Some(10.0));
    }

    #[test]
    fn test_investment_dialect_implies_success() {
        let log = "Solution value: 987.25\nSolver status: kOK\n";
        let parsed = parse_log(log);
        assert_eq!(parsed.objective, Some(987.25));
        assert_eq!(parsed.status, Some(SolverStatus::Success));
    }

    #[test]
    fn test_kok_status_word_is_success() {
        assert_eq!(
            parse_log("Status = kOK\n").status,
            Some(SolverStatus::Success)
        );
    }

    #[test]
    fn test_later_unclassified_status_keeps_implied_success() {
        // A finite solution value means the run succeeded even when the
        // trailing status word is some vocabulary the map does not know.
        let log = "Solution value: 42.0\nSolver status: kLowPrecision\n";
        let parsed = parse_log(log);
        assert_eq!(parsed.status, Some(SolverStatus::Success));
        assert_eq!(parsed.objective, Some(42.0));
    }

    #[test]
    fn test_infeasible_clears_objective() {
        let log = "Status: INFEASIBLE\nUpper bound = inf\n";
        let parsed = parse_log(log);
        assert_eq!(parsed.status, Some(SolverStatus::Infeasible));
        assert_eq!(parsed.objective, None);
        assert_eq!(parsed.upper_bound, None);
    }

    #[test]
    fn test_unbounded_and_error_words() {
        assert_eq!(
            parse_log("Status = UNBOUNDED\n").status,
            Some(SolverStatus::Unbounded)
        );
        assert_eq!(
            parse_log("Solver status: Failed\n").status,
            Some(SolverStatus::Error)
        );
    }

    #[test]
    fn test_metadata_lines_are_collected() {
        let log = "Status = Success\nUpper bound = 5\nIterations = 42\nSolver name = HiGHS\n";
        let parsed = parse_log(log);
        assert_eq!(
            parsed.metadata.get("Iterations"),
            Some(&serde_json::Value::from(42))
        );
        assert_eq!(
            parsed.metadata.get("Solver name"),
            Some(&serde_json::Value::from("HiGHS"))
        );
    }

    #[test]
    fn test_empty_log() {
        let parsed = parse_log("");
        assert_eq!(parsed.status, None);
        assert_eq!(parsed.objective, None);
        assert!(parsed.metadata.is_empty());
    }
}
