//! Solver status values.

/// Outcome reported by an SMS++ solver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverStatus {
    /// The solver finished and produced a solution value.
    Success,
    /// The model is infeasible.
    Infeasible,
    /// The model is unbounded.
    Unbounded,
    /// The solver reported a failure or exited abnormally.
    Error,
    /// The log carried no recognizable status.
    Unknown,
}

impl SolverStatus {
    /// Check if the run produced a usable solution.
    pub fn is_success(self) -> bool {
        matches!(self, SolverStatus::Success)
    }

    /// Check if the status indicates infeasibility.
    pub fn is_infeasible(self) -> bool {
        matches!(self, SolverStatus::Infeasible)
    }

    /// Check if the status indicates unboundedness.
    pub fn is_unbounded(self) -> bool {
        matches!(self, SolverStatus::Unbounded)
    }

    /// Get a human-readable string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::Success => "success",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::Error => "error",
            SolverStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_predicates() {
        assert!(SolverStatus::Success.is_success());
        assert!(!SolverStatus::Infeasible.is_success());
        assert!(SolverStatus::Infeasible.is_infeasible());
        assert!(SolverStatus::Unbounded.is_unbounded());
        assert!(!SolverStatus::Unknown.is_success());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", SolverStatus::Success), "success");
        assert_eq!(SolverStatus::Error.as_str(), "error");
    }
}
