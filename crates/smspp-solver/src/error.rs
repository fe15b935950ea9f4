//! Solver error types.

use smspp_codec::CodecError;

use crate::status::SolverStatus;

/// Errors raised while preparing, launching, or interpreting a solver run.
#[derive(Debug)]
pub enum SolverError {
    /// No built-in configuration template carries this name.
    ConfigNotFound {
        name: String,
        available: Vec<&'static str>,
    },
    /// The model could not be serialized for the solver.
    Serialization(CodecError),
    /// The solver executable could not be started.
    ProcessLaunch { executable: String, reason: String },
    /// The solver exceeded the configured wall-clock limit and was killed.
    ProcessTimeout { seconds: u64 },
    /// Strict mode: the solver finished with a non-success status.
    SolverReported { status: SolverStatus },
    /// Filesystem failure around the working directory or output files.
    Io(std::io::Error),
}

impl SolverError {
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            SolverError::Serialization(_) => "SOLVER_SERIALIZATION",
            SolverError::ProcessLaunch { .. } => "PROCESS_LAUNCH",
            SolverError::ProcessTimeout { .. } => "PROCESS_TIMEOUT",
            SolverError::SolverReported { .. } => "SOLVER_REPORTED",
            SolverError::Io(_) => "SOLVER_IO",
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::ConfigNotFound { name, available } => write!(
                f,
                "[{}] Unknown configuration template '{}' (available: {})",
                self.code(),
                name,
                available.join(", ")
            ),
            SolverError::Serialization(err) => {
                write!(f, "[{}] Failed to serialize model: {}", self.code(), err)
            }
            SolverError::ProcessLaunch { executable, reason } => write!(
                f,
                "[{}] Failed to launch solver '{}': {}",
                self.code(),
                executable,
                reason
            ),
            SolverError::ProcessTimeout { seconds } => write!(
                f,
                "[{}] Solver exceeded the {}s time limit and was killed",
                self.code(),
                seconds
            ),
            SolverError::SolverReported { status } => write!(
                f,
                "[{}] Solver finished with status '{}'",
                self.code(),
                status
            ),
            SolverError::Io(err) => write!(f, "[{}] I/O error: {}", self.code(), err),
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::Serialization(err) => Some(err),
            SolverError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CodecError> for SolverError {
    fn from(err: CodecError) -> Self {
        SolverError::Serialization(err)
    }
}

impl From<std::io::Error> for SolverError {
    fn from(err: std::io::Error) -> Self {
        SolverError::Io(err)
    }
}
