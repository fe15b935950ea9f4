//! Subprocess driver for the SMS++ solver tools.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use smspp_model::SMSNetwork;

use crate::config::SMSConfig;
use crate::error::SolverError;
use crate::log::parse_log;
use crate::result::SolveResult;
use crate::status::SolverStatus;

/// Which SMS++ command-line tool to invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverKind {
    UcBlockSolver,
    InvestmentBlockSolver,
    /// The InvestmentBlock regression tester shipped alongside the
    /// production investment solver.
    InvestmentBlockTestSolver,
}

impl SolverKind {
    /// Default executable name of the tool.
    pub fn executable(self) -> &'static str {
        match self {
            SolverKind::UcBlockSolver => "ucblock_solver",
            SolverKind::InvestmentBlockSolver => "investment_solver",
            SolverKind::InvestmentBlockTestSolver => "InvestmentBlock_test",
        }
    }
}

/// Per-run file locations.
#[derive(Debug, Clone)]
pub struct OptimizeOptions {
    /// Where to write the serialized network handed to the solver.
    pub working_file: PathBuf,
    /// Where to persist the captured log, `None` keeps it in memory only.
    pub log_file: Option<PathBuf>,
    /// Where the solver should write its solution container, `None`
    /// skips the output options entirely.
    pub solution_file: Option<PathBuf>,
}

impl OptimizeOptions {
    pub fn new(working_file: impl Into<PathBuf>) -> Self {
        Self {
            working_file: working_file.into(),
            log_file: None,
            solution_file: None,
        }
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn with_solution_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.solution_file = Some(path.into());
        self
    }
}

/// Drives one external solver tool over serialized networks.
#[derive(Debug, Clone)]
pub struct SolverDriver {
    executable: PathBuf,
    kind: SolverKind,
    timeout: Option<Duration>,
    strict: bool,
}

impl SolverDriver {
    /// A driver for the given tool using its default executable name,
    /// resolved through `PATH`.
    pub fn new(kind: SolverKind) -> Self {
        Self {
            executable: PathBuf::from(kind.executable()),
            kind,
            timeout: None,
            strict: false,
        }
    }

    /// Overrides the executable location.
    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = path.into();
        self
    }

    /// Kills the solver once it has run for this long.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// In strict mode a non-success status becomes an error instead of
    /// a result the caller inspects.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn kind(&self) -> SolverKind {
        self.kind
    }

    /// Check if the executable can be spawned at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.executable)
            .arg("-h")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|mut child| {
                let _ = child.wait();
                true
            })
            .unwrap_or(false)
    }

    /// Serializes the network, materializes the configuration, runs the
    /// solver, and interprets its log.
    ///
    /// The log file, when requested, is written whenever the process
    /// actually ran, even for failed runs. A launch failure writes
    /// nothing.
    pub fn optimize(
        &self,
        network: &SMSNetwork,
        config: &SMSConfig,
        options: &OptimizeOptions,
    ) -> Result<SolveResult, SolverError> {
        let started = Instant::now();

        smspp_codec::save(network, &options.working_file)?;
        let config_dir = options
            .working_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let config_path = config.materialize(&config_dir)?;

        let mut command = Command::new(&self.executable);
        command
            .arg(&options.working_file)
            .arg("-c")
            .arg(format!(
                "{}/",
                config_path
                    .parent()
                    .unwrap_or(Path::new("."))
                    .display()
            ))
            .arg("-S")
            .arg(&config_path);
        if let Some(solution) = &options.solution_file {
            command.arg("-o").arg("-O").arg(solution);
        }
        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());

        tracing::info!(
            component = "solver",
            operation = "optimize",
            status = "started",
            kind = ?self.kind,
            executable = %self.executable.display(),
            network = %options.working_file.display(),
            "Launching solver"
        );

        let mut child = command.spawn().map_err(|err| SolverError::ProcessLaunch {
            executable: self.executable.display().to_string(),
            reason: err.to_string(),
        })?;

        let (log, exit_ok) = self.wait_with_timeout(&mut child)?;

        if let Some(log_file) = &options.log_file {
            if let Some(parent) = log_file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(log_file, &log)?;
        }

        let mut result = SolveResult::from_parsed(parse_log(&log), log);
        if !exit_ok {
            result.status = SolverStatus::Error;
            result.objective = None;
        }

        // Gate on the exit status, not the parsed log: a clean run whose
        // log vocabulary the parser does not know still wrote its output.
        if exit_ok {
            if let Some(solution) = &options.solution_file {
                if solution.exists() {
                    result.solution = Some(smspp_codec::load_block(solution)?);
                }
            }
        }

        tracing::info!(
            component = "solver",
            operation = "optimize",
            status = result.status.as_str(),
            objective = result.objective,
            duration_ms = started.elapsed().as_millis() as u64,
            "Solver finished"
        );

        if self.strict && !result.is_success() {
            return Err(SolverError::SolverReported {
                status: result.status,
            });
        }
        Ok(result)
    }

    /// Waits for the child, enforcing the timeout, and returns the
    /// captured log and whether the exit status was zero.
    fn wait_with_timeout(&self, child: &mut Child) -> Result<(String, bool), SolverError> {
        // Drain both pipes on background threads so a chatty solver
        // cannot deadlock against a full pipe buffer.
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let out_handle = thread::spawn(move || read_all(stdout));
        let err_handle = thread::spawn(move || read_all(stderr));

        let status = match self.timeout {
            None => child.wait()?,
            Some(limit) => {
                let deadline = Instant::now() + limit;
                loop {
                    if let Some(status) = child.try_wait()? {
                        break status;
                    }
                    if Instant::now() >= deadline {
                        tracing::warn!(
                            component = "solver",
                            operation = "optimize",
                            status = "timeout",
                            timeout_s = limit.as_secs(),
                            "Killing solver after timeout"
                        );
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(SolverError::ProcessTimeout {
                            seconds: limit.as_secs(),
                        });
                    }
                    thread::sleep(Duration::from_millis(20));
                }
            }
        };

        let mut log = out_handle.join().unwrap_or_default();
        let err_log = err_handle.join().unwrap_or_default();
        if !err_log.is_empty() {
            if !log.is_empty() && !log.ends_with('\n') {
                log.push('\n');
            }
            log.push_str(&err_log);
        }
        Ok((log, status.success()))
    }
}

fn read_all<R: Read>(source: Option<R>) -> String {
    let mut buf = String::new();
    if let Some(mut source) = source {
        let _ = source.read_to_string(&mut buf);
    }
    buf
}
