//! Driver for the external SMS++ solver tools.
//!
//! This crate serializes a [`smspp_model::SMSNetwork`] into the binary
//! container, prepares a solver configuration, runs the chosen SMS++
//! command-line tool as a subprocess, and parses its log into a
//! [`SolveResult`].
//!
//! # Overview
//!
//! - [`SMSConfig`]: built-in or file-based solver configurations
//! - [`SolverDriver`]: launches and supervises a solver run
//! - [`SolverStatus`] / [`SolveResult`]: interpreted outcome
//! - [`SolverError`]: error types for solver operations

mod config;
mod driver;
mod error;
mod log;
mod result;
mod status;

pub use config::SMSConfig;
pub use driver::{OptimizeOptions, SolverDriver, SolverKind};
pub use error::SolverError;
pub use log::{parse_log, ParsedLog};
pub use result::SolveResult;
pub use status::SolverStatus;
