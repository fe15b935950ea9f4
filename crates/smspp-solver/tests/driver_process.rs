//! End-to-end driver tests against scripted stand-in solver executables.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use smspp_model::{DuplicatePolicy, SMSFileType, SMSNetwork, VarData, Variable};
use smspp_solver::{OptimizeOptions, SMSConfig, SolverDriver, SolverKind, SolverStatus};

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn demo_network() -> SMSNetwork {
    let mut net = SMSNetwork::new(SMSFileType::BlockFile);
    let uc = net
        .root_mut()
        .add_child("UCBlock", "Block_0", Vec::new(), DuplicatePolicy::Reject)
        .unwrap();
    uc.add_dimension("TimeHorizon", 24, DuplicatePolicy::Reject)
        .unwrap();
    uc.add_variable(
        Variable::new(
            "ActivePowerDemand",
            vec!["TimeHorizon".to_string()],
            VarData::vec_float(vec![50.0; 24]),
        ),
        DuplicatePolicy::Reject,
    )
    .unwrap();
    net
}

#[test]
fn successful_run_parses_log_and_writes_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let exe = write_script(
        dir.path(),
        "fake_uc_solver",
        "echo 'Status = Success'\n\
         echo 'Upper bound = 1200.5'\n\
         echo 'Lower bound = 1200.5'\n\
         echo 'Elapsed time = 0.01 s'\n",
    );

    let driver = SolverDriver::new(SolverKind::UcBlockSolver).with_executable(&exe);
    let options = OptimizeOptions::new(dir.path().join("net.smsc"))
        .with_log_file(dir.path().join("run.log"));
    let config = SMSConfig::from_template("uc_solverconfig").unwrap();

    let result = driver.optimize(&demo_network(), &config, &options).unwrap();
    assert_eq!(result.status, SolverStatus::Success);
    assert_eq!(result.objective, Some(1200.5));
    assert_eq!(result.lower_bound, Some(1200.5));
    assert_eq!(result.elapsed_seconds, Some(0.01));

    // Side effects: the serialized network, the materialized config,
    // and the persisted log all exist.
    assert!(dir.path().join("net.smsc").exists());
    assert!(dir.path().join("uc_solverconfig.txt").exists());
    let log = fs::read_to_string(dir.path().join("run.log")).unwrap();
    assert!(log.contains("Upper bound = 1200.5"));
}

#[test]
fn solver_receives_network_and_config_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let exe = write_script(
        dir.path(),
        "arg_echo_solver",
        "echo \"argv = $*\"\necho 'Status = Success'\necho 'Upper bound = 1'\n",
    );

    let driver = SolverDriver::new(SolverKind::UcBlockSolver).with_executable(&exe);
    let options = OptimizeOptions::new(dir.path().join("net.smsc"));
    let config = SMSConfig::from_template("uc_solverconfig").unwrap();

    let result = driver.optimize(&demo_network(), &config, &options).unwrap();
    assert!(result.log.contains("net.smsc"));
    assert!(result.log.contains("-S"));
    assert!(result.log.contains("uc_solverconfig.txt"));
}

#[test]
fn infeasible_run_clears_objective() {
    let dir = tempfile::tempdir().unwrap();
    let exe = write_script(
        dir.path(),
        "fake_infeasible",
        "echo 'Status: INFEASIBLE'\n",
    );

    let driver = SolverDriver::new(SolverKind::UcBlockSolver).with_executable(&exe);
    let options = OptimizeOptions::new(dir.path().join("net.smsc"));
    let config = SMSConfig::from_template("uc_solverconfig").unwrap();

    let result = driver.optimize(&demo_network(), &config, &options).unwrap();
    assert_eq!(result.status, SolverStatus::Infeasible);
    assert_eq!(result.objective, None);
}

#[test]
fn strict_mode_turns_failure_into_error() {
    let dir = tempfile::tempdir().unwrap();
    let exe = write_script(dir.path(), "fake_infeasible", "echo 'Status: INFEASIBLE'\n");

    let driver = SolverDriver::new(SolverKind::UcBlockSolver)
        .with_executable(&exe)
        .with_strict(true);
    let options = OptimizeOptions::new(dir.path().join("net.smsc"));
    let config = SMSConfig::from_template("uc_solverconfig").unwrap();

    let err = driver
        .optimize(&demo_network(), &config, &options)
        .unwrap_err();
    assert_eq!(err.code(), "SOLVER_REPORTED");
}

#[test]
fn nonzero_exit_is_error_status() {
    let dir = tempfile::tempdir().unwrap();
    let exe = write_script(
        dir.path(),
        "fake_crash",
        "echo 'partial output' >&2\nexit 3\n",
    );

    let driver = SolverDriver::new(SolverKind::UcBlockSolver).with_executable(&exe);
    let options = OptimizeOptions::new(dir.path().join("net.smsc"))
        .with_log_file(dir.path().join("crash.log"));
    let config = SMSConfig::from_template("uc_solverconfig").unwrap();

    let result = driver.optimize(&demo_network(), &config, &options).unwrap();
    assert_eq!(result.status, SolverStatus::Error);
    assert_eq!(result.objective, None);
    // The process ran, so the log file is still written.
    assert!(fs::read_to_string(dir.path().join("crash.log"))
        .unwrap()
        .contains("partial output"));
}

#[test]
fn launch_failure_writes_no_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("never.log");

    let driver = SolverDriver::new(SolverKind::UcBlockSolver)
        .with_executable(dir.path().join("does_not_exist"));
    let options = OptimizeOptions::new(dir.path().join("net.smsc"))
        .with_log_file(&log_file);
    let config = SMSConfig::from_template("uc_solverconfig").unwrap();

    let err = driver
        .optimize(&demo_network(), &config, &options)
        .unwrap_err();
    assert_eq!(err.code(), "PROCESS_LAUNCH");
    assert!(!log_file.exists());
}

#[test]
fn timeout_kills_hanging_solver() {
    let dir = tempfile::tempdir().unwrap();
    let exe = write_script(dir.path(), "fake_hang", "sleep 30\n");

    let driver = SolverDriver::new(SolverKind::UcBlockSolver)
        .with_executable(&exe)
        .with_timeout(Duration::from_millis(200));
    let options = OptimizeOptions::new(dir.path().join("net.smsc"));
    let config = SMSConfig::from_template("uc_solverconfig").unwrap();

    let started = std::time::Instant::now();
    let err = driver
        .optimize(&demo_network(), &config, &options)
        .unwrap_err();
    assert_eq!(err.code(), "PROCESS_TIMEOUT");
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn solution_file_is_decoded_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let solution_path = dir.path().join("solution.smsc");

    // Pre-encode a solution container the script "produces" by leaving
    // it in place; the driver only reads it after a successful run.
    let solution_net = SMSNetwork::new(SMSFileType::SolutionFile);
    smspp_codec::save(&solution_net, &solution_path).unwrap();

    let exe = write_script(
        dir.path(),
        "fake_with_solution",
        "echo 'Status = Success'\necho 'Upper bound = 7'\n",
    );

    let driver = SolverDriver::new(SolverKind::UcBlockSolver).with_executable(&exe);
    let options = OptimizeOptions::new(dir.path().join("net.smsc"))
        .with_solution_file(&solution_path);
    let config = SMSConfig::from_template("uc_solverconfig").unwrap();

    let result = driver.optimize(&demo_network(), &config, &options).unwrap();
    let solution = result.solution.expect("solution should be decoded");
    assert!(solution.attribute(smspp_model::FILE_TYPE_ATTR).is_some());
}

#[test]
fn solution_file_is_decoded_when_exit_is_clean_despite_odd_status_word() {
    let dir = tempfile::tempdir().unwrap();
    let solution_path = dir.path().join("solution.smsc");

    let solution_net = SMSNetwork::new(SMSFileType::SolutionFile);
    smspp_codec::save(&solution_net, &solution_path).unwrap();

    // The tool exits cleanly but logs a status word outside the known
    // vocabulary; its output file must still be picked up.
    let exe = write_script(
        dir.path(),
        "fake_odd_status",
        "echo 'Status = kStopTime'\necho 'Upper bound = 9.5'\n",
    );

    let driver = SolverDriver::new(SolverKind::UcBlockSolver).with_executable(&exe);
    let options = OptimizeOptions::new(dir.path().join("net.smsc"))
        .with_solution_file(&solution_path);
    let config = SMSConfig::from_template("uc_solverconfig").unwrap();

    let result = driver.optimize(&demo_network(), &config, &options).unwrap();
    assert_eq!(result.status, SolverStatus::Unknown);
    assert!(result.solution.is_some());
}
