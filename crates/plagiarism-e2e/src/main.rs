// crates/plagiarism-e2e/src/main.rs
// ============================================================================
// Module: Plagiarism E2E CLI Entry Point
// Description: Runs the fixed scenario sequence against a live pipeline.
// Purpose: Provide a CI-friendly binary with a meaningful exit status.
// Dependencies: clap, plagiarism-e2e, thiserror, tokio
// ============================================================================

//! ## Overview
//! With no arguments the binary loads configuration from the environment,
//! runs every scenario in order, prints progress and a final banner to stdout,
//! and exits non-zero unless every scenario passed. Flags only redirect
//! configuration and artifacts; none changes the scenario sequence.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use plagiarism_e2e::Orchestrator;
use plagiarism_e2e::PipelineClient;
use plagiarism_e2e::config::EventLogTarget;
use plagiarism_e2e::config::HarnessConfig;
use plagiarism_e2e::events::sink_for;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "plagiarism-e2e", about = "End-to-end checks for the plagiarism pipeline")]
struct Cli {
    /// TOML config file (overrides `PLAGIARISM_E2E_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Directory receiving `summary.json` and `summary.md`.
    #[arg(long, value_name = "DIR")]
    report_dir: Option<PathBuf>,
    /// Structured event target: `stderr` or a file path.
    #[arg(long, value_name = "TARGET")]
    event_log: Option<String>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for setup failures.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Loads configuration, runs the scenarios, and writes artifacts.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let mut config = HarnessConfig::load(cli.config.as_deref())
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    if let Some(dir) = cli.report_dir {
        config.report_dir = Some(dir);
    }
    if let Some(raw) = cli.event_log.as_deref() {
        config.event_log = Some(EventLogTarget::parse(raw));
    }

    let events = sink_for(config.event_log.as_ref())
        .map_err(|err| CliError::new(format!("failed to open event log: {err}")))?;
    let client = PipelineClient::new(&config, events.clone())
        .map_err(|err| CliError::new(err.to_string()))?;

    let mut orchestrator = Orchestrator::new(&config, client, events, std::io::stdout());
    let report = orchestrator.run().await;

    if let Some(dir) = config.report_dir.as_deref() {
        let written = report.write_artifacts(dir).map_err(|err| {
            CliError::new(format!("failed to write report to {}: {err}", dir.display()))
        })?;
        for path in written {
            write_stdout_line(&format!("wrote {}", path.display()))
                .map_err(|err| CliError::new(format!("failed to write stdout: {err}")))?;
        }
    }

    Ok(if report.passed() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
