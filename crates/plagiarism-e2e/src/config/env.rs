// crates/plagiarism-e2e/src/config/env.rs
// ============================================================================
// Module: Harness Environment
// Description: Environment-backed overrides for the harness configuration.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8, empty values, and malformed numbers fail
//! closed. Lookup is injectable so parsing can be exercised without touching
//! the process environment.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use super::settings::ConfigError;
use super::settings::EventLogTarget;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys recognized by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEnv {
    /// Public API base URL override.
    PublicApiUrl,
    /// Checker base URL override.
    CheckerUrl,
    /// File storage base URL override.
    FileStorageUrl,
    /// Optional TOML config file path.
    ConfigPath,
    /// Optional request timeout in seconds (positive integer).
    TimeoutSeconds,
    /// Optional minimum plagiarism score override.
    MinScore,
    /// Optional directory for run artifacts.
    ReportDir,
    /// Optional structured event target (`stderr` or a file path).
    EventLog,
}

impl HarnessEnv {
    /// Every recognized key, in documentation order.
    pub const ALL: [Self; 8] = [
        Self::PublicApiUrl,
        Self::CheckerUrl,
        Self::FileStorageUrl,
        Self::ConfigPath,
        Self::TimeoutSeconds,
        Self::MinScore,
        Self::ReportDir,
        Self::EventLog,
    ];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PublicApiUrl => "PUBLIC_API_URL",
            Self::CheckerUrl => "CHECKER_URL",
            Self::FileStorageUrl => "FILE_STORAGE_URL",
            Self::ConfigPath => "PLAGIARISM_E2E_CONFIG",
            Self::TimeoutSeconds => "PLAGIARISM_E2E_TIMEOUT_SEC",
            Self::MinScore => "PLAGIARISM_E2E_MIN_SCORE",
            Self::ReportDir => "PLAGIARISM_E2E_REPORT_DIR",
            Self::EventLog => "PLAGIARISM_E2E_EVENT_LOG",
        }
    }
}

// ============================================================================
// SECTION: Overrides
// ============================================================================

/// Raw overrides read from the environment, before merging with defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EnvOverrides {
    /// Public API base URL (unparsed).
    pub public_api_url: Option<String>,
    /// Checker base URL (unparsed).
    pub checker_url: Option<String>,
    /// File storage base URL (unparsed).
    pub file_storage_url: Option<String>,
    /// TOML config file path.
    pub config_path: Option<PathBuf>,
    /// Request timeout.
    pub timeout: Option<Duration>,
    /// Minimum plagiarism score.
    pub min_score: Option<f64>,
    /// Run artifact directory.
    pub report_dir: Option<PathBuf>,
    /// Structured event target.
    pub event_log: Option<EventLogTarget>,
}

impl EnvOverrides {
    /// Reads overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is not UTF-8, is empty, or fails
    /// validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(read_env_strict)
    }

    /// Reads overrides through the provided lookup function.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the lookup fails or a value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        let read = |key: HarnessEnv| read_nonempty(&lookup, key.as_str());
        let timeout = read(HarnessEnv::TimeoutSeconds)?
            .map(|value| parse_timeout_seconds(HarnessEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let min_score = read(HarnessEnv::MinScore)?
            .map(|value| parse_score(HarnessEnv::MinScore.as_str(), &value))
            .transpose()?;
        Ok(Self {
            public_api_url: read(HarnessEnv::PublicApiUrl)?,
            checker_url: read(HarnessEnv::CheckerUrl)?,
            file_storage_url: read(HarnessEnv::FileStorageUrl)?,
            config_path: read(HarnessEnv::ConfigPath)?.map(PathBuf::from),
            timeout,
            min_score,
            report_dir: read(HarnessEnv::ReportDir)?.map(PathBuf::from),
            event_log: read(HarnessEnv::EventLog)?.map(|value| EventLogTarget::parse(&value)),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{name} must be valid UTF-8")))
    })
}

/// Reads a value through `lookup` and rejects empty values.
fn read_nonempty<F>(lookup: &F, name: &str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Result<Option<String>, ConfigError>,
{
    match lookup(name)? {
        Some(value) if value.trim().is_empty() => {
            Err(ConfigError::Invalid(format!("{name} must not be empty")))
        }
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

/// Parses a positive timeout value in whole seconds.
///
/// # Errors
///
/// Returns an error when the value is non-numeric or zero.
pub(crate) fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        ConfigError::Invalid(format!("{name} must be a positive integer number of seconds"))
    })?;
    if secs == 0 {
        return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a finite, non-negative plagiarism score.
fn parse_score(name: &str, raw: &str) -> Result<f64, ConfigError> {
    let score: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{name} must be a number")))?;
    if !score.is_finite() || score < 0.0 {
        return Err(ConfigError::Invalid(format!("{name} must be a finite non-negative number")));
    }
    Ok(score)
}
