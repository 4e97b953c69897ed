// crates/plagiarism-e2e/src/config/settings.rs
// ============================================================================
// Module: Harness Settings
// Description: Layered configuration loading and validation.
// Purpose: Merge defaults, TOML file, and env overrides into one typed value.
// Dependencies: serde, toml, url, thiserror
// ============================================================================

//! ## Overview
//! [`HarnessConfig`] is resolved once at start-up and handed to the
//! orchestrator; nothing reads process-wide defaults after that point.
//! Precedence, lowest first: built-in defaults, TOML file, environment, CLI.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

use super::env::EnvOverrides;
use super::env::HarnessEnv;
use super::env::read_env_strict;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default public API base URL.
pub const DEFAULT_PUBLIC_API_URL: &str = "http://localhost:5050";
/// Default checker base URL.
pub const DEFAULT_CHECKER_URL: &str = "http://localhost:5010";
/// Default file storage base URL.
pub const DEFAULT_FILE_STORAGE_URL: &str = "http://localhost:5020";
/// Minimum score a plagiarism-flagged report must reach.
pub const DEFAULT_MIN_PLAGIARISM_SCORE: f64 = 100.0;
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Literal selecting the stderr event sink.
const EVENT_LOG_STDERR: &str = "stderr";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// I/O error while reading the config file.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parse error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration value.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Base URLs of the three services under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoints {
    /// Public API base URL.
    pub public_api_url: Url,
    /// Checker base URL.
    pub checker_url: Url,
    /// File storage base URL.
    pub file_storage_url: Url,
}

/// Destination for structured JSON-lines events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventLogTarget {
    /// Write events to standard error.
    Stderr,
    /// Append events to a file.
    File(PathBuf),
}

impl EventLogTarget {
    /// Parses a target: the literal `stderr` or a file path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case(EVENT_LOG_STDERR) {
            Self::Stderr
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

/// Fully resolved harness configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    /// Service base URLs.
    pub endpoints: Endpoints,
    /// Optional per-request timeout; `None` keeps the HTTP client default.
    pub request_timeout: Option<Duration>,
    /// Minimum score required on a plagiarism-flagged report.
    pub min_plagiarism_score: f64,
    /// Optional directory receiving `summary.json` and `summary.md`.
    pub report_dir: Option<PathBuf>,
    /// Optional structured event target.
    pub event_log: Option<EventLogTarget>,
}

/// On-disk TOML representation; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    /// Public API base URL.
    public_api_url: Option<String>,
    /// Checker base URL.
    checker_url: Option<String>,
    /// File storage base URL.
    file_storage_url: Option<String>,
    /// Request timeout in seconds.
    request_timeout_sec: Option<u64>,
    /// Minimum plagiarism score.
    min_plagiarism_score: Option<f64>,
    /// Run artifact directory.
    report_dir: Option<PathBuf>,
    /// Structured event target.
    event_log: Option<String>,
}

impl HarnessConfig {
    /// Returns the built-in defaults (local ports, score threshold 100).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a default URL fails to parse.
    pub fn defaults() -> Result<Self, ConfigError> {
        Ok(Self {
            endpoints: Endpoints {
                public_api_url: parse_url("public_api_url", DEFAULT_PUBLIC_API_URL)?,
                checker_url: parse_url("checker_url", DEFAULT_CHECKER_URL)?,
                file_storage_url: parse_url("file_storage_url", DEFAULT_FILE_STORAGE_URL)?,
            },
            request_timeout: None,
            min_plagiarism_score: DEFAULT_MIN_PLAGIARISM_SCORE,
            report_dir: None,
            event_log: None,
        })
    }

    /// Loads configuration from the optional file and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, read_env_strict)
    }

    /// Loads configuration using `lookup` in place of the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        let env = EnvOverrides::from_lookup(lookup)?;
        let file_path = path.map(Path::to_path_buf).or_else(|| env.config_path.clone());
        let mut config = Self::defaults()?;
        if let Some(file_path) = file_path {
            config.apply_file(read_config_file(&file_path)?)?;
        }
        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document and layers it over the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on parse or validation failure.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        let mut config = Self::defaults()?;
        config.apply_file(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_plagiarism_score.is_finite() || self.min_plagiarism_score < 0.0 {
            return Err(ConfigError::Invalid(
                "min_plagiarism_score must be a finite non-negative number".to_string(),
            ));
        }
        if self.request_timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(ConfigError::Invalid("request timeout must be greater than zero".into()));
        }
        Ok(())
    }

    /// Applies file values over the current settings.
    fn apply_file(&mut self, file: ConfigFile) -> Result<(), ConfigError> {
        if let Some(raw) = file.public_api_url {
            self.endpoints.public_api_url = parse_url("public_api_url", &raw)?;
        }
        if let Some(raw) = file.checker_url {
            self.endpoints.checker_url = parse_url("checker_url", &raw)?;
        }
        if let Some(raw) = file.file_storage_url {
            self.endpoints.file_storage_url = parse_url("file_storage_url", &raw)?;
        }
        if let Some(secs) = file.request_timeout_sec {
            if secs == 0 {
                return Err(ConfigError::Invalid("request_timeout_sec must be greater than zero".into()));
            }
            self.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(score) = file.min_plagiarism_score {
            self.min_plagiarism_score = score;
        }
        if let Some(dir) = file.report_dir {
            self.report_dir = Some(dir);
        }
        if let Some(raw) = file.event_log {
            self.event_log = Some(EventLogTarget::parse(&raw));
        }
        Ok(())
    }

    /// Applies environment overrides over the current settings.
    fn apply_env(&mut self, env: EnvOverrides) -> Result<(), ConfigError> {
        if let Some(raw) = env.public_api_url {
            self.endpoints.public_api_url = parse_url(HarnessEnv::PublicApiUrl.as_str(), &raw)?;
        }
        if let Some(raw) = env.checker_url {
            self.endpoints.checker_url = parse_url(HarnessEnv::CheckerUrl.as_str(), &raw)?;
        }
        if let Some(raw) = env.file_storage_url {
            self.endpoints.file_storage_url =
                parse_url(HarnessEnv::FileStorageUrl.as_str(), &raw)?;
        }
        if env.timeout.is_some() {
            self.request_timeout = env.timeout;
        }
        if let Some(score) = env.min_score {
            self.min_plagiarism_score = score;
        }
        if env.report_dir.is_some() {
            self.report_dir = env.report_dir;
        }
        if env.event_log.is_some() {
            self.event_log = env.event_log;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads and decodes a TOML config file with a size limit.
fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let bytes = fs::read(path)
        .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
    if bytes.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
    }
    let content = std::str::from_utf8(&bytes)
        .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
    toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
}

/// Parses a service base URL; only `http` and `https` are accepted.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] for malformed or non-HTTP URLs.
pub(crate) fn parse_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|err| ConfigError::Invalid(format!("{name} is not a valid url: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid(format!("{name} must use http or https")));
    }
    if url.cannot_be_a_base() {
        return Err(ConfigError::Invalid(format!("{name} must be a base url")));
    }
    Ok(url)
}
