// crates/plagiarism-e2e/src/config/env_tests.rs
// ============================================================================
// Module: Harness Env Unit Tests
// Description: Unit coverage for strict environment parsing.
// Purpose: Ensure environment overrides fail closed on invalid inputs.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Unit coverage for strict environment parsing.
//! Invariants:
//! - Empty, non-numeric, and zero values are rejected.
//! - Lookups never touch the real process environment.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use super::ConfigError;
use super::EnvOverrides;
use super::EventLogTarget;
use super::HarnessEnv;

fn lookup_from(
    pairs: &[(HarnessEnv, &str)],
) -> impl Fn(&str) -> Result<Option<String>, ConfigError> {
    let map: BTreeMap<&'static str, String> =
        pairs.iter().map(|(key, value)| (key.as_str(), (*value).to_string())).collect();
    move |name| Ok(map.get(name).cloned())
}

#[test]
fn env_names_match_documented_keys() {
    let names: Vec<&str> = HarnessEnv::ALL.iter().map(|key| key.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "PUBLIC_API_URL",
            "CHECKER_URL",
            "FILE_STORAGE_URL",
            "PLAGIARISM_E2E_CONFIG",
            "PLAGIARISM_E2E_TIMEOUT_SEC",
            "PLAGIARISM_E2E_MIN_SCORE",
            "PLAGIARISM_E2E_REPORT_DIR",
            "PLAGIARISM_E2E_EVENT_LOG",
        ]
    );
}

#[test]
fn absent_values_produce_empty_overrides() {
    let overrides = EnvOverrides::from_lookup(lookup_from(&[])).expect("overrides");
    assert_eq!(overrides, EnvOverrides::default());
}

#[test]
fn timeout_rejects_invalid_values() {
    for raw in ["0", "not-a-number", "   ", "-3"] {
        let result = EnvOverrides::from_lookup(lookup_from(&[(HarnessEnv::TimeoutSeconds, raw)]));
        assert!(result.is_err(), "timeout {raw:?} should be rejected");
    }
}

#[test]
fn timeout_accepts_positive_values() {
    let overrides =
        EnvOverrides::from_lookup(lookup_from(&[(HarnessEnv::TimeoutSeconds, " 5 ")])).unwrap();
    assert_eq!(overrides.timeout, Some(Duration::from_secs(5)));
}

#[test]
fn min_score_rejects_negative_and_non_finite() {
    for raw in ["-1", "NaN", "inf", "high"] {
        let result = EnvOverrides::from_lookup(lookup_from(&[(HarnessEnv::MinScore, raw)]));
        assert!(result.is_err(), "score {raw:?} should be rejected");
    }
    let overrides =
        EnvOverrides::from_lookup(lookup_from(&[(HarnessEnv::MinScore, "87.5")])).unwrap();
    assert_eq!(overrides.min_score, Some(87.5));
}

#[test]
fn empty_values_fail_closed() {
    let result = EnvOverrides::from_lookup(lookup_from(&[(HarnessEnv::PublicApiUrl, "")]));
    assert!(matches!(result, Err(ConfigError::Invalid(message)) if message.contains("PUBLIC_API_URL")));
}

#[test]
fn lookup_errors_propagate() {
    let result = EnvOverrides::from_lookup(|_| Err(ConfigError::Invalid("bad utf-8".into())));
    assert_eq!(result, Err(ConfigError::Invalid("bad utf-8".into())));
}

#[test]
fn event_log_parses_stderr_and_paths() {
    let overrides =
        EnvOverrides::from_lookup(lookup_from(&[(HarnessEnv::EventLog, "STDERR")])).unwrap();
    assert_eq!(overrides.event_log, Some(EventLogTarget::Stderr));

    let overrides =
        EnvOverrides::from_lookup(lookup_from(&[(HarnessEnv::EventLog, "/tmp/events.jsonl")]))
            .unwrap();
    assert_eq!(overrides.event_log, Some(EventLogTarget::File(PathBuf::from("/tmp/events.jsonl"))));
}
