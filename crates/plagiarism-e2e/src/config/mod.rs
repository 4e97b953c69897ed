// crates/plagiarism-e2e/src/config/mod.rs
// ============================================================================
// Module: Harness Configuration
// Description: Centralized configuration for the plagiarism pipeline harness.
// Purpose: Provide typed access to service endpoints, thresholds, and outputs.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! Harness configuration is layered: built-in defaults, an optional TOML file,
//! environment variables, and finally explicit CLI overrides. The result is a
//! single [`HarnessConfig`] value passed into the orchestrator at start-up.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;
mod settings;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod env_tests;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::EnvOverrides;
pub use env::HarnessEnv;
pub use env::read_env_strict;
pub use settings::ConfigError;
pub use settings::DEFAULT_CHECKER_URL;
pub use settings::DEFAULT_FILE_STORAGE_URL;
pub use settings::DEFAULT_MIN_PLAGIARISM_SCORE;
pub use settings::DEFAULT_PUBLIC_API_URL;
pub use settings::Endpoints;
pub use settings::EventLogTarget;
pub use settings::HarnessConfig;
