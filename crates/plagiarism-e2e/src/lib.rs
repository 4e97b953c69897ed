// crates/plagiarism-e2e/src/lib.rs
// ============================================================================
// Module: Plagiarism E2E Library
// Description: Verification harness for the file store, checker, and public API.
// Purpose: Exercise the externally observable plagiarism pipeline contract.
// Dependencies: reqwest, serde, thiserror, tokio, url, uuid
// ============================================================================

//! ## Overview
//! This crate drives a fixed, ordered sequence of end-to-end scenarios against
//! a running plagiarism pipeline (file store, checker, public API) and reports
//! pass/fail with enough diagnostic text to act on a failure without
//! re-running. The services themselves are external collaborators; only their
//! HTTP contract is consumed.
//!
//! Layering, leaves first:
//! - [`verify`]: status and field-presence assertions plus the error taxonomy.
//! - [`client`]: one thin request builder per consumed service operation.
//! - [`scenarios`]: one behavioral contract per scenario.
//! - [`runner`]: the sequential orchestrator producing a [`report::RunReport`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod config;
pub mod events;
pub mod ids;
pub mod model;
pub mod report;
pub mod runner;
pub mod scenarios;
pub mod verify;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use client::PipelineClient;
pub use config::HarnessConfig;
pub use report::RunReport;
pub use runner::Orchestrator;
pub use verify::HarnessError;
pub use verify::HarnessResult;
