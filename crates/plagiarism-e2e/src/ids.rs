// crates/plagiarism-e2e/src/ids.rs
// ============================================================================
// Module: Pipeline Identifiers
// Description: Strongly typed identifiers observed in pipeline responses.
// Purpose: Keep work, file, report, and assignment ids from being mixed up.
// Dependencies: serde, uuid
// ============================================================================

//! ## Overview
//! Identifiers are opaque strings issued by the services under test. They are
//! compared byte-for-byte; the harness never parses or normalizes them. Fresh
//! identifiers generated by the harness itself are UUID v4 based so they are
//! syntactically valid for routes that constrain their parameters to GUIDs.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Declares a serde-transparent string identifier newtype.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw identifier string.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a submitted work.
    WorkId
);
string_id!(
    /// Identifier of a stored file.
    FileId
);
string_id!(
    /// Identifier of a plagiarism report.
    ReportId
);
string_id!(
    /// Identifier of an assignment; plagiarism is scoped per assignment.
    AssignmentId
);

impl WorkId {
    /// Returns a random, syntactically valid work id that was never submitted.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl AssignmentId {
    /// Returns a unique assignment id for one test run (`test-<uuid>`).
    #[must_use]
    pub fn fresh() -> Self {
        Self(format!("test-{}", Uuid::new_v4()))
    }

    /// Returns a distinct assignment id derived from this one (`<id>-other`).
    #[must_use]
    pub fn derived_other(&self) -> Self {
        Self(format!("{}-other", self.0))
    }

    /// Returns an assignment id no work was ever submitted under.
    #[must_use]
    pub fn never_used() -> Self {
        Self(format!("nonexistent-{}", Uuid::new_v4()))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
