//! Error types for release reconciliation runs.
//!
//! A remote 404 is not represented here: the lookups that expect one
//! return `Option` and convert at the call site, so "not found" can
//! never propagate as a failure.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release-sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

/// Main error type for a reconciliation run
#[derive(Error, Debug)]
pub enum SyncError {
    /// A required action input was not provided
    #[error("Missing required input: {name}")]
    MissingInput {
        /// Input key as written in the workflow file
        name: &'static str,
    },

    /// A required runner context variable was not provided or unusable
    #[error("Missing runner context: {name}")]
    Context {
        /// Environment variable name
        name: &'static str,
    },

    /// The configured API base URL does not parse
    #[error("Invalid API base URL '{value}': {source}")]
    InvalidApiUrl {
        /// Configured URL value
        value: String,
        /// Parse failure
        #[source]
        source: url::ParseError,
    },

    /// The remote API answered with an error status other than 404
    #[error("GitHub API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the API error body, or the raw body text
        message: String,
    },

    /// Transport-level HTTP failure
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured body file could not be read
    #[error("Failed to read body file {path}: {source}")]
    BodyFile {
        /// Configured body_path value
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// An existing tag in a sub-version family has no numeric suffix
    #[error("Tag '{tag}' does not match the expected '<base>.<n>' pattern")]
    MalformedTagName {
        /// Offending tag name
        tag: String,
    },

    /// Every candidate sub-version slot under the bound is taken
    #[error("No free sub-version slot for '{base}' within {limit} candidates")]
    SubVersionsExhausted {
        /// Base tag the sub-versions derive from
        base: String,
        /// Candidate bound
        limit: u32,
    },

    /// IO failure while writing step outputs
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
