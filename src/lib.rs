//! # release-sync
//!
//! Idempotent GitHub release reconciliation for CI pipelines.
//!
//! Given a tag reference and release metadata, this crate decides
//! whether a release for that tag already exists and, depending on the
//! selected strategy, creates it, updates it in place, deletes and
//! recreates it, or allocates a numeric sub-version tag so an earlier
//! release is never clobbered. The resulting release's id, web URL,
//! and asset-upload URL are handed back to the invoking pipeline step.
//!
//! ## Usage
//!
//! ```bash
//! INPUT_TAG_NAME=refs/tags/v1.2.0 INPUT_RELEASE_NAME="v1.2.0" release-sync
//! release-sync --tag-name v1.2.0 --release-name "v1.2.0" --replace-old-tag true
//! ```
//!
//! All state lives in the remote repository; a run performs at most one
//! reconciliation and keeps nothing between invocations.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod github;
pub mod outputs;
pub mod reconcile;

pub use cli::Args;
pub use config::{RunConfig, Strategy};
pub use context::RunContext;
pub use error::{Result, SyncError};
pub use github::{GitHubClient, ReleaseHost};
pub use outputs::OutputSink;
pub use reconcile::{Outcome, Reconciler, MAX_SUB_VERSION};
