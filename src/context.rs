//! Triggering run context read from the Actions runner environment.

use crate::error::{Result, SyncError};

/// Default REST endpoint when the runner does not provide one.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Context of the triggering workflow run.
///
/// Collected once at startup and passed explicitly into the reconciler
/// so the core stays testable without process-environment mutation.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Bearer credential used for every API call
    pub token: String,
    /// Commit SHA the workflow run was triggered for
    pub sha: String,
    /// Owner of the triggering repository
    pub owner: String,
    /// Name of the triggering repository
    pub repo: String,
    /// REST API base URL (`GITHUB_API_URL` on Enterprise runners)
    pub api_url: String,
}

impl RunContext {
    /// Build the context from the standard runner environment.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("GH_TOKEN")
            .or_else(|_| std::env::var("GITHUB_TOKEN"))
            .map_err(|_| SyncError::Context {
                name: "GITHUB_TOKEN",
            })?;
        let sha = std::env::var("GITHUB_SHA").map_err(|_| SyncError::Context {
            name: "GITHUB_SHA",
        })?;
        let repository = std::env::var("GITHUB_REPOSITORY").map_err(|_| SyncError::Context {
            name: "GITHUB_REPOSITORY",
        })?;
        let (owner, repo) = repository.split_once('/').ok_or(SyncError::Context {
            name: "GITHUB_REPOSITORY",
        })?;
        let api_url =
            std::env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            token,
            sha,
            owner: owner.to_string(),
            repo: repo.to_string(),
            api_url,
        })
    }
}
