//! Input resolution and normalization.
//!
//! Raw action inputs are strings the runner copied out of the workflow
//! file; this module turns them into the immutable [`RunConfig`] the
//! reconciler runs against.

use std::path::Path;

use crate::cli::Args;
use crate::context::RunContext;
use crate::error::{Result, SyncError};

/// Ref-namespace prefix stripped from tag and release-name inputs.
const TAG_REF_PREFIX: &str = "refs/tags/";

/// Which reconciliation behavior this run executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Update an existing draft/prerelease in place, otherwise create.
    UpdateInPlace,
    /// Delete and recreate the tag's release when the tag moved to a
    /// different commit; skip all mutations when it did not.
    ReplaceTag,
    /// Allocate numeric sub-version tags (`<tag>.0`, `<tag>.1`, ...)
    /// so an earlier release under the family is never clobbered.
    SubVersion,
}

/// Fully resolved configuration for one reconciliation run.
///
/// Immutable after resolution; owned exclusively by the single run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Target repository owner (after any `repository` override)
    pub owner: String,
    /// Target repository name (after any `repository` override)
    pub repo: String,
    /// Bare tag name used in every remote call
    pub tag: String,
    /// Release display name
    pub name: String,
    /// Release body text, if any
    pub body: Option<String>,
    /// Create the release as a draft
    pub draft: bool,
    /// Mark the release as a prerelease
    pub prerelease: bool,
    /// Commit the release/tag should point at
    pub commitish: String,
    /// Selected reconciliation strategy
    pub strategy: Strategy,
}

impl RunConfig {
    /// Resolve raw action inputs against the triggering run context.
    pub fn resolve(args: &Args, ctx: &RunContext) -> Result<Self> {
        let tag = strip_tag_ref(required(&args.tag_name, "tag_name")?);
        let name = strip_tag_ref(required(&args.release_name, "release_name")?);

        // body_path wins over the inline body when configured; an
        // unreadable file aborts the run rather than shipping a release
        // with the wrong notes.
        let body = match args.body_path.as_deref().filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => Some(read_body_file(path)?),
            None => args.body.clone().filter(|b| !b.is_empty()),
        };

        let (owner, repo) = split_repository(args.repository.as_deref(), &ctx.owner, &ctx.repo);

        let commitish = args
            .commitish
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| ctx.sha.clone());

        // replace_old_tag wins when both policy switches are set.
        let strategy = if parse_flag(args.replace_old_tag.as_deref()) {
            Strategy::ReplaceTag
        } else if parse_flag(args.auto_subversion.as_deref()) {
            Strategy::SubVersion
        } else {
            Strategy::UpdateInPlace
        };

        Ok(Self {
            owner,
            repo,
            tag,
            name,
            body,
            draft: parse_flag(args.draft.as_deref()),
            prerelease: parse_flag(args.prerelease.as_deref()),
            commitish,
            strategy,
        })
    }
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SyncError::MissingInput { name }),
    }
}

/// Strip one leading `refs/tags/`; an already-bare value passes through.
fn strip_tag_ref(value: &str) -> String {
    value.strip_prefix(TAG_REF_PREFIX).unwrap_or(value).to_string()
}

/// The runner passes booleans as strings; only the literal "true" enables.
fn parse_flag(value: Option<&str>) -> bool {
    value == Some("true")
}

fn read_body_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| SyncError::BodyFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply the `repository` override: `owner/repo` replaces both parts,
/// a bare name replaces only the repo, empty keeps the triggering pair.
fn split_repository(input: Option<&str>, owner: &str, repo: &str) -> (String, String) {
    match input.map(str::trim).filter(|v| !v.is_empty()) {
        None => (owner.to_string(), repo.to_string()),
        Some(value) => match value.split_once('/') {
            Some((o, r)) => (o.to_string(), r.to_string()),
            None => (owner.to_string(), value.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn test_context() -> RunContext {
        RunContext {
            token: "token".to_string(),
            sha: "sha1234".to_string(),
            owner: "owner".to_string(),
            repo: "repo".to_string(),
            api_url: "https://api.github.com".to_string(),
        }
    }

    fn base_args() -> Args {
        Args {
            tag_name: Some("refs/tags/v1.10.15".to_string()),
            release_name: Some("refs/tags/v1.10.15".to_string()),
            ..Args::default()
        }
    }

    #[test]
    fn strips_tag_ref_prefix() {
        let config = RunConfig::resolve(&base_args(), &test_context()).unwrap();
        assert_eq!(config.tag, "v1.10.15");
        assert_eq!(config.name, "v1.10.15");
    }

    #[test]
    fn bare_tag_passes_through() {
        let args = Args {
            tag_name: Some("v2.0.0".to_string()),
            release_name: Some("Release two".to_string()),
            ..Args::default()
        };
        let config = RunConfig::resolve(&args, &test_context()).unwrap();
        assert_eq!(config.tag, "v2.0.0");
        assert_eq!(config.name, "Release two");
    }

    #[test]
    fn missing_tag_name_is_reported() {
        let args = Args::default();
        let err = RunConfig::resolve(&args, &test_context()).unwrap_err();
        assert!(matches!(err, SyncError::MissingInput { name: "tag_name" }));
    }

    #[test]
    fn missing_release_name_is_reported() {
        let args = Args {
            tag_name: Some("v1.0.0".to_string()),
            ..Args::default()
        };
        let err = RunConfig::resolve(&args, &test_context()).unwrap_err();
        assert!(matches!(
            err,
            SyncError::MissingInput {
                name: "release_name"
            }
        ));
    }

    #[test]
    fn repository_override_with_owner() {
        let args = Args {
            repository: Some("otherOwner/otherRepo".to_string()),
            ..base_args()
        };
        let config = RunConfig::resolve(&args, &test_context()).unwrap();
        assert_eq!(config.owner, "otherOwner");
        assert_eq!(config.repo, "otherRepo");
    }

    #[test]
    fn repository_override_repo_only() {
        let args = Args {
            repository: Some("otherRepo".to_string()),
            ..base_args()
        };
        let config = RunConfig::resolve(&args, &test_context()).unwrap();
        assert_eq!(config.owner, "owner");
        assert_eq!(config.repo, "otherRepo");
    }

    #[test]
    fn empty_repository_override_keeps_context() {
        let args = Args {
            repository: Some(String::new()),
            ..base_args()
        };
        let config = RunConfig::resolve(&args, &test_context()).unwrap();
        assert_eq!(config.owner, "owner");
        assert_eq!(config.repo, "repo");
    }

    #[test]
    fn flags_require_literal_true() {
        let args = Args {
            draft: Some("true".to_string()),
            prerelease: Some("yes".to_string()),
            ..base_args()
        };
        let config = RunConfig::resolve(&args, &test_context()).unwrap();
        assert!(config.draft);
        assert!(!config.prerelease);
    }

    #[test]
    fn commitish_defaults_to_run_sha() {
        let config = RunConfig::resolve(&base_args(), &test_context()).unwrap();
        assert_eq!(config.commitish, "sha1234");

        let args = Args {
            commitish: Some("deadbeef".to_string()),
            ..base_args()
        };
        let config = RunConfig::resolve(&args, &test_context()).unwrap();
        assert_eq!(config.commitish, "deadbeef");
    }

    #[test]
    fn body_path_wins_over_inline_body() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "release notes from file").unwrap();

        let args = Args {
            body: Some("inline body".to_string()),
            body_path: Some(file.path().to_path_buf()),
            ..base_args()
        };
        let config = RunConfig::resolve(&args, &test_context()).unwrap();
        assert_eq!(config.body.as_deref(), Some("release notes from file"));
    }

    #[test]
    fn unreadable_body_path_aborts() {
        let args = Args {
            body: Some("inline body".to_string()),
            body_path: Some("/nonexistent/notes.md".into()),
            ..base_args()
        };
        let err = RunConfig::resolve(&args, &test_context()).unwrap_err();
        assert!(matches!(err, SyncError::BodyFile { .. }));
    }

    #[test]
    fn replace_old_tag_wins_over_auto_subversion() {
        let args = Args {
            replace_old_tag: Some("true".to_string()),
            auto_subversion: Some("true".to_string()),
            ..base_args()
        };
        let config = RunConfig::resolve(&args, &test_context()).unwrap();
        assert_eq!(config.strategy, Strategy::ReplaceTag);

        let args = Args {
            auto_subversion: Some("true".to_string()),
            ..base_args()
        };
        let config = RunConfig::resolve(&args, &test_context()).unwrap();
        assert_eq!(config.strategy, Strategy::SubVersion);

        let config = RunConfig::resolve(&base_args(), &test_context()).unwrap();
        assert_eq!(config.strategy, Strategy::UpdateInPlace);
    }
}
