//! Action inputs as a clap surface.
//!
//! The Actions runner exports every workflow input as an `INPUT_*`
//! environment variable; each one is also accepted as a flag so the
//! tool can be driven by hand.

use clap::Parser;
use std::path::PathBuf;

/// Reconcile a GitHub release with a tag reference
#[derive(Parser, Debug, Default)]
#[command(
    name = "release-sync",
    version,
    about = "Create or update a GitHub release for a tag as a CI pipeline step"
)]
pub struct Args {
    /// Tag to attach the release to (a leading refs/tags/ is stripped)
    #[arg(long, env = "INPUT_TAG_NAME", value_name = "TAG")]
    pub tag_name: Option<String>,

    /// Display name of the release (a leading refs/tags/ is stripped)
    #[arg(long, env = "INPUT_RELEASE_NAME", value_name = "NAME")]
    pub release_name: Option<String>,

    /// Inline body text for the release
    #[arg(long, env = "INPUT_BODY", value_name = "TEXT")]
    pub body: Option<String>,

    /// File whose content becomes the release body (wins over --body)
    #[arg(long, env = "INPUT_BODY_PATH", value_name = "PATH")]
    pub body_path: Option<PathBuf>,

    /// Create the release as a draft (the runner passes booleans as strings)
    #[arg(long, env = "INPUT_DRAFT", value_name = "BOOL")]
    pub draft: Option<String>,

    /// Mark the release as a prerelease
    #[arg(long, env = "INPUT_PRERELEASE", value_name = "BOOL")]
    pub prerelease: Option<String>,

    /// Commit the release should point at (defaults to the triggering SHA)
    #[arg(long, env = "INPUT_COMMITISH", value_name = "SHA")]
    pub commitish: Option<String>,

    /// Target repository override: "owner/repo" or a bare repo name
    #[arg(long, env = "INPUT_REPOSITORY", value_name = "OWNER/REPO")]
    pub repository: Option<String>,

    /// Delete and recreate the release when the tag moved to a new commit
    #[arg(long, env = "INPUT_REPLACE_OLD_TAG", value_name = "BOOL")]
    pub replace_old_tag: Option<String>,

    /// Allocate numeric sub-version tags instead of clobbering releases
    #[arg(long, env = "INPUT_AUTO_SUBVERSION", value_name = "BOOL")]
    pub auto_subversion: Option<String>,
}

impl Args {
    /// Parse command line arguments and the runner environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
