//! Release reconciliation: decide whether the tag's release gets
//! created fresh, updated in place, deleted and recreated, or moved to
//! the next numeric sub-version slot, then execute that decision.
//!
//! Every exit path leaves the remote in a consistent state: deletes
//! always remove the release before its tag (never the reverse, so a
//! tag without a release is never the lingering state we create), and
//! each run performs at most one create or update.

use log::{debug, info};

use crate::config::{RunConfig, Strategy};
use crate::error::{Result, SyncError};
use crate::github::{GitRef, NewRelease, Release, ReleaseHost, ReleaseUpdate, RELEASES_PER_PAGE};

/// Upper bound on probed numeric sub-version suffixes.
pub const MAX_SUB_VERSION: u32 = 100;

/// The externally observable product of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Release identifier
    pub id: u64,
    /// Web URL of the release page
    pub html_url: String,
    /// Asset-upload URL
    pub upload_url: String,
}

impl From<Release> for Outcome {
    fn from(release: Release) -> Self {
        Self {
            id: release.id,
            html_url: release.html_url,
            upload_url: release.upload_url,
        }
    }
}

/// Drives one reconciliation run against a remote host.
pub struct Reconciler<'a, H> {
    host: &'a H,
    config: &'a RunConfig,
    run_sha: &'a str,
}

impl<'a, H: ReleaseHost> Reconciler<'a, H> {
    /// Create a reconciler over the given host and resolved configuration.
    pub fn new(host: &'a H, config: &'a RunConfig, run_sha: &'a str) -> Self {
        Self {
            host,
            config,
            run_sha,
        }
    }

    /// Execute the selected strategy and return the outcome triple.
    pub async fn run(&self) -> Result<Outcome> {
        match self.config.strategy {
            Strategy::UpdateInPlace => self.update_in_place().await,
            Strategy::ReplaceTag => self.replace_tag().await,
            Strategy::SubVersion => self.sub_version().await,
        }
    }

    fn new_release(&self, tag: &str) -> NewRelease {
        NewRelease {
            tag_name: tag.to_string(),
            name: self.config.name.clone(),
            body: self.config.body.clone(),
            draft: self.config.draft,
            prerelease: self.config.prerelease,
            target_commitish: Some(self.config.commitish.clone()),
        }
    }

    /// Refine an in-progress release instead of multiplying releases:
    /// a draft/prerelease carrying the tag is updated in place, anything
    /// else means a plain create.
    async fn update_in_place(&self) -> Result<Outcome> {
        if let Some(existing) = self.find_mutable_release().await? {
            info!(
                "updating draft/prerelease release {} for tag {} in place",
                existing.id, self.config.tag
            );
            let update = ReleaseUpdate {
                tag_name: self.config.tag.clone(),
                name: self.config.name.clone(),
                body: self.config.body.clone(),
                draft: self.config.draft,
                prerelease: self.config.prerelease,
            };
            let release = self.host.update_release(existing.id, &update).await?;
            return Ok(release.into());
        }

        // A finalized release on this tag is deliberately not matched;
        // when one exists the remote rejects this create and that
        // rejection is the run's failure.
        debug!("no mutable release for tag {}; creating", self.config.tag);
        let release = self
            .host
            .create_release(&self.new_release(&self.config.tag))
            .await?;
        Ok(release.into())
    }

    /// First draft or prerelease carrying the tag, scanning page by
    /// page and stopping at the first hit rather than materializing
    /// the full listing.
    async fn find_mutable_release(&self) -> Result<Option<Release>> {
        let mut page = 1;
        loop {
            let releases = self.host.list_releases(page).await?;
            let count = releases.len();
            let hit = releases
                .into_iter()
                .find(|r| r.tag_name == self.config.tag && (r.draft || r.prerelease));
            if hit.is_some() {
                return Ok(hit);
            }
            if count < RELEASES_PER_PAGE as usize {
                return Ok(None);
            }
            page += 1;
        }
    }

    /// Replace-old-tag policy: a tag pinned to this run's commit is
    /// already correct and gets zero mutations; a tag pinned elsewhere
    /// has its release and ref deleted, then the release is recreated
    /// under the same name.
    async fn replace_tag(&self) -> Result<Outcome> {
        let tag = &self.config.tag;

        let Some(existing_ref) = self.host.get_tag_ref(tag).await? else {
            debug!("tag {tag} does not exist; creating fresh release");
            let release = self.host.create_release(&self.new_release(tag)).await?;
            return Ok(release.into());
        };

        if existing_ref.object.sha == self.run_sha {
            info!("tag {tag} already points at {}; nothing to replace", self.run_sha);
            return match self.host.get_release_by_tag(tag).await? {
                Some(release) => Ok(release.into()),
                // Tag without a release is partial state left by an
                // interrupted run; attach a release to the existing tag.
                None => {
                    let release = self.host.create_release(&self.new_release(tag)).await?;
                    Ok(release.into())
                }
            };
        }

        info!(
            "tag {tag} points at {}, run is at {}; replacing",
            existing_ref.object.sha, self.run_sha
        );
        if let Some(stale) = self.host.get_release_by_tag(tag).await? {
            self.host.delete_release(stale.id).await?;
        }
        self.host.delete_tag_ref(tag).await?;
        let release = self.host.create_release(&self.new_release(tag)).await?;
        Ok(release.into())
    }

    /// Sub-versioning policy: releases live under `<base>.<n>` tags.
    /// The first free slot is `.0`; when the family already has members
    /// the highest one is retired and the next slot allocated.
    async fn sub_version(&self) -> Result<Outcome> {
        let base = &self.config.tag;
        let first = format!("{base}.0");

        // Any ref already matching the first slot's name (including
        // partial matches like `<base>.01`) makes a direct create
        // ambiguous; skip straight to the probe.
        let guard = self.host.list_matching_tag_refs(&first).await?;
        if guard.is_empty() {
            match self.host.create_release(&self.new_release(&first)).await {
                Ok(release) => return Ok(release.into()),
                Err(SyncError::Api { status, message }) => {
                    debug!("direct create of {first} rejected (HTTP {status}: {message}); probing");
                }
                Err(other) => return Err(other),
            }
        }

        match self.highest_sub_version(base).await? {
            Some((n, stale)) => {
                let next = n + 1;
                if next >= MAX_SUB_VERSION {
                    return Err(SyncError::SubVersionsExhausted {
                        base: base.clone(),
                        limit: MAX_SUB_VERSION,
                    });
                }
                let stale_tag = format!("{base}.{n}");
                let next_tag = format!("{base}.{next}");
                info!("retiring sub-version {stale_tag}, allocating {next_tag}");
                self.host.delete_release(stale.id).await?;
                self.host.delete_tag_ref(&stale_tag).await?;
                let release = self.host.create_release(&self.new_release(&next_tag)).await?;
                Ok(release.into())
            }
            None => self.recover_orphaned_tag(base).await,
        }
    }

    /// Highest allocated sub-version, found by walking the slots
    /// upward within the bound and remembering the last one that still
    /// carries a release.
    async fn highest_sub_version(&self, base: &str) -> Result<Option<(u32, Release)>> {
        let mut highest = None;
        for n in 0..MAX_SUB_VERSION {
            match self.host.get_release_by_tag(&format!("{base}.{n}")).await? {
                Some(release) => highest = Some((n, release)),
                None if highest.is_some() => break,
                None => {}
            }
        }
        Ok(highest)
    }

    /// No slot in the family carries a release, yet creating at `.0`
    /// was not possible: the family holds tags without releases.
    /// Resolve the highest such tag, drop its ref, and allocate the
    /// next slot.
    async fn recover_orphaned_tag(&self, base: &str) -> Result<Outcome> {
        let family = self
            .host
            .list_matching_tag_refs(&format!("{base}."))
            .await?;

        let mut highest: Option<u32> = None;
        for git_ref in &family {
            let suffix = parse_sub_version(base, git_ref)?;
            highest = Some(highest.map_or(suffix, |h| h.max(suffix)));
        }

        let Some(n) = highest else {
            // Direct create failed and nothing in the family resolves;
            // no slot can be allocated.
            return Err(SyncError::SubVersionsExhausted {
                base: base.to_string(),
                limit: MAX_SUB_VERSION,
            });
        };
        let next = n + 1;
        if next >= MAX_SUB_VERSION {
            return Err(SyncError::SubVersionsExhausted {
                base: base.to_string(),
                limit: MAX_SUB_VERSION,
            });
        }

        let orphan_tag = format!("{base}.{n}");
        info!("dropping orphaned tag {orphan_tag}, allocating {base}.{next}");
        self.host.delete_tag_ref(&orphan_tag).await?;
        let release = self
            .host
            .create_release(&self.new_release(&format!("{base}.{next}")))
            .await?;
        Ok(release.into())
    }
}

/// Numeric suffix of a family member's tag name.
fn parse_sub_version(base: &str, git_ref: &GitRef) -> Result<u32> {
    let tag = git_ref.tag_name();
    tag.strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('.'))
        .and_then(|digits| digits.parse::<u32>().ok())
        .ok_or_else(|| SyncError::MalformedTagName {
            tag: tag.to_string(),
        })
}
