//! The host trait the reconciler runs against and its reqwest-backed
//! implementation.
//!
//! The two lookups that legitimately miss (`get_release_by_tag`,
//! `get_tag_ref`) map HTTP 404 to `Ok(None)` at this seam; every other
//! error status becomes [`SyncError::Api`] carrying the remote's own
//! `message` field when the error body parses.

use std::future::Future;
use std::time::Duration;

use log::debug;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use url::Url;

use super::types::{GitRef, NewRelease, Release, ReleaseUpdate};
use crate::context::RunContext;
use crate::error::{Result, SyncError};

/// Releases fetched per page when scanning for a mutable match.
pub const RELEASES_PER_PAGE: u32 = 100;

const GITHUB_JSON: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("release-sync/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote operations the reconciler needs from the hosting platform.
///
/// One method per REST operation, bound to a single repository for the
/// lifetime of the run. Tests substitute an in-memory implementation.
pub trait ReleaseHost {
    /// List one page of releases, newest first.
    fn list_releases(&self, page: u32) -> impl Future<Output = Result<Vec<Release>>>;

    /// Fetch the release attached to `tag`, if any.
    fn get_release_by_tag(&self, tag: &str) -> impl Future<Output = Result<Option<Release>>>;

    /// Create a release (and, through it, the tag when absent).
    fn create_release(&self, release: &NewRelease) -> impl Future<Output = Result<Release>>;

    /// Update an existing release in place.
    fn update_release(
        &self,
        release_id: u64,
        update: &ReleaseUpdate,
    ) -> impl Future<Output = Result<Release>>;

    /// Delete a release by id.
    fn delete_release(&self, release_id: u64) -> impl Future<Output = Result<()>>;

    /// Fetch the tag reference `tags/<tag>`, if it exists.
    fn get_tag_ref(&self, tag: &str) -> impl Future<Output = Result<Option<GitRef>>>;

    /// Delete the tag reference `tags/<tag>`.
    fn delete_tag_ref(&self, tag: &str) -> impl Future<Output = Result<()>>;

    /// List tag refs whose bare name starts with `prefix`.
    fn list_matching_tag_refs(&self, prefix: &str) -> impl Future<Output = Result<Vec<GitRef>>>;
}

/// `ReleaseHost` backed by the GitHub REST v3 API.
#[derive(Debug)]
pub struct GitHubClient {
    http: Client,
    token: String,
    base: Url,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Build a client bound to one repository.
    pub fn new(ctx: &RunContext, owner: &str, repo: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        // A trailing slash keeps Url::join from replacing the last path
        // segment on Enterprise bases like https://ghe.local/api/v3.
        let mut base_str = ctx.api_url.clone();
        if !base_str.ends_with('/') {
            base_str.push('/');
        }
        let base = Url::parse(&base_str).map_err(|source| SyncError::InvalidApiUrl {
            value: ctx.api_url.clone(),
            source,
        })?;

        Ok(Self {
            http,
            token: ctx.token.clone(),
            base,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let full = format!("repos/{}/{}/{}", self.owner, self.repo, path);
        self.base
            .join(&full)
            .map_err(|source| SyncError::InvalidApiUrl {
                value: full,
                source,
            })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {url}");
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, GITHUB_JSON)
            .send()
            .await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    /// GET where a 404 is an expected negative result.
    async fn get_optional<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>> {
        debug!("GET {url}");
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, GITHUB_JSON)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(Self::checked(response).await?.json().await?))
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        url: Url,
        body: &B,
    ) -> Result<T> {
        debug!("{method} {url}");
        let response = self
            .http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, GITHUB_JSON)
            .json(body)
            .send()
            .await?;
        Ok(Self::checked(response).await?.json().await?)
    }

    async fn delete(&self, url: Url) -> Result<()> {
        debug!("DELETE {url}");
        let response = self
            .http
            .delete(url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, GITHUB_JSON)
            .send()
            .await?;
        Self::checked(response).await?;
        Ok(())
    }

    /// Pass a success response through, turn anything else into the
    /// API error taxonomy.
    async fn checked(response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(SyncError::Api {
            status,
            message: parse_api_message(&body),
        })
    }
}

/// GitHub error bodies carry a `message` field; fall back to raw text.
fn parse_api_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ApiErrorBody {
        message: String,
    }

    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => body.to_string(),
    }
}

impl ReleaseHost for GitHubClient {
    async fn list_releases(&self, page: u32) -> Result<Vec<Release>> {
        let mut url = self.endpoint("releases")?;
        url.query_pairs_mut()
            .append_pair("per_page", &RELEASES_PER_PAGE.to_string())
            .append_pair("page", &page.to_string());
        self.get_json(url).await
    }

    async fn get_release_by_tag(&self, tag: &str) -> Result<Option<Release>> {
        let url = self.endpoint(&format!("releases/tags/{tag}"))?;
        self.get_optional(url).await
    }

    async fn create_release(&self, release: &NewRelease) -> Result<Release> {
        let url = self.endpoint("releases")?;
        self.send_json(reqwest::Method::POST, url, release).await
    }

    async fn update_release(&self, release_id: u64, update: &ReleaseUpdate) -> Result<Release> {
        let url = self.endpoint(&format!("releases/{release_id}"))?;
        self.send_json(reqwest::Method::PATCH, url, update).await
    }

    async fn delete_release(&self, release_id: u64) -> Result<()> {
        let url = self.endpoint(&format!("releases/{release_id}"))?;
        self.delete(url).await
    }

    async fn get_tag_ref(&self, tag: &str) -> Result<Option<GitRef>> {
        let url = self.endpoint(&format!("git/ref/tags/{tag}"))?;
        self.get_optional(url).await
    }

    async fn delete_tag_ref(&self, tag: &str) -> Result<()> {
        let url = self.endpoint(&format!("git/refs/tags/{tag}"))?;
        self.delete(url).await
    }

    async fn list_matching_tag_refs(&self, prefix: &str) -> Result<Vec<GitRef>> {
        let url = self.endpoint(&format!("git/matching-refs/tags/{prefix}"))?;
        self.get_json(url).await
    }
}
