//! Wire models for the GitHub REST v3 release and git-ref endpoints.

use serde::{Deserialize, Serialize};

/// A release object as returned by the API.
///
/// Only the fields this tool reads are modeled; unknown response
/// fields are ignored on deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Numeric release identifier
    pub id: u64,
    /// Tag the release is attached to
    pub tag_name: String,
    /// Display name
    pub name: Option<String>,
    /// Body text
    pub body: Option<String>,
    /// Whether the release is an unpublished draft
    pub draft: bool,
    /// Whether the release is marked as a prerelease
    pub prerelease: bool,
    /// Web URL of the release page
    pub html_url: String,
    /// Asset-upload URL (hypermedia template)
    pub upload_url: String,
}

/// Request body for creating a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewRelease {
    /// Tag to create the release under
    pub tag_name: String,
    /// Display name
    pub name: String,
    /// Body text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Create as draft
    pub draft: bool,
    /// Mark as prerelease
    pub prerelease: bool,
    /// Commit the tag should point at when it does not exist yet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,
}

/// Request body for updating a release in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseUpdate {
    /// Tag the release stays attached to
    pub tag_name: String,
    /// New display name
    pub name: String,
    /// New body text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// New draft flag
    pub draft: bool,
    /// New prerelease flag
    pub prerelease: bool,
}

/// A git reference with the object it points at.
#[derive(Debug, Clone, Deserialize)]
pub struct GitRef {
    /// Fully qualified ref name, e.g. `refs/tags/v1.0`
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// Pointed-at object
    pub object: GitObject,
}

/// Target object of a reference.
#[derive(Debug, Clone, Deserialize)]
pub struct GitObject {
    /// Commit SHA
    pub sha: String,
}

impl GitRef {
    /// Ref name with the `refs/tags/` namespace removed.
    pub fn tag_name(&self) -> &str {
        self.ref_name
            .strip_prefix("refs/tags/")
            .unwrap_or(&self.ref_name)
    }
}
