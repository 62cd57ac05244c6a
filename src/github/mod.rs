//! GitHub REST API surface: wire types, the mockable host trait, and
//! the reqwest-backed client.

mod client;
mod types;

pub use client::{GitHubClient, ReleaseHost, RELEASES_PER_PAGE};
pub use types::{GitObject, GitRef, NewRelease, Release, ReleaseUpdate};
