//! Access to the GitHub REST and GraphQL APIs.
//!
//! Collection code talks to the traits below so it can run against an
//! in-memory source in tests; [`GitHubClient`] is the HTTP implementation.

use crate::error::Result;
use crate::model::{ApiContributor, DateWindow, Repository};

pub mod client;
pub mod sponsors;

pub use client::GitHubClient;

pub trait ContributorSource {
    fn organization_repositories(&self, organization: &str) -> Result<Vec<Repository>>;

    fn repository(&self, owner: &str, name: &str) -> Result<Repository>;

    fn contributors(&self, repo: &Repository) -> Result<Vec<ApiContributor>>;

    /// Whether `author` has at least one commit in `repo` inside `window`.
    fn has_commits(&self, repo: &Repository, author: &str, window: &DateWindow) -> Result<bool>;
}

pub trait SponsorDirectory {
    fn has_sponsors_listing(&self, username: &str) -> Result<bool>;
}
