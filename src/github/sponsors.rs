use super::client::{api_error, GitHubClient};
use super::SponsorDirectory;
use crate::error::{ContribError, Result};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const SPONSOR_QUERY: &str = "query($username: String!) { repositoryOwner(login: $username) { ... on User { hasSponsorsListing } } }";

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<SponsorData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SponsorData {
    repository_owner: Option<RepositoryOwner>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryOwner {
    #[serde(default)]
    has_sponsors_listing: bool,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

fn parse_listing(body: GraphQlResponse) -> Result<bool> {
    if let Some(err) = body.errors.first() {
        return Err(ContribError::Parse(format!("GraphQL error: {}", err.message)));
    }
    Ok(body
        .data
        .and_then(|d| d.repository_owner)
        .map(|owner| owner.has_sponsors_listing)
        .unwrap_or(false))
}

impl SponsorDirectory for GitHubClient {
    fn has_sponsors_listing(&self, username: &str) -> Result<bool> {
        debug!(username, "querying sponsors listing");
        let response = self
            .http()
            .post(self.graphql_url())
            .bearer_auth(self.token())
            .json(&json!({
                "query": SPONSOR_QUERY,
                "variables": { "username": username },
            }))
            .send()?;

        if !response.status().is_success() {
            return Err(api_error(response));
        }
        parse_listing(response.json()?)
    }
}
