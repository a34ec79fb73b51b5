use super::ContributorSource;
use crate::error::{ContribError, Result};
use crate::model::{ApiContributor, DateWindow, Repository};
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, LINK};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

pub const GITHUB_ACCEPT: &str = "application/vnd.github+json";

const USER_AGENT: &str = concat!("contributors/", env!("CARGO_PKG_VERSION"));
const PER_PAGE: &str = "100";
const TIMEOUT_SECS: u64 = 30;

pub fn build_http_client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .build()?)
}

pub struct GitHubClient {
    http: Client,
    api_base: String,
    graphql_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(http: Client, api_base: &str, graphql_url: &str, token: String) -> Self {
        info!("Created GitHub API client for {}", api_base);
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            graphql_url: graphql_url.to_string(),
            token,
        }
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    pub(crate) fn graphql_url(&self) -> &str {
        &self.graphql_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Response> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_ACCEPT)
            .query(query)
            .send()?;

        if !response.status().is_success() {
            return Err(api_error(response));
        }
        Ok(response)
    }

    /// Fetch every page of a list endpoint by following `Link: rel="next"`.
    fn get_paged<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<T>> {
        let mut query = query.to_vec();
        query.push(("per_page", PER_PAGE));

        let mut items = Vec::new();
        let mut response = self.get(&self.endpoint(path), &query)?;
        loop {
            let next = response
                .headers()
                .get(LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(next_page_url);

            if response.status() != StatusCode::NO_CONTENT {
                let page: Vec<T> = response.json()?;
                items.extend(page);
            }

            match next {
                Some(url) => response = self.get(&url, &[])?,
                None => break,
            }
        }
        Ok(items)
    }
}

impl ContributorSource for GitHubClient {
    fn organization_repositories(&self, organization: &str) -> Result<Vec<Repository>> {
        let repos: Vec<Repository> = self.get_paged(&format!("orgs/{organization}/repos"), &[])?;
        info!("Found {} repositories in {}", repos.len(), organization);
        Ok(repos)
    }

    fn repository(&self, owner: &str, name: &str) -> Result<Repository> {
        let response = self.get(&self.endpoint(&format!("repos/{owner}/{name}")), &[])?;
        Ok(response.json()?)
    }

    fn contributors(&self, repo: &Repository) -> Result<Vec<ApiContributor>> {
        self.get_paged(&format!("repos/{}/contributors", repo.full_name), &[])
    }

    fn has_commits(&self, repo: &Repository, author: &str, window: &DateWindow) -> Result<bool> {
        let since = window.since_str();
        let until = window.until_str();
        let response = self.get(
            &self.endpoint(&format!("repos/{}/commits", repo.full_name)),
            &[
                ("author", author),
                ("since", since.as_str()),
                ("until", until.as_str()),
                ("per_page", "1"),
            ],
        )?;
        let commits: Vec<serde_json::Value> = response.json()?;
        Ok(!commits.is_empty())
    }
}

/// Extract the `rel="next"` target from an RFC 8288 `Link` header.
pub fn next_page_url(link_header: &str) -> Option<String> {
    link_header.split(',').find_map(|part| {
        let mut segments = part.split(';');
        let target = segments.next()?.trim();
        let is_next = segments.any(|param| {
            let param = param.trim();
            param == "rel=\"next\"" || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}

/// Convert a non-success response into an error carrying status, URL and body.
pub fn api_error(response: Response) -> ContribError {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.text().unwrap_or_default();
    let message = if body.is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        body
    };
    ContribError::Api {
        status: status.as_u16(),
        url,
        message,
    }
}
