use crate::auth::{AppCredentials, AuthMethod};
use crate::cli::{AuthArgs, OutputArgs, SourceArgs};
use crate::error::{ContribError, Result};
use crate::model::{DateWindow, RepoRef, Target, DATE_FORMAT};
use chrono::NaiveDate;
use std::path::PathBuf;

const GITHUB_WEB: &str = "https://github.com";
const GITHUB_API: &str = "https://api.github.com";
const DEFAULT_MARKDOWN_FILE: &str = "contributors.md";
const DEFAULT_JSON_FILE: &str = "contributors.json";

/// Validated settings for a single report run.
#[derive(Debug, Clone)]
pub struct Config {
    pub target: Target,
    pub organization: Option<String>,
    pub repositories: Vec<RepoRef>,
    pub auth: AuthMethod,
    pub enterprise_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub include_forks: bool,
    pub sponsor_info: bool,
    pub link_to_profile: bool,
    pub markdown_file: PathBuf,
    pub json_file: PathBuf,
}

impl Config {
    pub fn from_args(source: SourceArgs, auth: AuthArgs, output: OutputArgs) -> Result<Self> {
        let organization = non_empty(source.organization);
        let repositories = match non_empty(source.repository) {
            Some(list) => parse_repository_list(&list)?,
            None => Vec::new(),
        };

        let target = match (&organization, repositories.is_empty()) {
            (Some(org), _) => Target::Organization(org.clone()),
            (None, false) => Target::Repositories(repositories.clone()),
            (None, true) => {
                return Err(ContribError::Config(
                    "ORGANIZATION and REPOSITORY environment variables were not set. Please set one"
                        .to_string(),
                ))
            }
        };

        let auth = resolve_auth(auth)?;

        let enterprise_url = non_empty(source.enterprise_url)
            .map(|url| url.trim_end_matches('/').to_string());

        let start_date = parse_date("START_DATE", source.start_date.as_deref())?;
        let end_date = parse_date("END_DATE", source.end_date.as_deref())?;
        if let (Some(s), Some(e)) = (start_date, end_date) {
            if s > e {
                return Err(ContribError::InvalidDate(format!(
                    "Invalid range: START_DATE ({s}) is after END_DATE ({e})"
                )));
            }
        }

        Ok(Self {
            target,
            organization,
            repositories,
            auth,
            enterprise_url,
            start_date,
            end_date,
            include_forks: source.include_forks,
            sponsor_info: output.sponsor_info,
            link_to_profile: output.link_to_profile,
            markdown_file: output_path(output.markdown_file, DEFAULT_MARKDOWN_FILE),
            json_file: output_path(output.json_file, DEFAULT_JSON_FILE),
        })
    }

    /// Active only when both ends of the range are set.
    pub fn window(&self) -> Option<DateWindow> {
        match (self.start_date, self.end_date) {
            (Some(s), Some(e)) => Some(DateWindow::new(s, e)),
            _ => None,
        }
    }

    pub fn web_endpoint(&self) -> String {
        self.enterprise_url
            .clone()
            .unwrap_or_else(|| GITHUB_WEB.to_string())
    }

    pub fn api_base(&self) -> String {
        match &self.enterprise_url {
            Some(url) => format!("{url}/api/v3"),
            None => GITHUB_API.to_string(),
        }
    }

    pub fn graphql_endpoint(&self) -> String {
        match &self.enterprise_url {
            Some(url) => format!("{url}/api/graphql"),
            None => format!("{GITHUB_API}/graphql"),
        }
    }

    pub fn repository_names(&self) -> Vec<String> {
        self.repositories.iter().map(ToString::to_string).collect()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn output_path(value: Option<String>, default: &str) -> PathBuf {
    PathBuf::from(non_empty(value).unwrap_or_else(|| default.to_string()))
}

/// Unset and blank ids are both treated as absent.
fn parse_id(var: &str, value: Option<String>) -> Result<Option<u64>> {
    let Some(raw) = non_empty(value) else {
        return Ok(None);
    };
    raw.parse::<u64>()
        .map(Some)
        .map_err(|_| ContribError::Config(format!("{var} must be a number, got '{raw}'")))
}

fn parse_repository_list(list: &str) -> Result<Vec<RepoRef>> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| entry.parse::<RepoRef>())
        .collect()
}

fn parse_date(var: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| {
            ContribError::InvalidDate(format!(
                "{var} environment variable not in the format YYYY-MM-DD"
            ))
        })
}

fn resolve_auth(args: AuthArgs) -> Result<AuthMethod> {
    let private_key = non_empty(args.app_private_key);
    let token = non_empty(args.token);
    let app_id = parse_id("GH_APP_ID", args.app_id)?;
    let installation_id = parse_id("GH_APP_INSTALLATION_ID", args.app_installation_id)?;

    if let Some(app_id) = app_id {
        return match (installation_id, private_key) {
            (Some(installation_id), Some(private_key)) => Ok(AuthMethod::App(AppCredentials {
                app_id,
                installation_id,
                private_key,
                enterprise_only: args.app_enterprise_only,
            })),
            _ => Err(ContribError::Config(
                "GH_APP_ID set and GH_APP_INSTALLATION_ID or GH_APP_PRIVATE_KEY variable not set"
                    .to_string(),
            )),
        };
    }

    token
        .map(AuthMethod::Token)
        .ok_or_else(|| ContribError::Config("GH_TOKEN environment variable not set".to_string()))
}
