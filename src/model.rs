use crate::error::ContribError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SCHEMA_VERSION: u32 = 1;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The day GitHub launched; lower bound when looking for returning contributors.
pub const PLATFORM_FOUNDED: NaiveDate = match NaiveDate::from_ymd_opt(2008, 2, 29) {
    Some(date) => date,
    None => panic!("invalid founding date"),
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorStats {
    pub username: String,
    pub new_contributor: bool,
    pub avatar_url: String,
    pub contribution_count: u64,
    pub commit_url: String,
    pub sponsor_info: Option<String>,
}

impl ContributorStats {
    pub fn new(username: String, avatar_url: String, contribution_count: u64, commit_url: String) -> Self {
        Self {
            username,
            new_contributor: false,
            avatar_url,
            contribution_count,
            commit_url,
            sponsor_info: None,
        }
    }

    pub fn is_bot(login: &str) -> bool {
        login.contains("[bot]")
    }
}

/// An `owner/name` pair as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoRef {
    type Err = ContribError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(ContribError::Config(format!(
                "Repository '{trimmed}' is not in the format owner/name"
            ))),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// What to scan: every repository of an organization, or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Organization(String),
    Repositories(Vec<RepoRef>),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repository {
    pub full_name: String,
    #[serde(default)]
    pub fork: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiContributor {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub contributions: u64,
}

/// Inclusive date window used to filter commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub since: NaiveDate,
    pub until: NaiveDate,
}

impl DateWindow {
    pub fn new(since: NaiveDate, until: NaiveDate) -> Self {
        Self { since, until }
    }

    pub fn since_str(&self) -> String {
        self.since.format(DATE_FORMAT).to_string()
    }

    pub fn until_str(&self) -> String {
        self.until.format(DATE_FORMAT).to_string()
    }

    /// Window covering everything before `self` began.
    pub fn preceding(&self) -> Self {
        Self {
            since: PLATFORM_FOUNDED.min(self.since),
            until: self.since,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub organization: Option<String>,
    pub repository_list: Vec<String>,
    pub sponsor_info: bool,
    pub link_to_profile: bool,
    pub contributors: Vec<ContributorStats>,
}
