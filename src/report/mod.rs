pub mod json;
pub mod markdown;

pub use json::{build_output, write_json};
pub use markdown::{render_markdown, write_markdown};

use crate::config::Config;
use crate::model::DATE_FORMAT;

/// Run details that appear alongside the contributor list in every report.
#[derive(Debug, Clone, Default)]
pub struct ReportMeta {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub organization: Option<String>,
    pub repositories: Vec<String>,
    pub sponsor_info: bool,
    pub link_to_profile: bool,
    pub endpoint: String,
}

impl ReportMeta {
    pub fn from_config(config: &Config) -> Self {
        Self {
            start_date: config.start_date.map(|d| d.format(DATE_FORMAT).to_string()),
            end_date: config.end_date.map(|d| d.format(DATE_FORMAT).to_string()),
            organization: config.organization.clone(),
            repositories: config.repository_names(),
            sponsor_info: config.sponsor_info,
            link_to_profile: config.link_to_profile,
            endpoint: config.web_endpoint(),
        }
    }

    /// Both ends of the range, when the report covers one.
    pub fn range(&self) -> Option<(&str, &str)> {
        match (&self.start_date, &self.end_date) {
            (Some(s), Some(e)) => Some((s.as_str(), e.as_str())),
            _ => None,
        }
    }
}
