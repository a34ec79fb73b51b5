use crate::config::Config;
use anyhow::Result;
use clap::{ArgAction, Args, Parser};

#[derive(Parser)]
#[command(name = "contributors")]
#[command(about = "Report contributors to a GitHub organization or set of repositories")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub source: SourceArgs,

    #[clap(flatten)]
    pub auth: AuthArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Clone, Debug, Default)]
pub struct SourceArgs {
    #[arg(long, env = "ORGANIZATION", help = "Organization whose repositories are scanned")]
    pub organization: Option<String>,

    #[arg(long, env = "REPOSITORY", help = "Comma separated list of owner/name repositories")]
    pub repository: Option<String>,

    #[arg(long, env = "START_DATE", help = "Start of the date range (YYYY-MM-DD)")]
    pub start_date: Option<String>,

    #[arg(long, env = "END_DATE", help = "End of the date range (YYYY-MM-DD)")]
    pub end_date: Option<String>,

    #[arg(
        long,
        env = "INCLUDE_FORKS",
        help = "Include forked repositories",
        action = ArgAction::Set,
        value_parser = parse_flag_default_on,
        num_args = 0..=1,
        default_value = "true",
        default_missing_value = "true"
    )]
    pub include_forks: bool,

    #[arg(long, env = "GH_ENTERPRISE_URL", help = "GitHub Enterprise base URL")]
    pub enterprise_url: Option<String>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct AuthArgs {
    #[arg(long, env = "GH_TOKEN", hide_env_values = true, help = "Personal access token")]
    pub token: Option<String>,

    #[arg(long, env = "GH_APP_ID", help = "GitHub App id")]
    pub app_id: Option<String>,

    #[arg(long, env = "GH_APP_INSTALLATION_ID", help = "GitHub App installation id")]
    pub app_installation_id: Option<String>,

    #[arg(
        long,
        env = "GH_APP_PRIVATE_KEY",
        hide_env_values = true,
        help = "GitHub App private key (PEM)"
    )]
    pub app_private_key: Option<String>,

    #[arg(
        long,
        env = "GITHUB_APP_ENTERPRISE_ONLY",
        help = "The GitHub App is registered on the enterprise host",
        action = ArgAction::Set,
        value_parser = parse_flag,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    pub app_enterprise_only: bool,
}

#[derive(Args, Clone, Debug, Default)]
pub struct OutputArgs {
    #[arg(
        long,
        env = "SPONSOR_INFO",
        help = "Look up GitHub Sponsors listings",
        action = ArgAction::Set,
        value_parser = parse_flag,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    pub sponsor_info: bool,

    #[arg(
        long,
        env = "LINK_TO_PROFILE",
        help = "Link usernames to their profile in Markdown",
        action = ArgAction::Set,
        value_parser = parse_flag,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true"
    )]
    pub link_to_profile: bool,

    #[arg(long, env = "MARKDOWN_FILE", help = "Markdown output path [default: contributors.md]")]
    pub markdown_file: Option<String>,

    #[arg(long, env = "JSON_FILE", help = "JSON output path [default: contributors.json]")]
    pub json_file: Option<String>,
}

/// Only a literal `true` (any case) switches an option on.
pub fn parse_flag(value: &str) -> std::result::Result<bool, String> {
    Ok(value.trim().eq_ignore_ascii_case("true"))
}

/// Like [`parse_flag`], but an empty value keeps the option on.
pub fn parse_flag_default_on(value: &str) -> std::result::Result<bool, String> {
    if value.trim().is_empty() {
        return Ok(true);
    }
    parse_flag(value)
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let config = Config::from_args(self.source, self.auth, self.output)?;
        crate::run::exec(config)
    }
}
