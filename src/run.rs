use crate::aggregate::{mark_new_contributors, new_contributor_count, sort_contributors, total_contributions};
use crate::auth::resolve_token;
use crate::collect::get_all_contributors;
use crate::config::Config;
use crate::error::Result;
use crate::github::client::build_http_client;
use crate::github::{ContributorSource, GitHubClient, SponsorDirectory};
use crate::model::ContributorStats;
use crate::report::{write_json, write_markdown, ReportMeta};
use crate::sponsor::apply_sponsor_info;
use anyhow::Context;
use console::style;
use tracing::info;

pub fn exec(config: Config) -> anyhow::Result<()> {
    let http = build_http_client().context("Failed to build HTTP client")?;
    let enterprise_api = config.enterprise_url.as_ref().map(|_| config.api_base());
    let token = resolve_token(&http, &config.auth, enterprise_api.as_deref())
        .context("Failed to authenticate to GitHub")?;
    let client = GitHubClient::new(http, &config.api_base(), &config.graphql_endpoint(), token);

    let contributors = collect_report(&client, &config, console::user_attended_stderr())
        .context("Failed to collect contributors")?;

    let meta = ReportMeta::from_config(&config);
    write_markdown(&config.markdown_file, &contributors, &meta)
        .with_context(|| format!("Failed to write {}", config.markdown_file.display()))?;
    write_json(&config.json_file, &contributors, &meta)
        .with_context(|| format!("Failed to write {}", config.json_file.display()))?;
    info!(
        markdown = %config.markdown_file.display(),
        json = %config.json_file.display(),
        "reports written"
    );

    output_summary(&contributors, &config);
    Ok(())
}

/// Everything between authentication and rendering: collect, classify,
/// annotate and order the contributors for the configured target.
pub fn collect_report<S>(source: &S, config: &Config, show_progress: bool) -> Result<Vec<ContributorStats>>
where
    S: ContributorSource + SponsorDirectory + ?Sized,
{
    let endpoint = config.web_endpoint();
    let window = config.window();

    let mut contributors = get_all_contributors(
        source,
        &config.target,
        window.as_ref(),
        config.include_forks,
        &endpoint,
        show_progress,
    )?;

    if let Some(window) = window {
        let before = window.preceding();
        info!("Looking for contributors active before {}", before.until_str());
        let returning = get_all_contributors(
            source,
            &config.target,
            Some(&before),
            config.include_forks,
            &endpoint,
            show_progress,
        )?;
        mark_new_contributors(&mut contributors, &returning);
    }

    if config.sponsor_info {
        apply_sponsor_info(&mut contributors, source, &endpoint);
    }

    sort_contributors(&mut contributors);
    Ok(contributors)
}

fn output_summary(contributors: &[ContributorStats], config: &Config) {
    println!("{}", style("Contributors Summary").bold());
    println!("{}", "─".repeat(50));
    println!("Contributors: {}", style(contributors.len()).cyan());
    println!(
        "Total contributions: {}",
        style(total_contributions(contributors)).green()
    );
    if config.window().is_some() {
        println!(
            "New contributors: {}",
            style(new_contributor_count(contributors)).yellow()
        );
    }
    println!(
        "Wrote {} and {}",
        style(config.markdown_file.display()).dim(),
        style(config.json_file.display()).dim()
    );
}
