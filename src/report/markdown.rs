use super::ReportMeta;
use crate::aggregate::{new_contributor_count, total_contributions};
use crate::error::Result;
use crate::model::ContributorStats;
use std::fmt::Write as _;
use std::path::Path;

const FOOTER: &str = "\n _this file was generated by contributors_\n";

pub fn write_markdown(path: &Path, contributors: &[ContributorStats], meta: &ReportMeta) -> Result<()> {
    std::fs::write(path, render_markdown(contributors, meta))?;
    Ok(())
}

pub fn render_markdown(contributors: &[ContributorStats], meta: &ReportMeta) -> String {
    let mut out = String::from("# Contributors\n\n");

    if let Some((start, end)) = meta.range() {
        let _ = writeln!(out, "- Date range for contributor list:  {start} to {end}");
    }
    if let Some(org) = &meta.organization {
        let _ = writeln!(out, "- Organization: {org}");
    }
    if !meta.repositories.is_empty() {
        let _ = writeln!(out, "- Repository: {}", meta.repositories.join(", "));
    }
    out.push('\n');

    out.push_str(&summary_table(contributors, meta));
    out.push_str(&contributor_table(contributors, meta));
    out.push_str(FOOTER);
    out
}

/// Share of new contributors as a percentage with two decimals.
pub fn new_contributor_percentage(contributors: &[ContributorStats]) -> String {
    if contributors.is_empty() {
        return "0.00".to_string();
    }
    let pct = new_contributor_count(contributors) as f64 / contributors.len() as f64 * 100.0;
    format!("{pct:.2}")
}

fn summary_table(contributors: &[ContributorStats], meta: &ReportMeta) -> String {
    let total = total_contributions(contributors);
    if meta.range().is_some() {
        format!(
            "| Total Contributors | Total Contributions | % New Contributors |\n\
             | --- | --- | --- |\n\
             | {} | {} | {}% |\n\n",
            contributors.len(),
            total,
            new_contributor_percentage(contributors)
        )
    } else {
        format!(
            "| Total Contributors | Total Contributions |\n\
             | --- | --- |\n\
             | {} | {} |\n\n",
            contributors.len(),
            total
        )
    }
}

fn contributor_table(contributors: &[ContributorStats], meta: &ReportMeta) -> String {
    let range = meta.range();

    let mut columns = vec![
        "Username".to_string(),
        "All Time Contribution Count".to_string(),
    ];
    if range.is_some() {
        columns.push("New Contributor".to_string());
    }
    if meta.sponsor_info {
        columns.push("Sponsor URL".to_string());
    }
    match range {
        Some((start, end)) => columns.push(format!("Commits between {start} and {end}")),
        None => columns.push("All Commits".to_string()),
    }

    let mut table = format!("| {} |\n", columns.join(" | "));
    let _ = writeln!(table, "| {} |", vec!["---"; columns.len()].join(" | "));

    for c in contributors {
        let mut cells = vec![username_cell(&c.username, meta), c.contribution_count.to_string()];
        if range.is_some() {
            cells.push(c.new_contributor.to_string());
        }
        if meta.sponsor_info {
            cells.push(match &c.sponsor_info {
                Some(url) if !url.is_empty() => format!("[Sponsor Link]({url})"),
                _ => "not sponsorable".to_string(),
            });
        }
        cells.push(c.commit_url.clone());
        let _ = writeln!(table, "| {} |", cells.join(" | "));
    }

    table
}

fn username_cell(username: &str, meta: &ReportMeta) -> String {
    if meta.link_to_profile {
        format!("[{username}]({}/{username})", meta.endpoint)
    } else {
        format!("@{username}")
    }
}
