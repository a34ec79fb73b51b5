use crate::aggregate::merge_contributors;
use crate::error::Result;
use crate::github::ContributorSource;
use crate::model::{ContributorStats, DateWindow, Repository, Target};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

/// Link to the author's commits in a repository, narrowed to `window` if given.
pub fn commit_url(endpoint: &str, repo: &Repository, login: &str, window: Option<&DateWindow>) -> String {
    let base = format!("{endpoint}/{}/commits?author={login}", repo.full_name);
    match window {
        Some(w) => format!("{base}&since={}&until={}", w.since_str(), w.until_str()),
        None => base,
    }
}

/// Contributors of a single repository, minus bots and anyone without
/// commits inside `window`.
pub fn get_contributors<S: ContributorSource + ?Sized>(
    source: &S,
    repo: &Repository,
    window: Option<&DateWindow>,
    endpoint: &str,
) -> Result<Vec<ContributorStats>> {
    let mut contributors = Vec::new();

    for user in source.contributors(repo)? {
        if ContributorStats::is_bot(&user.login) {
            continue;
        }

        if let Some(w) = window {
            if !source.has_commits(repo, &user.login, w)? {
                debug!(login = %user.login, repo = %repo.full_name, "no commits in range");
                continue;
            }
        }

        let url = commit_url(endpoint, repo, &user.login, window);
        contributors.push(ContributorStats::new(
            user.login,
            user.avatar_url,
            user.contributions,
            url,
        ));
    }

    Ok(contributors)
}

pub fn resolve_repositories<S: ContributorSource + ?Sized>(
    source: &S,
    target: &Target,
) -> Result<Vec<Repository>> {
    match target {
        Target::Organization(org) => source.organization_repositories(org),
        Target::Repositories(refs) => refs
            .iter()
            .map(|r| source.repository(&r.owner, &r.name))
            .collect(),
    }
}

/// Contributors across every repository of `target`, merged by username.
///
/// A repository that fails part way is logged and left out of the result.
pub fn get_all_contributors<S: ContributorSource + ?Sized>(
    source: &S,
    target: &Target,
    window: Option<&DateWindow>,
    include_forks: bool,
    endpoint: &str,
    show_progress: bool,
) -> Result<Vec<ContributorStats>> {
    let repos = resolve_repositories(source, target)?;

    let pb = if show_progress {
        ProgressBar::new(repos.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut per_repo = Vec::new();
    for repo in &repos {
        pb.set_message(repo.full_name.clone());
        if repo.fork && !include_forks {
            debug!(repo = %repo.full_name, "skipping fork");
            pb.inc(1);
            continue;
        }

        match get_contributors(source, repo, window, endpoint) {
            Ok(list) if !list.is_empty() => per_repo.push(list),
            Ok(_) => {}
            Err(e) => warn!("Error getting contributors for repository {}: {}", repo.full_name, e),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let merged = merge_contributors(per_repo);
    info!("Collected {} contributors from {} repositories", merged.len(), repos.len());
    Ok(merged)
}
