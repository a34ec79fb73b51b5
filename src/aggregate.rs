use crate::model::ContributorStats;
use std::collections::HashMap;

/// Fold per-repository contributor lists into one entry per username.
///
/// Counts are summed. The commit link kept is the one from the repository
/// where the user contributed most; the first one seen wins a tie.
pub fn merge_contributors(lists: Vec<Vec<ContributorStats>>) -> Vec<ContributorStats> {
    let mut merged: Vec<ContributorStats> = Vec::new();
    // username -> (position in `merged`, largest single-repository count)
    let mut index: HashMap<String, (usize, u64)> = HashMap::new();

    for contributor in lists.into_iter().flatten() {
        match index.get_mut(&contributor.username) {
            Some((pos, best)) => {
                let existing = &mut merged[*pos];
                existing.contribution_count += contributor.contribution_count;
                existing.new_contributor |= contributor.new_contributor;
                if contributor.contribution_count > *best {
                    *best = contributor.contribution_count;
                    existing.commit_url = contributor.commit_url;
                }
                if existing.sponsor_info.is_none() {
                    existing.sponsor_info = contributor.sponsor_info;
                }
            }
            None => {
                index.insert(
                    contributor.username.clone(),
                    (merged.len(), contributor.contribution_count),
                );
                merged.push(contributor);
            }
        }
    }

    merged
}

pub fn is_new_contributor(username: &str, returning: &[ContributorStats]) -> bool {
    !returning.iter().any(|c| c.username == username)
}

/// Flag everyone who does not appear among `returning`.
pub fn mark_new_contributors(contributors: &mut [ContributorStats], returning: &[ContributorStats]) {
    for contributor in contributors.iter_mut() {
        contributor.new_contributor = is_new_contributor(&contributor.username, returning);
    }
}

pub fn total_contributions(contributors: &[ContributorStats]) -> u64 {
    contributors.iter().map(|c| c.contribution_count).sum()
}

pub fn new_contributor_count(contributors: &[ContributorStats]) -> usize {
    contributors.iter().filter(|c| c.new_contributor).count()
}

/// Highest contribution count first, then by username.
pub fn sort_contributors(contributors: &mut [ContributorStats]) {
    contributors.sort_by(|a, b| {
        b.contribution_count
            .cmp(&a.contribution_count)
            .then_with(|| a.username.cmp(&b.username))
    });
}
