use crate::github::SponsorDirectory;
use crate::model::ContributorStats;
use tracing::warn;

pub fn sponsor_url(endpoint: &str, username: &str) -> String {
    format!("{endpoint}/sponsors/{username}")
}

/// Attach a sponsor page link to every contributor with a Sponsors listing.
///
/// Lookup failures leave the contributor without sponsor info.
pub fn apply_sponsor_info<D: SponsorDirectory + ?Sized>(
    contributors: &mut [ContributorStats],
    directory: &D,
    endpoint: &str,
) {
    for contributor in contributors.iter_mut() {
        match directory.has_sponsors_listing(&contributor.username) {
            Ok(true) => contributor.sponsor_info = Some(sponsor_url(endpoint, &contributor.username)),
            Ok(false) => contributor.sponsor_info = None,
            Err(e) => warn!("Sponsor lookup failed for {}: {}", contributor.username, e),
        }
    }
}
