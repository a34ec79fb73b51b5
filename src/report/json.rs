use super::ReportMeta;
use crate::error::Result;
use crate::model::{ContributorStats, ReportOutput, SCHEMA_VERSION};
use chrono::Utc;
use std::path::Path;

pub fn build_output(contributors: &[ContributorStats], meta: &ReportMeta) -> ReportOutput {
    ReportOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        start_date: meta.start_date.clone(),
        end_date: meta.end_date.clone(),
        organization: meta.organization.clone(),
        repository_list: meta.repositories.clone(),
        sponsor_info: meta.sponsor_info,
        link_to_profile: meta.link_to_profile,
        contributors: contributors.to_vec(),
    }
}

pub fn write_json(path: &Path, contributors: &[ContributorStats], meta: &ReportMeta) -> Result<()> {
    let output = build_output(contributors, meta);
    std::fs::write(path, serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_report_carries_run_details_and_contributors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contributors.json");
        let meta = ReportMeta {
            start_date: Some("2023-01-01".to_string()),
            end_date: Some("2023-03-31".to_string()),
            organization: Some("org".to_string()),
            sponsor_info: true,
            endpoint: "https://github.com".to_string(),
            ..Default::default()
        };
        let mut alice = ContributorStats::new(
            "alice".to_string(),
            "https://avatars.example/alice".to_string(),
            12,
            "https://github.com/org/a/commits?author=alice".to_string(),
        );
        alice.new_contributor = true;

        write_json(&path, &[alice], &meta).unwrap();

        let v: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(v["version"], SCHEMA_VERSION);
        assert_eq!(v["start_date"], "2023-01-01");
        assert_eq!(v["end_date"], "2023-03-31");
        assert_eq!(v["organization"], "org");
        assert_eq!(v["repository_list"], serde_json::json!([]));
        assert_eq!(v["sponsor_info"], true);
        assert_eq!(v["link_to_profile"], false);

        let c = &v["contributors"][0];
        assert_eq!(c["username"], "alice");
        assert_eq!(c["new_contributor"], true);
        assert_eq!(c["contribution_count"], 12);
        assert_eq!(c["avatar_url"], "https://avatars.example/alice");
        assert_eq!(c["commit_url"], "https://github.com/org/a/commits?author=alice");
        assert!(c["sponsor_info"].is_null());
    }
}
