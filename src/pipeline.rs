use tracing::{debug, info};

use crate::config::Config;
use crate::decode::decode_changes;
use crate::extract::extract_changelog;
use crate::group::{group_changes, GroupedChanges};
use crate::models::{ChangeRecord, PullRequest};

/// Collect change records from an ordered pull request list.
///
/// Non-merged pull requests contribute nothing; titles excluded by
/// configuration contribute nothing; every remaining pull request
/// contributes at least one record: its decoded changelog entries, or a
/// single fallback record when the body holds nothing decodable.
/// Output order follows input order, so the final fold is deterministic.
pub fn collect_changes(prs: &[PullRequest], config: &Config) -> Vec<ChangeRecord> {
    let mut records = Vec::new();

    for pr in prs {
        if !pr.is_merged() {
            debug!(pr = pr.number, state = %pr.state, "Skipping non-merged pull request");
            continue;
        }

        if config.should_skip_title(&pr.title) {
            debug!(pr = pr.number, title = %pr.title, "Title excluded by configuration");
            continue;
        }

        records.extend(changes_for_pr(pr, config));
    }

    info!(
        pull_requests = prs.len(),
        records = records.len(),
        "Collected change records"
    );

    records
}

fn changes_for_pr(pr: &PullRequest, config: &Config) -> Vec<ChangeRecord> {
    let block = extract_changelog(&pr.body, &config.changelog.block_tags);

    if block.is_empty() {
        debug!(pr = pr.number, "No changelog block, substituting fallback record");
        return vec![ChangeRecord::fallback(pr)];
    }

    match decode_changes(&block, pr) {
        Ok(records) => records,
        Err(err) => {
            // Data-quality problems are absorbed here; nothing about
            // malformed input reaches the caller.
            debug!(pr = pr.number, error = %err, "Changelog block rejected, substituting fallback record");
            vec![ChangeRecord::fallback(pr)]
        }
    }
}

/// Run the full pipeline: collect records, then fold them into the
/// module/category structure the renderers consume
pub fn build_changelog(prs: &[PullRequest], config: &Config) -> GroupedChanges {
    group_changes(&collect_changes(prs, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChangelogConfig;
    use crate::models::{ChangeType, MERGED_STATE, UNKNOWN_MODULE};

    fn make_pr(number: u64, title: &str, body: &str) -> PullRequest {
        PullRequest {
            state: MERGED_STATE.to_string(),
            number,
            url: format!("https://github.com/owner/repo/pull/{}", number),
            title: title.to_string(),
            body: body.to_string(),
            milestone: Some("v1.0.0".to_string()),
            merged_at: None,
        }
    }

    #[test]
    fn test_non_merged_pr_produces_nothing() {
        let mut pr = make_pr(1, "Open work", "```changelog\nmodule: m\ntype: fix\ndescription: d\n```");
        pr.state = "OPEN".to_string();

        let records = collect_changes(&[pr], &Config::default());
        assert!(records.is_empty());
    }

    #[test]
    fn test_pr_without_block_falls_back() {
        let pr = make_pr(7, "Undocumented change", "Some prose, no block.");

        let records = collect_changes(&[pr], &Config::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].module, UNKNOWN_MODULE);
        assert_eq!(records[0].description, "Undocumented change (#7)");
    }

    #[test]
    fn test_well_formed_block_produces_all_records() {
        let body = "```changelog\nmodule: upmeter\ntype: fix\ndescription: correct uptime calc\n---\nmodule: docs\ntype: feature\ndescription: add guide\n```";
        let pr = make_pr(12, "Two changes", body);

        let records = collect_changes(&[pr.clone()], &Config::default());
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.pull_request, pr.url);
        }
    }

    #[test]
    fn test_unrecognized_type_is_counted_not_malformed() {
        let body = "```changelog\nmodule: x\ntype: bug\ndescription: d\n```";
        let pr = make_pr(3, "Typo in type", body);

        let records = collect_changes(&[pr], &Config::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].module, "x");
        assert_eq!(records[0].change_type, ChangeType::Unknown);
    }

    #[test]
    fn test_one_malformed_document_falls_back_whole_pr() {
        let body = "```changelog\nmodule: a\ntype: fix\ndescription: good\n---\nmodule: b\ntype: fix\n```";
        let pr = make_pr(9, "Partly broken", body);

        let records = collect_changes(&[pr], &Config::default());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].module, UNKNOWN_MODULE);
        assert_eq!(records[0].description, "Partly broken (#9)");
    }

    #[test]
    fn test_blocks_across_body_are_concatenated() {
        let body = "```changelog\nmodule: a\ntype: fix\ndescription: one\n```\nmore prose\n```changes\nmodule: b\ntype: feature\ndescription: two\n```";
        let pr = make_pr(5, "Two blocks", body);

        let records = collect_changes(&[pr], &Config::default());
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_excluded_title_produces_nothing() {
        let config = Config {
            changelog: ChangelogConfig {
                exclude_title_patterns: vec!["Release *".to_string()],
                ..Default::default()
            },
        };
        let pr = make_pr(2, "Release v1.0.0", "no block here");

        let records = collect_changes(&[pr], &config);
        assert!(records.is_empty());
    }

    #[test]
    fn test_build_changelog_groups_records() {
        let prs = vec![
            make_pr(1, "a", "```changelog\nmodule: upmeter\ntype: fix\ndescription: one\n```"),
            make_pr(2, "b", "no block"),
        ];

        let grouped = build_changelog(&prs, &Config::default());
        assert_eq!(grouped["upmeter"].fixes.len(), 1);
        assert_eq!(grouped[UNKNOWN_MODULE].unknown.len(), 1);
    }
}
