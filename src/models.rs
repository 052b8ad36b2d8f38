use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pull request state that contributes to a changelog
pub const MERGED_STATE: &str = "MERGED";

/// Module name assigned to fallback records
pub const UNKNOWN_MODULE: &str = "UNKNOWN";

/// A pull request as materialized from the forge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub state: String,
    pub number: u64,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub milestone: Option<String>,
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// Only merged pull requests feed the changelog
    pub fn is_merged(&self) -> bool {
        self.state == MERGED_STATE
    }
}

/// Category of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Fix,
    Feature,
    Unknown,
}

impl ChangeType {
    /// Normalize a raw type string; anything but the two known
    /// categories collapses to `Unknown`
    pub fn parse(raw: &str) -> Self {
        match raw {
            "fix" => ChangeType::Fix,
            "feature" => ChangeType::Feature,
            _ => ChangeType::Unknown,
        }
    }
}

/// One module-scoped change extracted from a pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub module: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub description: String,
    /// Back-reference to the originating pull request. Always taken from
    /// the pull request itself, never from the embedded block.
    pub pull_request: String,
    #[serde(skip)]
    pub number: u64,
    pub note: Option<String>,
}

impl ChangeRecord {
    /// Synthetic record substituted when a pull request has no decodable
    /// changelog block
    pub fn fallback(pr: &PullRequest) -> Self {
        Self {
            module: UNKNOWN_MODULE.to_string(),
            change_type: ChangeType::Unknown,
            description: format!("{} (#{})", pr.title, pr.number),
            pull_request: pr.url.clone(),
            number: pr.number,
            note: None,
        }
    }

    /// A record is valid iff module and description are non-empty.
    /// `change_type` is an enum and `pull_request` is populated by
    /// construction, so neither can fail on its own.
    pub fn is_valid(&self) -> bool {
        !self.module.is_empty() && !self.description.is_empty()
    }
}
