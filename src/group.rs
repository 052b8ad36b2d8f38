use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{ChangeRecord, ChangeType};

/// Rendering projection of a change record. Module and type are implicit
/// in the surrounding structure and not repeated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEntry {
    pub description: String,
    pub pull_request: String,
    #[serde(skip)]
    pub number: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<&ChangeRecord> for ChangeEntry {
    fn from(record: &ChangeRecord) -> Self {
        Self {
            description: record.description.clone(),
            pull_request: record.pull_request.clone(),
            number: record.number,
            note: record.note.clone(),
        }
    }
}

/// Category buckets for one module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleChanges {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixes: Vec<ChangeEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<ChangeEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown: Vec<ChangeEntry>,
}

impl ModuleChanges {
    /// True when the module holds at least one fix or feature
    pub fn has_categorized(&self) -> bool {
        !self.fixes.is_empty() || !self.features.is_empty()
    }
}

/// Module name to category buckets, sorted by module name
pub type GroupedChanges = BTreeMap<String, ModuleChanges>;

/// Fold change records into the grouped structure.
///
/// Purely additive: a module entry is created on first sight, records are
/// appended to their category in arrival order, and nothing is ever
/// merged or deduplicated. The category match is exhaustive over
/// `ChangeType`, so an uncategorizable record cannot exist here.
pub fn group_changes(records: &[ChangeRecord]) -> GroupedChanges {
    let mut grouped = GroupedChanges::new();

    for record in records {
        let module = grouped.entry(record.module.clone()).or_default();
        let entry = ChangeEntry::from(record);

        match record.change_type {
            ChangeType::Fix => module.fixes.push(entry),
            ChangeType::Feature => module.features.push(entry),
            ChangeType::Unknown => module.unknown.push(entry),
        }
    }

    grouped
}
