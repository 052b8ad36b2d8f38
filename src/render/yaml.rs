use anyhow::{Context, Result};

use crate::group::{GroupedChanges, ModuleChanges};

/// Render the grouped structure as YAML.
///
/// Only categorized entries are emitted: the unknown bucket is dropped,
/// and a module left with neither fixes nor features is omitted
/// entirely. Module keys come out sorted because the grouped structure
/// is an ordered map.
pub fn render_yaml(grouped: &GroupedChanges) -> Result<String> {
    let mut categorized = GroupedChanges::new();

    for (module, changes) in grouped {
        if !changes.has_categorized() {
            continue;
        }

        categorized.insert(
            module.clone(),
            ModuleChanges {
                fixes: changes.fixes.clone(),
                features: changes.features.clone(),
                unknown: Vec::new(),
            },
        );
    }

    serde_yaml::to_string(&categorized).context("Failed to serialize changelog as YAML")
}
