use std::collections::BTreeSet;

use crate::group::{ChangeEntry, GroupedChanges, ModuleChanges};

/// Render the grouped structure as a Markdown changelog.
///
/// Layout: a level-1 heading for the milestone, a `[MALFORMED]` section
/// listing the pull request numbers of everything that landed in an
/// unknown bucket (fallback records and entries with an unrecognized
/// type alike, so they can be triaged), then Features and Fixes sections.
/// Bullets are sorted by module name, then pull request number, so the
/// output is identical for any input order. Empty sections are omitted.
pub fn render_markdown(grouped: &GroupedChanges, milestone: &str) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Changelog {}\n", milestone));

    let malformed: BTreeSet<u64> = grouped
        .values()
        .flat_map(|changes| changes.unknown.iter().map(|entry| entry.number))
        .collect();

    if !malformed.is_empty() {
        md.push_str("\n## [MALFORMED]\n\n");
        for number in &malformed {
            md.push_str(&format!("- #{}\n", number));
        }
    }

    push_section(&mut md, "Features", grouped, |changes| &changes.features);
    push_section(&mut md, "Fixes", grouped, |changes| &changes.fixes);

    md
}

fn push_section(
    md: &mut String,
    title: &str,
    grouped: &GroupedChanges,
    pick: fn(&ModuleChanges) -> &Vec<ChangeEntry>,
) {
    let mut bullets: Vec<(&str, &ChangeEntry)> = Vec::new();
    for (module, changes) in grouped {
        for entry in pick(changes) {
            bullets.push((module.as_str(), entry));
        }
    }

    if bullets.is_empty() {
        return;
    }

    bullets.sort_by(|a, b| a.0.cmp(b.0).then(a.1.number.cmp(&b.1.number)));

    md.push_str(&format!("\n## {}\n\n", title));
    for (module, entry) in bullets {
        md.push_str(&format!(
            "- **[{}]** {} [#{}]({})\n",
            module, entry.description, entry.number, entry.pull_request
        ));
        if let Some(note) = &entry.note {
            md.push_str(&format!("  **NOTE!** {}\n", note));
        }
    }
}
