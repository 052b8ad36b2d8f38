use tracing::debug;

/// Extract changelog block content from a pull request body.
///
/// A block opens with a fence line carrying one of the accepted tags
/// (e.g. ```` ```changelog ````) and closes with a bare ```` ``` ```` line.
/// A block with no closing fence before end-of-text is discarded. All
/// valid blocks are concatenated with a `---` separator line so that the
/// decoder sees one continuous document stream.
///
/// Returns an empty string when no valid block is present. Absence is an
/// expected outcome, not an error; the caller substitutes a fallback
/// record.
pub fn extract_changelog(body: &str, tags: &[String]) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in body.lines() {
        let trimmed = line.trim_end();

        match current {
            Some(ref mut content) => {
                if trimmed == "```" {
                    blocks.push(content.join("\n"));
                    current = None;
                } else {
                    content.push(line);
                }
            }
            None => {
                if let Some(tag) = trimmed.strip_prefix("```") {
                    if tags.iter().any(|t| t == tag) {
                        current = Some(Vec::new());
                    }
                }
            }
        }
    }

    // A still-open block at end-of-text never had a closing fence
    if current.is_some() {
        debug!("Discarding changelog block with no closing fence");
    }

    blocks.join("\n---\n")
}
