use anyhow::{Context, Result};
use octocrab::Octocrab;
use tracing::{debug, info};

use crate::models::{PullRequest, MERGED_STATE};

/// GitHub API client for pull request interactions
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Create a new GitHub client with the given token
    pub fn new(token: &str) -> Result<Self> {
        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .build()
            .context("Failed to create GitHub client")?;

        Ok(Self { client })
    }

    /// List merged pull requests assigned to a milestone.
    ///
    /// The returned list is what the changelog pipeline consumes; the
    /// core never talks to the forge itself.
    pub async fn list_merged_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        milestone: &str,
    ) -> Result<Vec<PullRequest>> {
        info!(owner, repo, milestone, "Fetching merged pull requests");

        let query = format!(
            "repo:{}/{} is:pr is:merged milestone:\"{}\"",
            owner, repo, milestone
        );

        let page = self
            .client
            .search()
            .issues_and_pull_requests(&query)
            .per_page(100)
            .send()
            .await
            .context("Failed to search pull requests")?;

        let items = self
            .client
            .all_pages(page)
            .await
            .context("Failed to fetch remaining search result pages")?;

        let prs: Vec<PullRequest> = items
            .into_iter()
            .map(|issue| PullRequest {
                // The search query restricts results to merged PRs
                state: MERGED_STATE.to_string(),
                number: issue.number,
                url: issue.html_url.to_string(),
                title: issue.title,
                body: issue.body.unwrap_or_default(),
                milestone: issue.milestone.map(|m| m.title),
                merged_at: issue.closed_at,
            })
            .collect();

        debug!(count = prs.len(), "Fetched pull requests");

        Ok(prs)
    }

    /// Post the rendered changelog as a comment on a PR
    pub async fn post_comment(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        body: &str,
    ) -> Result<u64> {
        info!(owner, repo, pr_number, "Posting PR comment");

        let comment = self
            .client
            .issues(owner, repo)
            .create_comment(pr_number, body)
            .await
            .context("Failed to post PR comment")?;

        debug!(comment_id = comment.id.0, "Comment posted");

        Ok(comment.id.0)
    }
}

/// Parse owner and repo from a repo string like "owner/repo"
pub fn parse_repo(repo: &str) -> Result<(&str, &str)> {
    let parts: Vec<&str> = repo.split('/').collect();
    if parts.len() != 2 {
        anyhow::bail!("Invalid repo format. Expected 'owner/repo', got: {}", repo);
    }
    Ok((parts[0], parts[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo() {
        let (owner, repo) = parse_repo("octocat/hello-world").unwrap();
        assert_eq!(owner, "octocat");
        assert_eq!(repo, "hello-world");
    }

    #[test]
    fn test_parse_repo_invalid() {
        assert!(parse_repo("invalid").is_err());
        assert!(parse_repo("too/many/parts").is_err());
    }
}
