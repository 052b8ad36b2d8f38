pub mod config;
pub mod decode;
pub mod extract;
pub mod github;
pub mod group;
pub mod models;
pub mod pipeline;
pub mod render;

pub use config::Config;
pub use decode::{decode_changes, DecodeError};
pub use extract::extract_changelog;
pub use github::{parse_repo, GitHubClient};
pub use group::{group_changes, ChangeEntry, GroupedChanges, ModuleChanges};
pub use models::*;
pub use pipeline::{build_changelog, collect_changes};
pub use render::{render_markdown, render_yaml};
