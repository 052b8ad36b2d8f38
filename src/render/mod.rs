pub mod markdown;
pub mod yaml;

pub use markdown::render_markdown;
pub use yaml::render_yaml;
