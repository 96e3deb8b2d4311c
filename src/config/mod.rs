//! Project configuration: `[tool.psycho]` settings and interpreter resolution.
pub mod project;
pub mod settings;
pub mod toml_loader;

pub use project::{Overrides, ProjectConfig, project_dir_of};
pub use settings::ToolSettings;
