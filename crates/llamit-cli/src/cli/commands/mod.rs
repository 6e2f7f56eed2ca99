//! CLI command handlers. Each command is in its own file.

mod config_path;
mod formats;
mod generate;

pub use config_path::run_config_path;
pub use formats::run_formats;
pub use generate::run_generate;
