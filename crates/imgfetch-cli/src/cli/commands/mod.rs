//! CLI command handlers. Each command is in its own file.

mod completions;
mod fetch;
mod list;
mod resolve;
mod run;

pub use completions::run_completions;
pub use fetch::run_fetch;
pub use list::run_list;
pub use resolve::run_resolve;
pub use run::run_manifest;
