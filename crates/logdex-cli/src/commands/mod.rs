//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`files`] - List discovered log files
//! - [`refresh`] - Rebuild the index
//! - [`stats`] - Index statistics
//! - [`search`] - Filtered, sorted, paginated search
//! - [`show`] - Single entry lookup

pub mod files;
pub mod refresh;
pub mod search;
pub mod show;
pub mod stats;

pub use files::FilesCommand;
pub use refresh::RefreshCommand;
pub use search::SearchCommand;
pub use show::ShowCommand;
pub use stats::StatsCommand;
