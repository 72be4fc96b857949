//! Refresh command implementation.

use std::io::Write;

use logdex::SharedEngine;
use tracing::info;

use crate::error::CliError;
use crate::output::OutputFormat;

/// Rebuilds the index from the configured directories.
pub struct RefreshCommand {
    engine: SharedEngine,
}

impl RefreshCommand {
    /// Create a new refresh command.
    #[must_use]
    pub const fn new(engine: SharedEngine) -> Self {
        Self { engine }
    }

    /// Execute the refresh command.
    ///
    /// The rebuild runs off the async runtime's worker threads.
    ///
    /// # Errors
    ///
    /// Returns an error if the refresh task fails or output fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
    ) -> Result<(), CliError> {
        let summary = self.engine.refresh_in_background().await?;
        info!(
            entries = summary.entry_count,
            files = summary.file_count,
            "refresh complete"
        );
        format.write(writer, &summary)
    }
}
