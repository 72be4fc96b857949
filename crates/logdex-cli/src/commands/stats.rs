//! Stats command implementation.

use std::io::Write;

use logdex::SharedEngine;

use crate::error::CliError;
use crate::output::OutputFormat;

/// Shows index statistics, building the index if needed.
pub struct StatsCommand {
    engine: SharedEngine,
}

impl StatsCommand {
    /// Create a new stats command.
    #[must_use]
    pub const fn new(engine: SharedEngine) -> Self {
        Self { engine }
    }

    /// Execute the stats command.
    ///
    /// # Errors
    ///
    /// Returns an error if output fails.
    pub fn execute<W: Write>(&self, writer: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        self.engine.ensure_loaded();
        format.write(writer, &self.engine.stats())
    }
}
