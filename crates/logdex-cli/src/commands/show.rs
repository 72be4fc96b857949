//! Show command implementation.

use std::io::Write;

use logdex::SharedEngine;

use crate::error::CliError;
use crate::output::OutputFormat;

/// Prints a single entry looked up by id.
pub struct ShowCommand {
    engine: SharedEngine,
}

impl ShowCommand {
    /// Create a new show command.
    #[must_use]
    pub const fn new(engine: SharedEngine) -> Self {
        Self { engine }
    }

    /// Execute the show command.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidArgument`] if no entry has this id.
    pub fn execute<W: Write>(
        &self,
        writer: &mut W,
        format: &OutputFormat,
        id: &str,
    ) -> Result<(), CliError> {
        self.engine.ensure_loaded();
        let entry = self
            .engine
            .entry(id)
            .ok_or_else(|| CliError::InvalidArgument(format!("no entry with id {id}")))?;
        format.write(writer, &entry)
    }
}
