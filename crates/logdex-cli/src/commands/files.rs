//! Files command implementation.

use std::io::Write;

use logdex::SharedEngine;

use crate::error::CliError;
use crate::output::{FileList, OutputFormat};

/// Lists the log files the scanner would index.
pub struct FilesCommand {
    engine: SharedEngine,
}

impl FilesCommand {
    /// Create a new files command.
    #[must_use]
    pub const fn new(engine: SharedEngine) -> Self {
        Self { engine }
    }

    /// Execute the files command.
    ///
    /// # Errors
    ///
    /// Returns an error if output fails.
    pub fn execute<W: Write>(&self, writer: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let list = FileList {
            files: self.engine.list_files(),
        };
        format.write(writer, &list)
    }
}
