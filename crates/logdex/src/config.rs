//! Configuration for the log index.
//!
//! [`LogdexConfig`] can be built in code with the `with_*` methods or loaded
//! from a JSON file. Missing fields take their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LogdexError, Result};
use crate::query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Log index configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogdexConfig {
    /// Directories scanned on refresh.
    #[serde(default)]
    pub directories: Vec<PathBuf>,
    /// Page size used when a query asks for zero.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Upper bound on requested page sizes.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

const fn default_max_page_size() -> usize {
    MAX_PAGE_SIZE
}

impl Default for LogdexConfig {
    fn default() -> Self {
        Self {
            directories: Vec::new(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl LogdexConfig {
    /// Creates a config scanning the given directories.
    #[must_use]
    pub fn new<I, P>(directories: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            directories: directories.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Loads a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        debug!(path = %path.display(), dirs = config.directories.len(), "loaded config");
        Ok(config)
    }

    /// Adds a directory.
    #[must_use]
    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directories.push(dir.into());
        self
    }

    /// Sets the default page size.
    #[must_use]
    pub const fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Sets the maximum page size.
    #[must_use]
    pub const fn with_max_page_size(mut self, size: usize) -> Self {
        self.max_page_size = size;
        self
    }

    /// Checks the config can back an engine.
    ///
    /// # Errors
    ///
    /// Returns [`LogdexError::NoDirectories`] when no directory is set, or
    /// [`LogdexError::InvalidConfig`] for unusable page sizes.
    pub fn validate(&self) -> Result<()> {
        if self.directories.is_empty() {
            return Err(LogdexError::NoDirectories);
        }
        if self.max_page_size == 0 {
            return Err(LogdexError::InvalidConfig(
                "max_page_size must be at least 1".to_string(),
            ));
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(LogdexError::InvalidConfig(format!(
                "default_page_size must be between 1 and {}",
                self.max_page_size
            )));
        }
        Ok(())
    }
}
