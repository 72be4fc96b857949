//! CLI error types.

use std::fmt;

use logdex::LogdexError;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Invalid or missing configuration.
    Config(String),
    /// Invalid argument.
    InvalidArgument(String),
    /// Output formatting error.
    Format(String),
    /// Index operation failed.
    Index(LogdexError),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Format(msg) => write!(f, "format error: {msg}"),
            Self::Index(e) => write!(f, "index error: {e}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Index(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<LogdexError> for CliError {
    fn from(err: LogdexError) -> Self {
        match err {
            LogdexError::NoDirectories => {
                Self::Config("no log directories given (use --dir or a config file)".into())
            }
            LogdexError::InvalidConfig(msg) => Self::Config(msg),
            other => Self::Index(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_error_display_config() {
        let err = CliError::Config("missing".into());
        assert_eq!(err.to_string(), "configuration error: missing");
    }

    #[test]
    fn cli_error_from_no_directories() {
        let err = CliError::from(LogdexError::NoDirectories);
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().contains("--dir"));
    }

    #[test]
    fn cli_error_from_refresh_failure() {
        let err = CliError::from(LogdexError::RefreshTask("cancelled".into()));
        assert!(matches!(err, CliError::Index(_)));
        assert_eq!(err.to_string(), "index error: refresh task failed: cancelled");
    }

    #[test]
    fn cli_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err = CliError::from(io_err);
        assert!(matches!(cli_err, CliError::Io(_)));
    }
}
