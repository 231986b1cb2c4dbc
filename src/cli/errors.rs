//! CLI-specific error types
//!
//! All CLI errors are fatal: the process prints the error and exits non-zero.

use std::fmt;
use std::io;

use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout/files)
    IoError,
    /// Bad command-line argument
    InvalidArgument,
    /// Runtime or server startup failed
    BootFailed,
    /// Engine call failed during a catalog operation
    EngineError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "SHOP_CLI_CONFIG_ERROR",
            Self::IoError => "SHOP_CLI_IO_ERROR",
            Self::InvalidArgument => "SHOP_CLI_INVALID_ARGUMENT",
            Self::BootFailed => "SHOP_CLI_BOOT_FAILED",
            Self::EngineError => "SHOP_CLI_ENGINE_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<CatalogError> for CliError {
    fn from(e: CatalogError) -> Self {
        Self::new(CliErrorCode::EngineError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::invalid_argument("unknown mode 'fast'");
        assert_eq!(err.to_string(), "SHOP_CLI_INVALID_ARGUMENT: unknown mode 'fast'");
        assert_eq!(err.code(), CliErrorCode::InvalidArgument);
    }

    #[test]
    fn test_config_error_conversion() {
        let err = CliError::from(ConfigError::Invalid("page_size must be > 0".into()));
        assert_eq!(err.code_str(), "SHOP_CLI_CONFIG_ERROR");
        assert!(err.message().contains("page_size"));
    }
}
