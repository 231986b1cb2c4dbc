//! # Executor Errors
//!
//! Failures while talking to the search engine. None of them are retried here.

use thiserror::Error;

/// Result type for executor operations
pub type ExecutionResult<T> = Result<T, ExecutionError>;

/// Search engine execution errors
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Connection, TLS or timeout failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Engine answered with a non-success status
    #[error("Engine returned status {status}: {body}")]
    EngineStatus { status: u16, body: String },

    /// Request or response body could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ExecutionError {
    /// Error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            ExecutionError::Transport(_) => "SHOP_ENGINE_UNREACHABLE",
            ExecutionError::EngineStatus { .. } => "SHOP_ENGINE_REJECTED",
            ExecutionError::Serialization(_) => "SHOP_ENGINE_SERIALIZATION",
        }
    }

    /// HTTP status code reported to our own callers
    pub fn status_code(&self) -> u16 {
        match self {
            ExecutionError::Transport(e) if e.is_timeout() => 504,
            _ => 502,
        }
    }

    /// Engine status if the engine answered at all
    pub fn engine_status(&self) -> Option<u16> {
        match self {
            ExecutionError::EngineStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_status_error() {
        let err = ExecutionError::EngineStatus {
            status: 400,
            body: "parsing_exception".into(),
        };
        assert_eq!(err.status_code(), 502);
        assert_eq!(err.engine_status(), Some(400));
        assert_eq!(err.code(), "SHOP_ENGINE_REJECTED");
        assert!(err.to_string().contains("parsing_exception"));
    }

    #[test]
    fn test_serialization_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ExecutionError::from(json_err);
        assert_eq!(err.code(), "SHOP_ENGINE_SERIALIZATION");
        assert_eq!(err.engine_status(), None);
    }
}
