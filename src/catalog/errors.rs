//! Catalog errors

use thiserror::Error;

use crate::executor::ExecutionError;

/// Errors raised while indexing products or configuring synonyms
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("engine call failed during {step}: {source}")]
    Engine {
        step: &'static str,
        #[source]
        source: ExecutionError,
    },

    #[error("failed to serialize product: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid bundled resource {name}: {reason}")]
    InvalidResource { name: &'static str, reason: String },
}

impl CatalogError {
    pub fn engine(step: &'static str, source: ExecutionError) -> Self {
        Self::Engine { step, source }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Engine { .. } => "SHOP_CATALOG_ENGINE",
            Self::Serialization(_) => "SHOP_CATALOG_SERIALIZATION",
            Self::InvalidResource { .. } => "SHOP_CATALOG_RESOURCE",
        }
    }

    /// HTTP status for the admin surface
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Engine { source, .. } => source.status_code(),
            Self::Serialization(_) | Self::InvalidResource { .. } => 500,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_passes_status_through() {
        let err = CatalogError::engine(
            "create_index",
            ExecutionError::EngineStatus {
                status: 400,
                body: "{}".into(),
            },
        );
        assert_eq!(err.code(), "SHOP_CATALOG_ENGINE");
        assert_eq!(err.status_code(), 502);
        assert!(err.to_string().contains("create_index"));
    }

    #[test]
    fn test_resource_error() {
        let err = CatalogError::InvalidResource {
            name: "index-settings.json",
            reason: "not an object".into(),
        };
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.code(), "SHOP_CATALOG_RESOURCE");
    }
}
