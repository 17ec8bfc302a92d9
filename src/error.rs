//! Error types for infrasage.
//!
//! Analysis itself never fails: unknown ids, panicking predicates and
//! missing collaborators all degrade to empty results. Errors only arise
//! when validating authored knowledge, reading configuration, or talking to
//! an external knowledge store.

use thiserror::Error;

/// Validation errors for authored knowledge and configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Confidence outside (0.0, 1.0].
    #[error("Confidence value {value} of '{id}' is out of range (0.0, 1.0]")]
    ConfidenceOutOfRange {
        id: String,
        value: f32,
    },

    /// Entry has no source citation.
    #[error("Entry '{id}' must cite at least one source")]
    MissingSources {
        id: String,
    },

    /// Entry has no tag.
    #[error("Entry '{id}' must carry at least one tag")]
    MissingTags {
        id: String,
    },

    /// Two entries in one collection share an id.
    #[error("Duplicate knowledge id '{id}'")]
    DuplicateId {
        id: String,
    },

    /// Latency minimum not below maximum.
    #[error("Latency range of '{id}' is invalid: min {min} must be below max {max}")]
    InvalidLatencyRange {
        id: String,
        min: f64,
        max: f64,
    },

    /// Sizing table entry is inconsistent.
    #[error("Sizing for '{component}' is invalid: {reason}")]
    InvalidSizing {
        component: String,
        reason: String,
    },

    /// Configuration value could not be used.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

/// Errors raised by knowledge data source backends.
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// The backend itself failed.
    #[error("Knowledge backend error: {message}")]
    Backend {
        message: String,
    },

    /// A stored record could not be decoded.
    #[error("Failed to decode knowledge record '{id}': {message}")]
    Decode {
        id: String,
        message: String,
    },

    /// The requested backend is disabled at compile time.
    #[error("Knowledge backend '{backend}' is not compiled into this build")]
    Unavailable {
        backend: String,
    },
}

/// Top-level error type for infrasage.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// Invalid authored data or configuration.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Knowledge store failure.
    #[error("Data source error: {0}")]
    DataSource(#[from] DataSourceError),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
    },

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invariant violated inside infrasage.
    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl KnowledgeError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Creates a backend error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::DataSource(DataSourceError::Backend {
            message: message.into(),
        })
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a data source error.
    #[must_use]
    pub const fn is_data_source(&self) -> bool {
        matches!(self, Self::DataSource(_))
    }

    /// Returns true if this is a serialization error.
    #[must_use]
    pub const fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

/// Result alias used throughout the crate.
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::ConfidenceOutOfRange {
            id: "REL-001".to_string(),
            value: 1.5,
        };
        let msg = format!("{err}");
        assert!(msg.contains("1.5"));
        assert!(msg.contains("REL-001"));
    }

    #[test]
    fn test_sizing_error_display() {
        let err = ValidationError::InvalidSizing {
            component: "web-server".to_string(),
            reason: "max_rps decreases".to_string(),
        };
        assert!(err.to_string().contains("web-server"));
    }

    #[test]
    fn test_knowledge_error_from_validation() {
        let err: KnowledgeError = ValidationError::MissingSources { id: "AP-1".into() }.into();
        assert!(err.is_validation());
        assert!(!err.is_data_source());
    }

    #[test]
    fn test_knowledge_error_from_data_source() {
        let err: KnowledgeError = DataSourceError::Unavailable {
            backend: "database".into(),
        }
        .into();
        assert!(err.is_data_source());
        assert!(err.to_string().contains("not compiled"));
    }

    #[test]
    fn test_backend_helper() {
        let err = KnowledgeError::backend("disk I/O error");
        assert!(err.is_data_source());
        assert!(err.to_string().contains("disk I/O error"));
    }
}
