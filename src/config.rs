//! Runtime configuration for the knowledge layer.

use std::path::PathBuf;

use crate::error::ValidationError;
use crate::source::SourceKind;
use crate::trust::DEFAULT_MIN_CONFIDENCE;

/// Environment variable selecting the data source backend.
pub const ENV_SOURCE: &str = "INFRASAGE_KNOWLEDGE_SOURCE";
/// Environment variable holding the SQLite database path.
pub const ENV_DB_PATH: &str = "INFRASAGE_DB_PATH";
/// Environment variable overriding the prompt confidence floor.
pub const ENV_MIN_CONFIDENCE: &str = "INFRASAGE_MIN_CONFIDENCE";

/// Configuration for knowledge lookup and prompt rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeConfig {
    /// Which backend serves knowledge queries.
    pub source: SourceKind,
    /// Database file used by [`SourceKind::Database`].
    pub database_path: PathBuf,
    /// Confidence floor for prompt sections.
    pub min_confidence: f32,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Static,
            database_path: PathBuf::from("infrasage.db"),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

impl KnowledgeConfig {
    /// Reads configuration from the process environment, falling back to
    /// defaults for unset variables.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfig`] when a value cannot be
    /// parsed or is out of range.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(source) = lookup(ENV_SOURCE) {
            config.source = SourceKind::parse(&source);
        }
        if let Some(path) = lookup(ENV_DB_PATH) {
            config.database_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(ENV_MIN_CONFIDENCE) {
            config.min_confidence = raw.trim().parse().map_err(|_| ValidationError::InvalidConfig {
                reason: format!("{ENV_MIN_CONFIDENCE} must be a number (got '{raw}')"),
            })?;
        }
        config.validate()
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfig`] on the first bad value.
    pub fn validate(self) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ValidationError::InvalidConfig {
                reason: format!("min_confidence must be within [0, 1] (got {})", self.min_confidence),
            });
        }
        if self.source == SourceKind::Database && self.database_path.as_os_str().is_empty() {
            return Err(ValidationError::InvalidConfig {
                reason: "database source selected without a database path".to_string(),
            });
        }
        Ok(self)
    }
}
