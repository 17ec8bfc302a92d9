//! Knowledge data sources.
//!
//! [`KnowledgeDataSource`] is the one async query surface over the knowledge
//! base. Two backends implement it:
//!
//! - [`StaticDataSource`] filters the built-in catalog in memory.
//! - `SqliteDataSource` (feature `sqlite`) queries a relational mirror and
//!   re-attaches anti-pattern predicates through the detection registry.
//!
//! [`create_data_source`] picks a backend from configuration, and
//! [`DataSourceProvider`] memoizes that choice with explicit reset and
//! override hooks.

mod static_source;

#[cfg(feature = "sqlite")]
mod sqlite;

use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};

use async_trait::async_trait;

use crate::component::ComponentType;
use crate::config::KnowledgeConfig;
use crate::error::{KnowledgeError, KnowledgeResult};
use crate::knowledge::{
    AntiPattern, ArchitecturePattern, CloudService, ComponentRelationship, FailureScenario,
    KnowledgeRecord, PerformanceProfile, Vulnerability,
};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDataSource;
pub use static_source::StaticDataSource;

/// Query filter accepted by every data source method.
///
/// Catalog entries are always active, so `is_active == false` matches
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeFilter {
    /// Case-insensitive substring over bilingual text fields and the id.
    pub search: Option<String>,
    /// Matches entries carrying at least one of these tags.
    pub tags: Option<Vec<String>>,
    /// Matches entries about this component kind.
    pub component: Option<ComponentType>,
    /// Match active (`true`) or deactivated (`false`) entries.
    pub is_active: bool,
}

impl Default for KnowledgeFilter {
    fn default() -> Self {
        Self {
            search: None,
            tags: None,
            component: None,
            is_active: true,
        }
    }
}

impl KnowledgeFilter {
    /// Matches every active entry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive text search.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Entries carrying any of `tags`.
    #[must_use]
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = Some(tags.iter().map(|t| (*t).to_string()).collect());
        self
    }

    /// Entries concerning `component`.
    #[must_use]
    pub fn with_component(mut self, component: ComponentType) -> Self {
        self.component = Some(component);
        self
    }

    /// Selects active or deactivated entries.
    #[must_use]
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Lowercased search needle, if any non-blank search was given.
    #[must_use]
    pub fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Tags to match, if a non-empty set was given.
    #[must_use]
    pub fn tag_set(&self) -> Option<&[String]> {
        self.tags.as_deref().filter(|t| !t.is_empty())
    }

    /// Returns true if the record passes every clause.
    #[must_use]
    pub fn matches<T: KnowledgeRecord>(&self, record: &T) -> bool {
        if !self.is_active {
            return false;
        }
        if let Some(needle) = self.needle() {
            let hit = record.id().to_lowercase().contains(&needle)
                || record
                    .text_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if let Some(tags) = self.tag_set() {
            if !tags.iter().any(|t| record.meta().has_tag(t)) {
                return false;
            }
        }
        if let Some(component) = self.component {
            if !record.components().contains(&component) {
                return false;
            }
        }
        true
    }

    /// Clones the matching records, preserving order.
    #[must_use]
    pub fn apply<T: KnowledgeRecord>(&self, records: &[T]) -> Vec<T> {
        records.iter().filter(|r| self.matches(*r)).cloned().collect()
    }
}

/// Async query interface over the knowledge base.
#[async_trait]
pub trait KnowledgeDataSource: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    async fn get_relationships(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<ComponentRelationship>>;

    async fn get_patterns(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<ArchitecturePattern>>;

    /// Anti-patterns with executable detection attached.
    async fn get_anti_patterns(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<AntiPattern>>;

    async fn get_failures(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<FailureScenario>>;

    async fn get_performance_profiles(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<PerformanceProfile>>;

    async fn get_vulnerabilities(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<Vulnerability>>;

    async fn get_cloud_services(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<CloudService>>;
}

/// Backend selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Built-in catalog.
    #[default]
    Static,
    /// SQLite database.
    Database,
}

impl SourceKind {
    /// Parses a configuration value. Unrecognized values select
    /// [`SourceKind::Static`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "static" => Self::Static,
            "database" | "db" | "sqlite" => Self::Database,
            other => {
                tracing::warn!(value = %other, "unrecognized knowledge source; using static");
                Self::Static
            }
        }
    }

    /// Name used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Database => "database",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the backend named by `config`.
///
/// Without the `sqlite` feature a database selection falls back to the
/// static backend with a warning.
///
/// # Errors
///
/// Returns an error if the database cannot be opened.
pub fn create_data_source(config: &KnowledgeConfig) -> KnowledgeResult<Arc<dyn KnowledgeDataSource>> {
    match config.source {
        SourceKind::Static => Ok(Arc::new(StaticDataSource::new())),
        #[cfg(feature = "sqlite")]
        SourceKind::Database => {
            let source = SqliteDataSource::open(&config.database_path)?;
            tracing::info!(path = %config.database_path.display(), "opened sqlite knowledge source");
            Ok(Arc::new(source))
        }
        #[cfg(not(feature = "sqlite"))]
        SourceKind::Database => {
            tracing::warn!("database knowledge source requested but sqlite support is not compiled in; using static");
            Ok(Arc::new(StaticDataSource::new()))
        }
    }
}

/// Memoizes the configured backend: built once on first use, then shared.
pub struct DataSourceProvider {
    config: KnowledgeConfig,
    cached: RwLock<Option<Arc<dyn KnowledgeDataSource>>>,
}

impl fmt::Debug for DataSourceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSourceProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn poisoned() -> KnowledgeError {
    KnowledgeError::internal("data source cache lock poisoned")
}

impl DataSourceProvider {
    /// Creates a provider; nothing is built until [`DataSourceProvider::get`].
    #[must_use]
    pub fn new(config: KnowledgeConfig) -> Self {
        Self {
            config,
            cached: RwLock::new(None),
        }
    }

    /// Configuration the provider was built with.
    #[must_use]
    pub fn config(&self) -> &KnowledgeConfig {
        &self.config
    }

    /// Returns the cached backend, creating it on first call.
    ///
    /// # Errors
    ///
    /// Propagates [`create_data_source`] failures; nothing is cached then.
    pub fn get(&self) -> KnowledgeResult<Arc<dyn KnowledgeDataSource>> {
        if let Some(source) = self.cached.read().map_err(|_| poisoned())?.as_ref() {
            return Ok(Arc::clone(source));
        }
        let mut slot = self.cached.write().map_err(|_| poisoned())?;
        if let Some(source) = slot.as_ref() {
            return Ok(Arc::clone(source));
        }
        let source = create_data_source(&self.config)?;
        tracing::debug!(backend = source.name(), "knowledge data source selected");
        *slot = Some(Arc::clone(&source));
        Ok(source)
    }

    /// Drops the cached backend so the next [`get`](Self::get) rebuilds it.
    pub fn reset(&self) {
        match self.cached.write() {
            Ok(mut slot) => *slot = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }

    /// Replaces the cached backend.
    pub fn set_override(&self, source: Arc<dyn KnowledgeDataSource>) {
        match self.cached.write() {
            Ok(mut slot) => *slot = Some(source),
            Err(poisoned) => *poisoned.into_inner() = Some(source),
        }
    }
}

/// Process-wide provider configured from the environment on first use.
pub fn global_provider() -> &'static DataSourceProvider {
    static PROVIDER: OnceLock<DataSourceProvider> = OnceLock::new();
    PROVIDER.get_or_init(|| {
        let config = KnowledgeConfig::from_env().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "invalid knowledge configuration; using defaults");
            KnowledgeConfig::default()
        });
        DataSourceProvider::new(config)
    })
}

/// The process-wide backend.
///
/// # Errors
///
/// See [`DataSourceProvider::get`].
pub fn data_source() -> KnowledgeResult<Arc<dyn KnowledgeDataSource>> {
    global_provider().get()
}

/// Clears the process-wide backend. Intended for serialized test setup.
pub fn reset_data_source() {
    global_provider().reset();
}
