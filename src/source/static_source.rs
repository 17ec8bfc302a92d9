//! In-memory backend over the built-in catalog.

use async_trait::async_trait;

use crate::catalog;
use crate::error::KnowledgeResult;
use crate::knowledge::{
    AntiPattern, ArchitecturePattern, CloudService, ComponentRelationship, FailureScenario,
    PerformanceProfile, Vulnerability,
};

use super::{KnowledgeDataSource, KnowledgeFilter};

/// Serves the frozen catalog. Queries never fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDataSource;

impl StaticDataSource {
    /// Creates a source over the built-in catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl KnowledgeDataSource for StaticDataSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn get_relationships(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<ComponentRelationship>> {
        Ok(filter.apply(catalog::relationships()))
    }

    async fn get_patterns(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<ArchitecturePattern>> {
        Ok(filter.apply(catalog::patterns()))
    }

    async fn get_anti_patterns(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<AntiPattern>> {
        Ok(filter.apply(catalog::anti_patterns()))
    }

    async fn get_failures(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<FailureScenario>> {
        Ok(filter.apply(catalog::failures()))
    }

    async fn get_performance_profiles(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<PerformanceProfile>> {
        Ok(filter.apply(catalog::performance_profiles()))
    }

    async fn get_vulnerabilities(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<Vulnerability>> {
        Ok(filter.apply(catalog::vulnerabilities()))
    }

    async fn get_cloud_services(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<CloudService>> {
        Ok(filter.apply(catalog::cloud_services()))
    }
}
