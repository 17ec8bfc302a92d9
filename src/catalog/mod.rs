//! Built-in knowledge catalog.
//!
//! Frozen, process-wide collections built once on first access. These are
//! the canonical definitions: the static data source serves them directly,
//! the detection registry is built from [`anti_patterns`], and the database
//! backend can be seeded from them.

mod antipatterns;
mod cloud;
mod failures;
mod patterns;
mod performance;
mod relationships;
mod sizing;
mod vulnerabilities;

use std::sync::OnceLock;

use chrono::{DateTime, TimeZone, Utc};

use crate::capacity::SizingTable;
use crate::error::ValidationError;
use crate::knowledge::{
    validate_collection, AntiPattern, ArchitecturePattern, CloudService, ComponentRelationship,
    EntryMeta, FailureScenario, KnowledgeKind, LocalizedText, PerformanceProfile, Vulnerability,
};
use crate::trust::{SourceCitation, SourceType, TrustMetadata};

pub use antipatterns::{
    DATA_STORE_WITHOUT_BACKUP, DB_INTERNET_EXPOSURE, INTERNET_FACING_WITHOUT_FIREWALL,
    SINGLE_LOAD_BALANCER,
};

/// Canonical component relationships.
pub fn relationships() -> &'static [ComponentRelationship] {
    static CELL: OnceLock<Vec<ComponentRelationship>> = OnceLock::new();
    CELL.get_or_init(relationships::build)
}

/// Canonical anti-patterns, with executable detection predicates.
pub fn anti_patterns() -> &'static [AntiPattern] {
    static CELL: OnceLock<Vec<AntiPattern>> = OnceLock::new();
    CELL.get_or_init(antipatterns::build)
}

/// Canonical failure scenarios.
pub fn failures() -> &'static [FailureScenario] {
    static CELL: OnceLock<Vec<FailureScenario>> = OnceLock::new();
    CELL.get_or_init(failures::build)
}

/// Canonical performance profiles.
pub fn performance_profiles() -> &'static [PerformanceProfile] {
    static CELL: OnceLock<Vec<PerformanceProfile>> = OnceLock::new();
    CELL.get_or_init(performance::build)
}

/// Canonical architecture patterns.
pub fn patterns() -> &'static [ArchitecturePattern] {
    static CELL: OnceLock<Vec<ArchitecturePattern>> = OnceLock::new();
    CELL.get_or_init(patterns::build)
}

/// Canonical vulnerabilities.
pub fn vulnerabilities() -> &'static [Vulnerability] {
    static CELL: OnceLock<Vec<Vulnerability>> = OnceLock::new();
    CELL.get_or_init(vulnerabilities::build)
}

/// Canonical cloud service mappings.
pub fn cloud_services() -> &'static [CloudService] {
    static CELL: OnceLock<Vec<CloudService>> = OnceLock::new();
    CELL.get_or_init(cloud::build)
}

/// Canonical sizing table keyed by component and traffic tier.
pub fn sizing_table() -> &'static SizingTable {
    static CELL: OnceLock<SizingTable> = OnceLock::new();
    CELL.get_or_init(sizing::build)
}

/// Validates every built-in collection.
///
/// # Errors
///
/// Returns the first violated invariant.
pub fn validate() -> Result<(), ValidationError> {
    validate_collection(relationships())?;
    validate_collection(anti_patterns())?;
    validate_collection(failures())?;
    validate_collection(performance_profiles())?;
    validate_collection(patterns())?;
    validate_collection(vulnerabilities())?;
    validate_collection(cloud_services())?;
    sizing_table().validate()
}

// Authoring helpers shared by the table modules.

fn reviewed(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn trust(confidence: f32, source_type: SourceType, title: &str) -> TrustMetadata {
    TrustMetadata {
        confidence,
        sources: vec![SourceCitation::new(source_type, title)],
        last_reviewed_at: reviewed(2024, 11, 1),
        upvotes: 0,
        downvotes: 0,
        derived_from: None,
        last_modified_by: None,
        modification_history: Vec::new(),
    }
}

fn text(en: &str, ko: &str) -> LocalizedText {
    LocalizedText::new(en, ko)
}

fn meta(id: &str, kind: KnowledgeKind, tags: &[&str], trust: TrustMetadata) -> EntryMeta {
    EntryMeta::new(id, kind, tags, trust)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeRecord;

    #[test]
    fn test_catalog_is_valid() {
        validate().unwrap();
    }

    #[test]
    fn test_ids_are_category_prefixed() {
        assert!(relationships().iter().all(|r| r.id().starts_with("REL-")));
        assert!(anti_patterns().iter().all(|a| a.id().starts_with("AP-")));
        assert!(failures().iter().all(|f| f.id().starts_with("FAIL-")));
        assert!(performance_profiles().iter().all(|p| p.id().starts_with("PERF-")));
        assert!(patterns().iter().all(|p| p.id().starts_with("PAT-")));
        assert!(vulnerabilities().iter().all(|v| v.id().starts_with("VULN-")));
        assert!(cloud_services().iter().all(|c| c.id().starts_with("CLOUD-")));
    }

    #[test]
    fn test_kind_discriminants_match_category() {
        assert!(relationships().iter().all(|r| r.meta.kind == KnowledgeKind::Relationship));
        assert!(anti_patterns().iter().all(|a| a.meta.kind == KnowledgeKind::Antipattern));
        assert!(failures().iter().all(|f| f.meta.kind == KnowledgeKind::Failure));
    }

    #[test]
    fn test_failure_playbooks_have_three_steps() {
        for f in failures() {
            assert!(f.prevention.len() >= 3, "{} prevention", f.meta.id);
            assert!(f.mitigation.len() >= 3, "{} mitigation", f.meta.id);
        }
    }

    #[test]
    fn test_profiles_are_unique_per_component() {
        let mut seen = std::collections::HashSet::new();
        for p in performance_profiles() {
            assert!(seen.insert(p.component), "duplicate profile for {}", p.component);
        }
    }
}
