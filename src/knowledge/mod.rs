//! Knowledge record model and per-category query functions.
//!
//! Every record embeds an [`EntryMeta`] (id, kind, tags, trust). The
//! [`KnowledgeRecord`] trait exposes what generic code needs from any
//! category: identity, confidence, searchable text and the component kinds
//! the record is about.

mod antipattern;
mod cloud;
mod failure;
mod pattern;
mod performance;
mod relationship;
mod vulnerability;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::ComponentType;
use crate::error::ValidationError;
use crate::trust::TrustMetadata;

pub use antipattern::{
    anti_pattern_by_id, anti_patterns_by_severity, AntiPattern, Detection, Severity,
};
pub use cloud::{services_by_provider, services_for_component, CloudProvider, CloudService};
pub use failure::{
    failures_by_likelihood, failures_for_component, high_impact_failures, FailureScenario, Impact,
    Likelihood,
};
pub use pattern::{pattern_by_id, patterns_for_component, ArchitecturePattern, PatternComplexity};
pub use performance::{
    profile_for_component, profiles_by_scaling_strategy, LatencyRange, LatencyUnit,
    PerformanceProfile, ScalingStrategy, ThroughputRange,
};
pub use relationship::{
    conflicts, mandatory_dependencies, recommendations, related_components,
    relationships_for_component, ComponentRelationship, Direction, RelatedComponent,
    RelationshipStrength, RelationshipType,
};
pub use vulnerability::{
    vulnerabilities_by_severity, vulnerabilities_for_component, Vulnerability,
    VulnerabilitySeverity,
};

/// Display language for bilingual text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Korean.
    Ko,
}

/// Text authored in English and Korean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// English text.
    pub en: String,
    /// Korean text.
    pub ko: String,
}

impl LocalizedText {
    /// Creates bilingual text.
    #[must_use]
    pub fn new(en: impl Into<String>, ko: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ko: ko.into(),
        }
    }

    /// Returns the text for a locale, falling back to English when the
    /// translation is empty.
    #[must_use]
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ko if !self.ko.is_empty() => &self.ko,
            _ => &self.en,
        }
    }
}

/// Category discriminant of a knowledge entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KnowledgeKind {
    /// Component relationship.
    Relationship,
    /// Architecture pattern.
    Pattern,
    /// Anti-pattern.
    Antipattern,
    /// Failure scenario.
    Failure,
    /// Performance profile.
    Performance,
    /// Vulnerability.
    Vulnerability,
    /// Cloud service mapping.
    CloudService,
}

impl KnowledgeKind {
    /// Stable storage name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relationship => "relationship",
            Self::Pattern => "pattern",
            Self::Antipattern => "antipattern",
            Self::Failure => "failure",
            Self::Performance => "performance",
            Self::Vulnerability => "vulnerability",
            Self::CloudService => "cloud-service",
        }
    }
}

impl fmt::Display for KnowledgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by every knowledge entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMeta {
    /// Globally unique, category-prefixed id (e.g. `AP-SEC-001`).
    pub id: String,

    /// Category discriminant.
    #[serde(rename = "type")]
    pub kind: KnowledgeKind,

    /// Non-empty tag set.
    pub tags: Vec<String>,

    /// Provenance and confidence.
    pub trust: TrustMetadata,
}

impl EntryMeta {
    /// Creates entry metadata.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        kind: KnowledgeKind,
        tags: &[&str],
        trust: TrustMetadata,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            trust,
        }
    }

    /// Returns true if the entry carries the tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Checks the shared invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.tags.is_empty() {
            return Err(ValidationError::MissingTags {
                id: self.id.clone(),
            });
        }
        self.trust.validate(&self.id)
    }
}

/// Common view over every knowledge category.
pub trait KnowledgeRecord: Clone + Send + Sync + 'static {
    /// Category of this record type.
    const KIND: KnowledgeKind;

    /// Shared entry metadata.
    fn meta(&self) -> &EntryMeta;

    /// Bilingual text fields searched by free-text filters.
    fn text_fields(&self) -> Vec<&str>;

    /// Component kinds this record is about.
    fn components(&self) -> Vec<ComponentType>;

    /// Entry id.
    fn id(&self) -> &str {
        &self.meta().id
    }

    /// Authored confidence.
    fn confidence(&self) -> f32 {
        self.meta().trust.confidence
    }

    /// Category-specific invariants beyond [`EntryMeta::validate`].
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    fn validate(&self) -> Result<(), ValidationError> {
        self.meta().validate()
    }
}

/// Removes entries whose id was already seen, keeping first occurrences in order.
#[must_use]
pub fn dedupe_by_id<T: KnowledgeRecord>(entries: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert(e.id().to_string()))
        .collect()
}

/// Validates a collection: per-record invariants plus id uniqueness.
///
/// # Errors
///
/// Returns the first violated invariant.
pub fn validate_collection<T: KnowledgeRecord>(entries: &[T]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for entry in entries {
        entry.validate()?;
        if !seen.insert(entry.id()) {
            return Err(ValidationError::DuplicateId {
                id: entry.id().to_string(),
            });
        }
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::meta;
    use super::*;

    fn rel(id: &str) -> ComponentRelationship {
        ComponentRelationship {
            meta: meta(id, KnowledgeKind::Relationship, 0.9),
            source: ComponentType::WebServer,
            target: ComponentType::Firewall,
            relationship_type: RelationshipType::Requires,
            strength: RelationshipStrength::Mandatory,
            direction: Direction::Upstream,
            reason: LocalizedText::new("reason", "이유"),
        }
    }

    #[test]
    fn test_localized_fallback() {
        let text = LocalizedText::new("hello", "");
        assert_eq!(text.get(Locale::Ko), "hello");
        let text = LocalizedText::new("hello", "안녕");
        assert_eq!(text.get(Locale::Ko), "안녕");
        assert_eq!(text.get(Locale::En), "hello");
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let mut second_a = rel("A");
        second_a.target = ComponentType::Waf;
        let out = dedupe_by_id(vec![rel("A"), rel("B"), second_a, rel("C")]);
        let ids: Vec<_> = out.iter().map(KnowledgeRecord::id).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(out[0].target, ComponentType::Firewall);
    }

    #[test]
    fn test_validate_collection_rejects_duplicates() {
        let err = validate_collection(&[rel("A"), rel("A")]).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateId { .. }));
    }

    #[test]
    fn test_validate_collection_rejects_empty_tags() {
        let mut r = rel("A");
        r.meta.tags.clear();
        let err = validate_collection(&[r]).unwrap_err();
        assert!(matches!(err, ValidationError::MissingTags { .. }));
    }
}
