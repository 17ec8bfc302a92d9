//! Recommended architecture patterns.

use serde::{Deserialize, Serialize};

use crate::component::ComponentType;

use super::{EntryMeta, KnowledgeKind, KnowledgeRecord, LocalizedText};

/// Operational complexity of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternComplexity {
    /// Few moving parts.
    Low,
    /// Some operational effort.
    Medium,
    /// Needs a dedicated team.
    High,
}

/// A reference architecture built from a set of component kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitecturePattern {
    /// Shared header.
    #[serde(flatten)]
    pub meta: EntryMeta,

    /// Display name.
    pub name: LocalizedText,
    /// What the pattern is.
    pub description: LocalizedText,

    /// Components the pattern is made of.
    pub required_components: Vec<ComponentType>,
    /// Components that fit but are not needed.
    #[serde(default)]
    pub optional_components: Vec<ComponentType>,

    /// Situations it suits.
    pub best_for: Vec<LocalizedText>,
    /// Situations it does not suit.
    pub not_for: Vec<LocalizedText>,
    /// Operational complexity.
    pub complexity: PatternComplexity,
}

impl ArchitecturePattern {
    /// Fraction of required components present in `present`, in [0, 1].
    #[must_use]
    pub fn coverage(&self, present: &std::collections::BTreeSet<ComponentType>) -> f32 {
        if self.required_components.is_empty() {
            return 0.0;
        }
        let hits = self
            .required_components
            .iter()
            .filter(|c| present.contains(c))
            .count();
        #[allow(clippy::cast_precision_loss)]
        let ratio = hits as f32 / self.required_components.len() as f32;
        ratio
    }
}

impl KnowledgeRecord for ArchitecturePattern {
    const KIND: KnowledgeKind = KnowledgeKind::Pattern;

    fn meta(&self) -> &EntryMeta {
        &self.meta
    }

    fn text_fields(&self) -> Vec<&str> {
        [&self.name, &self.description]
            .into_iter()
            .chain(self.best_for.iter())
            .chain(self.not_for.iter())
            .flat_map(|t| [t.en.as_str(), t.ko.as_str()])
            .collect()
    }

    fn components(&self) -> Vec<ComponentType> {
        self.required_components
            .iter()
            .chain(self.optional_components.iter())
            .copied()
            .collect()
    }
}

/// Looks up a pattern by id.
#[must_use]
pub fn pattern_by_id<'a>(patterns: &'a [ArchitecturePattern], id: &str) -> Option<&'a ArchitecturePattern> {
    patterns.iter().find(|p| p.meta.id == id)
}

/// Patterns that use the component, as required or optional.
#[must_use]
pub fn patterns_for_component(patterns: &[ArchitecturePattern], ty: ComponentType) -> Vec<&ArchitecturePattern> {
    patterns
        .iter()
        .filter(|p| p.required_components.contains(&ty) || p.optional_components.contains(&ty))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::super::test_support::meta;
    use super::*;

    fn three_tier() -> ArchitecturePattern {
        ArchitecturePattern {
            meta: meta("PAT-001", KnowledgeKind::Pattern, 0.95),
            name: LocalizedText::new("Three-tier web", "3계층 웹"),
            description: LocalizedText::new("web, app, db", "웹, 앱, DB"),
            required_components: vec![
                ComponentType::WebServer,
                ComponentType::AppServer,
                ComponentType::DbServer,
            ],
            optional_components: vec![ComponentType::Cache],
            best_for: vec![],
            not_for: vec![],
            complexity: PatternComplexity::Medium,
        }
    }

    #[test]
    fn test_coverage() {
        let p = three_tier();
        let present: BTreeSet<_> = [ComponentType::WebServer, ComponentType::DbServer].into();
        assert!((p.coverage(&present) - 2.0 / 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_lookup() {
        let list = vec![three_tier()];
        assert!(pattern_by_id(&list, "PAT-001").is_some());
        assert!(pattern_by_id(&list, "PAT-999").is_none());
        assert_eq!(patterns_for_component(&list, ComponentType::Cache).len(), 1);
        assert!(patterns_for_component(&list, ComponentType::Siem).is_empty());
    }
}
