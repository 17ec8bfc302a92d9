//! Context enrichment: what the knowledge base has to say about a topology.
//!
//! [`enrich_context`] selects the relationships, missing-dependency
//! suggestions, conflicts, anti-pattern violations and failure risks that
//! apply to a topology. [`prompt`] renders the result as a text block for an
//! LLM system prompt.

pub mod prompt;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::component::ComponentType;
use crate::evaluator::detect_anti_patterns;
use crate::knowledge::{
    dedupe_by_id, AntiPattern, ComponentRelationship, FailureScenario, KnowledgeRecord,
    RelationshipType,
};
use crate::topology::InfraSpec;
use crate::trust::DEFAULT_MIN_CONFIDENCE;

pub use prompt::{build_knowledge_prompt_section, PromptSection};

/// Optional collaborators for [`enrich_context`]. Missing inputs produce
/// empty violation and risk lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnrichOptions<'a> {
    /// Candidates evaluated into [`EnrichedContext::violations`].
    pub anti_patterns: Option<&'a [AntiPattern]>,
    /// Scenarios filtered into [`EnrichedContext::risks`].
    pub failures: Option<&'a [FailureScenario]>,
}

impl<'a> EnrichOptions<'a> {
    /// Options with no collaborators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies anti-pattern candidates.
    #[must_use]
    pub fn with_anti_patterns(mut self, anti_patterns: &'a [AntiPattern]) -> Self {
        self.anti_patterns = Some(anti_patterns);
        self
    }

    /// Supplies failure scenarios.
    #[must_use]
    pub fn with_failures(mut self, failures: &'a [FailureScenario]) -> Self {
        self.failures = Some(failures);
        self
    }
}

/// Knowledge that applies to one topology.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedContext {
    /// Relationships whose endpoints are both present, conflicts included.
    pub relationships: Vec<ComponentRelationship>,

    /// Requires/recommends relationships with a missing endpoint, requires
    /// first, then by descending confidence.
    pub suggestions: Vec<ComponentRelationship>,

    /// Conflicting pairs that are both present, one entry per id.
    pub conflicts: Vec<ComponentRelationship>,

    /// Matching anti-patterns, in candidate order.
    pub violations: Vec<AntiPattern>,

    /// Failure scenarios for present components, most severe impact first.
    pub risks: Vec<FailureScenario>,
}

impl EnrichedContext {
    /// True when nothing applies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
            && self.suggestions.is_empty()
            && self.conflicts.is_empty()
            && self.violations.is_empty()
            && self.risks.is_empty()
    }
}

fn is_suggestion(rel: &ComponentRelationship, present: &BTreeSet<ComponentType>) -> bool {
    if !matches!(
        rel.relationship_type,
        RelationshipType::Requires | RelationshipType::Recommends
    ) {
        return false;
    }
    let has_source = present.contains(&rel.source);
    let has_target = present.contains(&rel.target);
    (has_source && !has_target) || (rel.is_bidirectional() && has_target && !has_source)
}

fn suggestion_rank(ty: RelationshipType) -> u8 {
    match ty {
        RelationshipType::Requires => 0,
        _ => 1,
    }
}

/// Selects the knowledge relevant to `spec`.
///
/// Only relationships with confidence of at least 0.5 are considered.
#[must_use]
pub fn enrich_context(
    spec: &InfraSpec,
    relationships: &[ComponentRelationship],
    options: EnrichOptions<'_>,
) -> EnrichedContext {
    let present = spec.present_types();
    let confident: Vec<&ComponentRelationship> = relationships
        .iter()
        .filter(|r| r.confidence() >= DEFAULT_MIN_CONFIDENCE)
        .collect();

    let both_present =
        |r: &ComponentRelationship| present.contains(&r.source) && present.contains(&r.target);

    let relevant = confident
        .iter()
        .filter(|r| r.relationship_type != RelationshipType::Conflicts && both_present(**r));
    let conflicts: Vec<ComponentRelationship> = dedupe_by_id(
        confident
            .iter()
            .filter(|r| r.relationship_type == RelationshipType::Conflicts && both_present(**r))
            .map(|r| (*r).clone())
            .collect(),
    );

    let merged = dedupe_by_id(
        relevant
            .map(|r| (*r).clone())
            .chain(conflicts.iter().cloned())
            .collect(),
    );

    let mut suggestions = dedupe_by_id(
        confident
            .iter()
            .filter(|r| is_suggestion(r, &present))
            .map(|r| (*r).clone())
            .collect(),
    );
    suggestions.sort_by(|a, b| {
        suggestion_rank(a.relationship_type)
            .cmp(&suggestion_rank(b.relationship_type))
            .then_with(|| b.confidence().total_cmp(&a.confidence()))
    });

    let violations = options
        .anti_patterns
        .map(|candidates| detect_anti_patterns(spec, candidates))
        .unwrap_or_default();

    let mut risks: Vec<FailureScenario> = options
        .failures
        .unwrap_or_default()
        .iter()
        .filter(|f| present.contains(&f.component))
        .cloned()
        .collect();
    risks.sort_by_key(|f| f.impact.rank());

    tracing::debug!(
        present = present.len(),
        relationships = merged.len(),
        suggestions = suggestions.len(),
        conflicts = conflicts.len(),
        violations = violations.len(),
        risks = risks.len(),
        "context enriched"
    );

    EnrichedContext {
        relationships: merged,
        suggestions,
        conflicts,
        violations,
        risks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::knowledge::{Direction, EntryMeta, KnowledgeKind, LocalizedText, RelationshipStrength};
    use crate::topology::InfraNode;
    use crate::trust::{SourceCitation, SourceType, TrustMetadata};

    fn rel(
        id: &str,
        (source, target): (ComponentType, ComponentType),
        relationship_type: RelationshipType,
        direction: Direction,
        confidence: f32,
    ) -> ComponentRelationship {
        let trust = TrustMetadata::new(
            confidence,
            SourceCitation::new(SourceType::Research, "test"),
            chrono::Utc::now(),
        )
        .unwrap();
        ComponentRelationship {
            meta: EntryMeta::new(id, KnowledgeKind::Relationship, &["test"], trust),
            source,
            target,
            relationship_type,
            strength: RelationshipStrength::Optional,
            direction,
            reason: LocalizedText::new("because", "왜냐하면"),
        }
    }

    fn spec(types: &[ComponentType]) -> InfraSpec {
        types
            .iter()
            .enumerate()
            .fold(InfraSpec::new(), |s, (i, ty)| s.with_node(InfraNode::new(format!("n{i}"), *ty)))
    }

    #[test]
    fn test_confidence_boundary_is_inclusive() {
        use ComponentType::{Cache, WebServer};
        let rels = vec![
            rel("R1", (WebServer, Cache), RelationshipType::Enhances, Direction::Downstream, 0.5),
            rel("R2", (WebServer, Cache), RelationshipType::Enhances, Direction::Downstream, 0.49),
        ];
        let out = enrich_context(&spec(&[WebServer, Cache]), &rels, EnrichOptions::new());
        let ids: Vec<_> = out.relationships.iter().map(|r| r.meta.id.as_str()).collect();
        assert_eq!(ids, ["R1"]);
    }

    #[test]
    fn test_suggestions_requires_first_then_confidence() {
        use ComponentType::{Backup, Cache, DbServer, Firewall, Monitoring};
        let rels = vec![
            rel("R-REC-LOW", (DbServer, Monitoring), RelationshipType::Recommends, Direction::Downstream, 0.6),
            rel("R-REQ-LOW", (DbServer, Backup), RelationshipType::Requires, Direction::Downstream, 0.7),
            rel("R-REC-HIGH", (DbServer, Cache), RelationshipType::Recommends, Direction::Downstream, 0.9),
            rel("R-REQ-HIGH", (DbServer, Firewall), RelationshipType::Requires, Direction::Upstream, 0.95),
        ];
        let out = enrich_context(&spec(&[DbServer]), &rels, EnrichOptions::new());
        let ids: Vec<_> = out.suggestions.iter().map(|r| r.meta.id.as_str()).collect();
        assert_eq!(ids, ["R-REQ-HIGH", "R-REQ-LOW", "R-REC-HIGH", "R-REC-LOW"]);
    }

    #[test]
    fn test_bidirectional_suggestion_is_symmetric() {
        use ComponentType::{Logging, Siem};
        let rels = vec![rel("R1", (Siem, Logging), RelationshipType::Requires, Direction::Bidirectional, 0.9)];
        let out = enrich_context(&spec(&[Logging]), &rels, EnrichOptions::new());
        assert_eq!(out.suggestions.len(), 1);

        let one_way = vec![rel("R2", (Siem, Logging), RelationshipType::Requires, Direction::Downstream, 0.9)];
        let out = enrich_context(&spec(&[Logging]), &one_way, EnrichOptions::new());
        assert!(out.suggestions.is_empty());
    }

    #[test]
    fn test_conflicts_join_relationships() {
        use ComponentType::{SaseGateway, VpnGateway};
        let out = enrich_context(
            &spec(&[SaseGateway, VpnGateway]),
            catalog::relationships(),
            EnrichOptions::new(),
        );
        assert!(out.conflicts.iter().any(|r| r.meta.id == "REL-019"));
        assert!(out.relationships.iter().any(|r| r.meta.id == "REL-019"));
    }

    #[test]
    fn test_duplicate_ids_are_collapsed() {
        use ComponentType::{Cache, WebServer};
        let r = rel("DUP", (WebServer, Cache), RelationshipType::Recommends, Direction::Downstream, 0.8);
        let rels = vec![r.clone(), r];
        let out = enrich_context(&spec(&[WebServer]), &rels, EnrichOptions::new());
        assert_eq!(out.suggestions.len(), 1);
    }

    #[test]
    fn test_duplicate_conflicts_are_collapsed() {
        use ComponentType::{SaseGateway, VpnGateway};
        let r = rel("CONF", (SaseGateway, VpnGateway), RelationshipType::Conflicts, Direction::Bidirectional, 0.8);
        let rels = vec![r.clone(), r];
        let out = enrich_context(&spec(&[SaseGateway, VpnGateway]), &rels, EnrichOptions::new());
        assert_eq!(out.conflicts.len(), 1);
        assert_eq!(out.relationships.len(), 1);

        let text = crate::enrich::build_knowledge_prompt_section(&out, 0.5);
        assert_eq!(text.matches("[CONFLICT]").count(), 1);
    }

    #[test]
    fn test_missing_collaborators_yield_empty_sets() {
        let topology = spec(&[ComponentType::DbServer, ComponentType::Internet]);
        let out = enrich_context(&topology, catalog::relationships(), EnrichOptions::new());
        assert!(out.violations.is_empty());
        assert!(out.risks.is_empty());
    }

    #[test]
    fn test_risks_sorted_by_impact() {
        let topology = spec(&[ComponentType::DbServer, ComponentType::Cache, ComponentType::Firewall]);
        let options = EnrichOptions::new().with_failures(catalog::failures());
        let out = enrich_context(&topology, &[], options);
        let ranks: Vec<_> = out.risks.iter().map(|f| f.impact.rank()).collect();
        let mut sorted = ranks.clone();
        sorted.sort_unstable();
        assert_eq!(ranks, sorted);
        assert!(!out.risks.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let topology = spec(&[ComponentType::WebServer, ComponentType::DbServer, ComponentType::Internet]);
        let options = EnrichOptions::new()
            .with_anti_patterns(catalog::anti_patterns())
            .with_failures(catalog::failures());
        let a = enrich_context(&topology, catalog::relationships(), options);
        let b = enrich_context(&topology, catalog::relationships(), options);
        assert_eq!(a, b);
    }
}
