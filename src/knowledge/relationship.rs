//! Component relationships: what a component requires, recommends, or
//! conflicts with.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::component::ComponentType;

use super::{EntryMeta, KnowledgeKind, KnowledgeRecord, LocalizedText};

/// How two component kinds relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipType {
    /// Source cannot work safely without target.
    Requires,
    /// Target is advised alongside source.
    Recommends,
    /// The two should not be combined.
    Conflicts,
    /// Target improves source.
    Enhances,
    /// Target shields source.
    Protects,
}

impl RelationshipType {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requires => "requires",
            Self::Recommends => "recommends",
            Self::Conflicts => "conflicts",
            Self::Enhances => "enhances",
            Self::Protects => "protects",
        }
    }
}

/// How binding a relationship is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipStrength {
    /// Must be honoured.
    Mandatory,
    /// Advisory.
    Optional,
}

/// Where the target sits relative to the source in the traffic path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Target is upstream of source.
    Upstream,
    /// Target is downstream of source.
    Downstream,
    /// Either way.
    Bidirectional,
}

/// A directed relationship between two component kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRelationship {
    /// Shared header.
    #[serde(flatten)]
    pub meta: EntryMeta,

    /// Component the rule is about.
    pub source: ComponentType,
    /// Component it relates to.
    pub target: ComponentType,
    /// Kind of relationship.
    pub relationship_type: RelationshipType,
    /// How binding it is.
    pub strength: RelationshipStrength,
    /// Placement of target relative to source.
    pub direction: Direction,
    /// Why the relationship holds.
    pub reason: LocalizedText,
}

impl ComponentRelationship {
    /// Returns true if the component is either endpoint.
    #[must_use]
    pub fn involves(&self, ty: ComponentType) -> bool {
        self.source == ty || self.target == ty
    }

    /// Returns true for bidirectional relationships.
    #[must_use]
    pub fn is_bidirectional(&self) -> bool {
        self.direction == Direction::Bidirectional
    }
}

impl KnowledgeRecord for ComponentRelationship {
    const KIND: KnowledgeKind = KnowledgeKind::Relationship;

    fn meta(&self) -> &EntryMeta {
        &self.meta
    }

    fn text_fields(&self) -> Vec<&str> {
        vec![self.reason.en.as_str(), self.reason.ko.as_str()]
    }

    fn components(&self) -> Vec<ComponentType> {
        vec![self.source, self.target]
    }
}

/// The other side of a relationship, as seen from one component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedComponent {
    /// The other component.
    pub component: ComponentType,
    /// Kind of relationship.
    pub relationship_type: RelationshipType,
    /// Why it holds.
    pub reason: LocalizedText,
}

/// All relationships where the component is source or target.
#[must_use]
pub fn relationships_for_component(
    relationships: &[ComponentRelationship],
    ty: ComponentType,
) -> Vec<&ComponentRelationship> {
    relationships.iter().filter(|r| r.involves(ty)).collect()
}

/// Distinct components on the other side of the component's relationships.
///
/// When several relationships point at the same component, the first one wins.
#[must_use]
pub fn related_components(
    relationships: &[ComponentRelationship],
    ty: ComponentType,
) -> Vec<RelatedComponent> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for rel in relationships.iter().filter(|r| r.involves(ty)) {
        let other = if rel.source == ty { rel.target } else { rel.source };
        if seen.insert(other) {
            out.push(RelatedComponent {
                component: other,
                relationship_type: rel.relationship_type,
                reason: rel.reason.clone(),
            });
        }
    }
    out
}

fn outgoing_of_type(
    relationships: &[ComponentRelationship],
    ty: ComponentType,
    relationship_type: RelationshipType,
) -> Vec<&ComponentRelationship> {
    relationships
        .iter()
        .filter(|r| r.source == ty && r.relationship_type == relationship_type)
        .collect()
}

/// `requires` relationships with the component as source.
#[must_use]
pub fn mandatory_dependencies(
    relationships: &[ComponentRelationship],
    ty: ComponentType,
) -> Vec<&ComponentRelationship> {
    outgoing_of_type(relationships, ty, RelationshipType::Requires)
}

/// `recommends` relationships with the component as source.
#[must_use]
pub fn recommendations(
    relationships: &[ComponentRelationship],
    ty: ComponentType,
) -> Vec<&ComponentRelationship> {
    outgoing_of_type(relationships, ty, RelationshipType::Recommends)
}

/// `conflicts` relationships with the component as source.
#[must_use]
pub fn conflicts(
    relationships: &[ComponentRelationship],
    ty: ComponentType,
) -> Vec<&ComponentRelationship> {
    outgoing_of_type(relationships, ty, RelationshipType::Conflicts)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::meta;
    use super::*;

    fn rel(
        id: &str,
        source: ComponentType,
        target: ComponentType,
        relationship_type: RelationshipType,
    ) -> ComponentRelationship {
        ComponentRelationship {
            meta: meta(id, KnowledgeKind::Relationship, 0.9),
            source,
            target,
            relationship_type,
            strength: RelationshipStrength::Optional,
            direction: Direction::Downstream,
            reason: LocalizedText::new(format!("{id} reason"), ""),
        }
    }

    fn sample() -> Vec<ComponentRelationship> {
        use ComponentType::*;
        vec![
            rel("R1", WebServer, Firewall, RelationshipType::Requires),
            rel("R2", WebServer, Cache, RelationshipType::Recommends),
            rel("R3", LoadBalancer, WebServer, RelationshipType::Enhances),
            rel("R4", WebServer, Firewall, RelationshipType::Protects),
            rel("R5", WebServer, DbServer, RelationshipType::Conflicts),
        ]
    }

    #[test]
    fn test_relationships_for_component_matches_either_side() {
        let rels = sample();
        let ids: Vec<_> = relationships_for_component(&rels, ComponentType::WebServer)
            .into_iter()
            .map(|r| r.meta.id.as_str())
            .collect();
        assert_eq!(ids, vec!["R1", "R2", "R3", "R4", "R5"]);
        assert!(relationships_for_component(&rels, ComponentType::Siem).is_empty());
    }

    #[test]
    fn test_related_components_first_occurrence_wins() {
        let rels = sample();
        let related = related_components(&rels, ComponentType::WebServer);
        let firewall = related
            .iter()
            .find(|r| r.component == ComponentType::Firewall)
            .unwrap();
        assert_eq!(firewall.relationship_type, RelationshipType::Requires);
        assert_eq!(related.len(), 4);
    }

    #[test]
    fn test_typed_accessors_use_source_side_only() {
        let rels = sample();
        assert_eq!(mandatory_dependencies(&rels, ComponentType::WebServer).len(), 1);
        assert_eq!(recommendations(&rels, ComponentType::WebServer).len(), 1);
        assert_eq!(conflicts(&rels, ComponentType::WebServer).len(), 1);
        assert!(conflicts(&rels, ComponentType::DbServer).is_empty());
        assert!(mandatory_dependencies(&rels, ComponentType::Firewall).is_empty());
    }
}
