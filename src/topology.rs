//! Topology model: the node/connection graph under analysis.
//!
//! Topologies are small (tens of nodes), so every helper here is a linear
//! scan. Connection endpoints are not validated; callers are expected to
//! supply well-formed graphs.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::component::ComponentType;
use crate::error::{KnowledgeError, KnowledgeResult};

/// A single infrastructure node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfraNode {
    /// Unique node id within the topology.
    pub id: String,

    /// Component kind.
    #[serde(rename = "type")]
    pub component_type: ComponentType,

    /// Display label.
    #[serde(default)]
    pub label: String,

    /// Architectural tier, e.g. `dmz` or `internal`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,

    /// Network zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,

    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InfraNode {
    /// Creates a node whose label defaults to its id.
    #[must_use]
    pub fn new(id: impl Into<String>, component_type: ComponentType) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            component_type,
            tier: None,
            zone: None,
            description: None,
        }
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the zone.
    #[must_use]
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }
}

/// Kind of traffic carried by a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowType {
    /// Client request path.
    Request,
    /// Response path.
    Response,
    /// Replication or synchronization.
    Sync,
    /// Traffic explicitly denied.
    Blocked,
    /// Encrypted tunnel.
    Encrypted,
    /// Any unrecognized flow type.
    #[serde(other)]
    Other,
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Source node id.
    pub source: String,
    /// Target node id.
    pub target: String,

    /// Kind of traffic, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_type: Option<FlowType>,

    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Whether traffic flows both ways.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bidirectional: Option<bool>,
}

impl Connection {
    /// Creates a plain directed connection.
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            flow_type: None,
            label: None,
            bidirectional: None,
        }
    }

    /// Sets the flow type.
    #[must_use]
    pub fn with_flow(mut self, flow_type: FlowType) -> Self {
        self.flow_type = Some(flow_type);
        self
    }

    /// Returns true if the connection touches both ids, in either direction.
    #[must_use]
    pub fn links(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// An infrastructure topology.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfraSpec {
    /// Ordered node list.
    #[serde(default)]
    pub nodes: Vec<InfraNode>,
    /// Connection list.
    #[serde(default)]
    pub connections: Vec<Connection>,
}

impl InfraSpec {
    /// Creates an empty topology.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a topology from its JSON wire format.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the document is not a valid topology.
    pub fn from_json(json: &str) -> KnowledgeResult<Self> {
        serde_json::from_str(json).map_err(|e| KnowledgeError::serialization(e.to_string()))
    }

    /// Appends a node.
    #[must_use]
    pub fn with_node(mut self, node: InfraNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Appends a connection.
    #[must_use]
    pub fn with_connection(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.connections.push(Connection::new(source, target));
        self
    }

    /// Returns true when the topology has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Distinct component kinds present in the topology.
    #[must_use]
    pub fn present_types(&self) -> BTreeSet<ComponentType> {
        self.nodes.iter().map(|n| n.component_type).collect()
    }

    /// Node count per component kind.
    #[must_use]
    pub fn type_counts(&self) -> BTreeMap<ComponentType, usize> {
        let mut counts = BTreeMap::new();
        for node in &self.nodes {
            *counts.entry(node.component_type).or_insert(0) += 1;
        }
        counts
    }

    /// Returns true if at least one node has the given kind.
    #[must_use]
    pub fn has_type(&self, ty: ComponentType) -> bool {
        self.nodes.iter().any(|n| n.component_type == ty)
    }

    /// Number of nodes of the given kind.
    #[must_use]
    pub fn count_of(&self, ty: ComponentType) -> usize {
        self.nodes.iter().filter(|n| n.component_type == ty).count()
    }

    /// Nodes of the given kind, in topology order.
    pub fn nodes_of_type(&self, ty: ComponentType) -> impl Iterator<Item = &InfraNode> {
        self.nodes.iter().filter(move |n| n.component_type == ty)
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&InfraNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Ids of nodes directly connected to `id`, in either direction.
    #[must_use]
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        let mut out = Vec::new();
        for conn in &self.connections {
            let other = if conn.source == id {
                conn.target.as_str()
            } else if conn.target == id {
                conn.source.as_str()
            } else {
                continue;
            };
            if !out.contains(&other) {
                out.push(other);
            }
        }
        out
    }

    /// Returns true if the two node ids share a connection in either direction.
    #[must_use]
    pub fn is_connected(&self, a: &str, b: &str) -> bool {
        self.connections.iter().any(|c| c.links(a, b))
    }

    /// Returns true if any node of kind `a` is directly connected to any node
    /// of kind `b`, regardless of connection direction.
    #[must_use]
    pub fn types_directly_connected(&self, a: ComponentType, b: ComponentType) -> bool {
        self.connections.iter().any(|c| {
            let (Some(src), Some(dst)) = (self.node(&c.source), self.node(&c.target)) else {
                return false;
            };
            (src.component_type == a && dst.component_type == b)
                || (src.component_type == b && dst.component_type == a)
        })
    }

    /// Returns true if any node of kind `from` has an outgoing connection to
    /// a node of kind `to`.
    #[must_use]
    pub fn has_edge_between_types(&self, from: ComponentType, to: ComponentType) -> bool {
        self.connections.iter().any(|c| {
            matches!(
                (self.node(&c.source), self.node(&c.target)),
                (Some(src), Some(dst)) if src.component_type == from && dst.component_type == to
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_tier() -> InfraSpec {
        InfraSpec::new()
            .with_node(InfraNode::new("inet", ComponentType::Internet))
            .with_node(InfraNode::new("fw", ComponentType::Firewall))
            .with_node(InfraNode::new("web-1", ComponentType::WebServer))
            .with_node(InfraNode::new("web-2", ComponentType::WebServer))
            .with_connection("inet", "fw")
            .with_connection("fw", "web-1")
            .with_connection("fw", "web-2")
    }

    #[test]
    fn test_present_types_and_counts() {
        let spec = three_tier();
        assert_eq!(spec.present_types().len(), 3);
        assert_eq!(spec.count_of(ComponentType::WebServer), 2);
        assert_eq!(spec.type_counts()[&ComponentType::Firewall], 1);
        assert!(!spec.has_type(ComponentType::DbServer));
    }

    #[test]
    fn test_neighbors_are_undirected_and_distinct() {
        let spec = three_tier().with_connection("web-1", "fw");
        assert_eq!(spec.neighbors("fw"), vec!["inet", "web-1", "web-2"]);
        assert_eq!(spec.neighbors("web-1"), vec!["fw"]);
    }

    #[test]
    fn test_type_connectivity() {
        let spec = three_tier();
        assert!(spec.types_directly_connected(ComponentType::WebServer, ComponentType::Firewall));
        assert!(!spec.types_directly_connected(ComponentType::Internet, ComponentType::WebServer));
        assert!(spec.has_edge_between_types(ComponentType::Firewall, ComponentType::WebServer));
        assert!(!spec.has_edge_between_types(ComponentType::WebServer, ComponentType::Firewall));
    }

    #[test]
    fn test_dangling_connection_is_ignored() {
        let spec = three_tier().with_connection("ghost", "web-1");
        assert!(!spec.types_directly_connected(ComponentType::Unknown, ComponentType::WebServer));
    }

    #[test]
    fn test_parse_wire_format() {
        let json = r#"{
            "nodes": [
                {"id": "db-1", "type": "db-server", "label": "Primary DB", "zone": "internal"},
                {"id": "inet-1", "type": "internet"}
            ],
            "connections": [
                {"source": "db-1", "target": "inet-1", "flowType": "request"}
            ]
        }"#;
        let spec = InfraSpec::from_json(json).unwrap();
        assert_eq!(spec.nodes[0].component_type, ComponentType::DbServer);
        assert_eq!(spec.nodes[0].zone.as_deref(), Some("internal"));
        assert_eq!(spec.connections[0].flow_type, Some(FlowType::Request));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = InfraSpec::from_json("{\"nodes\": 3}").unwrap_err();
        assert!(err.is_serialization());
    }
}
