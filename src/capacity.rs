//! Capacity estimation over a sizing table.
//!
//! Every covered component type contributes `per_instance_rps * count` to the
//! topology; the smallest contribution bounds the whole system. Per-instance
//! ceilings are always read from the [`TrafficTier::Small`] row, whatever tier
//! the topology is actually provisioned for.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::ComponentType;
use crate::error::ValidationError;
use crate::knowledge::LocalizedText;
use crate::topology::InfraSpec;

/// Traffic classification by sustained requests per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficTier {
    /// Below 1k RPS.
    #[default]
    Small,
    /// 1k to 10k RPS.
    Medium,
    /// 10k to 100k RPS.
    Large,
    /// 100k RPS and above.
    Enterprise,
}

impl TrafficTier {
    /// All tiers, smallest first.
    pub const ALL: [Self; 4] = [Self::Small, Self::Medium, Self::Large, Self::Enterprise];

    /// Minimum RPS a system must sustain to qualify for the tier.
    #[must_use]
    pub const fn min_rps(self) -> u64 {
        match self {
            Self::Small => 0,
            Self::Medium => 1_000,
            Self::Large => 10_000,
            Self::Enterprise => 100_000,
        }
    }

    /// Buckets a throughput figure, checking the largest threshold first.
    #[must_use]
    pub fn from_rps(rps: u64) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|tier| rps >= tier.min_rps())
            .unwrap_or(Self::Small)
    }

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for TrafficTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instance count and machine shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSpec {
    /// Number of instances.
    pub instance_count: u32,
    /// Instance size, e.g. `4 vCPU / 8 GB`.
    pub spec: String,
}

impl InstanceSpec {
    /// Creates an instance spec.
    #[must_use]
    pub fn new(instance_count: u32, spec: impl Into<String>) -> Self {
        Self {
            instance_count,
            spec: spec.into(),
        }
    }
}

/// Sizing guidance for one (component type, traffic tier) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizingEntry {
    /// Suggested deployment.
    pub recommended: InstanceSpec,
    /// Smallest deployment that holds the tier.
    pub minimum: InstanceSpec,
    /// Scaling advice.
    pub scaling_notes: LocalizedText,
    /// Rough monthly cost range.
    pub estimated_monthly_cost: String,

    /// Throughput ceiling of a single instance at this tier.
    #[serde(rename = "maxRPS")]
    pub max_rps: u64,
}

/// Sizing entries keyed by component type and traffic tier.
#[derive(Debug, Clone, Default)]
pub struct SizingTable {
    entries: BTreeMap<(ComponentType, TrafficTier), SizingEntry>,
}

impl SizingTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, component: ComponentType, tier: TrafficTier, entry: SizingEntry) {
        self.entries.insert((component, tier), entry);
    }

    /// Entry for `component` at `tier`.
    #[must_use]
    pub fn get(&self, component: ComponentType, tier: TrafficTier) -> Option<&SizingEntry> {
        self.entries.get(&(component, tier))
    }

    /// Canonical per-instance ceiling: the small-tier `max_rps`.
    #[must_use]
    pub fn per_instance_rps(&self, component: ComponentType) -> Option<u64> {
        self.get(component, TrafficTier::Small).map(|e| e.max_rps)
    }

    /// Component types with at least one entry, in sorted order.
    #[must_use]
    pub fn components(&self) -> Vec<ComponentType> {
        let mut out: Vec<ComponentType> = self.entries.keys().map(|(c, _)| *c).collect();
        out.dedup();
        out
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks instance counts and that `max_rps` never decreases from one
    /// tier to the next for the same component.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSizing`] on the first violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut previous: Option<(ComponentType, u64)> = None;
        // Keys iterate grouped by component, tiers ascending.
        for ((component, tier), entry) in &self.entries {
            if entry.recommended.instance_count == 0 || entry.minimum.instance_count == 0 {
                return Err(ValidationError::InvalidSizing {
                    component: component.to_string(),
                    reason: format!("zero instance count at tier {tier}"),
                });
            }
            if entry.minimum.instance_count > entry.recommended.instance_count {
                return Err(ValidationError::InvalidSizing {
                    component: component.to_string(),
                    reason: format!("minimum exceeds recommended at tier {tier}"),
                });
            }
            if let Some((prev_component, prev_rps)) = previous {
                if prev_component == *component && entry.max_rps < prev_rps {
                    return Err(ValidationError::InvalidSizing {
                        component: component.to_string(),
                        reason: format!("maxRPS decreases at tier {tier}"),
                    });
                }
            }
            previous = Some((*component, entry.max_rps));
        }
        Ok(())
    }
}

/// A component type limiting overall throughput.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bottleneck {
    /// The limiting component type.
    pub component_type: ComponentType,
    /// Why it limits throughput.
    pub reason: String,

    /// Aggregate throughput of all instances of this type.
    #[serde(rename = "maxRPS")]
    pub max_rps: u64,
    /// How to lift the limit.
    pub recommendation: String,
}

/// Which tiers the topology can sustain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanHandle {
    /// Small tier.
    pub small: bool,
    /// Medium tier.
    pub medium: bool,
    /// Large tier.
    pub large: bool,
    /// Enterprise tier.
    pub enterprise: bool,
}

impl CanHandle {
    fn for_rps(rps: u64) -> Self {
        Self {
            small: rps >= TrafficTier::Small.min_rps(),
            medium: rps >= TrafficTier::Medium.min_rps(),
            large: rps >= TrafficTier::Large.min_rps(),
            enterprise: rps >= TrafficTier::Enterprise.min_rps(),
        }
    }

    /// Whether `tier` is sustainable.
    #[must_use]
    pub const fn get(&self, tier: TrafficTier) -> bool {
        match tier {
            TrafficTier::Small => self.small,
            TrafficTier::Medium => self.medium,
            TrafficTier::Large => self.large,
            TrafficTier::Enterprise => self.enterprise,
        }
    }
}

/// Architecture-wide capacity estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityEstimate {
    /// Highest tier the topology sustains.
    pub current_tier: TrafficTier,

    /// Throughput ceiling across covered component types.
    #[serde(rename = "maxRPS")]
    pub max_rps: u64,
    /// Types within twice the ceiling.
    pub bottlenecks: Vec<Bottleneck>,
    /// Per-tier verdicts.
    pub can_handle: CanHandle,
}

/// Sizing guidance for one present component type at a target tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizingRecommendation {
    /// Component type being sized.
    pub component_type: ComponentType,
    /// Tier being sized for.
    pub target_tier: TrafficTier,
    /// Instances in the topology today.
    pub current_count: u32,
    /// Suggested deployment.
    pub recommended: InstanceSpec,
    /// Minimum deployment.
    pub minimum: InstanceSpec,

    /// Instances to add to reach the recommended count; zero when already met.
    pub additional_instances: u32,
    /// Rough monthly cost range.
    pub estimated_monthly_cost: String,
}

struct Coverage {
    component: ComponentType,
    count: u32,
    total_rps: u64,
}

fn coverage(spec: &InfraSpec, table: &SizingTable) -> Vec<Coverage> {
    spec.type_counts()
        .into_iter()
        .filter_map(|(component, count)| {
            let per_instance = table.per_instance_rps(component)?;
            let count = u32::try_from(count).unwrap_or(u32::MAX);
            Some(Coverage {
                component,
                count,
                total_rps: per_instance.saturating_mul(u64::from(count)),
            })
        })
        .collect()
}

fn effective_max(covered: &[Coverage]) -> u64 {
    covered.iter().map(|c| c.total_rps).min().unwrap_or(0)
}

fn bottlenecks_of(covered: &[Coverage], effective: u64) -> Vec<Bottleneck> {
    let ceiling = effective.saturating_mul(2);
    let mut out: Vec<Bottleneck> = covered
        .iter()
        .filter(|c| c.total_rps <= ceiling)
        .map(|c| Bottleneck {
            component_type: c.component,
            reason: format!(
                "{} x {} sustains about {} RPS, within 2x of the system ceiling ({} RPS)",
                c.count, c.component, c.total_rps, effective
            ),
            max_rps: c.total_rps,
            recommendation: format!(
                "Scale {} from {} to {} instances",
                c.component,
                c.count,
                c.count.saturating_mul(2)
            ),
        })
        .collect();
    out.sort_by_key(|b| b.max_rps);
    out
}

/// Component types whose aggregate throughput is within 2x of the weakest
/// covered link, ascending by throughput. Empty when nothing is covered.
#[must_use]
pub fn find_bottlenecks(spec: &InfraSpec, table: &SizingTable) -> Vec<Bottleneck> {
    let covered = coverage(spec, table);
    bottlenecks_of(&covered, effective_max(&covered))
}

/// Estimates throughput ceiling, tier and bottlenecks for the topology.
#[must_use]
pub fn estimate_capacity(spec: &InfraSpec, table: &SizingTable) -> CapacityEstimate {
    let covered = coverage(spec, table);
    let max_rps = effective_max(&covered);
    let estimate = CapacityEstimate {
        current_tier: TrafficTier::from_rps(max_rps),
        max_rps,
        bottlenecks: bottlenecks_of(&covered, max_rps),
        can_handle: CanHandle::for_rps(max_rps),
    };
    tracing::debug!(
        covered = covered.len(),
        max_rps,
        tier = %estimate.current_tier,
        bottlenecks = estimate.bottlenecks.len(),
        "capacity estimated"
    );
    estimate
}

/// Sizing entries for every present, covered component at `tier`.
#[must_use]
pub fn recommend_sizing(spec: &InfraSpec, table: &SizingTable, tier: TrafficTier) -> Vec<SizingRecommendation> {
    spec.type_counts()
        .into_iter()
        .filter_map(|(component, count)| {
            let entry = table.get(component, tier)?;
            let current_count = u32::try_from(count).unwrap_or(u32::MAX);
            Some(SizingRecommendation {
                component_type: component,
                target_tier: tier,
                current_count,
                recommended: entry.recommended.clone(),
                minimum: entry.minimum.clone(),
                additional_instances: entry.recommended.instance_count.saturating_sub(current_count),
                estimated_monthly_cost: entry.estimated_monthly_cost.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::InfraNode;

    fn entry(count: u32, max_rps: u64) -> SizingEntry {
        SizingEntry {
            recommended: InstanceSpec::new(count, "2 vCPU"),
            minimum: InstanceSpec::new(1, "1 vCPU"),
            scaling_notes: LocalizedText::new("scale out", "수평 확장"),
            estimated_monthly_cost: "$100".into(),
            max_rps,
        }
    }

    fn table() -> SizingTable {
        let mut t = SizingTable::new();
        t.insert(ComponentType::WebServer, TrafficTier::Small, entry(2, 500));
        t.insert(ComponentType::WebServer, TrafficTier::Medium, entry(4, 2_000));
        t.insert(ComponentType::LoadBalancer, TrafficTier::Small, entry(1, 5_000));
        t.insert(ComponentType::LoadBalancer, TrafficTier::Medium, entry(2, 20_000));
        t
    }

    fn lb_and_webs(webs: usize) -> InfraSpec {
        let mut spec = InfraSpec::new().with_node(InfraNode::new("lb-1", ComponentType::LoadBalancer));
        for i in 0..webs {
            spec = spec.with_node(InfraNode::new(format!("web-{i}"), ComponentType::WebServer));
        }
        spec
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(TrafficTier::from_rps(0), TrafficTier::Small);
        assert_eq!(TrafficTier::from_rps(999), TrafficTier::Small);
        assert_eq!(TrafficTier::from_rps(1_000), TrafficTier::Medium);
        assert_eq!(TrafficTier::from_rps(10_000), TrafficTier::Large);
        assert_eq!(TrafficTier::from_rps(99_999), TrafficTier::Large);
        assert_eq!(TrafficTier::from_rps(100_000), TrafficTier::Enterprise);
    }

    #[test]
    fn test_empty_topology() {
        let est = estimate_capacity(&InfraSpec::new(), &table());
        assert_eq!(est.max_rps, 0);
        assert_eq!(est.current_tier, TrafficTier::Small);
        assert!(est.bottlenecks.is_empty());
        assert!(est.can_handle.small);
        assert!(!est.can_handle.medium);
    }

    #[test]
    fn test_web_tier_is_first_bottleneck() {
        let b = find_bottlenecks(&lb_and_webs(2), &table());
        assert_eq!(b.len(), 1);
        assert_eq!(b[0].component_type, ComponentType::WebServer);
        assert_eq!(b[0].max_rps, 1_000);
        assert!(b[0].recommendation.contains("to 4"));
    }

    #[test]
    fn test_uses_small_tier_ceiling() {
        let est = estimate_capacity(&lb_and_webs(2), &table());
        assert_eq!(est.max_rps, 1_000);
        assert_eq!(est.current_tier, TrafficTier::Medium);
        assert!(est.can_handle.get(TrafficTier::Medium));
        assert!(!est.can_handle.get(TrafficTier::Large));
    }

    #[test]
    fn test_bottlenecks_sorted_ascending() {
        // 6 webs = 3000 RPS, within 2x of itself; LB at 5000 is within 6000.
        let b = find_bottlenecks(&lb_and_webs(6), &table());
        assert_eq!(b.len(), 2);
        assert!(b[0].max_rps <= b[1].max_rps);
        assert_eq!(b[0].component_type, ComponentType::WebServer);
    }

    #[test]
    fn test_uncovered_types_are_ignored() {
        let spec = InfraSpec::new().with_node(InfraNode::new("siem", ComponentType::Siem));
        assert_eq!(estimate_capacity(&spec, &table()).max_rps, 0);
    }

    #[test]
    fn test_recommend_sizing_gap() {
        let recs = recommend_sizing(&lb_and_webs(1), &table(), TrafficTier::Medium);
        let web = recs
            .iter()
            .find(|r| r.component_type == ComponentType::WebServer)
            .unwrap();
        assert_eq!(web.current_count, 1);
        assert_eq!(web.additional_instances, 3);
        assert!(recommend_sizing(&lb_and_webs(1), &table(), TrafficTier::Enterprise).is_empty());
    }

    #[test]
    fn test_validate_rejects_decreasing_ceiling() {
        let mut t = table();
        assert!(t.validate().is_ok());
        t.insert(ComponentType::WebServer, TrafficTier::Large, entry(8, 100));
        assert!(matches!(t.validate(), Err(ValidationError::InvalidSizing { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_instances() {
        let mut t = SizingTable::new();
        t.insert(ComponentType::Cache, TrafficTier::Small, entry(0, 100));
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_estimate_serializes_wire_names() {
        let json = serde_json::to_value(estimate_capacity(&lb_and_webs(2), &table())).unwrap();
        assert_eq!(json["maxRPS"], 1_000);
        assert_eq!(json["currentTier"], "medium");
        assert_eq!(json["bottlenecks"][0]["componentType"], "web-server");
        assert_eq!(json["canHandle"]["medium"], true);
    }
}
