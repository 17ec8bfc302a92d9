//! Performance profiles: latency, throughput and scaling characteristics
//! of a component kind.

use serde::{Deserialize, Serialize};

use crate::component::ComponentType;
use crate::error::ValidationError;

use super::{EntryMeta, KnowledgeKind, KnowledgeRecord, LocalizedText};

/// Unit of a latency range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatencyUnit {
    /// Milliseconds.
    Ms,
    /// Microseconds.
    Us,
}

/// Typical latency band. `min` must be strictly below `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
    /// Unit of both bounds.
    pub unit: LatencyUnit,
}

/// Throughput figures as published (free text, e.g. "10K RPS").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThroughputRange {
    /// Typical throughput, e.g. `10k RPS`.
    pub typical: String,
    /// Peak throughput.
    pub max: String,
}

/// How a component scales out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingStrategy {
    /// Add instances.
    Horizontal,
    /// Grow instances.
    Vertical,
    /// Either.
    Both,
}

/// Performance characteristics of one component kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceProfile {
    /// Shared header.
    #[serde(flatten)]
    pub meta: EntryMeta,

    /// Unique across profiles.
    pub component: ComponentType,
    /// Expected latency.
    pub latency_range: LatencyRange,
    /// Expected throughput.
    pub throughput_range: ThroughputRange,
    /// Preferred scaling.
    pub scaling_strategy: ScalingStrategy,
    /// Signs the component is saturated.
    pub bottleneck_indicators: Vec<LocalizedText>,
    /// Tuning advice.
    pub optimization_tips: Vec<LocalizedText>,
}

impl KnowledgeRecord for PerformanceProfile {
    const KIND: KnowledgeKind = KnowledgeKind::Performance;

    fn meta(&self) -> &EntryMeta {
        &self.meta
    }

    fn text_fields(&self) -> Vec<&str> {
        self.bottleneck_indicators
            .iter()
            .chain(self.optimization_tips.iter())
            .flat_map(|t| [t.en.as_str(), t.ko.as_str()])
            .collect()
    }

    fn components(&self) -> Vec<ComponentType> {
        vec![self.component]
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.meta.validate()?;
        if self.latency_range.min >= self.latency_range.max {
            return Err(ValidationError::InvalidLatencyRange {
                id: self.meta.id.clone(),
                min: self.latency_range.min,
                max: self.latency_range.max,
            });
        }
        Ok(())
    }
}

/// Profile of the component kind, if one exists.
#[must_use]
pub fn profile_for_component(profiles: &[PerformanceProfile], ty: ComponentType) -> Option<&PerformanceProfile> {
    profiles.iter().find(|p| p.component == ty)
}

/// Profiles using exactly the given scaling strategy.
#[must_use]
pub fn profiles_by_scaling_strategy(
    profiles: &[PerformanceProfile],
    strategy: ScalingStrategy,
) -> Vec<&PerformanceProfile> {
    profiles.iter().filter(|p| p.scaling_strategy == strategy).collect()
}
