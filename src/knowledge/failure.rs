//! Failure scenarios and their prevention/mitigation playbooks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::ComponentType;

use super::{EntryMeta, KnowledgeKind, KnowledgeRecord, LocalizedText};

/// Consequence of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Impact {
    /// The service stops.
    ServiceDown,
    /// The service slows or partially fails.
    Degraded,
    /// Data is lost.
    DataLoss,
    /// An attacker gains access.
    SecurityBreach,
    /// A value written by a newer knowledge source.
    #[serde(other)]
    Unknown,
}

impl Impact {
    /// Sort rank used when ordering risks; lower is more urgent.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::ServiceDown => 0,
            Self::DataLoss => 1,
            Self::SecurityBreach => 2,
            Self::Degraded => 3,
            Self::Unknown => 4,
        }
    }

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ServiceDown => "service-down",
            Self::Degraded => "degraded",
            Self::DataLoss => "data-loss",
            Self::SecurityBreach => "security-breach",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How likely a failure is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Likelihood {
    /// Expected in normal operation.
    High,
    /// Happens occasionally.
    Medium,
    /// Rare.
    Low,
}

impl Likelihood {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// A way a component can fail, and what to do about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureScenario {
    /// Shared header.
    #[serde(flatten)]
    pub meta: EntryMeta,

    /// Component whose failure this describes.
    pub component: ComponentType,
    /// Short title.
    pub title: LocalizedText,
    /// What happens.
    pub description: LocalizedText,

    /// Components hit by the blast radius.
    pub affected_components: Vec<ComponentType>,
    /// Consequence.
    pub impact: Impact,
    /// Probability.
    pub likelihood: Likelihood,
    /// Steps that avoid the failure.
    pub prevention: Vec<LocalizedText>,
    /// Steps that limit the damage.
    pub mitigation: Vec<LocalizedText>,

    /// Free text, e.g. "15-30 minutes".
    #[serde(rename = "estimatedMTTR")]
    pub estimated_mttr: String,
}

impl KnowledgeRecord for FailureScenario {
    const KIND: KnowledgeKind = KnowledgeKind::Failure;

    fn meta(&self) -> &EntryMeta {
        &self.meta
    }

    fn text_fields(&self) -> Vec<&str> {
        [&self.title, &self.description]
            .into_iter()
            .chain(self.prevention.iter())
            .chain(self.mitigation.iter())
            .flat_map(|t| [t.en.as_str(), t.ko.as_str()])
            .collect()
    }

    fn components(&self) -> Vec<ComponentType> {
        let mut out = vec![self.component];
        out.extend(self.affected_components.iter().copied().filter(|c| *c != self.component));
        out
    }
}

/// Failures of the component itself or that list it as affected.
#[must_use]
pub fn failures_for_component(failures: &[FailureScenario], ty: ComponentType) -> Vec<&FailureScenario> {
    failures
        .iter()
        .filter(|f| f.component == ty || f.affected_components.contains(&ty))
        .collect()
}

/// Failures that take a service down, lose data, or breach security.
#[must_use]
pub fn high_impact_failures(failures: &[FailureScenario]) -> Vec<&FailureScenario> {
    failures
        .iter()
        .filter(|f| {
            matches!(
                f.impact,
                Impact::ServiceDown | Impact::DataLoss | Impact::SecurityBreach
            )
        })
        .collect()
}

/// Failures with the given likelihood.
#[must_use]
pub fn failures_by_likelihood(failures: &[FailureScenario], likelihood: Likelihood) -> Vec<&FailureScenario> {
    failures.iter().filter(|f| f.likelihood == likelihood).collect()
}
