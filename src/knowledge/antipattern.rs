//! Anti-patterns: named architectural flaws with an executable predicate.
//!
//! The predicate is not serializable. Records read from a store that cannot
//! hold closures come back with [`Detection::never`] and are rehydrated by id
//! through the detection registry.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::component::ComponentType;
use crate::topology::InfraSpec;

use super::{EntryMeta, KnowledgeKind, KnowledgeRecord, LocalizedText};

type Predicate = dyn Fn(&InfraSpec) -> bool + Send + Sync;

/// Executable detection predicate over a topology.
///
/// Predicates must be pure and must not panic, including on the empty
/// topology. A panic is still contained by [`Detection::evaluate_guarded`]
/// and reported as "did not match", but the process panic hook runs first,
/// so the default hook prints a panic message to stderr.
#[derive(Clone)]
pub struct Detection(Arc<Predicate>);

impl Detection {
    /// Wraps a predicate.
    ///
    /// `predicate` must be side-effect free and total over every
    /// [`InfraSpec`]; see the type docs for what happens when it panics.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&InfraSpec) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// A predicate that never matches.
    #[must_use]
    pub fn never() -> Self {
        Self::new(|_| false)
    }

    /// Runs the predicate directly.
    #[must_use]
    pub fn evaluate(&self, spec: &InfraSpec) -> bool {
        (self.0)(spec)
    }

    /// Runs the predicate, mapping a panic to `None`.
    ///
    /// Uses [`catch_unwind`], which does not suppress the panic hook, and
    /// cannot contain a panic under `panic = "abort"`.
    #[must_use]
    pub fn evaluate_guarded(&self, spec: &InfraSpec) -> Option<bool> {
        catch_unwind(AssertUnwindSafe(|| (self.0)(spec))).ok()
    }
}

impl Default for Detection {
    fn default() -> Self {
        Self::never()
    }
}

impl fmt::Debug for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Detection(<fn>)")
    }
}

impl PartialEq for Detection {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Anti-pattern severity, ordered most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Exploitable or outage-causing as built.
    Critical,
    /// Serious weakness.
    High,
    /// Worth fixing.
    Medium,
}

impl Severity {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detectable architectural flaw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AntiPattern {
    /// Shared header; the id doubles as the detection rule id.
    #[serde(flatten)]
    pub meta: EntryMeta,

    /// Display name.
    pub name: LocalizedText,
    /// Severity.
    pub severity: Severity,

    /// Not serialized; see the module docs.
    #[serde(skip)]
    pub detection: Detection,

    /// What is wrong.
    pub problem: LocalizedText,
    /// What it leads to.
    pub impact: LocalizedText,
    /// How to fix it.
    pub solution: LocalizedText,
}

impl AntiPattern {
    /// Id under which the predicate is registered.
    #[must_use]
    pub fn detection_rule_id(&self) -> &str {
        &self.meta.id
    }

    /// Returns the record with its predicate replaced.
    #[must_use]
    pub fn with_detection(mut self, detection: Detection) -> Self {
        self.detection = detection;
        self
    }
}

impl KnowledgeRecord for AntiPattern {
    const KIND: KnowledgeKind = KnowledgeKind::Antipattern;

    fn meta(&self) -> &EntryMeta {
        &self.meta
    }

    fn text_fields(&self) -> Vec<&str> {
        [&self.name, &self.problem, &self.impact, &self.solution]
            .into_iter()
            .flat_map(|t| [t.en.as_str(), t.ko.as_str()])
            .collect()
    }

    /// Anti-patterns are tagged with the component names they concern.
    fn components(&self) -> Vec<ComponentType> {
        self.meta
            .tags
            .iter()
            .filter_map(|t| t.parse().ok())
            .collect()
    }
}

/// Looks up an anti-pattern by id.
#[must_use]
pub fn anti_pattern_by_id<'a>(anti_patterns: &'a [AntiPattern], id: &str) -> Option<&'a AntiPattern> {
    anti_patterns.iter().find(|a| a.meta.id == id)
}

/// Anti-patterns of the given severity.
#[must_use]
pub fn anti_patterns_by_severity(anti_patterns: &[AntiPattern], severity: Severity) -> Vec<&AntiPattern> {
    anti_patterns.iter().filter(|a| a.severity == severity).collect()
}
