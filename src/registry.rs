//! Detection registry: rule id → executable predicate.
//!
//! Anti-pattern records can live in stores that cannot hold closures. The
//! registry keeps the behaviour in process, keyed by the stable rule id, so a
//! record read back from any backend can be rehydrated with
//! [`DetectionRegistry::rehydrate`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::catalog;
use crate::knowledge::{AntiPattern, Detection};
use crate::topology::InfraSpec;

/// Mapping from rule id to predicate.
#[derive(Debug, Default, Clone)]
pub struct DetectionRegistry {
    rules: BTreeMap<String, Detection>,
}

impl DetectionRegistry {
    /// Builds a registry from anti-pattern definitions.
    ///
    /// A later entry with a colliding id replaces the earlier one.
    #[must_use]
    pub fn from_anti_patterns(anti_patterns: &[AntiPattern]) -> Self {
        let mut rules = BTreeMap::new();
        for ap in anti_patterns {
            rules.insert(ap.meta.id.clone(), ap.detection.clone());
        }
        Self { rules }
    }

    /// Predicate registered under `rule_id`.
    #[must_use]
    pub fn get(&self, rule_id: &str) -> Option<Detection> {
        self.rules.get(rule_id).cloned()
    }

    /// Returns true if `rule_id` is registered.
    #[must_use]
    pub fn has(&self, rule_id: &str) -> bool {
        self.rules.contains_key(rule_id)
    }

    /// All registered ids, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }

    /// Number of registered ids.
    #[must_use]
    pub fn count(&self) -> usize {
        self.rules.len()
    }

    /// Evaluates the rule against a topology.
    ///
    /// Unknown ids and panicking predicates both yield `false`.
    #[must_use]
    pub fn run(&self, rule_id: &str, spec: &InfraSpec) -> bool {
        let Some(detection) = self.rules.get(rule_id) else {
            return false;
        };
        detection.evaluate_guarded(spec).unwrap_or_else(|| {
            tracing::warn!(rule_id, "detection predicate panicked");
            false
        })
    }

    /// Predicate for a record that was stored without one.
    ///
    /// Falls back to an always-false predicate when the id is unknown.
    #[must_use]
    pub fn rehydrate(&self, rule_id: &str) -> Detection {
        self.get(rule_id).unwrap_or_else(|| {
            tracing::warn!(rule_id, "no detection registered; rule will never match");
            Detection::never()
        })
    }
}

static REGISTRY: OnceLock<DetectionRegistry> = OnceLock::new();

/// Process-wide registry built from the built-in anti-pattern catalog.
pub fn detection_registry() -> &'static DetectionRegistry {
    REGISTRY.get_or_init(|| DetectionRegistry::from_anti_patterns(catalog::anti_patterns()))
}
