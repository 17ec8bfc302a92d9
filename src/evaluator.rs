//! Anti-pattern evaluation over a topology.

use crate::knowledge::AntiPattern;
use crate::topology::InfraSpec;

/// Returns the anti-patterns whose predicate matches the topology.
///
/// Every candidate is evaluated; output keeps input order. A predicate that
/// panics is logged and treated as not matching, so one broken rule cannot
/// abort the batch.
#[must_use]
pub fn detect_anti_patterns(spec: &InfraSpec, candidates: &[AntiPattern]) -> Vec<AntiPattern> {
    let mut matched = Vec::new();
    for candidate in candidates {
        match candidate.detection.evaluate_guarded(spec) {
            Some(true) => matched.push(candidate.clone()),
            Some(false) => {}
            None => {
                tracing::warn!(
                    rule_id = %candidate.meta.id,
                    "anti-pattern detection panicked; treating as no match"
                );
            }
        }
    }
    tracing::debug!(
        candidates = candidates.len(),
        matched = matched.len(),
        nodes = spec.nodes.len(),
        "anti-pattern evaluation complete"
    );
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::component::ComponentType;
    use crate::knowledge::Detection;
    use crate::topology::InfraNode;

    fn exposed_db() -> InfraSpec {
        InfraSpec::new()
            .with_node(InfraNode::new("db-1", ComponentType::DbServer))
            .with_node(InfraNode::new("inet-1", ComponentType::Internet))
            .with_connection("db-1", "inet-1")
    }

    #[test]
    fn test_broken_rule_does_not_abort_batch() {
        let mut candidates = catalog::anti_patterns().to_vec();
        let mut broken = candidates[0].clone();
        broken.meta.id = "AP-BROKEN".into();
        broken.detection = Detection::new(|_| panic!("bad rule"));
        candidates.insert(0, broken);

        let out = detect_anti_patterns(&exposed_db(), &candidates);
        assert!(out.iter().all(|a| a.meta.id != "AP-BROKEN"));
        assert!(out.iter().any(|a| a.meta.id == catalog::DB_INTERNET_EXPOSURE));
    }

    #[test]
    fn test_output_preserves_input_order() {
        let mut candidates = catalog::anti_patterns().to_vec();
        candidates.reverse();
        let out = detect_anti_patterns(&exposed_db(), &candidates);
        let positions: Vec<_> = out
            .iter()
            .map(|a| candidates.iter().position(|c| c.meta.id == a.meta.id).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_empty_topology_matches_nothing() {
        assert!(detect_anti_patterns(&InfraSpec::new(), catalog::anti_patterns()).is_empty());
    }
}
