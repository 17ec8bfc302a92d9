use infrasage::knowledge::RelationshipType;
use infrasage::{
    build_knowledge_prompt_section, catalog, enrich_context, ComponentType, EnrichOptions,
    EnrichedContext, InfraNode, InfraSpec, KnowledgeRecord,
};

fn web_stack() -> InfraSpec {
    InfraSpec::new()
        .with_node(InfraNode::new("inet", ComponentType::Internet))
        .with_node(InfraNode::new("lb", ComponentType::LoadBalancer))
        .with_node(InfraNode::new("web-1", ComponentType::WebServer))
        .with_node(InfraNode::new("web-2", ComponentType::WebServer))
        .with_node(InfraNode::new("db", ComponentType::DbServer))
        .with_connection("inet", "lb")
        .with_connection("lb", "web-1")
        .with_connection("lb", "web-2")
        .with_connection("web-1", "db")
        .with_connection("web-2", "db")
}

fn full() -> EnrichOptions<'static> {
    EnrichOptions::new()
        .with_anti_patterns(catalog::anti_patterns())
        .with_failures(catalog::failures())
}

#[test]
fn test_web_stack_findings() {
    let enriched = enrich_context(&web_stack(), catalog::relationships(), full());

    // LB -> web is satisfied; firewall and backup are missing.
    assert!(enriched.relationships.iter().any(|r| r.meta.id == "REL-004"));
    let suggested: Vec<_> = enriched.suggestions.iter().map(|r| r.meta.id.as_str()).collect();
    assert!(suggested.contains(&"REL-001"));
    assert!(suggested.contains(&"REL-006"));

    let violations: Vec<_> = enriched.violations.iter().map(|a| a.meta.id.as_str()).collect();
    assert!(violations.contains(&catalog::SINGLE_LOAD_BALANCER));
    assert!(violations.contains(&catalog::DATA_STORE_WITHOUT_BACKUP));
    assert!(!enriched.risks.is_empty());
}

#[test]
fn test_suggestion_ordering_property() {
    let enriched = enrich_context(&web_stack(), catalog::relationships(), full());
    for pair in enriched.suggestions.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.relationship_type == b.relationship_type {
            assert!(a.confidence() >= b.confidence());
        } else {
            assert_eq!(a.relationship_type, RelationshipType::Requires);
            assert_eq!(b.relationship_type, RelationshipType::Recommends);
        }
    }
}

#[test]
fn test_low_confidence_entries_excluded() {
    let spec = InfraSpec::new().with_node(InfraNode::new("dns", ComponentType::Dns));
    let enriched = enrich_context(&spec, catalog::relationships(), EnrichOptions::new());
    // REL-024 (dns -> ddos-protection) sits below the floor.
    assert!(enriched.suggestions.iter().all(|r| r.meta.id != "REL-024"));

    let spec = InfraSpec::new().with_node(InfraNode::new("c", ComponentType::Container));
    let enriched = enrich_context(&spec, catalog::relationships(), EnrichOptions::new());
    // REL-023 sits exactly on the floor.
    assert!(enriched.suggestions.iter().any(|r| r.meta.id == "REL-023"));
}

#[test]
fn test_prompt_renders_for_web_stack() {
    let enriched = enrich_context(&web_stack(), catalog::relationships(), full());
    let text = build_knowledge_prompt_section(&enriched, 0.5);
    assert!(text.contains("Official Standards"));
    assert!(text.contains("Violations"));
    assert!(text.contains("Failure Risks"));
    assert!(text.contains("Priority Rules"));
    assert!(text.contains("REL-001"));
}

#[test]
fn test_prompt_empty_for_empty_context() {
    assert!(build_knowledge_prompt_section(&EnrichedContext::default(), 0.5).is_empty());
    let enriched = enrich_context(&InfraSpec::new(), catalog::relationships(), full());
    assert!(enriched.is_empty());
    assert!(build_knowledge_prompt_section(&enriched, 0.5).is_empty());
}

#[test]
fn test_enriched_context_serializes() {
    let enriched = enrich_context(&web_stack(), catalog::relationships(), full());
    let json = serde_json::to_value(&enriched).unwrap();
    assert!(json["suggestions"].as_array().is_some_and(|a| !a.is_empty()));
    assert_eq!(json["violations"][0]["type"], "antipattern");
}
