use infrasage::{
    catalog, detect_anti_patterns, detection_registry, ComponentType, Detection, InfraNode,
    InfraSpec,
};

fn exposed_db() -> InfraSpec {
    InfraSpec::from_json(
        r#"{
            "nodes": [
                {"id": "db-1", "type": "db-server", "label": "Primary DB"},
                {"id": "inet-1", "type": "internet", "label": "Internet"}
            ],
            "connections": [{"source": "db-1", "target": "inet-1"}]
        }"#,
    )
    .unwrap()
}

fn sample_topologies() -> Vec<InfraSpec> {
    let three_tier = InfraSpec::new()
        .with_node(InfraNode::new("user", ComponentType::User))
        .with_node(InfraNode::new("inet", ComponentType::Internet))
        .with_node(InfraNode::new("fw", ComponentType::Firewall))
        .with_node(InfraNode::new("lb", ComponentType::LoadBalancer))
        .with_node(InfraNode::new("web-1", ComponentType::WebServer))
        .with_node(InfraNode::new("web-2", ComponentType::WebServer))
        .with_node(InfraNode::new("app", ComponentType::AppServer))
        .with_node(InfraNode::new("db", ComponentType::DbServer))
        .with_connection("user", "inet")
        .with_connection("inet", "fw")
        .with_connection("fw", "lb")
        .with_connection("lb", "web-1")
        .with_connection("lb", "web-2")
        .with_connection("web-1", "db");
    let remote_access = InfraSpec::new()
        .with_node(InfraNode::new("vpn", ComponentType::VpnGateway))
        .with_node(InfraNode::new("ldap", ComponentType::LdapAd))
        .with_node(InfraNode::new("inet", ComponentType::Internet))
        .with_connection("inet", "ldap");
    vec![InfraSpec::new(), exposed_db(), three_tier, remote_access]
}

#[test]
fn test_db_exposure_scenario() {
    let hits = detect_anti_patterns(&exposed_db(), catalog::anti_patterns());
    assert!(hits.iter().any(|a| a.meta.id == catalog::DB_INTERNET_EXPOSURE));

    let with_firewall = exposed_db().with_node(InfraNode::new("fw-1", ComponentType::Firewall));
    let hits = detect_anti_patterns(&with_firewall, catalog::anti_patterns());
    assert!(hits.iter().any(|a| a.meta.id == catalog::DB_INTERNET_EXPOSURE));
}

#[test]
fn test_registry_run_agrees_with_definitions() {
    let registry = detection_registry();
    for spec in sample_topologies() {
        for ap in catalog::anti_patterns() {
            assert_eq!(
                registry.run(&ap.meta.id, &spec),
                ap.detection.evaluate(&spec),
                "rule {}",
                ap.meta.id
            );
        }
        assert!(!registry.run("AP-DOES-NOT-EXIST", &spec));
    }
}

#[test]
fn test_registry_covers_catalog() {
    let registry = detection_registry();
    assert_eq!(registry.count(), catalog::anti_patterns().len());
    let ids = registry.list();
    for ap in catalog::anti_patterns() {
        assert!(ids.contains(&ap.meta.id.as_str()));
        assert!(registry.has(&ap.meta.id));
    }
}

#[test]
fn test_evaluator_matches_registry_for_every_topology() {
    let registry = detection_registry();
    for spec in sample_topologies() {
        let hits: Vec<_> = detect_anti_patterns(&spec, catalog::anti_patterns())
            .into_iter()
            .map(|a| a.meta.id)
            .collect();
        let expected: Vec<_> = catalog::anti_patterns()
            .iter()
            .filter(|a| registry.run(&a.meta.id, &spec))
            .map(|a| a.meta.id.clone())
            .collect();
        assert_eq!(hits, expected);
    }
}

#[test]
fn test_panicking_candidate_is_isolated() {
    let mut candidates = catalog::anti_patterns().to_vec();
    let mut broken = candidates[0].clone();
    broken.meta.id = "AP-BROKEN".into();
    broken.detection = Detection::new(|spec| spec.nodes[99].id.is_empty());
    candidates.push(broken);

    for spec in sample_topologies() {
        let first = detect_anti_patterns(&spec, &candidates);
        let second = detect_anti_patterns(&spec, &candidates);
        assert_eq!(first, second);
        assert!(first.iter().all(|a| a.meta.id != "AP-BROKEN"));
    }
}

#[test]
fn test_rehydrated_unknown_rule_never_matches() {
    let detection = detection_registry().rehydrate("AP-UNKNOWN");
    for spec in sample_topologies() {
        assert!(!detection.evaluate(&spec));
    }
}
