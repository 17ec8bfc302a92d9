use infrasage::{
    catalog, estimate_capacity, find_bottlenecks, recommend_sizing, ComponentType, InfraNode,
    InfraSpec, TrafficTier,
};

fn lb_with_web(web: usize) -> InfraSpec {
    let mut spec = InfraSpec::new().with_node(InfraNode::new("lb", ComponentType::LoadBalancer));
    for i in 0..web {
        let id = format!("web-{i}");
        spec = spec
            .with_node(InfraNode::new(id.clone(), ComponentType::WebServer))
            .with_connection("lb", id);
    }
    spec
}

#[test]
fn test_web_tier_is_first_bottleneck() {
    let estimate = estimate_capacity(&lb_with_web(2), catalog::sizing_table());
    assert_eq!(estimate.max_rps, 1_000);
    assert_eq!(estimate.current_tier, TrafficTier::Medium);
    assert_eq!(
        estimate.bottlenecks.first().map(|b| b.component_type),
        Some(ComponentType::WebServer)
    );
    assert_eq!(
        estimate.bottlenecks[0].recommendation,
        "Scale web-server from 2 to 4 instances"
    );
    assert!(estimate.can_handle.small);
    assert!(estimate.can_handle.medium);
    assert!(!estimate.can_handle.large);
}

#[test]
fn test_empty_topology_has_no_capacity() {
    let estimate = estimate_capacity(&InfraSpec::new(), catalog::sizing_table());
    assert_eq!(estimate.max_rps, 0);
    assert_eq!(estimate.current_tier, TrafficTier::Small);
    assert!(estimate.bottlenecks.is_empty());
    assert!(estimate.can_handle.small);
    assert!(!estimate.can_handle.medium);
}

#[test]
fn test_uncovered_components_are_ignored() {
    let spec = lb_with_web(2)
        .with_node(InfraNode::new("user", ComponentType::User))
        .with_node(InfraNode::new("inet", ComponentType::Internet));
    let table = catalog::sizing_table();
    assert_eq!(
        estimate_capacity(&spec, table),
        estimate_capacity(&lb_with_web(2), table)
    );
}

#[test]
fn test_scaling_out_raises_ceiling() {
    let table = catalog::sizing_table();
    let mut previous = 0;
    for web in 1..=6 {
        let estimate = estimate_capacity(&lb_with_web(web), table);
        assert!(estimate.max_rps >= previous);
        previous = estimate.max_rps;
    }
}

#[test]
fn test_bottlenecks_sorted_ascending() {
    let spec = lb_with_web(4)
        .with_node(InfraNode::new("db", ComponentType::DbServer))
        .with_node(InfraNode::new("cache", ComponentType::Cache));
    let bottlenecks = find_bottlenecks(&spec, catalog::sizing_table());
    assert!(!bottlenecks.is_empty());
    assert!(bottlenecks.windows(2).all(|w| w[0].max_rps <= w[1].max_rps));
}

#[test]
fn test_sizing_for_enterprise() {
    let recs = recommend_sizing(&lb_with_web(2), catalog::sizing_table(), TrafficTier::Enterprise);
    let web = recs
        .iter()
        .find(|r| r.component_type == ComponentType::WebServer)
        .unwrap();
    assert_eq!(web.current_count, 2);
    assert_eq!(web.recommended.instance_count, 20);
    assert_eq!(web.additional_instances, 18);
    assert!(recs.iter().all(|r| r.target_tier == TrafficTier::Enterprise));
}

#[test]
fn test_estimate_serializes_camel_case() {
    let estimate = estimate_capacity(&lb_with_web(2), catalog::sizing_table());
    let json = serde_json::to_value(&estimate).unwrap();
    assert_eq!(json["maxRPS"], 1_000);
    assert_eq!(json["currentTier"], "medium");
    assert_eq!(json["canHandle"]["medium"], true);
}
