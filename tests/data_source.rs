use std::sync::Arc;

use infrasage::{
    catalog, create_data_source, data_source, detect_anti_patterns, reset_data_source,
    ComponentType, DataSourceProvider, InfraNode, InfraSpec, KnowledgeConfig, KnowledgeDataSource,
    KnowledgeFilter, SourceKind, StaticDataSource,
};

fn exposed_db() -> InfraSpec {
    InfraSpec::new()
        .with_node(InfraNode::new("db-1", ComponentType::DbServer))
        .with_node(InfraNode::new("inet-1", ComponentType::Internet))
        .with_connection("db-1", "inet-1")
}

#[tokio::test]
async fn test_static_source_serves_catalog() {
    let source = StaticDataSource::new();
    let filter = KnowledgeFilter::default();
    assert_eq!(source.name(), "static");
    assert_eq!(
        source.get_relationships(&filter).await.unwrap().len(),
        catalog::relationships().len()
    );
    assert_eq!(
        source.get_vulnerabilities(&filter).await.unwrap().len(),
        catalog::vulnerabilities().len()
    );
    assert_eq!(
        source.get_cloud_services(&filter).await.unwrap().len(),
        catalog::cloud_services().len()
    );
}

#[tokio::test]
async fn test_unrecognized_source_falls_back_to_static() {
    let config = KnowledgeConfig::from_lookup(|key| {
        (key == "INFRASAGE_KNOWLEDGE_SOURCE").then(|| "mongodb".to_string())
    })
    .unwrap();
    assert_eq!(config.source, SourceKind::Static);
    let source = create_data_source(&config).unwrap();
    assert_eq!(source.name(), "static");
}

#[tokio::test]
async fn test_provider_memoizes_and_resets() {
    let provider = DataSourceProvider::new(KnowledgeConfig::default());
    let first = provider.get().unwrap();
    let second = provider.get().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    provider.reset();
    let third = provider.get().unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(third.name(), "static");
}

#[tokio::test]
async fn test_global_source_is_shared_until_reset() {
    let first = data_source().unwrap();
    let second = data_source().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    reset_data_source();
    let rebuilt = data_source().unwrap();
    assert!(!Arc::ptr_eq(&first, &rebuilt));
    assert!(Arc::ptr_eq(&rebuilt, &data_source().unwrap()));
    assert_eq!(
        rebuilt
            .get_relationships(&KnowledgeFilter::default())
            .await
            .unwrap()
            .len(),
        catalog::relationships().len()
    );
}

#[tokio::test]
async fn test_provider_override() {
    let provider = DataSourceProvider::new(KnowledgeConfig::default());
    let custom: Arc<dyn KnowledgeDataSource> = Arc::new(StaticDataSource::new());
    provider.set_override(Arc::clone(&custom));
    assert!(Arc::ptr_eq(&provider.get().unwrap(), &custom));
}

#[tokio::test]
async fn test_tag_and_search_filters() {
    let source = StaticDataSource::new();
    let security = source
        .get_anti_patterns(&KnowledgeFilter::new().with_tags(&["security"]))
        .await
        .unwrap();
    assert!(!security.is_empty());
    assert!(security.iter().all(|a| a.meta.has_tag("security")));

    let heartbleed = source
        .get_vulnerabilities(&KnowledgeFilter::new().with_search("HEARTBLEED"))
        .await
        .unwrap();
    assert_eq!(heartbleed.len(), 1);

    let inactive = source
        .get_relationships(&KnowledgeFilter::new().with_active(false))
        .await
        .unwrap();
    assert!(inactive.is_empty());
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::*;
    use infrasage::SqliteDataSource;

    #[tokio::test]
    async fn test_file_database_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("knowledge.db");

        {
            let seeded = SqliteDataSource::open(&path).unwrap();
            let written = seeded.import_catalog().unwrap();
            assert_eq!(written, seeded.count().unwrap());
        }

        let config = KnowledgeConfig {
            source: SourceKind::Database,
            database_path: path.clone(),
            ..KnowledgeConfig::default()
        };
        let provider = DataSourceProvider::new(config);
        let source = provider.get().unwrap();
        assert_eq!(source.name(), "sqlite");

        let filter = KnowledgeFilter::default();
        let relationships = source.get_relationships(&filter).await.unwrap();
        assert_eq!(relationships, catalog::relationships());
        assert_eq!(
            source.get_failures(&filter).await.unwrap(),
            catalog::failures()
        );

        let anti_patterns = source.get_anti_patterns(&filter).await.unwrap();
        let hits = detect_anti_patterns(&exposed_db(), &anti_patterns);
        assert!(hits.iter().any(|a| a.meta.id == catalog::DB_INTERNET_EXPOSURE));
    }

    #[tokio::test]
    async fn test_deactivated_entry_hidden() {
        let source = SqliteDataSource::open_in_memory().unwrap();
        source.import_catalog().unwrap();
        assert!(source.set_active("REL-001", false).unwrap());
        assert!(!source.set_active("REL-999", false).unwrap());

        let active = source
            .get_relationships(&KnowledgeFilter::default())
            .await
            .unwrap();
        assert!(active.iter().all(|r| r.meta.id != "REL-001"));

        let inactive = source
            .get_relationships(&KnowledgeFilter::new().with_active(false))
            .await
            .unwrap();
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].meta.id, "REL-001");
    }

    #[tokio::test]
    async fn test_component_filter_matches_static() {
        let db = SqliteDataSource::open_in_memory().unwrap();
        db.import_catalog().unwrap();
        let filter = KnowledgeFilter::new().with_component(ComponentType::DbServer);

        let from_db: Vec<_> = db
            .get_relationships(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.meta.id)
            .collect();
        let from_static: Vec<_> = StaticDataSource::new()
            .get_relationships(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.meta.id)
            .collect();
        assert_eq!(from_db, from_static);
    }
}
