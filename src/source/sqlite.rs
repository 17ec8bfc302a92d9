//! SQLite-backed knowledge source.
//!
//! Records are stored as JSON payloads in `knowledge_entries`, with tags and
//! component kinds broken out into side tables for filtering. Search runs a
//! `LIKE` over a pre-lowercased concatenation of the bilingual text fields.
//! Anti-pattern predicates cannot be stored; rows keep the rule id and the
//! predicate is re-attached from the detection registry on read.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::catalog;
use crate::error::{DataSourceError, KnowledgeError, KnowledgeResult};
use crate::knowledge::{
    AntiPattern, ArchitecturePattern, CloudService, ComponentRelationship, FailureScenario,
    KnowledgeKind, KnowledgeRecord, PerformanceProfile, Vulnerability,
};
use crate::registry::{detection_registry, DetectionRegistry};

use super::{KnowledgeDataSource, KnowledgeFilter};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS knowledge_entries (
    id TEXT PRIMARY KEY,
    category TEXT NOT NULL,
    search_text TEXT NOT NULL,
    confidence REAL NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1,
    detection_rule_id TEXT,
    payload TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_knowledge_entries_category
    ON knowledge_entries(category, is_active);
CREATE TABLE IF NOT EXISTS knowledge_tags (
    entry_id TEXT NOT NULL REFERENCES knowledge_entries(id) ON DELETE CASCADE,
    tag TEXT NOT NULL,
    PRIMARY KEY (entry_id, tag)
);
CREATE TABLE IF NOT EXISTS knowledge_components (
    entry_id TEXT NOT NULL REFERENCES knowledge_entries(id) ON DELETE CASCADE,
    component TEXT NOT NULL,
    PRIMARY KEY (entry_id, component)
);
";

impl From<rusqlite::Error> for KnowledgeError {
    fn from(err: rusqlite::Error) -> Self {
        KnowledgeError::backend(err.to_string())
    }
}

struct StoredRow {
    id: String,
    payload: String,
    detection_rule_id: Option<String>,
}

/// Knowledge source backed by a SQLite database.
pub struct SqliteDataSource {
    conn: Arc<Mutex<Connection>>,
    registry: &'static DetectionRegistry,
}

impl std::fmt::Debug for SqliteDataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteDataSource")
            .field("rules", &self.registry.count())
            .finish_non_exhaustive()
    }
}

fn lock(conn: &Mutex<Connection>) -> KnowledgeResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|_| KnowledgeError::internal("sqlite connection lock poisoned"))
}

fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn search_text<T: KnowledgeRecord>(record: &T) -> String {
    let mut text = record.id().to_lowercase();
    for field in record.text_fields() {
        text.push('\n');
        text.push_str(&field.to_lowercase());
    }
    text
}

fn query_rows(conn: &Connection, kind: KnowledgeKind, filter: &KnowledgeFilter) -> rusqlite::Result<Vec<StoredRow>> {
    let mut sql = String::from(
        "SELECT e.id, e.payload, e.detection_rule_id FROM knowledge_entries e \
         WHERE e.category = ?1 AND e.is_active = ?2",
    );
    let mut values = vec![
        Value::Text(kind.as_str().to_string()),
        Value::Integer(i64::from(filter.is_active)),
    ];

    if let Some(needle) = filter.needle() {
        values.push(Value::Text(format!("%{}%", escape_like(&needle))));
        let _ = write!(sql, " AND e.search_text LIKE ?{} ESCAPE '\\'", values.len());
    }
    if let Some(tags) = filter.tag_set() {
        let mut placeholders = Vec::with_capacity(tags.len());
        for tag in tags {
            values.push(Value::Text(tag.clone()));
            placeholders.push(format!("?{}", values.len()));
        }
        let _ = write!(
            sql,
            " AND EXISTS (SELECT 1 FROM knowledge_tags t WHERE t.entry_id = e.id AND t.tag IN ({}))",
            placeholders.join(", ")
        );
    }
    if let Some(component) = filter.component {
        values.push(Value::Text(component.as_str().to_string()));
        let _ = write!(
            sql,
            " AND EXISTS (SELECT 1 FROM knowledge_components c WHERE c.entry_id = e.id AND c.component = ?{})",
            values.len()
        );
    }
    sql.push_str(" ORDER BY e.rowid");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
        Ok(StoredRow {
            id: row.get(0)?,
            payload: row.get(1)?,
            detection_rule_id: row.get(2)?,
        })
    })?;
    rows.collect()
}

fn write_record<T: KnowledgeRecord + Serialize>(conn: &Connection, record: &T) -> KnowledgeResult<()> {
    let payload = serde_json::to_string(record).map_err(|e| KnowledgeError::serialization(e.to_string()))?;
    let rule_id = (T::KIND == KnowledgeKind::Antipattern).then(|| record.id());
    let now = chrono::Utc::now().to_rfc3339();

    conn.execute(
        "INSERT INTO knowledge_entries
            (id, category, search_text, confidence, is_active, detection_rule_id, payload, updated_at)
         VALUES (?1, ?2, ?3, ?4, 1, ?5, ?6, ?7)
         ON CONFLICT(id) DO UPDATE SET
            category = excluded.category,
            search_text = excluded.search_text,
            confidence = excluded.confidence,
            detection_rule_id = excluded.detection_rule_id,
            payload = excluded.payload,
            updated_at = excluded.updated_at",
        params![
            record.id(),
            T::KIND.as_str(),
            search_text(record),
            f64::from(record.confidence()),
            rule_id,
            payload,
            now
        ],
    )?;

    conn.execute("DELETE FROM knowledge_tags WHERE entry_id = ?1", params![record.id()])?;
    for tag in &record.meta().tags {
        conn.execute(
            "INSERT OR IGNORE INTO knowledge_tags (entry_id, tag) VALUES (?1, ?2)",
            params![record.id(), tag],
        )?;
    }
    conn.execute("DELETE FROM knowledge_components WHERE entry_id = ?1", params![record.id()])?;
    for component in record.components() {
        conn.execute(
            "INSERT OR IGNORE INTO knowledge_components (entry_id, component) VALUES (?1, ?2)",
            params![record.id(), component.as_str()],
        )?;
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(row: &StoredRow) -> KnowledgeResult<T> {
    serde_json::from_str(&row.payload).map_err(|e| {
        KnowledgeError::from(DataSourceError::Decode {
            id: row.id.clone(),
            message: e.to_string(),
        })
    })
}

impl SqliteDataSource {
    fn from_connection(conn: Connection) -> KnowledgeResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            registry: detection_registry(),
        })
    }

    /// Opens (creating if needed) a database file and applies the schema.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the file cannot be opened or migrated.
    pub fn open(path: &Path) -> KnowledgeResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the schema cannot be applied.
    pub fn open_in_memory() -> KnowledgeResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    /// Inserts or replaces a record. Anti-pattern rows store the record id
    /// as their detection rule id.
    ///
    /// # Errors
    ///
    /// Returns a backend or serialization error.
    pub fn insert<T: KnowledgeRecord + Serialize>(&self, record: &T) -> KnowledgeResult<()> {
        let conn = lock(&self.conn)?;
        write_record(&conn, record)
    }

    /// Mirrors the whole built-in catalog in one transaction. Returns the
    /// number of records written.
    ///
    /// # Errors
    ///
    /// Returns a backend or serialization error; nothing is written then.
    pub fn import_catalog(&self) -> KnowledgeResult<usize> {
        let mut conn = lock(&self.conn)?;
        let tx = conn.transaction()?;
        let mut written = 0;
        for r in catalog::relationships() {
            write_record(&tx, r)?;
            written += 1;
        }
        for p in catalog::patterns() {
            write_record(&tx, p)?;
            written += 1;
        }
        for a in catalog::anti_patterns() {
            write_record(&tx, a)?;
            written += 1;
        }
        for f in catalog::failures() {
            write_record(&tx, f)?;
            written += 1;
        }
        for p in catalog::performance_profiles() {
            write_record(&tx, p)?;
            written += 1;
        }
        for v in catalog::vulnerabilities() {
            write_record(&tx, v)?;
            written += 1;
        }
        for c in catalog::cloud_services() {
            write_record(&tx, c)?;
            written += 1;
        }
        tx.commit()?;
        tracing::info!(written, "imported built-in catalog into sqlite");
        Ok(written)
    }

    /// Marks an entry active or inactive. Returns false if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns a backend error.
    pub fn set_active(&self, id: &str, active: bool) -> KnowledgeResult<bool> {
        let conn = lock(&self.conn)?;
        let changed = conn.execute(
            "UPDATE knowledge_entries SET is_active = ?2 WHERE id = ?1",
            params![id, i64::from(active)],
        )?;
        Ok(changed > 0)
    }

    /// Number of stored entries, active or not.
    ///
    /// # Errors
    ///
    /// Returns a backend error.
    pub fn count(&self) -> KnowledgeResult<usize> {
        let conn = lock(&self.conn)?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM knowledge_entries", [], |row| row.get(0))?;
        Ok(usize::try_from(n).unwrap_or(0))
    }

    /// Confidence recorded for an entry.
    ///
    /// # Errors
    ///
    /// Returns a backend error.
    pub fn confidence_of(&self, id: &str) -> KnowledgeResult<Option<f64>> {
        let conn = lock(&self.conn)?;
        let value = conn
            .query_row(
                "SELECT confidence FROM knowledge_entries WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    async fn fetch(&self, kind: KnowledgeKind, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<StoredRow>> {
        let conn = Arc::clone(&self.conn);
        let filter = filter.clone();
        let rows = tokio::task::spawn_blocking(move || -> KnowledgeResult<Vec<StoredRow>> {
            let guard = lock(&conn)?;
            Ok(query_rows(&guard, kind, &filter)?)
        })
        .await
        .map_err(|e| KnowledgeError::internal(format!("sqlite query task failed: {e}")))??;
        tracing::debug!(category = kind.as_str(), rows = rows.len(), "sqlite knowledge query");
        Ok(rows)
    }

    async fn fetch_decoded<T>(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<T>>
    where
        T: KnowledgeRecord + DeserializeOwned,
    {
        self.fetch(T::KIND, filter).await?.iter().map(decode).collect()
    }
}

#[async_trait]
impl KnowledgeDataSource for SqliteDataSource {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn get_relationships(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<ComponentRelationship>> {
        self.fetch_decoded(filter).await
    }

    async fn get_patterns(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<ArchitecturePattern>> {
        self.fetch_decoded(filter).await
    }

    async fn get_anti_patterns(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<AntiPattern>> {
        let rows = self.fetch(KnowledgeKind::Antipattern, filter).await?;
        rows.iter()
            .map(|row| {
                let record: AntiPattern = decode(row)?;
                let rule_id = row.detection_rule_id.as_deref().unwrap_or(&row.id);
                let detection = self.registry.rehydrate(rule_id);
                Ok(record.with_detection(detection))
            })
            .collect()
    }

    async fn get_failures(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<FailureScenario>> {
        self.fetch_decoded(filter).await
    }

    async fn get_performance_profiles(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<PerformanceProfile>> {
        self.fetch_decoded(filter).await
    }

    async fn get_vulnerabilities(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<Vulnerability>> {
        self.fetch_decoded(filter).await
    }

    async fn get_cloud_services(&self, filter: &KnowledgeFilter) -> KnowledgeResult<Vec<CloudService>> {
        self.fetch_decoded(filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentType;
    use crate::topology::{InfraNode, InfraSpec};

    fn seeded() -> SqliteDataSource {
        let source = SqliteDataSource::open_in_memory().unwrap();
        source.import_catalog().unwrap();
        source
    }

    fn exposed_db() -> InfraSpec {
        InfraSpec::new()
            .with_node(InfraNode::new("db-1", ComponentType::DbServer))
            .with_node(InfraNode::new("inet-1", ComponentType::Internet))
            .with_connection("db-1", "inet-1")
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[tokio::test]
    async fn test_round_trip_counts_match_catalog() {
        let source = seeded();
        let all = KnowledgeFilter::default();
        assert_eq!(source.get_relationships(&all).await.unwrap(), catalog::relationships());
        assert_eq!(source.get_failures(&all).await.unwrap(), catalog::failures());
        assert_eq!(source.get_patterns(&all).await.unwrap().len(), catalog::patterns().len());
        assert_eq!(
            source.get_performance_profiles(&all).await.unwrap().len(),
            catalog::performance_profiles().len()
        );
        assert_eq!(source.get_vulnerabilities(&all).await.unwrap().len(), catalog::vulnerabilities().len());
        assert_eq!(source.get_cloud_services(&all).await.unwrap().len(), catalog::cloud_services().len());
    }

    #[tokio::test]
    async fn test_anti_patterns_are_rehydrated() {
        let source = seeded();
        let hits = source.get_anti_patterns(&KnowledgeFilter::default()).await.unwrap();
        assert_eq!(hits.len(), catalog::anti_patterns().len());
        let db = hits.iter().find(|a| a.meta.id == catalog::DB_INTERNET_EXPOSURE).unwrap();
        assert!(db.detection.evaluate(&exposed_db()));
    }

    #[tokio::test]
    async fn test_unregistered_rule_never_matches() {
        let source = SqliteDataSource::open_in_memory().unwrap();
        let mut custom = catalog::anti_patterns()[0].clone();
        custom.meta.id = "AP-CUSTOM-999".into();
        source.insert(&custom).unwrap();

        let hits = source.get_anti_patterns(&KnowledgeFilter::default()).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(!hits[0].detection.evaluate(&exposed_db()));
    }

    #[tokio::test]
    async fn test_filters() {
        let source = seeded();
        let search = KnowledgeFilter::new().with_search("Firewall");
        let hits = source.get_relationships(&search).await.unwrap();
        assert_eq!(hits, search.apply(catalog::relationships()));

        let tags = KnowledgeFilter::new().with_tags(&["kubernetes"]);
        let hits = source.get_relationships(&tags).await.unwrap();
        assert_eq!(hits, tags.apply(catalog::relationships()));

        let component = KnowledgeFilter::new().with_component(ComponentType::VpnGateway);
        let hits = source.get_vulnerabilities(&component).await.unwrap();
        assert_eq!(hits, component.apply(catalog::vulnerabilities()));
    }

    #[tokio::test]
    async fn test_like_wildcards_are_literal() {
        let source = seeded();
        let hits = source
            .get_relationships(&KnowledgeFilter::new().with_search("%"))
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_inactive_entries_hidden_by_default() {
        let source = seeded();
        assert!(source.set_active("REL-001", false).unwrap());
        assert!(!source.set_active("REL-NOPE", false).unwrap());

        let active = source.get_relationships(&KnowledgeFilter::default()).await.unwrap();
        assert!(active.iter().all(|r| r.meta.id != "REL-001"));

        let inactive = source
            .get_relationships(&KnowledgeFilter::new().with_active(false))
            .await
            .unwrap();
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].meta.id, "REL-001");
    }

    #[test]
    fn test_reimport_is_idempotent() {
        let source = seeded();
        let first = source.count().unwrap();
        source.import_catalog().unwrap();
        assert_eq!(source.count().unwrap(), first);
        assert!(source.confidence_of("REL-001").unwrap().is_some());
        assert!(source.confidence_of("REL-NOPE").unwrap().is_none());
    }
}
