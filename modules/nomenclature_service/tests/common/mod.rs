//! Common test utilities: in-memory document store, event recorder, fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use nomenclature_service::contract::*;
use nomenclature_service::domain::{
    DocumentRepository, EventPublisher, NomenclatureEvent, Service, StoredDocument,
};
use nomenclature_service::infra::storage::Migrator;
use parking_lot::RwLock;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn print_test_header(test_name: &str, purpose: &str) {
    println!("\n🧪 TEST: {}", test_name);
    println!("📋 PURPOSE: {}", purpose);
}

// ===== Mock repository =====

/// Document store kept in memory, in insertion order
#[derive(Default)]
pub struct MockDocumentRepository {
    documents: RwLock<Vec<(EntityKind, StoredDocument)>>,
    failing: AtomicBool,
}

impl MockDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail like a lost database connection
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Raw stored body of a record
    pub fn body(&self, kind: EntityKind, id: RecordId) -> Option<serde_json::Value> {
        self.documents
            .read()
            .iter()
            .find(|(k, doc)| *k == kind && doc.id == id)
            .map(|(_, doc)| doc.body.clone())
    }

    pub fn print_state(&self, context: &str) {
        let documents = self.documents.read();
        println!("\n========== DocumentRepository State: {} ==========", context);
        println!("Total documents: {}", documents.len());
        for (kind, doc) in documents.iter() {
            println!("  {} {} {}", kind, doc.id, doc.body);
        }
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentRepository for MockDocumentRepository {
    async fn insert(
        &self,
        kind: EntityKind,
        body: serde_json::Value,
    ) -> anyhow::Result<StoredDocument> {
        self.check()?;
        let now = Utc::now();
        let document = StoredDocument {
            id: RecordId::new(),
            body,
            created_at: now,
            updated_at: now,
        };
        self.documents.write().push((kind, document.clone()));
        Ok(document)
    }

    async fn find(&self, kind: EntityKind, id: RecordId) -> anyhow::Result<Option<StoredDocument>> {
        self.check()?;
        Ok(self
            .documents
            .read()
            .iter()
            .find(|(k, doc)| *k == kind && doc.id == id)
            .map(|(_, doc)| doc.clone()))
    }

    async fn replace(
        &self,
        kind: EntityKind,
        id: RecordId,
        body: serde_json::Value,
    ) -> anyhow::Result<Option<StoredDocument>> {
        self.check()?;
        let mut documents = self.documents.write();
        Ok(documents
            .iter_mut()
            .find(|(k, doc)| *k == kind && doc.id == id)
            .map(|(_, doc)| {
                doc.body = body;
                doc.updated_at = Utc::now();
                doc.clone()
            }))
    }

    async fn delete(&self, kind: EntityKind, id: RecordId) -> anyhow::Result<bool> {
        self.check()?;
        let mut documents = self.documents.write();
        let before = documents.len();
        documents.retain(|(k, doc)| !(*k == kind && doc.id == id));
        Ok(documents.len() < before)
    }

    async fn list_all(&self, kind: EntityKind) -> anyhow::Result<Vec<StoredDocument>> {
        self.check()?;
        Ok(self
            .documents
            .read()
            .iter()
            .rev()
            .filter(|(k, _)| *k == kind)
            .map(|(_, doc)| doc.clone())
            .collect())
    }

    async fn count(&self, kind: EntityKind) -> anyhow::Result<u64> {
        self.check()?;
        Ok(self.documents.read().iter().filter(|(k, _)| *k == kind).count() as u64)
    }
}

// ===== Event recorder =====

#[derive(Default)]
pub struct RecordingPublisher {
    events: RwLock<Vec<NomenclatureEvent>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<NomenclatureEvent> {
        self.events.read().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: NomenclatureEvent) -> anyhow::Result<()> {
        self.events.write().push(event);
        Ok(())
    }
}

// ===== Wiring =====

pub struct TestEnv {
    pub service: Arc<Service>,
    pub repo: Arc<MockDocumentRepository>,
    pub events: Arc<RecordingPublisher>,
}

pub fn mock_env() -> TestEnv {
    let repo = Arc::new(MockDocumentRepository::new());
    let events = Arc::new(RecordingPublisher::default());
    let service = Arc::new(Service::new(repo.clone(), events.clone()));
    TestEnv {
        service,
        repo,
        events,
    }
}

/// Fresh in-memory SQLite database with the schema applied.
///
/// A single pooled connection keeps every query on the same memory database.
pub async fn sqlite_db() -> Arc<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(db)
}

// ===== Fixtures =====

pub fn activity(name_bg: &str, name_en: &str) -> ActivityDraft {
    ActivityDraft {
        name_bg: name_bg.to_string(),
        name_en: name_en.to_string(),
    }
}

pub fn object(name_bg: &str, activity_id: RecordId) -> PtSchemeObjectDraft {
    PtSchemeObjectDraft {
        name_bg: name_bg.to_string(),
        name_en: format!("{name_bg} (en)"),
        activity_id: activity_id.to_string(),
        image: None,
    }
}

pub fn characteristic(name_bg: &str, unit: &str, object_id: RecordId) -> CharacteristicDraft {
    CharacteristicDraft {
        name_bg: name_bg.to_string(),
        name_en: format!("{name_bg} (en)"),
        unit: unit.to_string(),
        pt_scheme_object_id: object_id.to_string(),
    }
}

pub fn quantity(name_bg: &str, unit: &str, object_id: RecordId) -> QuantityDraft {
    QuantityDraft {
        name_bg: name_bg.to_string(),
        name_en: format!("{name_bg} (en)"),
        unit: unit.to_string(),
        pt_scheme_object_id: object_id.to_string(),
    }
}

pub fn standard(name_bg: &str, characteristic_id: RecordId) -> StandardDraft {
    StandardDraft {
        name_bg: name_bg.to_string(),
        name_en: format!("{name_bg} (en)"),
        characteristic_id: characteristic_id.to_string(),
    }
}

pub fn subcontractor(name_bg: &str, object_ids: &[RecordId]) -> SubcontractorDraft {
    SubcontractorDraft {
        name_bg: name_bg.to_string(),
        name_en: format!("{name_bg} (en)"),
        logo: None,
        pt_scheme_object_ids: object_ids.iter().map(ToString::to_string).collect(),
    }
}

pub const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgo=";
