//! Repository traits for data access
//!
//! The store is document-shaped: every collection holds JSON bodies keyed by
//! a store-assigned record id. Implementations are in infra/storage.

use crate::contract::{Entity, EntityKind, Record, RecordId};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A document as the store returns it
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: RecordId,
    pub body: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Conversion between an entity and its stored document body
pub trait DocumentCodec: Entity + Sized {
    fn encode(&self) -> Result<serde_json::Value>;

    fn decode(body: serde_json::Value) -> Result<Self>;

    fn decode_record(document: StoredDocument) -> Result<Record<Self>> {
        Ok(Record {
            id: document.id,
            data: Self::decode(document.body)?,
            created_at: document.created_at,
            updated_at: document.updated_at,
        })
    }
}

/// Document store, one collection per entity kind.
///
/// Each operation is atomic within its own collection only.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert a new document and assign it an id
    async fn insert(&self, kind: EntityKind, body: serde_json::Value) -> Result<StoredDocument>;

    /// Find a document by id
    async fn find(&self, kind: EntityKind, id: RecordId) -> Result<Option<StoredDocument>>;

    /// Replace the body of an existing document; `None` if it does not exist
    async fn replace(
        &self,
        kind: EntityKind,
        id: RecordId,
        body: serde_json::Value,
    ) -> Result<Option<StoredDocument>>;

    /// Delete a document; `false` if it did not exist
    async fn delete(&self, kind: EntityKind, id: RecordId) -> Result<bool>;

    /// All documents of a collection, most recently created first
    async fn list_all(&self, kind: EntityKind) -> Result<Vec<StoredDocument>>;

    /// Number of documents in a collection
    async fn count(&self, kind: EntityKind) -> Result<u64>;
}
