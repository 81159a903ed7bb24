//! Domain service - CRUD orchestration over the document store

use super::events::{EventPublisher, NomenclatureEvent};
use super::repository::{DocumentCodec, DocumentRepository};
use super::validation::Validate;
use crate::contract::{Entity, NomenclatureError, Record, RecordId};
use std::sync::Arc;

/// Domain service for nomenclature management
pub struct Service {
    repo: Arc<dyn DocumentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

fn internal(error: anyhow::Error) -> NomenclatureError {
    tracing::error!(error = ?error, "document store failure");
    NomenclatureError::Internal
}

impl Service {
    /// Create a new service instance
    pub fn new(
        repo: Arc<dyn DocumentRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repo,
            event_publisher,
        }
    }

    /// All records of a collection, newest first
    pub async fn list<E>(&self) -> Result<Vec<Record<E>>, NomenclatureError>
    where
        E: Validate + DocumentCodec,
    {
        let documents = self.repo.list_all(E::KIND).await.map_err(internal)?;
        documents
            .into_iter()
            .map(|document| E::decode_record(document).map_err(internal))
            .collect()
    }

    /// A single record
    pub async fn get<E>(&self, id: RecordId) -> Result<Record<E>, NomenclatureError>
    where
        E: Validate + DocumentCodec,
    {
        let document = self
            .repo
            .find(E::KIND, id)
            .await
            .map_err(internal)?
            .ok_or_else(|| NomenclatureError::not_found(E::KIND, id))?;
        E::decode_record(document).map_err(internal)
    }

    /// Validate a draft and insert it
    pub async fn create<E>(&self, draft: E::Draft) -> Result<Record<E>, NomenclatureError>
    where
        E: Validate + DocumentCodec,
    {
        let entity = E::validate(&draft)?;
        let body = entity.encode().map_err(internal)?;

        let document = self.repo.insert(E::KIND, body).await.map_err(internal)?;
        let record = E::decode_record(document).map_err(internal)?;
        tracing::debug!(collection = %E::KIND, id = %record.id, "record created");

        self.publish(NomenclatureEvent::created(E::KIND, record.id)).await;
        Ok(record)
    }

    /// Validate a draft and replace every field of an existing record.
    ///
    /// Attachments the draft omits keep their stored value.
    pub async fn update<E>(
        &self,
        id: RecordId,
        draft: E::Draft,
    ) -> Result<Record<E>, NomenclatureError>
    where
        E: Validate + DocumentCodec,
    {
        let mut entity = E::validate(&draft)?;

        let previous: Record<E> = self.get(id).await?;
        entity.retain_omitted(&previous.data, &draft);
        let body = entity.encode().map_err(internal)?;

        let document = self
            .repo
            .replace(E::KIND, id, body)
            .await
            .map_err(internal)?
            .ok_or_else(|| NomenclatureError::not_found(E::KIND, id))?;
        let record = E::decode_record(document).map_err(internal)?;
        tracing::debug!(collection = %E::KIND, id = %id, "record updated");

        self.publish(NomenclatureEvent::updated(E::KIND, id)).await;
        Ok(record)
    }

    /// Delete a record without any referential check.
    ///
    /// Records that reference it keep their now dangling ids.
    pub async fn delete<E: Entity>(&self, id: RecordId) -> Result<(), NomenclatureError> {
        let existed = self.repo.delete(E::KIND, id).await.map_err(internal)?;
        if !existed {
            return Err(NomenclatureError::not_found(E::KIND, id));
        }
        tracing::debug!(collection = %E::KIND, id = %id, "record deleted");

        self.publish(NomenclatureEvent::deleted(E::KIND, id)).await;
        Ok(())
    }

    /// Number of records in a collection
    pub async fn count<E: Entity>(&self) -> Result<u64, NomenclatureError> {
        self.repo.count(E::KIND).await.map_err(internal)
    }

    async fn publish(&self, event: NomenclatureEvent) {
        if let Err(e) = self.event_publisher.publish(event).await {
            tracing::warn!(error = %e, "failed to publish nomenclature event");
        }
    }
}
