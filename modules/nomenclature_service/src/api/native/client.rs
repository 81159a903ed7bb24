//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{ApiEntity, NomenclatureApi, NomenclatureError, Record, RecordId};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;

/// Native client implementation that directly calls the domain service
///
/// This client is used for in-process communication without HTTP overhead.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl NomenclatureApi for NativeClient {
    async fn list<E: ApiEntity>(&self) -> Result<Vec<Record<E>>, NomenclatureError> {
        self.service.list::<E>().await
    }

    async fn create<E: ApiEntity>(&self, draft: E::Draft) -> Result<Record<E>, NomenclatureError> {
        self.service.create::<E>(draft).await
    }

    async fn update<E: ApiEntity>(
        &self,
        id: RecordId,
        draft: E::Draft,
    ) -> Result<Record<E>, NomenclatureError> {
        self.service.update::<E>(id, draft).await
    }

    async fn delete<E: ApiEntity>(&self, id: RecordId) -> Result<(), NomenclatureError> {
        self.service.delete::<E>(id).await
    }
}
