//! Client trait for talking to the nomenclature service
//!
//! Implemented in-process by `api::native::NativeClient` and over HTTP by
//! `api::http::RestClient`. Page controllers are written against this trait.

use super::{error::NomenclatureError, model::{Record, RecordId}};
use crate::api::rest::mapper::RestEntity;
use crate::domain::repository::DocumentCodec;
use crate::domain::validation::Validate;
use async_trait::async_trait;

/// Entities that can travel through every layer of the service
pub trait ApiEntity: Validate + DocumentCodec + RestEntity {}

impl<T: Validate + DocumentCodec + RestEntity> ApiEntity for T {}

/// Nomenclature API, uniform across the six collections
#[async_trait]
pub trait NomenclatureApi: Send + Sync {
    /// All records of a collection, newest first
    async fn list<E: ApiEntity>(&self) -> Result<Vec<Record<E>>, NomenclatureError>;

    /// Create a record from a draft
    async fn create<E: ApiEntity>(&self, draft: E::Draft) -> Result<Record<E>, NomenclatureError>;

    /// Replace every field of a record; omitted attachments are kept
    async fn update<E: ApiEntity>(
        &self,
        id: RecordId,
        draft: E::Draft,
    ) -> Result<Record<E>, NomenclatureError>;

    /// Delete a record by id
    async fn delete<E: ApiEntity>(&self, id: RecordId) -> Result<(), NomenclatureError>;
}
