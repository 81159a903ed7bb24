//! HTTP request handlers - thin layer that delegates to domain service
//!
//! One generic handler per operation, instantiated for each collection in
//! `routes`.

use super::error::{map_domain_error, map_json_rejection, Problem};
use crate::contract::{ApiEntity, NomenclatureError, RecordId};
use crate::domain::Service;
use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

/// Ids that do not parse can never match a stored record
fn parse_id<E: ApiEntity>(raw: &str) -> Result<RecordId, Problem> {
    raw.parse()
        .map_err(|_| map_domain_error(NomenclatureError::not_found(E::KIND, raw)))
}

/// List every record of a collection, newest first
pub async fn list<E: ApiEntity>(service: Arc<Service>) -> Result<Json<Vec<E::Dto>>, Problem> {
    let records = service.list::<E>().await.map_err(map_domain_error)?;
    Ok(Json(records.into_iter().map(E::to_dto).collect()))
}

/// Get a single record
pub async fn get<E: ApiEntity>(
    service: Arc<Service>,
    Path(id): Path<String>,
) -> Result<Json<E::Dto>, Problem> {
    let id = parse_id::<E>(&id)?;
    let record = service.get::<E>(id).await.map_err(map_domain_error)?;
    Ok(Json(E::to_dto(record)))
}

/// Create a record
pub async fn create<E: ApiEntity>(
    service: Arc<Service>,
    body: Result<Json<E::Request>, JsonRejection>,
) -> Result<(StatusCode, Json<E::Dto>), Problem> {
    let Json(req) = body.map_err(map_json_rejection)?;

    let record = service
        .create::<E>(E::into_draft(req))
        .await
        .map_err(map_domain_error)?;

    Ok((StatusCode::CREATED, Json(E::to_dto(record))))
}

/// Replace a record's fields; attachments left out of the body are kept
pub async fn update<E: ApiEntity>(
    service: Arc<Service>,
    Path(id): Path<String>,
    body: Result<Json<E::Request>, JsonRejection>,
) -> Result<Json<E::Dto>, Problem> {
    let id = parse_id::<E>(&id)?;
    let Json(req) = body.map_err(map_json_rejection)?;

    let record = service
        .update::<E>(id, E::into_draft(req))
        .await
        .map_err(map_domain_error)?;

    Ok(Json(E::to_dto(record)))
}

/// Delete a record. Absent ids are answered like a successful delete.
pub async fn delete<E: ApiEntity>(
    service: Arc<Service>,
    Path(id): Path<String>,
) -> Result<StatusCode, Problem> {
    let Ok(id) = id.parse::<RecordId>() else {
        tracing::debug!(collection = %E::KIND, id = %id, "delete of malformed id ignored");
        return Ok(StatusCode::NO_CONTENT);
    };

    match service.delete::<E>(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(NomenclatureError::NotFound { .. }) => {
            tracing::debug!(collection = %E::KIND, id = %id, "delete of absent record ignored");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => Err(map_domain_error(e)),
    }
}
