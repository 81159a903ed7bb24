//! Route registration
//!
//! Every collection gets the same five routes under `/{collection}`; the
//! caller decides where the router is nested (the server mounts it at `/api`).

use super::{error::Problem, handlers, openapi::ApiDoc};
use crate::contract::{
    Activity, ApiEntity, Characteristic, PtSchemeObject, Quantity, Standard, Subcontractor,
};
use crate::domain::Service;
use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

/// Register all REST routes
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .merge(collection::<Activity>())
        .merge(collection::<PtSchemeObject>())
        .merge(collection::<Characteristic>())
        .merge(collection::<Quantity>())
        .merge(collection::<Standard>())
        .merge(collection::<Subcontractor>())
        .route("/openapi.json", get(openapi_handler))
        // Add service as extension for handlers
        .layer(Extension(service))
}

fn collection<E: ApiEntity>() -> Router {
    let base = format!("/{}", E::KIND.collection());
    let item = format!("{base}/{{id}}");

    Router::new()
        .route(&base, get(list_handler::<E>).post(create_handler::<E>))
        .route(
            &item,
            get(get_handler::<E>)
                .put(update_handler::<E>)
                .delete(delete_handler::<E>),
        )
}

// ===== Handler wrappers that extract service from Extension =====

async fn list_handler<E: ApiEntity>(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<Vec<E::Dto>>, Problem> {
    handlers::list::<E>(service).await
}

async fn get_handler<E: ApiEntity>(
    Extension(service): Extension<Arc<Service>>,
    path: Path<String>,
) -> Result<Json<E::Dto>, Problem> {
    handlers::get::<E>(service, path).await
}

async fn create_handler<E: ApiEntity>(
    Extension(service): Extension<Arc<Service>>,
    body: Result<Json<E::Request>, JsonRejection>,
) -> Result<(StatusCode, Json<E::Dto>), Problem> {
    handlers::create::<E>(service, body).await
}

async fn update_handler<E: ApiEntity>(
    Extension(service): Extension<Arc<Service>>,
    path: Path<String>,
    body: Result<Json<E::Request>, JsonRejection>,
) -> Result<Json<E::Dto>, Problem> {
    handlers::update::<E>(service, path, body).await
}

async fn delete_handler<E: ApiEntity>(
    Extension(service): Extension<Arc<Service>>,
    path: Path<String>,
) -> Result<StatusCode, Problem> {
    handlers::delete::<E>(service, path).await
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
