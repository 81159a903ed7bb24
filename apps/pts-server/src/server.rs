//! HTTP router assembly and serving

use crate::config::ServerConfig;
use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    Router,
};
use nomenclature_service::NomenclatureModule;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Mount the module's collections under `/api` and add the middleware stack
pub fn build_router(module: &NomenclatureModule, config: &ServerConfig) -> Result<Router> {
    let api = module.register_rest(Router::new())?;

    let origin: HeaderValue = config
        .cors_origin
        .parse()
        .with_context(|| format!("invalid CORS origin '{}'", config.cors_origin))?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .nest("/api", api)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors))
}

/// Serve until `cancel` fires, then drain in-flight requests
pub async fn serve(listener: TcpListener, app: Router, cancel: CancellationToken) -> Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .context("HTTP server error")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sea_orm::{ConnectOptions, Database};
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn module() -> NomenclatureModule {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();

        let module = NomenclatureModule::default();
        module.migrate(&db).await.unwrap();
        module
            .init(nomenclature_service::Config::default(), Arc::new(db))
            .unwrap();
        module
    }

    async fn app(config: &ServerConfig) -> Router {
        build_router(&module().await, config).unwrap()
    }

    #[tokio::test]
    async fn collections_are_mounted_under_api() {
        let app = app(&ServerConfig::default()).await;

        let response = app
            .oneshot(Request::get("/api/activities").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn cors_preflight_allows_configured_origin() {
        let app = app(&ServerConfig::default()).await;

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/activities")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn oversized_bodies_are_rejected() {
        let config = ServerConfig {
            max_body_bytes: 64,
            ..ServerConfig::default()
        };
        let app = app(&config).await;

        let body = serde_json::json!({ "NameBG": "x".repeat(200), "NameEN": "y" }).to_string();
        let response = app
            .oneshot(
                Request::post("/api/activities")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::CONTENT_LENGTH, body.len())
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn invalid_cors_origin_is_reported() {
        let config = ServerConfig {
            cors_origin: "bad\norigin".to_string(),
            ..ServerConfig::default()
        };
        let err = build_router(&module().await, &config).unwrap_err();
        assert!(err.to_string().contains("invalid CORS origin"));
    }

    #[test]
    fn uninitialized_module_cannot_serve() {
        let module = NomenclatureModule::default();
        assert!(build_router(&module, &ServerConfig::default()).is_err());
    }
}
