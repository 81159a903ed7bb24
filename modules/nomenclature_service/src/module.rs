//! Module declaration and lifecycle
//!
//! Wires the storage, the domain service and the API surfaces together. The
//! server binary drives `migrate`, `init` and `register_rest` in that order.

use crate::api::http::RestClient;
use crate::api::native::NativeClient;
use crate::config::Config;
use crate::domain::{Service, TracingEventPublisher};
use crate::infra::storage::{Migrator, SeaOrmDocumentRepository};
use anyhow::Result;
use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Nomenclature service module
pub struct NomenclatureModule {
    config: RwLock<Config>,
    service: RwLock<Option<Arc<Service>>>,
}

impl Default for NomenclatureModule {
    fn default() -> Self {
        Self {
            config: RwLock::new(Config::default()),
            service: RwLock::new(None),
        }
    }
}

impl NomenclatureModule {
    /// Apply pending schema migrations
    pub async fn migrate(&self, db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None).await?;
        tracing::info!("Nomenclature service migrations completed");
        Ok(())
    }

    pub fn init(&self, config: Config, db: Arc<DatabaseConnection>) -> Result<()> {
        *self.config.write() = config;

        let repo = Arc::new(SeaOrmDocumentRepository::new(db));
        let event_publisher = Arc::new(TracingEventPublisher);

        let service = Arc::new(Service::new(repo, event_publisher));
        *self.service.write() = Some(service);

        tracing::info!("Nomenclature service initialized");
        Ok(())
    }

    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    pub fn service(&self) -> Result<Arc<Service>> {
        self.service
            .read()
            .as_ref()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// In-process client over the initialized service
    pub fn native_client(&self) -> Result<NativeClient> {
        Ok(NativeClient::new(self.service()?))
    }

    /// HTTP client for a remote service, bounded by the configured timeout
    pub fn rest_client(&self, base_url: impl Into<String>) -> Result<RestClient> {
        RestClient::from_config(base_url, &self.config.read())
    }

    /// Add the collection routes to `router`
    pub fn register_rest(&self, router: axum::Router) -> Result<axum::Router> {
        let service = self.service()?;

        tracing::info!("Registering nomenclature REST routes");
        Ok(crate::api::rest::register_routes(router, service))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{Activity, ActivityDraft, NomenclatureApi};
    use sea_orm::{ConnectOptions, Database};

    #[tokio::test]
    async fn lifecycle_wires_the_native_client() {
        let module = NomenclatureModule::default();
        assert!(module.native_client().is_err());

        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).sqlx_logging(false);
        let db = Database::connect(options).await.unwrap();
        module.migrate(&db).await.unwrap();

        let config = Config {
            calibration_activity: "Calibration".to_string(),
            request_timeout: std::time::Duration::from_secs(3),
            ..Config::default()
        };
        module.init(config.clone(), Arc::new(db)).unwrap();
        assert_eq!(module.config(), config);

        let client = module.native_client().unwrap();
        let draft = ActivityDraft {
            name_bg: "Калибриране".to_string(),
            name_en: "Calibration".to_string(),
        };
        let created = client.create::<Activity>(draft).await.unwrap();
        let listed = client.list::<Activity>().await.unwrap();
        assert_eq!(listed, vec![created]);

        assert!(module.register_rest(axum::Router::new()).is_ok());

        let remote = module.rest_client("http://localhost:5001/api").unwrap();
        assert_eq!(remote.timeout(), config.request_timeout);
    }
}
