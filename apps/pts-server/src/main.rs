//! PT scheme nomenclature server

mod config;
mod logging;
mod server;

use anyhow::{Context, Result};
use clap::Parser;
use config::AppConfig;
use nomenclature_service::NomenclatureModule;
use sea_orm::{ConnectOptions, Database};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// PT scheme nomenclature server
#[derive(Parser, Debug)]
#[command(name = "pts-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file (default: config/pts.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref())?;

    if args.print_config {
        print!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    logging::init(&config.logging);

    let mut options = ConnectOptions::new(config.database.url.clone());
    options
        .max_connections(config.database.max_connections)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("failed to connect to database")?;

    let module = NomenclatureModule::default();
    module.migrate(&db).await?;
    module.init(config.nomenclature.clone(), Arc::new(db))?;

    let app = server::build_router(&module, &config.server)?;

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "PTS server listening");

    let cancel = CancellationToken::new();
    tokio::spawn(shutdown_on_signal(cancel.clone()));

    server::serve(listener, app, cancel).await
}

async fn shutdown_on_signal(cancel: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "failed to listen for shutdown signal"),
    }
    cancel.cancel();
}
