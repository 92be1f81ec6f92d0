//! # Quill Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_files::Files;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use tracing_actix_web::TracingLogger;

use quill_infra::database;
use quill_server::config::AppConfig;
use quill_server::handlers;
use quill_server::state::AppState;
use quill_server::telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env().context("invalid configuration")?;

    let db = database::connect(&config.database)
        .await
        .context("database connection failed")?;

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .context("database migration failed")?;
        tracing::info!("Migrations applied");
    }

    let state = AppState::new(&config, db)
        .await
        .context("application state failed to build")?;

    tracing::info!(
        "Starting Quill server on {}:{}",
        config.host,
        config.port
    );

    let static_dir = config.uploads.static_dir.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .service(Files::new("/static", &static_dir))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
