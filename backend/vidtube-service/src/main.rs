use actix_middleware::{CorrelationIdMiddleware, JwtAuthMiddleware};
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use db_pool::{create_pool, run_migrations};
use media_store::build_media_store;
use std::io;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vidtube_service::db::MIGRATOR;
use vidtube_service::middleware::build_cors;
use vidtube_service::routes::configure_routes;
use vidtube_service::{AppState, AuthSettings, Config};

const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            return Err(io::Error::new(io::ErrorKind::Other, e).into());
        }
    };

    tracing::info!(
        env = %config.app.env,
        bind = %config.bind_address(),
        "Starting vidtube-service"
    );

    let db = create_pool(config.database.pool.clone())
        .await
        .context("Failed to create database pool")?;

    if config.database.run_migrations {
        run_migrations(&db, &MIGRATOR)
            .await
            .context("Failed to run database migrations")?;
    } else {
        tracing::info!("Skipping database migrations (DATABASE_RUN_MIGRATIONS=false)");
    }

    let media = build_media_store(&config.media)
        .await
        .context("Failed to initialize media store")?;
    if let Err(e) = media.health_check().await {
        tracing::warn!(error = %e, "Media store health check failed, uploads may fail");
    }

    tokio::fs::create_dir_all(&config.uploads.temp_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload temp dir {}",
                config.uploads.temp_dir.display()
            )
        })?;

    let auth = AuthSettings::from_config(&config.auth);
    let state = web::Data::new(AppState {
        db,
        media,
        uploads: config.uploads.clone(),
        auth: auth.clone(),
    });

    let bind_address = config.bind_address();
    let cors_config = config.cors.clone();
    let http_config = config.http.clone();

    let server = HttpServer::new(move || {
        let http_config = http_config.clone();
        App::new()
            .app_data(state.clone())
            .wrap(JwtAuthMiddleware::new(auth.keys.clone()))
            .wrap(CorrelationIdMiddleware)
            .wrap(TracingLogger::default())
            .wrap(build_cors(&cors_config))
            .configure(move |cfg| configure_routes(cfg, &http_config))
    })
    .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!(address = %bind_address, "HTTP server is running");
    server.await.context("HTTP server error")?;
    tracing::info!("vidtube-service stopped");

    Ok(())
}
