use actix_web::{web, App, HttpResponse, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefeed::config::Config;
use storefeed::middleware::{ErrorHandler, RequestId};
use storefeed::modules::feeds::services::{FeedFetcher, HttpRemoteSource};
use storefeed::modules::reports::controllers::report_controller;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefeed=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;
    config
        .storage
        .ensure_directories()
        .context("Failed to create working directories")?;

    tracing::info!("Starting Storefeed analytics service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Remote feed server: {}", config.remote.base_url);
    tracing::info!("Configured cities: {}", config.cities.len());
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Wire the cache/fetch orchestrator over the remote file server
    let source =
        HttpRemoteSource::new(&config.remote).context("Failed to build remote source")?;
    let fetcher = web::Data::new(FeedFetcher::new(
        Box::new(source),
        config.storage.cache_dir(),
    ));
    let config_data = web::Data::new(config.clone());

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(ErrorHandler)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(fetcher.clone())
            .app_data(config_data.clone())
            .configure(report_controller::configure)
            .route("/health", web::get().to(health_check))
            .route("/", web::get().to(index))
    })
    .bind(&bind_address)?;

    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    tracing::info!("Server started at http://{}", bind_address);

    server.run().await?;
    Ok(())
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "storefeed"
    }))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "Storefeed Retail Analytics",
        "version": "0.1.0",
        "status": "running"
    }))
}
