// src/main.rs
use std::sync::Arc;

use axum::{response::Redirect, routing::get};
use dotenvy::dotenv;
use tower_http::trace::TraceLayer;
use tracing_subscriber::fmt::init as tracing_init;

use catalog_backend::config::AppConfig;
use catalog_backend::images::LocalImageStore;
use catalog_backend::repositories::{category::PgCategoryRepository, product::PgProductRepository};
use catalog_backend::services::product_pages::ProductPageHandler;
use catalog_backend::views::{Views, PRODUCT_LIST_PATH};
use catalog_backend::{database, listener, routes, state};

#[tokio::main]
async fn main() {
    // Load environment variables, RUST_LOG included
    dotenv().ok();

    // Initialize logging
    tracing_init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return;
        }
    };

    // Create database pool and bring the schema up to date
    let db_pool = match database::create_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create database pool");
            return;
        }
    };
    if let Err(e) = database::run_migrations(&db_pool).await {
        tracing::error!(error = %e, "Failed to run migrations");
        return;
    }

    let views = match &config.template_dir {
        Some(dir) => Views::from_dir(dir),
        None => Views::bundled(),
    };
    let views = match views {
        Ok(views) => views,
        Err(e) => {
            tracing::error!(error = ?e, "Failed to load templates");
            return;
        }
    };

    // Create application state
    let image_store = LocalImageStore::new(config.upload_root.clone());
    tracing::info!(upload_root = %image_store.root().display(), "Storing product images");
    let pages = ProductPageHandler::new(
        Arc::new(PgProductRepository::new(db_pool.clone())),
        Arc::new(PgCategoryRepository::new(db_pool)),
        Arc::new(image_store),
    );
    let app_state = state::AppState::new(pages, views);

    let app = routes::create_router(&config.upload_root, config.max_upload_bytes)
        .route("/", get(|| async { Redirect::to(PRODUCT_LIST_PATH) }))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let listener = match listener::bind(&config).await {
        Ok((listener, addr)) => {
            tracing::info!("Server running on {}", addr);
            listener
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to bind to any port starting at {} on {}", config.port, config.host);
            return;
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
    }
}

async fn health_check() -> &'static str {
    "OK"
}
