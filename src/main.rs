//! Catalog - Product Catalog API Server
//!
//! Usage:
//!   catalog --backend sqlite --db-path catalog.db --bind 0.0.0.0:3000
//!
//! Every flag also reads an environment variable; see `catalog --help`.

use anyhow::{Context, Result};
use axum::{extract::Request, ServiceExt};
use catalog_backend::{
    api::{build_router, products::SharedStore, AppState},
    auth::{AuthState, CredentialStore, JwtHandler},
    config::{load_env, Config, StoreBackend},
    store::{MemoryProductStore, SqliteProductStore},
};
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment and logging
    load_env();
    init_tracing();

    let config = Config::parse();

    info!("Catalog API starting");

    let products: SharedStore = match config.backend {
        StoreBackend::Sqlite => Arc::new(
            SqliteProductStore::open(&config.db_path)
                .with_context(|| format!("Failed to open {}", config.db_path.display()))?,
        ),
        StoreBackend::Memory => {
            warn!("Using in-memory product store; data is lost on exit");
            Arc::new(MemoryProductStore::new())
        }
    };
    info!("Product store backend: {}", products.backend_name());

    if config.uses_dev_secret() {
        warn!("JWT_SECRET not set, using development secret. CHANGE IN PRODUCTION!");
    }
    let jwt_handler = Arc::new(JwtHandler::new(
        &config.resolve_jwt_secret()?,
        config.token_ttl_secs,
    ));
    let credentials = Arc::new(CredentialStore::new(
        config.admin_username.clone(),
        &config.admin_password,
    )?);
    info!(
        "Authentication initialized for user '{}' ({}s tokens)",
        credentials.username(),
        jwt_handler.ttl_secs()
    );

    let app = build_router(AppState::new(
        products,
        AuthState::new(credentials, jwt_handler),
    ));

    // Start server
    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("API server listening on {}", config.bind);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Catalog API stopped");
    Ok(())
}

/// Initialize tracing; `RUST_LOG` overrides the default filter
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_backend=debug,catalog=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("Shutdown signal received");
}
