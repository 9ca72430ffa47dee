//! Service Configuration
//! Mission: Every tunable comes from a flag or its environment variable
//!
//! Environment:
//!   CATALOG_BIND - Listen address (default: 0.0.0.0:3000)
//!   CATALOG_BACKEND - `sqlite` or `memory` (default: sqlite)
//!   CATALOG_DB_PATH - SQLite file (default: catalog.db)
//!   CATALOG_ADMIN_USERNAME / CATALOG_ADMIN_PASSWORD - The login identity
//!   JWT_SECRET - Signing secret
//!   JWT_SECRET_FILE - File holding the signing secret; wins over JWT_SECRET
//!   JWT_TTL_SECS - Token lifetime (default: 3600)

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

pub const DEV_JWT_SECRET: &str = "dev-secret-change-in-production-minimum-32-characters";

/// Which [`crate::store::ProductStore`] implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// Embedded SQLite file
    Sqlite,
    /// Process-local map, lost on exit
    Memory,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "catalog")]
#[command(about = "Product catalog API with JWT-protected mutations")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "CATALOG_BIND", default_value = "0.0.0.0:3000")]
    pub bind: String,

    /// Product storage backend
    #[arg(long, env = "CATALOG_BACKEND", value_enum, default_value = "sqlite")]
    pub backend: StoreBackend,

    /// SQLite database file (sqlite backend only)
    #[arg(long, env = "CATALOG_DB_PATH", default_value = "catalog.db")]
    pub db_path: PathBuf,

    /// Username accepted by /api/login
    #[arg(long, env = "CATALOG_ADMIN_USERNAME", default_value = "admin")]
    pub admin_username: String,

    /// Password accepted by /api/login
    #[arg(
        long,
        env = "CATALOG_ADMIN_PASSWORD",
        default_value = "password123",
        hide_env_values = true
    )]
    pub admin_password: String,

    /// JWT signing secret
    #[arg(long, env = "JWT_SECRET", default_value = DEV_JWT_SECRET, hide_env_values = true)]
    pub jwt_secret: String,

    /// Read the JWT signing secret from this file instead (e.g. a mounted secret)
    #[arg(long, env = "JWT_SECRET_FILE")]
    pub jwt_secret_file: Option<PathBuf>,

    /// Token lifetime in seconds
    #[arg(long, env = "JWT_TTL_SECS", default_value_t = crate::auth::jwt::DEFAULT_TOKEN_TTL_SECS)]
    pub token_ttl_secs: i64,
}

impl Config {
    /// The signing secret, preferring the secret file when one is configured.
    pub fn resolve_jwt_secret(&self) -> Result<String> {
        let secret = match &self.jwt_secret_file {
            Some(path) => read_secret_file(path)?,
            None => self.jwt_secret.trim().to_string(),
        };

        if secret.is_empty() {
            bail!("JWT secret is empty");
        }
        Ok(secret)
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret_file.is_none() && self.jwt_secret == DEV_JWT_SECRET
    }
}

fn read_secret_file(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read JWT secret file {}", path.display()))?;
    Ok(raw.trim().to_string())
}

/// Load `.env` from the working directory (and its parents) and the crate root.
pub fn load_env() {
    let _ = dotenv::dotenv();

    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}
