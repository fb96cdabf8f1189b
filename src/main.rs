//! Quillboard - blog API server
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │  Config  │───▶│  Store   │───▶│ Services │───▶│ Gateway  │
//! │  (YAML)  │    │(PG / mem)│    │(posts...)│    │ (axum)   │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```
//!
//! Usage: `quillboard [--env <name>] [--port <port>]`

use std::sync::Arc;

use anyhow::Context;

use quillboard::config::AppConfig;
use quillboard::db::Database;
use quillboard::gateway::{self, state::AppState};
use quillboard::{MemoryStore, PgStore};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

async fn run(app_config: AppConfig) -> anyhow::Result<()> {
    let port = get_port_override().unwrap_or(app_config.gateway.port);

    let state = match &app_config.postgres_url {
        Some(url) => {
            let db = Database::connect(url, &app_config.database)
                .await
                .context("Failed to connect to PostgreSQL")?;
            db.migrate().await.context("Schema migration failed")?;
            let db = Arc::new(db);
            let store = Arc::new(PgStore::new(db.pool().clone()));
            AppState::new(store, app_config.auth.clone(), Some(db))
        }
        None => {
            tracing::warn!("No postgres_url configured; using in-memory store (data is not persisted)");
            AppState::new(Arc::new(MemoryStore::new()), app_config.auth.clone(), None)
        }
    };

    gateway::run_server(&app_config.gateway.host, port, Arc::new(state)).await
}

#[tokio::main]
async fn main() {
    let env = get_env();
    let app_config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: {:#}", e);
            std::process::exit(1);
        }
    };
    let _log_guard = quillboard::logging::init_logging(&app_config);

    tracing::info!(
        "Starting Quillboard ({}) in {} mode",
        env!("GIT_HASH"),
        env
    );

    if let Err(e) = run(app_config).await {
        tracing::error!("FATAL: {:#}", e);
        std::process::exit(1);
    }
}
