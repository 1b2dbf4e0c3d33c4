//! VarHub Server Entry Point

use clap::Parser;
use std::net::SocketAddr;
use tracing::info;
use varhub::cli::Cli;
use varhub::config::{get_env_with_fallback_or, get_env_with_fallback_parse};
use varhub::{api, config, db, logging, AppState};

#[derive(Clone)]
struct ServerConfig {
    host: String,
    port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = get_env_with_fallback_or("VARHUB_HOST", "HOST", "0.0.0.0");
        let port = get_env_with_fallback_parse("VARHUB_PORT", "PORT", 5000);
        Self { host, port }
    }

    fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[tokio::main]
async fn main() {
    // Parse CLI (only -h/--help and -V/--version)
    let _cli = Cli::parse();

    logging::init().expect("failed to initialize logging");
    let cfg = ServerConfig::from_env();
    run_server(cfg).await;
}

/// SQLiteファイルはディレクトリが存在しないと作成できないため、先に作成しておく
fn ensure_database_directory(database_url: &str) {
    if let Some(path) = database_url.strip_prefix("sqlite:") {
        // `sqlite::memory:` のような特殊指定はスキップ
        if !path.starts_with(':') {
            // `sqlite://` 形式に備えてスラッシュを除去し、クエリ部分を除外
            let normalized = path.trim_start_matches("//");
            let path_without_params = normalized.split('?').next().unwrap_or(normalized);
            let db_path = std::path::Path::new(path_without_params);
            if let Some(parent) = db_path.parent() {
                if let Err(err) = std::fs::create_dir_all(parent) {
                    panic!(
                        "Failed to create database directory {}: {}",
                        parent.display(),
                        err
                    );
                }
            }
        }
    }
}

async fn run_server(config: ServerConfig) {
    info!("VarHub v{}", env!("CARGO_PKG_VERSION"));

    let database_url = config::get_database_url();
    ensure_database_directory(&database_url);

    let db_pool = db::migrations::initialize_database(&database_url)
        .await
        .expect("Failed to initialize database");

    let admin_key = config::get_admin_key();
    if admin_key.is_none() {
        tracing::warn!("VARHUB_ADMIN_KEY is not set; the cleanup API is disabled");
    }

    let state = AppState { db_pool, admin_key };

    let router = api::create_router(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");

    info!("VarHub server listening on {}", bind_addr);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}
