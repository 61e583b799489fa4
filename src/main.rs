// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

use std::net::SocketAddr;
use std::path::Path;

use blog_api::app::Args;
use blog_api::cors::{build_cors_layer, clean_origins};
use blog_api::http_logging::HttpLoggingLayer;
use blog_api::logging::{default_log_dir, init_logging, parse_rotation, LogConfig, LOG_FILENAME};
use blog_api::post::PostService;
use blog_api::server::{router, AppState};
use blog_api::storage;
use clap::Parser;
use color_eyre::eyre::Result;
use tokio::net::TcpListener;
use tracing::info;

fn report_server_error(addr: SocketAddr, log_file: &Path, e: &std::io::Error) {
    if e.kind() == std::io::ErrorKind::AddrInUse {
        eprintln!();
        eprintln!("Error: Failed to start server - address {addr} is already in use");
        eprintln!();
        eprintln!("Another instance of blog-api may already be running.");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  1. Kill the existing process:   pkill blog-api");
        eprintln!("  2. Use a different port:        blog-api --addr 127.0.0.1:8081");
        eprintln!("  3. Check what's using the port: lsof -i :{}", addr.port());
        eprintln!();
        eprintln!("Logs: {}", log_file.display());
        eprintln!();
        return;
    }
    eprintln!();
    eprintln!("Error: Failed to start server: {e}");
    eprintln!();
    eprintln!("Logs: {}", log_file.display());
    eprintln!();
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received shutdown signal, stopping server...");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre error hooks for colored error output
    color_eyre::install()?;

    // Parse CLI arguments first (before logging, so we can use log config)
    let args = Args::parse();

    let log_dir = args.log_dir.clone().unwrap_or_else(default_log_dir);
    let log_file = log_dir.join(LOG_FILENAME);

    let log_config = LogConfig {
        log_dir,
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
        ..Default::default()
    };

    if let Err(e) = init_logging(log_config) {
        eprintln!();
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!();
        eprintln!("Logs: {}", log_file.display());
        eprintln!();
        return Err(e);
    }

    let config = args.resolve_config()?;
    let addr: SocketAddr = config.server.addr.parse()?;

    let cors_origins = clean_origins(&config.server.cors_origins);
    info!("CORS origins: {}", cors_origins.join(", "));

    let pool = storage::connect(&config.database).await?;
    let state = AppState::new(PostService::new(pool.clone()), config.pagination);

    let app = router(state)
        .layer(HttpLoggingLayer)
        .layer(build_cors_layer(cors_origins));

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            report_server_error(addr, &log_file, &e);
            return Err(e.into());
        }
    };

    info!("Starting blog API on http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        report_server_error(addr, &log_file, &e);
        return Err(e.into());
    }

    pool.close().await;
    info!("Blog API stopped");
    Ok(())
}
