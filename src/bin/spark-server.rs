// ABOUTME: Persistence HTTP server binary for the Spark health-intake platform
// ABOUTME: Serves the user CRUD API backed by SQLite

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

//! # Spark Persistence Server
//!
//! Runs the `SQLite`-backed HTTP API that the mobile app's profile store
//! client and the staff dashboard talk to.
//!
//! ## Usage
//!
//! ```bash
//! # Start with defaults (port 3000, sqlite:spark.db)
//! cargo run --bin spark-server
//!
//! # Override port and database
//! cargo run --bin spark-server -- --port 8080 --database-url sqlite:./data/spark.db
//! ```

use clap::Parser;
use spark_intake::config::ServerConfig;
use spark_intake::database::Database;
use spark_intake::errors::{AppError, AppResult};
use spark_intake::logging;
use spark_intake::routes;
use std::net::SocketAddr;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "spark-server",
    about = "Spark persistence HTTP server",
    long_about = "SQLite-backed user persistence API for the Spark health-intake app"
)]
struct ServerArgs {
    /// Port override (defaults to SPARK_HTTP_PORT or 3000)
    #[arg(long)]
    port: Option<u16>,

    /// Database URL override (defaults to SPARK_DATABASE_URL or sqlite:spark.db)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    logging::init();

    let args = ServerArgs::parse();
    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    let database = Database::new(&config.database_url).await?;
    let app = routes::router(database);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    info!(%addr, database_url = %config.database_url, "starting persistence server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}
