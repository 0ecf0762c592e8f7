mod models;
mod routes;
mod store;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Employee records REST service
#[derive(Parser, Debug)]
#[command(
    name = "employee-api",
    about = "Employee records REST service",
    version
)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value = "8000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    let store = Arc::new(store::EmployeeStore::new());
    let app = routes::router(store);

    let addr = format!("{}:{}", args.host, args.port);
    tracing::info!("Employee API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
