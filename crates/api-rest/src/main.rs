//! VisitLog REST server binary.
//!
//! ## Purpose
//! Runs the HTTP frontend: the visit entry form, the submit endpoint, the
//! diagnosis dashboard, the JSON listing, and Swagger UI.
//!
//! ## Environment Variables
//! - `VISITLOG_REST_ADDR`: server address (default: "0.0.0.0:3000")
//! - `VISITLOG_DATA_FILE`: backing CSV file (default: "patient_data.csv")

use api_rest::AppState;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use visitlog_core::{config::data_file_from_env_value, CoreConfig, VisitStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("visitlog_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("VISITLOG_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_file = data_file_from_env_value(std::env::var("VISITLOG_DATA_FILE").ok());

    tracing::info!("-- Starting VisitLog REST API on {}", addr);
    tracing::info!("-- Visit data file: {}", data_file.display());

    let cfg = Arc::new(CoreConfig::new(data_file));
    let state = AppState {
        store: Arc::new(VisitStore::new(cfg)),
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, api_rest::router(state)).await?;

    Ok(())
}
