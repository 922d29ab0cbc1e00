//! # Credit Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapters
//! - Create the customer and credit services
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, LogFormat};
use credit_hex::{CreditService, CustomerService, inbound::HttpServer};
use credit_repo::build_repos;

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,credit_app=debug,credit_hex=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    init_tracing(config.log_format);

    tracing::info!("Starting credit server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build repositories (handles connection and migration)
    let repos = build_repos(&config.database_url).await?;

    let customers = CustomerService::new(repos.customers);
    let credits = CreditService::new(repos.credits);

    // Create and run the HTTP server
    let server = HttpServer::new(customers, credits);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
