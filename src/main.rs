//! Command-line smoke entry point.
//!
//! Loads configuration from the environment, builds the live adapters,
//! and lists the tutor directory. Useful for verifying project wiring
//! and security rules against a real or emulated backend.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use skolar::adapters::{FirestoreGateway, FirestoreGatewayConfig};
use skolar::config::AppConfig;
use skolar::ports::BookingGateway;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    config.validate()?;
    tracing::info!(project_id = %config.firestore.project_id, "configuration loaded");

    let gateway: Arc<dyn BookingGateway> = Arc::new(FirestoreGateway::new(
        FirestoreGatewayConfig::from(&config.firestore),
    ));

    let tutors = gateway.list_tutors().await?;
    tracing::info!(count = tutors.len(), "tutor directory fetched");
    for tutor in &tutors {
        println!(
            "{} ({}) - R{}/hr - {}",
            tutor.name,
            tutor.expertise.join(", "),
            tutor.rate,
            tutor.location
        );
    }

    Ok(())
}
