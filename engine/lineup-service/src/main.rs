//! Lineup Service
//!
//! Reads optimization requests as JSON lines on stdin and publishes results
//! as JSON lines on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

use lineup_service::{
    initialize_logging_with_config, load_configuration, shutdown_signal, LinePublisher,
    ServiceState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up a local .env before reading LINEUP_* overrides
    dotenv::dotenv().ok();

    let config = load_configuration().context("Failed to load configuration")?;
    initialize_logging_with_config(&config.logging)?;

    info!("Starting Lineup Service v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Budget range {}-{}, roster size {}",
        config.engine.min_budget, config.engine.max_budget, config.engine.roster_size
    );

    let publisher = Arc::new(LinePublisher::stdout());
    let service_state = ServiceState::new(config, publisher)
        .await
        .context("Failed to initialize service state")?;
    info!("Service state initialized");

    let reader = BufReader::new(tokio::io::stdin());
    let handled = service_state.serve(reader, shutdown_signal()).await?;

    info!("Lineup Service shutdown complete ({} messages handled)", handled);
    Ok(())
}
