use anyhow::{Context, Result};
use clap::Parser;
use nba_odds_sync::adapters::OddsApiClient;
use nba_odds_sync::cli::Cli;
use nba_odds_sync::config::AppConfig;
use nba_odds_sync::error::OddsSyncError;
use nba_odds_sync::services::run_sync;
use tracing::error;

mod main_runtime;

use main_runtime::init_logging;

// Events are fetched strictly one after another; one thread is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config, cli.output.as_deref())
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    let _log_guard = init_logging(&config.logging);

    if let Err(errors) = config.validate() {
        for e in &errors {
            error!("Invalid configuration: {}", e);
        }
        return Err(OddsSyncError::Validation(errors.join("; ")).into());
    }

    let client =
        OddsApiClient::new(config.odds_api.clone()).context("Failed to create odds API client")?;
    let generated_at = chrono::Local::now().naive_local();

    run_sync(&client, &config, generated_at)
        .await
        .context("Odds sync failed")?;

    Ok(())
}
