use std::time::Duration;

use couch_client::CouchClient;
use ledger::{FixedDelay, Ledger};

mod commands;
mod config;
mod error;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let (settings, command) = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "financier={level},ledger={level},couch_client={level}",
            level = settings.level
        ))
        .init();

    let client = CouchClient::builder()
        .url(&settings.url)
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()?;
    tracing::info!("Connecting to {}...", client.base_url());

    let mut ledger = Ledger::builder(client)
        .pacer(FixedDelay(Duration::from_millis(settings.pacing_ms)))
        .credentials(&settings.username, &settings.password)
        .build()
        .await?;

    let output = commands::run(&mut ledger, &settings.budget, command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
