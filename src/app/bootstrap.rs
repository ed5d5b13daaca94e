use std::sync::Arc;

use log::info;

use crate::app::controller::AppController;
use crate::config::Config;
use crate::error::{Context, Result};
use crate::fetch::{CoinGeckoClient, MarketApi};
use crate::ui::TerminalGuard;

/// Entry point used by `main`: load the initial listing, then hand over to the TUI.
///
/// A failure to load the initial listing is fatal and surfaces before the
/// terminal switches to the alternate screen.
pub async fn run(config: Config) -> Result<()> {
    let client = CoinGeckoClient::new(&config.api)?;
    info!(
        "Loading initial listing ({} per page, vs {})",
        config.api.per_page,
        client.vs_currency()
    );

    let initial = client
        .markets()
        .await
        .context("Failed to fetch initial market listing")?;
    info!("Initial listing loaded with {} rows", initial.len());

    let controller = AppController::new(Arc::new(client), &config, initial);
    let mut guard = TerminalGuard::new()?;
    let outcome = controller.run(&mut guard).await;
    guard.restore()?;
    outcome
}
