use std::path::PathBuf;

use clap::Parser;

use crypto_dash::config::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(name = "crypto-dash")]
#[command(about = "Live cryptocurrency market dashboard for the terminal")]
#[command(version)]
pub struct Cli {
    /// JSON config file (defaults to assets/config.json when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Quote currency, e.g. idr or usd
    #[arg(long)]
    pub currency: Option<String>,

    /// Base URL of a CoinGecko-compatible API
    #[arg(long)]
    pub base_url: Option<String>,

    /// Seconds between background refreshes
    #[arg(long, value_name = "SECS")]
    pub refresh_interval: Option<u64>,

    /// Where log records go while the dashboard owns the terminal
    #[arg(long, default_value = "crypto-dash.log")]
    pub log_file: PathBuf,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            vs_currency: self.currency.clone(),
            base_url: self.base_url.clone(),
            refresh_interval_secs: self.refresh_interval,
        }
    }
}
