use futures::future::BoxFuture;

use crate::error::Result;

pub mod client;
pub mod model;
pub mod request;

pub use client::CoinGeckoClient;
pub use model::{Asset, SearchHit, SearchResponse};

pub type FetchResult<T> = Result<T>;

/// Read-only view of the market-data API consumed by the dashboard.
///
/// The controller only talks to this trait, so tests can drive it with canned data.
pub trait MarketApi: Send + Sync {
    /// Top listing for the configured currency, in API order.
    fn markets(&self) -> BoxFuture<'_, FetchResult<Vec<Asset>>>;

    /// Free-text lookup resolving a query to canonical asset ids.
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, FetchResult<Vec<SearchHit>>>;

    /// Detailed listing restricted to exactly `ids`.
    fn markets_by_ids<'a>(&'a self, ids: &'a [String])
        -> BoxFuture<'a, FetchResult<Vec<Asset>>>;
}
