use futures::future::{BoxFuture, FutureExt};
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::{AppError, Context};

use super::request::{build_headers, endpoint_url};
use super::{Asset, FetchResult, MarketApi, SearchHit, SearchResponse};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the CoinGecko-compatible listing, search and batch endpoints.
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    vs_currency: String,
    per_page: u32,
    page: u32,
}

impl CoinGeckoClient {
    pub fn new(api: &ApiConfig) -> FetchResult<Self> {
        let headers = build_headers(&api.headers)?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(api.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: api.base_url.clone(),
            vs_currency: api.vs_currency.clone(),
            per_page: api.per_page,
            page: api.page,
        })
    }

    pub fn vs_currency(&self) -> &str {
        &self.vs_currency
    }

    fn markets_request(&self) -> RequestBuilder {
        self.client
            .get(endpoint_url(&self.base_url, "coins/markets"))
            .query(&[
                ("vs_currency", self.vs_currency.clone()),
                ("per_page", self.per_page.to_string()),
                ("page", self.page.to_string()),
            ])
    }

    fn search_request(&self, query: &str) -> RequestBuilder {
        self.client
            .get(endpoint_url(&self.base_url, "search"))
            .query(&[("query", query)])
    }

    fn markets_by_ids_request(&self, ids: &[String]) -> RequestBuilder {
        self.client
            .get(endpoint_url(&self.base_url, "coins/markets"))
            .query(&[
                ("vs_currency", self.vs_currency.clone()),
                ("ids", ids.join(",")),
            ])
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        label: &str,
    ) -> FetchResult<T> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::message(format!(
                "{} request to {} failed with status {}",
                label,
                response.url(),
                status
            )));
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read {} response body", label))?;
        debug!("{} response: {} bytes", label, body.len());

        let parsed = serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse {} response", label))?;
        Ok(parsed)
    }
}

impl MarketApi for CoinGeckoClient {
    fn markets(&self) -> BoxFuture<'_, FetchResult<Vec<Asset>>> {
        self.get_json(self.markets_request(), "Listing").boxed()
    }

    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, FetchResult<Vec<SearchHit>>> {
        async move {
            let response: SearchResponse =
                self.get_json(self.search_request(query), "Search").await?;
            Ok(response.coins)
        }
        .boxed()
    }

    fn markets_by_ids<'a>(&'a self, ids: &'a [String]) -> BoxFuture<'a, FetchResult<Vec<Asset>>> {
        self.get_json(self.markets_by_ids_request(ids), "Detail")
            .boxed()
    }
}
