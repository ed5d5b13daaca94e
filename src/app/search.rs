use std::time::Duration;

use log::{info, warn};
use tokio::time::Instant;

use crate::app::state::SearchOutcome;
use crate::fetch::{FetchResult, MarketApi};

/// Tracks the quiet window after the last keystroke.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Start, or restart, the quiet window from `now`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the deadline if it has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Resolve a free-text query to detailed asset rows.
///
/// Failures at either step are logged here and reported as [`SearchOutcome::Failed`].
pub async fn run_search(api: &dyn MarketApi, query: &str) -> SearchOutcome {
    match search_then_detail(api, query).await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!("Search error for `{}`: {}", query, err);
            SearchOutcome::Failed
        }
    }
}

async fn search_then_detail(api: &dyn MarketApi, query: &str) -> FetchResult<SearchOutcome> {
    let hits = api.search(query).await?;
    if hits.is_empty() {
        info!("Search `{}` returned no matches", query);
        return Ok(SearchOutcome::NoMatches);
    }

    let ids: Vec<String> = hits.into_iter().map(|hit| hit.id).collect();
    let detailed = api.markets_by_ids(&ids).await?;
    info!(
        "Search `{}` matched {} ids, {} detailed rows",
        query,
        ids.len(),
        detailed.len()
    );
    Ok(SearchOutcome::Found(detailed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fake::{listing, Call, FakeMarketApi};

    #[tokio::test]
    async fn restarting_pushes_the_deadline_out() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.schedule(start);
        debouncer.schedule(start + Duration::from_millis(300));
        assert!(!debouncer.fire(start + Duration::from_millis(500)));
        assert!(debouncer.fire(start + Duration::from_millis(800)));
        assert_eq!(debouncer.deadline(), None);
    }

    #[tokio::test]
    async fn cancel_drops_pending_deadline() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        debouncer.schedule(start);
        debouncer.cancel();
        assert_eq!(debouncer.deadline(), None);
        assert!(!debouncer.fire(start + Duration::from_secs(1)));
    }

    #[tokio::test]
    async fn resolves_hits_through_one_batch_request() {
        let api = FakeMarketApi::with_listing(listing(3))
            .with_search("doge", &["dogecoin", "dogelon-mars"]);

        let outcome = run_search(&api, "doge").await;

        let rows = match outcome {
            SearchOutcome::Found(rows) => rows,
            other => panic!("expected rows, got {other:?}"),
        };
        let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, ["dogecoin", "dogelon-mars"]);
        assert_eq!(
            api.calls(),
            vec![
                Call::Search("doge".to_string()),
                Call::MarketsByIds(vec!["dogecoin".to_string(), "dogelon-mars".to_string()]),
            ]
        );
    }

    #[tokio::test]
    async fn no_hits_skips_the_detail_request() {
        let api = FakeMarketApi::with_listing(listing(3));

        let outcome = run_search(&api, "nothing").await;

        assert!(matches!(outcome, SearchOutcome::NoMatches));
        assert_eq!(api.calls(), vec![Call::Search("nothing".to_string())]);
    }

    #[tokio::test]
    async fn detail_failure_is_reported_as_failed() {
        let mut api = FakeMarketApi::with_listing(listing(3)).with_search("btc", &["bitcoin"]);
        api.fail_details = true;

        let outcome = run_search(&api, "btc").await;

        assert!(matches!(outcome, SearchOutcome::Failed));
    }
}
