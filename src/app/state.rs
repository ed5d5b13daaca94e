use log::debug;

use crate::app::pagination::Pagination;
use crate::fetch::Asset;

/// Monotonic write ticket, issued when a fetch starts.
///
/// A dataset write is applied only if its ticket is newer than the one behind
/// the dataset currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// What a query edit asks the controller to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryChange {
    /// The query is empty; the initial snapshot is back on screen.
    Cleared,
    /// The query is non-empty; a debounced search should be scheduled.
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Replaced,
    Unchanged,
    /// An equal or newer write already landed.
    Stale,
    /// Search results are on screen and refreshes are configured not to clobber them.
    Suppressed,
}

/// Result of the search-then-detail sequence.
#[derive(Debug)]
pub enum SearchOutcome {
    NoMatches,
    Found(Vec<Asset>),
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchApplied {
    Applied,
    /// A newer search started, or the query was cleared, after this one was issued.
    Superseded,
    /// The search failed; the previous dataset stays.
    Kept,
}

/// Live dashboard state: the dataset on screen, the query and the page cursor.
pub struct Dashboard {
    initial: Vec<Asset>,
    dataset: Vec<Asset>,
    applied: Ticket,
    next_ticket: u64,
    latest_search: Option<Ticket>,
    query: String,
    pagination: Pagination,
    loading: bool,
    /// The dataset on screen came from a search, not from the listing.
    narrowed: bool,
    preserve_search: bool,
}

impl Dashboard {
    /// Seed the dashboard from the snapshot loaded at start-up.
    pub fn new(initial: Vec<Asset>, preserve_search: bool) -> Self {
        Self {
            dataset: initial.clone(),
            initial,
            applied: Ticket(0),
            next_ticket: 0,
            latest_search: None,
            query: String::new(),
            pagination: Pagination::new(),
            loading: false,
            narrowed: false,
            preserve_search,
        }
    }

    pub fn dataset(&self) -> &[Asset] {
        &self.dataset
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn page(&self) -> usize {
        self.pagination.page()
    }

    pub fn total_pages(&self) -> usize {
        Pagination::total_pages(self.dataset.len())
    }

    pub fn visible(&self) -> &[Asset] {
        self.pagination.slice(&self.dataset)
    }

    /// Index of the first visible row within the dataset.
    pub fn visible_offset(&self) -> usize {
        self.pagination.range(self.dataset.len()).start
    }

    pub fn has_prev_page(&self) -> bool {
        self.pagination.has_prev()
    }

    pub fn has_next_page(&self) -> bool {
        self.pagination.has_next(self.dataset.len())
    }

    pub fn prev_page(&mut self) -> bool {
        self.pagination.prev()
    }

    pub fn next_page(&mut self) -> bool {
        self.pagination.next(self.dataset.len())
    }

    pub fn issue_ticket(&mut self) -> Ticket {
        self.next_ticket += 1;
        Ticket(self.next_ticket)
    }

    /// Record new query text. Always resets the page cursor to 1.
    ///
    /// An empty query restores the initial snapshot immediately and invalidates
    /// any search still in flight.
    pub fn set_query(&mut self, query: String) -> QueryChange {
        self.query = query;
        self.pagination.reset();

        if !self.query.is_empty() {
            return QueryChange::Pending;
        }

        self.latest_search = None;
        self.loading = false;
        self.narrowed = false;
        let ticket = self.issue_ticket();
        let initial = self.initial.clone();
        self.write(ticket, initial);
        QueryChange::Cleared
    }

    /// Mark a search as started and hand back its ticket.
    pub fn begin_search(&mut self) -> Ticket {
        let ticket = self.issue_ticket();
        self.latest_search = Some(ticket);
        self.loading = true;
        ticket
    }

    pub fn apply_search(&mut self, ticket: Ticket, outcome: SearchOutcome) -> SearchApplied {
        if self.latest_search != Some(ticket) {
            debug!("Discarding superseded search result #{}", ticket.value());
            return SearchApplied::Superseded;
        }

        self.latest_search = None;
        self.loading = false;

        let data = match outcome {
            SearchOutcome::NoMatches => Vec::new(),
            SearchOutcome::Found(data) => data,
            SearchOutcome::Failed => return SearchApplied::Kept,
        };

        if self.write(ticket, data) {
            self.narrowed = true;
            SearchApplied::Applied
        } else {
            SearchApplied::Superseded
        }
    }

    /// Apply a refreshed listing, replacing the dataset only when it differs.
    pub fn apply_refresh(&mut self, ticket: Ticket, data: Vec<Asset>) -> RefreshOutcome {
        if ticket <= self.applied {
            debug!(
                "Discarding stale refresh #{} (showing #{})",
                ticket.value(),
                self.applied.value()
            );
            return RefreshOutcome::Stale;
        }

        if self.preserve_search && self.narrowed {
            return RefreshOutcome::Suppressed;
        }

        if data == self.dataset {
            return RefreshOutcome::Unchanged;
        }

        self.write(ticket, data);
        self.narrowed = false;
        RefreshOutcome::Replaced
    }

    fn write(&mut self, ticket: Ticket, data: Vec<Asset>) -> bool {
        if ticket <= self.applied {
            return false;
        }
        self.dataset = data;
        self.applied = ticket;
        self.pagination.clamp(self.dataset.len());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fake::{asset, listing};

    #[test]
    fn changing_the_query_resets_the_cursor() {
        let mut dashboard = Dashboard::new(listing(30), true);
        dashboard.next_page();
        dashboard.next_page();
        assert_eq!(dashboard.page(), 3);

        assert_eq!(dashboard.set_query("d".to_string()), QueryChange::Pending);
        assert_eq!(dashboard.page(), 1);

        dashboard.next_page();
        assert_eq!(dashboard.set_query(String::new()), QueryChange::Cleared);
        assert_eq!(dashboard.page(), 1);
    }

    #[test]
    fn clearing_the_query_restores_the_initial_snapshot() {
        let initial = listing(25);
        let mut dashboard = Dashboard::new(initial.clone(), false);

        let refresh = dashboard.issue_ticket();
        dashboard.apply_refresh(refresh, listing(40));
        dashboard.set_query("doge".to_string());
        let search = dashboard.begin_search();
        dashboard.apply_search(search, SearchOutcome::Found(vec![asset("dogecoin", 2.0)]));
        assert_eq!(dashboard.dataset().len(), 1);

        dashboard.set_query(String::new());
        assert_eq!(dashboard.dataset(), initial.as_slice());
        assert!(!dashboard.is_loading());
    }

    #[test]
    fn zero_matches_empties_the_dataset_and_clears_loading() {
        let mut dashboard = Dashboard::new(listing(12), true);
        dashboard.set_query("zzz".to_string());
        let ticket = dashboard.begin_search();
        assert!(dashboard.is_loading());

        let applied = dashboard.apply_search(ticket, SearchOutcome::NoMatches);

        assert_eq!(applied, SearchApplied::Applied);
        assert!(dashboard.dataset().is_empty());
        assert!(!dashboard.is_loading());
        assert_eq!(dashboard.total_pages(), 1);
    }

    #[test]
    fn failed_search_keeps_previous_dataset() {
        let initial = listing(12);
        let mut dashboard = Dashboard::new(initial.clone(), true);
        dashboard.set_query("btc".to_string());
        let ticket = dashboard.begin_search();

        assert_eq!(
            dashboard.apply_search(ticket, SearchOutcome::Failed),
            SearchApplied::Kept
        );
        assert_eq!(dashboard.dataset(), initial.as_slice());
        assert!(!dashboard.is_loading());
    }

    #[test]
    fn identical_refresh_is_not_a_replace() {
        let initial = listing(15);
        let mut dashboard = Dashboard::new(initial.clone(), true);
        dashboard.next_page();

        let ticket = dashboard.issue_ticket();
        assert_eq!(
            dashboard.apply_refresh(ticket, initial.clone()),
            RefreshOutcome::Unchanged
        );
        assert_eq!(dashboard.dataset(), initial.as_slice());
        assert_eq!(dashboard.page(), 2);
    }

    #[test]
    fn changed_refresh_replaces_without_touching_cursor_or_query() {
        let mut dashboard = Dashboard::new(listing(30), true);
        dashboard.next_page();

        let mut updated = listing(30);
        updated[0].current_price = Some(99.0);
        let ticket = dashboard.issue_ticket();

        assert_eq!(
            dashboard.apply_refresh(ticket, updated.clone()),
            RefreshOutcome::Replaced
        );
        assert_eq!(dashboard.dataset(), updated.as_slice());
        assert_eq!(dashboard.page(), 2);
        assert_eq!(dashboard.query(), "");
    }

    #[test]
    fn slower_older_refresh_cannot_overwrite_newer_one() {
        let mut dashboard = Dashboard::new(listing(5), true);
        let older = dashboard.issue_ticket();
        let newer = dashboard.issue_ticket();

        assert_eq!(
            dashboard.apply_refresh(newer, listing(8)),
            RefreshOutcome::Replaced
        );
        assert_eq!(
            dashboard.apply_refresh(older, listing(3)),
            RefreshOutcome::Stale
        );
        assert_eq!(dashboard.dataset().len(), 8);
    }

    #[test]
    fn only_the_latest_search_applies() {
        let mut dashboard = Dashboard::new(listing(5), true);
        dashboard.set_query("do".to_string());
        let first = dashboard.begin_search();
        dashboard.set_query("doge".to_string());
        let second = dashboard.begin_search();

        assert_eq!(
            dashboard.apply_search(second, SearchOutcome::Found(vec![asset("dogecoin", 1.0)])),
            SearchApplied::Applied
        );
        assert_eq!(
            dashboard.apply_search(first, SearchOutcome::Found(listing(4))),
            SearchApplied::Superseded
        );
        assert_eq!(dashboard.dataset().len(), 1);
        assert!(!dashboard.is_loading());
    }

    #[test]
    fn search_landing_after_clear_is_discarded() {
        let initial = listing(5);
        let mut dashboard = Dashboard::new(initial.clone(), true);
        dashboard.set_query("eth".to_string());
        let ticket = dashboard.begin_search();
        dashboard.set_query(String::new());

        assert_eq!(
            dashboard.apply_search(ticket, SearchOutcome::NoMatches),
            SearchApplied::Superseded
        );
        assert_eq!(dashboard.dataset(), initial.as_slice());
    }

    #[test]
    fn refresh_respects_active_search_when_configured() {
        let mut preserving = Dashboard::new(listing(5), true);
        preserving.set_query("doge".to_string());
        let search = preserving.begin_search();
        preserving.apply_search(search, SearchOutcome::Found(vec![asset("dogecoin", 1.0)]));
        let refresh = preserving.issue_ticket();
        assert_eq!(
            preserving.apply_refresh(refresh, listing(20)),
            RefreshOutcome::Suppressed
        );
        assert_eq!(preserving.dataset().len(), 1);

        let mut clobbering = Dashboard::new(listing(5), false);
        clobbering.set_query("doge".to_string());
        let search = clobbering.begin_search();
        clobbering.apply_search(search, SearchOutcome::Found(vec![asset("dogecoin", 1.0)]));
        let refresh = clobbering.issue_ticket();
        assert_eq!(
            clobbering.apply_refresh(refresh, listing(20)),
            RefreshOutcome::Replaced
        );
        assert_eq!(clobbering.dataset().len(), 20);
    }

    #[test]
    fn refresh_still_lands_while_the_listing_is_on_screen() {
        let mut dashboard = Dashboard::new(listing(5), true);
        dashboard.set_query("doge".to_string());
        let refresh = dashboard.issue_ticket();
        assert_eq!(
            dashboard.apply_refresh(refresh, listing(8)),
            RefreshOutcome::Replaced
        );

        let search = dashboard.begin_search();
        assert_eq!(
            dashboard.apply_search(search, SearchOutcome::Failed),
            SearchApplied::Kept
        );
        let refresh = dashboard.issue_ticket();
        assert_eq!(
            dashboard.apply_refresh(refresh, listing(30)),
            RefreshOutcome::Replaced
        );
        assert_eq!(dashboard.dataset().len(), 30);
        assert_eq!(dashboard.query(), "doge");
    }

    #[test]
    fn cleared_query_lets_refreshes_through_again() {
        let mut dashboard = Dashboard::new(listing(5), true);
        dashboard.set_query("doge".to_string());
        let search = dashboard.begin_search();
        dashboard.apply_search(search, SearchOutcome::NoMatches);
        assert!(dashboard.dataset().is_empty());

        dashboard.set_query(String::new());
        let refresh = dashboard.issue_ticket();
        assert_eq!(
            dashboard.apply_refresh(refresh, listing(12)),
            RefreshOutcome::Replaced
        );
        assert_eq!(dashboard.dataset().len(), 12);
    }

    #[test]
    fn replace_clamps_cursor_into_new_bounds() {
        let mut dashboard = Dashboard::new(listing(50), false);
        for _ in 0..4 {
            dashboard.next_page();
        }
        assert_eq!(dashboard.page(), 5);

        let ticket = dashboard.issue_ticket();
        dashboard.apply_refresh(ticket, listing(11));
        assert_eq!(dashboard.page(), 2);
        assert_eq!(dashboard.visible().len(), 1);
        assert_eq!(dashboard.visible_offset(), 10);
    }
}
