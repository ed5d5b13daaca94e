use std::sync::Arc;

use chrono::{DateTime, Local};
use futures::future;
use log::{debug, info};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{sleep_until, Instant, Interval};

use crate::app::events::{spawn_input_reader, AppEvent, UserCommand};
use crate::app::refresh::{fetch_listing, refresh_timer};
use crate::app::search::{run_search, Debouncer};
use crate::app::state::{
    Dashboard, QueryChange, RefreshOutcome, SearchApplied, SearchOutcome, Ticket,
};
use crate::config::Config;
use crate::error::Result;
use crate::fetch::{Asset, MarketApi};
use crate::ui::{render_dashboard, DashboardView, TerminalGuard};

/// Owns the dashboard state and serialises every write to it.
///
/// Network work runs in spawned tasks that report back through the event channel,
/// so the controller is the only writer.
pub struct AppController {
    api: Arc<dyn MarketApi>,
    dashboard: Dashboard,
    debouncer: Debouncer,
    refresh_timer: Interval,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    vs_currency: String,
    last_refreshed: Option<DateTime<Local>>,
    quit: bool,
}

impl AppController {
    pub fn new(api: Arc<dyn MarketApi>, config: &Config, initial: Vec<Asset>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            api,
            dashboard: Dashboard::new(initial, config.refresh.preserve_search),
            debouncer: Debouncer::new(config.search.debounce),
            refresh_timer: refresh_timer(config.refresh.interval),
            events_tx,
            events_rx,
            vs_currency: config.api.vs_currency.clone(),
            last_refreshed: Some(Local::now()),
            quit: false,
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub async fn run(mut self, guard: &mut TerminalGuard) -> Result<()> {
        spawn_input_reader(self.events_tx.clone());

        loop {
            let view = self.view();
            guard.draw(|f| render_dashboard(f, &view))?;

            if self.quit {
                info!("Quit requested");
                return Ok(());
            }

            self.step().await;
        }
    }

    /// Wait for the next input, timer or worker completion and apply it.
    pub async fn step(&mut self) {
        let deadline = self.debouncer.deadline();
        tokio::select! {
            Some(event) = self.events_rx.recv() => self.handle_event(event),
            _ = self.refresh_timer.tick() => self.start_refresh(),
            _ = wait_for(deadline) => self.fire_search(),
        }
    }

    pub fn handle_command(&mut self, command: UserCommand) {
        match command {
            UserCommand::Type(ch) => {
                let mut query = self.dashboard.query().to_string();
                query.push(ch);
                self.update_query(query);
            }
            UserCommand::Backspace => {
                let mut query = self.dashboard.query().to_string();
                if query.pop().is_some() {
                    self.update_query(query);
                }
            }
            UserCommand::ClearQuery => {
                if !self.dashboard.query().is_empty() {
                    self.update_query(String::new());
                }
            }
            UserCommand::PrevPage => {
                self.dashboard.prev_page();
            }
            UserCommand::NextPage => {
                self.dashboard.next_page();
            }
            UserCommand::RefreshNow => {
                self.refresh_timer.reset();
                self.start_refresh();
            }
            UserCommand::Redraw => {}
            UserCommand::Quit => self.quit = true,
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Command(command) => self.handle_command(command),
            AppEvent::Refreshed { ticket, data } => self.finish_refresh(ticket, data),
            AppEvent::Searched { ticket, outcome } => {
                match self.dashboard.apply_search(ticket, outcome) {
                    SearchApplied::Applied => debug!(
                        "Search #{} applied, {} rows",
                        ticket.value(),
                        self.dashboard.dataset().len()
                    ),
                    SearchApplied::Superseded | SearchApplied::Kept => {}
                }
            }
        }
    }

    fn update_query(&mut self, query: String) {
        match self.dashboard.set_query(query) {
            QueryChange::Cleared => self.debouncer.cancel(),
            QueryChange::Pending => self.debouncer.schedule(Instant::now()),
        }
    }

    fn start_refresh(&mut self) {
        let ticket = self.dashboard.issue_ticket();
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        debug!("Refresh #{} issued", ticket.value());

        tokio::spawn(async move {
            let data = fetch_listing(api.as_ref()).await;
            let _ = tx.send(AppEvent::Refreshed { ticket, data });
        });
    }

    fn finish_refresh(&mut self, ticket: Ticket, data: Option<Vec<Asset>>) {
        let Some(data) = data else {
            return;
        };

        match self.dashboard.apply_refresh(ticket, data) {
            RefreshOutcome::Replaced => {
                info!(
                    "Listing changed, {} rows on screen",
                    self.dashboard.dataset().len()
                );
                self.last_refreshed = Some(Local::now());
                self.refresh_timer.reset();
            }
            RefreshOutcome::Unchanged => {
                self.last_refreshed = Some(Local::now());
            }
            RefreshOutcome::Stale | RefreshOutcome::Suppressed => {}
        }
    }

    fn fire_search(&mut self) {
        if !self.debouncer.fire(Instant::now()) {
            return;
        }

        let query = self.dashboard.query().to_string();
        if query.is_empty() {
            return;
        }

        let ticket = self.dashboard.begin_search();
        let api = Arc::clone(&self.api);
        let reply = SearchReply {
            ticket,
            tx: self.events_tx.clone(),
            sent: false,
        };
        debug!("Search #{} issued for `{}`", ticket.value(), query);

        tokio::spawn(async move {
            let outcome = run_search(api.as_ref(), &query).await;
            reply.send(outcome);
        });
    }

    fn view(&self) -> DashboardView<'_> {
        DashboardView {
            query: self.dashboard.query(),
            loading: self.dashboard.is_loading(),
            rows: self.dashboard.visible(),
            offset: self.dashboard.visible_offset(),
            total_rows: self.dashboard.dataset().len(),
            page: self.dashboard.page(),
            total_pages: self.dashboard.total_pages(),
            has_prev: self.dashboard.has_prev_page(),
            has_next: self.dashboard.has_next_page(),
            vs_currency: &self.vs_currency,
            last_refreshed: self.last_refreshed,
        }
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => future::pending().await,
    }
}

/// Delivers a search outcome exactly once.
///
/// If the task unwinds before replying, dropping the guard reports a failure so
/// the loading flag is still cleared.
struct SearchReply {
    ticket: Ticket,
    tx: UnboundedSender<AppEvent>,
    sent: bool,
}

impl SearchReply {
    fn send(mut self, outcome: SearchOutcome) {
        self.sent = true;
        let _ = self.tx.send(AppEvent::Searched {
            ticket: self.ticket,
            outcome,
        });
    }
}

impl Drop for SearchReply {
    fn drop(&mut self) {
        if !self.sent {
            let _ = self.tx.send(AppEvent::Searched {
                ticket: self.ticket,
                outcome: SearchOutcome::Failed,
            });
        }
    }
}
