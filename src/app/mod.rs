pub mod bootstrap;
pub mod controller;
pub mod events;
pub mod pagination;
pub mod refresh;
pub mod search;
pub mod state;

pub use bootstrap::run;
pub use controller::AppController;
pub use pagination::{Pagination, PAGE_SIZE};
pub use state::Dashboard;
