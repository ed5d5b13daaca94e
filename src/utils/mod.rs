pub mod text;
pub mod time;

pub use text::{format_change, format_price};
pub use time::format_clock;
