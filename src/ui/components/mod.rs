pub mod table;
pub mod terminal;
pub mod utils;

pub use table::{build_table, header_row};
pub use terminal::TerminalGuard;
