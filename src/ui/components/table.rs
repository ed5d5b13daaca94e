use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

use crate::ui::styles::column_header_style;

pub fn header_row<'a>(labels: &[&str]) -> Row<'a> {
    Row::new(
        labels
            .iter()
            .map(|label| Cell::from(label.to_string()).style(column_header_style()))
            .collect::<Vec<_>>(),
    )
}

pub fn build_table<'a>(
    rows: Vec<Row<'a>>,
    header: Row<'a>,
    widths: Vec<Constraint>,
    title: impl Into<String>,
) -> Table<'a> {
    Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title.into()))
        .column_spacing(2)
}
