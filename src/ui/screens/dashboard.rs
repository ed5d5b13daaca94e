use chrono::{DateTime, Local};
use ratatui::{prelude::*, widgets::*};
use unicode_width::UnicodeWidthStr;

use crate::fetch::Asset;
use crate::ui::components::utils::{split_horizontal, split_vertical};
use crate::ui::components::{build_table, header_row};
use crate::ui::styles::{button_span, change_style, header_text, secondary_span, ACCENT};
use crate::utils::{format_change, format_clock, format_price};

const TITLE: &str = "Crypto Market Dashboard";
const SEARCH_PLACEHOLDER: &str = "Search Token";
const EMPTY_PLACEHOLDER: &str = "No data found";
const KEY_HINTS: &str = "←/→ page • Ctrl+R refresh • Ctrl+U clear • Esc quit";

/// Everything one frame needs, borrowed from the controller.
#[derive(Debug, Clone)]
pub struct DashboardView<'a> {
    pub query: &'a str,
    pub loading: bool,
    pub rows: &'a [Asset],
    /// Dataset index of `rows[0]`.
    pub offset: usize,
    pub total_rows: usize,
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub vs_currency: &'a str,
    pub last_refreshed: Option<DateTime<Local>>,
}

pub fn render_dashboard(f: &mut Frame<'_>, view: &DashboardView<'_>) {
    let area = split_vertical(
        f.size(),
        &[
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ],
    );

    let title = format!("{} ({})", TITLE, view.vs_currency.to_uppercase());
    f.render_widget(Paragraph::new(header_text(title)), area[0]);
    f.render_widget(search_box(view.query), area[1]);

    if view.loading {
        f.render_widget(
            Paragraph::new("Loading...").style(Style::default().fg(ACCENT)),
            area[2],
        );
    }

    f.render_widget(market_table(view), area[3]);
    render_footer(f, area[4], view);
}

fn search_box(query: &str) -> Paragraph<'_> {
    let line = if query.is_empty() {
        Line::from(secondary_span(SEARCH_PLACEHOLDER))
    } else {
        Line::from(vec![Span::raw(query), Span::styled("_", Style::default().fg(ACCENT))])
    };
    Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Search"))
}

fn market_table<'a>(view: &DashboardView<'a>) -> Table<'a> {
    let price_label = format!("Price ({})", view.vs_currency.to_uppercase());
    let labels = ["#", "Name", "Symbol", price_label.as_str(), "24h %"];

    let rows: Vec<Row> = if view.rows.is_empty() {
        vec![Row::new(vec![
            Cell::from(""),
            Cell::from(EMPTY_PLACEHOLDER).style(Style::default().fg(Color::Gray)),
        ])]
    } else {
        view.rows
            .iter()
            .enumerate()
            .map(|(i, asset)| {
                Row::new(vec![
                    Cell::from((view.offset + i + 1).to_string()),
                    Cell::from(asset.name.clone()),
                    Cell::from(asset.symbol.to_uppercase()),
                    Cell::from(
                        Line::from(format_price(asset.current_price, view.vs_currency))
                            .alignment(Alignment::Right),
                    ),
                    Cell::from(
                        Line::from(format_change(asset.price_change_percentage_24h))
                            .alignment(Alignment::Right),
                    )
                    .style(change_style(asset.price_change_percentage_24h)),
                ])
            })
            .collect()
    };

    let name_width = view
        .rows
        .iter()
        .map(|asset| UnicodeWidthStr::width(asset.name.as_str()))
        .max()
        .unwrap_or(0)
        .max(UnicodeWidthStr::width(EMPTY_PLACEHOLDER));
    let name_col_width = u16::try_from(name_width + 1).unwrap_or(u16::MAX);

    let widths = vec![
        Constraint::Length(4),
        Constraint::Length(name_col_width),
        Constraint::Length(8),
        Constraint::Min(20),
        Constraint::Length(10),
    ];

    let title = format!("Markets ({} rows)", view.total_rows);
    build_table(rows, header_row(&labels), widths, title)
}

fn render_footer(f: &mut Frame<'_>, area: Rect, view: &DashboardView<'_>) {
    let halves = split_horizontal(area, &[Constraint::Min(30), Constraint::Length(52)]);

    let mut spans = vec![
        button_span("◀ Prev", view.has_prev),
        Span::raw(format!("  Page {} / {}  ", view.page, view.total_pages)),
        button_span("Next ▶", view.has_next),
    ];
    if let Some(at) = view.last_refreshed {
        spans.push(secondary_span(format!("  • updated {}", format_clock(at))));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), halves[0]);

    f.render_widget(
        Paragraph::new(KEY_HINTS)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Right),
        halves[1],
    );
}
