use std::borrow::Cow;

use ratatui::prelude::Stylize;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Span, Text};

/// Accent color used for the title, the search prompt and active page buttons.
pub const ACCENT: Color = Color::Indexed(208);

/// Build a styled text block for headers.
pub fn header_text<'a>(text: impl Into<Cow<'a, str>>) -> Text<'a> {
    let owned = text.into().into_owned();
    Text::from(owned.bold().fg(ACCENT))
}

/// Dimmed text chunk for inline usage.
pub fn secondary_span<'a>(text: impl Into<Cow<'a, str>>) -> Span<'a> {
    let owned = text.into().into_owned();
    Span::from(owned).dim()
}

/// Page buttons read as accented when usable and dimmed otherwise.
pub fn button_span<'a>(label: &'a str, enabled: bool) -> Span<'a> {
    if enabled {
        Span::styled(label, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
    } else {
        secondary_span(label)
    }
}

/// Green for gains, red for everything else.
pub fn change_style(change: Option<f64>) -> Style {
    match change {
        Some(value) if value > 0.0 => Style::default().fg(Color::Green),
        Some(_) => Style::default().fg(Color::Red),
        None => Style::default().fg(Color::Gray),
    }
}

pub fn column_header_style() -> Style {
    Style::default().fg(Color::Yellow)
}
