//! Filter bar rendering.
//!
//! Displays the year, revenue and net income range inputs.

use crate::app::{App, UiMode};
use crate::filters::{BoundValue, FilterField};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Labelled input pairs, in display order.
const GROUPS: [(&str, FilterField, FilterField); 3] = [
    ("Year Range", FilterField::DateStart, FilterField::DateEnd),
    ("Revenue", FilterField::RevenueMin, FilterField::RevenueMax),
    ("Net Income", FilterField::NetIncomeMin, FilterField::NetIncomeMax),
];

/// Text shown in an input box.
#[derive(Debug, Clone, PartialEq)]
pub enum InputDisplay {
    /// What the user typed
    Typed(String),
    /// Dimmed hint showing the default of an empty input
    Hint(String),
}

/// Decide what an input box shows.
pub fn input_display(app: &App, field: FilterField) -> InputDisplay {
    let typed = app.input(field);
    if !typed.is_empty() {
        return InputDisplay::Typed(typed.to_string());
    }
    InputDisplay::Hint(match app.filters.default_for(field) {
        BoundValue::Unbounded => "∞".to_string(),
        value => value.to_string(),
    })
}

fn input_spans(app: &App, field: FilterField) -> Vec<Span<'static>> {
    let focused = app.mode == UiMode::Filters && app.focused_field == field;
    let box_style = if focused {
        Style::default().bg(Color::Blue).fg(Color::Yellow)
    } else {
        Style::default()
    };

    let content = match input_display(app, field) {
        InputDisplay::Typed(text) => Span::styled(
            text,
            box_style.fg(if focused { Color::Yellow } else { Color::White }),
        ),
        InputDisplay::Hint(text) => Span::styled(text, box_style.fg(Color::DarkGray)),
    };

    vec![
        Span::styled("[", Style::default().fg(Color::Gray)),
        content,
        Span::styled(if focused { "_" } else { "" }, box_style),
        Span::styled("]", Style::default().fg(Color::Gray)),
    ]
}

/// Render the filter bar.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// The first line holds the three range groups, the second line the current
/// sort and key hints for the active mode.
pub fn render_filters(app: &App, area: Rect, buf: &mut Buffer) {
    let is_active = app.mode == UiMode::Filters;

    let mut spans = Vec::new();
    for (i, (label, lower, upper)) in GROUPS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            format!("{}: ", label),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.extend(input_spans(app, *lower));
        spans.push(Span::raw(" - "));
        spans.extend(input_spans(app, *upper));
    }

    let hint = if is_active {
        "Tab/Shift-Tab: next/prev field, Ctrl-U: clear, Esc/Enter: done"
    } else {
        "Press 'f' to edit filters, 1/2/3 to sort by date/revenue/net income"
    };
    let status_line = Line::from(vec![
        Span::styled("Sort: ", Style::default().fg(Color::Cyan)),
        Span::styled(
            format!(
                "{} {}",
                app.sort.column.label(),
                app.sort.order.indicator()
            ),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw("   "),
        Span::styled(hint, Style::default().fg(Color::Yellow)),
    ]);

    let paragraph = Paragraph::new(vec![Line::from(spans), status_line]).block(
        Block::default()
            .title(if is_active {
                "Filters (ACTIVE - press 'Esc' to exit)"
            } else {
                "Filters (press 'f')"
            })
            .borders(Borders::ALL)
            .style(if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            }),
    );

    Widget::render(paragraph, area, buf);
}
