//! Income statement table rendering.
//!
//! Six fixed columns. Date, Revenue and Net Income headers are sort targets
//! and the active one carries a direction arrow.

use crate::app::App;
use crate::backend::models::COLUMN_COUNT;
use crate::sort::SortColumn;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

/// Column titles in display order.
pub const COLUMN_TITLES: [&str; COLUMN_COUNT] = [
    "Date",
    "Revenue",
    "Net Income",
    "Gross Profit",
    "EPS",
    "Operating Income",
];

/// Text shown in place of rows when the row set is empty.
pub const EMPTY_PLACEHOLDER: &str = "No data available";

/// Text shown in place of the table until the initial load completes.
pub const LOADING_TEXT: &str = "Loading...";

const COLUMN_WIDTHS: [Constraint; COLUMN_COUNT] = [Constraint::Ratio(1, 6); COLUMN_COUNT];
const COLUMN_SPACING: u16 = 1;

/// What the table body shows.
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    /// Initial load outstanding
    Loading,
    /// A single row spanning all columns
    Placeholder,
    /// One entry per income statement, in received order
    Rows(Vec<[String; COLUMN_COUNT]>),
}

/// Decide what the table body shows for the current state.
pub fn table_body(app: &App) -> TableBody {
    if app.is_loading() {
        TableBody::Loading
    } else if app.rows.is_empty() {
        TableBody::Placeholder
    } else {
        TableBody::Rows(app.rows.iter().map(|row| row.cells()).collect())
    }
}

/// Header titles with the sort arrow on the active column.
pub fn header_titles(app: &App) -> [String; COLUMN_COUNT] {
    let mut titles = COLUMN_TITLES.map(String::from);
    for column in SortColumn::ALL {
        if let Some(arrow) = app.sort.indicator_for(column) {
            titles[column.index()] = format!("{} {}", COLUMN_TITLES[column.index()], arrow);
        }
    }
    titles
}

/// Render the table widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// While loading, the whole area shows a loading indicator. An empty row set
/// shows a single placeholder line under the header.
pub fn render_table(app: &App, area: Rect, buf: &mut Buffer) {
    let body = table_body(app);

    let rows: Vec<[String; COLUMN_COUNT]> = match body {
        TableBody::Loading => {
            let paragraph = Paragraph::new(LOADING_TEXT)
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .title("Income Statements")
                        .borders(Borders::ALL),
                );
            Widget::render(paragraph, area, buf);
            return;
        }
        TableBody::Placeholder => Vec::new(),
        TableBody::Rows(rows) => rows,
    };

    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(
        header_titles(app)
            .into_iter()
            .map(|title| Cell::from(Line::from(title).centered())),
    )
    .style(header_style);

    let body_rows: Vec<Row> = rows
        .into_iter()
        .enumerate()
        .map(|(idx, cells)| {
            let style = if idx % 2 == 0 {
                Style::default()
            } else {
                Style::default().bg(Color::DarkGray)
            };
            Row::new(
                cells
                    .into_iter()
                    .map(|text| Cell::from(Line::from(text).centered())),
            )
            .style(style)
        })
        .collect();
    let row_count = body_rows.len();

    let mut table_state = TableState::default();
    if row_count > 0 {
        table_state.select(Some(app.selected_index.min(row_count - 1)));
    }

    let title = format!("Income Statements ({})", app.rows.len());
    let table = Table::new(body_rows, COLUMN_WIDTHS)
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .block(Block::default().title(title).borders(Borders::ALL))
        .row_highlight_style(
            Style::default()
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        );

    StatefulWidget::render(table, area, buf, &mut table_state);

    if row_count == 0 {
        let inner = area.inner(Margin::new(1, 1));
        if inner.height > 1 {
            let line = Rect::new(inner.x, inner.y + 1, inner.width, 1);
            let placeholder = Paragraph::new(EMPTY_PLACEHOLDER)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray));
            Widget::render(placeholder, line, buf);
        }
    }
}

/// Sortable column whose header cell contains the given screen position.
///
/// # Arguments
/// * `area` - Area the table was rendered in
/// * `x` - Screen column
/// * `y` - Screen row
pub fn header_column_at(area: Rect, x: u16, y: u16) -> Option<SortColumn> {
    let inner = area.inner(Margin::new(1, 1));
    if inner.height == 0 || y != inner.y {
        return None;
    }
    let columns = Layout::horizontal(COLUMN_WIDTHS)
        .spacing(COLUMN_SPACING)
        .split(inner);
    let index = columns
        .iter()
        .position(|rect| x >= rect.x && x < rect.x + rect.width)?;
    SortColumn::ALL.into_iter().find(|c| c.index() == index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::row;
    use crate::app::FetchOutcome;
    use crate::filters::FilterState;

    fn buffer_lines(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn render(app: &App) -> Vec<String> {
        let area = Rect::new(0, 0, 110, 10);
        let mut buf = Buffer::empty(area);
        render_table(app, area, &mut buf);
        buffer_lines(&buf)
    }

    fn loaded(rows: Vec<crate::backend::IncomeStatement>) -> App {
        let mut app = App::new(FilterState::new(2026));
        app.handle_outcome(FetchOutcome::Loaded(Ok(rows)));
        app
    }

    #[test]
    fn test_loading_replaces_table() {
        let app = App::new(FilterState::new(2026));
        assert_eq!(table_body(&app), TableBody::Loading);

        let lines = render(&app);
        assert!(lines.iter().any(|l| l.contains(LOADING_TEXT)));
        assert!(!lines.iter().any(|l| l.contains("Revenue")));
    }

    #[test]
    fn test_empty_rows_show_single_placeholder() {
        let app = loaded(Vec::new());
        assert_eq!(table_body(&app), TableBody::Placeholder);

        let lines = render(&app);
        let placeholders = lines
            .iter()
            .filter(|l| l.contains(EMPTY_PLACEHOLDER))
            .count();
        assert_eq!(placeholders, 1);
    }

    #[test]
    fn test_rows_render_in_received_order() {
        let app = loaded(vec![row("2018", 3.0), row("2020", 1.0), row("2019", 2.0)]);
        match table_body(&app) {
            TableBody::Rows(rows) => {
                let dates: Vec<&str> = rows.iter().map(|cells| cells[0].as_str()).collect();
                assert_eq!(dates, vec!["2018", "2020", "2019"]);
            }
            other => panic!("expected rows, got {:?}", other),
        }

        let lines = render(&app);
        let position = |date: &str| lines.iter().position(|l| l.contains(date)).unwrap();
        assert!(position("2018") < position("2020"));
        assert!(position("2020") < position("2019"));
        assert!(!lines.iter().any(|l| l.contains(EMPTY_PLACEHOLDER)));
    }

    #[test]
    fn test_header_shows_arrow_on_active_column_only() {
        let mut app = loaded(Vec::new());
        let titles = header_titles(&app);
        assert_eq!(titles[0], "Date ↓");
        assert_eq!(titles[1], "Revenue");

        app.on_sort_toggle(SortColumn::Revenue);
        let titles = header_titles(&app);
        assert_eq!(titles[0], "Date");
        assert_eq!(titles[1], "Revenue ↑");
        assert_eq!(titles[5], "Operating Income");
    }

    #[test]
    fn test_header_column_at() {
        let area = Rect::new(0, 0, 62, 10);
        assert_eq!(header_column_at(area, 2, 1), Some(SortColumn::Date));
        assert_eq!(header_column_at(area, 14, 1), Some(SortColumn::Revenue));
        assert_eq!(header_column_at(area, 24, 1), Some(SortColumn::NetIncome));
        assert_eq!(header_column_at(area, 58, 1), None);
        assert_eq!(header_column_at(area, 2, 4), None);
        assert_eq!(header_column_at(area, 2, 0), None);
    }
}
