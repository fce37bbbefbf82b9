//! Income statement viewer - terminal table of income-statement records.
//!
//! Main entry point and event loop for the application.

mod app;
mod backend;
mod config;
mod fetcher;
mod filters;
mod input;
mod logging;
mod sort;
mod ui;

use app::{App, FetchOutcome};
use backend::BackendClient;
use config::Config;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use fetcher::Dispatcher;
use filters::FilterState;
use input::Flow;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::info;

/// Main application entry point.
///
/// # Details
/// Loads configuration, starts logging, issues the initial load and runs the
/// event loop until the user quits.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load(None)?.apply_env();

    if config.backend_base_url().is_none() {
        eprintln!("Error: backend URL is required.");
        eprintln!(
            "Set {} or add \"backend_url\" to: {}",
            config::BACKEND_URL_ENV,
            Config::default_config_path()?.display()
        );
        return Err(anyhow::anyhow!("Backend URL not configured"));
    }

    logging::init(&config.log_file_path()?)?;

    let client = BackendClient::new(&config)?;
    info!(backend = client.base_url(), "starting income statement viewer");

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut dispatcher = Dispatcher::new(client, tx);

    let mut app = App::new(FilterState::for_current_year());
    dispatcher.dispatch(app.start());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let result = run_app(&mut terminal, &mut app, &mut dispatcher, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("exiting");
    result
}

/// Split the screen into filter bar, table and status line.
fn screen_layout(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Filters
            Constraint::Min(0),    // Table
            Constraint::Length(1), // Status bar
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Render the complete UI.
///
/// # Details
/// The filter bar is hidden until the initial load completes.
fn render_ui(f: &mut ratatui::Frame, app: &App, areas: [Rect; 3]) {
    let [filters_area, table_area, status_area] = areas;

    if !app.is_loading() {
        ui::render_filters(app, filters_area, f.buffer_mut());
    }
    ui::render_table(app, table_area, f.buffer_mut());

    let status_text = app
        .status_message
        .as_deref()
        .unwrap_or("Press 'q' to quit, 'f' for filters, 1/2/3 to sort");
    let status = Paragraph::new(Line::from(status_text))
        .style(Style::default().fg(Color::Black).bg(Color::Gray));
    f.render_widget(status, status_area);
}

/// Main event loop.
///
/// # Details
/// Applies fetch outcomes, redraws, then polls for input with a short timeout
/// so responses show up without waiting for a key press.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &mut Dispatcher,
    rx: &mut UnboundedReceiver<FetchOutcome>,
) -> anyhow::Result<()> {
    // Updated on each render for mouse hit testing
    let mut table_area = Rect::default();

    loop {
        while let Ok(outcome) = rx.try_recv() {
            app.handle_outcome(outcome);
        }

        terminal.draw(|f| {
            let areas = screen_layout(f.area());
            table_area = areas[1];
            render_ui(f, app, areas);
        })?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match input::handle_key(key, app) {
                        Flow::Quit => break,
                        Flow::Continue(Some(command)) => dispatcher.dispatch(command),
                        Flow::Continue(None) => {}
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(mouse, app, dispatcher, table_area),
                _ => {}
            }
        }
    }

    Ok(())
}

/// Handle mouse events (scroll and header click).
///
/// # Details
/// Scrolling moves the selection; a left click on a sortable header toggles
/// the sort.
fn handle_mouse_event(
    mouse: MouseEvent,
    app: &mut App,
    dispatcher: &mut Dispatcher,
    table_area: Rect,
) {
    if app.is_loading() {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => app.move_up(),
        MouseEventKind::ScrollDown => app.move_down(),
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(column) = ui::header_column_at(table_area, mouse.column, mouse.row)
                && let Some(command) = app.on_sort_toggle(column)
            {
                dispatcher.dispatch(command);
            }
        }
        _ => {}
    }
}
