//! Keyboard handling.
//!
//! Maps key presses to state changes for the current UI mode.

use crate::app::{App, Command, UiMode};
use crate::sort::SortColumn;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Keep running, optionally executing a command
    Continue(Option<Command>),
    /// Leave the event loop
    Quit,
}

/// Apply a key press to the application state.
///
/// # Details
/// Input is ignored while the initial load is outstanding, except for quitting.
pub fn handle_key(key: KeyEvent, app: &mut App) -> Flow {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Flow::Quit;
    }

    if app.is_loading() {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Flow::Quit,
            _ => Flow::Continue(None),
        };
    }

    let command = match app.mode {
        UiMode::Table => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                app.move_up();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.move_down();
                None
            }
            KeyCode::Char('1') => app.on_sort_toggle(SortColumn::Date),
            KeyCode::Char('2') => app.on_sort_toggle(SortColumn::Revenue),
            KeyCode::Char('3') => app.on_sort_toggle(SortColumn::NetIncome),
            KeyCode::Char('f') => {
                app.mode = UiMode::Filters;
                None
            }
            _ => None,
        },
        UiMode::Filters => match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                app.mode = UiMode::Table;
                None
            }
            KeyCode::Tab | KeyCode::Right => {
                app.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Left => {
                app.focus_prev();
                None
            }
            KeyCode::Backspace => app.input_backspace(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.clear_input()
            }
            KeyCode::Char(c) => app.input_char(c),
            _ => None,
        },
    };

    Flow::Continue(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FetchOutcome;
    use crate::filters::{FilterField, FilterState};
    use crate::sort::SortOrder;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ready_app() -> App {
        let mut app = App::new(FilterState::new(2026));
        app.handle_outcome(FetchOutcome::Loaded(Ok(Vec::new())));
        app
    }

    #[test]
    fn test_quit_keys() {
        let mut app = ready_app();
        assert_eq!(handle_key(press(KeyCode::Char('q')), &mut app), Flow::Quit);
        assert_eq!(
            handle_key(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &mut app
            ),
            Flow::Quit
        );
    }

    #[test]
    fn test_input_ignored_while_loading() {
        let mut app = App::new(FilterState::new(2026));
        assert_eq!(
            handle_key(press(KeyCode::Char('2')), &mut app),
            Flow::Continue(None)
        );
        assert_eq!(app.sort.column, SortColumn::Date);
        assert_eq!(handle_key(press(KeyCode::Esc), &mut app), Flow::Quit);
    }

    #[test]
    fn test_sort_keys_issue_queries() {
        let mut app = ready_app();
        let flow = handle_key(press(KeyCode::Char('1')), &mut app);
        assert!(matches!(flow, Flow::Continue(Some(Command::FetchFiltered { .. }))));
        assert_eq!(app.sort.order, SortOrder::Ascending);

        handle_key(press(KeyCode::Char('3')), &mut app);
        assert_eq!(app.sort.column, SortColumn::NetIncome);
    }

    #[test]
    fn test_filter_mode_editing() {
        let mut app = ready_app();
        handle_key(press(KeyCode::Char('f')), &mut app);
        assert_eq!(app.mode, UiMode::Filters);

        handle_key(press(KeyCode::Tab), &mut app);
        handle_key(press(KeyCode::Tab), &mut app);
        assert_eq!(app.focused_field, FilterField::RevenueMin);

        let flow = handle_key(press(KeyCode::Char('7')), &mut app);
        assert!(matches!(flow, Flow::Continue(Some(_))));
        assert_eq!(app.filters.raw(FilterField::RevenueMin), Some(7.0));

        // 'q' is text in filter mode, not quit
        assert_eq!(
            handle_key(press(KeyCode::Char('q')), &mut app),
            Flow::Continue(None)
        );

        handle_key(
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
            &mut app,
        );
        assert_eq!(app.filters.raw(FilterField::RevenueMin), None);

        handle_key(press(KeyCode::Esc), &mut app);
        assert_eq!(app.mode, UiMode::Table);
    }
}
