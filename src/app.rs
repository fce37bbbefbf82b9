//! Application state management.
//!
//! Owns the row data, load phase, filter bounds, sort spec and input state.
//! State changes that need the backend return a [`Command`]; the event loop
//! executes it and reports back with a [`FetchOutcome`].

use crate::backend::{BackendError, FilterQuery, IncomeStatement};
use crate::filters::{FilterError, FilterField, FilterState};
use crate::sort::{SortColumn, SortSpec};
use std::cmp;
use tracing::{debug, error, info};

/// UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Table navigation
    Table,
    /// Editing filter inputs
    Filters,
}

/// Load phase of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the initial load; filter changes do not query the backend
    Uninitialized,
    /// Initial load done; every filter or sort change queries the backend
    Ready,
}

/// Identifies one filtered request. Later requests carry larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Backend work requested by a state change.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch the full listing
    LoadAll,
    /// Fetch the filtered, sorted listing
    FetchFiltered {
        token: RequestToken,
        query: FilterQuery,
    },
}

/// Result of a command, delivered back to the event loop.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Response to [`Command::LoadAll`]
    Loaded(Result<Vec<IncomeStatement>, BackendError>),
    /// Response to [`Command::FetchFiltered`]
    Filtered {
        token: RequestToken,
        result: Result<Vec<IncomeStatement>, BackendError>,
    },
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Rows currently shown, in backend order
    pub rows: Vec<IncomeStatement>,
    /// Load phase
    pub phase: Phase,
    /// Current filter bounds
    pub filters: FilterState,
    /// Current sort spec
    pub sort: SortSpec,
    /// Text of each filter input, indexed by [`FilterField::index`]
    pub inputs: [String; 6],
    /// Filter input receiving keystrokes in filter mode
    pub focused_field: FilterField,
    /// Current UI mode
    pub mode: UiMode,
    /// Selected row index
    pub selected_index: usize,
    /// Status message to display
    pub status_message: Option<String>,
    next_token: u64,
    latest_token: Option<RequestToken>,
}

impl App {
    /// Create a new application state.
    ///
    /// # Arguments
    /// * `filters` - Initial filter bounds
    pub fn new(filters: FilterState) -> Self {
        Self {
            rows: Vec::new(),
            phase: Phase::Uninitialized,
            filters,
            sort: SortSpec::default(),
            inputs: Default::default(),
            focused_field: FilterField::DateStart,
            mode: UiMode::Table,
            selected_index: 0,
            status_message: None,
            next_token: 0,
            latest_token: None,
        }
    }

    /// Command for the initial load.
    pub fn start(&mut self) -> Command {
        self.set_status("Loading income statements...".to_string());
        Command::LoadAll
    }

    /// Whether the initial load is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Uninitialized
    }

    /// Apply a raw input value to the bound named by `name`.
    ///
    /// # Arguments
    /// * `name` - Dotted field name such as `"revenue.min"`
    /// * `raw` - Raw input text
    ///
    /// # Returns
    /// * `Result<Option<Command>, FilterError>` - Filtered query to issue, if any
    ///
    /// # Details
    /// The input text is kept as typed. Empty text resets the bound, a number
    /// replaces it, and anything else leaves the filters unchanged.
    pub fn on_filter_change(
        &mut self,
        name: &str,
        raw: &str,
    ) -> Result<Option<Command>, FilterError> {
        let field: FilterField = name.parse()?;
        self.inputs[field.index()] = raw.to_string();
        match self.filters.apply_input(field, raw) {
            Some(next) => {
                self.filters = next;
                Ok(self.refresh())
            }
            None => {
                debug!(field = name, "ignoring non-numeric input");
                Ok(None)
            }
        }
    }

    /// Activate a sort column.
    ///
    /// # Returns
    /// * `Option<Command>` - Filtered query to issue, if any
    pub fn on_sort_toggle(&mut self, column: SortColumn) -> Option<Command> {
        self.sort = self.sort.toggled(column);
        debug!(
            column = self.sort.column.key(),
            order = self.sort.order.as_str(),
            "sort changed"
        );
        self.refresh()
    }

    /// Apply a fetch result.
    ///
    /// # Details
    /// A successful initial load moves the view to [`Phase::Ready`]. Filtered
    /// responses are applied only if they answer the most recent request.
    /// Failures are logged and reported in the status bar; rows stay as they are.
    pub fn handle_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Loaded(Ok(rows)) => {
                info!(rows = rows.len(), "loaded income statements");
                self.phase = Phase::Ready;
                self.set_status(format!("Loaded {} income statements", rows.len()));
                self.set_rows(rows);
            }
            FetchOutcome::Loaded(Err(e)) => {
                error!(error = %e, "failed to load income statements");
                self.set_status(format!("Error fetching data: {}", e));
            }
            FetchOutcome::Filtered { token, result } => {
                if self.latest_token != Some(token) {
                    debug!(?token, latest = ?self.latest_token, "dropping stale response");
                    return;
                }
                match result {
                    Ok(rows) => {
                        debug!(?token, rows = rows.len(), "applied filtered rows");
                        self.set_status(format!("{} matching income statements", rows.len()));
                        self.set_rows(rows);
                    }
                    Err(e) => {
                        error!(error = %e, "failed to fetch filtered income statements");
                        self.set_status(format!("Error fetching data: {}", e));
                    }
                }
            }
        }
    }

    /// Replace the rows wholesale and keep the selection in range.
    fn set_rows(&mut self, rows: Vec<IncomeStatement>) {
        self.rows = rows;
        self.selected_index = cmp::min(self.selected_index, self.rows.len().saturating_sub(1));
    }

    /// Issue a filtered query when the view is ready.
    fn refresh(&mut self) -> Option<Command> {
        if self.phase != Phase::Ready {
            return None;
        }
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.latest_token = Some(token);
        let query = FilterQuery::new(&self.filters, self.sort);
        debug!(?token, query = %query.to_query_string(), "issuing filtered query");
        Some(Command::FetchFiltered { token, query })
    }

    /// Route an edited input through [`App::on_filter_change`].
    fn edit_input(&mut self, field: FilterField, text: String) -> Option<Command> {
        match self.on_filter_change(field.key(), &text) {
            Ok(command) => command,
            Err(e) => {
                error!(error = %e, "rejected filter edit");
                None
            }
        }
    }

    /// Text of the input for `field`.
    pub fn input(&self, field: FilterField) -> &str {
        &self.inputs[field.index()]
    }

    /// Append a character to the focused input.
    ///
    /// # Details
    /// Only characters that can appear in a number are accepted.
    pub fn input_char(&mut self, ch: char) -> Option<Command> {
        if !matches!(ch, '0'..='9' | '.' | '-' | '+' | 'e' | 'E') {
            return None;
        }
        let field = self.focused_field;
        let mut text = self.input(field).to_string();
        text.push(ch);
        self.edit_input(field, text)
    }

    /// Remove the last character of the focused input.
    pub fn input_backspace(&mut self) -> Option<Command> {
        let field = self.focused_field;
        let mut text = self.input(field).to_string();
        text.pop()?;
        self.edit_input(field, text)
    }

    /// Clear the focused input, resetting its bound.
    pub fn clear_input(&mut self) -> Option<Command> {
        let field = self.focused_field;
        if self.input(field).is_empty() {
            return None;
        }
        self.edit_input(field, String::new())
    }

    /// Focus the next filter input.
    pub fn focus_next(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    /// Focus the previous filter input.
    pub fn focus_prev(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    /// Move selection up, wrapping to the bottom.
    pub fn move_up(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.rows.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Move selection down, wrapping to the top.
    pub fn move_down(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.rows.len();
    }

    /// Set status message.
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}
