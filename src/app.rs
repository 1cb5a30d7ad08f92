use crate::error::Result;
use crate::logic::LocationRequest;
use crate::models::WeatherReport;
use crossterm::event::{KeyCode, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Subtle,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn subtle(message: &str) -> Self {
        Self {
            message: message.to_string(),
            kind: StatusKind::Subtle,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            kind: StatusKind::Error,
        }
    }
}

pub struct SearchState {
    pub editing: bool,
    pub buffer: String,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            editing: false,
            buffer: String::new(),
        }
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
        self.buffer.clear();
    }

    pub fn cancel_editing(&mut self) {
        self.editing = false;
        self.buffer.clear();
    }

    /// Stop editing and hand back the trimmed query, if any
    pub fn finish_editing(&mut self) -> Option<String> {
        self.editing = false;
        let query = std::mem::take(&mut self.buffer);
        let query = query.trim();
        if query.is_empty() {
            None
        } else {
            Some(query.to_string())
        }
    }
}

pub struct App {
    pub should_quit: bool,

    // Data
    pub report: Option<WeatherReport>,
    pub last_request: Option<LocationRequest>,

    // UI state
    pub search_state: SearchState,
    pub status: Option<Status>,
    pub pending: Option<LocationRequest>,
}

impl App {
    pub fn new(initial: LocationRequest) -> Self {
        let mut app = Self {
            should_quit: false,
            report: None,
            last_request: None,
            search_state: SearchState::new(),
            status: None,
            pending: None,
        };
        app.request(initial);
        app
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = Some(status);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn request(&mut self, request: LocationRequest) {
        self.set_status(Status::subtle(request.pending_message()));
        self.pending = Some(request);
    }

    /// Reload whatever is on screen, or the current location if nothing is
    pub fn request_refresh(&mut self) {
        let request = self
            .last_request
            .clone()
            .unwrap_or(LocationRequest::CurrentLocation);
        self.request(request);
    }

    pub fn take_pending(&mut self) -> Option<LocationRequest> {
        self.pending.take()
    }

    /// Record the outcome of a load; a failure keeps the previous report on screen
    pub fn apply_result(
        &mut self,
        request: LocationRequest,
        result: Result<WeatherReport>,
    ) {
        match result {
            Ok(report) => {
                tracing::debug!(
                    "Showing {} ({} theme)",
                    report.place_label,
                    report.theme().category
                );
                self.report = Some(report);
                self.last_request = Some(request);
                self.clear_status();
            }
            Err(e) => {
                tracing::warn!("Loading {:?} failed: {}", request, e);
                self.set_status(Status::error(&e.status_message()));
            }
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        if self.search_state.editing {
            self.handle_search_input(code);
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('/') | KeyCode::Char('s') => self.search_state.start_editing(),
            KeyCode::Char('r') => self.request_refresh(),
            KeyCode::Char('l') => self.request(LocationRequest::CurrentLocation),
            _ => {}
        }
    }

    fn handle_search_input(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.search_state.cancel_editing(),
            KeyCode::Enter => {
                if let Some(query) = self.search_state.finish_editing() {
                    self.request(LocationRequest::City(query));
                }
            }
            KeyCode::Backspace => {
                self.search_state.buffer.pop();
            }
            KeyCode::Char(c) => self.search_state.buffer.push(c),
            _ => {}
        }
    }
}
