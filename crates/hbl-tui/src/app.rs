use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use hbl_core::csv::Row;
use hbl_core::state::FetchState;

use crate::fetch::FetchOutcome;

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    /// Fetch lifecycle state, owned here rather than in module globals.
    pub state: FetchState,
    pub should_quit: bool,
    pub show_help: bool,
    /// Selected row index in the data table.
    pub selected_index: usize,
    pub offline: bool,

    refresh_requested: bool,
}

impl App {
    pub fn new(offline: bool) -> Self {
        let mut state = FetchState::new();
        if offline {
            state.rows = demo_rows();
            state.last_updated = Some(Local::now());
        }
        Self {
            state,
            should_quit: false,
            show_help: false,
            selected_index: 0,
            offline,
            refresh_requested: false,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Help modal intercepts Esc and ?
        if self.show_help {
            match key.code {
                KeyCode::Char('?') | KeyCode::Esc => self.show_help = false,
                _ => {}
            }
            return;
        }

        match key.code {
            // Quit
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }

            // Table navigation
            KeyCode::Char('j') | KeyCode::Down => {
                let max = self.state.rows.len();
                if max > 0 && self.selected_index < max - 1 {
                    self.selected_index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                }
            }

            // Help
            KeyCode::Char('?') => self.show_help = true,

            // Refresh; the run loop consumes this and spawns the fetch.
            KeyCode::Char('r') => self.refresh_requested = true,

            _ => {}
        }
    }

    /// Consume a pending refresh request from the key handler.
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    /// Apply a settled fetch delivered over the channel. Stale settlements
    /// are dropped inside [`FetchState::settle`]; the table selection is
    /// clamped when the row set shrinks.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        if self.state.settle(outcome.token, outcome.result) {
            let len = self.state.rows.len();
            if len == 0 {
                self.selected_index = 0;
            } else if self.selected_index >= len {
                self.selected_index = len - 1;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Demo data factory (offline mode and render tests)
// ---------------------------------------------------------------------------

pub fn demo_rows() -> Vec<Row> {
    vec![
        Row {
            id: 0,
            subgroup: "Platform".into(),
            team: "Build Tools".into(),
            hbl: 120,
            unassigned: 18,
        },
        Row {
            id: 1,
            subgroup: "Platform".into(),
            team: "Release Engineering".into(),
            hbl: 80,
            unassigned: 12,
        },
        Row {
            id: 2,
            subgroup: "Product".into(),
            team: "Checkout".into(),
            hbl: 200,
            unassigned: 61,
        },
        Row {
            id: 3,
            subgroup: "Product".into(),
            team: "Search".into(),
            hbl: 150,
            unassigned: 9,
        },
        Row {
            id: 4,
            subgroup: "Support".into(),
            team: "Escalations".into(),
            hbl: 60,
            unassigned: 4,
        },
    ]
}
