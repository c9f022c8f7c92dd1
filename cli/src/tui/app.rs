use std::path::PathBuf;

use oee_core::{format_inputs, DashboardSession, SessionLogRepository};
use ratatui::widgets::TableState;
use tracing::warn;

pub enum InputMode {
    Normal,
    EditingInputs,
    SelectingDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Kpis,
    Trend,
    Log,
    Export,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Kpis, Tab::Trend, Tab::Log, Tab::Export];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Kpis => "KPIs",
            Tab::Trend => "Trends",
            Tab::Log => "Daily Log",
            Tab::Export => "Export",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

pub struct App {
    pub session: DashboardSession<SessionLogRepository>,
    pub export_file: PathBuf,
    pub tab: Tab,
    pub log_state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub status: Option<StatusLine>,
}

impl App {
    pub fn new(session: DashboardSession<SessionLogRepository>, export_file: PathBuf) -> App {
        App {
            session,
            export_file,
            tab: Tab::Kpis,
            log_state: TableState::default(),
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            status: None,
        }
    }

    pub fn next_tab(&mut self) {
        let i = (self.tab.index() + 1) % Tab::ALL.len();
        self.tab = Tab::ALL[i];
    }

    pub fn previous_tab(&mut self) {
        let i = (self.tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len();
        self.tab = Tab::ALL[i];
    }

    pub fn next(&mut self) {
        let len = self.session.entries().len();
        if len == 0 { return; }

        let i = match self.log_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.log_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.session.entries().len();
        if len == 0 { return; }

        let i = match self.log_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.log_state.select(Some(i));
    }

    pub fn save_snapshot(&mut self) {
        let entry = self.session.save();
        // Follow the newest row in the log table.
        self.log_state.select(Some(self.session.entries().len() - 1));
        self.set_status(
            format!("Saved {} (OEE {:.2}%)", entry.date.format("%Y-%m-%d"), entry.oee * 100.0),
            false,
        );
    }

    pub fn export(&mut self) {
        match self.session.export_to(&self.export_file) {
            Ok(Some(path)) => {
                let rows = self.session.entries().len();
                self.set_status(format!("Exported {} rows to {}", rows, path.display()), false);
            }
            Ok(None) => self.set_status("No data available yet.".to_string(), false),
            Err(e) => {
                warn!(error = %e, "export failed");
                self.set_status(format!("Export failed: {}", e), true);
            }
        }
    }

    pub fn enter_edit_mode(&mut self) {
        self.input_mode = InputMode::EditingInputs;
        self.input = format_inputs(self.session.inputs());
        self.cursor_position = self.input.chars().count();
    }

    pub fn enter_date_mode(&mut self) {
        self.input_mode = InputMode::SelectingDate;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.byte_index(self.cursor_position);
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index = self.byte_index(self.cursor_position - 1);
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Text before the cursor, used to place the terminal cursor.
    pub fn input_before_cursor(&self) -> &str {
        &self.input[..self.byte_index(self.cursor_position)]
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.input.chars().take(char_index).map(|c| c.len_utf8()).sum()
    }

    pub fn submit_command(&mut self) {
        if self.input.trim().is_empty() {
            self.exit_input_mode();
            return;
        }

        match self.input_mode {
            InputMode::EditingInputs => self.submit_inputs(),
            InputMode::SelectingDate => self.submit_date(),
            InputMode::Normal => {},
        }

        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
    }

    fn submit_inputs(&mut self) {
        let line = self.input.clone();
        match self.session.update_inputs(&line) {
            Ok(()) => self.status = None,
            Err(e) => self.set_status(e.to_string(), true),
        }
    }

    fn submit_date(&mut self) {
        let line = self.input.clone();
        match self.session.select_log_date(&line) {
            Ok(date) => self.set_status(format!("Log date set to {}", date.format("%Y-%m-%d (%a)")), false),
            Err(e) => self.set_status(e.to_string(), true),
        }
    }

    fn set_status(&mut self, text: String, is_error: bool) {
        self.status = Some(StatusLine { text, is_error });
    }
}
