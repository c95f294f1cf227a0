use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Config;
use crate::history::{HistoryLog, HistoryRecord};
use crate::practice::{ChunkCompleted, Practice};
use crate::runtime::typed_key;
use crate::session::Phase;
use crate::typing_policy::TypingPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Browser,
    Typing,
}

#[derive(Debug)]
pub struct App {
    pub practice: Practice,
    pub config: Config,
    pub state: AppState,
    /// Highlighted row in the file browser.
    pub browser_cursor: usize,
    /// Result of the most recently finished chunk.
    pub last_completion: Option<ChunkCompleted>,
    pub should_quit: bool,
    history: Option<HistoryLog>,
}

impl App {
    pub fn new(practice: Practice, config: Config) -> Self {
        Self {
            practice,
            config,
            state: AppState::Browser,
            browser_cursor: 0,
            last_completion: None,
            should_quit: false,
            history: None,
        }
    }

    pub fn with_history(mut self, history: HistoryLog) -> Self {
        self.history = Some(history);
        self
    }

    pub fn policy(&self) -> TypingPolicy {
        self.config.policy()
    }

    /// The completion to announce, while the finished chunk is still open.
    pub fn banner(&self) -> Option<&ChunkCompleted> {
        if self.state != AppState::Typing || self.practice.session().phase() != Phase::Completed {
            return None;
        }
        self.last_completion
            .as_ref()
            .filter(|done| Some(done.file) == self.practice.selected_file_index())
            .filter(|done| done.chunk == self.practice.chunk_index())
    }

    pub fn open_file(&mut self, index: usize) {
        if self.practice.select_file(index) {
            self.browser_cursor = index;
            self.last_completion = None;
            self.state = AppState::Typing;
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Browser => self.on_browser_key(key),
            AppState::Typing => self.on_typing_key(key),
        }
    }

    fn on_browser_key(&mut self, key: KeyEvent) {
        let count = self.practice.project().len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.browser_cursor = self.browser_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.browser_cursor + 1 < count {
                    self.browser_cursor += 1;
                }
            }
            KeyCode::Home => self.browser_cursor = 0,
            KeyCode::End => self.browser_cursor = count.saturating_sub(1),
            KeyCode::Enter => self.open_file(self.browser_cursor),
            _ => {}
        }
    }

    fn on_typing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.practice.close_file();
                self.state = AppState::Browser;
            }
            KeyCode::F(2) => {
                self.config.stop_on_error = !self.config.stop_on_error;
                log::debug!("stop on error: {}", self.config.stop_on_error);
            }
            KeyCode::F(3) => self.config.show_line_numbers = !self.config.show_line_numbers,
            KeyCode::F(5) => self.practice.reset(),
            KeyCode::PageDown => {
                self.practice.next_chunk();
            }
            KeyCode::PageUp => {
                self.practice.prev_chunk();
            }
            _ => {
                let Some(typed) = typed_key(&key) else {
                    return;
                };
                let policy = self.policy();
                if let Some(done) = self.practice.type_key(typed, policy) {
                    self.record(&done);
                    self.last_completion = Some(done);
                }
            }
        }
    }

    fn record(&self, done: &ChunkCompleted) {
        let Some(history) = &self.history else {
            return;
        };
        let Some(file) = self.practice.project().file(done.file) else {
            return;
        };
        let title = file
            .chunks
            .get(done.chunk)
            .map(|c| c.title.as_str())
            .unwrap_or_default();
        let record = HistoryRecord::new(&file.display_path(), &done.chunk_id, title, &done.statistics);
        if let Err(e) = history.append(&record) {
            log::warn!("could not write history to {}: {e}", history.path().display());
        }
    }
}
