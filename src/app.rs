use std::rc::Rc;
use std::time::Duration;

use crate::audio::SoundPlayer;
use crate::celebration::Celebration;
use crate::difficulty::Difficulty;
use crate::game::{Evaluation, GameSession, GuessError};
use crate::preferences::PreferenceStore;
use crate::theme::Theme;

/// Longest guess the input field accepts; enough for any range plus a sign
pub const MAX_INPUT_LEN: usize = 6;

/// Everything the screen shows, plus the intents the keyboard can trigger
pub struct App {
    session: GameSession,
    input: String,
    theme: Theme,
    store: Box<dyn PreferenceStore>,
    pub celebration: Celebration,
    viewport: (u16, u16),
}

impl App {
    pub fn new(
        difficulty: Difficulty,
        store: Box<dyn PreferenceStore>,
        player: Rc<dyn SoundPlayer>,
    ) -> Self {
        let session = GameSession::start(difficulty, player);
        Self::with_session(session, store)
    }

    /// Wraps an already started session, e.g. one with a fixed target. Later
    /// sessions play through the same sound player as this one.
    pub fn with_session(session: GameSession, store: Box<dyn PreferenceStore>) -> Self {
        let theme = Theme::load(store.as_ref());
        tracing::debug!(%theme, "theme loaded");

        Self {
            session,
            input: String::new(),
            theme,
            store,
            celebration: Celebration::new(),
            viewport: (80, 24),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn difficulty(&self) -> Difficulty {
        self.session.difficulty()
    }

    /// Starts a fresh session at `difficulty`, dropping the current one
    /// together with its countdown.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.celebration.stop();
        self.input.clear();
        let player = Rc::clone(self.session.player());
        self.session = GameSession::start(difficulty, player);
    }

    pub fn reset(&mut self) {
        self.select_difficulty(self.session.difficulty());
    }

    pub fn next_difficulty(&mut self) {
        self.select_difficulty(self.session.difficulty().next());
    }

    /// Submits the typed guess. The field is cleared only when the guess was
    /// counted; rejected input stays for the player to fix.
    pub fn submit(&mut self) -> Result<Evaluation, GuessError> {
        let result = self.session.submit_guess(&self.input);

        if result.is_ok() {
            self.input.clear();
        }
        if result == Ok(Evaluation::Correct) {
            let (width, height) = self.viewport;
            self.celebration.start(width, height);
        }

        result
    }

    /// Flips the theme and persists it. A failed save keeps the new theme for
    /// this run.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.theme.save(self.store.as_ref()) {
            tracing::warn!(theme = %self.theme, error = %e, "failed to persist theme");
        }
        self.theme
    }

    /// Accepts digits and a leading minus while the session is running
    pub fn push_char(&mut self, c: char) -> bool {
        if self.session.is_over() || self.input.len() >= MAX_INPUT_LEN {
            return false;
        }

        let accepted = c.is_ascii_digit() || (c == '-' && self.input.is_empty());
        if accepted {
            self.input.push(c);
        }
        accepted
    }

    pub fn backspace(&mut self) {
        if !self.session.is_over() {
            self.input.pop();
        }
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        self.session.advance(elapsed);
        self.celebration.update(elapsed);
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }
}
