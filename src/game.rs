use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use rand::Rng;
use thiserror::Error;

use crate::audio::{Clip, SoundPlayer};
use crate::countdown::Countdown;
use crate::difficulty::{Difficulty, DifficultyProfile};

const VERY_CLOSE_MAX_DISTANCE: u32 = 5;
const CLOSE_MAX_DISTANCE: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won,
    LostByAttempts,
    LostByTimeout,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::InProgress)
    }
}

/// Proximity feedback derived from the distance between guess and target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    VeryClose,
    Close,
    FarAway,
}

impl Hint {
    /// Bands are inclusive on their upper bound
    pub fn from_distance(distance: u32) -> Self {
        if distance <= VERY_CLOSE_MAX_DISTANCE {
            Hint::VeryClose
        } else if distance <= CLOSE_MAX_DISTANCE {
            Hint::Close
        } else {
            Hint::FarAway
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::VeryClose => write!(f, "🔥 Very Close"),
            Hint::Close => write!(f, "🙂 Close"),
            Hint::FarAway => write!(f, "❄️ Far Away"),
        }
    }
}

/// Text shown to the player after a guess or a timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Won,
    TooHigh,
    TooLow,
    GameOver { target: u32 },
    TimeOver { target: u32 },
    EnterInRange { max: u32 },
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Won => write!(f, "Correct! You Won 🎉"),
            Message::TooHigh => write!(f, "Too High"),
            Message::TooLow => write!(f, "Too Low"),
            Message::GameOver { target } => write!(f, "Game Over! Number was {target}"),
            Message::TimeOver { target } => write!(f, "Time Over! Number was {target}"),
            Message::EnterInRange { max } => write!(f, "Enter a number between 1 and {max}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("the session is already over")]
    SessionOver,
    #[error("no guess entered")]
    Empty,
    #[error("{0:?} is not a whole number")]
    NotANumber(String),
    #[error("{value} is outside 1..={max}")]
    OutOfRange { value: i64, max: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("target {target} is outside 1..={max} for {difficulty}")]
    TargetOutOfRange {
        target: u32,
        max: u32,
        difficulty: Difficulty,
    },
}

/// Result of a guess that was accepted and counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Correct,
    OutOfAttempts,
    TooHigh(Hint),
    TooLow(Hint),
}

/// One play-through: a target drawn at creation, then guesses and ticks until
/// a terminal status. Replaced wholesale on reset or level change.
pub struct GameSession {
    difficulty: Difficulty,
    profile: DifficultyProfile,
    target: u32,
    attempts_used: u32,
    history: Vec<u32>,
    time_remaining: u32,
    status: Status,
    message: Option<Message>,
    hint: Option<Hint>,
    countdown: Countdown,
    player: Rc<dyn SoundPlayer>,
}

impl GameSession {
    /// Draws a target uniformly from `1..=max_range` and starts the countdown
    pub fn start(difficulty: Difficulty, player: Rc<dyn SoundPlayer>) -> Self {
        let target = rand::thread_rng().gen_range(1..=difficulty.profile().max_range);
        Self::begin(difficulty, target, player)
    }

    /// Starts a session with a caller-chosen target
    pub fn with_target(
        difficulty: Difficulty,
        target: u32,
        player: Rc<dyn SoundPlayer>,
    ) -> Result<Self, SessionError> {
        let max = difficulty.profile().max_range;
        if !(1..=max).contains(&target) {
            return Err(SessionError::TargetOutOfRange {
                target,
                max,
                difficulty,
            });
        }
        Ok(Self::begin(difficulty, target, player))
    }

    fn begin(difficulty: Difficulty, target: u32, player: Rc<dyn SoundPlayer>) -> Self {
        let profile = difficulty.profile();
        tracing::info!(
            %difficulty,
            max_range = profile.max_range,
            max_attempts = profile.max_attempts,
            time_budget = profile.time_budget_secs,
            "session started"
        );
        player.play(Clip::Reset);

        Self {
            difficulty,
            profile,
            target,
            attempts_used: 0,
            history: Vec::new(),
            time_remaining: profile.time_budget_secs,
            status: Status::InProgress,
            message: None,
            hint: None,
            countdown: Countdown::armed(),
            player,
        }
    }

    pub fn submit_guess(&mut self, raw: &str) -> Result<Evaluation, GuessError> {
        if self.status.is_terminal() {
            return Err(GuessError::SessionOver);
        }

        let guess = match self.parse_guess(raw) {
            Ok(guess) => guess,
            Err(e) => {
                tracing::debug!(input = raw, error = %e, "guess rejected");
                self.message = Some(Message::EnterInRange {
                    max: self.profile.max_range,
                });
                self.hint = None;
                return Err(e);
            }
        };

        self.history.push(guess);
        self.attempts_used += 1;
        tracing::debug!(guess, attempt = self.attempts_used, "guess accepted");

        if guess == self.target {
            self.finish(Status::Won, Message::Won, Clip::Correct);
            return Ok(Evaluation::Correct);
        }

        if self.attempts_used == self.profile.max_attempts {
            self.finish(
                Status::LostByAttempts,
                Message::GameOver {
                    target: self.target,
                },
                Clip::Wrong,
            );
            return Ok(Evaluation::OutOfAttempts);
        }

        let hint = Hint::from_distance(self.target.abs_diff(guess));
        self.hint = Some(hint);

        let evaluation = if guess > self.target {
            self.message = Some(Message::TooHigh);
            Evaluation::TooHigh(hint)
        } else {
            self.message = Some(Message::TooLow);
            Evaluation::TooLow(hint)
        };
        self.player.play(Clip::Wrong);

        Ok(evaluation)
    }

    fn parse_guess(&self, raw: &str) -> Result<u32, GuessError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GuessError::Empty);
        }

        let value: i64 = trimmed
            .parse()
            .map_err(|_| GuessError::NotANumber(trimmed.to_string()))?;

        let max = self.profile.max_range;
        match u32::try_from(value) {
            Ok(guess) if (1..=max).contains(&guess) => Ok(guess),
            _ => Err(GuessError::OutOfRange { value, max }),
        }
    }

    /// One elapsed second. Does nothing once the session is over.
    pub fn tick(&mut self) {
        if self.status.is_terminal() {
            return;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.finish(
                Status::LostByTimeout,
                Message::TimeOver {
                    target: self.target,
                },
                Clip::Timeout,
            );
        }
    }

    /// Feeds wall time into the countdown and ticks once per fired second.
    /// Returns how many ticks were applied.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let fired = self.countdown.advance(elapsed);
        let mut applied = 0;
        for _ in 0..fired {
            if self.status.is_terminal() {
                break;
            }
            self.tick();
            applied += 1;
        }
        applied
    }

    fn finish(&mut self, status: Status, message: Message, clip: Clip) {
        self.status = status;
        self.message = Some(message);
        self.hint = None;
        self.countdown.disarm();
        tracing::info!(
            ?status,
            attempts = self.attempts_used,
            time_remaining = self.time_remaining,
            "session finished"
        );
        self.player.play(clip);
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn max_range(&self) -> u32 {
        self.profile.max_range
    }

    pub fn max_attempts(&self) -> u32 {
        self.profile.max_attempts
    }

    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> Option<Message> {
        self.message
    }

    pub fn hint(&self) -> Option<Hint> {
        self.hint
    }

    pub fn history(&self) -> &[u32] {
        &self.history
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub(crate) fn player(&self) -> &Rc<dyn SoundPlayer> {
        &self.player
    }

    #[cfg(test)]
    pub(crate) fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    #[cfg(test)]
    pub(crate) fn target(&self) -> u32 {
        self.target
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // target stays out of debug output
        f.debug_struct("GameSession")
            .field("difficulty", &self.difficulty)
            .field("attempts_used", &self.attempts_used)
            .field("history", &self.history)
            .field("time_remaining", &self.time_remaining)
            .field("status", &self.status)
            .field("message", &self.message)
            .field("hint", &self.hint)
            .field("countdown", &self.countdown)
            .finish_non_exhaustive()
    }
}
