// Library surface for the binary, headless runs and integration tests.
pub mod app;
pub mod audio;
pub mod celebration;
pub mod countdown;
pub mod difficulty;
pub mod game;
pub mod logging;
pub mod preferences;
pub mod runtime;
pub mod theme;
pub mod ui;

/// Interval between runtime ticks
pub const TICK_RATE_MS: u64 = 100;
