use clap::ValueEnum;

/// Range, attempt limit and time budget for one difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyProfile {
    pub max_range: u32,
    pub max_attempts: u32,
    pub time_budget_secs: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum, strum_macros::Display)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                max_range: 50,
                max_attempts: 10,
                time_budget_secs: 60,
            },
            Difficulty::Medium => DifficultyProfile {
                max_range: 100,
                max_attempts: 7,
                time_budget_secs: 45,
            },
            Difficulty::Hard => DifficultyProfile {
                max_range: 200,
                max_attempts: 5,
                time_budget_secs: 30,
            },
        }
    }

    /// Next level in selector order, wrapping from Hard back to Easy
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}
