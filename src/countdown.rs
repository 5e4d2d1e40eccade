use std::time::Duration;

/// Repeating one-second timer owned by a single game session.
///
/// Elapsed wall time is fed in through [`Countdown::advance`], which reports
/// how many whole seconds fired since the last call. Once disarmed it never
/// fires again; a new session gets a fresh countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    armed: bool,
    pending: Duration,
}

impl Countdown {
    pub fn armed() -> Self {
        Self {
            armed: true,
            pending: Duration::ZERO,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn disarm(&mut self) {
        self.armed = false;
        self.pending = Duration::ZERO;
    }

    /// Time accumulated towards the next whole second
    #[cfg(test)]
    pub(crate) fn pending(&self) -> Duration {
        self.pending
    }

    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.armed {
            return 0;
        }

        self.pending += elapsed;
        let fired = self.pending.as_secs();
        self.pending -= Duration::from_secs(fired);

        u32::try_from(fired).unwrap_or(u32::MAX)
    }
}
