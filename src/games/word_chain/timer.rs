//! Per-turn countdown.

use tokio::time::{Duration, Instant, Interval, MissedTickBehavior, interval_at};
use tracing::{debug, info, instrument};

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Outcome of one clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// The timer is not running.
    Idle,
    /// Seconds left after this tick.
    Running(u32),
    /// The clock just reached zero. Reported exactly once per countdown.
    Expired,
}

/// Countdown state, decremented once per second while active.
///
/// Every restart bumps the generation so the tick source can realign to the
/// new countdown instead of running a second one alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnTimer {
    remaining: u32,
    limit: u32,
    active: bool,
    generation: u64,
}

impl TurnTimer {
    /// Creates a stopped timer with the given limit in seconds.
    pub fn new(limit: u32) -> Self {
        Self {
            remaining: limit,
            limit,
            active: false,
            generation: 0,
        }
    }

    /// Seconds left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Seconds per turn.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Whether the clock is counting down.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Restart counter.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Refills the clock and starts counting, replacing any running countdown.
    #[instrument(skip(self), fields(limit = self.limit))]
    pub fn restart(&mut self) {
        self.remaining = self.limit;
        self.active = true;
        self.generation += 1;
        debug!(generation = self.generation, "Timer restarted");
    }

    /// Refills the clock but holds it until the next restart.
    pub fn reset_held(&mut self) {
        self.remaining = self.limit;
        self.active = false;
        self.generation += 1;
    }

    /// Stops counting, leaving the remaining time as is.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Advances the clock by one second.
    pub fn tick(&mut self) -> TimerTick {
        if !self.active {
            return TimerTick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = false;
            info!(limit = self.limit, "Timer expired");
            TimerTick::Expired
        } else {
            TimerTick::Running(self.remaining)
        }
    }
}

/// Formats seconds as `"Xm Ys"`, or `"Ys"` under a minute.
pub fn format_remaining(secs: u32) -> String {
    let minutes = secs / 60;
    let seconds = secs % 60;
    if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// One-second tick source for a [`TurnTimer`].
///
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct Countdown {
    interval: Interval,
    generation: u64,
}

impl Countdown {
    /// Creates a tick source whose first tick lands one second from now.
    pub fn new() -> Self {
        let mut interval = interval_at(Instant::now() + ONE_SECOND, ONE_SECOND);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval,
            generation: 0,
        }
    }

    /// Realigns the ticks when the timer was restarted since the last sync,
    /// so a fresh countdown gets a full first second.
    pub fn sync(&mut self, timer: &TurnTimer) {
        if timer.generation() != self.generation {
            self.generation = timer.generation();
            self.interval.reset();
        }
    }

    /// Waits for the next one-second tick.
    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}
