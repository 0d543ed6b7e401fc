//! Countdown timer for timed writing sprints.

use std::time::Duration;

pub const MIN_MINUTES: u32 = 1;
pub const MAX_MINUTES: u32 = 120;
pub const DEFAULT_MINUTES: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTimer {
    minutes: u32,
    remaining: Duration,
    running: bool,
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new(DEFAULT_MINUTES as i64)
    }
}

impl CountdownTimer {
    pub fn new(minutes: i64) -> Self {
        let minutes = clamp_minutes(minutes);
        Self {
            minutes,
            remaining: Duration::from_secs(minutes as u64 * 60),
            running: false,
        }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Change the sprint length. While idle this also resets the countdown.
    pub fn adjust(&mut self, delta: i64) {
        self.minutes = clamp_minutes(self.minutes as i64 + delta);
        if !self.running {
            self.reset();
        }
    }

    /// Start or pause
    pub fn toggle(&mut self) {
        self.running = !self.running;
        if !self.running {
            self.reset();
        }
        tracing::debug!(running = self.running, minutes = self.minutes, "timer toggled");
    }

    fn reset(&mut self) {
        self.remaining = Duration::from_secs(self.minutes as u64 * 60);
    }

    /// Advance by `elapsed`. Returns `Finished` once when the countdown hits zero.
    pub fn tick(&mut self, elapsed: Duration) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            self.running = false;
            tracing::info!(minutes = self.minutes, "timer finished");
            return Some(TimerEvent::Finished);
        }
        None
    }

    /// `m:ss` while running, `<minutes>:00` while idle
    pub fn display(&self) -> String {
        if self.running {
            // Round up so the display never shows 0:00 while still running
            let secs = self.remaining.as_secs() + u64::from(self.remaining.subsec_nanos() > 0);
            format!("{}:{:02}", secs / 60, secs % 60)
        } else {
            format!("{}:00", self.minutes)
        }
    }
}

fn clamp_minutes(minutes: i64) -> u32 {
    minutes.clamp(MIN_MINUTES as i64, MAX_MINUTES as i64) as u32
}
