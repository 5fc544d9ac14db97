//! Local quota tracking for the X API
//!
//! The API enforces two tiers: a small per-window call budget (15 minutes on
//! the free plan) and a monthly ceiling that never resets mid-month. A client
//! that does not track both locally gets hard 429s with no grace, so every
//! request is pre-checked here and refused with a wait estimate instead of
//! being sent to die.

use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, Utc};

use crate::error::ApiError;

/// Calls held in reserve below the window limit. Supplementary fetches
/// (posts) only run while more than this many calls remain, so the primary
/// profile lookup is never starved within the same window.
pub const QUOTA_BUFFER: u32 = 1;

/// Observable quota condition, for status display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaState {
    /// Window has calls left
    Available,
    /// Window spent; recovers at `reset_time`
    Depleted,
    /// Monthly ceiling hit; terminal until the provider resets it
    MonthlyExhausted,
}

/// Two-tier quota counters with lazy window reset
#[derive(Debug, Clone)]
pub struct RateLimitState {
    remaining: u32,
    reset_time: DateTime<Utc>,
    window_limit: u32,
    window_size: ChronoDuration,
    monthly_used: u32,
    monthly_limit: u32,
}

impl RateLimitState {
    pub fn new(window_limit: u32, window_minutes: u64, monthly_limit: u32) -> Self {
        Self::new_at(window_limit, window_minutes, monthly_limit, Utc::now())
    }

    fn new_at(
        window_limit: u32,
        window_minutes: u64,
        monthly_limit: u32,
        now: DateTime<Utc>,
    ) -> Self {
        let window_size = ChronoDuration::minutes(window_minutes as i64);
        Self {
            remaining: window_limit,
            reset_time: now + window_size,
            window_limit,
            window_size,
            monthly_used: 0,
            monthly_limit,
        }
    }

    /// Reset the window if its deadline has passed. Must run before any
    /// decision that reads `remaining`.
    fn roll_window(&mut self, now: DateTime<Utc>) {
        if now >= self.reset_time {
            self.remaining = self.window_limit;
            self.reset_time = now + self.window_size;
            log::debug!(
                "Quota window reset: {} calls until {}",
                self.remaining,
                self.reset_time
            );
        }
    }

    /// Check whether one call may proceed right now.
    pub fn check(&mut self) -> Result<(), ApiError> {
        self.check_at(Utc::now())
    }

    /// Clock-injected variant of [`check`](Self::check).
    ///
    /// Monthly exhaustion is checked first and fails fast with a zero wait,
    /// since no amount of waiting recovers that ceiling. Window depletion
    /// refuses with the time left until the window rolls.
    pub fn check_at(&mut self, now: DateTime<Utc>) -> Result<(), ApiError> {
        self.roll_window(now);

        if self.monthly_used >= self.monthly_limit {
            return Err(ApiError::QuotaExceeded {
                wait: Duration::ZERO,
                monthly: true,
            });
        }

        if self.remaining == 0 {
            let wait = (self.reset_time - now).to_std().unwrap_or_default();
            return Err(ApiError::QuotaExceeded {
                wait,
                monthly: false,
            });
        }

        Ok(())
    }

    /// Book one successful call against both counters.
    pub fn record_success(&mut self) {
        self.record_success_at(Utc::now())
    }

    fn record_success_at(&mut self, now: DateTime<Utc>) {
        self.roll_window(now);
        self.remaining = self.remaining.saturating_sub(1);
        self.monthly_used += 1;
    }

    /// Absorb a server-side 429. The window is spent regardless of local
    /// bookkeeping; adopt the server's reset time when the header carried one.
    pub fn on_throttled(&mut self, server_reset: Option<DateTime<Utc>>) {
        self.remaining = 0;
        if let Some(reset) = server_reset {
            self.reset_time = reset;
        }
        log::warn!("Server throttled; window resets at {}", self.reset_time);
    }

    /// True while enough budget remains for supplementary fetches beyond
    /// the reserved buffer.
    pub fn has_headroom(&mut self) -> bool {
        self.has_headroom_at(Utc::now())
    }

    fn has_headroom_at(&mut self, now: DateTime<Utc>) -> bool {
        self.roll_window(now);
        self.monthly_used < self.monthly_limit && self.remaining > QUOTA_BUFFER
    }

    pub fn reset_time(&self) -> DateTime<Utc> {
        self.reset_time
    }
}

/// Diagnostic accessors, used by tests and debug tooling
#[allow(dead_code)]
impl RateLimitState {
    /// Current observable condition
    pub fn state(&self) -> QuotaState {
        if self.monthly_used >= self.monthly_limit {
            QuotaState::MonthlyExhausted
        } else if self.remaining == 0 {
            QuotaState::Depleted
        } else {
            QuotaState::Available
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn monthly_used(&self) -> u32 {
        self.monthly_used
    }

    pub fn monthly_limit(&self) -> u32 {
        self.monthly_limit
    }
}
