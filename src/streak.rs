//! Daily practice streak tracking.
//!
//! A streak counts consecutive calendar days with at least one practice
//! attempt. The first attempt of a day extends (or restarts) the streak and
//! yields a bonus; further attempts on the same day are no-ops.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::xp::rewards;

/// Persisted streak state. Days are stored as `YYYY-MM-DD` strings.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct StreakData {
    /// Consecutive days ending at `last_practice_day`.
    pub current: u32,
    /// Longest streak ever reached.
    pub longest: u32,
    /// Most recent practice day, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_practice_day: Option<String>,
}

/// Bonus awarded for the first practice of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakBonus {
    /// Streak length after this practice.
    pub days: u32,
    /// XP to award (daily bonus plus weekly/monthly milestones).
    pub xp: u64,
}

/// Streak bookkeeping backed by a JSON file.
#[derive(Debug)]
pub struct StreakService {
    data: StreakData,
    path: PathBuf,
    dirty: bool,
}

impl StreakService {
    /// Load the streak file, falling back to defaults on any failure.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        let mut data = StreakData::default();
        match fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str::<StreakData>(&s) {
                Ok(loaded) => data = loaded,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to parse streak file; starting fresh");
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read streak file; starting fresh");
            }
        }
        Self {
            data,
            path,
            dirty: false,
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub const fn data(&self) -> &StreakData {
        &self.data
    }

    /// Current streak length in days.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.data.current
    }

    /// What: Record a practice on the given day and compute any bonus.
    ///
    /// Inputs:
    /// - `today`: The practice day.
    ///
    /// Output:
    /// - `Some(StreakBonus)` on the first practice of the day: the streak
    ///   extends by one if `today` follows the last practice day, otherwise
    ///   restarts at one. `None` if today was already recorded.
    ///
    /// Details:
    /// - Bonus XP is the daily reward, plus the weekly reward when the new
    ///   length is a multiple of 7, plus the monthly reward at multiples
    ///   of 30.
    pub fn record_practice(&mut self, today: NaiveDate) -> Option<StreakBonus> {
        let today_str = today.format("%Y-%m-%d").to_string();
        let last = self
            .data
            .last_practice_day
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());
        if last == Some(today) {
            return None;
        }
        self.data.current = match last {
            Some(prev) if prev.succ_opt() == Some(today) => self.data.current + 1,
            _ => 1,
        };
        self.data.longest = self.data.longest.max(self.data.current);
        self.data.last_practice_day = Some(today_str);
        self.dirty = true;

        let mut xp = rewards::DAILY_STREAK;
        if self.data.current.is_multiple_of(7) {
            xp += rewards::WEEKLY_STREAK;
        }
        if self.data.current.is_multiple_of(30) {
            xp += rewards::MONTHLY_STREAK;
        }
        tracing::info!(days = self.data.current, xp, "streak extended");
        Some(StreakBonus {
            days: self.data.current,
            xp,
        })
    }

    /// Persist to disk if marked dirty.
    pub fn maybe_flush(&mut self) {
        if !self.dirty {
            return;
        }
        if let Ok(s) = serde_json::to_string(&self.data) {
            match fs::write(&self.path, &s) {
                Ok(()) => {
                    tracing::debug!(path = %self.path.display(), bytes = s.len(), "[Persist] Streak persisted");
                }
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "[Persist] Failed to write streak");
                }
            }
            self.dirty = false;
        }
    }

    /// Drop all streak history (used by `--reset-progress`).
    pub fn reset(&mut self) {
        self.data = StreakData::default();
        self.dirty = true;
    }
}
