//! Experience points and level progression.
//!
//! The XP ledger is persisted as JSON (`xp.json`) with the dirty-flag flush
//! idiom used by every other state file. The service is constructed
//! explicitly from its storage path at startup and passed by reference;
//! there are no global singletons.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;

/// Cumulative XP required to reach each level (index 0 = level 1).
pub const XP_THRESHOLDS: [u64; 15] = [
    0, 100, 250, 500, 1_000, 1_750, 2_750, 4_000, 5_500, 7_500, 10_000, 13_000, 16_500, 20_500,
    25_000,
];

/// Honorific titles per level (index 0 = level 1).
pub const LEVEL_TITLES: [&str; 15] = [
    "Keyboard Novice",
    "Shortcut Apprentice",
    "Key Combo Adept",
    "Hotkey Enthusiast",
    "Shortcut Specialist",
    "Keyboard Tactician",
    "Efficiency Expert",
    "Shortcut Virtuoso",
    "Keyboard Maestro",
    "Shortcut Sensei",
    "Keyboard Wizard",
    "Shortcut Grandmaster",
    "Keyboard Sage",
    "Shortcut Legend",
    "Keyboard Dojo Master",
];

/// XP amounts awarded for the various activities.
pub mod rewards {
    /// Finishing a lesson.
    pub const COMPLETE_LESSON: u64 = 50;
    /// Additional XP for finishing a lesson with no misses.
    pub const PERFECT_LESSON: u64 = 25;
    /// First practice of a day.
    pub const DAILY_STREAK: u64 = 10;
    /// Additional XP at every seventh consecutive day.
    pub const WEEKLY_STREAK: u64 = 50;
    /// Additional XP at every thirtieth consecutive day.
    pub const MONTHLY_STREAK: u64 = 200;
    /// One correct attempt.
    pub const CORRECT_ANSWER: u64 = 5;
    /// Per consecutive correct attempt on top of [`CORRECT_ANSWER`].
    pub const COMBO_BONUS: u64 = 2;
}

/// One XP award in the history ledger.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct XpEvent {
    /// RFC 3339 timestamp of the award.
    pub date: String,
    /// Amount awarded.
    pub amount: u64,
    /// Source tag, e.g. `"exercise"`, `"lesson"`, `"streak"`.
    pub source: String,
    /// Optional human-readable context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One level attainment in the history ledger.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LevelRecord {
    /// RFC 3339 timestamp of the level-up.
    pub date: String,
    /// Level reached.
    pub level: u32,
}

/// Persisted XP state.
///
/// Invariant: `level` is always the largest `i` such that
/// `total_xp >= XP_THRESHOLDS[i - 1]`; it is recomputed on load so stale or
/// hand-edited files heal themselves.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct XpData {
    /// Lifetime XP.
    pub total_xp: u64,
    /// Current level (1-based).
    pub level: u32,
    /// XP accumulated within the current level.
    pub current_level_xp: u64,
    /// Cumulative XP needed for the next level.
    pub next_level_xp: u64,
    /// Award history, append-only.
    pub xp_history: Vec<XpEvent>,
    /// Level attainment history, append-only.
    pub level_history: Vec<LevelRecord>,
}

impl Default for XpData {
    fn default() -> Self {
        Self {
            total_xp: 0,
            level: 1,
            current_level_xp: 0,
            next_level_xp: XP_THRESHOLDS[1],
            xp_history: Vec::new(),
            level_history: vec![LevelRecord {
                date: Utc::now().to_rfc3339(),
                level: 1,
            }],
        }
    }
}

/// A single level gained by an [`XpService::add_xp`] call.
///
/// One event is emitted per threshold crossed, so a large award that jumps
/// several levels produces several events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    /// Level before this step.
    pub from: u32,
    /// Level after this step.
    pub to: u32,
    /// Title of the reached level.
    pub title: &'static str,
}

/// Compute the level for a lifetime XP total.
#[must_use]
pub fn level_for_total(total_xp: u64) -> u32 {
    let mut level = 1u32;
    for (i, threshold) in XP_THRESHOLDS.iter().enumerate() {
        if total_xp >= *threshold {
            level = u32::try_from(i).unwrap_or(0) + 1;
        } else {
            break;
        }
    }
    level
}

/// Title for a level, clamped to the known range.
#[must_use]
pub fn title_for_level(level: u32) -> &'static str {
    let idx = (level.max(1) as usize - 1).min(LEVEL_TITLES.len() - 1);
    LEVEL_TITLES[idx]
}

/// XP and level bookkeeping backed by a JSON file.
#[derive(Debug)]
pub struct XpService {
    /// In-memory ledger.
    data: XpData,
    /// Backing file.
    path: PathBuf,
    /// Unflushed changes pending.
    dirty: bool,
}

impl XpService {
    /// What: Construct the service, loading and healing any persisted ledger.
    ///
    /// Inputs:
    /// - `path`: JSON file location; missing or unreadable files fall back to
    ///   defaults.
    ///
    /// Output:
    /// - A service whose level invariant holds even for stale files.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        let mut data = XpData::default();
        match fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str::<XpData>(&s) {
                Ok(loaded) => data = loaded,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to parse XP ledger; starting fresh");
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read XP ledger; starting fresh");
            }
        }
        // Heal the level invariant against hand-edited or stale files.
        data.level = level_for_total(data.total_xp);
        data.current_level_xp = data.total_xp - threshold_below(data.level);
        data.next_level_xp = threshold_above(data.level);
        Self {
            data,
            path,
            dirty: false,
        }
    }

    /// Current ledger snapshot.
    #[must_use]
    pub const fn data(&self) -> &XpData {
        &self.data
    }

    /// Current level.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.data.level
    }

    /// Lifetime XP.
    #[must_use]
    pub const fn total_xp(&self) -> u64 {
        self.data.total_xp
    }

    /// Title of the current level.
    #[must_use]
    pub fn level_title(&self) -> &'static str {
        title_for_level(self.data.level)
    }

    /// What: Award XP and return any levels gained.
    ///
    /// Inputs:
    /// - `amount`: XP to add; zero is a no-op.
    /// - `source`: Ledger source tag.
    /// - `description`: Optional context stored with the event.
    ///
    /// Output:
    /// - One [`LevelUp`] per threshold crossed, in ascending order.
    ///
    /// Details:
    /// - `total_xp` only ever grows; `level` is non-decreasing.
    pub fn add_xp(&mut self, amount: u64, source: &str, description: Option<&str>) -> Vec<LevelUp> {
        if amount == 0 {
            return Vec::new();
        }
        let old_level = self.data.level;
        self.data.total_xp += amount;
        self.data.xp_history.push(XpEvent {
            date: Utc::now().to_rfc3339(),
            amount,
            source: source.to_string(),
            description: description.map(str::to_string),
        });
        let new_level = level_for_total(self.data.total_xp);
        let mut ups = Vec::new();
        if new_level > old_level {
            for reached in (old_level + 1)..=new_level {
                self.data.level_history.push(LevelRecord {
                    date: Utc::now().to_rfc3339(),
                    level: reached,
                });
                ups.push(LevelUp {
                    from: reached - 1,
                    to: reached,
                    title: title_for_level(reached),
                });
            }
            tracing::info!(from = old_level, to = new_level, "level up");
        }
        self.data.level = new_level;
        self.data.current_level_xp = self.data.total_xp - threshold_below(new_level);
        self.data.next_level_xp = threshold_above(new_level);
        self.dirty = true;
        ups
    }

    /// Progress toward the next level as a 0–100 percentage.
    #[must_use]
    pub fn level_progress(&self) -> u8 {
        if self.data.level as usize >= XP_THRESHOLDS.len() {
            return 100;
        }
        let span = self.data.next_level_xp - threshold_below(self.data.level);
        if span == 0 {
            return 100;
        }
        let pct = self.data.current_level_xp * 100 / span;
        u8::try_from(pct.min(100)).unwrap_or(100)
    }

    /// XP still needed to reach the next level; zero at max level.
    #[must_use]
    pub fn xp_to_next_level(&self) -> u64 {
        if self.data.level as usize >= XP_THRESHOLDS.len() {
            return 0;
        }
        self.data.next_level_xp.saturating_sub(self.data.total_xp)
    }

    /// XP earned on the given calendar day (`YYYY-MM-DD`).
    #[must_use]
    pub fn xp_on_day(&self, day: &str) -> u64 {
        self.data
            .xp_history
            .iter()
            .filter(|e| e.date.starts_with(day))
            .map(|e| e.amount)
            .sum()
    }

    /// XP earned today (UTC).
    #[must_use]
    pub fn xp_today(&self) -> u64 {
        self.xp_on_day(&Utc::now().format("%Y-%m-%d").to_string())
    }

    /// History entries whose timestamps fall in `[start, end]` (RFC 3339
    /// string comparison, as the timestamps sort lexicographically).
    #[must_use]
    pub fn history_between(&self, start: &str, end: &str) -> Vec<&XpEvent> {
        self.data
            .xp_history
            .iter()
            .filter(|e| e.date.as_str() >= start && e.date.as_str() <= end)
            .collect()
    }

    /// What: Persist the ledger to disk if marked dirty.
    ///
    /// Inputs: none.
    ///
    /// Output:
    /// - Writes JSON to the backing path and clears the dirty flag.
    pub fn maybe_flush(&mut self) {
        if !self.dirty {
            return;
        }
        if let Ok(s) = serde_json::to_string(&self.data) {
            match fs::write(&self.path, &s) {
                Ok(()) => {
                    tracing::debug!(path = %self.path.display(), bytes = s.len(), "[Persist] XP ledger persisted");
                }
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "[Persist] Failed to write XP ledger");
                }
            }
            self.dirty = false;
        }
    }

    /// Drop all progress and start over (used by `--reset-progress`).
    pub fn reset(&mut self) {
        self.data = XpData::default();
        self.dirty = true;
    }
}

/// Cumulative threshold at the bottom of a level.
fn threshold_below(level: u32) -> u64 {
    let idx = (level.max(1) as usize - 1).min(XP_THRESHOLDS.len() - 1);
    XP_THRESHOLDS[idx]
}

/// Cumulative threshold at the top of a level (clamped at max level).
fn threshold_above(level: u32) -> u64 {
    let idx = (level as usize).min(XP_THRESHOLDS.len() - 1);
    XP_THRESHOLDS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "keydojo_xp_{tag}_{}_{}.json",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("System time is before UNIX epoch")
                .as_nanos()
        ))
    }

    /// What: Levels follow the threshold table exactly.
    ///
    /// Inputs:
    /// - Totals at, just below, and just above several thresholds.
    ///
    /// Output:
    /// - The largest qualifying level each time.
    #[test]
    fn xp_level_for_total_thresholds() {
        assert_eq!(level_for_total(0), 1);
        assert_eq!(level_for_total(99), 1);
        assert_eq!(level_for_total(100), 2);
        assert_eq!(level_for_total(249), 2);
        assert_eq!(level_for_total(250), 3);
        assert_eq!(level_for_total(25_000), 15);
        assert_eq!(level_for_total(1_000_000), 15);
    }

    /// What: Awards accumulate and emit one level-up per threshold crossed.
    ///
    /// Inputs:
    /// - A single 600 XP award from level 1 (crosses 100, 250, and 500).
    ///
    /// Output:
    /// - Three `LevelUp` events in ascending order; level lands on 4.
    #[test]
    fn xp_add_emits_one_event_per_threshold() {
        let path = temp_path("multi");
        let mut svc = XpService::new(path.clone());
        let ups = svc.add_xp(600, "test", None);
        assert_eq!(ups.len(), 3);
        assert_eq!(
            ups.iter().map(|u| u.to).collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
        assert_eq!(svc.level(), 4);
        assert_eq!(svc.data().current_level_xp, 100);
        assert_eq!(svc.data().next_level_xp, 1_000);
        assert_eq!(svc.data().level_history.len(), 4);
        let _ = fs::remove_file(path);
    }

    /// What: Zero awards are no-ops and totals are monotone.
    ///
    /// Inputs:
    /// - A zero award between two real ones.
    ///
    /// Output:
    /// - History only records the real awards; total never decreases.
    #[test]
    fn xp_zero_award_is_noop() {
        let path = temp_path("noop");
        let mut svc = XpService::new(path.clone());
        svc.add_xp(10, "a", None);
        let before = svc.total_xp();
        assert!(svc.add_xp(0, "b", None).is_empty());
        assert_eq!(svc.total_xp(), before);
        svc.add_xp(10, "c", None);
        assert_eq!(svc.data().xp_history.len(), 2);
        let _ = fs::remove_file(path);
    }

    /// What: The ledger round-trips through disk and heals its invariant.
    ///
    /// Inputs:
    /// - A flushed service reloaded from the same path; then a file with a
    ///   stale `level` field.
    ///
    /// Output:
    /// - Totals and history survive; the stale level is recomputed on load.
    #[test]
    fn xp_flush_reload_and_heal() {
        let path = temp_path("reload");
        {
            let mut svc = XpService::new(path.clone());
            svc.add_xp(120, "lesson", Some("first lesson"));
            svc.maybe_flush();
        }
        let svc = XpService::new(path.clone());
        assert_eq!(svc.total_xp(), 120);
        assert_eq!(svc.level(), 2);
        assert_eq!(svc.data().xp_history.len(), 1);

        // Stale level field on disk must be recomputed upward on load.
        let mut stale: XpData = svc.data().clone();
        stale.total_xp = 300;
        stale.level = 1;
        fs::write(&path, serde_json::to_string(&stale).expect("serialize")).expect("write");
        let healed = XpService::new(path.clone());
        assert_eq!(healed.level(), 3);
        let _ = fs::remove_file(path);
    }

    /// What: Progress and remaining-XP queries agree with the table.
    ///
    /// Inputs:
    /// - 175 total XP (level 2, halfway to 250).
    ///
    /// Output:
    /// - 50% progress, 75 XP remaining; max level reports 100% and 0.
    #[test]
    fn xp_progress_queries() {
        let path = temp_path("progress");
        let mut svc = XpService::new(path.clone());
        svc.add_xp(175, "test", None);
        assert_eq!(svc.level(), 2);
        assert_eq!(svc.level_progress(), 50);
        assert_eq!(svc.xp_to_next_level(), 75);
        svc.add_xp(30_000, "test", None);
        assert_eq!(svc.level(), 15);
        assert_eq!(svc.level_progress(), 100);
        assert_eq!(svc.xp_to_next_level(), 0);
        assert_eq!(svc.level_title(), "Keyboard Dojo Master");
        let _ = fs::remove_file(path);
    }
}
