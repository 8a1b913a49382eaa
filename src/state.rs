//! Application state.
//!
//! Everything the event handlers mutate and the UI reads lives here. The
//! services are constructed in `app::run` from their storage paths and moved
//! into [`AppState`]; handlers receive `&mut AppState` and nothing else.

use ratatui::widgets::ListState;

use crate::audio::TerminalBell;
use crate::content::{Catalog, Lesson};
use crate::detect::{DetectorOptions, ShortcutDetector};
use crate::keys::{NormalizeOptions, parse_shortcut};
use crate::platform::Platform;
use crate::progress::ProgressStore;
use crate::settings::Settings;
use crate::streak::StreakService;
use crate::theme::Theme;
use crate::xp::{LevelUp, XpService};

/// Which screen has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Lesson browser.
    #[default]
    Lessons,
    /// Active practice session.
    Session,
}

/// Modal overlay on top of the current screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Modal {
    /// Nothing overlaid.
    #[default]
    None,
    /// Keybinding help.
    Help,
    /// End-of-lesson summary.
    Summary {
        /// Completed lesson title.
        lesson_title: String,
        /// Correct attempts.
        hits: u32,
        /// Wrong attempts.
        misses: u32,
        /// Longest combo in the run.
        best_combo: u32,
        /// XP earned across the run.
        earned_xp: u64,
        /// Run had no misses.
        perfect: bool,
    },
    /// Level threshold crossed.
    LevelUp {
        /// New level.
        level: u32,
        /// Title of the new level.
        title: String,
    },
}

/// One in-progress practice run through a lesson.
#[derive(Debug)]
pub struct Session {
    /// Index of the lesson in the catalog.
    pub lesson_idx: usize,
    /// Exercise visit order (shuffled when configured).
    pub order: Vec<usize>,
    /// Position within `order`.
    pub pos: usize,
    /// Detector targeting the current exercise.
    pub detector: ShortcutDetector,
    /// Attempts so far in this run.
    pub attempts: u32,
    /// Correct attempts.
    pub hits: u32,
    /// Wrong attempts.
    pub misses: u32,
    /// Current consecutive-hit combo.
    pub combo: u32,
    /// Longest combo in this run.
    pub best_combo: u32,
    /// XP earned so far in this run.
    pub earned_xp: u64,
}

impl Session {
    /// The exercise index the session currently targets.
    #[must_use]
    pub fn current_exercise(&self) -> usize {
        self.order[self.pos.min(self.order.len() - 1)]
    }
}

/// Root application state.
pub struct AppState {
    /// Lesson catalog (built-in plus user lessons).
    pub catalog: Catalog,
    /// Parsed settings.
    pub settings: Settings,
    /// Effective platform (settings override or build target).
    pub platform: Platform,
    /// XP service.
    pub xp: XpService,
    /// Streak service.
    pub streak: StreakService,
    /// Progress store.
    pub progress: ProgressStore,
    /// Audible feedback.
    pub bell: TerminalBell,
    /// Color palette.
    pub theme: Theme,
    /// Current focus.
    pub focus: Focus,
    /// Active modal, if any.
    pub modal: Modal,
    /// Active practice session, if any.
    pub session: Option<Session>,
    /// Selection state of the lesson list.
    pub lessons_list: ListState,
    /// Transient one-line notice shown in the status bar.
    pub toast: Option<String>,
    /// Queued level-ups still to be shown one modal at a time.
    pub pending_level_ups: Vec<LevelUp>,
    /// The terminal reports key releases (kitty keyboard protocol). Without
    /// it every press is judged as a complete attempt.
    pub release_events: bool,
    /// Set by handlers to stop the main loop.
    pub should_quit: bool,
}

impl AppState {
    /// Wire the state together from its already-constructed services.
    #[must_use]
    pub fn new(
        catalog: Catalog,
        settings: Settings,
        platform: Platform,
        xp: XpService,
        streak: StreakService,
        progress: ProgressStore,
        bell: TerminalBell,
    ) -> Self {
        let mut lessons_list = ListState::default();
        if !catalog.lessons.is_empty() {
            lessons_list.select(Some(0));
        }
        Self {
            catalog,
            settings,
            platform,
            xp,
            streak,
            progress,
            bell,
            theme: Theme::default(),
            focus: Focus::default(),
            modal: Modal::default(),
            session: None,
            lessons_list,
            toast: None,
            pending_level_ups: Vec::new(),
            release_events: false,
            should_quit: false,
        }
    }

    /// Detector options derived from settings.
    #[must_use]
    pub const fn detector_options(&self) -> DetectorOptions {
        DetectorOptions {
            auto_clear_on_match: self.settings.auto_clear_on_match,
            auto_clear_on_failure: self.settings.auto_clear_on_failure,
        }
    }

    /// The lesson currently highlighted in the browser.
    #[must_use]
    pub fn selected_lesson(&self) -> Option<&Lesson> {
        self.catalog.lessons.get(self.lessons_list.selected()?)
    }

    /// What: Start a practice session for a lesson.
    ///
    /// Inputs:
    /// - `lesson_idx`: Catalog index; out of range is a no-op.
    ///
    /// Output:
    /// - `true` when the session started. Exercises whose shortcut fails to
    ///   parse for the effective platform are skipped with a warning; a
    ///   lesson with no usable exercises does not start.
    pub fn start_session(&mut self, lesson_idx: usize) -> bool {
        let Some(lesson) = self.catalog.lessons.get(lesson_idx) else {
            return false;
        };
        let opts = NormalizeOptions::internal(self.platform);
        let mut order: Vec<usize> = Vec::new();
        for (i, ex) in lesson.exercises.iter().enumerate() {
            let spec = ex.shortcut.for_platform(self.platform);
            match parse_shortcut(spec, &opts) {
                Ok(_) => order.push(i),
                Err(e) => {
                    tracing::warn!(exercise = %ex.id, error = %e, "skipping exercise with unparsable shortcut");
                }
            }
        }
        if order.is_empty() {
            self.toast = Some("Lesson has no usable exercises".to_string());
            return false;
        }
        if self.settings.shuffle_exercises {
            shuffle(&mut order);
        }
        let first = lesson.exercises[order[0]]
            .shortcut
            .for_platform(self.platform);
        let expected = match parse_shortcut(first, &opts) {
            Ok(t) => t,
            Err(_) => return false,
        };
        self.session = Some(Session {
            lesson_idx,
            order,
            pos: 0,
            detector: ShortcutDetector::new(expected, self.detector_options()),
            attempts: 0,
            hits: 0,
            misses: 0,
            combo: 0,
            best_combo: 0,
            earned_xp: 0,
        });
        self.focus = Focus::Session;
        true
    }

    /// Leave the active session without finishing the lesson.
    pub fn leave_session(&mut self) {
        self.session = None;
        self.focus = Focus::Lessons;
    }

    /// Pop the next queued level-up into a modal, if one is waiting.
    pub fn surface_pending_level_up(&mut self) {
        if self.modal == Modal::None
            && let Some(up) = self.pending_level_ups.first().copied()
        {
            self.pending_level_ups.remove(0);
            self.modal = Modal::LevelUp {
                level: up.to,
                title: up.title.to_string(),
            };
        }
    }

    /// Flush every dirty service to disk.
    pub fn maybe_flush_all(&mut self) {
        self.xp.maybe_flush();
        self.streak.maybe_flush();
        self.progress.maybe_flush();
    }
}

/// Fisher-Yates shuffle over exercise indices.
fn shuffle(order: &mut [usize]) {
    use rand::Rng;
    let mut rng = rand::rng();
    for i in (1..order.len()).rev() {
        let j = rng.random_range(0..=i);
        order.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::builtin;

    fn test_state() -> AppState {
        let dir = std::env::temp_dir().join(format!(
            "keydojo_state_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("System time is before UNIX epoch")
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        AppState::new(
            Catalog {
                lessons: builtin::lessons(),
            },
            Settings::default(),
            Platform::Linux,
            XpService::new(dir.join("xp.json")),
            StreakService::new(dir.join("streak.json")),
            ProgressStore::new(dir.join("progress.json")),
            TerminalBell::new(false),
        )
    }

    /// What: Starting a session targets the first exercise of the lesson.
    ///
    /// Inputs:
    /// - The first built-in lesson, no shuffle.
    ///
    /// Output:
    /// - Session focus, position zero, detector expecting a non-empty chord.
    #[test]
    fn state_start_session_targets_first_exercise() {
        let mut st = test_state();
        assert!(st.start_session(0));
        assert_eq!(st.focus, Focus::Session);
        let session = st.session.as_ref().expect("session started");
        assert_eq!(session.pos, 0);
        assert_eq!(session.current_exercise(), session.order[0]);
        assert!(!session.detector.expected().is_empty());
    }

    /// What: Out-of-range lessons and leaving a session behave sanely.
    ///
    /// Inputs:
    /// - A bogus lesson index; then a real session left early.
    ///
    /// Output:
    /// - No session for the bogus index; leave returns focus to the browser.
    #[test]
    fn state_session_bounds_and_leave() {
        let mut st = test_state();
        assert!(!st.start_session(999));
        assert!(st.session.is_none());
        assert!(st.start_session(0));
        st.leave_session();
        assert!(st.session.is_none());
        assert_eq!(st.focus, Focus::Lessons);
    }

    /// What: Queued level-ups surface one modal at a time.
    ///
    /// Inputs:
    /// - Two queued level-ups, surfaced twice.
    ///
    /// Output:
    /// - First call shows level 2, second shows level 3, queue drains.
    #[test]
    fn state_level_ups_surface_in_order() {
        let mut st = test_state();
        st.pending_level_ups = vec![
            LevelUp {
                from: 1,
                to: 2,
                title: "Shortcut Apprentice",
            },
            LevelUp {
                from: 2,
                to: 3,
                title: "Key Combo Adept",
            },
        ];
        st.surface_pending_level_up();
        assert!(matches!(st.modal, Modal::LevelUp { level: 2, .. }));
        st.modal = Modal::None;
        st.surface_pending_level_up();
        assert!(matches!(st.modal, Modal::LevelUp { level: 3, .. }));
        assert!(st.pending_level_ups.is_empty());
    }
}
