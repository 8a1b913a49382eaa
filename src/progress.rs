//! Per-exercise and per-lesson completion records.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Lifetime attempt counters for one exercise.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ExerciseStats {
    /// Attempts made (hits plus misses).
    pub attempts: u64,
    /// Correct attempts.
    pub hits: u64,
}

impl ExerciseStats {
    /// Hit rate as a 0–100 percentage; zero when never attempted.
    #[must_use]
    pub fn accuracy(&self) -> u8 {
        if self.attempts == 0 {
            return 0;
        }
        u8::try_from((self.hits * 100 / self.attempts).min(100)).unwrap_or(100)
    }
}

/// Completion record for one lesson.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct LessonProgress {
    /// Completed at least once.
    pub completed: bool,
    /// Completed at least once with no misses.
    pub perfect: bool,
    /// Total completions.
    pub times_completed: u64,
}

/// Persisted progress state keyed by exercise and lesson ids.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ProgressData {
    /// Per-exercise counters.
    #[serde(default)]
    pub exercises: HashMap<String, ExerciseStats>,
    /// Per-lesson records.
    #[serde(default)]
    pub lessons: HashMap<String, LessonProgress>,
}

/// Progress bookkeeping backed by a JSON file.
#[derive(Debug)]
pub struct ProgressStore {
    data: ProgressData,
    path: PathBuf,
    dirty: bool,
}

impl ProgressStore {
    /// Load the progress file, falling back to defaults on any failure.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        let mut data = ProgressData::default();
        match fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str::<ProgressData>(&s) {
                Ok(loaded) => data = loaded,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to parse progress file; starting fresh");
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read progress file; starting fresh");
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
    pub const fn data(&self) -> &ProgressData {
        &self.data
    }

    /// Record one attempt at an exercise.
    pub fn record_attempt(&mut self, exercise_id: &str, hit: bool) {
        let stats = self.data.exercises.entry(exercise_id.to_string()).or_default();
        stats.attempts += 1;
        if hit {
            stats.hits += 1;
        }
        self.dirty = true;
    }

    /// Record a lesson completion; `perfect` marks a run with no misses.
    pub fn record_lesson_complete(&mut self, lesson_id: &str, perfect: bool) {
        let p = self.data.lessons.entry(lesson_id.to_string()).or_default();
        p.completed = true;
        p.perfect |= perfect;
        p.times_completed += 1;
        self.dirty = true;
    }

    /// Whether a lesson has ever been completed.
    #[must_use]
    pub fn is_completed(&self, lesson_id: &str) -> bool {
        self.data.lessons.get(lesson_id).is_some_and(|p| p.completed)
    }

    /// Stats for one exercise, if ever attempted.
    #[must_use]
    pub fn exercise_stats(&self, exercise_id: &str) -> Option<&ExerciseStats> {
        self.data.exercises.get(exercise_id)
    }

    /// Lesson record, if ever touched.
    #[must_use]
    pub fn lesson_progress(&self, lesson_id: &str) -> Option<&LessonProgress> {
        self.data.lessons.get(lesson_id)
    }

    /// Persist to disk if marked dirty.
    pub fn maybe_flush(&mut self) {
        if !self.dirty {
            return;
        }
        if let Ok(s) = serde_json::to_string(&self.data) {
            match fs::write(&self.path, &s) {
                Ok(()) => {
                    tracing::debug!(path = %self.path.display(), bytes = s.len(), "[Persist] Progress persisted");
                }
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "[Persist] Failed to write progress");
                }
            }
            self.dirty = false;
        }
    }

    /// Drop all records (used by `--reset-progress`).
    pub fn reset(&mut self) {
        self.data = ProgressData::default();
        self.dirty = true;
    }
}
