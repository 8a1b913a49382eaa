//! Lesson and exercise catalog.
//!
//! The curriculum ships built in (see [`builtin`]) and can be extended with
//! user-authored JSON lessons dropped into the lessons directory (see
//! [`loader`]). Every shortcut in a lesson is validated against the parser
//! for every platform it targets, so malformed content is caught at load
//! time rather than mid-session.

pub mod builtin;
pub mod loader;

use thiserror::Error;

use crate::keys::{NormalizeOptions, ShortcutError, parse_shortcut};
use crate::platform::Platform;

/// A shortcut authored per platform.
///
/// Linux is optional; when absent it falls back to the Windows binding,
/// which is the common case for application shortcuts.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ShortcutDefinition {
    /// Binding on Windows, e.g. `"ctrl+p"`.
    pub windows: String,
    /// Binding on macOS, e.g. `"cmd+p"`.
    pub mac: String,
    /// Binding on Linux when it differs from Windows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linux: Option<String>,
}

impl ShortcutDefinition {
    /// The authored binding for a platform.
    #[must_use]
    pub fn for_platform(&self, platform: Platform) -> &str {
        match platform {
            Platform::Windows => &self.windows,
            Platform::MacOs => &self.mac,
            Platform::Linux => self.linux.as_deref().unwrap_or(&self.windows),
        }
    }
}

/// Relative difficulty, shown in the lesson browser.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Everyday shortcuts.
    Beginner,
    /// Less common chords.
    Intermediate,
    /// Multi-modifier and niche chords.
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beginner => write!(f, "beginner"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Advanced => write!(f, "advanced"),
        }
    }
}

/// One practice target.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Exercise {
    /// Stable id used in progress records, e.g. `"vscode.quick-open"`.
    pub id: String,
    /// Short name shown in the session view.
    pub name: String,
    /// What the shortcut does.
    pub description: String,
    /// Per-platform binding.
    pub shortcut: ShortcutDefinition,
    /// Grouping label, e.g. `"navigation"`.
    pub category: String,
    /// Difficulty tag.
    pub difficulty: Difficulty,
    /// XP for a correct attempt on top of the base reward.
    pub xp_value: u64,
}

/// An ordered group of exercises.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Lesson {
    /// Stable id used in progress records.
    pub id: String,
    /// Title shown in the browser.
    pub title: String,
    /// One-line summary.
    pub description: String,
    /// Exercises in teaching order.
    pub exercises: Vec<Exercise>,
    /// XP for finishing the lesson.
    pub xp_reward: u64,
}

/// Validation failure for authored lesson content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// A lesson declared no exercises.
    #[error("lesson '{lesson}' has no exercises")]
    EmptyLesson {
        /// Offending lesson id.
        lesson: String,
    },
    /// Two exercises in a lesson share an id.
    #[error("lesson '{lesson}' repeats exercise id '{exercise}'")]
    DuplicateExercise {
        /// Offending lesson id.
        lesson: String,
        /// Repeated exercise id.
        exercise: String,
    },
    /// A shortcut string failed to parse for some platform.
    #[error("exercise '{exercise}' has an invalid {platform} shortcut: {source}")]
    BadShortcut {
        /// Offending exercise id.
        exercise: String,
        /// Platform whose binding failed.
        platform: Platform,
        /// Underlying parse failure.
        source: ShortcutError,
    },
    /// A lesson file could not be read.
    #[error("failed to read lesson file: {0}")]
    Io(#[from] std::io::Error),
    /// A lesson file was not valid JSON.
    #[error("failed to parse lesson file: {0}")]
    Json(#[from] serde_json::Error),
}

/// What: Validate every shortcut of a lesson for every platform it targets.
///
/// Inputs:
/// - `lesson`: The lesson to check.
///
/// Output:
/// - `Ok(())` or the first [`ContentError`] found.
pub fn validate_lesson(lesson: &Lesson) -> Result<(), ContentError> {
    if lesson.exercises.is_empty() {
        return Err(ContentError::EmptyLesson {
            lesson: lesson.id.clone(),
        });
    }
    let mut seen: Vec<&str> = Vec::new();
    for ex in &lesson.exercises {
        if seen.contains(&ex.id.as_str()) {
            return Err(ContentError::DuplicateExercise {
                lesson: lesson.id.clone(),
                exercise: ex.id.clone(),
            });
        }
        seen.push(&ex.id);
        let mut targets = vec![Platform::Windows, Platform::MacOs];
        if ex.shortcut.linux.is_some() {
            targets.push(Platform::Linux);
        }
        for platform in targets {
            let spec = ex.shortcut.for_platform(platform);
            parse_shortcut(spec, &NormalizeOptions::internal(platform)).map_err(|source| {
                ContentError::BadShortcut {
                    exercise: ex.id.clone(),
                    platform,
                    source,
                }
            })?;
        }
    }
    Ok(())
}

/// The full lesson catalog: built-in curriculum plus user lessons.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Lessons in browse order (built-ins first).
    pub lessons: Vec<Lesson>,
}

impl Catalog {
    /// Built-in curriculum plus valid user lessons from `lessons_dir`.
    ///
    /// Invalid user lessons are logged and skipped; they never abort startup.
    #[must_use]
    pub fn load(lessons_dir: &std::path::Path) -> Self {
        let mut lessons = builtin::lessons();
        lessons.extend(loader::load_user_lessons(lessons_dir));
        Self { lessons }
    }

    /// Find a lesson by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }
}
