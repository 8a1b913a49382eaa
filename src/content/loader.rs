//! User lesson loading.
//!
//! Any `*.json` file in the lessons directory is parsed as a [`Lesson`] and
//! validated. At startup invalid files are logged and skipped so a typo in
//! one lesson never takes the app down; `--validate` instead reports every
//! problem and is meant for lesson authors.

use std::fs;
use std::path::Path;

use super::{ContentError, Lesson, validate_lesson};

/// Read and validate one lesson file.
pub fn load_lesson_file(path: &Path) -> Result<Lesson, ContentError> {
    let text = fs::read_to_string(path)?;
    let lesson: Lesson = serde_json::from_str(&text)?;
    validate_lesson(&lesson)?;
    Ok(lesson)
}

/// What: Load all valid user lessons from a directory.
///
/// Inputs:
/// - `dir`: Lessons directory; missing directories yield no lessons.
///
/// Output:
/// - Valid lessons sorted by file name; invalid files are logged and
///   skipped.
#[must_use]
pub fn load_user_lessons(dir: &Path) -> Vec<Lesson> {
    let mut paths: Vec<_> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect(),
        Err(_) => return Vec::new(),
    };
    paths.sort();
    let mut lessons = Vec::new();
    for path in paths {
        match load_lesson_file(&path) {
            Ok(lesson) => {
                tracing::info!(path = %path.display(), id = %lesson.id, "loaded user lesson");
                lessons.push(lesson);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping invalid lesson file");
            }
        }
    }
    lessons
}

/// What: Check every lesson file in a directory and report all problems.
///
/// Inputs:
/// - `dir`: Lessons directory.
///
/// Output:
/// - `(valid_count, errors)` where each error pairs the file name with the
///   failure. Used by `--validate`.
#[must_use]
pub fn validate_dir(dir: &Path) -> (usize, Vec<(String, ContentError)>) {
    let mut valid = 0usize;
    let mut errors = Vec::new();
    let Ok(entries) = fs::read_dir(dir) else {
        return (0, errors);
    };
    let mut paths: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match load_lesson_file(&path) {
            Ok(_) => valid += 1,
            Err(e) => errors.push((name, e)),
        }
    }
    (valid, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "keydojo_lessons_{tag}_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("System time is before UNIX epoch")
                .as_nanos()
        ));
        fs::create_dir_all(&dir).expect("create temp lessons dir");
        dir
    }

    const VALID_LESSON: &str = r#"{
        "id": "custom-1",
        "title": "Custom",
        "description": "",
        "xp_reward": 50,
        "exercises": [{
            "id": "custom.copy",
            "name": "Copy",
            "description": "",
            "shortcut": {"windows": "ctrl+c", "mac": "cmd+c"},
            "category": "editing",
            "difficulty": "beginner",
            "xp_value": 5
        }]
    }"#;

    /// What: Valid files load; invalid files are skipped, not fatal.
    ///
    /// Inputs:
    /// - A directory with one valid lesson, one bad-shortcut lesson, one
    ///   non-JSON file, and one non-lesson file.
    ///
    /// Output:
    /// - Exactly the valid lesson is returned.
    #[test]
    fn loader_skips_invalid_files() {
        let dir = temp_dir("skip");
        fs::write(dir.join("a_good.json"), VALID_LESSON).expect("write");
        fs::write(
            dir.join("b_bad.json"),
            VALID_LESSON.replace("ctrl+c", "ctrl+"),
        )
        .expect("write");
        fs::write(dir.join("c_not_json.json"), "not json").expect("write");
        fs::write(dir.join("readme.txt"), "ignored").expect("write");

        let lessons = load_user_lessons(&dir);
        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].id, "custom-1");
        let _ = fs::remove_dir_all(dir);
    }

    /// What: Validation mode reports every failing file.
    ///
    /// Inputs:
    /// - The same mixed directory.
    ///
    /// Output:
    /// - One valid, two errors, names attached.
    #[test]
    fn loader_validate_dir_reports_all_errors() {
        let dir = temp_dir("validate");
        fs::write(dir.join("a_good.json"), VALID_LESSON).expect("write");
        fs::write(
            dir.join("b_bad.json"),
            VALID_LESSON.replace("ctrl+c", "ctrl+"),
        )
        .expect("write");
        fs::write(dir.join("c_not_json.json"), "not json").expect("write");

        let (valid, errors) = validate_dir(&dir);
        assert_eq!(valid, 1);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].0, "b_bad.json");
        assert_eq!(errors[1].0, "c_not_json.json");
        let _ = fs::remove_dir_all(dir);
    }

    /// What: A missing directory yields no lessons and no errors.
    ///
    /// Inputs:
    /// - A path that does not exist.
    ///
    /// Output:
    /// - Empty results from both entry points.
    #[test]
    fn loader_missing_dir_is_empty() {
        let missing = std::env::temp_dir().join("keydojo_lessons_definitely_missing");
        assert!(load_user_lessons(&missing).is_empty());
        let (valid, errors) = validate_dir(&missing);
        assert_eq!(valid, 0);
        assert!(errors.is_empty());
    }
}
