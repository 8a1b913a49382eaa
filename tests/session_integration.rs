//! Session-level integration: terminal key events driving a practice run
//! against real service files on disk.

use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyModifiers};

use keydojo::audio::TerminalBell;
use keydojo::content::{Catalog, builtin};
use keydojo::events::handle_event;
use keydojo::platform::Platform;
use keydojo::progress::ProgressStore;
use keydojo::settings::Settings;
use keydojo::state::{AppState, Modal};
use keydojo::streak::StreakService;
use keydojo::xp::XpService;

fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn state_in(dir: &std::path::Path) -> AppState {
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

fn press(code: KeyCode, mods: KeyModifiers) -> CEvent {
    CEvent::Key(KeyEvent::new(code, mods))
}

/// What: A complete lesson run persists XP, progress, and streak, and a
/// fresh process sees all of it.
///
/// Inputs:
/// - Every chord of the first built-in lesson keyed in, state flushed, then
///   reloaded from the same directory.
///
/// Output:
/// - The reloaded services report the completed lesson, the earned XP, and
///   a one-day streak.
#[test]
fn completed_lesson_survives_restart() {
    let dir = temp_dir();
    let earned;
    {
        let mut st = state_in(dir.path());
        assert!(st.start_session(0));
        let chords = [
            (KeyCode::Char('p'), KeyModifiers::CONTROL),
            (
                KeyCode::Char('p'),
                KeyModifiers::CONTROL | KeyModifiers::SHIFT,
            ),
            (KeyCode::Char('g'), KeyModifiers::CONTROL),
            (
                KeyCode::Char('o'),
                KeyModifiers::CONTROL | KeyModifiers::SHIFT,
            ),
            (KeyCode::Char('b'), KeyModifiers::CONTROL),
        ];
        for (code, mods) in chords {
            handle_event(&press(code, mods), &mut st);
        }
        assert!(matches!(st.modal, Modal::Summary { .. }));
        earned = st.xp.total_xp();
        assert!(earned > 0);
        st.maybe_flush_all();
    }

    let st = state_in(dir.path());
    assert_eq!(st.xp.total_xp(), earned);
    assert!(st.progress.is_completed("vscode-navigation"));
    assert_eq!(st.streak.current(), 1);
}

/// What: Wrong attempts are persisted per exercise with accuracy intact.
///
/// Inputs:
/// - One miss then one hit on the first exercise, flushed and reloaded.
///
/// Output:
/// - Two attempts, one hit recorded for that exercise id.
#[test]
fn attempt_stats_persist_per_exercise() {
    let dir = temp_dir();
    {
        let mut st = state_in(dir.path());
        assert!(st.start_session(0));
        handle_event(&press(KeyCode::Char('z'), KeyModifiers::CONTROL), &mut st);
        handle_event(&press(KeyCode::Char('p'), KeyModifiers::CONTROL), &mut st);
        st.maybe_flush_all();
    }
    let st = state_in(dir.path());
    let stats = st
        .progress
        .exercise_stats("vscode.quick-open")
        .expect("stats recorded");
    assert_eq!(stats.attempts, 2);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.accuracy(), 50);
}

/// What: User lessons from disk join the catalog behind the built-ins.
///
/// Inputs:
/// - A valid user lesson JSON written to a lessons directory.
///
/// Output:
/// - The catalog contains the built-ins plus the user lesson, findable by
///   id.
#[test]
fn user_lessons_extend_catalog() {
    let dir = temp_dir();
    let lesson = r#"{
        "id": "my-custom",
        "title": "My Custom",
        "description": "",
        "xp_reward": 50,
        "exercises": [{
            "id": "custom.save",
            "name": "Save",
            "description": "",
            "shortcut": {"windows": "ctrl+s", "mac": "cmd+s"},
            "category": "editing",
            "difficulty": "beginner",
            "xp_value": 5
        }]
    }"#;
    std::fs::write(dir.path().join("custom.json"), lesson).expect("write lesson");
    let catalog = Catalog::load(dir.path());
    assert_eq!(catalog.lessons.len(), builtin::lessons().len() + 1);
    assert!(catalog.find("my-custom").is_some());
}
