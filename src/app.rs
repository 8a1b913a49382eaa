//! Application runtime (terminal lifecycle and event loop).
//!
//! The binary entrypoint stays minimal; everything from terminal setup to
//! the final state flush lives here.

use std::time::Duration;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

use crossterm::{
    event::{
        self, Event as CEvent, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::{select, sync::mpsc};

use crate::args::Args;
use crate::audio::TerminalBell;
use crate::content::Catalog;
use crate::paths;
use crate::platform::Platform;
use crate::progress::ProgressStore;
use crate::settings::load_settings;
use crate::state::AppState;
use crate::streak::StreakService;
use crate::ui::ui;
use crate::xp::XpService;

/// Enter raw mode and the alternate screen; enable key release reporting
/// when the terminal supports the kitty keyboard protocol.
fn setup_terminal(release_events: bool) -> Result<()> {
    enable_raw_mode()?;
    execute!(std::io::stdout(), EnterAlternateScreen)?;
    if release_events {
        execute!(
            std::io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    Ok(())
}

fn restore_terminal(release_events: bool) -> Result<()> {
    if release_events {
        execute!(std::io::stdout(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(std::io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Build the application state from settings, CLI overrides, and the
/// persisted service files.
fn build_state(args: &Args) -> AppState {
    let mut settings = load_settings();
    if args.no_sound {
        settings.play_sounds = false;
    }
    let platform = args
        .platform
        .as_deref()
        .and_then(Platform::from_config_key)
        .or(settings.platform)
        .unwrap_or(Platform::detect());
    let catalog = Catalog::load(&paths::lessons_dir());
    let bell = TerminalBell::new(settings.play_sounds);
    AppState::new(
        catalog,
        settings,
        platform,
        XpService::new(paths::xp_path()),
        StreakService::new(paths::streak_path()),
        ProgressStore::new(paths::progress_path()),
        bell,
    )
}

/// What: Run the TUI until the user quits.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - `Ok(())` on normal shutdown; terminal state is restored either way the
///   loop ends.
///
/// Details:
/// - A dedicated thread polls crossterm events into a channel; a tokio task
///   ticks every 500ms to drive dirty-state flushes.
pub async fn run(args: &Args) -> Result<()> {
    let mut app = build_state(args);
    app.release_events = crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);
    tracing::info!(
        platform = app.platform.as_config_key(),
        lessons = app.catalog.lessons.len(),
        release_events = app.release_events,
        "starting session loop"
    );

    if let Some(id) = args.lesson.as_deref() {
        match app.catalog.lessons.iter().position(|l| l.id == id) {
            Some(idx) => {
                app.lessons_list.select(Some(idx));
                app.start_session(idx);
            }
            None => {
                app.toast = Some(format!("Unknown lesson '{id}'"));
                tracing::warn!(lesson = id, "unknown lesson id from command line");
            }
        }
    }

    let release_events = app.release_events;
    setup_terminal(release_events)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<CEvent>();
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<()>();

    std::thread::spawn(move || {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(50))
                && let Ok(ev) = event::read()
            {
                let _ = event_tx.send(ev);
            }
        }
    });

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(500));
        loop {
            interval.tick().await;
            if tick_tx.send(()).is_err() {
                break;
            }
        }
    });

    loop {
        let _ = terminal.draw(|f| ui(f, &mut app));

        select! {
            Some(ev) = event_rx.recv() => {
                crate::events::handle_event(&ev, &mut app);
                if app.should_quit {
                    break;
                }
            }
            Some(()) = tick_rx.recv() => {
                app.maybe_flush_all();
                if app.toast.is_some() && app.modal == crate::state::Modal::None {
                    // Toasts live for one flush interval after the next draw.
                    app.toast = None;
                }
            }
            else => {}
        }
    }

    app.maybe_flush_all();
    restore_terminal(release_events)?;
    Ok(())
}

/// Print the catalog for `--list-lessons`.
pub fn list_lessons(platform: Platform) {
    let catalog = Catalog::load(&paths::lessons_dir());
    for lesson in &catalog.lessons {
        println!("{}  {} ({} exercises)", lesson.id, lesson.title, lesson.exercises.len());
        for ex in &lesson.exercises {
            let rendered = crate::keys::format_shortcut_spec(
                ex.shortcut.for_platform(platform),
                platform,
            )
            .unwrap_or_else(|_| "<invalid>".to_string());
            println!("    {:<28} {}", ex.name, rendered);
        }
    }
}

/// Check user lesson files for `--validate`; returns process exit code.
#[must_use]
pub fn validate_lessons() -> i32 {
    let dir = paths::lessons_dir();
    let (valid, errors) = crate::content::loader::validate_dir(&dir);
    println!("{valid} valid lesson file(s) in {}", dir.display());
    if errors.is_empty() {
        return 0;
    }
    for (name, err) in &errors {
        eprintln!("{name}: {err}");
    }
    1
}

/// Wipe all persisted progress for `--reset-progress`.
pub fn reset_progress() {
    let mut xp = XpService::new(paths::xp_path());
    xp.reset();
    xp.maybe_flush();
    let mut streak = StreakService::new(paths::streak_path());
    streak.reset();
    streak.maybe_flush();
    let mut progress = ProgressStore::new(paths::progress_path());
    progress.reset();
    progress.maybe_flush();
    println!("Progress reset.");
}
