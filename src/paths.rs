//! Filesystem locations for Keydojo's configuration, state, and logs.
//!
//! All state lives under the user's config directory
//! (`~/.config/keydojo` by default, honoring `XDG_CONFIG_HOME`), mirroring
//! the single-directory layout used for settings, lessons, and logs.

use std::env;
use std::path::{Path, PathBuf};

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Return `$HOME/.config/keydojo`, ensuring it exists.
///
/// Inputs: none
///
/// Output: `Some(PathBuf)` when HOME is set and the directory can be created; `None` otherwise.
fn home_config_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        let dir = Path::new(&home).join(".config").join("keydojo");
        if std::fs::create_dir_all(&dir).is_ok() {
            return Some(dir);
        }
    }
    None
}

/// Config directory for Keydojo (ensured to exist).
#[must_use]
pub fn config_dir() -> PathBuf {
    // Prefer HOME ~/.config/keydojo first
    if let Some(dir) = home_config_dir() {
        return dir;
    }
    // Fallback: use XDG_CONFIG_HOME (or default to ~/.config) and ensure
    let base = xdg_base_dir("XDG_CONFIG_HOME", &[".config"]);
    let dir = base.join("keydojo");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Logs directory under config: `~/.config/keydojo/logs` (ensured to exist).
#[must_use]
pub fn logs_dir() -> PathBuf {
    let base = config_dir();
    let dir = base.join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// User lesson directory under config: `~/.config/keydojo/lessons` (ensured to exist).
#[must_use]
pub fn lessons_dir() -> PathBuf {
    let base = config_dir();
    let dir = base.join("lessons");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Path of the persisted XP ledger.
#[must_use]
pub fn xp_path() -> PathBuf {
    config_dir().join("xp.json")
}

/// Path of the persisted practice streak.
#[must_use]
pub fn streak_path() -> PathBuf {
    config_dir().join("streak.json")
}

/// Path of the persisted lesson progress.
#[must_use]
pub fn progress_path() -> PathBuf {
    config_dir().join("progress.json")
}

/// Path of the optional `settings.conf` file, if present.
#[must_use]
pub fn settings_config_path() -> Option<PathBuf> {
    let home = env::var("HOME").ok();
    let xdg_config = env::var("XDG_CONFIG_HOME").ok();
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(h) = home.as_deref() {
        let base = Path::new(h).join(".config").join("keydojo");
        candidates.push(base.join("settings.conf"));
    }
    if let Some(xdg) = xdg_config.as_deref() {
        let x = Path::new(xdg).join("keydojo");
        candidates.push(x.join("settings.conf"));
    }
    candidates.into_iter().find(|p| p.is_file())
}
