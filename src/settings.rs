//! Application settings and chrome key bindings.
//!
//! Settings live in `~/.config/keydojo/settings.conf` as `key = value` lines.
//! The keymap here is for the application chrome only (browsing lessons,
//! quitting, opening help); keys pressed inside a practice session go to the
//! detection engine instead and are never rebindable.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::platform::Platform;
use crate::util::{parse_bool, parse_key_value, skip_comment_or_empty};

/// A single chrome keyboard chord (modifiers + key).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// Key code.
    pub code: KeyCode,
    /// Modifier set.
    pub mods: KeyModifiers,
}

impl KeyChord {
    /// Short display label such as `"Ctrl+Q"` or `"F1"` for the help overlay.
    #[must_use]
    pub fn label(&self) -> String {
        let mut parts: Vec<&'static str> = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl");
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt");
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift");
        }
        let key = match self.code {
            KeyCode::Char(ch) => {
                let up = ch.to_ascii_uppercase();
                if up == ' ' {
                    "Space".to_string()
                } else {
                    up.to_string()
                }
            }
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => "?".to_string(),
        };
        if parts.is_empty() {
            key
        } else {
            format!("{}+{}", parts.join("+"), key)
        }
    }
}

/// What: Parse a single key identifier (e.g., "F1", "Esc", "q") into a [`KeyCode`].
///
/// Inputs:
/// - `s`: Raw key token from a configuration string.
///
/// Output:
/// - `Some(KeyCode)` on success; `None` when the token is unsupported.
pub(crate) fn parse_key_identifier(s: &str) -> Option<KeyCode> {
    let t = s.trim();
    if let Some(num) = t.strip_prefix('F').and_then(|x| x.parse::<u8>().ok()) {
        return Some(KeyCode::F(num));
    }
    match t.to_ascii_uppercase().as_str() {
        "ESC" => Some(KeyCode::Esc),
        "ENTER" | "RETURN" => Some(KeyCode::Enter),
        "TAB" => Some(KeyCode::Tab),
        "UP" | "ARROWUP" => Some(KeyCode::Up),
        "DOWN" | "ARROWDOWN" => Some(KeyCode::Down),
        "LEFT" | "ARROWLEFT" => Some(KeyCode::Left),
        "RIGHT" | "ARROWRIGHT" => Some(KeyCode::Right),
        "SPACE" => Some(KeyCode::Char(' ')),
        _ => {
            let mut chars = t.chars();
            if let (Some(ch), None) = (chars.next(), chars.next()) {
                Some(KeyCode::Char(ch.to_ascii_lowercase()))
            } else {
                None
            }
        }
    }
}

/// What: Parse a full chord such as "Ctrl+Q" or "F1" into a [`KeyChord`].
///
/// Inputs:
/// - `spec`: String combining optional modifiers with one key token.
///
/// Output:
/// - `Some(KeyChord)` when parsing succeeds; `None` otherwise.
pub(crate) fn parse_key_chord(spec: &str) -> Option<KeyChord> {
    let mut mods = KeyModifiers::empty();
    let mut key_part: Option<String> = None;
    for part in spec.split('+') {
        let p = part.trim();
        if p.is_empty() {
            continue;
        }
        match p.to_ascii_uppercase().as_str() {
            "CTRL" | "CONTROL" => mods |= KeyModifiers::CONTROL,
            "ALT" => mods |= KeyModifiers::ALT,
            "SHIFT" => mods |= KeyModifiers::SHIFT,
            other => {
                key_part = Some(other.to_string());
            }
        }
    }
    let code = parse_key_identifier(key_part.as_deref().unwrap_or(""))?;
    Some(KeyChord { code, mods })
}

/// Configurable chrome key bindings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMap {
    /// Open/close the help overlay.
    pub help_overlay: Vec<KeyChord>,
    /// Quit the application.
    pub quit: Vec<KeyChord>,
    /// Move up in the lesson browser.
    pub lessons_move_up: Vec<KeyChord>,
    /// Move down in the lesson browser.
    pub lessons_move_down: Vec<KeyChord>,
    /// Start the highlighted lesson.
    pub lessons_start: Vec<KeyChord>,
    /// Leave an active practice session.
    pub session_leave: Vec<KeyChord>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let ch = |code, mods| KeyChord { code, mods };
        Self {
            help_overlay: vec![ch(KeyCode::F(1), KeyModifiers::empty())],
            quit: vec![ch(KeyCode::Char('q'), KeyModifiers::CONTROL)],
            lessons_move_up: vec![
                ch(KeyCode::Up, KeyModifiers::empty()),
                ch(KeyCode::Char('k'), KeyModifiers::empty()),
            ],
            lessons_move_down: vec![
                ch(KeyCode::Down, KeyModifiers::empty()),
                ch(KeyCode::Char('j'), KeyModifiers::empty()),
            ],
            lessons_start: vec![ch(KeyCode::Enter, KeyModifiers::empty())],
            session_leave: vec![ch(KeyCode::Esc, KeyModifiers::empty())],
        }
    }
}

/// Application settings parsed from `settings.conf`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Audible feedback on verdicts.
    pub play_sounds: bool,
    /// Reset the detector automatically after a match.
    pub auto_clear_on_match: bool,
    /// Reset the detector automatically after a mismatch.
    pub auto_clear_on_failure: bool,
    /// Platform override; `None` means detect from the build target.
    pub platform: Option<Platform>,
    /// Shuffle exercise order within a lesson.
    pub shuffle_exercises: bool,
    /// Chrome key bindings.
    pub keymap: KeyMap,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            play_sounds: true,
            auto_clear_on_match: true,
            auto_clear_on_failure: false,
            platform: None,
            shuffle_exercises: false,
            keymap: KeyMap::default(),
        }
    }
}

/// Replace a binding list with a parsed chord, keeping it on parse failure.
fn assign_keybind(chord: Option<KeyChord>, target: &mut Vec<KeyChord>) {
    if let Some(ch) = chord {
        *target = vec![ch];
    }
}

/// Apply one normalized `key = value` pair to the settings.
fn apply_setting(settings: &mut Settings, key: &str, value: &str) {
    match key {
        "play_sounds" | "sounds" => {
            if let Some(b) = parse_bool(value) {
                settings.play_sounds = b;
            }
        }
        "auto_clear_on_match" => {
            if let Some(b) = parse_bool(value) {
                settings.auto_clear_on_match = b;
            }
        }
        "auto_clear_on_failure" => {
            if let Some(b) = parse_bool(value) {
                settings.auto_clear_on_failure = b;
            }
        }
        "shuffle_exercises" | "shuffle" => {
            if let Some(b) = parse_bool(value) {
                settings.shuffle_exercises = b;
            }
        }
        "platform" => match Platform::from_config_key(value) {
            Some(p) => settings.platform = Some(p),
            None => {
                tracing::warn!(value, "unknown platform in settings; ignoring");
            }
        },
        "keybind_help" | "keybind_help_overlay" => {
            assign_keybind(parse_key_chord(value), &mut settings.keymap.help_overlay);
        }
        "keybind_quit" | "keybind_exit" => {
            assign_keybind(parse_key_chord(value), &mut settings.keymap.quit);
        }
        "keybind_lessons_move_up" => {
            assign_keybind(parse_key_chord(value), &mut settings.keymap.lessons_move_up);
        }
        "keybind_lessons_move_down" => {
            assign_keybind(
                parse_key_chord(value),
                &mut settings.keymap.lessons_move_down,
            );
        }
        "keybind_lessons_start" => {
            assign_keybind(parse_key_chord(value), &mut settings.keymap.lessons_start);
        }
        "keybind_session_leave" => {
            assign_keybind(parse_key_chord(value), &mut settings.keymap.session_leave);
        }
        _ => {
            tracing::debug!(key, "unknown settings key; ignoring");
        }
    }
}

/// What: Parse settings file content over the defaults.
///
/// Inputs:
/// - `content`: Full text of `settings.conf`.
///
/// Output:
/// - Settings with every recognized `key = value` line applied; unknown keys
///   and unparsable values are logged and skipped.
#[must_use]
pub fn parse_settings(content: &str) -> Settings {
    let mut settings = Settings::default();
    for line in content.lines() {
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((raw_key, value)) = parse_key_value(line) else {
            continue;
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        apply_setting(&mut settings, &key, value.trim());
    }
    settings
}

/// Load settings from the resolved config path, defaulting when absent.
#[must_use]
pub fn load_settings() -> Settings {
    match crate::paths::settings_config_path() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(content) => parse_settings(&content),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read settings; using defaults");
                Settings::default()
            }
        },
        None => Settings::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// What: Recognized keys override defaults; junk lines are skipped.
    ///
    /// Inputs:
    /// - A config body with comments, booleans, a platform override, and an
    ///   unknown key.
    ///
    /// Output:
    /// - Overridden fields change; everything else keeps its default.
    #[test]
    fn settings_parse_overrides_defaults() {
        let content = r"
# feedback
play_sounds = off
auto_clear_on_failure = yes
platform = macos
shuffle_exercises = true
not_a_real_key = 42
broken line without equals
";
        let s = parse_settings(content);
        assert!(!s.play_sounds);
        assert!(s.auto_clear_on_failure);
        assert!(s.auto_clear_on_match);
        assert!(s.shuffle_exercises);
        assert_eq!(s.platform, Some(Platform::MacOs));
        assert_eq!(s.keymap, KeyMap::default());
    }

    /// What: Keybind lines rebind chrome chords; bad chords keep defaults.
    ///
    /// Inputs:
    /// - A quit rebind to `Ctrl+X`, a help rebind with dotted key syntax,
    ///   and an unparsable chord.
    ///
    /// Output:
    /// - Quit and help change; session leave keeps its default.
    #[test]
    fn settings_parse_keybinds() {
        let content = r"
keybind_quit = Ctrl+X
keybind.help = F2
keybind_session_leave = NotAKey99
";
        let s = parse_settings(content);
        assert_eq!(
            s.keymap.quit,
            vec![KeyChord {
                code: KeyCode::Char('x'),
                mods: KeyModifiers::CONTROL
            }]
        );
        assert_eq!(
            s.keymap.help_overlay,
            vec![KeyChord {
                code: KeyCode::F(2),
                mods: KeyModifiers::empty()
            }]
        );
        assert_eq!(s.keymap.session_leave, KeyMap::default().session_leave);
    }

    /// What: Chord parsing handles modifiers, function keys, and labels.
    ///
    /// Inputs:
    /// - `Ctrl+Q`, `F1`, and `Shift+Enter` specs.
    ///
    /// Output:
    /// - Matching code/modifier pairs and display labels.
    #[test]
    fn settings_chord_parse_and_label() {
        let q = parse_key_chord("Ctrl+Q").expect("valid chord");
        assert_eq!(q.code, KeyCode::Char('q'));
        assert!(q.mods.contains(KeyModifiers::CONTROL));
        assert_eq!(q.label(), "Ctrl+Q");

        let f1 = parse_key_chord("F1").expect("valid chord");
        assert_eq!(f1.code, KeyCode::F(1));
        assert_eq!(f1.label(), "F1");

        let se = parse_key_chord("Shift+Enter").expect("valid chord");
        assert_eq!(se.code, KeyCode::Enter);
        assert!(se.mods.contains(KeyModifiers::SHIFT));
        assert!(parse_key_chord("").is_none());
    }
}
