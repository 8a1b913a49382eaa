//! Key name normalization.
//!
//! Maps raw key names as produced by terminal key events or authored
//! shortcut strings onto the canonical token set. The mapping is a fixed
//! substitution table; unknown keys pass through lowercased rather than
//! erroring, so normalization is total over arbitrary input.

use super::token::KeyToken;
use crate::platform::Platform;

/// Output format for normalized keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyFormat {
    /// Canonical lowercase tokens for comparison and matching.
    #[default]
    Internal,
    /// Capitalized tokens for user-facing rendering (`Ctrl`, `Esc`, `A`).
    Display,
}

/// Options controlling [`normalize_key`].
#[derive(Debug, Clone, Copy)]
pub struct NormalizeOptions {
    /// Platform deciding how the meta key is named (`cmd` vs `win`).
    pub platform: Platform,
    /// Output format.
    pub format: KeyFormat,
    /// Force lowercase output; defaults to `format == Internal` when `None`.
    pub lowercase: Option<bool>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            platform: Platform::detect(),
            format: KeyFormat::Internal,
            lowercase: None,
        }
    }
}

impl NormalizeOptions {
    /// Options for canonical internal tokens on the given platform.
    #[must_use]
    pub const fn internal(platform: Platform) -> Self {
        Self {
            platform,
            format: KeyFormat::Internal,
            lowercase: None,
        }
    }

    /// Options for display-format tokens on the given platform.
    #[must_use]
    pub const fn display(platform: Platform) -> Self {
        Self {
            platform,
            format: KeyFormat::Display,
            lowercase: None,
        }
    }
}

/// What: Normalize a raw key name into a canonical [`KeyToken`].
///
/// Inputs:
/// - `raw`: Any key name from a key event or an authored shortcut string.
/// - `opts`: Platform, output format, and lowercase override.
///
/// Output:
/// - The canonical token; never fails. Unknown keys pass through lowercased
///   (Display format capitalizes single characters only).
///
/// Details:
/// - The substitution table folds aliases: `Control`/`ctrl` → `ctrl`,
///   `Option`/`⌥` → `alt`, `Meta`/`Command`/`Super`/`Win` → `cmd` on macOS
///   and `win` elsewhere, `Escape` → `esc`, `Return` → `enter`, `" "` →
///   `space`, `ArrowUp` → `up`, and so on.
/// - Idempotent: normalizing an already-canonical token is a no-op.
#[must_use]
pub fn normalize_key(raw: &str, opts: &NormalizeOptions) -> KeyToken {
    let display = opts.format == KeyFormat::Display;
    let lower = raw.to_lowercase();
    let mapped: String = match lower.as_str() {
        "control" | "ctrl" => pick(display, "Ctrl", "ctrl"),
        "alt" | "option" | "⌥" => pick(display, "Alt", "alt"),
        "shift" | "⇧" => pick(display, "Shift", "shift"),
        "meta" | "command" | "cmd" | "⌘" | "super" | "win" | "windows" => {
            if opts.platform.is_mac() {
                pick(display, "Cmd", "cmd")
            } else {
                pick(display, "Win", "win")
            }
        }
        "escape" | "esc" => pick(display, "Esc", "esc"),
        "enter" | "return" => pick(display, "Enter", "enter"),
        "space" | " " => pick(display, "Space", "space"),
        "arrowup" | "up" => pick(display, "Up", "up"),
        "arrowdown" | "down" => pick(display, "Down", "down"),
        "arrowleft" | "left" => pick(display, "Left", "left"),
        "arrowright" | "right" => pick(display, "Right", "right"),
        "tab" => pick(display, "Tab", "tab"),
        "backspace" => pick(display, "Backspace", "backspace"),
        "delete" | "del" => pick(display, "Del", "del"),
        "home" => pick(display, "Home", "home"),
        "end" => pick(display, "End", "end"),
        "pageup" | "pgup" => pick(display, "PgUp", "pgup"),
        "pagedown" | "pgdn" => pick(display, "PgDn", "pgdn"),
        other => {
            // Single printable characters are capitalized in Display format;
            // everything else passes through lowercased.
            let mut chars = other.chars();
            if display
                && let (Some(ch), None) = (chars.next(), chars.next())
            {
                ch.to_uppercase().to_string()
            } else {
                other.to_string()
            }
        }
    };
    let force_lower = opts.lowercase.unwrap_or(!display);
    if force_lower {
        KeyToken::new(mapped.to_lowercase())
    } else {
        KeyToken::new(mapped)
    }
}

/// Choose the display or internal spelling of a table entry.
fn pick(display: bool, display_form: &str, internal_form: &str) -> String {
    if display {
        display_form.to_string()
    } else {
        internal_form.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn internal(platform: Platform) -> NormalizeOptions {
        NormalizeOptions::internal(platform)
    }

    /// What: The substitution table folds aliases onto canonical tokens.
    ///
    /// Inputs:
    /// - Alias spellings for modifiers, arrows, and whitespace keys.
    ///
    /// Output:
    /// - Canonical lowercase tokens.
    #[test]
    fn normalize_alias_table() {
        let opts = internal(Platform::Linux);
        for (raw, want) in [
            ("Control", "ctrl"),
            ("ctrl", "ctrl"),
            ("Option", "alt"),
            ("⌥", "alt"),
            ("⇧", "shift"),
            ("Escape", "esc"),
            ("Return", "enter"),
            (" ", "space"),
            ("Space", "space"),
            ("ArrowUp", "up"),
            ("ArrowDown", "down"),
            ("ArrowLeft", "left"),
            ("ArrowRight", "right"),
            ("Delete", "del"),
            ("PageDown", "pgdn"),
        ] {
            assert_eq!(normalize_key(raw, &opts).as_str(), want, "raw={raw}");
        }
    }

    /// What: The meta key resolves per platform.
    ///
    /// Inputs:
    /// - `Meta`, `Command`, `Super`, and `Windows` on mac and non-mac.
    ///
    /// Output:
    /// - `cmd` on macOS; `win` on Windows and Linux.
    #[test]
    fn normalize_meta_is_platform_aware() {
        let mac = internal(Platform::MacOs);
        let win = internal(Platform::Windows);
        let linux = internal(Platform::Linux);
        for raw in ["Meta", "Command", "cmd", "Super", "Win", "Windows", "⌘"] {
            assert_eq!(normalize_key(raw, &mac).as_str(), "cmd", "raw={raw}");
            assert_eq!(normalize_key(raw, &win).as_str(), "win", "raw={raw}");
            assert_eq!(normalize_key(raw, &linux).as_str(), "win", "raw={raw}");
        }
    }

    /// What: Unknown keys pass through lowercased instead of erroring.
    ///
    /// Inputs:
    /// - Multi-character names the table does not know.
    ///
    /// Output:
    /// - Lowercased passthrough tokens.
    #[test]
    fn normalize_unknown_passthrough() {
        let opts = internal(Platform::Linux);
        assert_eq!(normalize_key("F5", &opts).as_str(), "f5");
        assert_eq!(normalize_key("MediaPlay", &opts).as_str(), "mediaplay");
        assert_eq!(normalize_key("A", &opts).as_str(), "a");
    }

    /// What: Normalization is idempotent.
    ///
    /// Inputs:
    /// - A spread of raw names, normalized twice with the same options.
    ///
    /// Output:
    /// - Second pass leaves the token unchanged, in both formats.
    #[test]
    fn normalize_is_idempotent() {
        for raw in ["Control", "Meta", "ArrowUp", " ", "a", "F5", "Escape"] {
            for opts in [
                internal(Platform::MacOs),
                internal(Platform::Windows),
                NormalizeOptions::display(Platform::MacOs),
            ] {
                let once = normalize_key(raw, &opts);
                let twice = normalize_key(once.as_str(), &opts);
                assert_eq!(once, twice, "raw={raw}");
            }
        }
    }

    /// What: Display format capitalizes tokens for rendering.
    ///
    /// Inputs:
    /// - Modifiers and single characters with Display options.
    ///
    /// Output:
    /// - Capitalized spellings; `lowercase: Some(true)` overrides back down.
    #[test]
    fn normalize_display_format() {
        let opts = NormalizeOptions::display(Platform::MacOs);
        assert_eq!(normalize_key("control", &opts).as_str(), "Ctrl");
        assert_eq!(normalize_key("meta", &opts).as_str(), "Cmd");
        assert_eq!(normalize_key("a", &opts).as_str(), "A");
        assert_eq!(normalize_key("escape", &opts).as_str(), "Esc");
        let forced = NormalizeOptions {
            lowercase: Some(true),
            ..NormalizeOptions::display(Platform::MacOs)
        };
        assert_eq!(normalize_key("control", &forced).as_str(), "ctrl");
    }
}
