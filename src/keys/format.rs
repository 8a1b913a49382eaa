//! Display formatting for shortcuts.

use super::normalize::{NormalizeOptions, normalize_key};
use super::parse::{ShortcutError, parse_shortcut};
use super::token::KeyToken;
use crate::platform::Platform;

/// What: Render canonical tokens as a user-facing chord string.
///
/// Inputs:
/// - `tokens`: Canonical tokens in display order.
/// - `platform`: Platform deciding `Cmd` vs `Win`.
///
/// Output:
/// - Capitalized segments joined with `" + "`, e.g. `"Ctrl + Shift + A"`.
#[must_use]
pub fn format_shortcut(tokens: &[KeyToken], platform: Platform) -> String {
    let opts = NormalizeOptions::display(platform);
    tokens
        .iter()
        .map(|t| normalize_key(t.as_str(), &opts).to_string())
        .collect::<Vec<_>>()
        .join(" + ")
}

/// What: Re-render an authored shortcut string for display.
///
/// Inputs:
/// - `spec`: Authored string such as `"ctrl+shift+a"`.
/// - `platform`: Platform deciding `Cmd` vs `Win`.
///
/// Output:
/// - `"Ctrl + Shift + A"`, or the parser's validation error for malformed
///   input.
pub fn format_shortcut_spec(spec: &str, platform: Platform) -> Result<String, ShortcutError> {
    let tokens = parse_shortcut(spec, &NormalizeOptions::internal(platform))?;
    Ok(format_shortcut(&tokens, platform))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// What: Authored strings render capitalized with `" + "` separators.
    ///
    /// Inputs:
    /// - Lowercase and padded authored strings.
    ///
    /// Output:
    /// - Canonical display rendering, authored order preserved.
    #[test]
    fn format_capitalizes_segments() {
        assert_eq!(
            format_shortcut_spec("ctrl+shift+a", Platform::Linux).expect("valid spec"),
            "Ctrl + Shift + A"
        );
        assert_eq!(
            format_shortcut_spec("shift + ctrl + p", Platform::Linux).expect("valid spec"),
            "Shift + Ctrl + P"
        );
    }

    /// What: The meta key renders per platform.
    ///
    /// Inputs:
    /// - `"cmd+p"` formatted for macOS and Windows.
    ///
    /// Output:
    /// - `Cmd + P` on mac, `Win + P` on Windows.
    #[test]
    fn format_meta_per_platform() {
        assert_eq!(
            format_shortcut_spec("cmd+p", Platform::MacOs).expect("valid spec"),
            "Cmd + P"
        );
        assert_eq!(
            format_shortcut_spec("cmd+p", Platform::Windows).expect("valid spec"),
            "Win + P"
        );
    }

    /// What: Malformed specs propagate the parser's validation error.
    ///
    /// Inputs:
    /// - A trailing `+`.
    ///
    /// Output:
    /// - `Err(ShortcutError::EmptyToken)`.
    #[test]
    fn format_propagates_validation_errors() {
        assert!(matches!(
            format_shortcut_spec("ctrl+", Platform::Linux),
            Err(ShortcutError::EmptyToken { .. })
        ));
    }
}
