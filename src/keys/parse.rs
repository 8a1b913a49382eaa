//! Shortcut string parsing.
//!
//! Splits authored specifications such as `"Ctrl + Shift + A"` into canonical
//! token lists. Token order follows the authored order (display rendering
//! honors it); match evaluation ignores order. Malformed specifications are
//! authoring errors and are rejected rather than silently tolerated.

use thiserror::Error;

use super::normalize::{NormalizeOptions, normalize_key};
use super::token::KeyToken;

/// Validation failure for an authored shortcut string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShortcutError {
    /// The specification contained no keys at all.
    #[error("shortcut '{spec}' is empty")]
    Empty {
        /// Offending specification as authored.
        spec: String,
    },
    /// A `+`-separated segment was empty (leading, trailing, or doubled `+`).
    #[error("shortcut '{spec}' has an empty key at segment {position}")]
    EmptyToken {
        /// Offending specification as authored.
        spec: String,
        /// Zero-based index of the empty segment.
        position: usize,
    },
    /// The same key appeared twice after normalization.
    #[error("shortcut '{spec}' repeats key '{token}'")]
    DuplicateToken {
        /// Offending specification as authored.
        spec: String,
        /// The repeated canonical token.
        token: String,
    },
}

/// What: Parse a shortcut specification into canonical tokens.
///
/// Inputs:
/// - `spec`: Authored string such as `"Ctrl+Shift+A"` (whitespace tolerated).
/// - `opts`: Normalization options (platform decides `cmd` vs `win`).
///
/// Output:
/// - Tokens in authored order, deduplicated, or a [`ShortcutError`] when the
///   string is empty, has an empty segment, or repeats a key.
///
/// Details:
/// - All whitespace is stripped and the string lowercased before splitting
///   on `+`, so `"ctrl + shift + a"` and `"Ctrl+Shift+A"` parse identically.
pub fn parse_shortcut(
    spec: &str,
    opts: &NormalizeOptions,
) -> Result<Vec<KeyToken>, ShortcutError> {
    let compact: String = spec
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    if compact.is_empty() {
        return Err(ShortcutError::Empty {
            spec: spec.to_string(),
        });
    }
    let mut tokens: Vec<KeyToken> = Vec::new();
    for (position, segment) in compact.split('+').enumerate() {
        if segment.is_empty() {
            return Err(ShortcutError::EmptyToken {
                spec: spec.to_string(),
                position,
            });
        }
        let token = normalize_key(segment, opts);
        if tokens.iter().any(|t| t.eq_ignore_case(&token)) {
            return Err(ShortcutError::DuplicateToken {
                spec: spec.to_string(),
                token: token.to_string(),
            });
        }
        tokens.push(token);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Platform;

    fn opts() -> NormalizeOptions {
        NormalizeOptions::internal(Platform::Linux)
    }

    /// What: Well-formed specifications parse into canonical tokens in
    /// authored order.
    ///
    /// Inputs:
    /// - Mixed-case strings with and without padding whitespace.
    ///
    /// Output:
    /// - Lowercase canonical tokens, order preserved.
    #[test]
    fn parse_preserves_authored_order() {
        let toks = parse_shortcut("Ctrl + Shift + A", &opts()).expect("valid spec");
        let texts: Vec<&str> = toks.iter().map(super::KeyToken::as_str).collect();
        assert_eq!(texts, ["ctrl", "shift", "a"]);

        let toks = parse_shortcut("Shift+Ctrl+P", &opts()).expect("valid spec");
        let texts: Vec<&str> = toks.iter().map(super::KeyToken::as_str).collect();
        assert_eq!(texts, ["shift", "ctrl", "p"]);
    }

    /// What: Meta in an authored string resolves per platform.
    ///
    /// Inputs:
    /// - `"Cmd+P"` parsed for macOS and Windows.
    ///
    /// Output:
    /// - `cmd` token on mac, `win` token elsewhere.
    #[test]
    fn parse_meta_per_platform() {
        let mac = parse_shortcut("Cmd+P", &NormalizeOptions::internal(Platform::MacOs))
            .expect("valid spec");
        assert_eq!(mac[0].as_str(), "cmd");
        let win = parse_shortcut("Cmd+P", &NormalizeOptions::internal(Platform::Windows))
            .expect("valid spec");
        assert_eq!(win[0].as_str(), "win");
    }

    /// What: Malformed specifications are rejected with positional context.
    ///
    /// Inputs:
    /// - Empty string, leading/trailing/doubled `+`, and a repeated key.
    ///
    /// Output:
    /// - The matching `ShortcutError` variant for each.
    #[test]
    fn parse_rejects_malformed_specs() {
        assert_eq!(
            parse_shortcut("", &opts()),
            Err(ShortcutError::Empty {
                spec: String::new()
            })
        );
        assert_eq!(
            parse_shortcut("+A", &opts()),
            Err(ShortcutError::EmptyToken {
                spec: "+A".to_string(),
                position: 0
            })
        );
        assert_eq!(
            parse_shortcut("Ctrl+", &opts()),
            Err(ShortcutError::EmptyToken {
                spec: "Ctrl+".to_string(),
                position: 1
            })
        );
        assert_eq!(
            parse_shortcut("Ctrl++A", &opts()),
            Err(ShortcutError::EmptyToken {
                spec: "Ctrl++A".to_string(),
                position: 1
            })
        );
        assert_eq!(
            parse_shortcut("Ctrl+Control+A", &opts()),
            Err(ShortcutError::DuplicateToken {
                spec: "Ctrl+Control+A".to_string(),
                token: "ctrl".to_string()
            })
        );
    }
}
