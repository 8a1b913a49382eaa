use std::fmt;

/// Canonical identifier for one key or modifier (e.g. `ctrl`, `cmd`, `esc`,
/// `a`).
///
/// Tokens are produced by [`super::normalize_key`] and compared
/// case-insensitively everywhere; they are derived values and never
/// persisted.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyToken(String);

impl KeyToken {
    /// Wrap an already-normalized string. Crate-internal: the normalizer is
    /// the only public constructor.
    pub(crate) fn new(s: String) -> Self {
        Self(s)
    }

    /// Borrow the canonical text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive equality, the comparison used by match evaluation.
    #[must_use]
    pub fn eq_ignore_case(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// Whether this token names a modifier key (ctrl, alt, shift, cmd, win).
    #[must_use]
    pub fn is_modifier(&self) -> bool {
        matches!(
            self.0.to_ascii_lowercase().as_str(),
            "ctrl" | "alt" | "shift" | "cmd" | "win"
        )
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for KeyToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use crate::keys::{NormalizeOptions, normalize_key};

    /// What: Modifier classification recognizes all five canonical modifiers.
    ///
    /// Inputs:
    /// - Raw names normalized on a non-mac platform.
    ///
    /// Output:
    /// - Modifiers report true, printable keys false.
    #[test]
    fn token_modifier_classification() {
        let opts = NormalizeOptions::internal(crate::platform::Platform::Linux);
        for raw in ["Control", "Alt", "Shift", "Meta"] {
            assert!(normalize_key(raw, &opts).is_modifier(), "{raw}");
        }
        assert!(!normalize_key("a", &opts).is_modifier());
        assert!(!normalize_key("Escape", &opts).is_modifier());
    }
}
