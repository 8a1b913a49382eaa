//! Operating-system detection used to resolve per-OS shortcut variants.

/// Target platform for shortcut resolution and meta-key naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Windows: the meta key renders as `win`.
    Windows,
    /// macOS: the meta key renders as `cmd`.
    MacOs,
    /// Linux and other unixes: treated like Windows for the meta key.
    Linux,
}

impl Platform {
    /// Detect the platform the binary was compiled for.
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Linux
        }
    }

    /// Whether the meta key should be named `cmd` rather than `win`.
    #[must_use]
    pub const fn is_mac(self) -> bool {
        matches!(self, Self::MacOs)
    }

    /// Configuration key for this platform (used in `settings.conf` and `--platform`).
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::MacOs => "mac",
            Self::Linux => "linux",
        }
    }

    /// Parse a platform from a configuration value.
    ///
    /// Accepts common aliases (`macos`, `osx`, `win`); returns `None` for
    /// unrecognized input.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "windows" | "win" => Some(Self::Windows),
            "mac" | "macos" | "osx" | "darwin" => Some(Self::MacOs),
            "linux" | "unix" => Some(Self::Linux),
            _ => None,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_config_key())
    }
}

#[cfg(test)]
mod tests {
    use super::Platform;

    /// What: Config-key round trips and aliases resolve to the right platform.
    ///
    /// Inputs:
    /// - Canonical keys plus `osx`/`win` aliases and junk input.
    ///
    /// Output:
    /// - Canonical keys round-trip; aliases map; junk yields `None`.
    #[test]
    fn platform_config_key_round_trip() {
        for p in [Platform::Windows, Platform::MacOs, Platform::Linux] {
            assert_eq!(Platform::from_config_key(p.as_config_key()), Some(p));
        }
        assert_eq!(Platform::from_config_key("OSX"), Some(Platform::MacOs));
        assert_eq!(Platform::from_config_key("win"), Some(Platform::Windows));
        assert_eq!(Platform::from_config_key("amiga"), None);
    }
}
