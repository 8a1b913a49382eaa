//! Command-line argument definition and processing.

use clap::Parser;

/// Keydojo - a terminal trainer for keyboard shortcuts
#[derive(Parser, Debug)]
#[command(name = "keydojo")]
#[command(version)]
#[command(about = "A terminal trainer for keyboard shortcuts", long_about = None)]
pub struct Args {
    /// Override the platform keymap (windows, macos, linux)
    #[arg(long)]
    pub platform: Option<String>,

    /// Jump straight into a lesson by id
    #[arg(short, long)]
    pub lesson: Option<String>,

    /// List all lessons and exit
    #[arg(long)]
    pub list_lessons: bool,

    /// Validate user lesson files and exit
    #[arg(long)]
    pub validate: bool,

    /// Reset all XP, streak, and progress data and exit
    #[arg(long)]
    pub reset_progress: bool,

    /// Disable audible feedback for this run
    #[arg(long)]
    pub no_sound: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Effective log level, with `--verbose` taking precedence.
    #[must_use]
    pub fn effective_log_level(&self) -> &str {
        if self.verbose { "debug" } else { &self.log_level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// What: Defaults parse and `--verbose` wins over `--log-level`.
    ///
    /// Inputs:
    /// - No arguments; then `--log-level warn --verbose`.
    ///
    /// Output:
    /// - Default level `info`; verbose forces `debug`.
    #[test]
    fn args_log_level_precedence() {
        let args = Args::parse_from(["keydojo"]);
        assert_eq!(args.effective_log_level(), "info");
        let args = Args::parse_from(["keydojo", "--log-level", "warn", "--verbose"]);
        assert_eq!(args.effective_log_level(), "debug");
    }

    /// What: Mode flags and options parse together.
    ///
    /// Inputs:
    /// - A lesson id, a platform override, and `--no-sound`.
    ///
    /// Output:
    /// - All fields populated.
    #[test]
    fn args_mode_flags() {
        let args = Args::parse_from([
            "keydojo",
            "--lesson",
            "vscode-navigation",
            "--platform",
            "macos",
            "--no-sound",
        ]);
        assert_eq!(args.lesson.as_deref(), Some("vscode-navigation"));
        assert_eq!(args.platform.as_deref(), Some("macos"));
        assert!(args.no_sound);
        assert!(!args.list_lessons);
    }
}
