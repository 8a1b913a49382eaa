//! Fixed color palette for the UI.

use ratatui::style::Color;

/// The application palette. One dark scheme, no user theming.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    /// Window background.
    pub base: Color,
    /// Panel background.
    pub surface: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary text (descriptions, hints).
    pub subtext: Color,
    /// Borders and separators.
    pub overlay: Color,
    /// Headings and the highlighted lesson.
    pub accent: Color,
    /// Correct feedback and progress fill.
    pub success: Color,
    /// Mismatch feedback.
    pub error: Color,
    /// Combo and streak highlights.
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),
            surface: Color::Rgb(49, 50, 68),
            text: Color::Rgb(205, 214, 244),
            subtext: Color::Rgb(166, 173, 200),
            overlay: Color::Rgb(108, 112, 134),
            accent: Color::Rgb(137, 180, 250),
            success: Color::Rgb(166, 227, 161),
            error: Color::Rgb(243, 139, 168),
            warning: Color::Rgb(249, 226, 175),
        }
    }
}
