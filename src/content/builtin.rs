//! Built-in curriculum.
//!
//! Three lessons centered on the VS Code keymap, ordered from everyday
//! navigation up to multi-modifier editing chords.

use super::{Difficulty, Exercise, Lesson, ShortcutDefinition};

/// Helper for the common case where Linux shares the Windows binding.
fn ex(
    id: &str,
    name: &str,
    description: &str,
    windows: &str,
    mac: &str,
    category: &str,
    difficulty: Difficulty,
    xp_value: u64,
) -> Exercise {
    Exercise {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        shortcut: ShortcutDefinition {
            windows: windows.to_string(),
            mac: mac.to_string(),
            linux: None,
        },
        category: category.to_string(),
        difficulty,
        xp_value,
    }
}

/// The shipped lessons, in teaching order.
#[must_use]
pub fn lessons() -> Vec<Lesson> {
    vec![navigation_basics(), editing_essentials(), power_moves()]
}

fn navigation_basics() -> Lesson {
    Lesson {
        id: "vscode-navigation".to_string(),
        title: "Navigation Basics".to_string(),
        description: "Move around a project without touching the mouse".to_string(),
        exercises: vec![
            ex(
                "vscode.quick-open",
                "Quick Open",
                "Jump to any file by name",
                "ctrl+p",
                "cmd+p",
                "navigation",
                Difficulty::Beginner,
                5,
            ),
            ex(
                "vscode.command-palette",
                "Command Palette",
                "Run any editor command",
                "ctrl+shift+p",
                "cmd+shift+p",
                "navigation",
                Difficulty::Beginner,
                5,
            ),
            ex(
                "vscode.go-to-line",
                "Go to Line",
                "Jump to a line number in the current file",
                "ctrl+g",
                "ctrl+g",
                "navigation",
                Difficulty::Beginner,
                5,
            ),
            ex(
                "vscode.go-to-symbol",
                "Go to Symbol",
                "Jump to a function or type in the current file",
                "ctrl+shift+o",
                "cmd+shift+o",
                "navigation",
                Difficulty::Intermediate,
                8,
            ),
            ex(
                "vscode.toggle-sidebar",
                "Toggle Sidebar",
                "Show or hide the file explorer",
                "ctrl+b",
                "cmd+b",
                "navigation",
                Difficulty::Beginner,
                5,
            ),
        ],
        xp_reward: 50,
    }
}

fn editing_essentials() -> Lesson {
    Lesson {
        id: "vscode-editing".to_string(),
        title: "Editing Essentials".to_string(),
        description: "The everyday edit operations, by muscle memory".to_string(),
        exercises: vec![
            ex(
                "vscode.toggle-comment",
                "Toggle Comment",
                "Comment or uncomment the current line",
                "ctrl+/",
                "cmd+/",
                "editing",
                Difficulty::Beginner,
                5,
            ),
            ex(
                "vscode.duplicate-line",
                "Duplicate Line",
                "Copy the current line below itself",
                "ctrl+shift+d",
                "cmd+shift+d",
                "editing",
                Difficulty::Intermediate,
                8,
            ),
            ex(
                "vscode.move-line-up",
                "Move Line Up",
                "Move the current line up one row",
                "alt+up",
                "alt+up",
                "editing",
                Difficulty::Intermediate,
                8,
            ),
            ex(
                "vscode.select-word",
                "Select Next Occurrence",
                "Add the next occurrence of the word to the selection",
                "ctrl+d",
                "cmd+d",
                "editing",
                Difficulty::Intermediate,
                8,
            ),
            ex(
                "vscode.format-document",
                "Format Document",
                "Run the formatter on the whole file",
                "shift+alt+f",
                "shift+alt+f",
                "editing",
                Difficulty::Intermediate,
                8,
            ),
        ],
        xp_reward: 50,
    }
}

fn power_moves() -> Lesson {
    Lesson {
        id: "vscode-power".to_string(),
        title: "Power Moves".to_string(),
        description: "Multi-modifier chords that separate the pros".to_string(),
        exercises: vec![
            ex(
                "vscode.search-everywhere",
                "Search in Files",
                "Search across the whole workspace",
                "ctrl+shift+f",
                "cmd+shift+f",
                "search",
                Difficulty::Intermediate,
                8,
            ),
            ex(
                "vscode.rename-symbol",
                "Rename Symbol",
                "Rename the symbol under the cursor everywhere",
                "f2",
                "f2",
                "refactoring",
                Difficulty::Advanced,
                10,
            ),
            ex(
                "vscode.toggle-terminal",
                "Toggle Terminal",
                "Show or hide the integrated terminal",
                "ctrl+`",
                "ctrl+`",
                "panels",
                Difficulty::Intermediate,
                8,
            ),
            ex(
                "vscode.fold-all",
                "Fold All",
                "Collapse every region in the file",
                "ctrl+k",
                "cmd+k",
                "folding",
                Difficulty::Advanced,
                10,
            ),
            ex(
                "vscode.markdown-preview",
                "Markdown Preview",
                "Open the rendered preview beside the editor",
                "ctrl+shift+v",
                "cmd+shift+v",
                "panels",
                Difficulty::Advanced,
                10,
            ),
        ],
        xp_reward: 50,
    }
}
