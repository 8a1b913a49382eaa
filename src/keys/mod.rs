//! Key model: canonical tokens, normalization, shortcut parsing, matching,
//! and display formatting.
//!
//! Everything in this module is pure and total apart from shortcut parsing,
//! which rejects malformed authored strings with [`ShortcutError`]. Raw key
//! names arrive either from terminal key events or from authored shortcut
//! strings such as `"Ctrl+Shift+P"`; both funnel through
//! [`normalize::normalize_key`] so the rest of the application only ever sees
//! canonical [`KeyToken`]s.

pub mod format;
pub mod matching;
pub mod normalize;
pub mod parse;
mod token;

pub use format::{format_shortcut, format_shortcut_spec};
pub use matching::{is_match, is_match_tokens};
pub use normalize::{KeyFormat, NormalizeOptions, normalize_key};
pub use parse::{ShortcutError, parse_shortcut};
pub use token::KeyToken;
