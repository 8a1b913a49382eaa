//! Library entry for Keydojo exposing core logic for integration tests.

pub mod app;
pub mod args;
pub mod audio;
pub mod content;
pub mod detect;
pub mod events;
pub mod keys;
pub mod paths;
pub mod platform;
pub mod progress;
pub mod settings;
pub mod state;
pub mod streak;
pub mod theme;
pub mod ui;
pub mod util;
pub mod xp;

#[cfg(test)]
pub(crate) mod test_utils;
