//! Audible feedback.
//!
//! The trainer only needs three cues, so the seam is a tiny trait with a
//! terminal-bell implementation behind it. Tests and the `--no-sound` path
//! use the same type with the bell disabled.

use std::io::Write;

/// The feedback sounds the trainer can play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    /// Correct chord.
    Correct,
    /// Wrong chord.
    Incorrect,
    /// Level threshold crossed.
    LevelUp,
}

/// Playback seam; implementations must be cheap and non-blocking.
pub trait SoundPlayer {
    /// Play one cue; failures are silent by contract.
    fn play(&self, cue: SoundCue);
}

/// Bell-based player. The terminal decides what a BEL actually sounds like,
/// so every cue maps to the same beep; level-ups get two.
#[derive(Debug)]
pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    /// A player that beeps, or stays silent when `enabled` is false.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn ring(times: usize) {
        let mut out = std::io::stdout();
        for _ in 0..times {
            let _ = out.write_all(b"\x07");
        }
        let _ = out.flush();
    }
}

impl SoundPlayer for TerminalBell {
    fn play(&self, cue: SoundCue) {
        if !self.enabled {
            return;
        }
        match cue {
            SoundCue::Correct | SoundCue::Incorrect => Self::ring(1),
            SoundCue::LevelUp => Self::ring(2),
        }
    }
}
