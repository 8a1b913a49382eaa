//! Shortcut detection engine.
//!
//! An explicit finite-state object that accumulates key-down/key-up edges
//! into a live pressed-key set and judges it against an expected chord. It is
//! independent of any rendering layer: the terminal event loop translates
//! crossterm key events into [`KeyEdge`]s and feeds them in, and the UI reads
//! the phase, pressed keys, and last attempt back out for display.
//!
//! Lifecycle: `Idle → Accumulating → {Matched | Mismatched} → Idle`. Each
//! detector instance is owned by exactly one practice exercise at a time;
//! there is no shared state and no locking.

use crate::keys::{KeyToken, is_match_tokens};

/// Current phase of the detection state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectPhase {
    /// No keys held.
    #[default]
    Idle,
    /// At least one key held, verdict still open.
    Accumulating,
    /// The last evaluation matched the expected chord.
    Matched,
    /// Enough keys were held but they were not the expected chord.
    Mismatched,
}

/// A single input edge fed to the detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEdge {
    /// A key went down.
    Down(KeyToken),
    /// A key came back up.
    Up(KeyToken),
    /// The terminal lost focus; all held keys are forgotten.
    FocusLost,
}

/// Outcome of feeding one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No decision yet.
    Pending,
    /// The expected chord was pressed exactly.
    Matched,
    /// The attempt was judged wrong.
    Mismatched,
}

/// Behavior switches for the detector.
#[derive(Debug, Clone, Copy)]
pub struct DetectorOptions {
    /// Clear the pressed set immediately after a match (default true).
    pub auto_clear_on_match: bool,
    /// Clear the pressed set immediately after a failure (default false, so
    /// the user can see which keys were wrong until they release them).
    pub auto_clear_on_failure: bool,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            auto_clear_on_match: true,
            auto_clear_on_failure: false,
        }
    }
}

/// Accumulates pressed keys for one exercise and judges attempts.
#[derive(Debug)]
pub struct ShortcutDetector {
    /// Expected chord, deduplicated, in authored order.
    expected: Vec<KeyToken>,
    /// Currently-held tokens in press order (deduplicated).
    pressed: Vec<KeyToken>,
    /// Phase of the state machine.
    phase: DetectPhase,
    /// Behavior switches.
    options: DetectorOptions,
    /// Snapshot of the pressed set at the moment of the last verdict.
    last_attempt: Vec<KeyToken>,
    /// A verdict was already raised for the current accumulation; suppresses
    /// repeated failure callbacks while extra keys pile up.
    judged: bool,
}

impl ShortcutDetector {
    /// Create a detector for the given expected chord.
    #[must_use]
    pub fn new(expected: Vec<KeyToken>, options: DetectorOptions) -> Self {
        Self {
            expected,
            pressed: Vec::new(),
            phase: DetectPhase::Idle,
            options,
            last_attempt: Vec::new(),
            judged: false,
        }
    }

    /// The expected chord.
    #[must_use]
    pub fn expected(&self) -> &[KeyToken] {
        &self.expected
    }

    /// Currently-held tokens in press order.
    #[must_use]
    pub fn pressed(&self) -> &[KeyToken] {
        &self.pressed
    }

    /// Current machine phase.
    #[must_use]
    pub const fn phase(&self) -> DetectPhase {
        self.phase
    }

    /// Pressed-set snapshot from the last verdict.
    #[must_use]
    pub fn last_attempt(&self) -> &[KeyToken] {
        &self.last_attempt
    }

    /// What: Feed one input edge and return the resulting verdict.
    ///
    /// Inputs:
    /// - `edge`: Key down, key up, or focus loss.
    ///
    /// Output:
    /// - `Matched` when the held set equals the expected chord exactly;
    ///   `Mismatched` once per accumulation when enough keys are held but
    ///   wrong; `Pending` otherwise.
    ///
    /// Details:
    /// - Downs are deduplicated, so terminal auto-repeat cannot re-trigger a
    ///   verdict. Releasing every key re-arms judgement.
    pub fn feed(&mut self, edge: KeyEdge) -> Verdict {
        match edge {
            KeyEdge::Down(token) => self.on_down(token),
            KeyEdge::Up(token) => {
                self.on_up(&token);
                Verdict::Pending
            }
            KeyEdge::FocusLost => {
                self.clear();
                Verdict::Pending
            }
        }
    }

    /// What: Judge the currently held set as a complete attempt.
    ///
    /// Inputs: none.
    ///
    /// Output:
    /// - `Mismatched` when keys are held, unjudged, and not the expected
    ///   chord; `Pending` otherwise (a match would already have been returned
    ///   by the down edge that completed it).
    ///
    /// Details:
    /// - Used when the terminal cannot report key releases: a press batch is
    ///   final, so an undersized wrong chord must still be judged rather than
    ///   waiting for keys that will never arrive.
    pub fn judge(&mut self) -> Verdict {
        if self.pressed.is_empty() || self.judged {
            return Verdict::Pending;
        }
        if is_match_tokens(&self.pressed, &self.expected) {
            return Verdict::Pending;
        }
        self.phase = DetectPhase::Mismatched;
        self.last_attempt = self.pressed.clone();
        self.judged = true;
        if self.options.auto_clear_on_failure {
            self.pressed.clear();
            self.judged = false;
        }
        Verdict::Mismatched
    }

    /// Forget all held keys and return to `Idle`; keeps `last_attempt`.
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.phase = DetectPhase::Idle;
        self.judged = false;
    }

    /// Reset the detector completely, dropping the last attempt too.
    pub fn reset(&mut self) {
        self.clear();
        self.last_attempt.clear();
    }

    /// Swap in a new expected chord (next exercise) and reset.
    pub fn retarget(&mut self, expected: Vec<KeyToken>) {
        self.expected = expected;
        self.reset();
    }

    /// Register a key-down and evaluate the accumulated set.
    fn on_down(&mut self, token: KeyToken) -> Verdict {
        if self.pressed.iter().any(|t| t.eq_ignore_case(&token)) {
            // Auto-repeat or duplicate report; no state change.
            return Verdict::Pending;
        }
        self.pressed.push(token);
        self.phase = DetectPhase::Accumulating;
        if is_match_tokens(&self.pressed, &self.expected) {
            self.phase = DetectPhase::Matched;
            self.last_attempt = self.pressed.clone();
            self.judged = true;
            if self.options.auto_clear_on_match {
                self.pressed.clear();
                self.judged = false;
            }
            return Verdict::Matched;
        }
        if self.pressed.len() >= self.expected.len() && !self.judged {
            self.phase = DetectPhase::Mismatched;
            self.last_attempt = self.pressed.clone();
            self.judged = true;
            if self.options.auto_clear_on_failure {
                self.pressed.clear();
                self.judged = false;
            }
            return Verdict::Mismatched;
        }
        Verdict::Pending
    }

    /// Register a key-up; an empty set re-arms judgement.
    fn on_up(&mut self, token: &KeyToken) {
        self.pressed.retain(|t| !t.eq_ignore_case(token));
        if self.pressed.is_empty() {
            self.phase = DetectPhase::Idle;
            self.judged = false;
        }
    }
}
