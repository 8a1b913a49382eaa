//! Match evaluation: strict two-way set equality between held keys and the
//! expected chord.
//!
//! Pressing a superset of the expected keys is a mismatch by design: the
//! trainer teaches precise chords, so accidental extra key presses are
//! penalized rather than tolerated.

use std::collections::HashSet;

use super::token::KeyToken;

/// What: Decide whether the held key set exactly matches the expected chord.
///
/// Inputs:
/// - `pressed`: Currently-held canonical tokens.
/// - `expected`: Expected tokens (deduplicated by the parser).
///
/// Output:
/// - `true` iff every expected token is held and no extra key is held;
///   comparison is case-insensitive.
#[must_use]
pub fn is_match(pressed: &HashSet<KeyToken>, expected: &[KeyToken]) -> bool {
    pressed.len() == expected.len()
        && expected
            .iter()
            .all(|e| pressed.iter().any(|p| p.eq_ignore_case(e)))
}

/// Slice variant of [`is_match`] for callers that track press order.
///
/// `pressed` must already be deduplicated (the detector guarantees this).
#[must_use]
pub fn is_match_tokens(pressed: &[KeyToken], expected: &[KeyToken]) -> bool {
    pressed.len() == expected.len()
        && expected
            .iter()
            .all(|e| pressed.iter().any(|p| p.eq_ignore_case(e)))
}
