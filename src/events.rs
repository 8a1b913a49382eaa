//! Terminal event handling.
//!
//! Chrome chords (quit, help, browser navigation) are matched against the
//! configurable [`KeyMap`](crate::settings::KeyMap). Keys pressed inside an
//! active session are translated into detector edges instead; only the quit
//! and help chords are intercepted there so every other key, including Esc
//! when a lesson teaches it, can be practiced.

use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::audio::{SoundCue, SoundPlayer};
use crate::detect::{KeyEdge, Verdict};
use crate::keys::{KeyToken, NormalizeOptions, normalize_key, parse_shortcut};
use crate::settings::KeyChord;
use crate::state::{AppState, Focus, Modal};
use crate::xp::rewards;

/// Raw name for a crossterm key code, in the vocabulary the normalizer
/// understands. `None` for keys the trainer has no use for.
fn raw_key_name(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Char(' ') => Some("space".to_string()),
        KeyCode::Char(c) => Some(c.to_string()),
        KeyCode::Esc => Some("escape".to_string()),
        KeyCode::Enter => Some("enter".to_string()),
        KeyCode::Tab => Some("tab".to_string()),
        KeyCode::Backspace => Some("backspace".to_string()),
        KeyCode::Delete => Some("delete".to_string()),
        KeyCode::Home => Some("home".to_string()),
        KeyCode::End => Some("end".to_string()),
        KeyCode::PageUp => Some("pageup".to_string()),
        KeyCode::PageDown => Some("pagedown".to_string()),
        KeyCode::Up => Some("arrowup".to_string()),
        KeyCode::Down => Some("arrowdown".to_string()),
        KeyCode::Left => Some("arrowleft".to_string()),
        KeyCode::Right => Some("arrowright".to_string()),
        KeyCode::F(n) => Some(format!("f{n}")),
        KeyCode::Modifier(m) => {
            use crossterm::event::ModifierKeyCode as M;
            match m {
                M::LeftControl | M::RightControl => Some("control".to_string()),
                M::LeftAlt | M::RightAlt => Some("alt".to_string()),
                M::LeftShift | M::RightShift => Some("shift".to_string()),
                M::LeftSuper | M::RightSuper | M::LeftMeta | M::RightMeta => {
                    Some("meta".to_string())
                }
                _ => None,
            }
        }
        _ => None,
    }
}

/// Modifier tokens implied by a key event's modifier flags.
fn modifier_tokens(mods: KeyModifiers, opts: &NormalizeOptions) -> Vec<KeyToken> {
    let mut out = Vec::new();
    if mods.contains(KeyModifiers::CONTROL) {
        out.push(normalize_key("control", opts));
    }
    if mods.contains(KeyModifiers::ALT) {
        out.push(normalize_key("alt", opts));
    }
    if mods.contains(KeyModifiers::SHIFT) {
        out.push(normalize_key("shift", opts));
    }
    if mods.contains(KeyModifiers::SUPER) {
        out.push(normalize_key("meta", opts));
    }
    out
}

/// What: Translate one crossterm key event into detector edges.
///
/// Inputs:
/// - `key`: The key event (press or release; repeats yield nothing).
/// - `opts`: Normalization options for the effective platform.
///
/// Output:
/// - Down edges for the implied modifiers and the key itself on press, the
///   mirror Up edges on release. Dedup in the detector makes the synthesized
///   modifier downs safe alongside real modifier key events.
#[must_use]
pub fn key_event_edges(key: &KeyEvent, opts: &NormalizeOptions) -> Vec<KeyEdge> {
    if key.kind == KeyEventKind::Repeat {
        return Vec::new();
    }
    let Some(raw) = raw_key_name(key.code) else {
        return Vec::new();
    };
    let main = normalize_key(&raw, opts);
    let is_modifier_key = matches!(key.code, KeyCode::Modifier(_));
    let mut edges = Vec::new();
    match key.kind {
        KeyEventKind::Press => {
            if !is_modifier_key {
                for m in modifier_tokens(key.modifiers, opts) {
                    edges.push(KeyEdge::Down(m));
                }
            }
            edges.push(KeyEdge::Down(main));
        }
        KeyEventKind::Release => {
            edges.push(KeyEdge::Up(main));
            if !is_modifier_key {
                // Flags describe the state before this release; a modifier
                // no longer reported was released alongside the key.
                for m in modifier_tokens(KeyModifiers::all() ^ key.modifiers, opts) {
                    edges.push(KeyEdge::Up(m));
                }
            }
        }
        KeyEventKind::Repeat => {}
    }
    edges
}

/// Whether a key event matches any chord in a binding list.
fn matches_chord(key: &KeyEvent, chords: &[KeyChord]) -> bool {
    key.kind == KeyEventKind::Press
        && chords
            .iter()
            .any(|c| c.code == key.code && c.mods == key.modifiers)
}

/// What: Handle one terminal event against the application state.
///
/// Inputs:
/// - `ev`: The crossterm event.
/// - `st`: Mutable application state.
///
/// Output:
/// - `true` when the state changed and the UI should redraw.
pub fn handle_event(ev: &CEvent, st: &mut AppState) -> bool {
    match ev {
        CEvent::Key(key) => handle_key(key, st),
        CEvent::FocusLost => {
            if let Some(session) = st.session.as_mut() {
                session.detector.feed(KeyEdge::FocusLost);
                return true;
            }
            false
        }
        CEvent::Resize(..) => true,
        _ => false,
    }
}

fn handle_key(key: &KeyEvent, st: &mut AppState) -> bool {
    if st.modal != Modal::None {
        return handle_modal_key(key, st);
    }
    // Quit and help are reachable from everywhere, session included.
    if matches_chord(key, &st.settings.keymap.quit) {
        st.should_quit = true;
        return true;
    }
    if matches_chord(key, &st.settings.keymap.help_overlay) {
        st.modal = Modal::Help;
        return true;
    }
    match st.focus {
        Focus::Lessons => handle_lessons_key(key, st),
        Focus::Session => handle_session_key(key, st),
    }
}

fn handle_modal_key(key: &KeyEvent, st: &mut AppState) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match &st.modal {
        Modal::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::F(1)) {
                st.modal = Modal::None;
                return true;
            }
            false
        }
        Modal::Summary { .. } | Modal::LevelUp { .. } => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                st.modal = Modal::None;
                st.surface_pending_level_up();
                return true;
            }
            false
        }
        Modal::None => false,
    }
}

fn handle_lessons_key(key: &KeyEvent, st: &mut AppState) -> bool {
    let len = st.catalog.lessons.len();
    if len == 0 {
        return false;
    }
    if matches_chord(key, &st.settings.keymap.lessons_move_up) {
        let cur = st.lessons_list.selected().unwrap_or(0);
        st.lessons_list.select(Some(cur.saturating_sub(1)));
        return true;
    }
    if matches_chord(key, &st.settings.keymap.lessons_move_down) {
        let cur = st.lessons_list.selected().unwrap_or(0);
        st.lessons_list.select(Some((cur + 1).min(len - 1)));
        return true;
    }
    if matches_chord(key, &st.settings.keymap.lessons_start) {
        let idx = st.lessons_list.selected().unwrap_or(0);
        return st.start_session(idx);
    }
    false
}

/// Whether the current exercise's chord involves a key, so the chrome must
/// not intercept it mid-session.
fn expected_uses(st: &AppState, token_text: &str) -> bool {
    st.session.as_ref().is_some_and(|s| {
        s.detector
            .expected()
            .iter()
            .any(|t| t.as_str().eq_ignore_ascii_case(token_text))
    })
}

fn handle_session_key(key: &KeyEvent, st: &mut AppState) -> bool {
    // Leaving the session keeps its default Esc binding unless the exercise
    // being practiced actually contains Esc.
    if matches_chord(key, &st.settings.keymap.session_leave) {
        let leave_is_esc = st
            .settings
            .keymap
            .session_leave
            .iter()
            .any(|c| c.code == KeyCode::Esc);
        if !(leave_is_esc && expected_uses(st, "esc")) {
            st.leave_session();
            return true;
        }
    }
    let opts = NormalizeOptions::internal(st.platform);
    let edges = key_event_edges(key, &opts);
    if edges.is_empty() {
        return false;
    }
    let Some(session) = st.session.as_mut() else {
        return false;
    };
    // Without release reporting every press batch is a self-contained
    // attempt, so stale keys from the previous batch are dropped first.
    if !st.release_events && key.kind == KeyEventKind::Press {
        session.detector.clear();
    }
    let mut verdict = Verdict::Pending;
    for edge in edges {
        match session.detector.feed(edge) {
            Verdict::Pending => {}
            v => verdict = v,
        }
    }
    // A press batch is the whole attempt when releases are not reported, so
    // an undersized wrong chord is judged immediately.
    if verdict == Verdict::Pending
        && !st.release_events
        && key.kind == KeyEventKind::Press
        && !matches!(key.code, KeyCode::Modifier(_))
    {
        verdict = session.detector.judge();
    }
    match verdict {
        Verdict::Matched => {
            on_hit(st);
            true
        }
        Verdict::Mismatched => {
            on_miss(st);
            true
        }
        Verdict::Pending => true,
    }
}

/// Award a correct attempt and advance to the next exercise or finish.
fn on_hit(st: &mut AppState) {
    let (amount, ex_id) = {
        let Some(session) = st.session.as_mut() else {
            return;
        };
        let lesson = &st.catalog.lessons[session.lesson_idx];
        let ex = &lesson.exercises[session.current_exercise()];
        session.attempts += 1;
        session.hits += 1;
        session.combo += 1;
        session.best_combo = session.best_combo.max(session.combo);
        let combo_bonus = rewards::COMBO_BONUS * u64::from(session.combo.saturating_sub(1));
        let amount = rewards::CORRECT_ANSWER + ex.xp_value + combo_bonus;
        session.earned_xp += amount;
        (amount, ex.id.clone())
    };
    st.progress.record_attempt(&ex_id, true);
    let ups = st.xp.add_xp(amount, "exercise", Some(&ex_id));
    st.pending_level_ups.extend(ups);
    st.bell.play(SoundCue::Correct);

    let finished = match st.session.as_mut() {
        Some(session) if session.pos + 1 < session.order.len() => {
            session.pos += 1;
            false
        }
        Some(_) => true,
        None => return,
    };
    if finished {
        finish_lesson(st);
        return;
    }
    if let Some(session) = st.session.as_mut() {
        let lesson = &st.catalog.lessons[session.lesson_idx];
        let next = &lesson.exercises[session.current_exercise()];
        let spec = next.shortcut.for_platform(st.platform);
        match parse_shortcut(spec, &NormalizeOptions::internal(st.platform)) {
            Ok(expected) => session.detector.retarget(expected),
            Err(e) => {
                // Validated at session start; a failure here means the
                // catalog changed underneath us.
                tracing::warn!(exercise = %next.id, error = %e, "mid-session parse failure; leaving session");
                st.leave_session();
                return;
            }
        }
    }
    if !st.pending_level_ups.is_empty() {
        st.bell.play(SoundCue::LevelUp);
        st.surface_pending_level_up();
    }
}

/// Record a wrong attempt and reset the combo.
fn on_miss(st: &mut AppState) {
    let Some(session) = st.session.as_mut() else {
        return;
    };
    let lesson = &st.catalog.lessons[session.lesson_idx];
    let ex_id = lesson.exercises[session.current_exercise()].id.clone();
    session.attempts += 1;
    session.misses += 1;
    session.combo = 0;
    st.progress.record_attempt(&ex_id, false);
    st.bell.play(SoundCue::Incorrect);
}

/// Close out a completed lesson: completion XP, streak, summary modal.
fn finish_lesson(st: &mut AppState) {
    let Some(session) = st.session.take() else {
        return;
    };
    let lesson = &st.catalog.lessons[session.lesson_idx];
    let perfect = session.misses == 0;
    let mut earned = session.earned_xp;

    let mut amount = lesson.xp_reward;
    if perfect {
        amount += rewards::PERFECT_LESSON;
    }
    earned += amount;
    let ups = st.xp.add_xp(amount, "lesson", Some(&lesson.id));
    st.pending_level_ups.extend(ups);
    st.progress.record_lesson_complete(&lesson.id, perfect);

    if let Some(bonus) = st
        .streak
        .record_practice(chrono::Utc::now().date_naive())
    {
        earned += bonus.xp;
        let ups = st.xp.add_xp(
            bonus.xp,
            "streak",
            Some(&format!("{} day streak", bonus.days)),
        );
        st.pending_level_ups.extend(ups);
        st.toast = Some(format!("Streak: {} days", bonus.days));
    }

    st.modal = Modal::Summary {
        lesson_title: lesson.title.clone(),
        hits: session.hits,
        misses: session.misses,
        best_combo: session.best_combo,
        earned_xp: earned,
        perfect,
    };
    st.focus = Focus::Lessons;
    if !st.pending_level_ups.is_empty() {
        st.bell.play(SoundCue::LevelUp);
    }
    st.maybe_flush_all();
}
