//! Rendering.
//!
//! One frame function dispatching on focus, plus centered modal overlays.
//! All state is read-only here except the lesson list's selection offset,
//! which ratatui's `List` widget needs mutably.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
};

use unicode_width::UnicodeWidthChar;

use crate::detect::DetectPhase;
use crate::keys::format_shortcut;
use crate::state::{AppState, Focus, Modal};

/// Truncate to a display-cell budget, appending an ellipsis when cut.
fn ellipsize(s: &str, max_width: usize) -> String {
    let mut width = 0usize;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += w;
        out.push(ch);
    }
    out
}

/// Draw one frame.
pub fn ui(f: &mut Frame, app: &mut AppState) {
    let th = app.theme;
    let area = f.area();

    let bg = Block::default().style(Style::default().bg(th.base));
    f.render_widget(bg, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, app, chunks[0]);
    match app.focus {
        Focus::Lessons => render_lessons(f, app, chunks[1]),
        Focus::Session => render_session(f, app, chunks[1]),
    }
    render_status(f, app, chunks[2]);

    match app.modal.clone() {
        Modal::None => {}
        Modal::Help => render_help(f, app, area),
        Modal::Summary {
            lesson_title,
            hits,
            misses,
            best_combo,
            earned_xp,
            perfect,
        } => render_summary(
            f,
            app,
            area,
            &lesson_title,
            hits,
            misses,
            best_combo,
            earned_xp,
            perfect,
        ),
        Modal::LevelUp { level, title } => render_level_up(f, app, area, level, &title),
    }
}

/// Top bar: level, title, XP progress toward the next level, streak.
fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let th = app.theme;
    let label = format!(
        " Lv {} {}  |  {} XP  |  Streak {}d ",
        app.xp.level(),
        app.xp.level_title(),
        app.xp.total_xp(),
        app.streak.current(),
    );
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(th.overlay))
                .title(Span::styled(
                    " Keyboard Dojo ",
                    Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
                )),
        )
        .gauge_style(Style::default().fg(th.success).bg(th.surface))
        .percent(u16::from(app.xp.level_progress()))
        .label(Span::styled(label, Style::default().fg(th.text)));
    f.render_widget(gauge, area);
}

/// Lesson browser list.
fn render_lessons(f: &mut Frame, app: &mut AppState, area: Rect) {
    let th = app.theme;
    let items: Vec<ListItem> = app
        .catalog
        .lessons
        .iter()
        .map(|lesson| {
            let done = app.progress.lesson_progress(&lesson.id);
            let marker = match done {
                Some(p) if p.perfect => Span::styled("★ ", Style::default().fg(th.warning)),
                Some(p) if p.completed => Span::styled("✓ ", Style::default().fg(th.success)),
                _ => Span::raw("  "),
            };
            let mut segs = vec![
                marker,
                Span::styled(
                    lesson.title.clone(),
                    Style::default().fg(th.text).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {} exercises", lesson.exercises.len()),
                    Style::default().fg(th.overlay),
                ),
            ];
            if !lesson.description.is_empty() {
                segs.push(Span::raw("  - "));
                segs.push(Span::styled(
                    ellipsize(&lesson.description, usize::from(area.width) / 2),
                    Style::default().fg(th.subtext),
                ));
            }
            ListItem::new(Line::from(segs))
        })
        .collect();

    let list = List::new(items)
        .style(Style::default().fg(th.text).bg(th.base))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(th.overlay))
                .title(Span::styled(" Lessons ", Style::default().fg(th.accent))),
        )
        .highlight_style(
            Style::default()
                .bg(th.surface)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut app.lessons_list);
}

/// Active practice view: prompt, target chord, held keys, run stats.
fn render_session(f: &mut Frame, app: &AppState, area: Rect) {
    let th = app.theme;
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let lesson = &app.catalog.lessons[session.lesson_idx];
    let ex = &lesson.exercises[session.current_exercise()];
    let target = format_shortcut(session.detector.expected(), app.platform);

    let (phase_text, phase_color) = match session.detector.phase() {
        DetectPhase::Matched => ("Correct!", th.success),
        DetectPhase::Mismatched => ("Try again", th.error),
        DetectPhase::Accumulating => ("...", th.subtext),
        DetectPhase::Idle => ("", th.subtext),
    };
    let held = format_shortcut(session.detector.pressed(), app.platform);

    let mut lines = vec![
        Line::from(Span::styled(
            ex.name.clone(),
            Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            ex.description.clone(),
            Style::default().fg(th.subtext),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("Press: ", Style::default().fg(th.text)),
            Span::styled(
                target,
                Style::default().fg(th.warning).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Held:  ", Style::default().fg(th.text)),
            Span::styled(held, Style::default().fg(th.subtext)),
        ]),
        Line::default(),
        Line::from(Span::styled(
            phase_text,
            Style::default().fg(phase_color).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            format!(
                "Exercise {}/{}   Hits {}   Misses {}   Combo x{}   +{} XP",
                session.pos + 1,
                session.order.len(),
                session.hits,
                session.misses,
                session.combo,
                session.earned_xp,
            ),
            Style::default().fg(th.overlay),
        )),
    ];
    if session.detector.phase() == DetectPhase::Mismatched {
        let attempt = format_shortcut(session.detector.last_attempt(), app.platform);
        lines.push(Line::from(Span::styled(
            format!("You pressed: {attempt}"),
            Style::default().fg(th.error),
        )));
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(th.overlay))
            .title(Span::styled(
                format!(" {} ", lesson.title),
                Style::default().fg(th.accent),
            )),
    );
    f.render_widget(para, area);
}

/// One-line status bar: toast or key hints.
fn render_status(f: &mut Frame, app: &AppState, area: Rect) {
    let th = app.theme;
    let text = app.toast.clone().unwrap_or_else(|| {
        let help = app
            .settings
            .keymap
            .help_overlay
            .first()
            .map_or_else(|| "F1".to_string(), crate::settings::KeyChord::label);
        let quit = app
            .settings
            .keymap
            .quit
            .first()
            .map_or_else(|| "Ctrl+Q".to_string(), crate::settings::KeyChord::label);
        match app.focus {
            Focus::Lessons => format!(" ↑/↓ select   Enter start   {help} help   {quit} quit"),
            Focus::Session => format!(" Esc leave   {help} help   {quit} quit"),
        }
    });
    let para = Paragraph::new(text).style(Style::default().fg(th.subtext).bg(th.surface));
    f.render_widget(para, area);
}

/// Centered overlay rectangle.
fn centered_rect(pct_x: u16, pct_y: u16, area: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - pct_y) / 2),
            Constraint::Percentage(pct_y),
            Constraint::Percentage((100 - pct_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - pct_x) / 2),
            Constraint::Percentage(pct_x),
            Constraint::Percentage((100 - pct_x) / 2),
        ])
        .split(vert[1])[1]
}

fn modal_block(title: &str, app: &AppState) -> Block<'static> {
    let th = app.theme;
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(th.accent))
        .style(Style::default().bg(th.surface))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(th.accent).add_modifier(Modifier::BOLD),
        ))
}

fn render_help(f: &mut Frame, app: &AppState, area: Rect) {
    let th = app.theme;
    let km = &app.settings.keymap;
    let bind = |chords: &[crate::settings::KeyChord]| {
        chords
            .iter()
            .map(crate::settings::KeyChord::label)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let lines = vec![
        Line::from(format!("{:<18} help", bind(&km.help_overlay))),
        Line::from(format!("{:<18} quit", bind(&km.quit))),
        Line::from(format!("{:<18} move up", bind(&km.lessons_move_up))),
        Line::from(format!("{:<18} move down", bind(&km.lessons_move_down))),
        Line::from(format!("{:<18} start lesson", bind(&km.lessons_start))),
        Line::from(format!("{:<18} leave session", bind(&km.session_leave))),
        Line::default(),
        Line::from(Span::styled(
            "In a session every other key goes to the exercise.",
            Style::default().fg(th.subtext),
        )),
    ];
    let rect = centered_rect(50, 50, area);
    f.render_widget(Clear, rect);
    let para = Paragraph::new(lines)
        .style(Style::default().fg(th.text))
        .block(modal_block("Help", app));
    f.render_widget(para, rect);
}

#[allow(clippy::too_many_arguments)]
fn render_summary(
    f: &mut Frame,
    app: &AppState,
    area: Rect,
    lesson_title: &str,
    hits: u32,
    misses: u32,
    best_combo: u32,
    earned_xp: u64,
    perfect: bool,
) {
    let th = app.theme;
    let mut lines = vec![
        Line::from(Span::styled(
            lesson_title.to_string(),
            Style::default().fg(th.text).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(format!("Hits        {hits}")),
        Line::from(format!("Misses      {misses}")),
        Line::from(format!("Best combo  x{best_combo}")),
        Line::from(Span::styled(
            format!("XP earned   +{earned_xp}"),
            Style::default().fg(th.success),
        )),
    ];
    if perfect {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Perfect run!",
            Style::default().fg(th.warning).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Enter / Esc to close",
        Style::default().fg(th.subtext),
    )));
    let rect = centered_rect(40, 50, area);
    f.render_widget(Clear, rect);
    let para = Paragraph::new(lines)
        .style(Style::default().fg(th.text))
        .block(modal_block("Lesson complete", app));
    f.render_widget(para, rect);
}

fn render_level_up(f: &mut Frame, app: &AppState, area: Rect, level: u32, title: &str) {
    let th = app.theme;
    let lines = vec![
        Line::from(Span::styled(
            format!("Level {level}"),
            Style::default().fg(th.warning).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(th.accent),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Enter / Esc to close",
            Style::default().fg(th.subtext),
        )),
    ];
    let rect = centered_rect(30, 30, area);
    f.render_widget(Clear, rect);
    let para = Paragraph::new(lines)
        .style(Style::default().fg(th.text))
        .block(modal_block("Level up!", app));
    f.render_widget(para, rect);
}
