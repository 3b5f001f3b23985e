// Status bar widget: title, draft phase, weighted mode, soundtrack.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use lottery_core::draft::RevealPhase;
use lottery_core::protocol::SoundtrackStatus;

use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [title] | [phase] | [weighted] | [soundtrack] [drawn at]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let separator = || Span::styled(" | ", Style::default().fg(Color::Gray));

    let mut spans = vec![
        Span::styled(
            format!(" {}", state.title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        separator(),
    ];

    let (label, color) = phase_label(state.phase);
    spans.push(Span::styled(label, Style::default().fg(color)));
    spans.push(separator());

    spans.push(Span::styled(
        if state.weighted_mode { "Weighted" } else { "Equal odds" },
        Style::default().fg(Color::White),
    ));
    spans.push(separator());

    let (symbol, color) = soundtrack_indicator(state.soundtrack);
    spans.push(Span::styled(symbol, Style::default().fg(color)));

    if let Some(drawn_at) = state.drawn_at {
        spans.push(separator());
        spans.push(Span::styled(
            format!("Drawn {}", drawn_at.format("%H:%M:%S")),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Label and color for the draft phase.
pub fn phase_label(phase: RevealPhase) -> (&'static str, Color) {
    match phase {
        RevealPhase::Idle => ("Entering teams", Color::Cyan),
        RevealPhase::Revealing => ("Revealing", Color::Green),
        RevealPhase::Complete => ("Complete", Color::Magenta),
    }
}

/// Soundtrack indicator text and color.
pub fn soundtrack_indicator(status: SoundtrackStatus) -> (&'static str, Color) {
    match status {
        SoundtrackStatus::Playing => ("♪ Theme playing", Color::Green),
        SoundtrackStatus::Paused => ("♪ Theme paused", Color::Yellow),
        SoundtrackStatus::Stopped => ("♪ Off", Color::DarkGray),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
