// Spotlight widget: the pick just revealed, large and centered.
//
// Idle: prompt to start. Revealing: "Pick #N" over the team name plus a
// countdown to the next reveal. Complete: the first overall pick.

use std::time::{Duration, Instant};

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use lottery_core::draft::RevealPhase;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, now: Instant) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    let paragraph = Paragraph::new(spotlight_lines(state, now))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

/// The three content lines for the current phase.
pub fn spotlight_lines(state: &ViewState, now: Instant) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::Gray);
    let gold = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    match (state.phase, state.latest_reveal()) {
        (RevealPhase::Revealing, Some((pick, team))) => {
            let countdown = state
                .next_reveal_in(now)
                .map(format_countdown)
                .unwrap_or_default();
            vec![
                Line::from(Span::styled(format!("Draft Position: {pick}"), gold)),
                Line::from(Span::styled(
                    team.to_uppercase(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(countdown, dim)),
            ]
        }
        (RevealPhase::Complete, _) => {
            let first = state.draft_order.first_overall().unwrap_or_default();
            vec![
                Line::from(Span::styled("🏆 First Overall Pick 🏆", gold)),
                Line::from(Span::styled(
                    first.to_uppercase(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled("Press r to reset", dim)),
            ]
        }
        _ => {
            let prompt = if state.teams.len() > 1 {
                format!("{} teams entered. Press Ctrl+D to draw.", state.teams.len())
            } else {
                "Add at least two teams to start the draft.".to_string()
            };
            vec![
                Line::from(Span::styled(state.title.clone(), gold)),
                Line::from(Span::styled(prompt, Style::default().fg(Color::White))),
                Line::from(""),
            ]
        }
    }
}

/// "Next reveal in Ns", rounding up so the count never shows 0 early.
pub fn format_countdown(left: Duration) -> String {
    let secs = left.as_secs() + u64::from(left.subsec_nanos() > 0);
    format!("Next reveal in {secs}s")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lottery_core::draft::DraftOrder;
    use lottery_core::roster::Team;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn drafting(phase: RevealPhase, current: usize) -> ViewState {
        let mut state = ViewState::default();
        state.teams = vec![Team::new("A", 1), Team::new("B", 1), Team::new("C", 1)];
        state.draft_order = DraftOrder::from(vec!["C".to_string(), "A".to_string(), "B".to_string()]);
        state.current_reveal = Some(current);
        state.phase = phase;
        state
    }

    #[test]
    fn countdown_rounds_up() {
        assert_eq!(format_countdown(Duration::from_millis(9_200)), "Next reveal in 10s");
        assert_eq!(format_countdown(Duration::from_secs(3)), "Next reveal in 3s");
        assert_eq!(format_countdown(Duration::ZERO), "Next reveal in 0s");
    }

    #[test]
    fn revealing_shows_pick_number_and_team() {
        let mut state = drafting(RevealPhase::Revealing, 1);
        let now = Instant::now();
        state.last_reveal_at = Some(now);
        let lines = text(&spotlight_lines(&state, now));
        assert_eq!(lines[0], "Draft Position: 2");
        assert_eq!(lines[1], "A");
        assert_eq!(lines[2], "Next reveal in 10s");
    }

    #[test]
    fn complete_shows_first_overall() {
        let state = drafting(RevealPhase::Complete, 2);
        let lines = text(&spotlight_lines(&state, Instant::now()));
        assert!(lines[0].contains("First Overall Pick"));
        assert_eq!(lines[1], "B");
    }

    #[test]
    fn idle_prompts_for_teams() {
        let mut state = ViewState::default();
        let lines = text(&spotlight_lines(&state, Instant::now()));
        assert!(lines[1].contains("at least two teams"));

        state.teams = vec![Team::new("A", 1), Team::new("B", 1)];
        let lines = text(&spotlight_lines(&state, Instant::now()));
        assert!(lines[1].contains("Ctrl+D"));
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(60, 5);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = drafting(RevealPhase::Revealing, 0);
        terminal
            .draw(|frame| render(frame, frame.area(), &state, Instant::now()))
            .unwrap();
    }
}
