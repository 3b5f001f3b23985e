// Celebration overlay: shown for a few seconds when the first overall pick
// is revealed.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::layout::centered_rect;

const DIALOG_WIDTH: u16 = 44;
const DIALOG_HEIGHT: u16 = 7;

/// Confetti row along the top and bottom of the banner.
const CONFETTI: &str = "* . * . * . * . * . * . * . * . * . *";

pub fn render(frame: &mut Frame, area: Rect, first_overall: &str) {
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let gold = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let confetti = Style::default().fg(Color::LightMagenta);

    let text = vec![
        Line::from(Span::styled(CONFETTI, confetti)),
        Line::from(Span::styled("🏆 FIRST OVERALL PICK 🏆", gold)),
        Line::from(Span::styled(
            first_overall.to_uppercase(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(CONFETTI, confetti)),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(gold),
        )
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}
