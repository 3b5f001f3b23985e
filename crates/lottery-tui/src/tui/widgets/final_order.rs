// Final order widget: the complete draft order from pick 1 down.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use lottery_core::draft::DraftOrder;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let items: Vec<ListItem> = final_lines(&state.draft_order)
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let style = if i == 0 {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title("Final Draft Order"),
    );
    frame.render_widget(list, area);
}

/// One line per pick, first overall first, with the trophy on pick 1.
pub fn final_lines(order: &DraftOrder) -> Vec<String> {
    order
        .iter()
        .rev()
        .enumerate()
        .map(|(i, team)| {
            if i == 0 {
                format!(" 1. {team}  🏆")
            } else {
                format!(" {}. {team}", i + 1)
            }
        })
        .collect()
}
