// Draft board widget: picks revealed so far, newest on top.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use lottery_core::draft::DraftOrder;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let revealed = state.revealed();
    let block = Block::default().borders(Borders::ALL).title(format!(
        "Draft Order ({}/{})",
        revealed.len(),
        state.draft_order.len()
    ));

    if revealed.is_empty() {
        let paragraph = Paragraph::new("  The order is revealed from the last pick up.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = board_rows(&state.draft_order, revealed.len())
        .into_iter()
        .enumerate()
        .map(|(row, (pick, team))| {
            // The newest reveal is the first row
            let style = if row == 0 {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(format_pick(pick, team), style)))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// `(pick number, team)` for the first `revealed` positions, newest first.
pub fn board_rows(order: &DraftOrder, revealed: usize) -> Vec<(usize, &str)> {
    (0..revealed.min(order.len()))
        .rev()
        .filter_map(|i| Some((order.pick_number(i)?, order.get(i)?)))
        .collect()
}

pub fn format_pick(pick: usize, team: &str) -> String {
    format!(" Pick #{pick:<3} {team}")
}
