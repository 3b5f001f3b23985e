// Teams widget: the roster with first-pick odds, and ballots in weighted mode.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use lottery_core::draft::RevealPhase;
use lottery_core::roster::Roster;

use crate::tui::ViewState;

/// Render the roster into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let title = format!("Teams ({})", state.teams.len());
    let block = Block::default().borders(Borders::ALL).title(title);

    if state.teams.is_empty() {
        let paragraph = Paragraph::new("  No teams yet. Type a name and press Enter.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let weighted = state.weighted_mode;
    let roster: Roster = state.teams.iter().cloned().collect();

    let mut header_cells = vec![Cell::from("Team")];
    if weighted {
        header_cells.push(Cell::from("Ballots"));
    }
    header_cells.push(Cell::from("1st pick"));
    let header = Row::new(header_cells).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = roster
        .teams()
        .map(|team| {
            let mut cells = vec![Cell::from(team.name.clone())];
            if weighted {
                cells.push(Cell::from(team.ballots.to_string()));
            }
            cells.push(Cell::from(format_odds(
                roster.first_pick_odds(&team.name, weighted),
            )));
            Row::new(cells)
        })
        .collect();

    let widths: Vec<Constraint> = if weighted {
        vec![Constraint::Min(12), Constraint::Length(8), Constraint::Length(9)]
    } else {
        vec![Constraint::Min(12), Constraint::Length(9)]
    };

    let editable = state.phase == RevealPhase::Idle;
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(if editable {
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        })
        .highlight_symbol(if editable { "> " } else { "  " });

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// First-pick chance as a percentage with one decimal.
pub fn format_odds(odds: Option<f64>) -> String {
    match odds {
        Some(p) => format!("{:.1}%", p * 100.0),
        None => "--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lottery_core::roster::Team;

    #[test]
    fn odds_format_as_percentages() {
        assert_eq!(format_odds(Some(0.1)), "10.0%");
        assert_eq!(format_odds(Some(0.9)), "90.0%");
        assert_eq!(format_odds(Some(1.0 / 3.0)), "33.3%");
        assert_eq!(format_odds(None), "--");
    }

    #[test]
    fn render_does_not_panic_empty() {
        let backend = ratatui::backend::TestBackend::new(50, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn render_shows_weighted_odds() {
        let backend = ratatui::backend::TestBackend::new(50, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.weighted_mode = true;
        state.teams = vec![Team::new("Eagles", 9), Team::new("Giants", 1)];
        state.selected = 1;
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("90.0%"));
        assert!(screen.contains("10.0%"));
    }

    #[test]
    fn render_unweighted_splits_evenly() {
        let backend = ratatui::backend::TestBackend::new(50, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.teams = vec![Team::new("Eagles", 9), Team::new("Giants", 1)];
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("50.0%"));
        assert!(!screen.contains("Ballots"));
    }
}
