// Entry widget: team name field and, in weighted mode, the ballot field.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use lottery_core::draft::RevealPhase;

use crate::tui::{InputField, ViewState};

/// Render the entry fields into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title("Add Team");

    if state.phase != RevealPhase::Idle {
        let paragraph = Paragraph::new("  Roster locked during the draft (r to reset)")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(inner);

    frame.render_widget(
        Paragraph::new(field_line(
            "Name",
            &state.name_input,
            state.input_field == InputField::Name,
        )),
        rows[0],
    );

    if state.weighted_mode {
        frame.render_widget(
            Paragraph::new(field_line(
                "Ballots",
                &state.ballots_input,
                state.input_field == InputField::Ballots,
            )),
            rows[1],
        );
    }
}

/// One labelled input line. The focused field shows a cursor.
pub fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut spans = vec![
        Span::styled(format!(" {:<9}", format!("{label}:")), label_style),
        Span::styled(value, Style::default().fg(Color::White)),
    ];
    if focused {
        spans.push(Span::styled(
            "_",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    Line::from(spans)
}
