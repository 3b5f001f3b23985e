// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the
// orchestrator, or into local ViewState edits (entry fields, selection,
// overlays). Which keys do what depends on the draft phase.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use lottery_core::draft::RevealPhase;
use lottery_core::protocol::UserCommand;
use lottery_core::roster::{accepts_name, normalize_name};

use super::{InputField, ViewState};

/// Longest ballot count that can be typed. Larger values are clamped by the
/// roster anyway.
const MAX_BALLOT_DIGITS: usize = 5;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// orchestrator, `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports Release (and Repeat) events too
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    // Ctrl+C always quits immediately regardless of mode
    if ctrl && key_event.code == KeyCode::Char('c') {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if ctrl && key_event.code == KeyCode::Char('q') {
        view_state.confirm_quit = true;
        return None;
    }

    match view_state.phase {
        RevealPhase::Idle => handle_idle(key_event, ctrl, view_state),
        RevealPhase::Revealing | RevealPhase::Complete => handle_drafting(key_event, view_state),
    }
}

/// Handle key events while in quit confirmation mode.
///
/// - `y` or `q` confirms quit
/// - `n` or `Esc` cancels
/// - All other keys are blocked
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Idle: the roster is editable and printable keys go to the entry fields.
fn handle_idle(key_event: KeyEvent, ctrl: bool, view_state: &mut ViewState) -> Option<UserCommand> {
    if ctrl {
        return match key_event.code {
            KeyCode::Char('w') => {
                let weighted = !view_state.weighted_mode;
                if !weighted {
                    view_state.input_field = InputField::Name;
                }
                Some(UserCommand::SetWeightedMode(weighted))
            }
            KeyCode::Char('d') if view_state.teams.len() > 1 => Some(UserCommand::StartDraft),
            _ => None,
        };
    }

    match key_event.code {
        KeyCode::Enter => submit_team(view_state),
        KeyCode::Tab | KeyCode::BackTab => {
            if view_state.weighted_mode {
                view_state.input_field = match view_state.input_field {
                    InputField::Name => InputField::Ballots,
                    InputField::Ballots => InputField::Name,
                };
            }
            None
        }
        KeyCode::Backspace => {
            match view_state.input_field {
                InputField::Name => view_state.name_input.pop(),
                InputField::Ballots => view_state.ballots_input.pop(),
            };
            None
        }
        KeyCode::Esc => {
            view_state.clear_inputs();
            None
        }
        KeyCode::Up => {
            view_state.selected = view_state.selected.saturating_sub(1);
            None
        }
        KeyCode::Down => {
            if view_state.selected + 1 < view_state.teams.len() {
                view_state.selected += 1;
            }
            None
        }
        KeyCode::Delete => view_state
            .selected_team()
            .map(|team| UserCommand::RemoveTeam {
                name: team.name.clone(),
            }),
        KeyCode::Char(c) => {
            match view_state.input_field {
                InputField::Name => view_state.name_input.push(c),
                InputField::Ballots => {
                    if c.is_ascii_digit() && view_state.ballots_input.len() < MAX_BALLOT_DIGITS {
                        view_state.ballots_input.push(c);
                    }
                }
            }
            None
        }
        _ => None,
    }
}

/// Build an AddTeam command from the entry fields.
///
/// The fields are cleared only when the name would be accepted, so a
/// rejected duplicate stays on screen for editing. Names still in flight to
/// the orchestrator count as taken.
fn submit_team(view_state: &mut ViewState) -> Option<UserCommand> {
    if !accepts_name(&view_state.teams, &view_state.name_input) {
        return None;
    }
    let name = normalize_name(&view_state.name_input).to_string();
    if view_state.pending_adds.contains(&name) {
        return None;
    }
    let ballots = if view_state.weighted_mode {
        view_state.ballots_input.parse::<u32>().unwrap_or(1)
    } else {
        1
    };
    view_state.pending_adds.push(name.clone());
    view_state.clear_inputs();
    Some(UserCommand::AddTeam { name, ballots })
}

/// Revealing or Complete: the roster is locked.
fn handle_drafting(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(UserCommand::ResetDraft),
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            view_state.confirm_quit = true;
            None
        }
        KeyCode::Esc => {
            view_state.celebration = None;
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
