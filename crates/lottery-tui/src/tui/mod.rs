// TUI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the orchestrator's state plus the
// local entry fields. The orchestrator pushes `UiUpdate` messages over an
// mpsc channel; the TUI applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use lottery_core::draft::{DraftOrder, RevealPhase};
use lottery_core::protocol::{AppSnapshot, SoundtrackStatus, UiUpdate, UserCommand};
use lottery_core::roster::Team;

use layout::{build_layout, AppLayout};

/// How long the celebration overlay stays up unless configured otherwise.
pub const DEFAULT_CELEBRATION: Duration = Duration::from_secs(8);

// ---------------------------------------------------------------------------
// Local view types
// ---------------------------------------------------------------------------

/// Which entry field receives typed characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputField {
    #[default]
    Name,
    Ballots,
}

/// An active celebration overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Celebration {
    pub first_overall: String,
    pub until: Instant,
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the application state for rendering.
///
/// Snapshot fields are overwritten wholesale by `apply_snapshot`; entry
/// fields, selection and overlays are owned by the TUI.
pub struct ViewState {
    /// Lottery title from config.
    pub title: String,
    /// Roster in insertion order.
    pub teams: Vec<Team>,
    pub weighted_mode: bool,
    pub phase: RevealPhase,
    /// Drawn order in reveal order (last pick first).
    pub draft_order: DraftOrder,
    /// Most recently revealed index into `draft_order`.
    pub current_reveal: Option<usize>,
    /// When the current order was drawn.
    pub drawn_at: Option<DateTime<Local>>,
    /// Time between reveals, used for the countdown.
    pub reveal_interval: Duration,
    /// When `current_reveal` last moved, as seen by the TUI.
    pub last_reveal_at: Option<Instant>,

    /// Team name being typed.
    pub name_input: String,
    /// Ballot count being typed (digits only).
    pub ballots_input: String,
    pub input_field: InputField,
    /// Index of the highlighted team in `teams`.
    pub selected: usize,
    /// Names submitted since the last snapshot. `teams` does not list them
    /// yet, so they are checked separately.
    pub pending_adds: Vec<String>,

    pub soundtrack: SoundtrackStatus,
    pub celebration: Option<Celebration>,
    pub celebration_duration: Duration,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(DEFAULT_CELEBRATION)
    }
}

impl ViewState {
    pub fn new(celebration_duration: Duration) -> Self {
        ViewState {
            title: String::new(),
            teams: Vec::new(),
            weighted_mode: false,
            phase: RevealPhase::Idle,
            draft_order: DraftOrder::default(),
            current_reveal: None,
            drawn_at: None,
            reveal_interval: Duration::from_secs(10),
            last_reveal_at: None,
            name_input: String::new(),
            ballots_input: String::from("1"),
            input_field: InputField::Name,
            selected: 0,
            pending_adds: Vec::new(),
            soundtrack: SoundtrackStatus::Stopped,
            celebration: None,
            celebration_duration,
            confirm_quit: false,
        }
    }

    /// Apply a full state snapshot from the orchestrator.
    ///
    /// Entry fields are left alone. The selection is clamped to the new
    /// roster and the reveal countdown restarts whenever the reveal moves.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        if snapshot.current_reveal != self.current_reveal {
            self.last_reveal_at = snapshot.current_reveal.map(|_| Instant::now());
        }

        self.title = snapshot.title;
        self.teams = snapshot.teams;
        self.pending_adds.clear();
        self.weighted_mode = snapshot.weighted_mode;
        self.phase = snapshot.phase;
        self.draft_order = snapshot.draft_order;
        self.current_reveal = snapshot.current_reveal;
        self.drawn_at = snapshot.drawn_at;
        self.reveal_interval = Duration::from_secs(snapshot.reveal_interval_secs);

        if !self.weighted_mode {
            self.input_field = InputField::Name;
        }
        if self.phase == RevealPhase::Idle {
            self.celebration = None;
        }
        self.selected = self.selected.min(self.teams.len().saturating_sub(1));
    }

    /// Positions revealed so far, in reveal order.
    pub fn revealed(&self) -> &[String] {
        match self.current_reveal {
            Some(i) if i < self.draft_order.len() => &self.draft_order.as_slice()[..=i],
            _ => &[],
        }
    }

    /// The most recent reveal as `(pick number, team)`.
    pub fn latest_reveal(&self) -> Option<(usize, &str)> {
        let index = self.current_reveal?;
        let team = self.draft_order.get(index)?;
        let pick = self.draft_order.pick_number(index)?;
        Some((pick, team))
    }

    pub fn selected_team(&self) -> Option<&Team> {
        self.teams.get(self.selected)
    }

    /// Time left until the next reveal, while revealing.
    pub fn next_reveal_in(&self, now: Instant) -> Option<Duration> {
        if self.phase != RevealPhase::Revealing {
            return None;
        }
        let due = self.last_reveal_at?.checked_add(self.reveal_interval)?;
        Some(due.saturating_duration_since(now))
    }

    pub fn celebrating(&self, now: Instant) -> Option<&Celebration> {
        self.celebration.as_ref().filter(|c| now < c.until)
    }

    /// Drop the celebration overlay once its time is up.
    pub fn expire_celebration(&mut self, now: Instant) {
        if self.celebration.as_ref().is_some_and(|c| now >= c.until) {
            self.celebration = None;
        }
    }

    /// Reset the entry fields to their blank state.
    pub fn clear_inputs(&mut self) {
        self.name_input.clear();
        self.ballots_input = String::from("1");
        self.input_field = InputField::Name;
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::StateSnapshot(snapshot) => {
            state.apply_snapshot(*snapshot);
        }
        UiUpdate::Soundtrack(status) => {
            state.soundtrack = status;
        }
        UiUpdate::Celebrate { first_overall } => {
            let now = Instant::now();
            let until = now
                .checked_add(state.celebration_duration)
                .unwrap_or(now + DEFAULT_CELEBRATION);
            state.celebration = Some(Celebration { first_overall, until });
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());
    let now = Instant::now();

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::spotlight::render(frame, layout.spotlight, state, now);
    widgets::entry::render(frame, layout.entry, state);
    widgets::teams::render(frame, layout.teams, state);
    if state.phase == RevealPhase::Complete {
        widgets::final_order::render(frame, layout.board, state);
    } else {
        widgets::draft_board::render(frame, layout.board, state);
    }
    render_help_bar(frame, &layout, state);

    // Overlays render last so they sit on top
    if let Some(celebration) = state.celebrating(now) {
        widgets::celebration::render(frame, frame.area(), &celebration.first_overall);
    }
    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

/// Key hints for the current phase.
fn help_text(state: &ViewState) -> &'static str {
    match state.phase {
        RevealPhase::Idle if state.weighted_mode => {
            " Enter:Add | Tab:Name/Ballots | Up/Down:Select | Del:Remove | ^W:Weighted | ^D:Start | ^Q:Quit"
        }
        RevealPhase::Idle => {
            " Enter:Add | Up/Down:Select | Del:Remove | ^W:Weighted | ^D:Start | ^Q:Quit"
        }
        RevealPhase::Revealing => " r:Reset draft | q:Quit",
        RevealPhase::Complete => " r:Reset draft | Esc:Dismiss | q:Quit",
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    celebration_duration: Duration,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new(celebration_duration);
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: anyhow::Result<()> = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        debug!("UI channel closed, leaving TUI loop");
                        break Ok(());
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Resize and mouse events only need a redraw
                    }
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        let _ = cmd_tx.send(UserCommand::Quit).await;
                        break Err(e.into());
                    }
                    None => {
                        let _ = cmd_tx.send(UserCommand::Quit).await;
                        break Ok(());
                    }
                }
            }

            _ = render_tick.tick() => {
                view_state.expire_celebration(Instant::now());
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
