// Messages exchanged between the orchestrator and the TUI.
//
// The TUI sends `UserCommand`s; the orchestrator answers with `UiUpdate`s.
// The orchestrator is the only writer of roster and draft state.

use chrono::{DateTime, Local};

use crate::draft::{DraftOrder, RevealPhase};
use crate::roster::Team;

/// Commands from the TUI to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    AddTeam { name: String, ballots: u32 },
    RemoveTeam { name: String },
    SetWeightedMode(bool),
    StartDraft,
    ResetDraft,
    Quit,
}

/// Soundtrack state as last reported by the effects layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SoundtrackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Updates from the orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Full state after any change.
    StateSnapshot(Box<AppSnapshot>),
    /// The soundtrack changed state.
    Soundtrack(SoundtrackStatus),
    /// The first overall pick was revealed.
    Celebrate { first_overall: String },
}

/// Everything the TUI needs to render.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub title: String,
    pub teams: Vec<Team>,
    pub weighted_mode: bool,
    pub phase: RevealPhase,
    pub draft_order: DraftOrder,
    /// Most recently revealed index; `None` before anything is revealed.
    pub current_reveal: Option<usize>,
    /// When the current draft order was drawn.
    pub drawn_at: Option<DateTime<Local>>,
    /// Seconds between reveals.
    pub reveal_interval_secs: u64,
}

impl AppSnapshot {
    /// Positions revealed so far, in reveal order (last pick first).
    pub fn revealed(&self) -> &[String] {
        match self.current_reveal {
            Some(i) if i < self.draft_order.len() => &self.draft_order.as_slice()[..=i],
            _ => &[],
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == RevealPhase::Complete
    }
}
