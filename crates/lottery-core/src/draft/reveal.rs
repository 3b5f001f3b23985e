// Reveal lifecycle: Idle -> Revealing -> Complete, and back to Idle on reset.
//
// This is the pure state machine. Scheduling the ticks that drive `advance`
// belongs to the orchestrator, which owns the timer handle.

use serde::{Deserialize, Serialize};

use super::order::DraftOrder;

/// Where the reveal currently stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealPhase {
    /// No draft drawn. The roster is editable.
    #[default]
    Idle,
    /// A draft order exists and picks are being revealed one per tick.
    Revealing,
    /// Every pick has been revealed.
    Complete,
}

/// Result of a transition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// A new position was revealed and more remain.
    Revealed { index: usize },
    /// The final position (first overall pick) was revealed. Returned exactly
    /// once per draft run.
    Completed { index: usize },
    /// The transition does not apply in the current phase.
    Ignored,
}

/// Draft order plus reveal progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealState {
    order: DraftOrder,
    current: Option<usize>,
    phase: RevealPhase,
}

impl RevealState {
    pub fn new() -> Self {
        RevealState::default()
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn order(&self) -> &DraftOrder {
        &self.order
    }

    /// Index of the most recently revealed position, `None` before anything
    /// is revealed.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Signed reveal index: -1 when nothing is revealed.
    pub fn reveal_index(&self) -> i64 {
        self.current.map_or(-1, |i| i as i64)
    }

    /// Revealed positions in reveal order (last pick first).
    pub fn revealed(&self) -> &[String] {
        match self.current {
            Some(i) => &self.order.as_slice()[..=i],
            None => &[],
        }
    }

    /// Begin revealing a freshly drawn order.
    ///
    /// Only valid from `Idle`. The first position is revealed immediately; a
    /// one-team order completes on the spot.
    pub fn start(&mut self, order: DraftOrder) -> RevealStep {
        if self.phase != RevealPhase::Idle || order.is_empty() {
            return RevealStep::Ignored;
        }
        self.order = order;
        self.current = Some(0);
        if self.order.last_index() == Some(0) {
            self.phase = RevealPhase::Complete;
            RevealStep::Completed { index: 0 }
        } else {
            self.phase = RevealPhase::Revealing;
            RevealStep::Revealed { index: 0 }
        }
    }

    /// Reveal the next position. Only valid while `Revealing`.
    pub fn advance(&mut self) -> RevealStep {
        if self.phase != RevealPhase::Revealing {
            return RevealStep::Ignored;
        }
        let (Some(current), Some(last)) = (self.current, self.order.last_index()) else {
            return RevealStep::Ignored;
        };
        if current >= last {
            // Unreachable through start/advance; keep the index pinned.
            self.phase = RevealPhase::Complete;
            return RevealStep::Ignored;
        }

        let next = current + 1;
        self.current = Some(next);
        if next == last {
            self.phase = RevealPhase::Complete;
            RevealStep::Completed { index: next }
        } else {
            RevealStep::Revealed { index: next }
        }
    }

    /// Discard the draft order and return to `Idle`.
    pub fn reset(&mut self) {
        self.order = DraftOrder::default();
        self.current = None;
        self.phase = RevealPhase::Idle;
    }
}
