// Draft sequencing: the weighted draw and the timed reveal lifecycle.

pub mod order;
pub mod reveal;

use thiserror::Error;

pub use order::{compute_draft_order, DraftOrder};
pub use reveal::{RevealPhase, RevealState, RevealStep};

/// Reasons a draft cannot start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("a draft needs more than one team, roster has {count}")]
    NotEnoughTeams { count: usize },

    #[error("a draft can only start from idle, current phase is {phase:?}")]
    NotIdle { phase: RevealPhase },
}
