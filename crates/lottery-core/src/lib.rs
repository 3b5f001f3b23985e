// Library root: roster management, the weighted draft-order draw, the reveal
// state machine, and the types shared between the orchestrator and the TUI.

pub mod config;
pub mod draft;
pub mod effects;
pub mod import;
pub mod protocol;
pub mod roster;
