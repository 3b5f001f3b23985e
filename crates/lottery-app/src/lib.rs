// Draft orchestration: owns the roster and reveal state, drives the reveal
// timer and fires effects. Talks to the TUI only through channels.

pub mod app;
pub mod effects;
pub mod timer;
