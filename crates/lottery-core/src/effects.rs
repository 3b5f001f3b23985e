// Effect collaborators fired by the draft lifecycle.
//
// Effects are fire-and-forget: the orchestrator never consumes a result and a
// failing effect never affects draft state.

/// Soundtrack and celebration hooks.
///
/// `Sync` lets the orchestrator state be borrowed inside the spawned event
/// loop.
pub trait DraftEffects: Send + Sync {
    /// Start (or resume) the draft theme. Fired when a draft starts.
    fn play_theme(&mut self);
    /// Pause the theme where it is. Fired when the reveal completes.
    fn pause_theme(&mut self);
    /// Pause and rewind the theme. Fired on reset.
    fn stop_theme(&mut self);
    /// Celebrate the first overall pick. Fired once per draft run.
    fn celebrate(&mut self, first_overall: &str);
}

/// Effects that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEffects;

impl DraftEffects for NoEffects {
    fn play_theme(&mut self) {}
    fn pause_theme(&mut self) {}
    fn stop_theme(&mut self) {}
    fn celebrate(&mut self, _first_overall: &str) {}
}
