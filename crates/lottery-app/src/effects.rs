// Effects delivered to the TUI over the UI channel.

use tokio::sync::mpsc;
use tracing::debug;

use lottery_core::effects::DraftEffects;
use lottery_core::protocol::{SoundtrackStatus, UiUpdate};

/// Forwards draft effects to the TUI as `UiUpdate`s.
///
/// Sends never block and failures are dropped: a full or closed UI channel
/// must not stall the draft.
pub struct ChannelEffects {
    ui_tx: mpsc::Sender<UiUpdate>,
    soundtrack: bool,
}

impl ChannelEffects {
    /// `soundtrack = false` suppresses the theme updates but still
    /// celebrates.
    pub fn new(ui_tx: mpsc::Sender<UiUpdate>, soundtrack: bool) -> Self {
        ChannelEffects { ui_tx, soundtrack }
    }

    fn send(&self, update: UiUpdate) {
        if let Err(e) = self.ui_tx.try_send(update) {
            debug!("Dropped effect update: {}", e);
        }
    }

    fn theme(&self, status: SoundtrackStatus) {
        if self.soundtrack {
            self.send(UiUpdate::Soundtrack(status));
        }
    }
}

impl DraftEffects for ChannelEffects {
    fn play_theme(&mut self) {
        self.theme(SoundtrackStatus::Playing);
    }

    fn pause_theme(&mut self) {
        self.theme(SoundtrackStatus::Paused);
    }

    fn stop_theme(&mut self) {
        self.theme(SoundtrackStatus::Stopped);
    }

    fn celebrate(&mut self, first_overall: &str) {
        self.send(UiUpdate::Celebrate {
            first_overall: first_overall.to_string(),
        });
    }
}
