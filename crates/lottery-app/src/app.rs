// Application state and orchestration logic.
//
// The orchestrator owns the roster and the reveal state and is their only
// writer. It consumes user commands from the TUI and ticks from the reveal
// timer, and pushes state snapshots back to the TUI render loop.

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use lottery_core::config::Config;
use lottery_core::draft::{compute_draft_order, DraftError, RevealPhase, RevealState, RevealStep};
use lottery_core::effects::DraftEffects;
use lottery_core::protocol::{AppSnapshot, UiUpdate, UserCommand};
use lottery_core::roster::{clamp_ballots, Roster, Team};

use crate::timer::{RevealTimer, TimerEvent};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub roster: Roster,
    pub weighted_mode: bool,
    pub reveal: RevealState,
    /// When the current draft order was drawn. `None` while idle.
    pub drawn_at: Option<DateTime<Local>>,
    timer: RevealTimer,
    effects: Box<dyn DraftEffects>,
    rng: StdRng,
}

impl AppState {
    /// Create the application state.
    ///
    /// `timer_tx` is the sending half of the channel whose receiver is passed
    /// to [`run`]; the reveal timer reports its ticks through it.
    pub fn new(
        config: Config,
        effects: Box<dyn DraftEffects>,
        timer_tx: mpsc::Sender<TimerEvent>,
    ) -> Self {
        let rng = match config.lottery.seed {
            Some(seed) => {
                info!("Seeding draft RNG from config (seed: {})", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_rng(&mut rand::rng()),
        };

        AppState {
            weighted_mode: config.lottery.weighted_mode,
            config,
            roster: Roster::new(),
            reveal: RevealState::new(),
            drawn_at: None,
            timer: RevealTimer::new(timer_tx),
            effects,
            rng,
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.reveal.phase()
    }

    /// Seed the roster with teams loaded before the TUI starts. Goes through
    /// `add_team`, so blank and duplicate names are skipped. Returns how many
    /// teams were added.
    pub fn seed_roster(&mut self, teams: &[Team]) -> usize {
        let added = teams
            .iter()
            .filter(|t| self.roster.add_team(&t.name, t.ballots))
            .count();
        if added < teams.len() {
            warn!(
                "Skipped {} seeded team(s) with blank or duplicate names",
                teams.len() - added
            );
        }
        added
    }

    /// Add a team. Only allowed while idle; rejections are silent.
    pub fn add_team(&mut self, name: &str, ballots: u32) -> bool {
        if self.phase() != RevealPhase::Idle {
            debug!("Ignoring add of '{}' outside idle phase", name);
            return false;
        }
        let added = self.roster.add_team(name, ballots);
        if added {
            info!("Added team '{}' ({} ballots)", name.trim(), clamp_ballots(ballots));
        }
        added
    }

    /// Remove a team by exact name. Only allowed while idle.
    pub fn remove_team(&mut self, name: &str) -> bool {
        if self.phase() != RevealPhase::Idle {
            debug!("Ignoring removal of '{}' outside idle phase", name);
            return false;
        }
        let removed = self.roster.remove_team(name);
        if removed {
            info!("Removed team '{}'", name);
        }
        removed
    }

    /// Toggle weighted mode. Only allowed while idle.
    pub fn set_weighted_mode(&mut self, weighted: bool) -> bool {
        if self.phase() != RevealPhase::Idle {
            return false;
        }
        self.weighted_mode = weighted;
        info!("Weighted mode {}", if weighted { "on" } else { "off" });
        true
    }

    /// Draw a fresh draft order and begin the timed reveal.
    pub fn start_draft(&mut self) -> Result<RevealStep, DraftError> {
        let phase = self.phase();
        if phase != RevealPhase::Idle {
            return Err(DraftError::NotIdle { phase });
        }
        if !self.roster.can_draft() {
            return Err(DraftError::NotEnoughTeams {
                count: self.roster.len(),
            });
        }

        let snapshot = self.roster.draw_snapshot(self.weighted_mode);
        let order = compute_draft_order(&snapshot, &mut self.rng);
        info!(
            "Drew draft order for {} teams (weighted: {})",
            order.len(),
            self.weighted_mode
        );

        self.drawn_at = Some(Local::now());
        let step = self.reveal.start(order);
        self.effects.play_theme();

        match step {
            RevealStep::Revealed { .. } => {
                self.timer.schedule(self.config.reveal.interval());
            }
            RevealStep::Completed { .. } => self.finish_reveal(),
            RevealStep::Ignored => {}
        }
        Ok(step)
    }

    /// Handle a reveal timer event. Returns the resulting step; stale events
    /// from a cancelled timer are `Ignored`.
    pub fn handle_timer_event(&mut self, event: TimerEvent) -> RevealStep {
        if !self.timer.is_current(&event) {
            debug!(
                "Discarding stale reveal tick (event gen: {}, current gen: {})",
                event.generation(),
                self.timer.generation()
            );
            return RevealStep::Ignored;
        }

        let step = self.reveal.advance();
        match step {
            RevealStep::Revealed { index } => {
                info!(
                    "Revealed pick #{}",
                    self.reveal.order().pick_number(index).unwrap_or(0)
                );
            }
            RevealStep::Completed { .. } => self.finish_reveal(),
            RevealStep::Ignored => {
                // Ticking outside Revealing means the timer outlived its draft.
                warn!("Reveal tick with nothing left to reveal, cancelling timer");
                self.timer.cancel();
            }
        }
        step
    }

    /// Leaving Revealing for Complete: stop ticking, pause the theme,
    /// celebrate the first overall pick.
    fn finish_reveal(&mut self) {
        self.timer.cancel();
        self.effects.pause_theme();
        let first_overall = self.reveal.order().first_overall().unwrap_or_default();
        info!("Draft complete, first overall pick: {}", first_overall);
        self.effects.celebrate(first_overall);
    }

    /// Discard the draft and return to idle. Allowed from any phase.
    pub fn reset_draft(&mut self) {
        self.timer.cancel();
        self.reveal.reset();
        self.drawn_at = None;
        self.effects.stop_theme();
        info!("Draft reset");
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Build an `AppSnapshot` from the current state.
    pub fn build_snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            title: self.config.lottery.title.clone(),
            teams: self.roster.to_vec(),
            weighted_mode: self.weighted_mode,
            phase: self.reveal.phase(),
            draft_order: self.reveal.order().clone(),
            current_reveal: self.reveal.current_index(),
            drawn_at: self.drawn_at,
            reveal_interval_secs: self.config.reveal.interval_secs,
        }
    }

    /// Stop everything that outlives a single event. Called on shutdown.
    pub fn shutdown(&mut self) {
        self.timer.cancel();
        self.effects.stop_theme();
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the application event loop.
///
/// Listens on two channels using `tokio::select!`:
/// 1. User commands from the TUI
/// 2. Reveal timer ticks
///
/// Pushes a state snapshot through `ui_tx` after every command and every tick
/// that changed the reveal.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut timer_rx: mpsc::Receiver<TimerEvent>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    // Initial snapshot so the TUI can render seeded teams and the title.
    send_snapshot(state.build_snapshot(), &ui_tx).await;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd);
                        send_snapshot(state.build_snapshot(), &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // AppState holds a sender, so this channel never closes while
            // the loop runs.
            Some(event) = timer_rx.recv() => {
                if state.handle_timer_event(event) != RevealStep::Ignored {
                    send_snapshot(state.build_snapshot(), &ui_tx).await;
                }
            }
        }
    }

    state.shutdown();
    info!("Application event loop exiting");
    Ok(())
}

/// Apply a user command to the state.
fn handle_user_command(state: &mut AppState, cmd: UserCommand) {
    match cmd {
        UserCommand::AddTeam { name, ballots } => {
            let ballots = if state.weighted_mode { ballots } else { 1 };
            state.add_team(&name, ballots);
        }
        UserCommand::RemoveTeam { name } => {
            state.remove_team(&name);
        }
        UserCommand::SetWeightedMode(weighted) => {
            state.set_weighted_mode(weighted);
        }
        UserCommand::StartDraft => {
            if let Err(e) = state.start_draft() {
                warn!("Draft not started: {}", e);
            }
        }
        UserCommand::ResetDraft => state.reset_draft(),
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
}

/// Takes the built snapshot rather than the state so no borrow of the state
/// lives inside the send future.
async fn send_snapshot(snapshot: AppSnapshot, ui_tx: &mpsc::Sender<UiUpdate>) {
    let _ = ui_tx.send(UiUpdate::StateSnapshot(Box::new(snapshot))).await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use lottery_core::config::{EffectsConfig, LotteryConfig, RevealConfig, RosterConfig};
    use lottery_core::effects::NoEffects;

    #[derive(Debug, Clone, PartialEq)]
    enum Effect {
        Play,
        Pause,
        Stop,
        Celebrate(String),
    }

    #[derive(Clone, Default)]
    struct RecordingEffects(Arc<Mutex<Vec<Effect>>>);

    impl RecordingEffects {
        fn log(&self) -> Vec<Effect> {
            self.0.lock().unwrap().clone()
        }

        fn celebrations(&self) -> usize {
            self.log()
                .iter()
                .filter(|e| matches!(e, Effect::Celebrate(_)))
                .count()
        }
    }

    impl DraftEffects for RecordingEffects {
        fn play_theme(&mut self) {
            self.0.lock().unwrap().push(Effect::Play);
        }
        fn pause_theme(&mut self) {
            self.0.lock().unwrap().push(Effect::Pause);
        }
        fn stop_theme(&mut self) {
            self.0.lock().unwrap().push(Effect::Stop);
        }
        fn celebrate(&mut self, first_overall: &str) {
            self.0.lock().unwrap().push(Effect::Celebrate(first_overall.to_string()));
        }
    }

    fn test_config() -> Config {
        Config {
            lottery: LotteryConfig {
                title: "Test Lottery".into(),
                weighted_mode: false,
                seed: Some(7),
            },
            reveal: RevealConfig { interval_secs: 10 },
            effects: EffectsConfig::default(),
            roster: RosterConfig::default(),
        }
    }

    fn test_state() -> (AppState, RecordingEffects, mpsc::Receiver<TimerEvent>) {
        let effects = RecordingEffects::default();
        let (timer_tx, timer_rx) = mpsc::channel(16);
        let state = AppState::new(test_config(), Box::new(effects.clone()), timer_tx);
        (state, effects, timer_rx)
    }

    fn with_teams(state: &mut AppState, names: &[&str]) {
        for name in names {
            assert!(state.add_team(name, 1));
        }
    }

    #[tokio::test]
    async fn new_state_is_idle() {
        let (state, effects, _rx) = test_state();
        assert_eq!(state.phase(), RevealPhase::Idle);
        assert!(state.roster.is_empty());
        assert!(!state.weighted_mode);
        assert!(state.drawn_at.is_none());
        assert!(!state.timer_running());
        assert!(effects.log().is_empty());
    }

    #[tokio::test]
    async fn start_requires_more_than_one_team() {
        let (mut state, effects, _rx) = test_state();
        assert_eq!(
            state.start_draft(),
            Err(DraftError::NotEnoughTeams { count: 0 })
        );
        with_teams(&mut state, &["Eagles"]);
        assert_eq!(
            state.start_draft(),
            Err(DraftError::NotEnoughTeams { count: 1 })
        );
        assert_eq!(state.phase(), RevealPhase::Idle);
        assert!(effects.log().is_empty());
    }

    #[tokio::test]
    async fn start_reveals_first_position_and_schedules_timer() {
        let (mut state, effects, _rx) = test_state();
        with_teams(&mut state, &["A", "B", "C"]);

        let step = state.start_draft().unwrap();
        assert_eq!(step, RevealStep::Revealed { index: 0 });
        assert_eq!(state.phase(), RevealPhase::Revealing);
        assert_eq!(state.reveal.reveal_index(), 0);
        assert_eq!(state.reveal.order().len(), 3);
        assert!(state.drawn_at.is_some());
        assert!(state.timer_running());
        assert_eq!(effects.log(), vec![Effect::Play]);
    }

    #[tokio::test]
    async fn start_while_revealing_is_rejected() {
        let (mut state, _effects, _rx) = test_state();
        with_teams(&mut state, &["A", "B"]);
        state.start_draft().unwrap();
        let order = state.reveal.order().clone();

        assert_eq!(
            state.start_draft(),
            Err(DraftError::NotIdle { phase: RevealPhase::Revealing })
        );
        assert_eq!(state.reveal.order(), &order);
    }

    #[tokio::test]
    async fn roster_is_frozen_outside_idle() {
        let (mut state, _effects, _rx) = test_state();
        with_teams(&mut state, &["A", "B"]);
        state.start_draft().unwrap();

        assert!(!state.add_team("C", 1));
        assert!(!state.remove_team("A"));
        assert!(!state.set_weighted_mode(true));
        assert_eq!(state.roster.len(), 2);

        state.reset_draft();
        assert!(state.add_team("C", 1));
        assert!(state.remove_team("A"));
        assert!(state.set_weighted_mode(true));
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_advance_until_complete_then_celebrate_once() {
        let (mut state, effects, mut timer_rx) = test_state();
        with_teams(&mut state, &["A", "B", "C", "D"]);
        state.start_draft().unwrap();

        let mut completed = false;
        for expected in 1..=3 {
            let event = timer_rx.recv().await.unwrap();
            let step = state.handle_timer_event(event);
            assert_eq!(state.reveal.reveal_index(), expected);
            if expected == 3 {
                assert_eq!(step, RevealStep::Completed { index: 3 });
                completed = true;
            } else {
                assert_eq!(step, RevealStep::Revealed { index: expected as usize });
            }
        }

        assert!(completed);
        assert_eq!(state.phase(), RevealPhase::Complete);
        assert!(!state.timer_running());
        let first = state.reveal.order().first_overall().unwrap().to_string();
        assert_eq!(
            effects.log(),
            vec![Effect::Play, Effect::Pause, Effect::Celebrate(first)]
        );

        // No further ticks once complete
        let next = tokio::time::timeout(Duration::from_secs(60), timer_rx.recv()).await;
        assert!(next.is_err());
        assert_eq!(effects.celebrations(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_tick_after_reset_is_ignored() {
        let (mut state, effects, mut timer_rx) = test_state();
        with_teams(&mut state, &["A", "B", "C"]);
        state.start_draft().unwrap();

        // A tick is produced, then the draft is reset before it is handled
        let queued = timer_rx.recv().await.unwrap();
        state.reset_draft();
        assert_eq!(state.handle_timer_event(queued), RevealStep::Ignored);
        assert_eq!(state.phase(), RevealPhase::Idle);
        assert_eq!(state.reveal.reveal_index(), -1);

        // A new draft does not pick up the old tick either
        state.start_draft().unwrap();
        assert_eq!(state.handle_timer_event(queued), RevealStep::Ignored);
        assert_eq!(state.reveal.reveal_index(), 0);
        assert_eq!(effects.celebrations(), 0);
    }

    #[tokio::test]
    async fn reset_after_completion_restores_pre_draft_state() {
        let (mut state, effects, _rx) = test_state();
        with_teams(&mut state, &["A", "B"]);
        state.start_draft().unwrap();
        // Drive the last tick by hand with the live generation
        let event = TimerEvent::Tick { generation: state.timer.generation() };
        assert_eq!(state.handle_timer_event(event), RevealStep::Completed { index: 1 });

        state.reset_draft();
        let snapshot = state.build_snapshot();
        assert_eq!(snapshot.phase, RevealPhase::Idle);
        assert!(snapshot.draft_order.is_empty());
        assert_eq!(snapshot.current_reveal, None);
        assert!(snapshot.drawn_at.is_none());
        assert_eq!(snapshot.teams.len(), 2);
        assert_eq!(effects.log().last(), Some(&Effect::Stop));
        assert!(state.add_team("C", 1));
    }

    #[tokio::test]
    async fn unweighted_add_command_forces_one_ballot() {
        let (mut state, _effects, _rx) = test_state();
        handle_user_command(&mut state, UserCommand::AddTeam { name: "A".into(), ballots: 5 });
        assert_eq!(state.roster.to_vec()[0].ballots, 1);

        handle_user_command(&mut state, UserCommand::SetWeightedMode(true));
        handle_user_command(&mut state, UserCommand::AddTeam { name: "B".into(), ballots: 5 });
        assert_eq!(state.roster.to_vec()[1].ballots, 5);
    }

    #[tokio::test]
    async fn seed_roster_skips_duplicates_and_blanks() {
        let (mut state, _effects, _rx) = test_state();
        let added = state.seed_roster(&[
            Team::new("Eagles", 3),
            Team::new("", 1),
            Team::new("Eagles", 1),
            Team::new("Giants", 0),
        ]);
        assert_eq!(added, 2);
        assert_eq!(
            state.roster.to_vec(),
            vec![Team::new("Eagles", 3), Team::new("Giants", 1)]
        );
    }

    #[tokio::test]
    async fn snapshot_reflects_state() {
        let (mut state, _effects, _rx) = test_state();
        with_teams(&mut state, &["A", "B"]);
        state.start_draft().unwrap();

        let snapshot = state.build_snapshot();
        assert_eq!(snapshot.title, "Test Lottery");
        assert_eq!(snapshot.phase, RevealPhase::Revealing);
        assert_eq!(snapshot.current_reveal, Some(0));
        assert_eq!(snapshot.draft_order.len(), 2);
        assert_eq!(snapshot.revealed().len(), 1);
        assert_eq!(snapshot.reveal_interval_secs, 10);
    }

    fn assert_send<T: Send>(_: &T) {}

    #[tokio::test]
    async fn run_future_is_send() {
        let (state, _effects, timer_rx) = test_state();
        let (_cmd_tx, cmd_rx) = mpsc::channel(1);
        let (ui_tx, _ui_rx) = mpsc::channel(1);
        let fut = run(cmd_rx, timer_rx, ui_tx, state);
        assert_send(&fut);
    }

    #[tokio::test]
    async fn draft_runs_without_effects() {
        let (timer_tx, _timer_rx) = mpsc::channel(16);
        let mut state = AppState::new(test_config(), Box::new(NoEffects), timer_tx);
        with_teams(&mut state, &["A", "B"]);
        state.start_draft().unwrap();
        assert_eq!(state.phase(), RevealPhase::Revealing);
        state.reset_draft();
        assert_eq!(state.phase(), RevealPhase::Idle);
        assert_eq!(state.roster.len(), 2);
    }
}
