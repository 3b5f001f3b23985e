// Draft lottery entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config (copying defaults on first run)
// 3. Seed the roster from config and the optional CSV import
// 4. Create mpsc channels and the application state
// 5. Spawn the orchestrator task
// 6. Run the TUI until the user quits
// 7. Wait for the orchestrator to wind down

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use crossterm::terminal::SetTitle;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use lottery_app::app::{self, AppState};
use lottery_app::effects::ChannelEffects;
use lottery_core::config;
use lottery_core::import;
use lottery_tui::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Draft lottery starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: title={:?}, weighted={}, reveal every {}s",
        config.lottery.title, config.lottery.weighted_mode, config.reveal.interval_secs
    );

    let mut seed_teams = config.roster.teams.clone();
    if let Some(csv_path) = &config.roster.import_csv {
        let imported = import::load_teams(Path::new(csv_path))
            .with_context(|| format!("failed to import teams from {}", csv_path))?;
        info!("Imported {} teams from {}", imported.len(), csv_path);
        seed_teams.extend(imported);
    }

    let (timer_tx, timer_rx) = mpsc::channel(16);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    let celebration = Duration::from_secs(config.effects.celebration_secs);
    let effects = ChannelEffects::new(ui_tx.clone(), config.effects.soundtrack);
    if let Err(e) = crossterm::execute!(std::io::stdout(), SetTitle(&config.lottery.title)) {
        warn!("Could not set terminal title: {}", e);
    }

    let mut app_state = AppState::new(config, Box::new(effects), timer_tx);
    let seeded = app_state.seed_roster(&seed_teams);
    info!("Roster seeded with {} teams", seeded);

    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, timer_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    info!("Application ready");

    // Blocks until the user quits
    if let Err(e) = tui::run(ui_rx, cmd_tx, celebration).await {
        error!("TUI error: {}", e);
    }

    let _ = tokio::time::timeout(Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Draft lottery shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (the terminal belongs to the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("draft-lottery.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("draft_lottery=info,lottery_tui=info,lottery_app=info,lottery_core=info,warn")
        }))
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
