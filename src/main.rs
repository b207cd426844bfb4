//! Salty Wager Bot - Entry Point
//!
//! Initializes configuration, logging and adapters, then runs the
//! betting loop until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Create ApiClient + CurrentMatchFeed (MatchFeed port)
//! 4. Create PaperExecution (BetExecution port)
//! 5. Create FileSettingsStore + DecisionLog
//! 6. Restore lifetime winnings from the last journaled decision
//! 7. Spawn metrics server + health server (/live + /ready)
//! 8. Spawn BettingLoop (interval-driven tokio::select!)
//! 9. Wait for SIGINT → graceful shutdown

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use salty_wager_bot::adapters::api::{ApiClient, ApiClientConfig, CurrentMatchFeed};
use salty_wager_bot::adapters::execution::PaperExecution;
use salty_wager_bot::adapters::metrics::{HealthServer, HealthState, MetricsRegistry};
use salty_wager_bot::adapters::persistence::DecisionLog;
use salty_wager_bot::adapters::settings::FileSettingsStore;
use salty_wager_bot::config;
use salty_wager_bot::ports::execution::BetExecution;
use salty_wager_bot::ports::journal::DecisionJournal;
use salty_wager_bot::usecases::{BettingLoop, DecisionEngine, WinningsTracker};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.bot.log_level)),
        )
        .json()
        .init();

    info!(
        name = %config.bot.name,
        version = env!("CARGO_PKG_VERSION"),
        dry_run = config.bot.dry_run,
        "Starting Salty Wager Bot"
    );

    anyhow::ensure!(
        config.bot.dry_run,
        "Live betting is not available; set bot.dry_run = true"
    );

    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);

    // ── 3. Match feed over the match-data API ───────────────
    let client = ApiClient::new(ApiClientConfig {
        base_url: config.api.base_url.clone(),
        timeout: config.api.timeout(),
        max_retries: config.api.max_retries,
        retry_base_delay: Duration::from_millis(200),
    })
    .context("Failed to create API client")?;
    let feed = Arc::new(CurrentMatchFeed::new(
        client,
        &config.api.current_match_path,
        &config.api.client_version,
    ));

    // ── 4. Paper wallet ─────────────────────────────────────
    let starting_balance = config.paper.starting_balance;
    let execution = Arc::new(match config.bot.rng_seed {
        Some(seed) => PaperExecution::seeded(starting_balance, seed),
        None => PaperExecution::new(starting_balance),
    });
    warn!(
        balance = starting_balance,
        "Dry-run mode: bets go to a paper wallet"
    );

    // ── 5. Settings store + decision log ────────────────────
    let settings = Arc::new(FileSettingsStore::new(&config.settings.path));
    let journal = Arc::new(
        DecisionLog::new(&config.persistence.data_dir)
            .await
            .context("Failed to open decision log")?,
    );

    // ── 6. Restore lifetime winnings ────────────────────────
    let winnings = match journal.latest().await {
        Ok(Some(record)) => {
            info!(total = record.total_winnings, "Restored winnings from decision log");
            WinningsTracker::with_total(record.total_winnings)
        }
        Ok(None) => WinningsTracker::new(),
        Err(e) => {
            warn!(error = %e, "Could not read last decision, starting winnings at zero");
            WinningsTracker::new()
        }
    };

    // ── 7. Metrics + health servers ─────────────────────────
    let health = Arc::new(HealthState::new());
    let health_server = HealthServer::new(Arc::clone(&health), config.metrics.health_port);
    let health_shutdown = shutdown_tx.subscribe();
    let health_handle = tokio::spawn(async move {
        if let Err(e) = health_server.run(health_shutdown).await {
            error!(error = %e, "Health server failed");
        }
    });

    let metrics = Arc::new(MetricsRegistry::new().context("Failed to register metrics")?);
    let metrics_handle = if config.metrics.enabled {
        let metrics_ref = Arc::clone(&metrics);
        let bind = config.metrics.bind_address.clone();
        let metrics_shutdown = shutdown_tx.subscribe();
        Some(tokio::spawn(async move {
            if let Err(e) = metrics_ref.serve(bind, metrics_shutdown).await {
                error!(error = %e, "Metrics server failed");
            }
        }))
    } else {
        None
    };

    // ── 8. Betting loop ─────────────────────────────────────
    let engine = config
        .bot
        .rng_seed
        .map_or_else(DecisionEngine::new, DecisionEngine::seeded);
    let mut betting_loop = BettingLoop::new(
        feed,
        Arc::clone(&execution),
        settings,
        journal,
        engine,
        config.polling.interval(),
    )
    .with_winnings(winnings)
    .with_metrics(Arc::clone(&metrics))
    .with_health(Arc::clone(&health));

    let loop_shutdown = shutdown_tx.subscribe();
    let loop_handle = tokio::spawn(async move {
        if let Err(e) = betting_loop.run(loop_shutdown).await {
            error!(error = %e, "Betting loop failed");
        }
        betting_loop.winnings()
    });

    info!("All tasks spawned, bot is running");

    // ── 9. Wait for SIGINT ──────────────────────────────────
    if let Err(e) = signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for SIGINT");
    }
    info!("SIGINT received, initiating graceful shutdown");

    let _ = shutdown_tx.send(());

    match tokio::time::timeout(Duration::from_secs(10), loop_handle).await {
        Ok(Ok(winnings)) => info!(
            total = winnings.total,
            session = winnings.session,
            "Betting loop stopped"
        ),
        Ok(Err(e)) => error!(error = %e, "Betting loop task panicked"),
        Err(_) => warn!("Betting loop did not stop in time"),
    }

    let _ = tokio::time::timeout(Duration::from_secs(5), health_handle).await;
    if let Some(handle) = metrics_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }

    info!(
        recent_bets = execution.placed_bets().await.len(),
        balance = execution.available_balance().await.ok(),
        "Shutdown complete"
    );
    Ok(())
}
