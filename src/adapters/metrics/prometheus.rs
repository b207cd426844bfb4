//! Prometheus Metrics Registry - Betting Observability
//!
//! Registers and exposes Prometheus metrics for dashboards. Covers
//! decisions per strategy, placed wagers, no-bet outcomes, balance and
//! winnings.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use tokio::sync::broadcast;
use tracing::{info, instrument, warn};

use crate::domain::bet::Colour;
use crate::domain::strategy::BetMode;
use crate::domain::wager::SizingRule;

/// Centralized Prometheus metrics for the betting bot.
///
/// All metrics follow the naming convention `salty_bot_*`.
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
    /// Decisions made, by bet mode.
    pub decisions: IntCounterVec,
    /// Wagers placed, by colour.
    pub wagers_placed: IntCounterVec,
    /// Total amount staked, by colour.
    pub amount_wagered: IntCounterVec,
    /// Cycles that ended without a stake, by sizing rule.
    pub no_bets: IntCounterVec,
    /// Decisions rejected for an unknown bet mode.
    pub invalid_bet_mode: IntCounter,
    /// Current account balance.
    pub balance: IntGauge,
    /// Winnings since the session started.
    pub session_winnings: IntGauge,
}

impl MetricsRegistry {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let decisions = IntCounterVec::new(
            Opts::new("salty_bot_decisions_total", "Decisions made per bet mode"),
            &["bet_mode"],
        )?;

        let wagers_placed = IntCounterVec::new(
            Opts::new("salty_bot_wagers_placed_total", "Wagers placed per colour"),
            &["colour"],
        )?;

        let amount_wagered = IntCounterVec::new(
            Opts::new(
                "salty_bot_amount_wagered_total",
                "Total amount staked per colour",
            ),
            &["colour"],
        )?;

        let no_bets = IntCounterVec::new(
            Opts::new(
                "salty_bot_no_bet_total",
                "Decisions that produced no stake, by sizing rule",
            ),
            &["reason"],
        )?;

        let invalid_bet_mode = IntCounter::new(
            "salty_bot_invalid_bet_mode_total",
            "Decisions skipped because the bet mode was unknown",
        )?;

        let balance = IntGauge::new("salty_bot_balance", "Current account balance")?;

        let session_winnings = IntGauge::new(
            "salty_bot_session_winnings",
            "Balance change since the session started",
        )?;

        // Register all metrics
        registry.register(Box::new(decisions.clone()))?;
        registry.register(Box::new(wagers_placed.clone()))?;
        registry.register(Box::new(amount_wagered.clone()))?;
        registry.register(Box::new(no_bets.clone()))?;
        registry.register(Box::new(invalid_bet_mode.clone()))?;
        registry.register(Box::new(balance.clone()))?;
        registry.register(Box::new(session_winnings.clone()))?;

        Ok(Self {
            registry,
            decisions,
            wagers_placed,
            amount_wagered,
            no_bets,
            invalid_bet_mode,
            balance,
            session_winnings,
        })
    }

    pub fn record_decision(&self, mode: BetMode) {
        self.decisions.with_label_values(&[mode.as_str()]).inc();
    }

    pub fn record_wager(&self, colour: Colour, amount: u64) {
        let label = colour.to_string();
        self.wagers_placed.with_label_values(&[&label]).inc();
        self.amount_wagered.with_label_values(&[&label]).inc_by(amount);
    }

    pub fn record_no_bet(&self, rule: SizingRule) {
        self.no_bets.with_label_values(&[rule.as_str()]).inc();
    }

    pub fn set_balance(&self, balance: u64) {
        self.balance.set(i64::try_from(balance).unwrap_or(i64::MAX));
    }

    pub fn set_session_winnings(&self, winnings: i64) {
        self.session_winnings.set(winnings);
    }

    /// Render every registered metric in the text exposition format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buffer) {
            warn!(error = %e, "Failed to encode metrics");
        }
        String::from_utf8(buffer).unwrap_or_default()
    }

    /// Serve Prometheus metrics on the configured bind address.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn serve(
        self: Arc<Self>,
        bind_address: String,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> anyhow::Result<()> {
        let metrics_self = Arc::clone(&self);

        let app = Router::new().route(
            "/metrics",
            get(move || {
                let metrics = Arc::clone(&metrics_self);
                async move { metrics.render() }
            }),
        );

        let listener = tokio::net::TcpListener::bind(&bind_address).await?;
        info!(address = %bind_address, "Prometheus metrics server started");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_recorded_values() {
        let metrics = MetricsRegistry::new().unwrap();
        metrics.record_decision(BetMode::EloTier);
        metrics.record_wager(Colour::Blue, 40);
        metrics.record_wager(Colour::Blue, 2);
        metrics.record_no_bet(SizingRule::TierDisabled);
        metrics.set_balance(1234);
        metrics.set_session_winnings(-56);

        let text = metrics.render();
        assert!(text.contains(r#"salty_bot_decisions_total{bet_mode="eloTier"} 1"#));
        assert!(text.contains(r#"salty_bot_wagers_placed_total{colour="blue"} 2"#));
        assert!(text.contains(r#"salty_bot_amount_wagered_total{colour="blue"} 42"#));
        assert!(text.contains(r#"salty_bot_no_bet_total{reason="tier_disabled"} 1"#));
        assert!(text.contains("salty_bot_balance 1234"));
        assert!(text.contains("salty_bot_session_winnings -56"));
    }
}
