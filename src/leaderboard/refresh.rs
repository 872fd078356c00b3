use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::builder::LeaderboardBuilder;
use super::models::LeaderboardSnapshot;

/// Configuration for leaderboard refresh subscriptions
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// How often a subscribed leaderboard is rebuilt
    pub interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
        }
    }
}

/// Hands out leaderboard subscriptions, each backed by its own periodic task
#[derive(Clone)]
pub struct RefreshScheduler {
    builder: Arc<LeaderboardBuilder>,
    config: RefreshConfig,
}

impl RefreshScheduler {
    pub fn new(builder: Arc<LeaderboardBuilder>, config: RefreshConfig) -> Self {
        Self { builder, config }
    }

    /// Starts refreshing `modality_id`: one snapshot right away, then one
    /// per interval until the subscription is dropped or unsubscribed.
    pub fn subscribe(&self, modality_id: &str) -> LeaderboardSubscription {
        let sequence = Arc::new(AtomicU64::new(0));
        let worker = self.spawn_worker(modality_id, Arc::clone(&sequence));
        LeaderboardSubscription {
            scheduler: self.clone(),
            modality_id: modality_id.to_string(),
            sequence,
            worker,
        }
    }

    fn spawn_worker(&self, modality_id: &str, sequence: Arc<AtomicU64>) -> RefreshWorker {
        let (sender, receiver) = watch::channel(None);
        let cancel = CancellationToken::new();

        let task = tokio::spawn(run_refresh_loop(
            Arc::clone(&self.builder),
            modality_id.to_string(),
            self.config.interval,
            sequence,
            sender,
            cancel.clone(),
        ));

        RefreshWorker {
            receiver,
            cancel,
            task: Some(task),
        }
    }
}

struct RefreshWorker {
    receiver: watch::Receiver<Option<LeaderboardSnapshot>>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RefreshWorker {
    /// Cancels the loop and waits for it to exit. A build already in flight
    /// is allowed to finish; its snapshot is discarded.
    async fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Leaderboard refresh task ended abnormally");
            }
        }
    }
}

/// A consumer's handle on a live leaderboard.
///
/// Only the latest snapshot is kept: a consumer that falls behind skips
/// straight to the newest one. Sequence numbers keep increasing across
/// `select_modality` calls. Dropping the handle cancels the refresh task
/// before its next tick.
pub struct LeaderboardSubscription {
    scheduler: RefreshScheduler,
    modality_id: String,
    sequence: Arc<AtomicU64>,
    worker: RefreshWorker,
}

impl LeaderboardSubscription {
    pub fn modality_id(&self) -> &str {
        &self.modality_id
    }

    /// Waits for a snapshot newer than the last one returned, then returns
    /// the latest. Returns `None` once the subscription stopped.
    pub async fn recv(&mut self) -> Option<LeaderboardSnapshot> {
        loop {
            self.worker.receiver.changed().await.ok()?;
            let latest = self.worker.receiver.borrow_and_update().clone();
            if latest.is_some() {
                return latest;
            }
        }
    }

    /// Points the subscription at another modality.
    ///
    /// The previous task is fully stopped before the new one starts, and an
    /// unread snapshot of the old modality is discarded.
    #[instrument(skip(self), fields(from = %self.modality_id))]
    pub async fn select_modality(&mut self, modality_id: &str) {
        self.worker.stop().await;
        self.worker = self
            .scheduler
            .spawn_worker(modality_id, Arc::clone(&self.sequence));
        self.modality_id = modality_id.to_string();
        info!("Leaderboard subscription switched modality");
    }

    /// Stops all future deliveries and waits for the refresh task to exit
    pub async fn unsubscribe(mut self) {
        self.worker.stop().await;
        debug!(modality_id = %self.modality_id, "Leaderboard subscription closed");
    }
}

impl Drop for LeaderboardSubscription {
    fn drop(&mut self) {
        self.worker.cancel.cancel();
    }
}

#[instrument(skip(builder, sequence, sender, cancel))]
async fn run_refresh_loop(
    builder: Arc<LeaderboardBuilder>,
    modality_id: String,
    period: Duration,
    sequence: Arc<AtomicU64>,
    sender: watch::Sender<Option<LeaderboardSnapshot>>,
    cancel: CancellationToken,
) {
    info!(interval_ms = period.as_millis() as u64, "Leaderboard refresh started");

    let mut ticker = interval(period);
    // A slow build skips the ticks it overran instead of queueing them
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut deliveries = 0u64;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        // Not raced against cancellation: a started build always completes
        let entries = builder.build_leaderboard(&modality_id).await;
        if cancel.is_cancelled() {
            break;
        }

        let snapshot = LeaderboardSnapshot {
            modality_id: modality_id.clone(),
            sequence: sequence.fetch_add(1, Ordering::SeqCst) + 1,
            built_at: Utc::now(),
            entries,
        };

        // Replaces any snapshot the subscriber has not read yet
        if sender.send(Some(snapshot)).is_err() {
            debug!("Subscriber went away");
            break;
        }
        deliveries += 1;
    }

    info!(deliveries, "Leaderboard refresh stopped");
}
