use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use scoreboard::{
    score::{ModalitySnapshot, Score},
    Competition, InMemoryScoreStore, Modality, ScoreStore, ScoringError, Team,
};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Wraps the in-memory store and counts how many leaderboard builds read it.
/// With a build delay, every snapshot read sleeps first, which makes builds slow.
#[derive(Clone)]
pub struct CountingStore {
    inner: Arc<InMemoryScoreStore>,
    build_delay: Duration,
    snapshot_reads: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::with_build_delay(Duration::ZERO)
    }

    pub fn with_build_delay(build_delay: Duration) -> Self {
        Self {
            inner: Arc::new(InMemoryScoreStore::new()),
            build_delay,
            snapshot_reads: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn snapshot_reads(&self) -> usize {
        self.snapshot_reads.load(Ordering::SeqCst)
    }

    /// Highest number of snapshot reads that were running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScoreStore for CountingStore {
    async fn create_competition(
        &self,
        competition: Competition,
    ) -> Result<Competition, ScoringError> {
        self.inner.create_competition(competition).await
    }

    async fn list_competitions(&self) -> Vec<Competition> {
        self.inner.list_competitions().await
    }

    async fn active_competition(&self) -> Option<Competition> {
        self.inner.active_competition().await
    }

    async fn create_modality(&self, modality: Modality) -> Result<Modality, ScoringError> {
        self.inner.create_modality(modality).await
    }

    async fn update_modality(&self, modality: Modality) -> Result<Modality, ScoringError> {
        self.inner.update_modality(modality).await
    }

    async fn get_modality(&self, modality_id: &str) -> Option<Modality> {
        self.inner.get_modality(modality_id).await
    }

    async fn list_modalities(&self) -> Vec<Modality> {
        self.inner.list_modalities().await
    }

    async fn remove_modality(&self, modality_id: &str) -> Result<(), ScoringError> {
        self.inner.remove_modality(modality_id).await
    }

    async fn create_team(&self, team: Team) -> Result<Team, ScoringError> {
        self.inner.create_team(team).await
    }

    async fn update_team(&self, team: Team) -> Result<Team, ScoringError> {
        self.inner.update_team(team).await
    }

    async fn get_team(&self, team_id: &str) -> Option<Team> {
        self.inner.get_team(team_id).await
    }

    async fn list_teams(&self, modality_id: Option<&str>) -> Vec<Team> {
        self.inner.list_teams(modality_id).await
    }

    async fn remove_team(&self, team_id: &str) -> Result<(), ScoringError> {
        self.inner.remove_team(team_id).await
    }

    async fn upsert(
        &self,
        team_id: &str,
        modality_id: &str,
        round: u32,
        value: f64,
    ) -> Result<Score, ScoringError> {
        self.inner.upsert(team_id, modality_id, round, value).await
    }

    async fn query(&self, team_id: Option<&str>, modality_id: Option<&str>) -> Vec<Score> {
        self.inner.query(team_id, modality_id).await
    }

    async fn modality_snapshot(&self, modality_id: &str) -> Option<ModalitySnapshot> {
        self.snapshot_reads.fetch_add(1, Ordering::SeqCst);
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        if !self.build_delay.is_zero() {
            tokio::time::sleep(self.build_delay).await;
        }
        let snapshot = self.inner.modality_snapshot(modality_id).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        snapshot
    }
}
