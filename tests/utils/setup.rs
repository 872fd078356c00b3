use std::sync::Arc;
use std::time::Duration;

use scoreboard::{
    AggregationMethod, LeaderboardBuilder, Modality, RefreshConfig, RefreshScheduler, ScoreStore,
    ScoringService, Team,
};

use super::mocks::CountingStore;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub store: CountingStore,
    pub builder: Arc<LeaderboardBuilder>,
    pub scoring: ScoringService,
    pub scheduler: RefreshScheduler,
}

impl TestSetup {
    pub async fn record(&self, team_id: &str, modality_id: &str, round: u32, value: f64) {
        self.scoring
            .record_score(team_id, modality_id, round, value)
            .await
            .unwrap();
    }
}

pub struct TestSetupBuilder {
    modalities: Vec<Modality>,
    teams: Vec<Team>,
    interval: Duration,
    build_delay: Duration,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            modalities: vec![],
            teams: vec![],
            interval: Duration::from_secs(5),
            build_delay: Duration::ZERO,
        }
    }

    pub fn with_modality(mut self, id: &str, rounds: u32, method: AggregationMethod) -> Self {
        self.modalities.push(Modality {
            id: id.to_string(),
            name: format!("Modality {id}"),
            description: String::new(),
            rounds,
            min_score: 0.0,
            max_score: 100.0,
            aggregation_method: method,
        });
        self
    }

    pub fn with_teams(mut self, modality_id: &str, team_ids: Vec<&str>) -> Self {
        for id in team_ids {
            self.teams.push(Team {
                id: id.to_string(),
                name: format!("Team {id}"),
                institution: "Test Institute".to_string(),
                members: vec!["alice".to_string()],
                modality_id: modality_id.to_string(),
            });
        }
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Makes every leaderboard build take `delay`
    pub fn with_build_delay(mut self, delay: Duration) -> Self {
        self.build_delay = delay;
        self
    }

    pub async fn build(self) -> TestSetup {
        let store = CountingStore::with_build_delay(self.build_delay);
        for modality in self.modalities {
            store.create_modality(modality).await.unwrap();
        }
        for team in self.teams {
            store.create_team(team).await.unwrap();
        }

        let shared: Arc<dyn ScoreStore> = Arc::new(store.clone());
        let builder = Arc::new(LeaderboardBuilder::new(Arc::clone(&shared)));
        let scoring = ScoringService::new(shared);
        let scheduler = RefreshScheduler::new(
            Arc::clone(&builder),
            RefreshConfig {
                interval: self.interval,
            },
        );

        TestSetup {
            store,
            builder,
            scoring,
            scheduler,
        }
    }
}
