use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::errors::ScoringError;
use super::models::{ModalitySnapshot, Score, ScoreKey};
use crate::competition::models::Competition;
use crate::modality::models::Modality;
use crate::team::models::Team;

/// Trait for the authoritative competition data store.
///
/// Every method is atomic with respect to the others: writes are serialized
/// and reads never observe a half-applied write.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn create_competition(
        &self,
        competition: Competition,
    ) -> Result<Competition, ScoringError>;
    async fn list_competitions(&self) -> Vec<Competition>;
    async fn active_competition(&self) -> Option<Competition>;

    async fn create_modality(&self, modality: Modality) -> Result<Modality, ScoringError>;
    async fn update_modality(&self, modality: Modality) -> Result<Modality, ScoringError>;
    async fn get_modality(&self, modality_id: &str) -> Option<Modality>;
    async fn list_modalities(&self) -> Vec<Modality>;
    /// Removes the modality only; its teams and scores are left in place
    async fn remove_modality(&self, modality_id: &str) -> Result<(), ScoringError>;

    async fn create_team(&self, team: Team) -> Result<Team, ScoringError>;
    async fn update_team(&self, team: Team) -> Result<Team, ScoringError>;
    async fn get_team(&self, team_id: &str) -> Option<Team>;
    /// Teams in registration order, optionally restricted to one modality
    async fn list_teams(&self, modality_id: Option<&str>) -> Vec<Team>;
    /// Removes the team only; its scores are left in place
    async fn remove_team(&self, team_id: &str) -> Result<(), ScoringError>;

    /// Records a round value, replacing any score already stored for the same
    /// (team, modality, round). The value is stored as given, never clamped.
    async fn upsert(
        &self,
        team_id: &str,
        modality_id: &str,
        round: u32,
        value: f64,
    ) -> Result<Score, ScoringError>;

    /// All scores matching the given filters, in no particular order
    async fn query(&self, team_id: Option<&str>, modality_id: Option<&str>) -> Vec<Score>;

    /// Consistent copy of a modality with its teams and scores
    async fn modality_snapshot(&self, modality_id: &str) -> Option<ModalitySnapshot>;
}

#[derive(Debug, Default)]
struct StoreState {
    competitions: Vec<Competition>,
    modalities: Vec<Modality>,
    teams: Vec<Team>,
    scores: HashMap<ScoreKey, Score>,
}

impl StoreState {
    fn modality(&self, modality_id: &str) -> Option<&Modality> {
        self.modalities.iter().find(|m| m.id == modality_id)
    }

    fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    fn has_scores(&self, team_id: &str, modality_id: &str) -> bool {
        self.scores
            .keys()
            .any(|key| key.team_id == team_id && key.modality_id == modality_id)
    }
}

/// In-memory implementation of ScoreStore.
///
/// Teams and modalities are kept in registration order so leaderboard ties
/// resolve the same way on every build.
#[derive(Debug, Default)]
pub struct InMemoryScoreStore {
    state: RwLock<StoreState>,
}

impl InMemoryScoreStore {
    /// Creates a new empty in-memory store
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Returns the total number of stored scores, orphans included
    pub async fn score_count(&self) -> usize {
        self.state.read().await.scores.len()
    }
}

#[async_trait]
impl ScoreStore for InMemoryScoreStore {
    #[instrument(skip(self, competition), fields(competition_id = %competition.id))]
    async fn create_competition(
        &self,
        competition: Competition,
    ) -> Result<Competition, ScoringError> {
        let mut state = self.state.write().await;
        if state.competitions.iter().any(|c| c.id == competition.id) {
            warn!("Competition already exists");
            return Err(ScoringError::DuplicateId(competition.id));
        }

        state.competitions.push(competition.clone());
        debug!("Competition created");
        Ok(competition)
    }

    async fn list_competitions(&self) -> Vec<Competition> {
        self.state.read().await.competitions.clone()
    }

    async fn active_competition(&self) -> Option<Competition> {
        let state = self.state.read().await;
        state.competitions.iter().find(|c| c.active).cloned()
    }

    #[instrument(skip(self, modality), fields(modality_id = %modality.id))]
    async fn create_modality(&self, modality: Modality) -> Result<Modality, ScoringError> {
        modality.validate()?;

        let mut state = self.state.write().await;
        if state.modality(&modality.id).is_some() {
            warn!("Modality already exists");
            return Err(ScoringError::DuplicateId(modality.id));
        }

        state.modalities.push(modality.clone());
        info!(
            name = %modality.name,
            rounds = modality.rounds,
            method = %modality.aggregation_method,
            "Modality created"
        );
        Ok(modality)
    }

    #[instrument(skip(self, modality), fields(modality_id = %modality.id))]
    async fn update_modality(&self, modality: Modality) -> Result<Modality, ScoringError> {
        modality.validate()?;

        let mut state = self.state.write().await;
        let existing = state
            .modalities
            .iter_mut()
            .find(|m| m.id == modality.id)
            .ok_or_else(|| ScoringError::UnknownModality(modality.id.clone()))?;

        *existing = modality.clone();
        info!("Modality updated");
        Ok(modality)
    }

    async fn get_modality(&self, modality_id: &str) -> Option<Modality> {
        self.state.read().await.modality(modality_id).cloned()
    }

    async fn list_modalities(&self) -> Vec<Modality> {
        self.state.read().await.modalities.clone()
    }

    #[instrument(skip(self))]
    async fn remove_modality(&self, modality_id: &str) -> Result<(), ScoringError> {
        let mut state = self.state.write().await;
        let before = state.modalities.len();
        state.modalities.retain(|m| m.id != modality_id);

        if state.modalities.len() == before {
            debug!("Modality not found for removal");
            return Err(ScoringError::UnknownModality(modality_id.to_string()));
        }

        info!("Modality removed, scores left in place");
        Ok(())
    }

    #[instrument(skip(self, team), fields(team_id = %team.id, modality_id = %team.modality_id))]
    async fn create_team(&self, team: Team) -> Result<Team, ScoringError> {
        team.validate()?;

        let mut state = self.state.write().await;
        if state.team(&team.id).is_some() {
            warn!("Team already exists");
            return Err(ScoringError::DuplicateId(team.id));
        }
        if state.modality(&team.modality_id).is_none() {
            return Err(ScoringError::UnknownModality(team.modality_id));
        }

        state.teams.push(team.clone());
        info!(name = %team.name, "Team created");
        Ok(team)
    }

    #[instrument(skip(self, team), fields(team_id = %team.id))]
    async fn update_team(&self, team: Team) -> Result<Team, ScoringError> {
        team.validate()?;

        let mut state = self.state.write().await;

        let current_modality = state
            .team(&team.id)
            .map(|t| t.modality_id.clone())
            .ok_or_else(|| ScoringError::UnknownTeam(team.id.clone()))?;

        if current_modality != team.modality_id {
            if state.has_scores(&team.id, &current_modality) {
                warn!(
                    from = %current_modality,
                    to = %team.modality_id,
                    "Refusing to move a scored team to another modality"
                );
                return Err(ScoringError::TeamHasScores(team.id));
            }
            if state.modality(&team.modality_id).is_none() {
                return Err(ScoringError::UnknownModality(team.modality_id));
            }
        }

        if let Some(existing) = state.teams.iter_mut().find(|t| t.id == team.id) {
            *existing = team.clone();
        }

        info!("Team updated");
        Ok(team)
    }

    async fn get_team(&self, team_id: &str) -> Option<Team> {
        self.state.read().await.team(team_id).cloned()
    }

    async fn list_teams(&self, modality_id: Option<&str>) -> Vec<Team> {
        let state = self.state.read().await;
        state
            .teams
            .iter()
            .filter(|t| modality_id.map_or(true, |id| t.is_entered_in(id)))
            .cloned()
            .collect()
    }

    #[instrument(skip(self))]
    async fn remove_team(&self, team_id: &str) -> Result<(), ScoringError> {
        let mut state = self.state.write().await;
        let before = state.teams.len();
        state.teams.retain(|t| t.id != team_id);

        if state.teams.len() == before {
            debug!("Team not found for removal");
            return Err(ScoringError::UnknownTeam(team_id.to_string()));
        }

        info!("Team removed, scores left in place");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn upsert(
        &self,
        team_id: &str,
        modality_id: &str,
        round: u32,
        value: f64,
    ) -> Result<Score, ScoringError> {
        if !value.is_finite() {
            return Err(ScoringError::InvalidValue(value));
        }

        let mut state = self.state.write().await;

        let modality = state
            .modality(modality_id)
            .ok_or_else(|| ScoringError::UnknownModality(modality_id.to_string()))?;
        if !modality.contains_round(round) {
            debug!(rounds = modality.rounds, "Round out of range");
            return Err(ScoringError::InvalidRound {
                modality_id: modality_id.to_string(),
                round,
                rounds: modality.rounds,
            });
        }

        let team = state
            .team(team_id)
            .ok_or_else(|| ScoringError::UnknownTeam(team_id.to_string()))?;
        if !team.is_entered_in(modality_id) {
            return Err(ScoringError::ModalityMismatch {
                team_id: team_id.to_string(),
                entered: team.modality_id.clone(),
                requested: modality_id.to_string(),
            });
        }

        let score = Score::new(team_id.to_string(), modality_id.to_string(), round, value);

        let replaced = state.scores.insert(score.key(), score.clone());
        match replaced {
            Some(previous) => info!(
                score_id = %score.id,
                previous_value = previous.value,
                value,
                "Score replaced"
            ),
            None => info!(score_id = %score.id, value, "Score recorded"),
        }

        Ok(score)
    }

    async fn query(&self, team_id: Option<&str>, modality_id: Option<&str>) -> Vec<Score> {
        let state = self.state.read().await;
        state
            .scores
            .values()
            .filter(|s| team_id.map_or(true, |id| s.team_id == id))
            .filter(|s| modality_id.map_or(true, |id| s.modality_id == id))
            .cloned()
            .collect()
    }

    async fn modality_snapshot(&self, modality_id: &str) -> Option<ModalitySnapshot> {
        let state = self.state.read().await;
        let modality = state.modality(modality_id)?.clone();

        let teams: Vec<Team> = state
            .teams
            .iter()
            .filter(|t| t.is_entered_in(modality_id))
            .cloned()
            .collect();

        let scores = state
            .scores
            .values()
            .filter(|s| s.modality_id == modality_id)
            .cloned()
            .collect();

        Some(ModalitySnapshot {
            modality,
            teams,
            scores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::AggregationMethod;

    /// Test helper functions for creating test data
    mod helpers {
        use super::*;

        pub fn test_modality(id: &str, rounds: u32) -> Modality {
            Modality {
                id: id.to_string(),
                name: format!("Modality {id}"),
                description: String::new(),
                rounds,
                min_score: 0.0,
                max_score: 100.0,
                aggregation_method: AggregationMethod::AverageAll,
            }
        }

        pub fn test_team(id: &str, modality_id: &str) -> Team {
            Team {
                id: id.to_string(),
                name: format!("Team {id}"),
                institution: "Test Institute".to_string(),
                members: vec!["alice".to_string(), "bob".to_string()],
                modality_id: modality_id.to_string(),
            }
        }

        pub async fn seeded_store() -> InMemoryScoreStore {
            let store = InMemoryScoreStore::new();
            store.create_modality(test_modality("mod-a", 3)).await.unwrap();
            store.create_modality(test_modality("mod-b", 2)).await.unwrap();
            store.create_team(test_team("team-1", "mod-a")).await.unwrap();
            store.create_team(test_team("team-2", "mod-a")).await.unwrap();
            store.create_team(test_team("team-3", "mod-b")).await.unwrap();
            store
        }
    }

    use helpers::*;

    #[tokio::test]
    async fn test_upsert_inserts_new_score() {
        let store = seeded_store().await;

        let score = store.upsert("team-1", "mod-a", 1, 85.0).await.unwrap();

        assert!(score.id.starts_with("score-"));
        assert_eq!(score.round, 1);
        assert_eq!(score.value, 85.0);
        assert_eq!(store.query(Some("team-1"), Some("mod-a")).await, vec![score]);
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_triple() {
        let store = seeded_store().await;

        let mut last = None;
        for value in [10.0, 20.0, 30.0, 40.0] {
            last = Some(store.upsert("team-1", "mod-a", 2, value).await.unwrap());
        }

        let scores = store.query(Some("team-1"), Some("mod-a")).await;
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].value, 40.0);
        assert_eq!(Some(&scores[0]), last.as_ref());
        assert_eq!(store.score_count().await, 1);
    }

    #[tokio::test]
    async fn test_replacement_refreshes_timestamp() {
        let store = seeded_store().await;

        let first = store.upsert("team-1", "mod-a", 1, 50.0).await.unwrap();
        tokio::time::sleep(tokio::time::Duration::from_millis(5)).await;
        let second = store.upsert("team-1", "mod-a", 1, 60.0).await.unwrap();

        assert!(second.recorded_at > first.recorded_at);
    }

    #[tokio::test]
    async fn test_upsert_rejects_round_out_of_range() {
        let store = seeded_store().await;

        for round in [0, 4] {
            let result = store.upsert("team-1", "mod-a", round, 50.0).await;
            assert_eq!(
                result,
                Err(ScoringError::InvalidRound {
                    modality_id: "mod-a".to_string(),
                    round,
                    rounds: 3,
                })
            );
        }
        assert_eq!(store.score_count().await, 0);
    }

    #[tokio::test]
    async fn test_upsert_rejects_unknown_entities() {
        let store = seeded_store().await;

        assert_eq!(
            store.upsert("team-1", "mod-x", 1, 50.0).await,
            Err(ScoringError::UnknownModality("mod-x".to_string()))
        );
        assert_eq!(
            store.upsert("team-x", "mod-a", 1, 50.0).await,
            Err(ScoringError::UnknownTeam("team-x".to_string()))
        );
    }

    #[tokio::test]
    async fn test_upsert_rejects_team_from_other_modality() {
        let store = seeded_store().await;

        let result = store.upsert("team-3", "mod-a", 1, 50.0).await;
        assert!(matches!(result, Err(ScoringError::ModalityMismatch { .. })));
    }

    #[tokio::test]
    async fn test_upsert_rejects_non_finite_value() {
        let store = seeded_store().await;

        let result = store.upsert("team-1", "mod-a", 1, f64::NAN).await;
        assert!(matches!(result, Err(ScoringError::InvalidValue(_))));
    }

    #[tokio::test]
    async fn test_upsert_does_not_clamp() {
        let store = seeded_store().await;

        let score = store.upsert("team-1", "mod-a", 1, 250.0).await.unwrap();
        assert_eq!(score.value, 250.0);
    }

    #[tokio::test]
    async fn test_query_filters() {
        let store = seeded_store().await;
        store.upsert("team-1", "mod-a", 1, 1.0).await.unwrap();
        store.upsert("team-1", "mod-a", 2, 2.0).await.unwrap();
        store.upsert("team-2", "mod-a", 1, 3.0).await.unwrap();
        store.upsert("team-3", "mod-b", 1, 4.0).await.unwrap();

        assert_eq!(store.query(None, None).await.len(), 4);
        assert_eq!(store.query(Some("team-1"), None).await.len(), 2);
        assert_eq!(store.query(None, Some("mod-a")).await.len(), 3);
        assert_eq!(store.query(Some("team-3"), Some("mod-a")).await.len(), 0);
    }

    #[tokio::test]
    async fn test_remove_team_leaves_scores_behind() {
        let store = seeded_store().await;
        store.upsert("team-1", "mod-a", 1, 70.0).await.unwrap();

        store.remove_team("team-1").await.unwrap();

        assert!(store.get_team("team-1").await.is_none());
        assert_eq!(store.query(Some("team-1"), None).await.len(), 1);

        let snapshot = store.modality_snapshot("mod-a").await.unwrap();
        assert_eq!(snapshot.teams.len(), 1);
        assert_eq!(snapshot.scores.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_modality_leaves_scores_behind() {
        let store = seeded_store().await;
        store.upsert("team-3", "mod-b", 2, 33.0).await.unwrap();

        store.remove_modality("mod-b").await.unwrap();

        assert!(store.modality_snapshot("mod-b").await.is_none());
        assert_eq!(store.query(None, Some("mod-b")).await.len(), 1);
        assert!(store.get_team("team-3").await.is_some());
    }

    #[tokio::test]
    async fn test_remove_unknown_entities() {
        let store = seeded_store().await;

        assert_eq!(
            store.remove_team("nope").await,
            Err(ScoringError::UnknownTeam("nope".to_string()))
        );
        assert_eq!(
            store.remove_modality("nope").await,
            Err(ScoringError::UnknownModality("nope".to_string()))
        );
    }

    #[tokio::test]
    async fn test_list_teams_keeps_registration_order() {
        let store = seeded_store().await;
        store.create_team(test_team("team-0", "mod-a")).await.unwrap();

        let ids: Vec<String> = store
            .list_teams(Some("mod-a"))
            .await
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["team-1", "team-2", "team-0"]);
        assert_eq!(store.list_teams(None).await.len(), 4);
    }

    #[tokio::test]
    async fn test_create_team_requires_known_modality() {
        let store = seeded_store().await;

        let result = store.create_team(test_team("team-9", "mod-x")).await;
        assert_eq!(result, Err(ScoringError::UnknownModality("mod-x".to_string())));
    }

    #[tokio::test]
    async fn test_create_duplicate_ids() {
        let store = seeded_store().await;

        assert!(matches!(
            store.create_team(test_team("team-1", "mod-a")).await,
            Err(ScoringError::DuplicateId(_))
        ));
        assert!(matches!(
            store.create_modality(test_modality("mod-a", 1)).await,
            Err(ScoringError::DuplicateId(_))
        ));
    }

    #[tokio::test]
    async fn test_update_team_members_after_scoring() {
        let store = seeded_store().await;
        store.upsert("team-1", "mod-a", 1, 70.0).await.unwrap();

        let mut team = store.get_team("team-1").await.unwrap();
        team.members.push("carol".to_string());
        store.update_team(team).await.unwrap();

        assert_eq!(store.get_team("team-1").await.unwrap().members.len(), 3);
    }

    #[tokio::test]
    async fn test_update_team_rejects_blank_name() {
        let store = seeded_store().await;

        let mut team = store.get_team("team-1").await.unwrap();
        team.name = "  ".to_string();

        assert!(matches!(
            store.update_team(team).await,
            Err(ScoringError::InvalidTeam(_))
        ));
        assert_eq!(store.get_team("team-1").await.unwrap().name, "Team team-1");
    }

    #[tokio::test]
    async fn test_update_team_cannot_leave_scored_modality() {
        let store = seeded_store().await;
        store.upsert("team-1", "mod-a", 1, 70.0).await.unwrap();

        let mut team = store.get_team("team-1").await.unwrap();
        team.modality_id = "mod-b".to_string();

        assert_eq!(
            store.update_team(team).await,
            Err(ScoringError::TeamHasScores("team-1".to_string()))
        );
    }

    #[tokio::test]
    async fn test_update_unscored_team_can_change_modality() {
        let store = seeded_store().await;

        let mut team = store.get_team("team-2").await.unwrap();
        team.modality_id = "mod-b".to_string();
        store.update_team(team).await.unwrap();

        assert_eq!(store.list_teams(Some("mod-b")).await.len(), 2);
    }

    #[tokio::test]
    async fn test_update_modality_validates() {
        let store = seeded_store().await;

        let mut modality = store.get_modality("mod-a").await.unwrap();
        modality.rounds = 0;
        assert!(matches!(
            store.update_modality(modality).await,
            Err(ScoringError::InvalidModality(_))
        ));

        assert_eq!(
            store.update_modality(test_modality("mod-x", 2)).await,
            Err(ScoringError::UnknownModality("mod-x".to_string()))
        );
    }

    #[tokio::test]
    async fn test_active_competition() {
        let store = InMemoryScoreStore::new();
        let date = chrono::NaiveDate::from_ymd_opt(2024, 8, 15).unwrap();
        store
            .create_competition(Competition::new("Old".into(), date, vec![], false))
            .await
            .unwrap();
        assert!(store.active_competition().await.is_none());

        let active = store
            .create_competition(Competition::new("Current".into(), date, vec![], true))
            .await
            .unwrap();

        assert_eq!(store.active_competition().await, Some(active));
        assert_eq!(store.list_competitions().await.len(), 2);
    }
}
