use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{errors::ScoringError, models::Score, store::ScoreStore};

/// Score entry workflow: clamps values into the modality's bounds and writes them
pub struct ScoringService {
    store: Arc<dyn ScoreStore>,
}

impl ScoringService {
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self { store }
    }

    /// Records a round value after clamping it into `[min_score, max_score]`
    #[instrument(skip(self))]
    pub async fn record_score(
        &self,
        team_id: &str,
        modality_id: &str,
        round: u32,
        value: f64,
    ) -> Result<Score, ScoringError> {
        if !value.is_finite() {
            return Err(ScoringError::InvalidValue(value));
        }

        let modality = self
            .store
            .get_modality(modality_id)
            .await
            .ok_or_else(|| ScoringError::UnknownModality(modality_id.to_string()))?;

        let clamped = modality.clamp(value);
        if clamped != value {
            debug!(
                requested = value,
                clamped,
                min = modality.min_score,
                max = modality.max_score,
                "Clamped score into modality bounds"
            );
        }

        let score = self
            .store
            .upsert(team_id, modality_id, round, clamped)
            .await?;

        info!(score_id = %score.id, value = score.value, "Score saved");
        Ok(score)
    }

    /// Scores matching the filters, ordered by modality, team and round
    pub async fn list_scores(
        &self,
        team_id: Option<&str>,
        modality_id: Option<&str>,
    ) -> Vec<Score> {
        let mut scores = self.store.query(team_id, modality_id).await;
        scores.sort_by(|a, b| {
            (&a.modality_id, &a.team_id, a.round).cmp(&(&b.modality_id, &b.team_id, b.round))
        });
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::AggregationMethod;
    use crate::modality::models::Modality;
    use crate::score::InMemoryScoreStore;
    use crate::team::models::Team;

    async fn service() -> ScoringService {
        let store = Arc::new(InMemoryScoreStore::new());
        store
            .create_modality(Modality {
                id: "mod-1".to_string(),
                name: "Line Follower".to_string(),
                description: String::new(),
                rounds: 2,
                min_score: 0.0,
                max_score: 200.0,
                aggregation_method: AggregationMethod::TopThree,
            })
            .await
            .unwrap();
        for id in ["team-1", "team-2"] {
            store
                .create_team(Team {
                    id: id.to_string(),
                    name: id.to_string(),
                    institution: "IFBA".to_string(),
                    members: vec![],
                    modality_id: "mod-1".to_string(),
                })
                .await
                .unwrap();
        }
        ScoringService::new(store)
    }

    #[tokio::test]
    async fn test_record_score_clamps_to_bounds() {
        let service = service().await;

        let high = service.record_score("team-1", "mod-1", 1, 350.0).await.unwrap();
        let low = service.record_score("team-1", "mod-1", 2, -10.0).await.unwrap();
        let inside = service.record_score("team-2", "mod-1", 1, 123.0).await.unwrap();

        assert_eq!(high.value, 200.0);
        assert_eq!(low.value, 0.0);
        assert_eq!(inside.value, 123.0);
    }

    #[tokio::test]
    async fn test_record_score_surfaces_store_errors() {
        let service = service().await;

        assert!(matches!(
            service.record_score("team-1", "mod-1", 3, 10.0).await,
            Err(ScoringError::InvalidRound { round: 3, .. })
        ));
        assert!(matches!(
            service.record_score("team-1", "mod-9", 1, 10.0).await,
            Err(ScoringError::UnknownModality(_))
        ));
        assert!(matches!(
            service.record_score("team-1", "mod-1", 1, f64::INFINITY).await,
            Err(ScoringError::InvalidValue(_))
        ));
    }

    #[tokio::test]
    async fn test_list_scores_sorted_by_round() {
        let service = service().await;
        service.record_score("team-1", "mod-1", 2, 20.0).await.unwrap();
        service.record_score("team-1", "mod-1", 1, 10.0).await.unwrap();

        let rounds: Vec<u32> = service
            .list_scores(Some("team-1"), None)
            .await
            .iter()
            .map(|s| s.round)
            .collect();
        assert_eq!(rounds, vec![1, 2]);
    }
}
