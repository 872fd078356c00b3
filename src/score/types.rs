use serde::{Deserialize, Serialize};

/// Request payload for recording a round score
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordScoreRequest {
    pub team_id: String,
    pub modality_id: String,
    pub round: u32,
    pub value: f64,
}

/// Query string filters for listing scores
#[derive(Debug, Default, Deserialize)]
pub struct ScoreQuery {
    pub team_id: Option<String>,
    pub modality_id: Option<String>,
}
