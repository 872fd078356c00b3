use serde::{Deserialize, Serialize};

/// Request payload for creating or replacing a team
#[derive(Debug, Serialize, Deserialize)]
pub struct TeamRequest {
    pub name: String,
    pub institution: String,
    #[serde(default)]
    pub members: Vec<String>,
    pub modality_id: String,
}

/// Query string filter for listing teams
#[derive(Debug, Default, Deserialize)]
pub struct TeamQuery {
    pub modality_id: Option<String>,
}
