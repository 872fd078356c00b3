use serde::{Deserialize, Serialize};

use crate::aggregation::AggregationMethod;

/// Request payload for creating or replacing a modality
#[derive(Debug, Serialize, Deserialize)]
pub struct ModalityRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub rounds: u32,
    pub min_score: f64,
    pub max_score: f64,
    pub aggregation_method: AggregationMethod,
}
