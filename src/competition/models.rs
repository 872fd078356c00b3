use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::generate_id;

/// A scheduled event grouping several modalities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub modality_ids: Vec<String>,
    pub active: bool,
}

impl Competition {
    pub fn new(name: String, date: NaiveDate, modality_ids: Vec<String>, active: bool) -> Self {
        Self {
            id: generate_id("comp"),
            name,
            date,
            modality_ids,
            active,
        }
    }
}
