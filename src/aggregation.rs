use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::EnumIter;

/// Number of best rounds averaged by [`AggregationMethod::TopThree`]
pub const TOP_ROUNDS_COUNTED: usize = 3;

/// Rule used to fold a team's recorded round values into its final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMethod {
    AverageAll,
    TopThree,
    DiscardLowest,
    SumAll,
}

impl AggregationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMethod::AverageAll => "average_all",
            AggregationMethod::TopThree => "top_three",
            AggregationMethod::DiscardLowest => "discard_lowest",
            AggregationMethod::SumAll => "sum_all",
        }
    }
}

impl fmt::Display for AggregationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for AggregationMethod {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "average_all" => Ok(AggregationMethod::AverageAll),
            "top_three" => Ok(AggregationMethod::TopThree),
            "discard_lowest" => Ok(AggregationMethod::DiscardLowest),
            "sum_all" => Ok(AggregationMethod::SumAll),
            _ => Err(s.to_string()),
        }
    }
}

/// Computes a final score from the recorded round values of one team.
///
/// `values` holds only rounds that were actually scored; their order does not
/// matter. Returns `None` when nothing has been recorded yet. Means divide by
/// the number of values summed, never by the modality's round count.
pub fn final_score(values: &[f64], method: AggregationMethod) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let score = match method {
        AggregationMethod::AverageAll => mean(values),
        AggregationMethod::TopThree => {
            let mut sorted = values.to_vec();
            sorted.sort_by(|a, b| b.total_cmp(a));
            mean(&sorted[..sorted.len().min(TOP_ROUNDS_COUNTED)])
        }
        AggregationMethod::DiscardLowest => {
            if values.len() == 1 {
                values[0]
            } else {
                // Only one instance of the minimum is dropped, even with duplicates
                let mut sorted = values.to_vec();
                sorted.sort_by(f64::total_cmp);
                mean(&sorted[1..])
            }
        }
        AggregationMethod::SumAll => values.iter().sum(),
    };

    Some(score)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
