// Public API - what other modules can use
pub use errors::ScoringError;
pub use handlers::{list_scores, record_score};
pub use models::{ModalitySnapshot, Score, ScoreKey};
pub use service::ScoringService;
pub use store::{InMemoryScoreStore, ScoreStore};

mod errors;
mod handlers;
pub mod models;
pub mod service;
pub mod store;
pub mod types;
