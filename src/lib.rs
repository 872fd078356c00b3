// Library crate for the competition scoreboard
// This file exposes the public API for integration tests

pub mod aggregation;
pub mod competition;
pub mod config;
pub mod leaderboard;
pub mod modality;
pub mod routes;
pub mod score;
pub mod seed;
pub mod shared;
pub mod team;

// Re-export commonly used types for easier access in tests
pub use aggregation::{final_score, AggregationMethod};
pub use competition::Competition;
pub use config::AppConfig;
pub use leaderboard::{
    LeaderboardBuilder, LeaderboardSnapshot, LeaderboardSubscription, RefreshConfig,
    RefreshScheduler, TeamScore,
};
pub use modality::Modality;
pub use routes::router;
pub use score::{InMemoryScoreStore, Score, ScoreStore, ScoringError, ScoringService};
pub use seed::seed_demo_data;
pub use shared::{AppError, AppState};
pub use team::{Team, TeamSummaryService};
