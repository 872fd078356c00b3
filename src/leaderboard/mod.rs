// Public API - what other modules can use
pub use builder::{build_team_score, rank_snapshot, LeaderboardBuilder};
pub use handlers::{get_leaderboard, get_statistics};
pub use models::{format_final_score, LeaderboardSnapshot, RoundScore, TeamScore};
pub use refresh::{LeaderboardSubscription, RefreshConfig, RefreshScheduler};
pub use statistics::{statistics_from_leaderboard, ModalityStatistics};

pub mod builder;
mod handlers;
pub mod models;
pub mod refresh;
pub mod statistics;
pub mod types;
