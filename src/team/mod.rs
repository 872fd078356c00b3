// Public API - what other modules can use
pub use handlers::{create_team, delete_team, get_team, list_teams, team_summary, update_team};
pub use models::Team;
pub use summary::{TeamSummary, TeamSummaryService};

mod handlers;
pub mod models;
pub mod summary;
pub mod types;
