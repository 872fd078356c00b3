// Public API - what other modules can use
pub use handlers::{active_competition, list_competitions};
pub use models::Competition;

mod handlers;
pub mod models;
