// Public API - what other modules can use
pub use handlers::{
    create_modality, delete_modality, get_modality, list_modalities, update_modality,
};
pub use models::Modality;

mod handlers;
pub mod models;
pub mod types;
