pub mod app;
pub mod catalog;
pub mod errors;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod store;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{load_records, persist_records, resolve_data_path};
pub use store::ChallengeStore;
