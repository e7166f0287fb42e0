use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/history", get(handlers::history_page))
        .route("/challenge/complete", post(handlers::complete_form))
        .route("/challenge/new", post(handlers::new_form))
        .route("/api/challenge", get(handlers::get_challenge))
        .route("/api/challenge/complete", post(handlers::complete))
        .route("/api/challenge/new", post(handlers::new_challenge))
        .route("/api/challenge/check", post(handlers::check))
        .route("/api/history", get(handlers::get_history))
        .route(
            "/api/categories",
            get(handlers::get_categories).put(handlers::set_categories),
        )
        .with_state(state)
}
