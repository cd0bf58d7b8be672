use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/water/plus", post(handlers::water_plus))
        .route("/water/minus", post(handlers::water_minus))
        .route("/exercise", post(handlers::exercise))
        .route("/sleep", post(handlers::sleep))
        .route("/todos", post(handlers::add_todo))
        .route("/todos/:id/toggle", post(handlers::toggle_todo))
        .route("/todos/:id/delete", post(handlers::delete_todo))
        .route("/quote/random", post(handlers::random_quote))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/intent", post(handlers::intent))
        .with_state(state)
}
