use crate::codec::decode_time;
use crate::errors::AppError;
use crate::models::{DashboardSnapshot, ExerciseForm, Intent, SleepForm, TodoForm};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{Path, State, rejection::JsonRejection},
    response::{Html, Redirect},
};
use chrono::{Local, NaiveDate};
use tokio::task::block_in_place;
use tracing::debug;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = today();
    let mut dashboard = state.dashboard.lock().await;
    let snapshot = block_in_place(|| {
        let quote = dashboard.begin_session(today);
        dashboard.snapshot_with_quote(today, quote)
    });
    Html(render_index(&snapshot))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    let mut dashboard = state.dashboard.lock().await;
    Json(block_in_place(|| dashboard.snapshot(today())))
}

pub async fn intent(
    State(state): State<AppState>,
    payload: Result<Json<Intent>, JsonRejection>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    let Json(intent) = payload?;
    debug!(?intent, "applying intent");

    let today = today();
    let mut dashboard = state.dashboard.lock().await;
    let snapshot = block_in_place(|| match dashboard.apply(intent) {
        Some(quote) => dashboard.snapshot_with_quote(today, quote),
        None => dashboard.snapshot(today),
    });
    Ok(Json(snapshot))
}

pub async fn water_plus(State(state): State<AppState>) -> Redirect {
    apply_intent(&state, Intent::IncrementWater).await
}

pub async fn water_minus(State(state): State<AppState>) -> Redirect {
    apply_intent(&state, Intent::DecrementWater).await
}

/// An unchecked checkbox posts no field at all.
pub async fn exercise(State(state): State<AppState>, Form(form): Form<ExerciseForm>) -> Redirect {
    apply_intent(&state, Intent::SetExercise(form.exercise.is_some())).await
}

pub async fn sleep(State(state): State<AppState>, Form(form): Form<SleepForm>) -> Redirect {
    let start = form.start.as_deref().and_then(|raw| decode_time(raw).ok());
    let end = form.end.as_deref().and_then(|raw| decode_time(raw).ok());

    let mut dashboard = state.dashboard.lock().await;
    block_in_place(|| {
        if let Some(start) = start {
            dashboard.apply(Intent::SetSleepStart(start));
        }
        if let Some(end) = end {
            dashboard.apply(Intent::SetSleepEnd(end));
        }
    });
    Redirect::to("/")
}

pub async fn add_todo(State(state): State<AppState>, Form(form): Form<TodoForm>) -> Redirect {
    apply_intent(&state, Intent::AddTodo(form.text)).await
}

pub async fn toggle_todo(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    apply_intent(&state, Intent::ToggleTodo(id)).await
}

pub async fn delete_todo(State(state): State<AppState>, Path(id): Path<String>) -> Redirect {
    apply_intent(&state, Intent::DeleteTodo(id)).await
}

/// Renders in place so the drawn quote is gone on the next load.
pub async fn random_quote(State(state): State<AppState>) -> Html<String> {
    let today = today();
    let mut dashboard = state.dashboard.lock().await;
    let snapshot = block_in_place(|| match dashboard.apply(Intent::RefreshQuote) {
        Some(quote) => dashboard.snapshot_with_quote(today, quote),
        None => dashboard.snapshot(today),
    });
    Html(render_index(&snapshot))
}

/// Store writes are blocking file I/O, so they run outside the async executor's fast path.
async fn apply_intent(state: &AppState, intent: Intent) -> Redirect {
    let mut dashboard = state.dashboard.lock().await;
    block_in_place(|| dashboard.apply(intent));
    Redirect::to("/")
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
