use crate::catalog::Category;
use crate::errors::AppError;
use crate::models::{
    CategoriesResponse, CategoryView, ChallengeResponse, CheckResponse, CompleteResponse,
    EnabledCategoriesRequest, HistoryResponse,
};
use crate::state::AppState;
use crate::storage::persist_records;
use crate::store::ChallengeStore;
use crate::ui::{render_history, render_index};
use axum::{
    extract::State,
    response::{Html, Redirect},
    Json,
};
use std::collections::BTreeSet;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut store = state.store.lock().await;
    roll_over_day(&state, &mut store).await?;
    Ok(Html(render_index(&store)))
}

pub async fn history_page(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    Html(render_history(&store))
}

pub async fn complete_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_complete(&state).await?;
    Ok(Redirect::to("/"))
}

pub async fn new_form(State(state): State<AppState>) -> Result<Redirect, AppError> {
    apply_new(&state).await?;
    Ok(Redirect::to("/"))
}

pub async fn get_challenge(State(state): State<AppState>) -> Result<Json<ChallengeResponse>, AppError> {
    let mut store = state.store.lock().await;
    roll_over_day(&state, &mut store).await?;
    Ok(Json(ChallengeResponse {
        challenge: store.current().cloned(),
    }))
}

pub async fn complete(State(state): State<AppState>) -> Result<Json<CompleteResponse>, AppError> {
    Ok(Json(apply_complete(&state).await?))
}

pub async fn new_challenge(State(state): State<AppState>) -> Result<Json<ChallengeResponse>, AppError> {
    Ok(Json(apply_new(&state).await?))
}

pub async fn check(State(state): State<AppState>) -> Result<Json<CheckResponse>, AppError> {
    let mut store = state.store.lock().await;
    let generated = roll_over_day(&state, &mut store).await?;
    Ok(Json(CheckResponse {
        generated,
        challenge: store.current().cloned(),
    }))
}

pub async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let store = state.store.lock().await;
    let summary = store.summary();
    Json(HistoryResponse {
        completed_count: summary.completed_count,
        success_rate: summary.success_rate,
        challenges: store.history().to_vec(),
    })
}

pub async fn get_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let store = state.store.lock().await;
    Json(categories_response(&store))
}

pub async fn set_categories(
    State(state): State<AppState>,
    Json(payload): Json<EnabledCategoriesRequest>,
) -> Result<Json<CategoriesResponse>, AppError> {
    let enabled = payload
        .enabled
        .iter()
        .map(|name| name.parse::<Category>())
        .collect::<Result<BTreeSet<_>, _>>()?;

    let mut store = state.store.lock().await;
    store.set_enabled_categories(enabled);
    persist_records(&state.data_path, &store.records()).await?;

    Ok(Json(categories_response(&store)))
}

async fn apply_complete(state: &AppState) -> Result<CompleteResponse, AppError> {
    let mut store = state.store.lock().await;
    let applied = store.complete();
    if applied {
        persist_records(&state.data_path, &store.records()).await?;
    }

    Ok(CompleteResponse {
        applied,
        challenge: store.current().cloned(),
    })
}

async fn apply_new(state: &AppState) -> Result<ChallengeResponse, AppError> {
    let mut store = state.store.lock().await;
    let challenge = store.generate_new().clone();
    persist_records(&state.data_path, &store.records()).await?;

    Ok(ChallengeResponse {
        challenge: Some(challenge),
    })
}

async fn roll_over_day(state: &AppState, store: &mut ChallengeStore) -> Result<bool, AppError> {
    let generated = store.check_for_new_challenge();
    if generated {
        persist_records(&state.data_path, &store.records()).await?;
    }
    Ok(generated)
}

fn categories_response(store: &ChallengeStore) -> CategoriesResponse {
    let enabled = store.enabled_categories();
    CategoriesResponse {
        categories: Category::ALL
            .into_iter()
            .map(|category| {
                let info = category.info();
                CategoryView {
                    id: category,
                    display_name: info.display_name,
                    icon: info.icon,
                    prompts: info.prompts,
                    enabled: enabled.contains(&category),
                }
            })
            .collect(),
    }
}
