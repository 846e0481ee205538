// src/web/handlers/portfolio_handlers.rs

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

use super::storage_error;
use crate::types::{Draft, FieldUpdate, Portfolio};
use crate::web::types::{ApiError, AppState, DataResponse};

pub async fn get_portfolio_handler(state: &State<AppState>) -> Json<DataResponse<Portfolio>> {
    Json(DataResponse::success(
        "Current portfolio".to_string(),
        state.form.snapshot(),
        None,
    ))
}

/// Replace the whole form and persist it right away.
pub async fn put_portfolio_handler(
    portfolio: Json<Portfolio>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Draft>>, ApiError> {
    let portfolio = portfolio.into_inner();
    info!(
        "Replacing portfolio ({} projects, {} skills)",
        portfolio.projects.len(),
        portfolio.skills.len()
    );
    state.form.replace(portfolio);

    let draft = state
        .form
        .with(|portfolio| state.drafts.tick(portfolio))
        .map_err(|e| storage_error(e, None))?;

    Ok(Json(DataResponse::success(
        "Portfolio saved".to_string(),
        draft,
        None,
    )))
}

/// Shallow-merge one field. Persisted by the next autosave tick.
pub async fn patch_portfolio_handler(
    update: Json<FieldUpdate>,
    state: &State<AppState>,
) -> Json<DataResponse<Portfolio>> {
    let update = update.into_inner();
    let key = update.key();
    state.form.update(update);

    Json(DataResponse::success(
        format!("Updated {}", key),
        state.form.snapshot(),
        None,
    ))
}
