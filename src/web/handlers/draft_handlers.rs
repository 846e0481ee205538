// src/web/handlers/draft_handlers.rs

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

use super::{draft_not_found, storage_error};
use crate::config::load_language;
use crate::types::Portfolio;
use crate::web::types::{
    ActionResponse, ApiError, AppState, DataResponse, DraftSummary, SaveDraftRequest,
    StandardRequest, WithConversationId,
};

pub async fn list_drafts_handler(state: &State<AppState>) -> Json<DataResponse<Vec<DraftSummary>>> {
    let language = load_language(state.store.as_ref(), state.config.locale.as_deref());
    let drafts: Vec<DraftSummary> = state
        .drafts
        .list_drafts()
        .iter()
        .map(|draft| DraftSummary::from_draft(draft, language))
        .collect();

    Json(DataResponse::success(
        format!("{} draft(s)", drafts.len()),
        drafts,
        None,
    ))
}

pub async fn save_draft_handler(
    request: Json<StandardRequest<SaveDraftRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<DraftSummary>>, ApiError> {
    let conversation_id = request.conversation_id();
    let language = load_language(state.store.as_ref(), state.config.locale.as_deref());

    let draft = state
        .form
        .with(|portfolio| state.drafts.save_as(portfolio, request.data.name.as_deref()))
        .map_err(|e| storage_error(e, conversation_id.clone()))?;

    Ok(Json(DataResponse::success(
        format!("Draft '{}' saved", draft.name),
        DraftSummary::from_draft(&draft, language),
        conversation_id,
    )))
}

pub async fn continue_draft_handler(
    id: &str,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Portfolio>>, ApiError> {
    match state.drafts.continue_draft(id) {
        Ok(Some(portfolio)) => {
            state.form.replace(portfolio.clone());
            info!("Draft {} loaded into the builder", id);
            Ok(Json(DataResponse::success(
                format!("Continuing draft '{}'", id),
                portfolio,
                None,
            )))
        }
        Ok(None) => Err(draft_not_found(id, None)),
        Err(e) => Err(storage_error(e, None)),
    }
}

pub async fn delete_draft_handler(
    id: &str,
    state: &State<AppState>,
) -> Result<Json<ActionResponse>, ApiError> {
    match state.drafts.delete_draft(id) {
        Ok(true) => Ok(Json(ActionResponse::success(
            format!("Draft '{}' deleted", id),
            "deleted".to_string(),
            None,
        ))),
        Ok(false) => Err(draft_not_found(id, None)),
        Err(e) => Err(storage_error(e, None)),
    }
}
