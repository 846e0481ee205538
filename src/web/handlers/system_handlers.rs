// src/web/handlers/system_handlers.rs

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

use super::storage_error;
use crate::config::{load_language, save_language};
use crate::types::Language;
use crate::utils::normalize_language;
use crate::web::types::{
    ApiError, AppState, DataResponse, LanguageInfo, LanguageRequest, StandardRequest,
    TextResponse, WithConversationId,
};

pub async fn health_handler() -> Json<TextResponse> {
    Json(TextResponse::success("OK".to_string(), None))
}

pub async fn get_language_handler(state: &State<AppState>) -> Json<DataResponse<LanguageInfo>> {
    let language = load_language(state.store.as_ref(), state.config.locale.as_deref());
    Json(DataResponse::success(
        format!("Language is {}", language),
        LanguageInfo {
            language,
            supported: Language::ALL.to_vec(),
        },
        None,
    ))
}

/// Unsupported codes fall back to English.
pub async fn put_language_handler(
    request: Json<StandardRequest<LanguageRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<LanguageInfo>>, ApiError> {
    let conversation_id = request.conversation_id();
    let language = normalize_language(Some(&request.data.language));

    save_language(state.store.as_ref(), language)
        .map_err(|e| storage_error(e, conversation_id.clone()))?;
    info!("Language set to {}", language);

    Ok(Json(DataResponse::success(
        format!("Language set to {}", language),
        LanguageInfo {
            language,
            supported: Language::ALL.to_vec(),
        },
        conversation_id,
    )))
}
