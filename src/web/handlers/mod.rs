pub mod draft_handlers;
pub mod export_handlers;
pub mod mail_handlers;
pub mod portfolio_handlers;
pub mod system_handlers;

pub use draft_handlers::*;
pub use export_handlers::*;
pub use mail_handlers::*;
pub use portfolio_handlers::*;
pub use system_handlers::*;

use rocket::http::Status;
use tracing::error;

use crate::storage::StoreError;
use crate::web::types::{ApiError, StandardErrorResponse};

pub(crate) fn storage_error(e: StoreError, conversation_id: Option<String>) -> ApiError {
    error!("Storage error: {}", e);
    StandardErrorResponse::new(
        "Failed to write to storage".to_string(),
        "STORAGE_ERROR".to_string(),
        vec![
            "Check that the storage directory is writable".to_string(),
            "Try again in a few moments".to_string(),
        ],
        conversation_id,
    )
    .with_status(Status::InternalServerError)
}

pub(crate) fn draft_not_found(id: &str, conversation_id: Option<String>) -> ApiError {
    StandardErrorResponse::new(
        format!("Draft '{}' not found", id),
        "DRAFT_NOT_FOUND".to_string(),
        vec!["List drafts to see the available ids".to_string()],
        conversation_id,
    )
    .with_status(Status::NotFound)
}
