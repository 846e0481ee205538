// src/web/types.rs

use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::{Request, Response};
use std::sync::Arc;

use crate::autosave::DraftManager;
use crate::config::BuilderConfig;
use crate::export::{content_disposition, ExportArtifact, Exporter, PdfExporter};
use crate::form::FormStore;
use crate::mail::{LogTransport, MailTransport};
use crate::storage::KeyValueStore;
use crate::types::{Draft, Language};

/// Shared state managed by rocket.
pub struct AppState {
    pub config: BuilderConfig,
    pub store: Arc<dyn KeyValueStore>,
    pub drafts: Arc<DraftManager>,
    pub form: Arc<FormStore>,
    pub exporter: Exporter,
    pub mailer: Arc<dyn MailTransport>,
}

impl AppState {
    /// Hydrate the form from the last snapshot in `store`.
    pub fn new(config: BuilderConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let drafts = Arc::new(DraftManager::new(store.clone()));
        let form = Arc::new(FormStore::new(drafts.load_snapshot()));
        let exporter = Exporter::new(PdfExporter::new(
            config.typst_bin.clone(),
            config.scratch_dir.clone(),
        ));

        Self {
            config,
            store,
            drafts,
            form,
            exporter,
            mailer: Arc::new(LogTransport),
        }
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn MailTransport>) -> Self {
        self.mailer = mailer;
        self
    }
}

/// Export artifact served as a download (`attachment`) or shown in place.
pub struct FileResponse {
    pub artifact: ExportArtifact,
    pub inline: bool,
}

impl FileResponse {
    pub fn attachment(artifact: ExportArtifact) -> Self {
        Self {
            artifact,
            inline: false,
        }
    }

    pub fn inline(artifact: ExportArtifact) -> Self {
        Self {
            artifact,
            inline: true,
        }
    }
}

impl<'r> Responder<'r, 'static> for FileResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let content_type =
            ContentType::parse_flexible(self.artifact.content_type).unwrap_or(ContentType::Binary);
        let disposition = if self.inline {
            content_disposition(&self.artifact.filename).replacen("attachment", "inline", 1)
        } else {
            content_disposition(&self.artifact.filename)
        };
        let bytes = self.artifact.bytes;

        Response::build()
            .header(content_type)
            .raw_header("Content-Disposition", disposition)
            .sized_body(bytes.len(), std::io::Cursor::new(bytes))
            .ok()
    }
}

// ===== Request bodies =====

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SaveDraftRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct LanguageRequest {
    pub language: String,
}

// ===== Response bodies =====

/// Gallery entry with its timestamp rendered for the display language.
#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct DraftSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub last_saved: chrono::DateTime<chrono::Utc>,
    pub last_saved_label: String,
    pub project_count: usize,
}

impl DraftSummary {
    pub fn from_draft(draft: &Draft, language: Language) -> Self {
        Self {
            id: draft.id.clone(),
            name: draft.name.clone(),
            email: draft.email.clone(),
            last_saved: draft.last_saved,
            last_saved_label: language.format_timestamp(&draft.last_saved),
            project_count: draft.data.projects.len(),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct LanguageInfo {
    pub language: Language,
    pub supported: Vec<Language>,
}

/// Body of `/send-portfolio`: `{success, message}` or `{success, error}`.
#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct MailResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ===== Standard response envelope =====

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ActionResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Action,
    Error,
}

/// Error body with the HTTP status it is sent with.
pub type ApiError = (Status, Json<StandardErrorResponse>);

// Request types with conversation_id support
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardRequest<T> {
    #[serde(flatten)]
    pub data: T,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

pub trait WithConversationId {
    fn conversation_id(&self) -> Option<String>;
}

impl<T> WithConversationId for StandardRequest<T> {
    fn conversation_id(&self) -> Option<String> {
        self.conversation_id.clone()
    }
}

impl TextResponse {
    pub fn success(message: String, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
            conversation_id,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
            conversation_id,
        }
    }
}

impl ActionResponse {
    pub fn success(message: String, action: String, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Action,
            success: true,
            message,
            action,
            conversation_id,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(
        error: String,
        error_code: String,
        suggestions: Vec<String>,
        conversation_id: Option<String>,
    ) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            conversation_id,
        }
    }

    pub fn with_status(self, status: Status) -> ApiError {
        (status, Json(self))
    }
}

impl MailResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: Some("Email sent successfully".to_string()),
            error: None,
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            message: None,
            error: Some("Failed to send email".to_string()),
        }
    }
}
