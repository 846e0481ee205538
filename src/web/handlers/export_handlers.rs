// src/web/handlers/export_handlers.rs

use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use tracing::error;

use crate::export::{ExportError, ExportFormat};
use crate::preview::{self, html, PreviewDocument};
use crate::web::types::{ApiError, AppState, DataResponse, FileResponse, StandardErrorResponse};

pub async fn get_preview_handler(state: &State<AppState>) -> Json<DataResponse<PreviewDocument>> {
    Json(DataResponse::success(
        "Portfolio preview".to_string(),
        state.form.with(preview::render),
        None,
    ))
}

pub async fn get_preview_html_handler(state: &State<AppState>) -> RawHtml<String> {
    let document = state.form.with(preview::render);
    RawHtml(html::to_html(&document))
}

pub async fn export_print_handler(state: &State<AppState>) -> FileResponse {
    let artifact = state.form.with(|portfolio| state.exporter.print.export(portfolio));
    FileResponse::inline(artifact)
}

pub async fn export_pdf_handler(state: &State<AppState>) -> Result<FileResponse, ApiError> {
    let portfolio = state.form.snapshot();
    match state.exporter.export(ExportFormat::Pdf, &portfolio).await {
        Ok(artifact) => Ok(FileResponse::attachment(artifact)),
        Err(e) => {
            error!("PDF export failed: {}", e);
            let (status, suggestions) = match &e {
                ExportError::RendererUnavailable { .. } => (
                    Status::ServiceUnavailable,
                    vec![
                        "Install the typst CLI or set FOLIO_TYPST_BIN".to_string(),
                        "Use the print export instead".to_string(),
                    ],
                ),
                _ => (
                    Status::InternalServerError,
                    vec!["Try again in a few moments".to_string()],
                ),
            };
            Err(StandardErrorResponse::new(
                "Failed to generate PDF".to_string(),
                e.code().to_string(),
                suggestions,
                None,
            )
            .with_status(status))
        }
    }
}
