// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::{Context, Result};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, delete, get, options, patch, post, put, routes, Build, Request, Response, Rocket, State};
use std::sync::Arc;
use tracing::info;

use crate::autosave::spawn_autosave;
use crate::config::BuilderConfig;
use crate::mail::SendPortfolioRequest;
use crate::preview::PreviewDocument;
use crate::storage::{FileStore, KeyValueStore};
use crate::types::{Draft, FieldUpdate, Portfolio};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PUT, PATCH, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[get("/portfolio")]
pub async fn get_portfolio(state: &State<AppState>) -> Json<DataResponse<Portfolio>> {
    handlers::get_portfolio_handler(state).await
}

#[put("/portfolio", data = "<portfolio>")]
pub async fn put_portfolio(
    portfolio: Json<Portfolio>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Draft>>, ApiError> {
    handlers::put_portfolio_handler(portfolio, state).await
}

#[patch("/portfolio", data = "<update>")]
pub async fn patch_portfolio(
    update: Json<FieldUpdate>,
    state: &State<AppState>,
) -> Json<DataResponse<Portfolio>> {
    handlers::patch_portfolio_handler(update, state).await
}

#[get("/drafts")]
pub async fn list_drafts(state: &State<AppState>) -> Json<DataResponse<Vec<DraftSummary>>> {
    handlers::list_drafts_handler(state).await
}

#[post("/drafts", data = "<request>")]
pub async fn save_draft(
    request: Json<StandardRequest<SaveDraftRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<DraftSummary>>, ApiError> {
    handlers::save_draft_handler(request, state).await
}

#[post("/drafts/<id>/continue")]
pub async fn continue_draft(
    id: &str,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Portfolio>>, ApiError> {
    handlers::continue_draft_handler(id, state).await
}

#[delete("/drafts/<id>")]
pub async fn delete_draft(
    id: &str,
    state: &State<AppState>,
) -> Result<Json<ActionResponse>, ApiError> {
    handlers::delete_draft_handler(id, state).await
}

#[get("/preview")]
pub async fn get_preview(state: &State<AppState>) -> Json<DataResponse<PreviewDocument>> {
    handlers::get_preview_handler(state).await
}

#[get("/preview/html")]
pub async fn get_preview_html(state: &State<AppState>) -> RawHtml<String> {
    handlers::get_preview_html_handler(state).await
}

#[get("/export/print")]
pub async fn export_print(state: &State<AppState>) -> FileResponse {
    handlers::export_print_handler(state).await
}

#[post("/export/pdf")]
pub async fn export_pdf(state: &State<AppState>) -> Result<FileResponse, ApiError> {
    handlers::export_pdf_handler(state).await
}

#[get("/language")]
pub async fn get_language(state: &State<AppState>) -> Json<DataResponse<LanguageInfo>> {
    handlers::get_language_handler(state).await
}

#[put("/language", data = "<request>")]
pub async fn put_language(
    request: Json<StandardRequest<LanguageRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<LanguageInfo>>, ApiError> {
    handlers::put_language_handler(request, state).await
}

#[post("/send-portfolio", data = "<request>")]
pub async fn send_portfolio(
    request: Result<Json<SendPortfolioRequest>, rocket::serde::json::Error<'_>>,
    state: &State<AppState>,
) -> Result<Json<MailResponse>, (Status, Json<MailResponse>)> {
    handlers::send_portfolio_handler(request, state).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Resource not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Check the request path".to_string()],
        None,
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body does not match the portfolio schema".to_string(),
        "INVALID_BODY".to_string(),
        vec![
            "Use camelCase field names".to_string(),
            "Remove fields the portfolio does not define".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

/// Rocket instance with every route and catcher mounted under `/api`.
pub fn build_rocket(state: AppState) -> Rocket<Build> {
    let figment = rocket::Config::figment().merge(("port", state.config.port));

    rocket::custom(figment)
        .attach(Cors)
        .manage(state)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![
                health,
                get_portfolio,
                put_portfolio,
                patch_portfolio,
                list_drafts,
                save_draft,
                continue_draft,
                delete_draft,
                get_preview,
                get_preview_html,
                export_print,
                export_pdf,
                get_language,
                put_language,
                send_portfolio,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: BuilderConfig) -> Result<()> {
    config.ensure_directories().await?;

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.storage_dir)?);
    let state = AppState::new(config, store);

    // lives until the server shuts down
    let _autosave = spawn_autosave(
        state.drafts.clone(),
        state.form.clone(),
        state.config.autosave_interval,
    );

    info!("Starting portfolio builder API server");
    info!("Storage: {}", state.config.storage_dir.display());
    info!("Autosave every {:?}", state.config.autosave_interval);

    build_rocket(state)
        .launch()
        .await
        .context("Rocket server failed")?;

    Ok(())
}
