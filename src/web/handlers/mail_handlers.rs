// src/web/handlers/mail_handlers.rs

use rocket::http::Status;
use rocket::serde::json::{self, Json};
use rocket::State;
use tracing::error;

use crate::mail::{send_portfolio, SendPortfolioRequest};
use crate::web::types::{AppState, MailResponse};

/// Every failure, including a body that does not parse, is a 500 with the
/// mail error body.
pub async fn send_portfolio_handler(
    request: Result<Json<SendPortfolioRequest>, json::Error<'_>>,
    state: &State<AppState>,
) -> Result<Json<MailResponse>, (Status, Json<MailResponse>)> {
    let request = match request {
        Ok(request) => request,
        Err(e) => {
            error!("Email sending error: invalid request body: {}", e);
            return Err((Status::InternalServerError, Json(MailResponse::failed())));
        }
    };

    match send_portfolio(state.mailer.as_ref(), &request) {
        Ok(()) => Ok(Json(MailResponse::sent())),
        Err(e) => {
            error!("Email sending error: {}", e);
            Err((Status::InternalServerError, Json(MailResponse::failed())))
        }
    }
}
