// src/mail.rs
//! "Send my portfolio" mail. The bundled transport only logs the message;
//! real delivery is left to an integration implementing [`MailTransport`].

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use thiserror::Error;
use tracing::info;

use crate::preview::html::escape;
use crate::types::Portfolio;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPortfolioRequest {
    pub to: String,
    #[serde(default)]
    pub name: String,
    pub form_data: Portfolio,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Recipient address is missing")]
    MissingRecipient,

    #[error("Mail transport failed: {0}")]
    Transport(String),
}

pub trait MailTransport: Send + Sync {
    fn deliver(&self, message: &MailMessage) -> Result<(), MailError>;
}

/// Logs the message instead of sending it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTransport;

impl MailTransport for LogTransport {
    fn deliver(&self, message: &MailMessage) -> Result<(), MailError> {
        info!(to = %message.to, "Email would be sent to: {}", message.to);
        info!("Content: {}", message.html);
        Ok(())
    }
}

pub fn compose(request: &SendPortfolioRequest) -> MailMessage {
    let data = &request.form_data;
    let mut html = String::new();
    let _ = writeln!(html, "<h1>Hello {},</h1>", escape(&request.name));
    html.push_str("<p>Your portfolio has been successfully created!</p>\n");
    html.push_str("<h2>Your Information:</h2>\n");
    let _ = writeln!(html, "<p><strong>Email:</strong> {}</p>", escape(&data.email));
    let _ = writeln!(html, "<p><strong>Major:</strong> {}</p>", escape(&data.major));
    let _ = writeln!(html, "<p><strong>Bio:</strong> {}</p>", escape(&data.bio));
    html.push_str("<h2>Projects:</h2>\n");
    for project in &data.projects {
        let _ = writeln!(
            html,
            "<p><strong>{}</strong> - {}</p>",
            escape(&project.title),
            escape(&project.period)
        );
    }
    html.push_str(
        "<p>You can view and download your portfolio anytime by visiting our platform.</p>\n",
    );

    MailMessage {
        to: request.to.trim().to_string(),
        subject: "Your portfolio is ready".to_string(),
        html,
    }
}

pub fn send_portfolio(
    transport: &dyn MailTransport,
    request: &SendPortfolioRequest,
) -> Result<(), MailError> {
    if request.to.trim().is_empty() {
        return Err(MailError::MissingRecipient);
    }
    transport.deliver(&compose(request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Project;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording(Mutex<Vec<MailMessage>>);

    impl MailTransport for Recording {
        fn deliver(&self, message: &MailMessage) -> Result<(), MailError> {
            self.0.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn request() -> SendPortfolioRequest {
        SendPortfolioRequest {
            to: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            form_data: Portfolio {
                projects: vec![
                    Project {
                        title: "Engine".to_string(),
                        period: "1843".to_string(),
                        ..Project::default()
                    },
                    Project {
                        title: "Notes <G>".to_string(),
                        ..Project::default()
                    },
                ],
                ..Portfolio::default()
            },
        }
    }

    #[test]
    fn test_compose_lists_each_project() {
        let message = compose(&request());
        assert!(message.html.contains("<h1>Hello Ada,</h1>"));
        assert!(message.html.contains("<p><strong>Engine</strong> - 1843</p>"));
        assert!(message.html.contains("Notes &lt;G&gt;"));
    }

    #[test]
    fn test_send_goes_through_transport() {
        let transport = Recording::default();
        send_portfolio(&transport, &request()).unwrap();
        assert_eq!(transport.0.lock().unwrap()[0].to, "ada@example.com");

        assert!(send_portfolio(&LogTransport, &request()).is_ok());
    }

    #[test]
    fn test_missing_recipient() {
        let mut req = request();
        req.to = " ".to_string();
        assert!(matches!(
            send_portfolio(&LogTransport, &req),
            Err(MailError::MissingRecipient)
        ));
    }

    #[test]
    fn test_request_wire_format() {
        let req: SendPortfolioRequest = serde_json::from_str(
            r#"{"to": "a@b.c", "name": "A", "formData": {"name": "A", "skills": ["Rust"]}}"#,
        )
        .unwrap();
        assert_eq!(req.form_data.skills, vec!["Rust"]);
    }
}
