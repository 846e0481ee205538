// src/export/mod.rs
//! PDF and print exports of the preview document.
//!
//! Both paths return `Result<ExportArtifact, ExportError>`; surfacing a
//! failure to the user is left to the caller.

pub mod pdf;
pub mod print;

pub use pdf::PdfExporter;
pub use print::PrintExporter;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use std::path::PathBuf;
use thiserror::Error;

use crate::types::Portfolio;

/// Download name used when the portfolio has no name.
pub const FALLBACK_FILENAME: &str = "portfolio";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Print,
}

#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF renderer not available at {binary}: {source}")]
    RendererUnavailable {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF rendering failed: {stderr}")]
    RenderFailed { stderr: String },

    #[error("Export workspace error at {path}: {source}")]
    Workspace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::RendererUnavailable { .. } => "RENDERER_UNAVAILABLE",
            Self::RenderFailed { .. } => "RENDER_FAILED",
            Self::Workspace { .. } => "EXPORT_WORKSPACE_ERROR",
        }
    }
}

/// Dispatches to the PDF or print path.
#[derive(Debug, Clone)]
pub struct Exporter {
    pub pdf: PdfExporter,
    pub print: PrintExporter,
}

impl Exporter {
    pub fn new(pdf: PdfExporter) -> Self {
        Self {
            pdf,
            print: PrintExporter,
        }
    }

    pub async fn export(
        &self,
        format: ExportFormat,
        portfolio: &Portfolio,
    ) -> Result<ExportArtifact, ExportError> {
        match format {
            ExportFormat::Pdf => self.pdf.export(portfolio).await,
            ExportFormat::Print => Ok(self.print.export(portfolio)),
        }
    }
}

fn sanitize_filename(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// File name derived from the portfolio name, e.g. `Ada_Lovelace.pdf`.
pub fn download_filename(name: &str, extension: &str) -> String {
    let stem = sanitize_filename(name);
    let stem = if stem.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        stem
    };
    format!("{}.{}", stem, extension)
}

/// `Content-Disposition` value with an ASCII fallback and the UTF-8 name.
pub fn content_disposition(filename: &str) -> String {
    let ascii: String = filename
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii,
        utf8_percent_encode(filename, NON_ALPHANUMERIC)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_filename() {
        assert_eq!(download_filename("Ada Lovelace", "pdf"), "Ada_Lovelace.pdf");
        assert_eq!(download_filename("", "pdf"), "portfolio.pdf");
        assert_eq!(download_filename("   ", "html"), "portfolio.html");
        assert_eq!(download_filename("../../etc", "pdf"), "etc.pdf");
        assert_eq!(download_filename("김 철수", "pdf"), "김_철수.pdf");
    }

    #[test]
    fn test_content_disposition() {
        assert_eq!(
            content_disposition("Ada_Lovelace.pdf"),
            "attachment; filename=\"Ada_Lovelace.pdf\"; filename*=UTF-8''Ada%5FLovelace%2Epdf"
        );
        assert!(content_disposition("김.pdf").starts_with("attachment; filename=\"_.pdf\""));
    }
}
