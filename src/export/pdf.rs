// src/export/pdf.rs
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::process::Command;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{download_filename, ExportArtifact, ExportError};
use crate::image;
use crate::preview::{self, typst::to_typst};
use crate::types::Portfolio;

const SOURCE_FILE: &str = "main.typ";
const OUTPUT_FILE: &str = "portfolio.pdf";

/// Compiles the preview document with the `typst` CLI.
#[derive(Debug, Clone)]
pub struct PdfExporter {
    typst_bin: PathBuf,
    scratch_dir: PathBuf,
}

impl PdfExporter {
    pub fn new(typst_bin: PathBuf, scratch_dir: PathBuf) -> Self {
        Self {
            typst_bin,
            scratch_dir,
        }
    }

    pub async fn export(&self, portfolio: &Portfolio) -> Result<ExportArtifact, ExportError> {
        let workspace = self.scratch_dir.join(format!("export-{}", Uuid::new_v4()));
        fs::create_dir_all(&workspace)
            .await
            .map_err(|source| ExportError::Workspace {
                path: workspace.clone(),
                source,
            })?;

        let result = self.compile_in(&workspace, portfolio).await;

        if let Err(e) = fs::remove_dir_all(&workspace).await {
            warn!("Failed to clean up export workspace {}: {}", workspace.display(), e);
        }

        match &result {
            Ok(artifact) => info!(
                "Generated PDF {} ({} bytes)",
                artifact.filename,
                artifact.bytes.len()
            ),
            Err(e) => error!("Error generating PDF: {}", e),
        }
        result
    }

    async fn compile_in(
        &self,
        workspace: &Path,
        portfolio: &Portfolio,
    ) -> Result<ExportArtifact, ExportError> {
        let image_file = self.write_profile_image(workspace, portfolio).await?;
        let source = to_typst(&preview::render(portfolio), image_file.as_deref());
        write(&workspace.join(SOURCE_FILE), source.as_bytes()).await?;

        let output = Command::new(&self.typst_bin)
            .current_dir(workspace)
            .arg("compile")
            .arg(SOURCE_FILE)
            .arg(OUTPUT_FILE)
            .output()
            .await
            .map_err(|source| ExportError::RendererUnavailable {
                binary: self.typst_bin.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ExportError::RenderFailed { stderr });
        }

        let pdf_path = workspace.join(OUTPUT_FILE);
        let bytes = fs::read(&pdf_path)
            .await
            .map_err(|source| ExportError::Workspace {
                path: pdf_path,
                source,
            })?;

        Ok(ExportArtifact {
            filename: download_filename(&portfolio.name, "pdf"),
            content_type: "application/pdf",
            bytes,
        })
    }

    /// A picture that fails to decode is left out rather than failing the export.
    async fn write_profile_image(
        &self,
        workspace: &Path,
        portfolio: &Portfolio,
    ) -> Result<Option<String>, ExportError> {
        if portfolio.profile_image.is_empty() {
            return Ok(None);
        }
        match image::decode_data_url(&portfolio.profile_image) {
            Ok((kind, bytes)) => {
                let file_name = format!("profile.{}", kind.extension());
                write(&workspace.join(&file_name), &bytes).await?;
                Ok(Some(file_name))
            }
            Err(e) => {
                warn!("Skipping profile image in PDF: {}", e);
                Ok(None)
            }
        }
    }
}

async fn write(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    fs::write(path, contents)
        .await
        .map_err(|source| ExportError::Workspace {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_renderer_is_reported_and_workspace_removed() {
        let scratch = tempfile::tempdir().unwrap();
        let exporter = PdfExporter::new(
            PathBuf::from("/nonexistent/bin/typst"),
            scratch.path().to_path_buf(),
        );
        let portfolio = Portfolio {
            name: "Ada".to_string(),
            profile_image: "data:image/png;base64,!!!".to_string(),
            ..Portfolio::default()
        };

        let err = exporter.export(&portfolio).await.unwrap_err();
        assert!(matches!(err, ExportError::RendererUnavailable { .. }));
        assert_eq!(err.code(), "RENDERER_UNAVAILABLE");

        let leftovers = std::fs::read_dir(scratch.path()).unwrap().count();
        assert_eq!(leftovers, 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_renderer_failure_carries_stderr() {
        let scratch = tempfile::tempdir().unwrap();
        // `false` exits non-zero without output, standing in for a failing compile
        let exporter = PdfExporter::new(PathBuf::from("false"), scratch.path().to_path_buf());

        let err = exporter.export(&Portfolio::default()).await.unwrap_err();
        assert!(matches!(err, ExportError::RenderFailed { .. }));
    }
}
