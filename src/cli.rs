// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::autosave::DraftManager;
use crate::config::{load_language, save_language, BuilderConfig};
use crate::export::{ExportFormat, Exporter, PdfExporter};
use crate::preview::{self, html};
use crate::storage::{FileStore, KeyValueStore};
use crate::utils::{normalize_language, output_file_path, write_file_bytes};
use crate::web::start_web_server;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Build, preview and export a developer portfolio")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./config.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API with autosave
    Serve,
    /// Manage saved drafts
    Drafts {
        #[command(subcommand)]
        command: DraftsCommand,
    },
    /// Print the preview of the current portfolio
    Preview {
        /// Render as HTML instead of JSON
        #[arg(long)]
        html: bool,
    },
    /// Export the current portfolio
    Export {
        #[command(subcommand)]
        format: ExportCommand,
    },
    /// Show or set the display language (ko, en, ja, zh)
    Language { code: Option<String> },
}

#[derive(Subcommand)]
pub enum DraftsCommand {
    /// List saved drafts
    List,
    /// Make a draft the current portfolio
    Continue { id: String },
    /// Delete a draft
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ExportCommand {
    /// Compile a PDF with typst
    Pdf {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write the printable HTML page
    Print {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let config = BuilderConfig::load(cli.config.as_deref())?;
    let store: Arc<dyn KeyValueStore> = Arc::new(
        FileStore::open(&config.storage_dir).context("Failed to open draft storage")?,
    );
    let drafts = DraftManager::new(store.clone());

    match cli.command {
        Command::Serve => start_web_server(config).await?,

        Command::Drafts { command } => handle_drafts_command(command, &drafts, &config)?,

        Command::Preview { html: as_html } => {
            let document = preview::render(&drafts.load_snapshot());
            if as_html {
                println!("{}", html::to_html(&document));
            } else {
                let json = serde_json::to_string_pretty(&document)
                    .context("Failed to serialize preview")?;
                println!("{}", json);
            }
        }

        Command::Export { format } => {
            let (format, out) = match format {
                ExportCommand::Pdf { out } => (ExportFormat::Pdf, out),
                ExportCommand::Print { out } => (ExportFormat::Print, out),
            };
            let out_dir = out.unwrap_or_else(|| config.output_dir.clone());
            let exporter = Exporter::new(PdfExporter::new(
                config.typst_bin.clone(),
                config.scratch_dir.clone(),
            ));

            let artifact = match exporter.export(format, &drafts.load_snapshot()).await {
                Ok(artifact) => artifact,
                Err(e) => {
                    error!("Export failed: {}", e);
                    return Err(e).context("Export failed");
                }
            };

            let path = output_file_path(&out_dir, &artifact.filename)?;
            write_file_bytes(&path, &artifact.bytes).await?;
            info!("Wrote {}", path.display());
            println!("{}", path.display());
        }

        Command::Language { code } => match code {
            Some(code) => {
                let language = normalize_language(Some(&code));
                save_language(store.as_ref(), language)
                    .context("Failed to save language setting")?;
                info!("Language set to {}", language);
                println!("{}", language);
            }
            None => {
                println!("{}", load_language(store.as_ref(), config.locale.as_deref()));
            }
        },
    }

    Ok(())
}

fn handle_drafts_command(
    command: DraftsCommand,
    drafts: &DraftManager,
    config: &BuilderConfig,
) -> Result<()> {
    match command {
        DraftsCommand::List => {
            let language = load_language(drafts.store().as_ref(), config.locale.as_deref());
            let list = drafts.list_drafts();
            if list.is_empty() {
                info!("No drafts saved yet");
            }
            for draft in list {
                println!(
                    "{}\t{}\t{}\t{} project(s)",
                    draft.id,
                    draft.name,
                    language.format_timestamp(&draft.last_saved),
                    draft.data.projects.len()
                );
            }
        }

        DraftsCommand::Continue { id } => match drafts.continue_draft(&id)? {
            Some(portfolio) => info!("Continuing draft {} ({})", id, portfolio.name),
            None => anyhow::bail!("Draft not found: {}", id),
        },

        DraftsCommand::Delete { id } => {
            if !drafts.delete_draft(&id)? {
                anyhow::bail!("Draft not found: {}", id);
            }
            info!("Deleted draft {}", id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export_with_output_dir() {
        let cli = Cli::parse_from(["folio", "export", "pdf", "--out", "/tmp/out"]);
        match cli.command {
            Command::Export {
                format: ExportCommand::Pdf { out },
            } => assert_eq!(out, Some(PathBuf::from("/tmp/out"))),
            _ => panic!("expected export pdf"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["folio", "drafts", "list", "--log-json", "--config", "c.yaml"]);
        assert!(cli.log_json);
        assert_eq!(cli.config, Some(PathBuf::from("c.yaml")));
        assert!(matches!(
            cli.command,
            Command::Drafts {
                command: DraftsCommand::List
            }
        ));
    }

    #[test]
    fn test_language_code_is_optional() {
        let cli = Cli::parse_from(["folio", "language"]);
        assert!(matches!(cli.command, Command::Language { code: None }));
    }
}
