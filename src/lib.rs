//! Multi-step portfolio builder: form state, draft autosave, preview and
//! PDF/print export, exposed over HTTP and a CLI.

pub mod autosave;
pub mod cli;
pub mod config;
pub mod editors;
pub mod export;
pub mod form;
pub mod image;
pub mod mail;
pub mod preview;
pub mod session;
pub mod storage;
pub mod types;
pub mod utils;
pub mod web;

pub use autosave::{spawn_autosave, AutosaveHandle, DraftManager, DEFAULT_AUTOSAVE_INTERVAL};
pub use config::BuilderConfig;
pub use export::{ExportArtifact, ExportError, ExportFormat, Exporter};
pub use form::FormStore;
pub use session::{BuilderSession, Step};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use types::{Draft, FieldUpdate, Language, Portfolio};
pub use web::{build_rocket, start_web_server, AppState};
