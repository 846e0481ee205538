// src/types/mod.rs
//! Persisted data model shared by the store, the editors and the exporters

pub mod draft;
pub mod language;
pub mod portfolio;

pub use draft::{Draft, CURRENT_DRAFT_ID, UNTITLED_DRAFT_NAME};
pub use language::Language;
pub use portfolio::{Award, Certification, FieldUpdate, Portfolio, Project, ProjectStatus};
