// src/editors/projects.rs
use tracing::{debug, info};

use super::{remove_at, CollectionEditor};
use crate::form::FormStore;
use crate::image::{self, ImageError};
use crate::types::{FieldUpdate, Project};

/// Step 2: compose, edit and remove projects.
#[derive(Debug, Default)]
pub struct ProjectsStep {
    editor: CollectionEditor<Project>,
}

impl ProjectsStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Project {
        self.editor.buffer()
    }

    pub fn draft_mut(&mut self) -> &mut Project {
        self.editor.buffer_mut()
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.editor.editing_index()
    }

    pub fn set_screenshot(&mut self, bytes: &[u8]) -> Result<(), ImageError> {
        self.editor.buffer_mut().screenshot = image::to_data_url(bytes)?;
        Ok(())
    }

    /// Append the buffered project, or replace the one being edited.
    ///
    /// Returns false, leaving the form untouched, when the title is blank.
    pub fn add(&mut self, form: &FormStore) -> bool {
        let replacing = self.editor.editing_index();
        let current = form.with(|p| p.projects.clone());
        match self.editor.commit(&current) {
            Some(projects) => {
                match replacing {
                    Some(index) => info!("Project {} updated", index),
                    None => info!("Project added, {} total", projects.len()),
                }
                form.update(FieldUpdate::Projects(projects));
                true
            }
            None => {
                debug!("Ignoring project without a title");
                false
            }
        }
    }

    pub fn edit(&mut self, form: &FormStore, index: usize) -> bool {
        form.with(|p| self.editor.edit(&p.projects, index))
    }

    pub fn cancel_edit(&mut self) {
        self.editor.cancel_edit();
    }

    pub fn delete(&mut self, form: &FormStore, index: usize) -> bool {
        let Some(projects) = form.with(|p| remove_at(&p.projects, index)) else {
            return false;
        };
        form.update(FieldUpdate::Projects(projects));
        true
    }
}
