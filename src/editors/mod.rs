// src/editors/mod.rs
//! Step editors of the builder wizard.
//!
//! Each editor keeps a buffer for the item being composed and only touches the
//! form through [`FormStore::update`](crate::form::FormStore::update).

pub mod basic_info;
pub mod certifications;
pub mod projects;
pub mod skills;

pub use basic_info::BasicInfoStep;
pub use certifications::CertificationsStep;
pub use projects::ProjectsStep;
pub use skills::SkillsStep;

use crate::types::{Award, Certification, Project};

/// The label that must be non-empty before an item is committed.
pub trait Labeled {
    fn label(&self) -> &str;
}

impl Labeled for Project {
    fn label(&self) -> &str {
        &self.title
    }
}

impl Labeled for Certification {
    fn label(&self) -> &str {
        &self.name
    }
}

impl Labeled for Award {
    fn label(&self) -> &str {
        &self.name
    }
}

/// Buffer plus optional edit index for one collection.
#[derive(Debug, Clone, Default)]
pub struct CollectionEditor<T> {
    buffer: T,
    editing_index: Option<usize>,
}

impl<T: Labeled + Clone + Default> CollectionEditor<T> {
    pub fn new() -> Self {
        Self {
            buffer: T::default(),
            editing_index: None,
        }
    }

    pub fn buffer(&self) -> &T {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut T {
        &mut self.buffer
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.editing_index
    }

    /// Returns the new collection, or `None` when the buffer's label is blank.
    ///
    /// An active edit index that no longer points inside `items` falls back to
    /// appending.
    pub fn commit(&mut self, items: &[T]) -> Option<Vec<T>> {
        if self.buffer.label().trim().is_empty() {
            return None;
        }

        let item = std::mem::take(&mut self.buffer);
        let mut updated = items.to_vec();
        match self.editing_index.take() {
            Some(index) if index < updated.len() => updated[index] = item,
            _ => updated.push(item),
        }
        Some(updated)
    }

    /// Load `items[index]` into the buffer. Returns false when out of range.
    pub fn edit(&mut self, items: &[T], index: usize) -> bool {
        match items.get(index) {
            Some(item) => {
                self.buffer = item.clone();
                self.editing_index = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.buffer = T::default();
        self.editing_index = None;
    }
}

/// Copy of `items` without the entry at `index`, or `None` when out of range.
pub fn remove_at<T: Clone>(items: &[T], index: usize) -> Option<Vec<T>> {
    if index >= items.len() {
        return None;
    }
    let mut updated = items.to_vec();
    updated.remove(index);
    Some(updated)
}
