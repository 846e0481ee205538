// src/editors/certifications.rs
use super::{remove_at, CollectionEditor};
use crate::form::FormStore;
use crate::types::{Award, Certification, FieldUpdate};

/// Step 4: certifications and awards, each with its own buffer.
#[derive(Debug, Default)]
pub struct CertificationsStep {
    certifications: CollectionEditor<Certification>,
    awards: CollectionEditor<Award>,
}

impl CertificationsStep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn certification_draft_mut(&mut self) -> &mut Certification {
        self.certifications.buffer_mut()
    }

    pub fn award_draft_mut(&mut self) -> &mut Award {
        self.awards.buffer_mut()
    }

    pub fn add_certification(&mut self, form: &FormStore) -> bool {
        let current = form.with(|p| p.certifications.clone());
        match self.certifications.commit(&current) {
            Some(certifications) => {
                form.update(FieldUpdate::Certifications(certifications));
                true
            }
            None => false,
        }
    }

    pub fn edit_certification(&mut self, form: &FormStore, index: usize) -> bool {
        form.with(|p| self.certifications.edit(&p.certifications, index))
    }

    pub fn delete_certification(&mut self, form: &FormStore, index: usize) -> bool {
        match form.with(|p| remove_at(&p.certifications, index)) {
            Some(certifications) => {
                form.update(FieldUpdate::Certifications(certifications));
                true
            }
            None => false,
        }
    }

    pub fn add_award(&mut self, form: &FormStore) -> bool {
        let current = form.with(|p| p.awards.clone());
        match self.awards.commit(&current) {
            Some(awards) => {
                form.update(FieldUpdate::Awards(awards));
                true
            }
            None => false,
        }
    }

    pub fn edit_award(&mut self, form: &FormStore, index: usize) -> bool {
        form.with(|p| self.awards.edit(&p.awards, index))
    }

    pub fn delete_award(&mut self, form: &FormStore, index: usize) -> bool {
        match form.with(|p| remove_at(&p.awards, index)) {
            Some(awards) => {
                form.update(FieldUpdate::Awards(awards));
                true
            }
            None => false,
        }
    }
}
