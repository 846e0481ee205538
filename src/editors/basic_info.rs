// src/editors/basic_info.rs
use tracing::{info, warn};

use crate::form::FormStore;
use crate::image::{self, ImageError};
use crate::types::FieldUpdate;

/// Step 1: identity and contact fields. Values are written straight through.
#[derive(Debug, Default)]
pub struct BasicInfoStep;

impl BasicInfoStep {
    pub fn set_name(&self, form: &FormStore, value: impl Into<String>) {
        form.update(FieldUpdate::Name(value.into()));
    }

    pub fn set_major(&self, form: &FormStore, value: impl Into<String>) {
        form.update(FieldUpdate::Major(value.into()));
    }

    pub fn set_email(&self, form: &FormStore, value: impl Into<String>) {
        form.update(FieldUpdate::Email(value.into()));
    }

    pub fn set_github(&self, form: &FormStore, value: impl Into<String>) {
        form.update(FieldUpdate::Github(value.into()));
    }

    pub fn set_linkedin(&self, form: &FormStore, value: impl Into<String>) {
        form.update(FieldUpdate::Linkedin(value.into()));
    }

    pub fn set_bio(&self, form: &FormStore, value: impl Into<String>) {
        form.update(FieldUpdate::Bio(value.into()));
    }

    /// Encode an uploaded picture and store it as the profile image.
    pub fn set_profile_image(&self, form: &FormStore, bytes: &[u8]) -> Result<(), ImageError> {
        match image::to_data_url(bytes) {
            Ok(url) => {
                info!("Profile image updated ({} bytes)", bytes.len());
                form.update(FieldUpdate::ProfileImage(url));
                Ok(())
            }
            Err(e) => {
                warn!("Rejected profile image: {}", e);
                Err(e)
            }
        }
    }

    pub fn clear_profile_image(&self, form: &FormStore) {
        form.update(FieldUpdate::ProfileImage(String::new()));
    }
}
