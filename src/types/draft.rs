// src/types/draft.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Portfolio;

/// Id of the slot the autosave loop writes to.
pub const CURRENT_DRAFT_ID: &str = "current-draft";

pub const UNTITLED_DRAFT_NAME: &str = "Untitled Portfolio";

/// A named, timestamped snapshot of a portfolio as listed in the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Draft {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub last_saved: DateTime<Utc>,
    pub data: Portfolio,
}

impl Draft {
    pub fn snapshot(id: &str, portfolio: &Portfolio, saved_at: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            name: display_name(&portfolio.name),
            email: portfolio.email.clone(),
            last_saved: saved_at,
            data: portfolio.clone(),
        }
    }
}

fn display_name(name: &str) -> String {
    if name.trim().is_empty() {
        UNTITLED_DRAFT_NAME.to_string()
    } else {
        name.to_string()
    }
}
