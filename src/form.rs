// src/form.rs
//! In-memory form state for one portfolio.
//!
//! Every mutation bumps the revision and is published on a watch channel, so
//! the autosave loop and preview consumers see it on their next pass.

use tokio::sync::watch;
use tracing::debug;

use crate::types::{FieldUpdate, Portfolio};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub revision: u64,
    pub portfolio: Portfolio,
}

#[derive(Debug)]
pub struct FormStore {
    tx: watch::Sender<FormState>,
}

impl FormStore {
    pub fn new(portfolio: Portfolio) -> Self {
        let (tx, _rx) = watch::channel(FormState {
            revision: 0,
            portfolio,
        });
        Self { tx }
    }

    /// Shallow merge: replace the field named by `update`, keep the rest.
    pub fn update(&self, update: FieldUpdate) {
        let key = update.key();
        self.tx.send_modify(|state| {
            state.portfolio.apply(update);
            state.revision += 1;
        });
        debug!(field = key, revision = self.revision(), "Form field updated");
    }

    /// Swap the whole record, as when a draft is continued.
    pub fn replace(&self, portfolio: Portfolio) {
        self.tx.send_modify(|state| {
            state.portfolio = portfolio;
            state.revision += 1;
        });
    }

    pub fn snapshot(&self) -> Portfolio {
        self.tx.borrow().portfolio.clone()
    }

    pub fn revision(&self) -> u64 {
        self.tx.borrow().revision
    }

    /// Read without cloning the whole record.
    pub fn with<R>(&self, f: impl FnOnce(&Portfolio) -> R) -> R {
        f(&self.tx.borrow().portfolio)
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.tx.subscribe()
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new(Portfolio::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_bumps_revision_and_keeps_other_fields() {
        let store = FormStore::default();
        store.update(FieldUpdate::Name("Ada".to_string()));
        store.update(FieldUpdate::Skills(vec!["Rust".to_string()]));

        let portfolio = store.snapshot();
        assert_eq!(portfolio.name, "Ada");
        assert_eq!(portfolio.skills, vec!["Rust"]);
        assert_eq!(store.revision(), 2);
    }

    #[tokio::test]
    async fn test_subscribers_observe_mutations() {
        let store = FormStore::default();
        let mut rx = store.subscribe();

        store.update(FieldUpdate::Major("Mathematics".to_string()));

        rx.changed().await.unwrap();
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.revision, 1);
        assert_eq!(state.portfolio.major, "Mathematics");
    }
}
