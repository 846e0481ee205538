// src/autosave.rs
//! Draft persistence: the periodic autosave tick, the load path and the
//! gallery operations on the persisted draft list.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::form::FormStore;
use crate::storage::{KeyValueStore, StoreError, DRAFTS_KEY, PORTFOLIO_KEY};
use crate::types::{Draft, Portfolio, CURRENT_DRAFT_ID};

pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_millis(2000);

pub struct DraftManager {
    store: Arc<dyn KeyValueStore>,
    draft_id: String,
    // held across every read-modify-write of the draft list
    list_lock: Mutex<()>,
}

impl DraftManager {
    /// Manager writing to the `current-draft` slot.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_draft_id(store, CURRENT_DRAFT_ID)
    }

    pub fn with_draft_id(store: Arc<dyn KeyValueStore>, draft_id: &str) -> Self {
        Self {
            store,
            draft_id: draft_id.to_string(),
            list_lock: Mutex::new(()),
        }
    }

    pub fn draft_id(&self) -> &str {
        &self.draft_id
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    // ===== Load path =====

    /// Last saved snapshot, or an empty portfolio when there is none or it
    /// cannot be parsed. Failures are logged, never returned.
    pub fn load_snapshot(&self) -> Portfolio {
        let raw = match self.store.get(PORTFOLIO_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Portfolio::default(),
            Err(e) => {
                error!("Error reading saved portfolio: {}", e);
                return Portfolio::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(portfolio) => portfolio,
            Err(e) => {
                error!("Error loading saved data: {}", e);
                Portfolio::default()
            }
        }
    }

    pub fn write_snapshot(&self, portfolio: &Portfolio) -> Result<(), StoreError> {
        let json = to_json(PORTFOLIO_KEY, portfolio)?;
        self.store.set(PORTFOLIO_KEY, &json)
    }

    // ===== Autosave tick =====

    pub fn tick(&self, portfolio: &Portfolio) -> Result<Draft, StoreError> {
        self.tick_at(portfolio, Utc::now())
    }

    /// Write the snapshot key, then upsert this manager's entry in the draft
    /// list. The two writes are not atomic; the next tick reconciles them.
    ///
    /// Other entries are carried over as stored, even ones that no longer
    /// parse. An unreadable list is left alone and the tick fails.
    pub fn tick_at(&self, portfolio: &Portfolio, now: DateTime<Utc>) -> Result<Draft, StoreError> {
        let _guard = self.lock_list()?;
        self.write_snapshot(portfolio)?;

        let entry = Draft::snapshot(&self.draft_id, portfolio, now);
        let value = to_value(&entry)?;
        let mut entries = self.read_entries()?;
        match entries
            .iter_mut()
            .find(|e| entry_id(e) == Some(self.draft_id.as_str()))
        {
            Some(existing) => *existing = value,
            None => entries.push(value),
        }
        self.write_entries(&entries)?;

        debug!(draft_id = %self.draft_id, drafts = entries.len(), "Autosave tick");
        Ok(entry)
    }

    // ===== Gallery =====

    /// Drafts in stored order. Entries that fail to parse are skipped, and an
    /// unreadable list reads as empty.
    pub fn list_drafts(&self) -> Vec<Draft> {
        let entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e) => {
                error!("Error loading drafts: {}", e);
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<Draft>(entry) {
                Ok(draft) => Some(draft),
                Err(e) => {
                    warn!("Skipping unreadable draft at position {}: {}", index, e);
                    None
                }
            })
            .collect()
    }

    pub fn find_draft(&self, id: &str) -> Option<Draft> {
        self.list_drafts().into_iter().find(|d| d.id == id)
    }

    /// Make a draft's portfolio the active snapshot. Other drafts are not
    /// touched. Returns `None` when no draft has that id.
    pub fn continue_draft(&self, id: &str) -> Result<Option<Portfolio>, StoreError> {
        let Some(draft) = self.find_draft(id) else {
            warn!("Draft not found: {}", id);
            return Ok(None);
        };
        self.write_snapshot(&draft.data)?;
        info!("Continuing draft {} ({})", draft.id, draft.name);
        Ok(Some(draft.data))
    }

    /// Remove every draft with `id`. Returns whether anything was removed.
    pub fn delete_draft(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.lock_list()?;
        let entries = self.read_entries()?;
        let before = entries.len();
        let kept: Vec<Value> = entries
            .into_iter()
            .filter(|e| entry_id(e) != Some(id))
            .collect();
        if kept.len() == before {
            return Ok(false);
        }
        self.write_entries(&kept)?;
        info!("Deleted draft {}", id);
        Ok(true)
    }

    /// Store a copy of `portfolio` as a new gallery entry with its own id.
    pub fn save_as(&self, portfolio: &Portfolio, name: Option<&str>) -> Result<Draft, StoreError> {
        let mut draft = Draft::snapshot(&Uuid::new_v4().to_string(), portfolio, Utc::now());
        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            draft.name = name.to_string();
        }

        let _guard = self.lock_list()?;
        let mut entries = self.read_entries()?;
        entries.push(to_value(&draft)?);
        self.write_entries(&entries)?;
        info!("Saved draft {} as {}", draft.id, draft.name);
        Ok(draft)
    }

    fn lock_list(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        self.list_lock.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Raw list entries. A missing list is empty; a list that is not a JSON
    /// array is an error.
    fn read_entries(&self) -> Result<Vec<Value>, StoreError> {
        match self.store.get(DRAFTS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                key: DRAFTS_KEY.to_string(),
                source,
            }),
            None => Ok(Vec::new()),
        }
    }

    fn write_entries(&self, entries: &[Value]) -> Result<(), StoreError> {
        let json = to_json(DRAFTS_KEY, entries)?;
        self.store.set(DRAFTS_KEY, &json)
    }
}

fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}

fn to_value(draft: &Draft) -> Result<Value, StoreError> {
    serde_json::to_value(draft).map_err(|source| StoreError::Serialize {
        key: DRAFTS_KEY.to_string(),
        source,
    })
}

fn to_json<T: serde::Serialize + ?Sized>(key: &str, value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })
}

// ===== Periodic task =====

/// Running autosave loop. Dropping the handle stops it.
#[derive(Debug)]
pub struct AutosaveHandle {
    task: JoinHandle<()>,
}

impl AutosaveHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for AutosaveHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Snapshot `form` into storage every `period`, starting one period from now.
///
/// Must be called from within a tokio runtime. A failed tick is logged and
/// not retried; the loop carries on with the next one.
pub fn spawn_autosave(
    drafts: Arc<DraftManager>,
    form: Arc<FormStore>,
    period: Duration,
) -> AutosaveHandle {
    let task = tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("Autosave started, every {:?}", period);

        loop {
            ticker.tick().await;
            let portfolio = form.snapshot();
            if let Err(e) = drafts.tick(&portfolio) {
                error!("Autosave failed: {}", e);
            }
        }
    });

    AutosaveHandle { task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::types::{FieldUpdate, Project};
    use pretty_assertions::assert_eq;

    fn manager() -> DraftManager {
        DraftManager::new(Arc::new(MemoryStore::new()))
    }

    fn ada() -> Portfolio {
        Portfolio {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            projects: vec![Project {
                title: "Analytical Engine Simulator".to_string(),
                period: "2024".to_string(),
                ..Project::default()
            }],
            ..Portfolio::default()
        }
    }

    #[test]
    fn test_repeated_ticks_do_not_duplicate() {
        let drafts = manager();
        for _ in 0..5 {
            drafts.tick(&ada()).unwrap();
        }
        let listed = drafts.list_drafts();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, CURRENT_DRAFT_ID);
        assert_eq!(listed[0].name, "Ada Lovelace");
    }

    #[test]
    fn test_tick_overwrites_and_refreshes_timestamp() {
        let drafts = manager();
        let first = Utc::now() - chrono::Duration::minutes(5);
        drafts.tick_at(&Portfolio::default(), first).unwrap();
        drafts.tick(&ada()).unwrap();

        let listed = drafts.list_drafts();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].last_saved > first);
        assert_eq!(listed[0].data, ada());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let drafts = manager();
        drafts.tick(&ada()).unwrap();
        assert_eq!(drafts.load_snapshot(), ada());
    }

    #[test]
    fn test_corrupt_snapshot_falls_back_to_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(PORTFOLIO_KEY, "{not json").unwrap();
        assert_eq!(DraftManager::new(store.clone()).load_snapshot(), Portfolio::default());

        store.set(PORTFOLIO_KEY, r#"{"name":"Ada","hobby":"chess"}"#).unwrap();
        assert_eq!(DraftManager::new(store).load_snapshot(), Portfolio::default());
    }

    #[test]
    fn test_tick_keeps_entries_it_cannot_parse() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                DRAFTS_KEY,
                r#"[
                    {"id": "a", "name": "Keep me", "lastSaved": "2024-01-01T00:00:00Z", "data": {}},
                    {"id": "b", "name": "Odd", "lastSaved": "2024-01-01T00:00:00Z", "data": {"theme": "dark"}}
                ]"#,
            )
            .unwrap();
        let drafts = DraftManager::new(store.clone());

        let listed: Vec<String> = drafts.list_drafts().into_iter().map(|d| d.name).collect();
        assert_eq!(listed, vec!["Keep me"]);

        drafts.tick(&Portfolio::default()).unwrap();

        let raw: Vec<Value> =
            serde_json::from_str(&store.get(DRAFTS_KEY).unwrap().unwrap()).unwrap();
        let ids: Vec<&str> = raw.iter().filter_map(entry_id).collect();
        assert_eq!(ids, vec!["a", "b", CURRENT_DRAFT_ID]);
        assert_eq!(raw[1]["data"]["theme"], "dark");
    }

    #[test]
    fn test_unreadable_list_is_not_overwritten() {
        let store = Arc::new(MemoryStore::new());
        store.set(DRAFTS_KEY, "[{]").unwrap();
        let drafts = DraftManager::new(store.clone());

        assert!(drafts.list_drafts().is_empty());
        assert!(matches!(
            drafts.tick(&ada()),
            Err(StoreError::Corrupt { .. })
        ));
        assert!(drafts.save_as(&ada(), None).is_err());
        assert_eq!(store.get(DRAFTS_KEY).unwrap().as_deref(), Some("[{]"));
    }

    #[test]
    fn test_concurrent_ticks_do_not_drop_saved_drafts() {
        let drafts = Arc::new(manager());
        let ticker = {
            let drafts = drafts.clone();
            std::thread::spawn(move || {
                for _ in 0..300 {
                    drafts.tick(&ada()).unwrap();
                }
            })
        };

        for _ in 0..300 {
            drafts.save_as(&ada(), None).unwrap();
        }
        ticker.join().unwrap();

        let listed = drafts.list_drafts();
        assert_eq!(listed.len(), 301);
        assert_eq!(
            listed.iter().filter(|d| d.id == CURRENT_DRAFT_ID).count(),
            1
        );
    }

    #[test]
    fn test_continue_draft_writes_snapshot_only() {
        let drafts = manager();
        drafts.tick(&Portfolio::default()).unwrap();
        let saved = drafts.save_as(&ada(), None).unwrap();

        let loaded = drafts.continue_draft(&saved.id).unwrap();
        assert_eq!(loaded, Some(ada()));
        assert_eq!(drafts.load_snapshot(), ada());
        assert_eq!(drafts.list_drafts().len(), 2);

        assert_eq!(drafts.continue_draft("missing").unwrap(), None);
    }

    #[test]
    fn test_delete_draft_by_id() {
        let drafts = manager();
        drafts.tick(&ada()).unwrap();
        let kept = drafts.save_as(&ada(), Some("Copy")).unwrap();

        assert!(drafts.delete_draft(CURRENT_DRAFT_ID).unwrap());
        assert!(!drafts.delete_draft(CURRENT_DRAFT_ID).unwrap());

        let listed = drafts.list_drafts();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, kept.id);
        assert_eq!(listed[0].name, "Copy");
        // deleting from the gallery leaves the active snapshot alone
        assert_eq!(drafts.load_snapshot(), ada());
    }

    #[tokio::test(start_paused = true)]
    async fn test_autosave_loop_ticks_on_interval_and_stops_on_drop() {
        let store = Arc::new(MemoryStore::new());
        let drafts = Arc::new(DraftManager::new(store.clone()));
        let form = Arc::new(FormStore::default());

        let handle = spawn_autosave(drafts.clone(), form.clone(), DEFAULT_AUTOSAVE_INTERVAL);
        form.update(FieldUpdate::Name("Ada Lovelace".to_string()));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(drafts.list_drafts().is_empty());

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(drafts.load_snapshot().name, "Ada Lovelace");

        drop(handle);
        form.update(FieldUpdate::Name("Changed".to_string()));
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(drafts.load_snapshot().name, "Ada Lovelace");
        assert_eq!(drafts.list_drafts().len(), 1);
    }
}
