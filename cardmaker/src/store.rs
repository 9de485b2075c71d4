//! Record store that mirrors every mutation to storage.

use crate::monster::{EntryList, EntryPatch, MonsterPatch, MonsterRecord};
use crate::persist::{clear_snapshot, load_snapshot, save_snapshot};
use crate::storage::KeyValueStore;

pub struct MonsterStore<S: KeyValueStore> {
    record: MonsterRecord,
    storage: S,
}

impl<S: KeyValueStore> MonsterStore<S> {
    /// Starts from defaults, replaced by the saved snapshot when one loads.
    pub fn open(storage: S) -> Self {
        let record = match load_snapshot(&storage) {
            Ok(Some(record)) => record,
            Ok(None) => MonsterRecord::default(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load saved monster");
                MonsterRecord::default()
            }
        };
        Self { record, storage }
    }

    pub fn record(&self) -> &MonsterRecord {
        &self.record
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn update(&mut self, patch: MonsterPatch) {
        self.record.apply(patch);
        self.persist();
    }

    pub fn add_entry(&mut self, list: EntryList) -> String {
        let id = self.record.add_entry(list);
        self.persist();
        id
    }

    pub fn update_entry(&mut self, list: EntryList, id: &str, patch: EntryPatch) -> bool {
        let found = self.record.update_entry(list, id, patch);
        if found {
            self.persist();
        }
        found
    }

    pub fn remove_entry(&mut self, list: EntryList, id: &str) -> bool {
        let found = self.record.remove_entry(list, id);
        if found {
            self.persist();
        }
        found
    }

    pub fn reset(&mut self) {
        self.record = MonsterRecord::default();
        if let Err(err) = clear_snapshot(&mut self.storage) {
            tracing::warn!(error = %err, "failed to clear saved monster");
        }
    }

    fn persist(&mut self) {
        if let Err(err) = save_snapshot(&mut self.storage, &self.record) {
            tracing::warn!(error = %err, "failed to save monster");
        }
    }
}
