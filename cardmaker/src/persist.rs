use std::path::PathBuf;

use crate::monster::MonsterRecord;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key of the saved sheet.
pub const SNAPSHOT_KEY: &str = "ou_monster";

pub fn load_snapshot<S: KeyValueStore + ?Sized>(
    store: &S,
) -> Result<Option<MonsterRecord>, StorageError> {
    let Some(json) = store.get(SNAPSHOT_KEY)? else {
        return Ok(None);
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|source| StorageError::Corrupt {
            key: SNAPSHOT_KEY.to_string(),
            source,
        })
}

pub fn save_snapshot<S: KeyValueStore + ?Sized>(
    store: &mut S,
    record: &MonsterRecord,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(record)?;
    store.set(SNAPSHOT_KEY, &json)
}

pub fn clear_snapshot<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StorageError> {
    store.remove(SNAPSHOT_KEY)
}

pub fn default_save_dir() -> PathBuf {
    dirs_next::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardmaker")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn missing_snapshot_is_none() {
        let store = MemoryStore::new();
        assert_eq!(load_snapshot(&store).expect("load"), None);
    }

    #[test]
    fn corrupt_snapshot_is_reported() {
        let mut store = MemoryStore::new();
        store.insert(SNAPSHOT_KEY, "{not json");
        let err = load_snapshot(&store).expect_err("corrupt");
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn save_then_load_returns_record() {
        let mut store = MemoryStore::new();
        let record = MonsterRecord {
            name: "Xaracol".into(),
            defense: Some(14),
            ..Default::default()
        };
        save_snapshot(&mut store, &record).expect("save");
        assert_eq!(load_snapshot(&store).expect("load"), Some(record));

        clear_snapshot(&mut store).expect("clear");
        assert!(!store.contains(SNAPSHOT_KEY));
    }
}
