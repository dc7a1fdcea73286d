//! Persistence gateway: the whole collection as one JSON record.

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::error::MoodError;
use crate::model::entry::MoodCollection;
use crate::repository::traits::KeyValueStore;

pub const STORAGE_KEY: &str = "moodData";

pub struct MoodRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> MoodRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the stored snapshot. Never fails: a missing, unreadable or
    /// malformed record loads as an empty collection.
    pub fn load(&self) -> MoodCollection {
        let raw = match self.store.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=mood_load status=empty key={}", STORAGE_KEY);
                return MoodCollection::new();
            }
            Err(err) => {
                warn!("event=mood_load status=unreadable key={} error={:#}", STORAGE_KEY, err);
                return MoodCollection::new();
            }
        };

        match parse_snapshot(&raw) {
            Ok(collection) => {
                debug!("event=mood_load status=ok entries={}", collection.len());
                collection
            }
            Err(err) => {
                warn!("event=mood_load status=corrupted key={} error={}", STORAGE_KEY, err);
                MoodCollection::new()
            }
        }
    }

    /// Overwrites the snapshot with the full collection in a single write.
    pub fn save(&self, collection: &MoodCollection) -> Result<()> {
        let content = serde_json::to_string(collection).context("Could not serialize mood data")?;
        self.store.set(STORAGE_KEY, &content)?;
        debug!("event=mood_save status=ok entries={}", collection.len());
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(STORAGE_KEY)?;
        debug!("event=mood_clear status=ok key={}", STORAGE_KEY);
        Ok(())
    }
}

/// Parses and schema-checks a stored snapshot.
fn parse_snapshot(raw: &str) -> Result<MoodCollection, MoodError> {
    let collection: MoodCollection =
        serde_json::from_str(raw).map_err(|err| MoodError::Corrupted(err.to_string()))?;
    collection.validate()?;
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_key::DateKey;
    use crate::model::entry::MoodEntry;
    use crate::model::mood::Mood;
    use crate::repository::memory::MemoryKeyValueStore;
    use anyhow::anyhow;
    use chrono::Utc;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> { Err(anyhow!("disk on fire")) }
        fn set(&self, _key: &str, _value: &str) -> Result<()> { Err(anyhow!("disk on fire")) }
        fn remove(&self, _key: &str) -> Result<()> { Err(anyhow!("disk on fire")) }
    }

    fn sample() -> MoodCollection {
        let key: DateKey = "2024-03-15".parse().unwrap();
        let other: DateKey = "2024-03-16".parse().unwrap();
        vec![
            MoodEntry::new(key, Mood::Good, Some("ok"), Utc::now()),
            MoodEntry::new(other, Mood::Awful, None::<String>, Utc::now()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_load_without_record_is_empty() {
        let repo = MoodRepository::new(MemoryKeyValueStore::new());
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_save_then_load_returns_same_collection() {
        let repo = MoodRepository::new(MemoryKeyValueStore::new());
        let collection = sample();
        repo.save(&collection).unwrap();
        assert_eq!(repo.load(), collection);

        repo.save(&MoodCollection::new()).unwrap();
        assert_eq!(repo.load(), MoodCollection::new());
    }

    #[test]
    fn test_clear_removes_record() {
        let repo = MoodRepository::new(MemoryKeyValueStore::new());
        repo.save(&sample()).unwrap();
        repo.clear().unwrap();
        assert!(!repo.store().contains(STORAGE_KEY));
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_load_treats_garbage_as_empty() {
        let store = MemoryKeyValueStore::new();
        let repo = MoodRepository::new(&store);
        for raw in [
            "not json",
            "[]",
            r#"{"2024-3-1": {"id": "00000000-0000-0000-0000-000000000000", "date": "2024-3-1", "mood": "good", "createdAt": "2024-03-01T00:00:00Z"}}"#,
            r#"{"2024-03-01": {"id": "00000000-0000-0000-0000-000000000000", "date": "2024-03-01", "mood": "ecstatic", "createdAt": "2024-03-01T00:00:00Z"}}"#,
            r#"{"2024-03-02": {"id": "00000000-0000-0000-0000-000000000000", "date": "2024-03-01", "mood": "good", "createdAt": "2024-03-01T00:00:00Z"}}"#,
        ] {
            store.set(STORAGE_KEY, raw).unwrap();
            assert!(repo.load().is_empty(), "expected empty load for {}", raw);
        }
    }

    #[test]
    fn test_load_accepts_entry_without_note() {
        let store = MemoryKeyValueStore::new();
        store
            .set(
                STORAGE_KEY,
                r#"{"2024-03-01": {"id": "00000000-0000-0000-0000-000000000000", "date": "2024-03-01", "mood": "bad", "createdAt": "2024-03-01T09:00:00.000Z"}}"#,
            )
            .unwrap();
        let collection = MoodRepository::new(&store).load();
        let entry = collection.get(&"2024-03-01".parse().unwrap()).unwrap();
        assert_eq!(entry.mood, Mood::Bad);
        assert_eq!(entry.note, None);
    }

    #[test]
    fn test_unreadable_store_loads_empty_and_save_reports() {
        let repo = MoodRepository::new(BrokenStore);
        assert!(repo.load().is_empty());
        assert!(repo.save(&sample()).is_err());
        assert!(repo.clear().is_err());
    }
}
