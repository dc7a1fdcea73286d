//! The state controller between a UI and durable storage.
//!
//! A [`MoodStore`] owns the in-memory [`MoodCollection`] and a
//! [`MoodRepository`]. Every mutation is applied in memory first and then the
//! full collection is written back. Durable failures are logged and absorbed so
//! the in-memory state stays authoritative for the session.

use chrono::NaiveDate;
use log::{error, info};
use uuid::Uuid;

use crate::date_key::DateKey;
use crate::error::{MoodError, MoodResult};
use crate::model::calendar::CalendarCell;
use crate::model::entry::{MoodCollection, MoodEntry, NoteUpdate};
use crate::model::mood::Mood;
use crate::model::stats::MoodStatistics;
use crate::repository::{KeyValueStore, MoodRepository};
use crate::service::{calendar, stats};
use crate::time::{Clock, SystemClock};

#[derive(Debug, Clone, PartialEq)]
enum StoreState {
    Loading,
    Ready(MoodCollection),
}

pub struct MoodStore<S: KeyValueStore, C: Clock = SystemClock> {
    repo: MoodRepository<S>,
    clock: C,
    state: StoreState,
}

impl<S: KeyValueStore> MoodStore<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> MoodStore<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self {
            repo: MoodRepository::new(store),
            clock,
            state: StoreState::Loading,
        }
    }

    /// Loads the stored snapshot. Calling it again once ready does nothing.
    pub fn initialize(&mut self) {
        if self.is_ready() {
            return;
        }
        let collection = self.repo.load();
        info!("event=store_init status=ready entries={}", collection.len());
        self.state = StoreState::Ready(collection);
    }

    /// Shorthand for `with_clock` followed by `initialize`.
    pub fn open(store: S, clock: C) -> Self {
        let mut mood_store = Self::with_clock(store, clock);
        mood_store.initialize();
        mood_store
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, StoreState::Ready(_))
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn collection(&self) -> MoodResult<&MoodCollection> {
        match &self.state {
            StoreState::Ready(collection) => Ok(collection),
            StoreState::Loading => Err(MoodError::NotReady),
        }
    }

    fn collection_mut(&mut self) -> MoodResult<&mut MoodCollection> {
        match &mut self.state {
            StoreState::Ready(collection) => Ok(collection),
            StoreState::Loading => Err(MoodError::NotReady),
        }
    }

    /// Creates the entry for `date` or updates the existing one in place.
    ///
    /// An update changes only mood and note; the entry keeps its id and
    /// creation time. See [`NoteUpdate`] for how `note` is applied.
    pub fn save_mood(&mut self, date: NaiveDate, mood: Mood, note: impl Into<NoteUpdate>) -> MoodResult<MoodEntry> {
        let key = DateKey::from(date);
        let note = note.into();
        let now = self.clock.now_utc();
        let collection = self.collection_mut()?;

        let saved = match collection.get_mut(&key) {
            Some(entry) => {
                entry.apply(mood, note);
                info!("event=mood_update date={} id={} mood={}", key, entry.id, mood);
                entry.clone()
            }
            None => {
                let entry = MoodEntry::new(key, mood, note, now);
                info!("event=mood_create date={} id={} mood={}", key, entry.id, mood);
                collection.insert(entry.clone());
                entry
            }
        };

        self.persist();
        Ok(saved)
    }

    /// Removes the entry with `id`. An unknown id is a no-op.
    pub fn delete_mood(&mut self, id: &Uuid) -> MoodResult<Option<MoodEntry>> {
        let collection = self.collection_mut()?;
        let removed = match collection.find_key_by_id(id) {
            Some(key) => collection.remove(&key),
            None => None,
        };

        match &removed {
            Some(entry) => {
                info!("event=mood_delete date={} id={}", entry.date, id);
                self.persist();
            }
            None => info!("event=mood_delete status=not_found id={}", id),
        }
        Ok(removed)
    }

    pub fn entry_for_date(&self, date: NaiveDate) -> MoodResult<Option<&MoodEntry>> {
        Ok(self.collection()?.get(&DateKey::from(date)))
    }

    /// Drops every entry and the durable record. Callers confirm with the
    /// user before getting here.
    pub fn reset_all_data(&mut self) -> MoodResult<()> {
        let collection = self.collection_mut()?;
        let dropped = collection.len();
        *collection = MoodCollection::new();

        if let Err(err) = self.repo.clear() {
            error!("event=mood_reset status=persist_failed error={:#}", err);
        }
        info!("event=mood_reset status=ok dropped={}", dropped);
        Ok(())
    }

    pub fn statistics(&self) -> MoodResult<MoodStatistics> {
        Ok(stats::aggregate(self.collection()?))
    }

    pub fn most_frequent(&self) -> MoodResult<Option<Mood>> {
        Ok(stats::most_frequent(self.collection()?))
    }

    pub fn calendar(&self, anchor: NaiveDate) -> MoodResult<Vec<CalendarCell>> {
        Ok(calendar::build_grid_now(anchor, self.collection()?, &self.clock))
    }

    /// Best-effort write of the full collection.
    fn persist(&self) {
        if let StoreState::Ready(collection) = &self.state {
            if let Err(err) = self.repo.save(collection) {
                error!("event=mood_save status=persist_failed entries={} error={:#}", collection.len(), err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MemoryKeyValueStore, STORAGE_KEY};
    use crate::time::FixedClock;
    use anyhow::{anyhow, Result};
    use chrono::{Duration, TimeZone, Utc};
    use std::cell::Cell;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap())
    }

    /// Reads fine, refuses every write.
    #[derive(Default)]
    struct ReadOnlyStore {
        writes: Cell<usize>,
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>> { Ok(None) }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            self.writes.set(self.writes.get() + 1);
            Err(anyhow!("read-only"))
        }
        fn remove(&self, _key: &str) -> Result<()> { Err(anyhow!("read-only")) }
    }

    #[test]
    fn test_reads_before_initialize_are_not_ready() {
        let mut store = MoodStore::with_clock(MemoryKeyValueStore::new(), clock());
        assert!(!store.is_ready());
        assert_eq!(store.collection().err(), Some(MoodError::NotReady));
        assert_eq!(store.entry_for_date(d(2024, 3, 15)).err(), Some(MoodError::NotReady));
        assert_eq!(store.save_mood(d(2024, 3, 15), Mood::Good, None::<String>).err(), Some(MoodError::NotReady));
        assert_eq!(store.reset_all_data().err(), Some(MoodError::NotReady));

        store.initialize();
        assert!(store.is_ready());
        assert!(store.collection().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_lookup() {
        let mut store = MoodStore::open(MemoryKeyValueStore::new(), clock());
        let saved = store.save_mood(d(2024, 3, 15), Mood::Good, Some("ok")).unwrap();
        assert_eq!(saved.created_at, clock().now);

        let found = store.entry_for_date(d(2024, 3, 15)).unwrap().unwrap();
        assert_eq!(found.mood, Mood::Good);
        assert_eq!(found.note.as_deref(), Some("ok"));
        assert_eq!(found.date.to_string(), "2024-03-15");
        assert!(store.entry_for_date(d(2024, 3, 16)).unwrap().is_none());
    }

    #[test]
    fn test_second_save_preserves_id_and_created_at() {
        let mem = MemoryKeyValueStore::new();
        let mut store = MoodStore::open(&mem, clock());
        let first = store.save_mood(d(2024, 3, 15), Mood::Good, Some("ok")).unwrap();

        store.clock = FixedClock::new(clock().now + Duration::hours(5));
        let second = store.save_mood(d(2024, 3, 15), Mood::Great, None::<String>).unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.mood, Mood::Great);
        assert_eq!(second.note, None);
        assert_eq!(store.collection().unwrap().len(), 1);
    }

    #[test]
    fn test_keep_note_on_update() {
        let mut store = MoodStore::open(MemoryKeyValueStore::new(), clock());
        store.save_mood(d(2024, 3, 15), Mood::Good, Some("ok")).unwrap();
        let updated = store.save_mood(d(2024, 3, 15), Mood::Bad, NoteUpdate::Keep).unwrap();
        assert_eq!(updated.note.as_deref(), Some("ok"));
    }

    #[test]
    fn test_every_mutation_persists_full_collection() {
        let mem = MemoryKeyValueStore::new();
        let mut store = MoodStore::open(&mem, clock());
        store.save_mood(d(2024, 3, 14), Mood::Bad, None::<String>).unwrap();
        store.save_mood(d(2024, 3, 15), Mood::Good, None::<String>).unwrap();

        let reloaded = MoodRepository::new(&mem).load();
        assert_eq!(&reloaded, store.collection().unwrap());
        assert_eq!(reloaded.len(), 2);
    }

    #[test]
    fn test_delete_existing_and_unknown() {
        let mem = MemoryKeyValueStore::new();
        let mut store = MoodStore::open(&mem, clock());
        let entry = store.save_mood(d(2024, 3, 15), Mood::Good, None::<String>).unwrap();
        store.save_mood(d(2024, 3, 16), Mood::Neutral, None::<String>).unwrap();

        let before = store.collection().unwrap().clone();
        assert_eq!(store.delete_mood(&Uuid::new_v4()).unwrap(), None);
        assert_eq!(store.collection().unwrap(), &before);

        let removed = store.delete_mood(&entry.id).unwrap().unwrap();
        assert_eq!(removed.id, entry.id);
        assert!(store.entry_for_date(d(2024, 3, 15)).unwrap().is_none());
        assert_eq!(MoodRepository::new(&mem).load().len(), 1);
    }

    #[test]
    fn test_reset_clears_memory_and_record() {
        let mem = MemoryKeyValueStore::new();
        let mut store = MoodStore::open(&mem, clock());
        for day in 1..=3 {
            store.save_mood(d(2024, 3, day), Mood::Good, None::<String>).unwrap();
        }
        assert!(mem.contains(STORAGE_KEY));

        store.reset_all_data().unwrap();
        assert!(store.collection().unwrap().is_empty());
        assert!(!mem.contains(STORAGE_KEY));
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let backing = ReadOnlyStore::default();
        let mut store = MoodStore::open(&backing, clock());
        let saved = store.save_mood(d(2024, 3, 15), Mood::Awful, Some("rough")).unwrap();
        assert_eq!(backing.writes.get(), 1);
        assert_eq!(store.entry_for_date(d(2024, 3, 15)).unwrap(), Some(&saved));

        store.reset_all_data().unwrap();
        assert!(store.collection().unwrap().is_empty());
    }

    #[test]
    fn test_initialize_loads_existing_data() {
        let mem = MemoryKeyValueStore::new();
        {
            let mut store = MoodStore::open(&mem, clock());
            store.save_mood(d(2024, 3, 15), Mood::Great, Some("sunny")).unwrap();
        }
        let reopened = MoodStore::open(&mem, clock());
        let entry = reopened.entry_for_date(d(2024, 3, 15)).unwrap().unwrap();
        assert_eq!(entry.note.as_deref(), Some("sunny"));
    }

    #[test]
    fn test_derived_views() {
        let mut store = MoodStore::open(MemoryKeyValueStore::new(), clock());
        store.save_mood(d(2024, 3, 15), Mood::Good, None::<String>).unwrap();
        store.save_mood(d(2024, 3, 16), Mood::Good, None::<String>).unwrap();
        store.save_mood(d(2024, 3, 17), Mood::Bad, None::<String>).unwrap();

        let stats = store.statistics().unwrap();
        assert_eq!(stats.count(Mood::Good), 2);
        assert_eq!(stats.percentage(Mood::Bad), 33);
        assert_eq!(store.most_frequent().unwrap(), Some(Mood::Good));

        let grid = store.calendar(d(2024, 3, 1)).unwrap();
        let today = grid.iter().find(|c| c.is_today).unwrap();
        assert_eq!(today.date, d(2024, 3, 15));
        assert_eq!(today.mood, Some(Mood::Good));
    }
}
