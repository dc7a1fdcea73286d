use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date_key::DateKey;
use crate::error::{MoodError, MoodResult};
use crate::model::mood::Mood;

/// How a save treats the note already stored on an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteUpdate {
    Keep,
    Clear,
    Set(String),
}

impl NoteUpdate {
    fn resolve(self, previous: Option<String>) -> Option<String> {
        match self {
            NoteUpdate::Keep => previous,
            NoteUpdate::Clear => None,
            NoteUpdate::Set(text) => Some(text),
        }
    }
}

/// `Some(text)` sets the note (blank text clears it); `None` clears it.
impl From<Option<String>> for NoteUpdate {
    fn from(note: Option<String>) -> Self {
        match note {
            Some(text) if !text.trim().is_empty() => NoteUpdate::Set(text.trim().to_string()),
            _ => NoteUpdate::Clear,
        }
    }
}

impl From<Option<&str>> for NoteUpdate {
    fn from(note: Option<&str>) -> Self {
        NoteUpdate::from(note.map(str::to_string))
    }
}

impl From<&str> for NoteUpdate {
    fn from(note: &str) -> Self {
        NoteUpdate::from(Some(note.to_string()))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: Uuid,
    pub date: DateKey,
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MoodEntry {
    pub fn new(date: DateKey, mood: Mood, note: impl Into<NoteUpdate>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            mood,
            note: note.into().resolve(None),
            created_at,
        }
    }

    /// Changes mood and note. `id`, `date` and `created_at` stay as they are.
    pub fn apply(&mut self, mood: Mood, note: impl Into<NoteUpdate>) {
        self.mood = mood;
        self.note = note.into().resolve(self.note.take());
    }
}

/// All entries, at most one per date key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct MoodCollection {
    entries: BTreeMap<DateKey, MoodEntry>,
}

impl MoodCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &DateKey) -> Option<&MoodEntry> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &DateKey) -> Option<&mut MoodEntry> {
        self.entries.get_mut(key)
    }

    /// Inserts under the entry's own date, returning any entry it displaced.
    pub fn insert(&mut self, entry: MoodEntry) -> Option<MoodEntry> {
        self.entries.insert(entry.date, entry)
    }

    pub fn remove(&mut self, key: &DateKey) -> Option<MoodEntry> {
        self.entries.remove(key)
    }

    /// Ids are not indexed; this walks every entry.
    pub fn find_key_by_id(&self, id: &Uuid) -> Option<DateKey> {
        self.entries
            .iter()
            .find(|(_, entry)| entry.id == *id)
            .map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending date order.
    pub fn entries(&self) -> impl Iterator<Item = &MoodEntry> {
        self.entries.values()
    }

    /// Checks that every entry is stored under its own date.
    pub fn validate(&self) -> MoodResult<()> {
        for (key, entry) in &self.entries {
            if entry.date != *key {
                return Err(MoodError::Corrupted(format!(
                    "entry {} is dated {} but stored under {}",
                    entry.id, entry.date, key
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<MoodEntry> for MoodCollection {
    fn from_iter<I: IntoIterator<Item = MoodEntry>>(iter: I) -> Self {
        let mut collection = MoodCollection::new();
        for entry in iter {
            collection.insert(entry);
        }
        collection
    }
}
