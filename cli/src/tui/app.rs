use chrono::{Datelike, Duration, NaiveDate};
use log::warn;
use moodlog_core::{shift_month, CalendarCell, Clock, KeyValueStore, Mood, MoodEntry, MoodStatistics, MoodStore, NoteUpdate};

use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditingNote,
    ConfirmReset,
}

pub struct App<S: KeyValueStore, C: Clock> {
    pub store: MoodStore<S, C>,
    pub selected: NaiveDate,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub status: Option<String>,
}

impl<S: KeyValueStore, C: Clock> App<S, C> {
    pub fn new(mut store: MoodStore<S, C>) -> Self {
        store.initialize();
        let selected = store.clock().today();
        App {
            store,
            selected,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            status: None,
        }
    }

    pub fn grid(&self) -> Vec<CalendarCell> {
        self.store.calendar(self.selected).unwrap_or_default()
    }

    pub fn selected_entry(&self) -> Option<&MoodEntry> {
        self.store.entry_for_date(self.selected).ok().flatten()
    }

    pub fn statistics(&self) -> MoodStatistics {
        self.store.statistics().unwrap_or_default()
    }

    pub fn move_days(&mut self, days: i64) {
        self.selected += Duration::days(days);
    }

    /// Jumps by whole months, clamping the day to the target month's length.
    pub fn move_months(&mut self, delta: i32) {
        let target = shift_month(self.selected, delta);
        let day = self.selected.day();
        self.selected = (0..4)
            .find_map(|back| target.with_day(day - back))
            .unwrap_or(target);
    }

    pub fn go_today(&mut self) {
        self.selected = self.store.clock().today();
    }

    pub fn set_mood(&mut self, mood: Mood) {
        // Picking a mood leaves the day's note alone; notes are edited with `n`.
        match self.store.save_mood(self.selected, mood, NoteUpdate::Keep) {
            Ok(entry) => self.status = Some(format!("{} saved for {}", theme::label(entry.mood), entry.date)),
            Err(err) => self.report(err),
        }
    }

    pub fn delete_selected(&mut self) {
        let id = match self.selected_entry() {
            Some(entry) => entry.id,
            None => {
                self.status = Some("Nothing to delete".to_string());
                return;
            }
        };
        match self.store.delete_mood(&id) {
            Ok(_) => self.status = Some(format!("Deleted entry for {}", self.selected)),
            Err(err) => self.report(err),
        }
    }

    pub fn enter_note_mode(&mut self) {
        let Some(note) = self.selected_entry().map(|e| e.note.clone()) else {
            self.status = Some("Pick a mood (1-5) before adding a note".to_string());
            return;
        };
        self.input = note.unwrap_or_default();
        self.cursor_position = self.input.chars().count();
        self.input_mode = InputMode::EditingNote;
    }

    pub fn enter_reset_confirm(&mut self) {
        self.input_mode = InputMode::ConfirmReset;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
        self.cursor_position = 0;
    }

    pub fn confirm_reset(&mut self) {
        match self.store.reset_all_data() {
            Ok(()) => self.status = Some("All mood data deleted".to_string()),
            Err(err) => self.report(err),
        }
        self.exit_input_mode();
    }

    pub fn submit_note(&mut self) {
        if let Some(mood) = self.selected_entry().map(|e| e.mood) {
            let note = NoteUpdate::from(Some(self.input.clone()));
            match self.store.save_mood(self.selected, mood, note) {
                Ok(_) => self.status = Some("Note saved".to_string()),
                Err(err) => self.report(err),
            }
        }
        self.exit_input_mode();
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.byte_index(self.cursor_position);
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index = self.byte_index(self.cursor_position - 1);
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.input.chars().take(chars).map(|c| c.len_utf8()).sum()
    }

    fn report(&mut self, err: impl std::fmt::Display) {
        warn!("event=tui_action status=failed error={}", err);
        self.status = Some(format!("Error: {}", err));
    }
}
