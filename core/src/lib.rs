pub mod config;
pub mod date_key;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use config::Config;
pub use date_key::DateKey;
pub use error::{MoodError, MoodResult};
pub use input::{expand_key, parse_mood};
pub use model::calendar::CalendarCell;
pub use model::entry::{MoodCollection, MoodEntry, NoteUpdate};
pub use model::mood::Mood;
pub use model::stats::{percentage, MoodStatistics};
pub use repository::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, MoodRepository};
pub use service::calendar::{build_grid, build_grid_now};
pub use service::mood_store::MoodStore;
pub use service::stats::{aggregate, most_frequent};
pub use time::{format_for_display, parse_human_date, parse_month, shift_month, Clock, FixedClock, SystemClock};
