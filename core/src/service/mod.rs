pub mod calendar;
pub mod mood_store;
pub mod stats;
