pub mod calendar;
pub mod entry;
pub mod mood;
pub mod stats;
