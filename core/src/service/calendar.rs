use chrono::{Datelike, Duration, NaiveDate};

use crate::date_key::DateKey;
use crate::model::calendar::CalendarCell;
use crate::model::entry::MoodCollection;
use crate::time::{first_of_month, Clock};

pub const DAYS_PER_WEEK: usize = 7;
pub const GRID_WEEKS: usize = 6;
pub const GRID_CELLS: usize = DAYS_PER_WEEK * GRID_WEEKS;

/// Builds the six-week grid for `anchor`'s month.
///
/// The grid starts on the Sunday on or before the 1st and runs for 42
/// consecutive days, so every month fits with leading and trailing days from
/// its neighbours.
pub fn build_grid(anchor: NaiveDate, collection: &MoodCollection, today: NaiveDate) -> Vec<CalendarCell> {
    let month_start = first_of_month(anchor);
    let lead = month_start.weekday().num_days_from_sunday() as i64;
    let grid_start = month_start - Duration::days(lead);

    grid_start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| CalendarCell {
            date,
            in_displayed_month: date.year() == month_start.year() && date.month() == month_start.month(),
            is_today: date == today,
            mood: collection.get(&DateKey::from(date)).map(|entry| entry.mood),
        })
        .collect()
}

pub fn build_grid_now<C: Clock>(anchor: NaiveDate, collection: &MoodCollection, clock: &C) -> Vec<CalendarCell> {
    build_grid(anchor, collection, clock.today())
}

/// Splits a grid into rows of seven, Sunday first.
pub fn weeks(cells: &[CalendarCell]) -> impl Iterator<Item = &[CalendarCell]> {
    cells.chunks(DAYS_PER_WEEK)
}

/// "March 2024"
pub fn month_title(anchor: NaiveDate) -> String {
    anchor.format("%B %Y").to_string()
}
