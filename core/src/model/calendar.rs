use chrono::NaiveDate;
use serde::Serialize;

use crate::model::mood::Mood;

/// One day slot of the month grid. Derived on demand, never stored.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_displayed_month: bool,
    pub is_today: bool,
    pub mood: Option<Mood>,
}
