use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc};
use anyhow::{anyhow, Result};

/// Source of "now". Injected wherever the answer depends on the current day.
pub trait Clock {
    fn now_utc(&self) -> DateTime<Utc>;

    /// The calendar day callers treat as "today". Each implementation picks
    /// the zone: `SystemClock` uses the machine's local zone, `FixedClock`
    /// uses UTC.
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one instant. `today` is the UTC day of that instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_utc(&self) -> DateTime<Utc> {
        (**self).now_utc()
    }

    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Parses the date forms accepted on the command line, relative to `today`.
///
/// `today`/`tod`, `yesterday`/`yes`, `-3d`, `-2w`, or a plain `YYYY-MM-DD`.
pub fn parse_human_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "yesterday" | "yes" => {
            return today.pred_opt().ok_or_else(|| anyhow!("No day before {}", today));
        }
        _ => {}
    }

    if let Some(rest) = input.strip_prefix('-') {
        let invalid = || anyhow!("Invalid relative date: {}", input);
        let (split, unit) = rest.char_indices().next_back().ok_or_else(invalid)?;
        let count: i64 = rest[..split].parse().map_err(|_| invalid())?;
        let offset = match unit.to_ascii_lowercase() {
            'd' => Duration::try_days(count),
            'w' => Duration::try_weeks(count),
            _ => return Err(anyhow!("Unknown unit in relative date: {}", unit)),
        };
        return offset
            .and_then(|offset| today.checked_sub_signed(offset))
            .ok_or_else(invalid);
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| anyhow!("Could not parse date: {}", input))
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(input: &str) -> Result<NaiveDate> {
    let (year, month) = input
        .trim()
        .split_once('-')
        .ok_or_else(|| anyhow!("Invalid month (expected YYYY-MM): {}", input))?;
    let year: i32 = year.parse().map_err(|_| anyhow!("Invalid year: {}", year))?;
    let month: u32 = month.parse().map_err(|_| anyhow!("Invalid month: {}", month))?;
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| anyhow!("Invalid month (expected YYYY-MM): {}", input))
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month `delta` months away from `date`'s month.
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = date.year() * 12 + date.month0() as i32 + delta;
    let year = months.div_euclid(12);
    let month = months.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_else(|| first_of_month(date))
}

/// "March 15, 2024"
pub fn format_for_display(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
