use chrono::NaiveDate;
use moodlog_core::service::calendar::{month_title, weeks};
use moodlog_core::{format_for_display, CalendarCell, Mood, MoodCollection, MoodEntry, MoodStatistics};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

use crate::theme;

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Mood")]
    mood: String,
    #[tabled(rename = "Note")]
    note: String,
    #[tabled(rename = "ID")]
    id: String,
}

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Mood")]
    mood: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "%")]
    percent: String,
}

pub fn print_entry(entry: &MoodEntry) {
    println!("{}", format_for_display(entry.date.date()));
    println!("  Mood: {} {}", theme::emoji(entry.mood), theme::label(entry.mood));
    if let Some(note) = &entry.note {
        println!("  Note: {}", note);
    }
    println!("  ID:   {}", entry.id);
}

pub fn print_list(collection: &MoodCollection) {
    if collection.is_empty() {
        println!("No entries yet.");
        return;
    }

    let rows: Vec<EntryRow> = collection
        .entries()
        .map(|entry| EntryRow {
            date: entry.date.to_string(),
            mood: format!("{} {}", theme::emoji(entry.mood), theme::label(entry.mood)),
            note: entry.note.clone().unwrap_or_else(|| "-".to_string()),
            id: entry.id.to_string()[..8].to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}

/// Renders one calendar row as text: day numbers with the mood emoji, today in
/// brackets, days outside the month dimmed to a dot.
fn render_week(week: &[CalendarCell]) -> String {
    week.iter()
        .map(|cell| {
            let day = if cell.in_displayed_month {
                cell.date.format("%e").to_string()
            } else {
                " .".to_string()
            };
            let mark = cell.mood.map(theme::emoji).unwrap_or("  ");
            if cell.is_today {
                format!("[{}{}]", day, mark)
            } else {
                format!(" {}{} ", day, mark)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn print_calendar(anchor: NaiveDate, cells: &[CalendarCell]) {
    println!("\n\x1b[1;36m{}\x1b[0m", month_title(anchor));
    println!(" {}", ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"].map(|d| format!("{:<5}", d)).join(" "));
    for week in weeks(cells) {
        println!("{}", render_week(week));
    }
}

pub fn print_stats(stats: &MoodStatistics, most_frequent: Option<Mood>) {
    let rows: Vec<StatsRow> = stats
        .iter()
        .map(|(mood, count)| StatsRow {
            mood: format!("{} {}", theme::emoji(mood), theme::label(mood)),
            count,
            percent: format!("{}%", stats.percentage(mood)),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
    println!("Total entries: {}", stats.total());
    match most_frequent {
        Some(mood) => println!("Most frequent: {} {}", theme::emoji(mood), theme::label(mood)),
        None => println!("Most frequent: -"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodlog_core::build_grid;

    #[test]
    fn test_render_week_marks_today_and_mood() {
        let anchor = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut cells = build_grid(anchor, &MoodCollection::new(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        cells[5].mood = Some(Mood::Great);
        let first_week = render_week(&cells[..7]);
        assert!(first_week.starts_with("  . "));
        assert!(first_week.contains("[ 1😁]"));
    }
}
