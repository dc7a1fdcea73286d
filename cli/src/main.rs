mod logging;
mod report;
mod theme;
mod tui;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use moodlog_core::{
    parse_human_date, parse_month, parse_mood, Clock, Config, FileKeyValueStore, MoodStore, NoteUpdate,
    SystemClock,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "moodlog")]
#[command(about = "A daily mood journal for the terminal", long_about = None)]
struct Cli {
    /// Directory holding mood data and logs (default: ~/.moodlog, or $MOODLOG_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level written to <data-dir>/logs (default: info, or $MOODLOG_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Record the mood for a day (usage: set today good --note "long walk")
    Set {
        /// today, yesterday, -3d, -1w or YYYY-MM-DD
        date: String,
        /// great, good, neutral, bad, awful (unique prefixes work)
        mood: String,
        /// Note for the day; replaces any previous note
        #[arg(long, conflicts_with = "keep_note")]
        note: Option<String>,
        /// Leave an existing note untouched
        #[arg(long)]
        keep_note: bool,
    },
    /// Show the entry for a day
    Show {
        date: String,
    },
    /// Delete an entry by id or by date
    Delete {
        target: String,
    },
    /// List all entries
    List,
    /// Print a month calendar
    Calendar {
        /// YYYY-MM (default: this month)
        #[arg(long)]
        month: Option<String>,
    },
    /// Show mood statistics
    Stats,
    /// Delete all mood data
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Open the Terminal User Interface
    Tui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.data_dir, cli.log_level)?;
    let _logger = logging::init_logging(&config.log_level, &config.log_dir())?;

    let kv = FileKeyValueStore::new(Some(config.data_dir.clone()))?;
    let mut store = MoodStore::open(kv, SystemClock);
    let today = store.clock().today();

    match cli.command {
        Some(Commands::Set { date, mood, note, keep_note }) => {
            let date = parse_human_date(&date, today)?;
            let mood = parse_mood(&mood)?;
            let note = if keep_note { NoteUpdate::Keep } else { NoteUpdate::from(note) };
            let entry = store.save_mood(date, mood, note)?;
            println!("Saved {} for {}", theme::label(entry.mood), entry.date);
            report::print_entry(&entry);
        }
        Some(Commands::Show { date }) => {
            let date = parse_human_date(&date, today)?;
            match store.entry_for_date(date)? {
                Some(entry) => report::print_entry(entry),
                None => println!("No entry for {}.", date),
            }
        }
        Some(Commands::Delete { target }) => {
            let id = match Uuid::parse_str(&target) {
                Ok(id) => id,
                Err(_) => {
                    let date = parse_human_date(&target, today)?;
                    store
                        .entry_for_date(date)?
                        .map(|e| e.id)
                        .ok_or_else(|| anyhow!("No entry for {}", date))?
                }
            };
            match store.delete_mood(&id)? {
                Some(entry) => println!("Deleted entry for {}.", entry.date),
                None => println!("No entry with id {}.", id),
            }
        }
        Some(Commands::List) => {
            report::print_list(store.collection()?);
        }
        Some(Commands::Calendar { month }) => {
            let anchor = match month {
                Some(m) => parse_month(&m)?,
                None => today,
            };
            report::print_calendar(anchor, &store.calendar(anchor)?);
        }
        Some(Commands::Stats) => {
            report::print_stats(&store.statistics()?, store.most_frequent()?);
        }
        Some(Commands::Reset { yes }) => {
            let count = store.collection()?.len();
            if !yes && !confirm(&format!("Delete all {} entries? This cannot be undone.", count))? {
                println!("Reset cancelled.");
                return Ok(());
            }
            store.reset_all_data()?;
            println!("All mood data deleted.");
        }
        Some(Commands::Tui) | None => {
            tui::run(store)?;
        }
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} Type 'yes' to confirm: ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("yes"))
}
