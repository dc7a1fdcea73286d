pub mod app;
pub mod ui;

use std::io;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use moodlog_core::{Clock, KeyValueStore, MoodStore};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::theme;
use crate::tui::app::{App, InputMode};

pub fn run<S: KeyValueStore, C: Clock>(store: MoodStore<S, C>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("event=tui_exit status=failed error={}", err);
        println!("{:?}", err);
    }

    Ok(())
}

fn run_app<B: Backend, S: KeyValueStore, C: Clock>(terminal: &mut Terminal<B>, app: &mut App<S, C>) -> io::Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(std::time::Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Left | KeyCode::Char('h') => app.move_days(-1),
                KeyCode::Right | KeyCode::Char('l') => app.move_days(1),
                KeyCode::Up | KeyCode::Char('k') => app.move_days(-7),
                KeyCode::Down | KeyCode::Char('j') => app.move_days(7),
                KeyCode::Char('[') => app.move_months(-1),
                KeyCode::Char(']') => app.move_months(1),
                KeyCode::Char('t') => app.go_today(),
                KeyCode::Char('n') | KeyCode::Enter => app.enter_note_mode(),
                KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                KeyCode::Char('R') => app.enter_reset_confirm(),
                KeyCode::Char(c) => {
                    if let Some(mood) = theme::mood_for_digit(c) {
                        app.set_mood(mood);
                    }
                }
                _ => {}
            },
            InputMode::EditingNote => match key.code {
                KeyCode::Enter => app.submit_note(),
                KeyCode::Esc => app.exit_input_mode(),
                KeyCode::Char(c) => app.input_char(c),
                KeyCode::Backspace => app.delete_char(),
                KeyCode::Left => app.move_cursor_left(),
                KeyCode::Right => app.move_cursor_right(),
                _ => {}
            },
            InputMode::ConfirmReset => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_reset(),
                _ => app.exit_input_mode(),
            },
        }
    }
}
