use moodlog_core::service::calendar::{month_title, weeks};
use moodlog_core::{format_for_display, Clock, KeyValueStore};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::theme;
use crate::tui::app::{App, InputMode};

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn draw<S: KeyValueStore, C: Clock>(f: &mut Frame, app: &App<S, C>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let header = Paragraph::new("MOODLOG")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    draw_calendar(f, app, content_chunks[0]);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(9)])
        .split(content_chunks[1]);
    draw_detail(f, app, side_chunks[0]);
    draw_stats(f, app, side_chunks[1]);

    let help = match app.input_mode {
        InputMode::Normal => "hjkl/arrows: Move | [ ]: Month | t: Today | 1-5: Mood | n: Note | d: Delete | R: Reset | q: Quit",
        InputMode::EditingNote => "Enter: Save note | Esc: Cancel",
        InputMode::ConfirmReset => "y: Delete everything | any other key: Cancel",
    };
    let footer_text = match &app.status {
        Some(status) => format!("{}  ·  {}", status, help),
        None => help.to_string(),
    };
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[2]);

    match app.input_mode {
        InputMode::EditingNote => draw_note_input(f, app, size),
        InputMode::ConfirmReset => draw_reset_confirm(f, app, size),
        InputMode::Normal => {}
    }
}

fn draw_calendar<S: KeyValueStore, C: Clock>(f: &mut Frame, app: &App<S, C>, area: Rect) {
    let grid = app.grid();

    let rows: Vec<Row> = weeks(&grid)
        .map(|week| {
            Row::new(week.iter().map(|cell| {
                let mut style = Style::default();
                if !cell.in_displayed_month {
                    style = style.fg(Color::DarkGray);
                } else if let Some(mood) = cell.mood {
                    style = style.fg(theme::color(mood));
                }
                if cell.is_today {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                if cell.date == app.selected {
                    style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
                }
                let mark = cell.mood.map(theme::emoji).unwrap_or("");
                Span::styled(format!("{:>2} {}", cell.date.format("%-d"), mark), style)
            }))
            .height(2)
        })
        .collect();

    let table = Table::new(rows, [Constraint::Ratio(1, 7); 7])
        .header(Row::new(WEEKDAYS).style(Style::default().fg(Color::Yellow)))
        .block(
            Block::default()
                .title(format!(" {} ", month_title(app.selected)))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(table, area);
}

fn draw_detail<S: KeyValueStore, C: Clock>(f: &mut Frame, app: &App<S, C>, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            format_for_display(app.selected),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    match app.selected_entry() {
        Some(entry) => {
            lines.push(Line::from(vec![
                Span::styled("Mood: ", Style::default().fg(Color::Blue)),
                Span::styled(
                    format!("{} {}", theme::emoji(entry.mood), theme::label(entry.mood)),
                    Style::default().fg(theme::color(entry.mood)),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Recorded: ", Style::default().fg(Color::Blue)),
                Span::raw(entry.created_at.format("%Y-%m-%d %H:%M UTC").to_string()),
            ]));
            lines.push(Line::from(""));
            if let Some(note) = &entry.note {
                lines.push(Line::from(Span::styled("Note:", Style::default().fg(Color::Blue))));
                lines.push(Line::from(note.as_str()));
            }
        }
        None => lines.push(Line::from(Span::styled(
            "No mood recorded. Press 1-5.",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let detail = Paragraph::new(lines)
        .block(Block::default().title(" Day ").borders(Borders::ALL).border_type(BorderType::Rounded))
        .wrap(Wrap { trim: true });
    f.render_widget(detail, area);
}

fn draw_stats<S: KeyValueStore, C: Clock>(f: &mut Frame, app: &App<S, C>, area: Rect) {
    let stats = app.statistics();
    let block = Block::default()
        .title(format!(" Stats ({} days) ", stats.total()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 5])
        .split(inner);

    for ((mood, count), row) in stats.iter().zip(rows.iter()) {
        let percent = stats.percentage(mood);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme::color(mood)))
            .percent(percent.min(100) as u16)
            .label(format!("{} {:<7} {:>3} ({}%)", theme::emoji(mood), theme::label(mood), count, percent));
        f.render_widget(gauge, *row);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_note_input<S: KeyValueStore, C: Clock>(f: &mut Frame, app: &App<S, C>, area: Rect) {
    let popup = centered(area, 60, 3);
    f.render_widget(Clear, popup);

    let input = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .title(format!(" Note for {} ", app.selected))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(input, popup);

    let before_cursor: String = app.input.chars().take(app.cursor_position).collect();
    let x = popup.x + 1 + before_cursor.width() as u16;
    f.set_cursor_position(Position::new(x.min(popup.right().saturating_sub(2)), popup.y + 1));
}

fn draw_reset_confirm<S: KeyValueStore, C: Clock>(f: &mut Frame, app: &App<S, C>, area: Rect) {
    let popup = centered(area, 50, 5);
    f.render_widget(Clear, popup);

    let count = app.statistics().total();
    let text = vec![
        Line::from(format!("Delete all {} entries?", count)),
        Line::from(Span::styled("This cannot be undone. (y/N)", Style::default().fg(Color::Red))),
    ];
    let dialog = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .title(" Reset ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(dialog, popup);
}
