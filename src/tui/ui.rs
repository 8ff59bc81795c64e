use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use super::app::{App, InputMode};
use crate::board::ListKind;

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),     // Current tasks
            Constraint::Length(10), // History
            Constraint::Length(3),  // Help / status
        ].as_ref())
        .split(f.area());

    let active_rows: Vec<Row> = app
        .board
        .active_tasks()
        .iter()
        .map(|t| {
            let style = if t.priority >= 8 {
                Style::default().fg(Color::Red)
            } else if t.priority >= 4 {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Green)
            };
            Row::new(vec![Cell::from(t.active_line())]).style(style)
        })
        .collect();

    let history_rows: Vec<Row> = app
        .board
        .completed_tasks()
        .iter()
        .map(|t| {
            Row::new(vec![Cell::from(t.history_line())]).style(Style::default().fg(Color::Gray))
        })
        .collect();

    let active = task_table(active_rows, "📌 Current tasks", app.focus == ListKind::Active);
    f.render_stateful_widget(active, chunks[0], &mut app.active_state);

    let history = task_table(history_rows, "📖 History", app.focus == ListKind::Completed);
    f.render_stateful_widget(history, chunks[1], &mut app.completed_state);

    let help = Paragraph::new(help_text(app))
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[2]);

    // Render Input Box if needed
    let title = match app.input_mode {
        InputMode::Normal => return,
        InputMode::Adding => match app.add_state.step {
            0 => "Add Task: Enter Title",
            1 => "Add Task: Enter Priority 0-10 (default 0)",
            2 => "Add Task: Enter Soft Deadline YYYY-MM-DD HH:MM (default now)",
            _ => "Add Task: Enter Hard Deadline YYYY-MM-DD HH:MM (default now)",
        },
        InputMode::Priority => "Set Priority (0-10)",
        InputMode::Import => "Import Tasks: Enter JSON File Path",
    };

    let area = centered_rect(60, 3, f.area()); // Fixed height of 3 (border + 1 line)
    f.render_widget(Clear, area);

    let input = Paragraph::new(app.input_buffer.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(input, area);
}

const ACTIVE_HINTS: &str = "q: Quit | a: Add | Space: Done | d: Del | +/-: Priority \
                            | p: Set Priority | i: Import | Tab: History";
const HISTORY_HINTS: &str = "q: Quit | d: Del | i: Import | Tab: Current";

/// Text of the bottom line: the last status message if any, otherwise key hints.
pub fn help_text(app: &App) -> String {
    if let Some(status) = &app.status {
        return status.clone();
    }
    let hints = match app.input_mode {
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
        InputMode::Priority | InputMode::Import => "Enter: Confirm | Esc: Cancel",
        InputMode::Normal => match app.focus {
            ListKind::Active => ACTIVE_HINTS,
            ListKind::Completed => HISTORY_HINTS,
        },
    };
    hints.to_string()
}

fn task_table<'a>(rows: Vec<Row<'a>>, title: &'a str, focused: bool) -> Table<'a> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let highlight = if focused {
        Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray)
    } else {
        Style::default()
    };
    Table::new(rows, [Constraint::Min(20)])
        .block(Block::default().borders(Borders::ALL).border_style(border).title(title))
        .row_highlight_style(highlight)
        .highlight_symbol(">> ")
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let pad = r.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(pad),
            Constraint::Length(height),
            Constraint::Length(pad),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
