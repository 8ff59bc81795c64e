use std::path::PathBuf;

use ratatui::widgets::TableState;

use crate::board::{ListKind, TaskBoard};
use crate::error::Result;
use crate::import::load_import_file;
use crate::models::now_timestamp;

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Adding,
    Priority,
    Import,
}

/// State for the multi-step "Add Task" wizard.
#[derive(Default)]
pub struct AddState {
    pub title: String,
    pub priority: i64,
    pub soft: String,
    pub step: usize, // 0: Title, 1: Priority, 2: Soft, 3: Hard
}

pub struct App {
    pub board: TaskBoard,
    pub focus: ListKind,
    pub active_state: TableState,
    pub completed_state: TableState,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub add_state: AddState,
    /// Result of the last action, shown in the status line.
    pub status: Option<String>,
}

impl App {
    /// Creates a new App around a loaded board.
    pub fn new(board: TaskBoard) -> App {
        let mut app = App {
            board,
            focus: ListKind::Active,
            active_state: TableState::default(),
            completed_state: TableState::default(),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            add_state: AddState::default(),
            status: None,
        };
        app.clamp_selection();
        app
    }

    fn state_mut(&mut self, list: ListKind) -> &mut TableState {
        match list {
            ListKind::Active => &mut self.active_state,
            ListKind::Completed => &mut self.completed_state,
        }
    }

    /// Selected row of the focused pane.
    pub fn selected(&self) -> Option<usize> {
        match self.focus {
            ListKind::Active => self.active_state.selected(),
            ListKind::Completed => self.completed_state.selected(),
        }
    }

    /// Selects the next row in the focused pane.
    pub fn next(&mut self) {
        let len = self.board.tasks(self.focus).len();
        if len == 0 {
            return;
        }
        let i = match self.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state_mut(self.focus).select(Some(i));
    }

    /// Selects the previous row in the focused pane.
    pub fn previous(&mut self) {
        let len = self.board.tasks(self.focus).len();
        if len == 0 {
            return;
        }
        let i = match self.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state_mut(self.focus).select(Some(i));
    }

    /// Switches focus between the current-task and history panes.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            ListKind::Active => ListKind::Completed,
            ListKind::Completed => ListKind::Active,
        };
    }

    /// Marks the selected active task as complete.
    pub fn complete_selected(&mut self) {
        if self.focus != ListKind::Active {
            return;
        }
        if let Some(i) = self.selected() {
            let res = self.board.complete_at(i);
            self.report(res, |done| done.then(|| "Task completed.".to_string()));
        }
    }

    /// Deletes the selected task in the focused pane.
    pub fn delete_selected(&mut self) {
        if let Some(i) = self.selected() {
            let res = self.board.delete_at(self.focus, i);
            self.report(res, |removed| removed.then(|| "Task deleted.".to_string()));
        }
    }

    /// Raises or lowers the selected active task's priority by one.
    pub fn bump_priority(&mut self, delta: i64) {
        if self.focus != ListKind::Active {
            return;
        }
        if let Some(i) = self.selected() {
            let res = self.board.bump_priority_at(i, delta);
            self.report(res, |_| None);
        }
    }

    /// Initiates the "Add Task" wizard.
    pub fn start_add(&mut self) {
        self.input_mode = InputMode::Adding;
        self.add_state = AddState::default();
        self.input_buffer.clear();
    }

    /// Prompts for an explicit priority for the selected active task.
    pub fn start_priority(&mut self) {
        if self.focus == ListKind::Active && self.selected().is_some() {
            self.input_mode = InputMode::Priority;
            self.input_buffer.clear();
        }
    }

    /// Prompts for an import file path.
    pub fn start_import(&mut self) {
        self.input_mode = InputMode::Import;
        self.input_buffer.clear();
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    /// Handles Enter based on the current mode.
    pub fn handle_input(&mut self) {
        self.status = None;
        match self.input_mode {
            InputMode::Adding => self.handle_adding_input(),
            InputMode::Priority => self.handle_priority_input(),
            InputMode::Import => self.handle_import_input(),
            InputMode::Normal => {}
        }
    }

    fn handle_adding_input(&mut self) {
        let input = self.input_buffer.trim().to_string();
        match self.add_state.step {
            0 => {
                // Title
                if !input.is_empty() {
                    self.add_state.title = input;
                    self.add_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            1 => {
                // Priority, empty means 0
                let parsed = if input.is_empty() { Ok(0) } else { input.parse::<i64>() };
                match parsed {
                    Ok(p) => {
                        self.add_state.priority = p;
                        self.add_state.step += 1;
                        self.input_buffer.clear();
                    }
                    Err(_) => self.status = Some(format!("'{}' is not a number.", input)),
                }
            }
            2 => {
                // Soft deadline
                self.add_state.soft = if input.is_empty() { now_timestamp() } else { input };
                self.add_state.step += 1;
                self.input_buffer.clear();
            }
            3 => {
                // Hard deadline, finish
                let hard = if input.is_empty() { now_timestamp() } else { input };
                let res = self.board.add(
                    &self.add_state.title,
                    self.add_state.priority,
                    &self.add_state.soft,
                    &hard,
                );
                self.cancel_input();
                self.report(res, |id| Some(format!("Task added (id = {}).", id)));
            }
            _ => {}
        }
    }

    fn handle_priority_input(&mut self) {
        let input = self.input_buffer.trim().to_string();
        let Ok(priority) = input.parse::<i64>() else {
            self.status = Some(format!("'{}' is not a number.", input));
            return;
        };
        self.cancel_input();
        if let Some(i) = self.active_state.selected() {
            let res = self.board.set_priority_at(i, priority);
            self.report(res, |_| None);
        }
    }

    fn handle_import_input(&mut self) {
        let path = PathBuf::from(self.input_buffer.trim());
        self.cancel_input();
        let res = load_import_file(&path).and_then(|tasks| self.board.bulk_add(&tasks));
        self.report(res, |report| Some(report.to_string()));
    }

    fn report<T>(&mut self, res: Result<T>, message: impl FnOnce(T) -> Option<String>) {
        self.status = match res {
            Ok(value) => message(value),
            Err(e) => Some(format!("Error: {}", e)),
        };
        self.clamp_selection();
    }

    /// Keeps each pane's selection within its snapshot after a reload.
    fn clamp_selection(&mut self) {
        for list in [ListKind::Active, ListKind::Completed] {
            let len = self.board.tasks(list).len();
            let state = self.state_mut(list);
            match state.selected() {
                _ if len == 0 => state.select(None),
                Some(i) if i >= len => state.select(Some(len - 1)),
                None => state.select(Some(0)),
                Some(_) => {}
            }
        }
    }
}
