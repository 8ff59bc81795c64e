use tracing::debug;

use crate::error::Result;
use crate::models::{NewTask, Task};
use crate::storage::{ImportReport, TaskStore};

/// Which of the two snapshots a row index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Active,
    Completed,
}

/// Keeps the active and completed snapshots in step with the store.
///
/// All store mutations made on behalf of a front-end go through here. Every
/// mutating call reloads both snapshots before returning, even if the call
/// failed, so what is displayed is always what is stored.
pub struct TaskBoard {
    store: TaskStore,
    active_tasks: Vec<Task>,
    completed_tasks: Vec<Task>,
}

impl TaskBoard {
    /// Wraps a store and loads the initial snapshots.
    pub fn new(store: TaskStore) -> Result<TaskBoard> {
        let mut board = TaskBoard {
            store,
            active_tasks: Vec::new(),
            completed_tasks: Vec::new(),
        };
        board.reload()?;
        Ok(board)
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Active tasks, highest priority first.
    pub fn active_tasks(&self) -> &[Task] {
        &self.active_tasks
    }

    /// Completed tasks, latest hard deadline first.
    pub fn completed_tasks(&self) -> &[Task] {
        &self.completed_tasks
    }

    pub fn tasks(&self, list: ListKind) -> &[Task] {
        match list {
            ListKind::Active => &self.active_tasks,
            ListKind::Completed => &self.completed_tasks,
        }
    }

    /// Re-queries both snapshots from the store.
    pub fn reload(&mut self) -> Result<()> {
        self.active_tasks = self.store.list_active()?;
        self.completed_tasks = self.store.list_completed()?;
        debug!(
            active = self.active_tasks.len(),
            completed = self.completed_tasks.len(),
            "snapshots reloaded"
        );
        Ok(())
    }

    /// Resolves a displayed row to the task id it shows.
    pub fn id_at(&self, list: ListKind, index: usize) -> Option<i64> {
        self.tasks(list).get(index).map(|t| t.id)
    }

    pub fn add(
        &mut self,
        title: &str,
        priority: i64,
        soft_deadline: &str,
        hard_deadline: &str,
    ) -> Result<i64> {
        let res = self.store.add(title, priority, soft_deadline, hard_deadline);
        self.after_mutation(res)
    }

    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let res = self.store.delete(id);
        self.after_mutation(res)
    }

    pub fn complete(&mut self, id: i64) -> Result<bool> {
        let res = self.store.complete(id);
        self.after_mutation(res)
    }

    pub fn update_priority(&mut self, id: i64, new_priority: i64) -> Result<bool> {
        let res = self.store.update_priority(id, new_priority);
        self.after_mutation(res)
    }

    pub fn bulk_add(&mut self, tasks: &[NewTask]) -> Result<ImportReport> {
        let res = self.store.bulk_add(tasks);
        self.after_mutation(res)
    }

    /// Deletes the task shown at `index`. An index past the end is a no-op.
    pub fn delete_at(&mut self, list: ListKind, index: usize) -> Result<bool> {
        match self.id_at(list, index) {
            Some(id) => self.delete(id),
            None => Ok(false),
        }
    }

    /// Completes the active task shown at `index`.
    pub fn complete_at(&mut self, index: usize) -> Result<bool> {
        match self.id_at(ListKind::Active, index) {
            Some(id) => self.complete(id),
            None => Ok(false),
        }
    }

    /// Sets the priority of the active task shown at `index`.
    pub fn set_priority_at(&mut self, index: usize, new_priority: i64) -> Result<bool> {
        match self.id_at(ListKind::Active, index) {
            Some(id) => self.update_priority(id, new_priority),
            None => Ok(false),
        }
    }

    /// Shifts the priority of the active task shown at `index` by `delta`.
    pub fn bump_priority_at(&mut self, index: usize, delta: i64) -> Result<bool> {
        match self.active_tasks.get(index) {
            Some(t) => {
                let (id, target) = (t.id, i64::from(t.priority) + delta);
                self.update_priority(id, target)
            }
            None => Ok(false),
        }
    }

    // A failed reload outranks the mutation result: the snapshots are stale.
    fn after_mutation<T>(&mut self, res: Result<T>) -> Result<T> {
        self.reload()?;
        res
    }
}
