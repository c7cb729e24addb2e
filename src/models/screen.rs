use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::task::Task;

/// Derives the tasks to display for the given filter: every task when
/// `show_done_tasks` is set, only the pending ones otherwise. Order is
/// preserved.
pub fn visible_tasks(tasks: &[Task], show_done_tasks: bool) -> Vec<Task> {
    if show_done_tasks {
        tasks.to_vec()
    } else {
        tasks
            .iter()
            .filter(|task| !task.is_done())
            .cloned()
            .collect()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScreenState {
    /// Every task, in insertion order
    pub tasks: Vec<Task>,
    /// Last derivation of the list on display. Kept in the snapshot so the
    /// file mirrors what was on screen; always recomputed through
    /// [`visible_tasks`], never edited directly.
    pub visible_tasks: Vec<Task>,
    /// Whether completed tasks stay on the list
    pub show_done_tasks: bool,
    /// Whether the add-task dialog is open
    pub show_add_task: bool,
}

impl Default for ScreenState {
    fn default() -> Self {
        Self {
            tasks: vec![],
            visible_tasks: vec![],
            show_done_tasks: true,
            show_add_task: false,
        }
    }
}

impl ScreenState {
    pub fn refresh_visible(&mut self) {
        self.visible_tasks = visible_tasks(&self.tasks, self.show_done_tasks);
    }

    pub fn toggle_filter(&mut self) {
        self.show_done_tasks = !self.show_done_tasks;
        self.refresh_visible();
    }

    /// Flips completion of the task with the given id. Unknown ids are a
    /// silent no-op; the visible list is refreshed either way.
    pub fn toggle_task(&mut self, id: Uuid, now: Timestamp) {
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
            task.toggle_done(now);
        }
        self.refresh_visible();
    }

    /// Appends a task and closes the add dialog.
    pub fn push_task(&mut self, task: Task) {
        self.tasks.push(task);
        self.show_add_task = false;
        self.refresh_visible();
    }

    /// Removes the task with the given id. Unknown ids are a silent no-op.
    pub fn remove_task(&mut self, id: Uuid) {
        self.tasks.retain(|task| task.id != id);
        self.refresh_visible();
    }
}
