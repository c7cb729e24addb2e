use jiff::civil::Date;
use jiff::{Timestamp, Zoned};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    models::{screen::ScreenState, task::Task},
    storage::{Storage, StorageError},
};

/// Reads the persisted screen snapshot. Missing or unreadable state is not
/// fatal: the screen starts from defaults and the failure only leaves a
/// trace. The visible list is rederived so a stale or hand-edited cache in
/// the file never survives the load.
pub fn load_screen(storage: &impl Storage) -> ScreenState {
    let mut screen = match storage.load() {
        Ok(screen) => screen,
        Err(e) => {
            warn!(error = %e, "could not read saved state, starting from defaults");
            ScreenState::default()
        }
    };
    screen.refresh_visible();
    screen
}

#[derive(Debug, Error)]
pub enum AddTaskError {
    #[error("Task description cannot be empty")]
    EmptyDescription,

    #[error("Invalid estimate date '{0}': {1}")]
    InvalidDate(String, String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct AddTaskParameters {
    /// Description as typed; stored verbatim, only the emptiness check trims
    pub description: String,
    /// Estimate date as typed, `YYYY-MM-DD`; empty means today
    pub estimated_at: String,
}

pub fn add_task(
    screen: &mut ScreenState,
    storage: &impl Storage,
    parameters: AddTaskParameters,
) -> Result<Task, AddTaskError> {
    // 1. Validate the description
    if parameters.description.trim().is_empty() {
        return Err(AddTaskError::EmptyDescription);
    }

    // 2. Parse the estimate date
    let date_input = parameters.estimated_at.trim();
    let estimated_at = if date_input.is_empty() {
        Zoned::now().date()
    } else {
        date_input
            .parse::<Date>()
            .map_err(|e| AddTaskError::InvalidDate(date_input.to_string(), e.to_string()))?
    };

    // 3. Create the task and append it (this also closes the add dialog)
    let task = Task::new(parameters.description, estimated_at, Timestamp::now());
    let created = task.clone();
    screen.push_task(task);

    // 4. Persist the full snapshot
    storage.save(screen)?;

    info!(id = %created.id, "task added");
    Ok(created)
}

/// Flips completion of the task with the given id and persists the result.
/// Unknown ids still persist: the snapshot always mirrors the screen.
pub fn toggle_task(
    screen: &mut ScreenState,
    storage: &impl Storage,
    id: Uuid,
) -> Result<(), StorageError> {
    screen.toggle_task(id, Timestamp::now());
    storage.save(screen)?;

    info!(id = %id, "task toggled");
    Ok(())
}

/// Removes the task with the given id and persists the result. Unknown ids
/// are a silent no-op apart from the write.
pub fn delete_task(
    screen: &mut ScreenState,
    storage: &impl Storage,
    id: Uuid,
) -> Result<(), StorageError> {
    screen.remove_task(id);
    storage.save(screen)?;

    info!(id = %id, "task deleted");
    Ok(())
}

/// Flips whether done tasks are shown and persists the result.
pub fn toggle_filter(
    screen: &mut ScreenState,
    storage: &impl Storage,
) -> Result<(), StorageError> {
    screen.toggle_filter();
    storage.save(screen)?;

    info!(show_done_tasks = screen.show_done_tasks, "filter toggled");
    Ok(())
}
