use jiff::Timestamp;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Task {
    /// UUID to identify the task
    pub id: Uuid,
    /// What needs doing
    pub description: String,
    /// When the user estimates to get it done
    pub estimated_at: Date,
    /// When the task was completed, if it has been
    pub done_at: Option<Timestamp>,
    /// When the task was created
    pub created_at: Timestamp,
}

impl Task {
    pub fn new(description: String, estimated_at: Date, now: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            description,
            estimated_at,
            done_at: None,
            created_at: now,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done_at.is_some()
    }

    /// Flips completion: pending tasks become done at `now`, done tasks
    /// go back to pending.
    pub fn toggle_done(&mut self, now: Timestamp) {
        self.done_at = match self.done_at {
            Some(_) => None,
            None => Some(now),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn new_task_starts_pending() {
        let task = Task::new(
            "Buy milk".to_string(),
            date(2024, 1, 1),
            Timestamp::UNIX_EPOCH,
        );

        assert_eq!(task.description, "Buy milk");
        assert_eq!(task.estimated_at, date(2024, 1, 1));
        assert!(!task.is_done());
    }

    #[test]
    fn toggle_marks_done_at_the_given_instant() {
        let now = Timestamp::UNIX_EPOCH;
        let mut task = Task::new("Water plants".to_string(), date(2024, 1, 1), now);

        task.toggle_done(now);

        assert_eq!(task.done_at, Some(now));
        assert!(task.is_done());
    }

    #[test]
    fn toggling_twice_returns_to_pending() {
        let now = Timestamp::UNIX_EPOCH;
        let mut task = Task::new("Water plants".to_string(), date(2024, 1, 1), now);

        task.toggle_done(now);
        task.toggle_done(now);

        assert_eq!(task.done_at, None);
    }
}
