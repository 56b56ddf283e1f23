use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Creation-timestamp identifier of a task within a note list.
///
/// The value is the task's creation time in unix milliseconds. Tasks are
/// always resolved by this id, never by their position in the list, so the
/// id must stay unique within a list even when two tasks are created in the
/// same millisecond (see [`NotesState::next_task_id`]).
///
/// [`NotesState::next_task_id`]: crate::notes::NotesState::next_task_id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(i64);

impl TaskId {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// The next candidate id after this one.
    pub fn successor(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for TaskId {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}
