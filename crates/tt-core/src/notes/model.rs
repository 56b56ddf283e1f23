use serde::{Deserialize, Serialize};

use crate::ids::{ListId, TaskId};

/// The five colors a note list can wear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteColor {
    Yellow,
    Green,
    Blue,
    Pink,
    Purple,
}

impl Default for NoteColor {
    fn default() -> Self {
        Self::Yellow
    }
}

/// A single checklist entry inside a note list.
///
/// Tasks are addressed by their creation-timestamp id everywhere; the
/// position inside `items` is presentation order only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub checked: bool,
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            checked: false,
        }
    }
}

/// A sticky-note list. Serialized field names match the persisted blob
/// format, which the cloud side shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteList {
    pub id: ListId,
    pub title: String,
    pub color: NoteColor,
    pub items: Vec<Task>,
    pub is_pinned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl NoteList {
    pub fn new(title: impl Into<String>, color: NoteColor) -> Self {
        Self {
            id: ListId::new(),
            title: title.into(),
            color,
            items: Vec::new(),
            is_pinned: false,
            x: None,
            y: None,
            width: None,
            height: None,
        }
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.items.iter_mut().find(|t| t.id == id)
    }

    /// Move the pinned note by a pointer delta. Unset coordinates start
    /// from the origin, matching a freshly pinned note's default placement.
    pub fn apply_drag_delta(&mut self, dx: f64, dy: f64) {
        self.x = Some(self.x.unwrap_or(0.0) + dx);
        self.y = Some(self.y.unwrap_or(0.0) + dy);
    }
}
