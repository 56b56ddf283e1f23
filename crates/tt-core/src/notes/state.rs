use serde::{Deserialize, Serialize};

use super::{NoteColor, NoteList, NotesKey, Task};
use crate::ids::{ListId, TaskId, UserId};

/// Verdict of comparing a remote snapshot against local state.
#[derive(Debug, Clone, PartialEq)]
pub enum Reconciliation {
    /// Remote equals local; nothing to do.
    Unchanged,
    /// Local was clean; the remote snapshot has been adopted.
    Adopted,
    /// Local was dirty; the remote snapshot is buffered and the user must
    /// arbitrate. No local data was touched.
    ConflictPending,
}

/// In-memory state of the sticky-notes engine. Single instance, owned by
/// the engine; all mutation goes through these methods.
pub struct NotesState {
    pub lists: Vec<NoteList>,
    pub user_id: Option<UserId>,
    pub key: Option<NotesKey>,
    pub is_dirty: bool,
    pub cloud_buffer: Option<Vec<NoteList>>,
    pub pending_delete: Option<ListId>,
}

/// Snapshot form of the note collection, the unit of persistence and
/// transmission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotesSnapshot(pub Vec<NoteList>);

impl Default for NotesState {
    fn default() -> Self {
        Self::new()
    }
}

impl NotesState {
    pub fn new() -> Self {
        Self {
            lists: Vec::new(),
            user_id: None,
            key: None,
            cloud_buffer: None,
            pending_delete: None,
            is_dirty: false,
        }
    }

    /// Attach an identity and its derived key. Existing lists are kept
    /// until `load`/`adopt` replaces them.
    pub fn unlock(&mut self, user_id: UserId, key: NotesKey) {
        self.user_id = Some(user_id);
        self.key = Some(key);
    }

    /// Drop identity, key and all note data. Used on logout.
    pub fn lock(&mut self) {
        self.lists.clear();
        self.user_id = None;
        self.key = None;
        self.cloud_buffer = None;
        self.pending_delete = None;
        self.is_dirty = false;
    }

    pub fn is_locked(&self) -> bool {
        self.user_id.is_none()
    }

    /// First-run defaults: two empty starter lists.
    pub fn seed_defaults(&mut self) {
        self.lists = vec![
            NoteList::new("Watchlist", NoteColor::Yellow),
            NoteList::new("Trade Ideas", NoteColor::Blue),
        ];
        self.is_dirty = false;
    }

    /// Replace the collection wholesale (decrypted local blob or a cloud
    /// snapshot the user accepted).
    pub fn adopt(&mut self, lists: Vec<NoteList>) {
        self.lists = lists;
        self.cloud_buffer = None;
        self.pending_delete = None;
    }

    /// Decide what to do with a freshly fetched remote snapshot.
    ///
    /// Clean local state is overwritten unconditionally; dirty local state
    /// is never overwritten, the snapshot is buffered for user arbitration.
    pub fn reconcile(&mut self, remote: Vec<NoteList>) -> Reconciliation {
        if remote == self.lists {
            return Reconciliation::Unchanged;
        }
        if self.is_dirty {
            self.cloud_buffer = Some(remote);
            Reconciliation::ConflictPending
        } else {
            self.adopt(remote);
            Reconciliation::Adopted
        }
    }

    /// Resolve a pending conflict in favor of the buffered cloud snapshot.
    /// Returns false when no buffer is pending.
    pub fn accept_cloud_buffer(&mut self) -> bool {
        match self.cloud_buffer.take() {
            Some(remote) => {
                self.adopt(remote);
                self.is_dirty = false;
                true
            }
            None => false,
        }
    }

    /// Resolve a pending conflict in favor of local state.
    pub fn keep_local(&mut self) {
        self.cloud_buffer = None;
        self.is_dirty = false;
    }

    pub fn snapshot(&self) -> NotesSnapshot {
        NotesSnapshot(self.lists.clone())
    }

    pub fn list(&self, id: &ListId) -> Option<&NoteList> {
        self.lists.iter().find(|l| &l.id == id)
    }

    pub fn list_mut(&mut self, id: &ListId) -> Option<&mut NoteList> {
        self.lists.iter_mut().find(|l| &l.id == id)
    }

    // === Mutations. Every one of these leaves the state dirty. ===

    pub fn add_list(&mut self, title: impl Into<String>, color: NoteColor) -> ListId {
        let list = NoteList::new(title, color);
        let id = list.id.clone();
        self.lists.push(list);
        self.is_dirty = true;
        id
    }

    pub fn rename_list(&mut self, id: &ListId, title: impl Into<String>) -> bool {
        match self.list_mut(id) {
            Some(list) => {
                list.title = title.into();
                self.is_dirty = true;
                true
            }
            None => false,
        }
    }

    pub fn toggle_pin(&mut self, id: &ListId) -> Option<bool> {
        let pinned = {
            let list = self.list_mut(id)?;
            list.is_pinned = !list.is_pinned;
            list.is_pinned
        };
        self.is_dirty = true;
        Some(pinned)
    }

    pub fn move_list(&mut self, id: &ListId, dx: f64, dy: f64) -> bool {
        match self.list_mut(id) {
            Some(list) => {
                list.apply_drag_delta(dx, dy);
                self.is_dirty = true;
                true
            }
            None => false,
        }
    }

    pub fn resize_list(&mut self, id: &ListId, width: f64, height: f64) -> bool {
        match self.list_mut(id) {
            Some(list) => {
                list.width = Some(width);
                list.height = Some(height);
                self.is_dirty = true;
                true
            }
            None => false,
        }
    }

    /// Bring a pinned note to the top of the render stack (drag start).
    /// Order within `lists` is the stacking order, last on top.
    pub fn raise_list(&mut self, id: &ListId) -> bool {
        match self.lists.iter().position(|l| &l.id == id) {
            Some(pos) => {
                let list = self.lists.remove(pos);
                self.lists.push(list);
                true
            }
            None => false,
        }
    }

    /// Next free task id at or after `now_ms`, skipping ids already taken
    /// by tasks created in the same millisecond.
    pub fn next_task_id(list: &NoteList, now_ms: i64) -> TaskId {
        let mut candidate = TaskId::from_millis(now_ms);
        while list.items.iter().any(|t| t.id == candidate) {
            candidate = candidate.successor();
        }
        candidate
    }

    pub fn add_task(&mut self, list_id: &ListId, text: impl Into<String>, now_ms: i64) -> Option<TaskId> {
        let list = self.lists.iter_mut().find(|l| &l.id == list_id)?;
        let id = Self::next_task_id(list, now_ms);
        list.items.push(Task::new(id, text));
        self.is_dirty = true;
        Some(id)
    }

    pub fn edit_task(&mut self, list_id: &ListId, task_id: TaskId, text: impl Into<String>) -> bool {
        let Some(task) = self
            .list_mut(list_id)
            .and_then(|l| l.task_mut(task_id))
        else {
            return false;
        };
        task.text = text.into();
        self.is_dirty = true;
        true
    }

    pub fn toggle_task(&mut self, list_id: &ListId, task_id: TaskId) -> Option<bool> {
        let task = self.list_mut(list_id).and_then(|l| l.task_mut(task_id))?;
        task.checked = !task.checked;
        let checked = task.checked;
        self.is_dirty = true;
        Some(checked)
    }

    pub fn remove_task(&mut self, list_id: &ListId, task_id: TaskId) -> bool {
        let Some(list) = self.list_mut(list_id) else {
            return false;
        };
        let before = list.items.len();
        list.items.retain(|t| t.id != task_id);
        if list.items.len() == before {
            return false;
        }
        self.is_dirty = true;
        true
    }

    // === Two-step deletion ===

    /// Step one: remember which list the open confirmation refers to.
    /// At most one list is pending deletion at a time.
    pub fn request_delete(&mut self, id: ListId) {
        self.pending_delete = Some(id);
    }

    /// Step two: remove the pending list by identity. Returns the removed
    /// list, or None when nothing was pending or the list is already gone.
    pub fn confirm_delete(&mut self) -> Option<NoteList> {
        let id = self.pending_delete.take()?;
        let pos = self.lists.iter().position(|l| l.id == id)?;
        let removed = self.lists.remove(pos);
        self.is_dirty = true;
        Some(removed)
    }

    /// Abandon the confirmation without touching any list.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}
