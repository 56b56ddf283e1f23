use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use tt_core::notes::{notes_blob_key, NoteColor, NoteList, NotesState};
use tt_core::ports::{ClockPort, KeyValueStorePort, NotesCipherPort, NotesRemotePort, NotesViewPort};
use tt_core::session::SESSION_USER_KEY;
use tt_core::{EngineLifecycle, ListId, SyncStatus, TaskId, UserId};

/// The user's answer to the keep-local / keep-cloud choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    KeepLocal,
    KeepCloud,
}

struct EngineInner {
    state: NotesState,
    lifecycle: EngineLifecycle,
}

/// Local-first sticky-notes engine.
///
/// Owns the single in-memory note collection. Local writes land
/// immediately (state, render, encrypted local snapshot, dirty flag);
/// the remote store only ever sees sealed blobs, and never overwrites
/// dirty local state without the user choosing a side.
///
/// Fail-closed: without a derived key the engine stays locked and will
/// neither persist nor transmit. There is no plaintext fallback.
pub struct NotesEngine {
    inner: Mutex<EngineInner>,
    store: Arc<dyn KeyValueStorePort>,
    remote: Arc<dyn NotesRemotePort>,
    cipher: Arc<dyn NotesCipherPort>,
    view: Arc<dyn NotesViewPort>,
    clock: Arc<dyn ClockPort>,
}

impl NotesEngine {
    pub fn from_ports(
        store: Arc<dyn KeyValueStorePort>,
        remote: Arc<dyn NotesRemotePort>,
        cipher: Arc<dyn NotesCipherPort>,
        view: Arc<dyn NotesViewPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            inner: Mutex::new(EngineInner {
                state: NotesState::new(),
                lifecycle: EngineLifecycle::Locked,
            }),
            store,
            remote,
            cipher,
            view,
            clock,
        }
    }

    // === Observation (mostly for the shell and tests) ===

    pub async fn lifecycle(&self) -> EngineLifecycle {
        self.inner.lock().await.lifecycle
    }

    pub async fn is_dirty(&self) -> bool {
        self.inner.lock().await.state.is_dirty
    }

    pub async fn lists(&self) -> Vec<NoteList> {
        self.inner.lock().await.state.lists.clone()
    }

    // === Identity ===

    /// Compare the stored user id against the remembered one and react.
    ///
    /// Runs on the poll interval and immediately after login/logout
    /// events. A read failure is treated as "unchanged" rather than as a
    /// logout, so a transient storage hiccup cannot wipe the panel.
    #[tracing::instrument(name = "usecase.notes.poll_identity", skip(self))]
    pub async fn poll_identity(&self) {
        let stored = match self.store.get(SESSION_USER_KEY).await {
            Ok(value) => value.map(UserId::from),
            Err(e) => {
                warn!(error = %e, "identity read failed, keeping current state");
                return;
            }
        };

        let remembered = self.inner.lock().await.state.user_id.clone();
        match (remembered, stored) {
            (None, None) => {}
            (Some(_), None) => self.lock().await,
            (old, Some(new)) if old.as_ref() != Some(&new) => {
                // Different or first identity: drop whatever a previous
                // user left in memory, then load the new user's data.
                if old.is_some() {
                    self.lock().await;
                }
                self.unlock_and_load(new).await;
            }
            _ => {}
        }
    }

    /// Clear identity, key and all note data; hide the panel.
    async fn lock(&self) {
        let mut inner = self.inner.lock().await;
        inner.state.lock();
        inner.lifecycle = inner.lifecycle.lock();
        drop(inner);

        self.view.clear();
        self.view.set_status(SyncStatus::Hidden);
        info!("notes engine locked");
    }

    async fn unlock_and_load(&self, user_id: UserId) {
        let key = match self.cipher.derive_key(&user_id).await {
            Ok(key) => key,
            Err(e) => {
                // Fail closed: no key, no engine.
                warn!(user_id = %user_id, error = %e, "key derivation failed, staying locked");
                return;
            }
        };

        {
            let mut inner = self.inner.lock().await;
            inner.state.unlock(user_id.clone(), key);
            if let Some(next) = inner.lifecycle.unlock() {
                inner.lifecycle = next;
            }
        }

        info!(user_id = %user_id, "notes engine unlocked");
        self.load().await;
    }

    // === Load & cloud reconciliation ===

    /// Adopt the locally persisted blob if it decrypts, otherwise seed the
    /// defaults; then always try the cloud.
    #[tracing::instrument(name = "usecase.notes.load", skip(self))]
    pub async fn load(&self) {
        let local = self.read_local_blob().await;

        {
            let mut inner = self.inner.lock().await;
            match local {
                Some(lists) => {
                    debug!(lists = lists.len(), "adopted local snapshot");
                    inner.state.adopt(lists);
                }
                None => {
                    debug!("no usable local snapshot, seeding defaults");
                    inner.state.seed_defaults();
                }
            }
            inner.state.is_dirty = false;
            if let Some(next) = inner.lifecycle.on_loaded() {
                inner.lifecycle = next;
            }
            self.view.render(&inner.state.lists);
        }

        self.persist_local().await;
        self.fetch_cloud().await;
    }

    /// One cloud reconciliation round.
    ///
    /// Clean local state adopts a differing remote snapshot silently;
    /// dirty local state parks it and asks the user.
    #[tracing::instrument(name = "usecase.notes.fetch_cloud", skip(self))]
    pub async fn fetch_cloud(&self) {
        let user_id = match self.current_user().await {
            Some(user_id) => user_id,
            None => return,
        };

        let envelope = match self.remote.fetch_notes(&user_id).await {
            Ok(Some(envelope)) => envelope,
            Ok(None) => {
                debug!("cloud has no snapshot for this user");
                return;
            }
            Err(e) => {
                warn!(error = %e, "cloud fetch failed");
                return;
            }
        };

        let Some(remote) = self.open_snapshot(&envelope).await else {
            // Undecryptable or unparseable counts as no data.
            return;
        };

        let mut inner = self.inner.lock().await;
        use tt_core::notes::Reconciliation::*;
        match inner.state.reconcile(remote) {
            Unchanged => {
                debug!("cloud snapshot matches local state");
            }
            Adopted => {
                info!("adopted differing cloud snapshot (local was clean)");
                if let Some(next) = inner.lifecycle.on_remote_differs() {
                    inner.lifecycle = next;
                }
                self.view.render(&inner.state.lists);
                self.view.set_status(SyncStatus::Synced);
                drop(inner);
                self.persist_local().await;
            }
            ConflictPending => {
                info!("cloud snapshot differs while dirty, asking the user");
                if let Some(next) = inner.lifecycle.on_remote_differs() {
                    inner.lifecycle = next;
                }
                self.view.set_status(SyncStatus::Conflict);
                self.view.present_conflict();
            }
        }
    }

    /// Apply the user's conflict verdict. Either way the dirty flag ends
    /// up clear and memory holds the chosen side.
    #[tracing::instrument(name = "usecase.notes.resolve_conflict", skip(self))]
    pub async fn resolve_conflict(&self, choice: ConflictChoice) {
        {
            let mut inner = self.inner.lock().await;
            match choice {
                ConflictChoice::KeepLocal => inner.state.keep_local(),
                ConflictChoice::KeepCloud => {
                    if !inner.state.accept_cloud_buffer() {
                        warn!("keep-cloud chosen but no buffered snapshot");
                        return;
                    }
                    self.view.render(&inner.state.lists);
                }
            }
            if let Some(next) = inner.lifecycle.on_resolved() {
                inner.lifecycle = next;
            }
            self.view.set_status(SyncStatus::Synced);
        }
        info!(?choice, "conflict resolved");
        self.persist_local().await;
    }

    // === Manual sync ===

    /// Seal current state and push it to the worker. On failure the dirty
    /// flag stays set and the indicator turns into the retry affordance;
    /// the next trigger retries with whatever state is current then.
    #[tracing::instrument(name = "usecase.notes.sync_now", skip(self))]
    pub async fn sync_now(&self) -> Result<()> {
        let (user_id, envelope) = {
            let inner = self.inner.lock().await;
            let user_id = inner
                .state
                .user_id
                .clone()
                .ok_or_else(|| anyhow!("cannot sync while locked"))?;
            let key = inner
                .state
                .key
                .clone()
                .ok_or_else(|| anyhow!("no key, refusing to transmit"))?;
            let plaintext = serde_json::to_string(&inner.state.lists)?;
            drop(inner);

            let envelope = self
                .cipher
                .seal(&key, &plaintext)
                .await
                .map_err(|e| anyhow!("seal failed: {e}"))?;
            (user_id, envelope)
        };

        self.view.set_status(SyncStatus::Syncing);
        match self.remote.save_notes(&user_id, &envelope).await {
            Ok(()) => {
                let mut inner = self.inner.lock().await;
                inner.state.is_dirty = false;
                inner.lifecycle = inner.lifecycle.on_saved(true);
                self.view.set_status(SyncStatus::Synced);
                info!("manual sync confirmed");
                Ok(())
            }
            Err(e) => {
                let mut inner = self.inner.lock().await;
                inner.lifecycle = inner.lifecycle.on_saved(false);
                self.view.set_status(SyncStatus::RetryNeeded);
                warn!(error = %e, "manual sync failed, local data untouched");
                Err(anyhow!(e))
            }
        }
    }

    // === Local mutations ===

    pub async fn add_list(&self, title: &str, color: NoteColor) -> ListId {
        let mut inner = self.inner.lock().await;
        let id = inner.state.add_list(title, color);
        self.after_structural_mutation(&mut inner);
        drop(inner);
        self.persist_local().await;
        id
    }

    /// Title edits update in place; no full re-render.
    pub async fn rename_list(&self, id: &ListId, title: &str) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if !inner.state.rename_list(id, title) {
            return Err(anyhow!("list {id} not found"));
        }
        self.after_text_mutation(&mut inner);
        drop(inner);
        self.persist_local().await;
        Ok(())
    }

    pub async fn add_task(&self, list_id: &ListId, text: &str) -> Result<TaskId> {
        let now = self.clock.now_ms();
        let mut inner = self.inner.lock().await;
        let task_id = inner
            .state
            .add_task(list_id, text, now)
            .ok_or_else(|| anyhow!("list {list_id} not found"))?;
        self.after_structural_mutation(&mut inner);
        drop(inner);
        self.persist_local().await;
        Ok(task_id)
    }

    /// Task text edits update in place; no full re-render.
    pub async fn edit_task(&self, list_id: &ListId, task_id: TaskId, text: &str) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if !inner.state.edit_task(list_id, task_id, text) {
            return Err(anyhow!("task {task_id} not found in list {list_id}"));
        }
        self.after_text_mutation(&mut inner);
        drop(inner);
        self.persist_local().await;
        Ok(())
    }

    pub async fn toggle_task(&self, list_id: &ListId, task_id: TaskId) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        let checked = inner
            .state
            .toggle_task(list_id, task_id)
            .ok_or_else(|| anyhow!("task {task_id} not found in list {list_id}"))?;
        self.after_structural_mutation(&mut inner);
        drop(inner);
        self.persist_local().await;
        Ok(checked)
    }

    pub async fn remove_task(&self, list_id: &ListId, task_id: TaskId) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if !inner.state.remove_task(list_id, task_id) {
            return Err(anyhow!("task {task_id} not found in list {list_id}"));
        }
        self.after_structural_mutation(&mut inner);
        drop(inner);
        self.persist_local().await;
        Ok(())
    }

    pub async fn toggle_pin(&self, id: &ListId) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        let pinned = inner
            .state
            .toggle_pin(id)
            .ok_or_else(|| anyhow!("list {id} not found"))?;
        self.after_structural_mutation(&mut inner);
        drop(inner);
        self.persist_local().await;
        Ok(pinned)
    }

    /// Drag start: raise the note to the top of the stack.
    pub async fn begin_drag(&self, id: &ListId) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if !inner.state.raise_list(id) {
            return Err(anyhow!("list {id} not found"));
        }
        // Stacking changed but content did not; re-render, no dirty.
        self.view.render(&inner.state.lists);
        Ok(())
    }

    /// Pointer-delta reposition of a pinned note; applied in place.
    pub async fn drag_by(&self, id: &ListId, dx: f64, dy: f64) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if !inner.state.move_list(id, dx, dy) {
            return Err(anyhow!("list {id} not found"));
        }
        self.after_text_mutation(&mut inner);
        drop(inner);
        self.persist_local().await;
        Ok(())
    }

    /// Any size change immediately marks dirty and writes the snapshot.
    pub async fn resize_list(&self, id: &ListId, width: f64, height: f64) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if !inner.state.resize_list(id, width, height) {
            return Err(anyhow!("list {id} not found"));
        }
        self.after_text_mutation(&mut inner);
        drop(inner);
        self.persist_local().await;
        Ok(())
    }

    // === Two-step deletion ===

    pub async fn request_delete(&self, id: ListId) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let list = inner
            .state
            .list(&id)
            .cloned()
            .ok_or_else(|| anyhow!("list {id} not found"))?;
        inner.state.request_delete(id);
        self.view.open_delete_confirmation(&list);
        Ok(())
    }

    pub async fn confirm_delete(&self) {
        let mut inner = self.inner.lock().await;
        if inner.state.confirm_delete().is_some() {
            self.after_structural_mutation(&mut inner);
            self.view.close_delete_confirmation();
            drop(inner);
            self.persist_local().await;
        } else {
            self.view.close_delete_confirmation();
        }
    }

    pub async fn cancel_delete(&self) {
        let mut inner = self.inner.lock().await;
        inner.state.cancel_delete();
        self.view.close_delete_confirmation();
    }

    // === Internals ===

    fn after_structural_mutation(&self, inner: &mut EngineInner) {
        if let Some(next) = inner.lifecycle.on_mutated() {
            inner.lifecycle = next;
        }
        self.view.render(&inner.state.lists);
    }

    fn after_text_mutation(&self, inner: &mut EngineInner) {
        if let Some(next) = inner.lifecycle.on_mutated() {
            inner.lifecycle = next;
        }
    }

    async fn current_user(&self) -> Option<UserId> {
        self.inner.lock().await.state.user_id.clone()
    }

    /// Read and open the local blob. Any failure along the way reads as
    /// "no data".
    async fn read_local_blob(&self) -> Option<Vec<NoteList>> {
        let (user_id, _) = self.identity_and_key().await?;
        let envelope = match self.store.get(&notes_blob_key(&user_id)).await {
            Ok(Some(envelope)) => envelope,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "local blob read failed");
                return None;
            }
        };
        self.open_snapshot(&envelope).await
    }

    async fn open_snapshot(&self, envelope: &str) -> Option<Vec<NoteList>> {
        let (_, key) = self.identity_and_key().await?;
        let plaintext = match self.cipher.open(&key, envelope).await {
            Ok(plaintext) => plaintext,
            Err(e) => {
                debug!(error = %e, "blob would not open, treating as no data");
                return None;
            }
        };
        match serde_json::from_str::<Vec<NoteList>>(&plaintext) {
            Ok(lists) => Some(lists),
            Err(e) => {
                debug!(error = %e, "blob parsed to no note collection");
                None
            }
        }
    }

    /// Seal the current collection and write it to the local store.
    /// Failures are logged, never propagated: the in-memory state stays
    /// authoritative and the dirty flag keeps the data retryable.
    async fn persist_local(&self) {
        let (user_id, key, plaintext) = {
            let inner = self.inner.lock().await;
            let Some(user_id) = inner.state.user_id.clone() else {
                return;
            };
            let Some(key) = inner.state.key.clone() else {
                warn!("no key, refusing to persist");
                return;
            };
            let plaintext = match serde_json::to_string(&inner.state.lists) {
                Ok(p) => p,
                Err(e) => {
                    warn!(error = %e, "snapshot serialization failed");
                    return;
                }
            };
            (user_id, key, plaintext)
        };

        let envelope = match self.cipher.seal(&key, &plaintext).await {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(error = %e, "seal failed, snapshot not written");
                return;
            }
        };
        if let Err(e) = self.store.set(&notes_blob_key(&user_id), &envelope).await {
            warn!(error = %e, "local snapshot write failed");
        }
    }

    async fn identity_and_key(&self) -> Option<(UserId, tt_core::notes::NotesKey)> {
        let inner = self.inner.lock().await;
        Some((inner.state.user_id.clone()?, inner.state.key.clone()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;
    use tt_core::errors::{CipherError, NotesSyncError};
    use tt_core::notes::NotesKey;
    use tt_core::session::SESSION_USER_KEY;

    #[derive(Default)]
    struct MapStore {
        map: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl KeyValueStorePort for MapStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.map.lock().await.get(key).cloned())
        }
        async fn set(&self, key: &str, value: &str) -> Result<()> {
            self.map.lock().await.insert(key.to_string(), value.to_string());
            Ok(())
        }
        async fn remove(&self, key: &str) -> Result<()> {
            self.map.lock().await.remove(key);
            Ok(())
        }
    }

    /// Reversible stand-in for the real cipher: envelope is a marker plus
    /// the key byte plus the plaintext, so tests can assert round-trips.
    struct MarkerCipher;

    #[async_trait]
    impl NotesCipherPort for MarkerCipher {
        async fn derive_key(&self, user_id: &UserId) -> Result<NotesKey, CipherError> {
            let mut bytes = [0u8; 32];
            bytes[0] = user_id.as_ref().len() as u8;
            NotesKey::from_bytes(&bytes)
        }

        async fn seal(&self, key: &NotesKey, plaintext: &str) -> Result<String, CipherError> {
            Ok(format!("sealed:{}:{}", key.as_bytes()[0], plaintext))
        }

        async fn open(&self, key: &NotesKey, envelope: &str) -> Result<String, CipherError> {
            let prefix = format!("sealed:{}:", key.as_bytes()[0]);
            envelope
                .strip_prefix(&prefix)
                .map(str::to_string)
                .ok_or(CipherError::DecryptFailed)
        }
    }

    #[derive(Default)]
    struct FakeRemote {
        snapshot: StdMutex<Option<String>>,
        fail_saves: StdMutex<bool>,
        saves: AtomicUsize,
    }

    #[async_trait]
    impl NotesRemotePort for FakeRemote {
        async fn fetch_notes(&self, _user_id: &UserId) -> Result<Option<String>, NotesSyncError> {
            Ok(self.snapshot.lock().unwrap().clone())
        }

        async fn save_notes(&self, _user_id: &UserId, blob: &str) -> Result<(), NotesSyncError> {
            if *self.fail_saves.lock().unwrap() {
                return Err(NotesSyncError::Network("connection reset".into()));
            }
            self.saves.fetch_add(1, Ordering::SeqCst);
            *self.snapshot.lock().unwrap() = Some(blob.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingView {
        renders: AtomicUsize,
        statuses: StdMutex<Vec<SyncStatus>>,
        conflicts: AtomicUsize,
        cleared: AtomicUsize,
    }

    impl NotesViewPort for RecordingView {
        fn render(&self, _lists: &[NoteList]) {
            self.renders.fetch_add(1, Ordering::SeqCst);
        }
        fn clear(&self) {
            self.cleared.fetch_add(1, Ordering::SeqCst);
        }
        fn set_status(&self, status: SyncStatus) {
            self.statuses.lock().unwrap().push(status);
        }
        fn present_conflict(&self) {
            self.conflicts.fetch_add(1, Ordering::SeqCst);
        }
        fn open_delete_confirmation(&self, _list: &NoteList) {}
        fn close_delete_confirmation(&self) {}
    }

    struct FixedClock(i64);

    impl ClockPort for FixedClock {
        fn now_ms(&self) -> i64 {
            self.0
        }
    }

    struct Fixture {
        engine: NotesEngine,
        store: Arc<MapStore>,
        remote: Arc<FakeRemote>,
        view: Arc<RecordingView>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MapStore::default());
        let remote = Arc::new(FakeRemote::default());
        let view = Arc::new(RecordingView::default());
        let engine = NotesEngine::from_ports(
            store.clone(),
            remote.clone(),
            Arc::new(MarkerCipher),
            view.clone(),
            Arc::new(FixedClock(1_700_000_000_000)),
        );
        Fixture {
            engine,
            store,
            remote,
            view,
        }
    }

    async fn login(fx: &Fixture, user: &str) {
        fx.store.set(SESSION_USER_KEY, user).await.unwrap();
        fx.engine.poll_identity().await;
    }

    async fn sealed_remote_snapshot(user: &str, lists: &[NoteList]) -> String {
        let cipher = MarkerCipher;
        let key = cipher.derive_key(&UserId::from(user)).await.unwrap();
        cipher
            .seal(&key, &serde_json::to_string(lists).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn first_login_seeds_defaults_and_renders() {
        let fx = fixture();
        login(&fx, "user-1").await;

        assert_eq!(fx.engine.lifecycle().await, EngineLifecycle::Synced);
        let lists = fx.engine.lists().await;
        assert_eq!(lists.len(), 2);
        assert!(!fx.engine.is_dirty().await);
        assert!(fx.view.renders.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn offline_mutations_round_trip_through_the_local_blob() {
        let fx = fixture();
        login(&fx, "user-1").await;

        let list_id = fx.engine.add_list("Strategy Notes", NoteColor::Pink).await;
        fx.engine.add_task(&list_id, "Check EURUSD").await.unwrap();
        assert!(fx.engine.is_dirty().await);

        // The persisted blob opens back to exactly the in-memory state.
        let in_memory = fx.engine.lists().await;
        let blob = fx
            .store
            .get(&notes_blob_key(&UserId::from("user-1")))
            .await
            .unwrap()
            .expect("local blob written");
        let cipher = MarkerCipher;
        let key = cipher.derive_key(&UserId::from("user-1")).await.unwrap();
        let plaintext = cipher.open(&key, &blob).await.unwrap();
        let persisted: Vec<NoteList> = serde_json::from_str(&plaintext).unwrap();
        assert_eq!(persisted, in_memory);
    }

    #[tokio::test]
    async fn reload_with_same_identity_restores_tasks() {
        let fx = fixture();
        login(&fx, "user-1").await;
        let list_id = fx.engine.add_list("Strategy Notes", NoteColor::Pink).await;
        fx.engine.add_task(&list_id, "Check EURUSD").await.unwrap();

        // Fresh engine over the same store simulates a page reload.
        let reloaded = NotesEngine::from_ports(
            fx.store.clone(),
            fx.remote.clone(),
            Arc::new(MarkerCipher),
            Arc::new(RecordingView::default()),
            Arc::new(FixedClock(1_700_000_000_001)),
        );
        reloaded.poll_identity().await;

        let lists = reloaded.lists().await;
        let restored = lists.iter().find(|l| l.title == "Strategy Notes").unwrap();
        assert_eq!(restored.items.len(), 1);
        assert_eq!(restored.items[0].text, "Check EURUSD");
        assert!(!restored.items[0].checked);
    }

    #[tokio::test]
    async fn clean_state_adopts_differing_remote_without_interaction() {
        let fx = fixture();
        login(&fx, "user-1").await;
        assert!(!fx.engine.is_dirty().await);

        let remote_lists = vec![NoteList::new("From Cloud", NoteColor::Green)];
        *fx.remote.snapshot.lock().unwrap() =
            Some(sealed_remote_snapshot("user-1", &remote_lists).await);

        fx.engine.fetch_cloud().await;

        assert_eq!(fx.engine.lists().await, remote_lists);
        assert!(!fx.engine.is_dirty().await);
        assert_eq!(fx.view.conflicts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn dirty_state_is_never_silently_overwritten() {
        let fx = fixture();
        login(&fx, "user-1").await;
        let list_id = fx.engine.add_list("Local Work", NoteColor::Blue).await;
        fx.engine.add_task(&list_id, "keep me").await.unwrap();
        let local = fx.engine.lists().await;

        let remote_lists = vec![NoteList::new("From Cloud", NoteColor::Green)];
        *fx.remote.snapshot.lock().unwrap() =
            Some(sealed_remote_snapshot("user-1", &remote_lists).await);

        fx.engine.fetch_cloud().await;

        // Conflict presented, local untouched, still dirty.
        assert_eq!(fx.view.conflicts.load(Ordering::SeqCst), 1);
        assert_eq!(fx.engine.lists().await, local);
        assert!(fx.engine.is_dirty().await);
        assert_eq!(fx.engine.lifecycle().await, EngineLifecycle::ConflictPending);
    }

    #[tokio::test]
    async fn keep_local_resolution_keeps_local_and_clears_dirty() {
        let fx = fixture();
        login(&fx, "user-1").await;
        fx.engine.add_list("Local Work", NoteColor::Blue).await;
        let local = fx.engine.lists().await;

        let remote_lists = vec![NoteList::new("From Cloud", NoteColor::Green)];
        *fx.remote.snapshot.lock().unwrap() =
            Some(sealed_remote_snapshot("user-1", &remote_lists).await);
        fx.engine.fetch_cloud().await;

        fx.engine.resolve_conflict(ConflictChoice::KeepLocal).await;

        assert_eq!(fx.engine.lists().await, local);
        assert!(!fx.engine.is_dirty().await);
        assert_eq!(fx.engine.lifecycle().await, EngineLifecycle::Synced);
    }

    #[tokio::test]
    async fn keep_cloud_resolution_adopts_buffer_and_clears_dirty() {
        let fx = fixture();
        login(&fx, "user-1").await;
        fx.engine.add_list("Local Work", NoteColor::Blue).await;

        let remote_lists = vec![NoteList::new("From Cloud", NoteColor::Green)];
        *fx.remote.snapshot.lock().unwrap() =
            Some(sealed_remote_snapshot("user-1", &remote_lists).await);
        fx.engine.fetch_cloud().await;

        fx.engine.resolve_conflict(ConflictChoice::KeepCloud).await;

        assert_eq!(fx.engine.lists().await, remote_lists);
        assert!(!fx.engine.is_dirty().await);
    }

    #[tokio::test]
    async fn failed_manual_sync_keeps_dirty_and_shows_retry() {
        let fx = fixture();
        login(&fx, "user-1").await;
        let list_id = fx.engine.add_list("Unsaved", NoteColor::Yellow).await;
        let before = fx.engine.lists().await;
        *fx.remote.fail_saves.lock().unwrap() = true;

        assert!(fx.engine.sync_now().await.is_err());

        assert!(fx.engine.is_dirty().await);
        assert_eq!(fx.engine.lists().await, before);
        assert_eq!(
            fx.view.statuses.lock().unwrap().last(),
            Some(&SyncStatus::RetryNeeded)
        );

        // Next trigger retries with current (further mutated) state.
        *fx.remote.fail_saves.lock().unwrap() = false;
        fx.engine.add_task(&list_id, "added after failure").await.unwrap();
        fx.engine.sync_now().await.unwrap();

        assert!(!fx.engine.is_dirty().await);
        assert_eq!(fx.remote.saves.load(Ordering::SeqCst), 1);
        assert_eq!(
            fx.view.statuses.lock().unwrap().last(),
            Some(&SyncStatus::Synced)
        );
    }

    #[tokio::test]
    async fn logout_locks_and_clears_the_panel() {
        let fx = fixture();
        login(&fx, "user-1").await;
        fx.engine.add_list("Private", NoteColor::Purple).await;

        fx.store.remove(SESSION_USER_KEY).await.unwrap();
        fx.engine.poll_identity().await;

        assert_eq!(fx.engine.lifecycle().await, EngineLifecycle::Locked);
        assert!(fx.engine.lists().await.is_empty());
        assert_eq!(fx.view.cleared.load(Ordering::SeqCst), 1);
        assert_eq!(
            fx.view.statuses.lock().unwrap().last(),
            Some(&SyncStatus::Hidden)
        );
    }

    #[tokio::test]
    async fn switching_users_never_leaks_lists_across_accounts() {
        let fx = fixture();
        login(&fx, "user-1").await;
        fx.engine.add_list("Alice Only", NoteColor::Pink).await;

        login(&fx, "user-2-longer").await;

        let lists = fx.engine.lists().await;
        assert!(lists.iter().all(|l| l.title != "Alice Only"));
        // user-2 starts from the seeded defaults.
        assert_eq!(lists.len(), 2);
    }

    #[tokio::test]
    async fn corrupt_local_blob_falls_back_to_defaults() {
        let fx = fixture();
        fx.store
            .set(&notes_blob_key(&UserId::from("user-1")), "not an envelope")
            .await
            .unwrap();

        login(&fx, "user-1").await;

        assert_eq!(fx.engine.lists().await.len(), 2);
        assert_eq!(fx.engine.lifecycle().await, EngineLifecycle::Synced);
    }

    #[tokio::test]
    async fn delete_flow_requires_confirmation() {
        let fx = fixture();
        login(&fx, "user-1").await;
        let id = fx.engine.lists().await[0].id.clone();

        fx.engine.request_delete(id.clone()).await.unwrap();
        fx.engine.cancel_delete().await;
        assert_eq!(fx.engine.lists().await.len(), 2);

        fx.engine.request_delete(id.clone()).await.unwrap();
        fx.engine.confirm_delete().await;
        let lists = fx.engine.lists().await;
        assert_eq!(lists.len(), 1);
        assert!(lists.iter().all(|l| l.id != id));
        assert!(fx.engine.is_dirty().await);
    }

    #[tokio::test]
    async fn text_edits_mark_dirty_without_full_rerender() {
        let fx = fixture();
        login(&fx, "user-1").await;
        let id = fx.engine.lists().await[0].id.clone();
        let renders_before = fx.view.renders.load(Ordering::SeqCst);

        fx.engine.rename_list(&id, "Majors Watchlist").await.unwrap();

        assert!(fx.engine.is_dirty().await);
        assert_eq!(fx.view.renders.load(Ordering::SeqCst), renders_before);
    }
}
