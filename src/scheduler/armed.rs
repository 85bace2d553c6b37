use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::task::AbortHandle;
use uuid::Uuid;

/// The set of actions that currently have a live timer.
///
/// This is a process-local cache over the durable store, keyed by action id.
/// Losing it (restart) loses nothing: the sweeper rebuilds it from the store.
#[derive(Default)]
pub struct ArmedTimers {
    handles: DashMap<Uuid, AbortHandle>,
}

impl ArmedTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a timer for `id`, spawning it via `spawn` only if no timer for
    /// that id exists yet. Returns false (without spawning) when already
    /// armed, so a sweep re-reading a row it armed last cycle is a no-op.
    ///
    /// The slot is reserved before `spawn` runs, so two concurrent arms for
    /// the same id cannot both create a timer.
    pub fn arm_with<F>(&self, id: Uuid, spawn: F) -> bool
    where
        F: FnOnce() -> AbortHandle,
    {
        match self.handles.entry(id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(spawn());
                true
            }
        }
    }

    /// Abort the timer for `id` if one exists. Unknown ids are a no-op; the
    /// caller usually cannot know whether the action was armed.
    pub fn cancel(&self, id: Uuid) -> bool {
        match self.handles.remove(&id) {
            Some((_, handle)) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Drop the handle for a timer that has fired. The task is already done;
    /// nothing is aborted.
    pub fn disarm(&self, id: Uuid) {
        self.handles.remove(&id);
    }

    pub fn is_armed(&self, id: Uuid) -> bool {
        self.handles.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
