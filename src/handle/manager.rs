use std::sync::Arc;

use super::file::SelectedFile;
use super::store::{ObjectRef, ObjectStore};

/// A live reference to the loaded file.
///
/// The reference is revoked when the handle is dropped, so every way a
/// handle goes away (replacement, explicit release, teardown) releases it
/// exactly once.
pub struct PlayableHandle<S: ObjectStore> {
    store: Arc<S>,
    reference: ObjectRef,
    display_name: String,
}

impl<S: ObjectStore> PlayableHandle<S> {
    fn acquire(store: &Arc<S>, file: &SelectedFile, display_name: &str) -> Self {
        let reference = store.create_ref(file);
        tracing::debug!(%reference, name = display_name, "created file reference");
        Self {
            store: Arc::clone(store),
            reference,
            display_name: display_name.to_string(),
        }
    }

    pub fn reference(&self) -> &ObjectRef {
        &self.reference
    }

    #[cfg(test)]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl<S: ObjectStore> Drop for PlayableHandle<S> {
    fn drop(&mut self) {
        self.store.revoke_ref(&self.reference);
        tracing::debug!(reference = %self.reference, name = %self.display_name, "revoked file reference");
    }
}

/// Owner of the single active `PlayableHandle`.
pub struct HandleManager<S: ObjectStore> {
    store: Arc<S>,
    active: Option<PlayableHandle<S>>,
    file_name: String,
}

impl<S: ObjectStore> HandleManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            active: None,
            file_name: String::new(),
        }
    }

    /// Release the current handle (if any), then make a new one for `file`
    /// and record `name`. Returns the new reference.
    pub fn select(&mut self, file: &SelectedFile, name: &str) -> &ObjectRef {
        // The old reference must be gone before the new one exists.
        self.release();
        let handle = PlayableHandle::acquire(&self.store, file, name);
        self.file_name = name.to_string();
        self.active.insert(handle).reference()
    }

    /// Revoke the active handle. No-op when nothing is active.
    pub fn release(&mut self) {
        if let Some(handle) = self.active.take() {
            drop(handle);
        }
    }

    #[cfg(test)]
    pub fn active(&self) -> Option<&PlayableHandle<S>> {
        self.active.as_ref()
    }

    pub fn reference(&self) -> Option<&ObjectRef> {
        self.active.as_ref().map(PlayableHandle::reference)
    }

    /// The most recently recorded file name (empty when none was recorded).
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

impl<S: ObjectStore> Drop for HandleManager<S> {
    fn drop(&mut self) {
        self.release();
    }
}
