use std::sync::{Mutex, PoisonError};

use super::{Bytes, MemoryStore, ObjectRef, ObjectStore, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Created(ObjectRef),
    Revoked(ObjectRef),
}

/// `MemoryStore` that logs every create/revoke call in order.
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    events: Mutex<Vec<StoreEvent>>,
}

impl RecordingStore {
    pub fn events(&self) -> Vec<StoreEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn revocations_of(&self, reference: &ObjectRef) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, StoreEvent::Revoked(r) if r == reference))
            .count()
    }

    pub fn live_count(&self) -> usize {
        self.inner.live_count()
    }

    fn push(&self, event: StoreEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl ObjectStore for RecordingStore {
    fn create_ref(&self, file: &SelectedFile) -> ObjectRef {
        let r = self.inner.create_ref(file);
        self.push(StoreEvent::Created(r.clone()));
        r
    }

    fn revoke_ref(&self, reference: &ObjectRef) {
        self.inner.revoke_ref(reference);
        self.push(StoreEvent::Revoked(reference.clone()));
    }

    fn resolve(&self, reference: &ObjectRef) -> Option<Bytes> {
        self.inner.resolve(reference)
    }
}

pub fn file(name: &str) -> SelectedFile {
    SelectedFile::new(name, format!("bytes of {name}").into_bytes())
}
