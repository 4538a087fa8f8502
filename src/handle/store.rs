//! Opaque references to in-memory file bytes.
//!
//! This is the process-local equivalent of object URLs: creating a reference
//! registers the bytes under a fresh token, revoking it drops the
//! registration, and any later `resolve` of that token fails.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::file::SelectedFile;

/// Shared, immutable file bytes.
pub type Bytes = Arc<[u8]>;

const SCHEME: &str = "blob:briefing/";

/// An opaque token addressing bytes registered in an `ObjectStore`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef(String);

impl ObjectRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference creation/revocation API.
pub trait ObjectStore {
    /// Register the bytes of `file` and return a fresh reference to them.
    fn create_ref(&self, file: &SelectedFile) -> ObjectRef;

    /// Invalidate `reference`. Unknown or already revoked references are ignored.
    fn revoke_ref(&self, reference: &ObjectRef);

    /// Look up the bytes behind `reference`, or `None` once it was revoked.
    fn resolve(&self, reference: &ObjectRef) -> Option<Bytes>;
}

/// Thread-safe in-memory `ObjectStore`.
///
/// Shared between the UI thread, which creates and revokes references, and
/// the audio thread, which only resolves them.
#[derive(Debug, Default)]
pub struct MemoryStore {
    next_id: AtomicU64,
    objects: Mutex<HashMap<ObjectRef, Bytes>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of references that currently resolve.
    #[cfg(test)]
    pub fn live_count(&self) -> usize {
        self.objects().len()
    }

    fn objects(&self) -> MutexGuard<'_, HashMap<ObjectRef, Bytes>> {
        self.objects.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ObjectStore for MemoryStore {
    fn create_ref(&self, file: &SelectedFile) -> ObjectRef {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let reference = ObjectRef(format!("{SCHEME}{id}"));
        self.objects()
            .insert(reference.clone(), Arc::clone(&file.bytes));
        reference
    }

    fn revoke_ref(&self, reference: &ObjectRef) {
        self.objects().remove(reference);
    }

    fn resolve(&self, reference: &ObjectRef) -> Option<Bytes> {
        self.objects().get(reference).cloned()
    }
}
