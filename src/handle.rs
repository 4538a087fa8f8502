//! Resource handles for the loaded file.
//!
//! A selected file is turned into an opaque `ObjectRef` by an `ObjectStore`.
//! `HandleManager` keeps at most one such reference alive and revokes it
//! when it is superseded or when the manager is dropped.

mod file;
mod manager;
mod store;

pub use file::SelectedFile;
pub use manager::{HandleManager, PlayableHandle};
pub use store::{Bytes, MemoryStore, ObjectRef, ObjectStore};

#[cfg(test)]
pub(crate) mod testing;
