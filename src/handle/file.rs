use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use super::store::Bytes;

/// A user-selected file: its name and its bytes, held in memory.
#[derive(Clone)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read `path` into memory. The name is the final path component.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, bytes))
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}
