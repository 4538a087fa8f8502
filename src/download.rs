//! Save-to-disk trigger.
//!
//! A `DownloadLink` is built for one button press, bound to a reference and a
//! suggested file name, activated once, then dropped.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::handle::{ObjectRef, ObjectStore};

#[derive(Debug)]
pub struct DownloadLink {
    href: ObjectRef,
    download: String,
}

impl DownloadLink {
    pub fn new(href: ObjectRef, download: impl Into<String>) -> Self {
        Self {
            href,
            download: download.into(),
        }
    }

    /// Write the bytes behind the link into `dir` and return the saved path.
    ///
    /// Existing files are never overwritten; a numbered variant of the name is
    /// used instead.
    pub fn activate<S: ObjectStore + ?Sized>(self, store: &S, dir: &Path) -> Result<PathBuf> {
        let bytes = store
            .resolve(&self.href)
            .ok_or_else(|| Error::UnknownReference(self.href.to_string()))?;

        let name = safe_file_name(&self.download)
            .ok_or_else(|| Error::InvalidName(self.download.clone()))?;
        fs::create_dir_all(dir)?;

        let mut attempt = 0;
        loop {
            let path = dir.join(numbered_name(&name, attempt));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    write_or_discard(file, &path, &bytes)?;
                    tracing::info!(path = %path.display(), bytes = bytes.len(), "saved copy");
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Write `bytes` through `out`; on failure the partial file at `path` is removed.
fn write_or_discard<W: Write>(mut out: W, path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Err(e) = out.write_all(bytes) {
        drop(out);
        let _ = fs::remove_file(path);
        return Err(e);
    }
    Ok(())
}

/// The final path component of `name`, so a save cannot escape its directory.
///
/// `None` when nothing usable is left (`""`, `".."`, `"dir/"`).
pub fn safe_file_name(name: &str) -> Option<String> {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.trim().is_empty())
}

/// `brief.mp3`, `brief (1).mp3`, `brief (2).mp3`, ...
fn numbered_name(name: &str, attempt: usize) -> String {
    if attempt == 0 {
        return name.to_string();
    }
    let path = Path::new(name);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => format!(
            "{} ({attempt}).{}",
            stem.to_string_lossy(),
            ext.to_string_lossy()
        ),
        _ => format!("{name} ({attempt})"),
    }
}
