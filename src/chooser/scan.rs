use std::path::Path;

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::ChooserSettings;

use super::model::Candidate;

fn is_audio_file(path: &Path, settings: &ChooserSettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// List the audio files under `dir` that the chooser should offer.
///
/// Labels are paths relative to `dir`; the result is sorted by label,
/// case-insensitively. Unreadable entries are skipped.
pub fn scan(dir: &Path, settings: &ChooserSettings) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !is_audio_file(path, settings) {
            continue;
        }

        let label = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();

        // Tag-less or unknown files still show up, just without a duration.
        let duration = lofty::read_from_path(path)
            .ok()
            .map(|tagged| tagged.properties().duration());

        candidates.push(Candidate {
            path: path.to_path_buf(),
            label,
            duration,
        });
    }

    candidates.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
    tracing::debug!(dir = %dir.display(), count = candidates.len(), "scanned chooser directory");
    candidates
}
