//! File chooser state: the candidate list, cursor and fuzzy filter.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::handle::SelectedFile;

/// A file the chooser can offer.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    /// Path relative to the chooser root, as shown in the list.
    pub label: String,
    pub duration: Option<Duration>,
}

pub struct FileChooser {
    root: PathBuf,
    candidates: Vec<Candidate>,
    pub selected: usize,
    pub open: bool,
    pub filter_mode: bool,
    pub filter_query: String,
}

impl FileChooser {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            candidates: Vec::new(),
            selected: 0,
            open: false,
            filter_mode: false,
            filter_query: String::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Show the chooser with a fresh candidate list.
    pub fn open_with(&mut self, candidates: Vec<Candidate>) {
        self.candidates = candidates;
        self.selected = 0;
        self.filter_mode = false;
        self.filter_query.clear();
        self.open = true;
    }

    /// Close without choosing anything: an empty selection.
    pub fn cancel(&mut self) -> Vec<SelectedFile> {
        self.open = false;
        self.filter_mode = false;
        Vec::new()
    }

    /// Close and read the highlighted file.
    ///
    /// Yields an empty selection when nothing is visible.
    pub fn confirm(&mut self) -> Result<Vec<SelectedFile>> {
        self.open = false;
        self.filter_mode = false;
        let Some(candidate) = self.selected_candidate() else {
            return Ok(Vec::new());
        };
        let file = SelectedFile::from_path(&candidate.path)?;
        Ok(vec![file])
    }

    pub fn selected_candidate(&self) -> Option<&Candidate> {
        let display = self.display_indices();
        if display.contains(&self.selected) {
            self.candidates.get(self.selected)
        } else {
            None
        }
    }

    /// Indices of candidates matching the current filter, in list order.
    pub fn display_indices(&self) -> Vec<usize> {
        let query = self.filter_query.trim();
        if query.is_empty() {
            return (0..self.candidates.len()).collect();
        }
        (0..self.candidates.len())
            .filter(|&i| fuzzy_match_positions(&self.candidates[i].label, query).is_some())
            .collect()
    }

    /// Move selection to the next visible candidate, wrapping around.
    pub fn next(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            return;
        }
        self.selected = match display.iter().position(|&i| i == self.selected) {
            Some(p) => display[(p + 1) % display.len()],
            None => display[0],
        };
    }

    /// Move selection to the previous visible candidate, wrapping around.
    pub fn prev(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            return;
        }
        self.selected = match display.iter().position(|&i| i == self.selected) {
            Some(0) | None => display[display.len() - 1],
            Some(p) => display[p - 1],
        };
    }

    pub fn select_first(&mut self) {
        if let Some(&first) = self.display_indices().first() {
            self.selected = first;
        }
    }

    pub fn select_last(&mut self) {
        if let Some(&last) = self.display_indices().last() {
            self.selected = last;
        }
    }

    pub fn enter_filter_mode(&mut self) {
        self.filter_mode = true;
    }

    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.filter_mode = false;
        self.ensure_selected_visible();
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter_query.push(c);
        self.ensure_selected_visible();
    }

    pub fn pop_filter_char(&mut self) {
        self.filter_query.pop();
        self.ensure_selected_visible();
    }

    fn ensure_selected_visible(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            self.selected = 0;
        } else if !display.contains(&self.selected) {
            self.selected = display[0];
        }
    }
}

/// Fuzzy/subsequence match: return the character positions in `label`
/// that match `query`, or `None` if not matched.
pub fn fuzzy_match_positions(label: &str, query: &str) -> Option<Vec<usize>> {
    if query.is_empty() {
        return Some(Vec::new());
    }

    let mut positions: Vec<usize> = Vec::new();
    let mut label_iter = label.chars().enumerate();

    for qc in query.chars() {
        let qc_low = qc.to_ascii_lowercase();
        loop {
            match label_iter.next() {
                Some((li, lc)) if lc.to_ascii_lowercase() == qc_low => {
                    positions.push(li);
                    break;
                }
                Some(_) => continue,
                None => return None,
            }
        }
    }

    Some(positions)
}
