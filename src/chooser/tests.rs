use super::*;
use crate::config::ChooserSettings;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn candidate(label: &str) -> Candidate {
    Candidate {
        path: PathBuf::from("/nonexistent").join(label),
        label: label.to_string(),
        duration: None,
    }
}

fn labels(cands: &[Candidate]) -> Vec<&str> {
    cands.iter().map(|c| c.label.as_str()).collect()
}

#[test]
fn scan_filters_non_audio_and_sorts_case_insensitive() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
    fs::write(dir.path().join("notes.txt"), b"ignore me").unwrap();

    let cands = scan(dir.path(), &ChooserSettings::default());
    assert_eq!(labels(&cands), vec!["A.ogg", "b.MP3"]);
    assert!(cands.iter().all(|c| c.duration.is_none()));
}

#[test]
fn scan_respects_recursion_and_hidden_settings() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::create_dir(dir.path().join(".cache")).unwrap();
    fs::write(dir.path().join("top.wav"), b"x").unwrap();
    fs::write(dir.path().join("sub").join("nested.wav"), b"x").unwrap();
    fs::write(dir.path().join(".cache").join("hidden.wav"), b"x").unwrap();
    fs::write(dir.path().join(".dot.wav"), b"x").unwrap();

    let defaults = ChooserSettings::default();
    let nested = Path::new("sub").join("nested.wav");
    let cands = scan(dir.path(), &defaults);
    assert_eq!(
        labels(&cands),
        vec![nested.to_str().unwrap(), "top.wav"]
    );

    let flat = ChooserSettings {
        recursive: false,
        ..ChooserSettings::default()
    };
    assert_eq!(labels(&scan(dir.path(), &flat)), vec!["top.wav"]);

    let with_hidden = ChooserSettings {
        include_hidden: true,
        ..ChooserSettings::default()
    };
    assert_eq!(scan(dir.path(), &with_hidden).len(), 4);
}

#[test]
fn scan_accepts_extensions_with_dots_and_case() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.M4A"), b"x").unwrap();
    fs::write(dir.path().join("b.mp3"), b"x").unwrap();

    let s = ChooserSettings {
        extensions: vec![".m4a".to_string(), "  ".to_string()],
        ..ChooserSettings::default()
    };
    assert_eq!(labels(&scan(dir.path(), &s)), vec!["a.M4A"]);
}

#[test]
fn fuzzy_match_is_subsequence_and_case_insensitive() {
    assert_eq!(fuzzy_match_positions("Brief.mp3", "bm3"), Some(vec![0, 6, 8]));
    assert!(fuzzy_match_positions("Brief.mp3", "BRIEF").is_some());
    assert!(fuzzy_match_positions("Brief.mp3", "xyz").is_none());
    assert_eq!(fuzzy_match_positions("anything", ""), Some(vec![]));
}

#[test]
fn filter_narrows_view_and_keeps_selection_visible() {
    let mut c = FileChooser::new(PathBuf::from("/music"));
    c.open_with(vec![candidate("alpha.mp3"), candidate("beta.mp3"), candidate("gamma.wav")]);
    assert!(c.open);
    assert_eq!(c.display_indices(), vec![0, 1, 2]);

    c.enter_filter_mode();
    for ch in "wav".chars() {
        c.push_filter_char(ch);
    }
    assert_eq!(c.display_indices(), vec![2]);
    assert_eq!(c.selected, 2);

    c.pop_filter_char();
    c.pop_filter_char();
    c.pop_filter_char();
    assert_eq!(c.display_indices().len(), 3);

    c.push_filter_char('z');
    assert!(c.display_indices().is_empty());
    assert!(c.selected_candidate().is_none());

    c.clear_filter();
    assert!(!c.filter_mode);
    assert_eq!(c.display_indices().len(), 3);
}

#[test]
fn navigation_wraps_within_visible_candidates() {
    let mut c = FileChooser::new(PathBuf::from("/music"));
    c.open_with(vec![candidate("a.mp3"), candidate("b.mp3"), candidate("c.mp3")]);

    c.prev();
    assert_eq!(c.selected, 2);
    c.next();
    assert_eq!(c.selected, 0);
    c.select_last();
    assert_eq!(c.selected, 2);
    c.select_first();
    assert_eq!(c.selected, 0);
}

#[test]
fn cancel_yields_empty_selection_and_closes() {
    let mut c = FileChooser::new(PathBuf::from("/music"));
    c.open_with(vec![candidate("a.mp3")]);
    assert!(c.cancel().is_empty());
    assert!(!c.open);
}

#[test]
fn confirm_reads_highlighted_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.mp3"), b"aaa").unwrap();
    fs::write(dir.path().join("b.wav"), b"bbb").unwrap();

    let mut c = FileChooser::new(dir.path().to_path_buf());
    c.open_with(scan(dir.path(), &ChooserSettings::default()));
    c.next();

    let files = c.confirm().unwrap();
    assert!(!c.open);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "b.wav");
    assert_eq!(&files[0].bytes[..], b"bbb");
}

#[test]
fn confirm_with_nothing_visible_is_empty() {
    let mut c = FileChooser::new(PathBuf::from("/music"));
    c.open_with(Vec::new());
    assert!(c.confirm().unwrap().is_empty());
}

#[test]
fn confirm_reports_unreadable_file() {
    let mut c = FileChooser::new(PathBuf::from("/nonexistent"));
    c.open_with(vec![candidate("gone.mp3")]);
    assert!(c.confirm().is_err());
    assert!(!c.open);
}
