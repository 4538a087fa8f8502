//! UI rendering for the terminal user interface.
//!
//! `draw` paints the widget's `Surface` plus the chooser popup, using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, LineGauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, PlaybackState};
use crate::chooser::{FileChooser, fuzzy_match_positions};
use crate::config::{ControlsSettings, UiSettings};
use crate::handle::ObjectStore;
use crate::widget::{NOW_PLAYING, Panel, UPLOAD_HINT, UPLOAD_PROMPT};

const LEFT_PAD: Padding = Padding {
    left: 1,
    right: 0,
    top: 0,
    bottom: 0,
};

/// Render the controls help text for the current state.
fn controls_text(loaded: bool, chooser_open: bool, scrub_seconds: u64) -> String {
    let items: Vec<String> = if chooser_open {
        vec![
            "[j/k] up/down".into(),
            "[gg/G] top/bottom".into(),
            "[/] filter".into(),
            "[enter] choose".into(),
            "[esc/q] cancel".into(),
        ]
    } else if loaded {
        vec![
            "[space/p] play/pause".into(),
            format!("[H/L] scrub -/+{scrub_seconds}s"),
            "[s] stop".into(),
            "[enter/u] download".into(),
            "[o] open another".into(),
            "[q] quit".into(),
        ]
    } else {
        vec!["[enter/u] upload".into(), "[q] quit".into()]
    };
    items.join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Format an optional duration, rounding up partial seconds.
fn format_duration_mmss_ceil(d: Option<Duration>) -> String {
    let Some(d) = d else {
        return "-".to_string();
    };

    let mut total_secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        total_secs = total_secs.saturating_add(1);
    }
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Uppercase the characters of `label` that matched the filter query.
fn highlight_matches(label: &str, query: &str) -> String {
    let Some(positions) = fuzzy_match_positions(label, query) else {
        return label.to_string();
    };
    let mut rendered = String::new();
    let mut pos_iter = positions.into_iter();
    let mut next_pos = pos_iter.next();
    for (ci, ch) in label.chars().enumerate() {
        if next_pos == Some(ci) {
            rendered.extend(ch.to_uppercase());
            next_pos = pos_iter.next();
        } else {
            rendered.push(ch);
        }
    }
    rendered
}

/// Render the entire UI into the provided `frame`.
pub fn draw<S: ObjectStore>(
    frame: &mut Frame,
    app: &App<S>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let surface = app.widget.view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(vec![
        Line::from(ui_settings.header_text.as_str()).bold(),
        Line::from(surface.date),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" briefing ")
            .title_alignment(Alignment::Center),
    );
    frame.render_widget(header, chunks[0]);

    // Body
    let body_block = Block::bordered().padding(LEFT_PAD);
    match surface.panel {
        Panel::Empty => {
            let body = Paragraph::new(vec![
                Line::default(),
                Line::from(UPLOAD_PROMPT),
                Line::from(UPLOAD_HINT).dim(),
            ])
            .alignment(Alignment::Center)
            .block(body_block);
            frame.render_widget(body, chunks[1]);
        }
        Panel::Loaded { file_name, .. } => {
            let inner = body_block.inner(chunks[1]);
            frame.render_widget(body_block, chunks[1]);

            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Min(0),
                ])
                .split(inner);

            frame.render_widget(Paragraph::new(NOW_PLAYING).bold(), rows[0]);
            frame.render_widget(Paragraph::new(file_name), rows[1]);

            let info = app.playback_info().unwrap_or_default();
            let symbol = match app.playback {
                PlaybackState::Playing => "▶",
                PlaybackState::Paused => "⏸",
                PlaybackState::Stopped => "■",
            };
            let ratio = match info.total {
                Some(total) if !total.is_zero() => {
                    (info.elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
                }
                _ => 0.0,
            };
            let total = info.total.map(format_mmss).unwrap_or_else(|| "--:--".into());
            let gauge = LineGauge::default()
                .filled_style(Style::default().add_modifier(Modifier::BOLD))
                .label(format!("{symbol} {} / {total}", format_mmss(info.elapsed)))
                .ratio(ratio);
            frame.render_widget(gauge, rows[2]);

            if let Some(err) = &info.error {
                frame.render_widget(Paragraph::new(err.as_str()).red(), rows[3]);
            }
        }
    }

    // Button
    let button = Paragraph::new(format!("[ {} ]", surface.button.label()))
        .alignment(Alignment::Center)
        .bold()
        .block(Block::bordered());
    frame.render_widget(button, chunks[2]);

    // Status line
    if let Some(status) = &app.status {
        frame.render_widget(Paragraph::new(format!(" {status}")).italic(), chunks[3]);
    }

    if app.chooser.open {
        draw_chooser(frame, &app.chooser, chunks[1]);
    }

    let footer_text = controls_text(
        surface.is_loaded(),
        app.chooser.open,
        controls_settings.scrub_seconds,
    );
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(LEFT_PAD),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}

/// Overlay the chooser popup inside `area`.
fn draw_chooser(frame: &mut Frame, chooser: &FileChooser, area: Rect) {
    let popup_area = centered_rect_sized(72, 16, area);
    frame.render_widget(Clear, popup_area);

    let q = chooser.filter_query.trim();
    let display = chooser.display_indices();
    let candidates = chooser.candidates();

    let items: Vec<ListItem> = display
        .iter()
        .map(|&i| {
            let c = &candidates[i];
            let label = if q.is_empty() {
                c.label.clone()
            } else {
                highlight_matches(&c.label, q)
            };
            ListItem::new(format!("{label}  [{}]", format_duration_mmss_ceil(c.duration)))
        })
        .collect();

    let title = if chooser.filter_mode || !q.is_empty() {
        format!(" {} | filter: {q} ", chooser.root().display())
    } else {
        format!(" {} ", chooser.root().display())
    };

    if items.is_empty() {
        let empty = Paragraph::new("No audio files found")
            .dim()
            .block(Block::bordered().title(title).padding(LEFT_PAD));
        frame.render_widget(empty, popup_area);
        return;
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(display.iter().position(|&i| i == chooser.selected));
    frame.render_stateful_widget(list, popup_area, &mut state);
}
