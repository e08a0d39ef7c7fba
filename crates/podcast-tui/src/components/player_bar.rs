//! PlayerBar: the persistent now-playing line above the status bar.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use podcast_core::playback::PlaybackState;

use crate::app_state::AppState;

/// `m:ss`, or `h:mm:ss` past the hour. Negative and NaN render as zero.
pub fn format_time(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs as u64
    } else {
        0
    };
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let palette = &state.palette;
    let (icon, color, track) = match state.playback.state() {
        PlaybackState::Playing(t) => ("▶", palette.playing, Some(t)),
        PlaybackState::Paused(t) => ("⏸", palette.paused, Some(t)),
        PlaybackState::Idle => ("■", palette.muted, None),
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", icon),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];

    match track {
        Some(track) => {
            spans.push(Span::styled(
                track.show_title.as_str(),
                palette.style_secondary(),
            ));
            spans.push(Span::styled(" · ", palette.style_muted()));
            spans.push(Span::styled(
                track.title.as_str(),
                Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
            ));
            let info = &state.playback_info;
            let pos = info
                .time_pos_secs
                .or(state.playback.seek_position())
                .unwrap_or(0.0);
            let time = match info.duration_secs {
                Some(d) => format!("  {} / {}", format_time(pos), format_time(d)),
                None => format!("  {}", format_time(pos)),
            };
            spans.push(Span::styled(time, Style::default().fg(palette.date)));
        }
        None => spans.push(Span::styled("nothing playing", palette.style_muted())),
    }

    if !state.audio_available {
        spans.push(Span::styled("  (no audio backend)", Style::default().fg(palette.error)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(palette.filter_bg)),
        area,
    );
}
