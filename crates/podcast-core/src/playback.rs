//! Audio playback coordinator.
//!
//! Owns "what is playing" and nothing else. Each operation returns the
//! command the audio backend should run, or `None` when the call was a
//! no-op, so the state machine stays testable without a real player.
//!
//! ```text
//!   Idle ──play──▶ Playing ──pause──▶ Paused
//!    ▲               ▲  │               │
//!    │               │  └──resume◀──────┘
//!    └──stop / track_ended──────────────┘
//! ```

use tracing::{debug, warn};

use crate::model::Track;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing(Track),
    Paused(Track),
}

/// Instruction for the audio backend.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    Load { src: String },
    Pause,
    Resume,
    Seek { secs: f64 },
    Stop,
}

#[derive(Debug, Default)]
pub struct PlaybackCoordinator {
    state: PlaybackState,
    /// Last requested position, seconds into the track.
    seek_position: Option<f64>,
}

impl PlaybackCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// The current track, playing or paused.
    pub fn now_playing(&self) -> Option<&Track> {
        match &self.state {
            PlaybackState::Idle => None,
            PlaybackState::Playing(t) | PlaybackState::Paused(t) => Some(t),
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing(_))
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.state, PlaybackState::Paused(_))
    }

    pub fn seek_position(&self) -> Option<f64> {
        self.seek_position
    }

    /// Replace whatever is playing. Tracks without audio are refused.
    pub fn play(&mut self, track: Track) -> Option<PlayerCommand> {
        if track.src.trim().is_empty() {
            warn!("playback: refusing track without audio: {}", track.episode_id);
            return None;
        }
        debug!("playback: play {} ({})", track.episode_id, track.src);
        let src = track.src.clone();
        self.state = PlaybackState::Playing(track);
        self.seek_position = None;
        Some(PlayerCommand::Load { src })
    }

    pub fn pause(&mut self) -> Option<PlayerCommand> {
        match std::mem::take(&mut self.state) {
            PlaybackState::Playing(t) => {
                debug!("playback: pause {}", t.episode_id);
                self.state = PlaybackState::Paused(t);
                Some(PlayerCommand::Pause)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    pub fn resume(&mut self) -> Option<PlayerCommand> {
        match std::mem::take(&mut self.state) {
            PlaybackState::Paused(t) => {
                debug!("playback: resume {}", t.episode_id);
                self.state = PlaybackState::Playing(t);
                Some(PlayerCommand::Resume)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Pause when playing, resume when paused.
    pub fn toggle_pause(&mut self) -> Option<PlayerCommand> {
        match self.state {
            PlaybackState::Playing(_) => self.pause(),
            PlaybackState::Paused(_) => self.resume(),
            PlaybackState::Idle => None,
        }
    }

    pub fn stop(&mut self) -> Option<PlayerCommand> {
        if self.state == PlaybackState::Idle {
            return None;
        }
        debug!("playback: stop");
        self.state = PlaybackState::Idle;
        self.seek_position = None;
        Some(PlayerCommand::Stop)
    }

    pub fn seek(&mut self, secs: f64) -> Option<PlayerCommand> {
        if self.state == PlaybackState::Idle {
            return None;
        }
        let secs = secs.max(0.0);
        self.seek_position = Some(secs);
        Some(PlayerCommand::Seek { secs })
    }

    /// The backend reported end of file. No command: the player is
    /// already stopped.
    pub fn track_ended(&mut self) {
        if self.state != PlaybackState::Idle {
            debug!("playback: track ended");
            self.state = PlaybackState::Idle;
            self.seek_position = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShowId;

    fn track(id: &str) -> Track {
        Track {
            src: format!("https://cdn.test/{}.mp3", id),
            title: format!("Episode {}", id),
            show_title: "Night Shift".into(),
            show_id: ShowId::from("42"),
            episode_id: id.to_string(),
            season_index: 0,
        }
    }

    #[test]
    fn full_cycle() {
        let mut p = PlaybackCoordinator::new();
        assert_eq!(p.pause(), None);
        assert_eq!(p.resume(), None);

        assert_eq!(
            p.play(track("a")),
            Some(PlayerCommand::Load {
                src: "https://cdn.test/a.mp3".into()
            })
        );
        assert!(p.is_playing());
        assert_eq!(p.resume(), None);
        assert_eq!(p.pause(), Some(PlayerCommand::Pause));
        assert!(p.is_paused());
        assert_eq!(p.pause(), None);
        assert_eq!(p.resume(), Some(PlayerCommand::Resume));
        assert_eq!(p.stop(), Some(PlayerCommand::Stop));
        assert!(p.now_playing().is_none());
        assert_eq!(p.stop(), None);
    }

    #[test]
    fn play_replaces_from_any_state() {
        let mut p = PlaybackCoordinator::new();
        p.play(track("a"));
        p.pause();
        p.play(track("b"));
        assert!(p.is_playing());
        assert_eq!(p.now_playing().map(|t| t.episode_id.as_str()), Some("b"));
    }

    #[test]
    fn empty_src_is_refused() {
        let mut p = PlaybackCoordinator::new();
        p.play(track("a"));
        let mut silent = track("b");
        silent.src = "  ".into();
        assert_eq!(p.play(silent), None);
        assert_eq!(p.now_playing().map(|t| t.episode_id.as_str()), Some("a"));
    }

    #[test]
    fn seek_requires_a_track() {
        let mut p = PlaybackCoordinator::new();
        assert_eq!(p.seek(30.0), None);
        p.play(track("a"));
        assert_eq!(p.seek(-5.0), Some(PlayerCommand::Seek { secs: 0.0 }));
        assert_eq!(p.seek(90.0), Some(PlayerCommand::Seek { secs: 90.0 }));
        assert_eq!(p.seek_position(), Some(90.0));
        p.track_ended();
        assert_eq!(*p.state(), PlaybackState::Idle);
        assert_eq!(p.seek_position(), None);
    }

    #[test]
    fn toggle_pause_flips() {
        let mut p = PlaybackCoordinator::new();
        assert_eq!(p.toggle_pause(), None);
        p.play(track("a"));
        assert_eq!(p.toggle_pause(), Some(PlayerCommand::Pause));
        assert_eq!(p.toggle_pause(), Some(PlayerCommand::Resume));
    }
}
