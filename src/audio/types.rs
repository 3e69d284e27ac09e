//! Audio-related small types, traits and shared handles.
//!
//! This module defines the playback state machine states, the handle and
//! backend traits the controller drives, and the state shared with the
//! progress sampler.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::library::Track;

use super::error::PlayerError;

/// The playback state of a session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// An open, playable audio stream. Dropping the handle releases it.
pub trait Playback: Send {
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    /// Total length of the track; zero when unknown.
    fn duration(&self) -> Duration;
    fn position(&self) -> Duration;
    fn seek(&mut self, to: Duration) -> Result<(), PlayerError>;
    /// Whether the stream has run out of audio.
    fn is_finished(&self) -> bool;
}

/// Something that can turn a catalog entry into a playback handle.
pub trait Backend {
    type Handle: Playback + 'static;

    /// Open `track`. Fails for missing, unreadable or undecodable files.
    fn open(&self, track: &Track) -> Result<Self::Handle, PlayerError>;
}

/// What the library screen hands to a new playback session.
#[derive(Debug, Clone)]
pub struct Selection {
    pub catalog: Vec<Track>,
    pub title: String,
    pub index: usize,
}

/// Progress bar model shared between the controller and the sampler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressInfo {
    /// Length of the current track.
    pub max: Duration,
    /// Thumb position: sampled playback position, or the dragged value.
    pub value: Duration,
    /// The user is holding the thumb; sampled positions are not written.
    pub dragging: bool,
}

impl ProgressInfo {
    /// Fraction of the track played, in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.max.is_zero() {
            return 0.0;
        }
        (self.value.as_secs_f64() / self.max.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub(crate) fn clamp(&self, value: Duration) -> Duration {
        if self.max.is_zero() {
            value
        } else {
            value.min(self.max)
        }
    }
}

pub type ProgressHandle = Arc<Mutex<ProgressInfo>>;

/// The slot holding the session's live handle.
///
/// The controller swaps handles in and out under this lock, and the sampler
/// reads through it, so a sample never sees a handle mid-replacement.
pub(crate) struct Deck<H> {
    pub handle: Option<H>,
    /// The current track reached its end; sampling pauses until the next one.
    pub finished: bool,
}

impl<H> Default for Deck<H> {
    fn default() -> Self {
        Self {
            handle: None,
            finished: false,
        }
    }
}

pub(crate) type DeckHandle<H> = Arc<Mutex<Deck<H>>>;
