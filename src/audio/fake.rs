//! In-memory backend for exercising the controller without a sound card.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::library::Track;

use super::error::PlayerError;
use super::types::{Backend, Playback};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Play(PathBuf),
    Pause(PathBuf),
    Stop(PathBuf),
    Seek(PathBuf, Duration),
    Released(PathBuf),
}

#[derive(Default)]
pub struct FakeBackend {
    pub live: Arc<AtomicUsize>,
    pub max_live: Arc<AtomicUsize>,
    pub opened: Arc<Mutex<Vec<PathBuf>>>,
    pub calls: Arc<Mutex<Vec<Call>>>,
    /// Playback position reported by every handle.
    pub position: Arc<Mutex<Duration>>,
    pub broken: HashSet<PathBuf>,
    /// Tracks whose handles report a zero (unknown) duration.
    pub unknown_length: HashSet<PathBuf>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_broken(mut self, path: &str) -> Self {
        self.broken.insert(PathBuf::from(path));
        self
    }

    pub fn with_unknown_length(mut self, path: &str) -> Self {
        self.unknown_length.insert(PathBuf::from(path));
        self
    }

    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn max_live(&self) -> usize {
        self.max_live.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_position(&self, pos: Duration) {
        *self.position.lock().unwrap() = pos;
    }
}

/// Every fake track is as long as its file stem has characters, in minutes.
pub fn fake_duration(path: &Path) -> Duration {
    let stem_len = path
        .file_stem()
        .map(|s| s.to_string_lossy().chars().count())
        .unwrap_or(1);
    Duration::from_secs(60 * stem_len as u64)
}

impl Backend for FakeBackend {
    type Handle = FakeHandle;

    fn open(&self, track: &Track) -> Result<FakeHandle, PlayerError> {
        self.opened.lock().unwrap().push(track.path.clone());
        if self.broken.contains(&track.path) {
            return Err(PlayerError::Open {
                path: track.path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, "corrupt"),
            });
        }

        let now = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_live.fetch_max(now, Ordering::SeqCst);

        let length = fake_duration(&track.path);
        let duration = if self.unknown_length.contains(&track.path) {
            Duration::ZERO
        } else {
            length
        };

        Ok(FakeHandle {
            path: track.path.clone(),
            duration,
            length,
            live: self.live.clone(),
            calls: self.calls.clone(),
            position: self.position.clone(),
        })
    }
}

pub struct FakeHandle {
    path: PathBuf,
    duration: Duration,
    length: Duration,
    live: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<Call>>>,
    position: Arc<Mutex<Duration>>,
}

impl FakeHandle {
    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Playback for FakeHandle {
    fn play(&mut self) {
        self.record(Call::Play(self.path.clone()));
    }

    fn pause(&mut self) {
        self.record(Call::Pause(self.path.clone()));
    }

    fn stop(&mut self) {
        self.record(Call::Stop(self.path.clone()));
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn position(&self) -> Duration {
        *self.position.lock().unwrap()
    }

    fn seek(&mut self, to: Duration) -> Result<(), PlayerError> {
        *self.position.lock().unwrap() = to;
        self.record(Call::Seek(self.path.clone(), to));
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.position() >= self.length
    }
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
        self.record(Call::Released(self.path.clone()));
    }
}
