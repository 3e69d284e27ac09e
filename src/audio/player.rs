use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{info, warn};

use crate::config::{OpenErrorPolicy, PlaybackSettings};
use crate::library::Track;

use super::error::PlayerError;
use super::queue::{Step, next_index, prev_index};
use super::thread::Sampler;
use super::types::{
    Backend, Deck, DeckHandle, Playback, PlaybackState, ProgressHandle, ProgressInfo, Selection,
};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One playback session: the catalog, the cursor into it and the single live handle.
///
/// All transport operations run on the UI thread. The only other party is the
/// sampler, which reads the deck and writes the progress bar.
pub struct Player<B: Backend> {
    backend: Rc<B>,
    catalog: Vec<Track>,
    index: usize,
    state: PlaybackState,
    title: String,
    policy: OpenErrorPolicy,
    deck: DeckHandle<B::Handle>,
    progress: ProgressHandle,
    sampler: Option<Sampler>,
    last_error: Option<String>,
}

impl<B: Backend> Player<B> {
    /// Start a session on `selection.catalog[selection.index]` and begin playing it.
    pub fn start(
        backend: Rc<B>,
        selection: Selection,
        settings: &PlaybackSettings,
    ) -> Result<Self, PlayerError> {
        let Selection {
            catalog,
            title,
            index,
        } = selection;

        if catalog.is_empty() {
            return Err(PlayerError::EmptyCatalog);
        }
        if index >= catalog.len() {
            return Err(PlayerError::IndexOutOfRange {
                index,
                len: catalog.len(),
            });
        }

        let deck: DeckHandle<B::Handle> = Arc::new(Mutex::new(Deck::default()));
        let progress: ProgressHandle = Arc::new(Mutex::new(ProgressInfo::default()));

        let mut player = Self {
            backend,
            catalog,
            index,
            state: PlaybackState::Stopped,
            title,
            policy: settings.on_open_error,
            deck,
            progress,
            sampler: None,
            last_error: None,
        };

        let requested_title = player.title.clone();
        player.change_track(index, Step::Forward)?;
        if player.index == index {
            player.title = requested_title;
        }

        player.sampler = Some(Sampler::spawn(
            player.deck.clone(),
            player.progress.clone(),
            Duration::from_millis(settings.poll_interval_ms.max(1)),
        ));

        info!(tracks = player.catalog.len(), index = player.index, "playback session started");
        Ok(player)
    }

    /// A track that played to its end counts as stopped until it is restarted.
    pub fn state(&self) -> PlaybackState {
        if self.state == PlaybackState::Playing && self.track_finished() {
            PlaybackState::Stopped
        } else {
            self.state
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn catalog(&self) -> &[Track] {
        &self.catalog
    }

    /// The most recent open/seek failure, if the session is showing one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Snapshot of the progress bar.
    pub fn progress(&self) -> ProgressInfo {
        lock(&self.progress).clone()
    }

    /// Whether the sampler saw the current track play to its end.
    pub fn track_finished(&self) -> bool {
        lock(&self.deck).finished
    }

    /// Pause when playing, resume when paused.
    ///
    /// A track that played to its end is opened again from the start. Does
    /// nothing when no track is loaded.
    pub fn toggle(&mut self) -> Result<(), PlayerError> {
        if self.track_finished() {
            info!(index = self.index, "replaying finished track");
            return self.change_track(self.index, Step::Forward);
        }

        let mut deck = lock(&self.deck);
        let Some(handle) = deck.handle.as_mut() else {
            return Ok(());
        };
        match self.state {
            PlaybackState::Playing => {
                handle.pause();
                self.state = PlaybackState::Paused;
            }
            PlaybackState::Paused => {
                handle.play();
                self.state = PlaybackState::Playing;
            }
            PlaybackState::Stopped => {}
        }
        Ok(())
    }

    /// Skip to the following track, wrapping from the last to the first.
    pub fn next(&mut self) -> Result<(), PlayerError> {
        let target = next_index(self.index, self.catalog.len());
        self.change_track(target, Step::Forward)
    }

    /// Go back one track, wrapping from the first to the last.
    pub fn prev(&mut self) -> Result<(), PlayerError> {
        let target = prev_index(self.index, self.catalog.len());
        self.change_track(target, Step::Backward)
    }

    /// The user grabbed the progress thumb at `value`.
    pub fn seek_press(&mut self, value: Duration) {
        let mut p = lock(&self.progress);
        p.dragging = true;
        p.value = p.clamp(value);
    }

    /// The thumb moved while held. Playback is untouched until release.
    pub fn seek_drag(&mut self, value: Duration) {
        let mut p = lock(&self.progress);
        if p.dragging {
            p.value = p.clamp(value);
        }
    }

    /// Move the thumb by `delta_secs` (keyboard drag), grabbing it if needed.
    pub fn nudge(&mut self, delta_secs: i64) {
        let mut p = lock(&self.progress);
        p.dragging = true;
        let delta = Duration::from_secs(delta_secs.unsigned_abs());
        let moved = if delta_secs < 0 {
            p.value.saturating_sub(delta)
        } else {
            p.value.saturating_add(delta)
        };
        p.value = p.clamp(moved);
    }

    /// Let go of the thumb without seeking.
    pub fn seek_cancel(&mut self) {
        lock(&self.progress).dragging = false;
    }

    /// The thumb was released: commit the dragged value as the new position.
    ///
    /// Returns the position seeked to, or `None` when nothing was being dragged.
    pub fn seek_release(&mut self) -> Result<Option<Duration>, PlayerError> {
        let mut deck = lock(&self.deck);
        let target = {
            let mut p = lock(&self.progress);
            if !p.dragging {
                return Ok(None);
            }
            p.dragging = false;
            p.value
        };

        let Some(handle) = deck.handle.as_mut() else {
            return Ok(None);
        };
        if let Err(err) = handle.seek(target) {
            warn!(error = %err, ?target, "seek failed");
            self.last_error = Some(err.to_string());
            return Err(err);
        }
        let duration = handle.duration();
        if duration.is_zero() || target < duration {
            deck.finished = false;
        }
        Ok(Some(target))
    }

    /// End the session: stop the sampler, then stop and release the handle.
    pub fn shutdown(&mut self) {
        if let Some(mut sampler) = self.sampler.take() {
            sampler.stop();
        }
        if let Some(mut handle) = lock(&self.deck).handle.take() {
            handle.stop();
            info!(index = self.index, "playback session ended");
        }
        self.state = PlaybackState::Stopped;
    }

    /// Move to `start`, trying further tracks in `step` direction under the skip policy.
    fn change_track(&mut self, start: usize, step: Step) -> Result<(), PlayerError> {
        let len = self.catalog.len();
        let attempts = match self.policy {
            OpenErrorPolicy::Skip => len,
            OpenErrorPolicy::Report => 1,
        };

        let mut candidate = start;
        let mut failure = None;
        for _ in 0..attempts {
            match self.install(candidate) {
                Ok(()) => {
                    self.last_error = None;
                    info!(index = candidate, title = %self.title, "now playing");
                    return Ok(());
                }
                Err(err) => {
                    warn!(index = candidate, error = %err, "could not open track");
                    failure = Some(err);
                    candidate = step.apply(candidate, len);
                }
            }
        }

        let err = match (self.policy, failure) {
            (OpenErrorPolicy::Report, Some(err)) => err,
            _ => PlayerError::NoPlayableTrack(len),
        };
        self.index = start;
        self.title = self.catalog[start].display.clone();
        self.state = PlaybackState::Stopped;
        self.last_error = Some(err.to_string());
        Err(err)
    }

    /// Release the current handle, then open and start `index`.
    ///
    /// The old handle is gone before the new one is created, and the progress
    /// bar is reset before the sampler can look at the new handle.
    fn install(&mut self, index: usize) -> Result<(), PlayerError> {
        let mut deck = lock(&self.deck);
        if let Some(mut old) = deck.handle.take() {
            old.stop();
        }
        deck.finished = false;
        self.state = PlaybackState::Stopped;

        let opened = self.backend.open(&self.catalog[index]);
        let duration = match &opened {
            Ok(handle) => handle.duration(),
            Err(_) => Duration::ZERO,
        };
        {
            let mut p = lock(&self.progress);
            p.max = duration;
            p.value = Duration::ZERO;
            p.dragging = false;
        }

        let mut handle = opened?;
        handle.play();
        deck.handle = Some(handle);

        self.index = index;
        self.title = self.catalog[index].display.clone();
        self.state = PlaybackState::Playing;
        Ok(())
    }
}

impl<B: Backend> Drop for Player<B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
