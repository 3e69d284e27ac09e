use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

use super::types::{Deck, DeckHandle, Playback, ProgressHandle, ProgressInfo};

/// Background thread that copies the playback position into the progress bar.
///
/// One sampler lives for the whole session and always reads whatever handle
/// the deck currently holds. It only reads the deck and writes the progress;
/// index and catalog belong to the controller.
pub(super) struct Sampler {
    stop_tx: Sender<()>,
    join: Option<JoinHandle<()>>,
}

impl Sampler {
    pub(super) fn spawn<H: Playback + 'static>(
        deck: DeckHandle<H>,
        progress: ProgressHandle,
        interval: Duration,
    ) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let join = thread::spawn(move || {
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => sample_once(&deck, &progress),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            debug!("sampler stopped");
        });

        Self {
            stop_tx,
            join: Some(join),
        }
    }

    /// Stop the thread and wait for it. Safe to call more than once.
    pub(super) fn stop(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(h) = self.join.take() {
            if h.join().is_err() {
                warn!("sampler thread panicked");
            }
        }
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Take one sample. Lock order is deck, then progress (same as the controller).
pub(super) fn sample_once<H: Playback>(deck: &Mutex<Deck<H>>, progress: &Mutex<ProgressInfo>) {
    let mut deck = match deck.lock() {
        Ok(d) => d,
        Err(_) => {
            warn!("deck lock poisoned; skipping sample");
            return;
        }
    };
    if deck.finished {
        return;
    }
    let Some(handle) = deck.handle.as_ref() else {
        return;
    };

    let position = handle.position();
    let duration = handle.duration();
    let reached_end = if duration.is_zero() {
        handle.is_finished()
    } else {
        position >= duration || handle.is_finished()
    };

    match progress.lock() {
        Ok(mut p) => {
            if !p.dragging {
                p.value = p.clamp(position);
            }
        }
        Err(_) => {
            warn!("progress lock poisoned; skipping sample");
            return;
        }
    }

    if reached_end {
        debug!(?position, ?duration, "track reached its end");
        deck.finished = true;
    }
}
