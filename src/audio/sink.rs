//! `rodio` implementation of the playback backend.
//!
//! Each handle is its own `Sink` on the shared output stream; opening a file
//! decodes its header up front so broken files fail at construction time.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::debug;

use crate::library::Track;

use super::error::PlayerError;
use super::types::{Backend, Playback};

pub struct RodioBackend {
    stream: OutputStream,
}

impl RodioBackend {
    /// Open the default audio output device.
    pub fn open_default() -> Result<Self, PlayerError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlayerError::Output(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped, which would land
        // on top of the TUI.
        stream.log_on_drop(false);
        Ok(Self { stream })
    }
}

/// Container-level duration, for decoders that cannot tell on their own.
fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
}

impl Backend for RodioBackend {
    type Handle = SinkHandle;

    fn open(&self, track: &Track) -> Result<SinkHandle, PlayerError> {
        let file = File::open(&track.path).map_err(|source| PlayerError::Open {
            path: track.path.clone(),
            source,
        })?;

        let source = Decoder::new(BufReader::new(file)).map_err(|source| PlayerError::Decode {
            path: track.path.clone(),
            source,
        })?;

        let duration = source
            .total_duration()
            .or_else(|| probe_duration(&track.path))
            .unwrap_or_default();
        debug!(path = %track.path.display(), ?duration, "opened track");

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.append(source);
        Ok(SinkHandle { sink, duration })
    }
}

pub struct SinkHandle {
    sink: Sink,
    duration: Duration,
}

impl Playback for SinkHandle {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn stop(&mut self) {
        self.sink.stop();
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }

    fn seek(&mut self, to: Duration) -> Result<(), PlayerError> {
        self.sink
            .try_seek(to)
            .map_err(|e| PlayerError::Seek(e.to_string()))
    }

    fn is_finished(&self) -> bool {
        self.sink.empty()
    }
}
