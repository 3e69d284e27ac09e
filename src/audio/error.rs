use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while starting or driving a playback session.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("no tracks to play")]
    EmptyCatalog,
    #[error("track {index} is out of range (catalog has {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("seek failed: {0}")]
    Seek(String),
    #[error("none of the {0} tracks could be played")]
    NoPlayableTrack(usize),
    #[error("no audio output: {0}")]
    Output(String),
}
