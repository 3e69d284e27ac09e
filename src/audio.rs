//! Audio subsystem: the playback backend and the per-session transport controller.

mod error;
mod player;
mod queue;
mod sink;
mod thread;
mod types;

pub use error::PlayerError;
pub use player::Player;
pub use queue::{next_index, prev_index};
pub use sink::RodioBackend;
pub use types::{Backend, Playback, PlaybackState, ProgressInfo, Selection};

#[cfg(test)]
pub(crate) mod fake;
