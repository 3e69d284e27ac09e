//! Application module: the two screens and the navigation between them.
//!
//! The `App` model lives in `app::model` and holds the scanned catalog, the
//! library cursor and, while a track is playing, the playback session.

mod model;

pub use model::*;
