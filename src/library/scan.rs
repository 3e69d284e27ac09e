use std::path::Path;

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;

use super::display::display_name;
use super::model::Track;

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_playable(name: &str, settings: &LibrarySettings) -> bool {
    name.ends_with(&settings.suffix) && !name.starts_with('.')
}

/// Walk `dir` depth-first and collect every playable file.
///
/// Entries come back in directory-listing order; nothing is sorted. Hidden
/// directories are never entered. Directories that cannot be listed are
/// skipped, so a bad subtree (or a missing root) just contributes nothing.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    info!(root = %dir.display(), suffix = %settings.suffix, "scanning library");

    let mut tracks: Vec<Track> = Vec::new();

    let walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !is_playable(&name, settings) {
            continue;
        }

        tracks.push(Track::new(
            path.to_path_buf(),
            display_name(&name, &settings.suffix),
        ));
    }

    info!(count = tracks.len(), "library scan finished");
    tracks
}
