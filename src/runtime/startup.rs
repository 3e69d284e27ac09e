use std::env;
use std::path::{Path, PathBuf};

use crate::app::LibraryView;
use crate::config;
use crate::library::scan;
use crate::permission::{Access, FsPermission, negotiate};

/// Pick the directory to scan: CLI argument, then `library.root`, then the cwd.
pub fn resolve_root(settings: &config::Settings) -> PathBuf {
    env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.library.root.clone())
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("Music"))
}

/// Ask for storage access and, once granted, scan the catalog.
pub fn load_library(root: &Path, settings: &config::Settings) -> LibraryView {
    let root_text = root.display().to_string();
    match negotiate(&mut FsPermission::new(root)) {
        Access::Granted => {
            let tracks = scan(root, &settings.library);
            LibraryView::new(tracks, Access::Granted, root_text)
        }
        Access::Denied => LibraryView::denied(root_text),
    }
}
