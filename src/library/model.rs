use std::path::PathBuf;

/// One catalog entry: a playable file and the name shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    pub display: String,
}

impl Track {
    pub fn new(path: PathBuf, display: String) -> Self {
        Self { path, display }
    }
}
