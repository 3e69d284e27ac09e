//! Application model types: `App`, `LibraryView` and `Screen`.

use std::rc::Rc;

use tracing::warn;

use crate::audio::{Backend, PlaybackState, Player, PlayerError, Selection, next_index, prev_index};
use crate::config::PlaybackSettings;
use crate::library::Track;
use crate::permission::Access;

/// The catalog list and its cursor.
pub struct LibraryView {
    pub tracks: Vec<Track>,
    pub selected: usize,
    pub access: Access,
    pub root: String,
}

impl LibraryView {
    pub fn new(tracks: Vec<Track>, access: Access, root: String) -> Self {
        Self {
            tracks,
            selected: 0,
            access,
            root,
        }
    }

    /// A library whose root could not be read.
    pub fn denied(root: String) -> Self {
        Self::new(Vec::new(), Access::Denied, root)
    }

    /// Return true if there is anything to select.
    pub fn has_tracks(&self) -> bool {
        self.access == Access::Granted && !self.tracks.is_empty()
    }

    /// Move selection down, wrapping to the top.
    pub fn next(&mut self) {
        if !self.tracks.is_empty() {
            self.selected = next_index(self.selected, self.tracks.len());
        }
    }

    /// Move selection up, wrapping to the bottom.
    pub fn prev(&mut self) {
        if !self.tracks.is_empty() {
            self.selected = prev_index(self.selected, self.tracks.len());
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.tracks.len().saturating_sub(1);
    }

    /// What to hand to a new session, or `None` when selection is disabled.
    pub fn selection(&self) -> Option<Selection> {
        if !self.has_tracks() {
            return None;
        }
        let track = self.tracks.get(self.selected)?;
        Some(Selection {
            catalog: self.tracks.clone(),
            title: track.display.clone(),
            index: self.selected,
        })
    }
}

pub enum Screen<B: Backend> {
    Library,
    Player(Player<B>),
}

/// The main application model.
pub struct App<B: Backend> {
    pub library: LibraryView,
    pub screen: Screen<B>,
    /// One-line message shown in the status box (errors, mostly).
    pub status: Option<String>,
    backend: Rc<B>,
    playback: PlaybackSettings,
}

impl<B: Backend> App<B> {
    pub fn new(library: LibraryView, backend: B, playback: PlaybackSettings) -> Self {
        Self::with_shared_backend(library, Rc::new(backend), playback)
    }

    pub fn with_shared_backend(
        library: LibraryView,
        backend: Rc<B>,
        playback: PlaybackSettings,
    ) -> Self {
        Self {
            library,
            screen: Screen::Library,
            status: None,
            backend,
            playback,
        }
    }

    pub fn player(&self) -> Option<&Player<B>> {
        match &self.screen {
            Screen::Player(p) => Some(p),
            Screen::Library => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut Player<B>> {
        match &mut self.screen {
            Screen::Player(p) => Some(p),
            Screen::Library => None,
        }
    }

    /// Start a session on the selected track and switch to the player screen.
    pub fn open_selected(&mut self) {
        let Some(selection) = self.library.selection() else {
            return;
        };
        if let Screen::Player(old) = &mut self.screen {
            old.shutdown();
        }

        match Player::start(self.backend.clone(), selection, &self.playback) {
            Ok(player) => {
                self.status = None;
                self.screen = Screen::Player(player);
            }
            Err(err) => {
                warn!(error = %err, "could not start playback");
                self.status = Some(err.to_string());
                self.screen = Screen::Library;
            }
        }
    }

    /// End the session and go back to the library, keeping the cursor on the last track.
    pub fn close_player(&mut self) {
        if let Screen::Player(mut player) = std::mem::replace(&mut self.screen, Screen::Library) {
            self.library.selected = player.index();
            player.shutdown();
        }
    }

    /// Record the outcome of a transport action for the status box.
    pub fn report(&mut self, result: Result<(), PlayerError>) {
        match result {
            Ok(()) => self.status = None,
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    /// Per-frame housekeeping: advance past a finished track when configured.
    pub fn tick(&mut self) {
        if !self.playback.auto_advance {
            return;
        }
        let Some(player) = self.player_mut() else {
            return;
        };
        if player.track_finished() && player.state() != PlaybackState::Paused {
            let result = player.next();
            self.report(result);
        }
    }
}
