//! Directory browser modal: token-gated navigation over server listings.
//!
//! Every navigation issues a fresh [`NavToken`]. Responses are applied only
//! when their token equals the most recently issued one and the modal is
//! open, so a slow response for an older directory can never replace a newer
//! listing.

use console_logging::{console_debug, console_warn};

/// Navigation sequence number; strictly increasing for the browser's lifetime.
pub type NavToken = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrowseResult {
    pub current: String,
    pub folders: Vec<FolderEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserPhase {
    #[default]
    Closed,
    Loading,
    Loaded,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalVisibility {
    #[default]
    Hidden,
    Shown,
    /// Closed but still drawn until the deferred removal fires.
    FadingOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseRequest {
    pub token: NavToken,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryBrowser {
    phase: BrowserPhase,
    requested_path: String,
    displayed_path: String,
    folders: Vec<FolderEntry>,
    pending_token: NavToken,
    last_error: Option<String>,
    highlighted: usize,
    modal: ModalVisibility,
    fade_generation: u64,
}

impl DirectoryBrowser {
    pub fn phase(&self) -> BrowserPhase {
        self.phase
    }

    pub fn requested_path(&self) -> &str {
        &self.requested_path
    }

    pub fn displayed_path(&self) -> &str {
        &self.displayed_path
    }

    pub fn folders(&self) -> &[FolderEntry] {
        &self.folders
    }

    pub fn pending_token(&self) -> NavToken {
        self.pending_token
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn modal(&self) -> ModalVisibility {
        self.modal
    }

    pub fn fade_generation(&self) -> u64 {
        self.fade_generation
    }

    pub fn is_open(&self) -> bool {
        self.phase != BrowserPhase::Closed
    }

    /// Opens the modal and requests `initial_path`. Ignored unless closed.
    pub fn open(&mut self, initial_path: &str) -> Option<BrowseRequest> {
        if self.is_open() {
            return None;
        }
        if self.modal == ModalVisibility::FadingOut {
            // Invalidate the removal scheduled by the previous close.
            self.fade_generation += 1;
        }
        self.modal = ModalVisibility::Shown;
        Some(self.issue(initial_path))
    }

    /// Requests `path` while the modal is open.
    pub fn navigate(&mut self, path: &str) -> Option<BrowseRequest> {
        if !self.is_open() {
            return None;
        }
        Some(self.issue(path))
    }

    fn issue(&mut self, path: &str) -> BrowseRequest {
        self.pending_token += 1;
        self.phase = BrowserPhase::Loading;
        self.requested_path = path.to_string();
        BrowseRequest {
            token: self.pending_token,
            path: self.requested_path.clone(),
        }
    }

    fn accepts(&self, token: NavToken) -> bool {
        self.is_open() && token == self.pending_token
    }

    /// Applies a listing. Returns false when the response is stale.
    pub fn apply_listing(&mut self, token: NavToken, result: BrowseResult) -> bool {
        if !self.accepts(token) {
            console_debug!(
                "Discarding browse response token={} pending={} phase={:?}",
                token,
                self.pending_token,
                self.phase
            );
            return false;
        }
        self.phase = BrowserPhase::Loaded;
        self.displayed_path = result.current;
        self.folders = result.folders;
        self.last_error = None;
        self.highlighted = 0;
        true
    }

    /// Records a failed browse. Returns false when the response is stale.
    pub fn apply_failure(&mut self, token: NavToken, message: String) -> bool {
        if !self.accepts(token) {
            console_debug!(
                "Discarding browse failure token={} pending={}",
                token,
                self.pending_token
            );
            return false;
        }
        console_warn!("Browse error for {:?}: {}", self.requested_path, message);
        self.phase = BrowserPhase::Error;
        self.last_error = Some(message);
        true
    }

    pub fn folder(&self, index: usize) -> Option<&FolderEntry> {
        self.folders.get(index)
    }

    /// Moves the keyboard highlight, clamped to the listed rows.
    pub fn move_highlight(&mut self, delta: isize) -> bool {
        if !self.is_open() || self.folders.is_empty() {
            return false;
        }
        let last = self.folders.len() - 1;
        let next = self.highlighted.saturating_add_signed(delta).min(last);
        std::mem::replace(&mut self.highlighted, next) != next
    }

    /// Commits the displayed path. Only valid once a listing is loaded.
    pub fn select(&mut self) -> Option<(String, u64)> {
        if self.phase != BrowserPhase::Loaded {
            return None;
        }
        let path = self.displayed_path.clone();
        let generation = self.close()?;
        Some((path, generation))
    }

    /// Closes the modal and returns the generation of the pending removal.
    ///
    /// Outstanding requests keep running; their responses are ignored.
    pub fn close(&mut self) -> Option<u64> {
        if !self.is_open() {
            return None;
        }
        self.phase = BrowserPhase::Closed;
        self.modal = ModalVisibility::FadingOut;
        Some(self.fade_generation)
    }

    /// Completes the deferred removal if it still belongs to the latest close.
    pub fn finish_fade(&mut self, generation: u64) -> bool {
        if self.modal != ModalVisibility::FadingOut || generation != self.fade_generation {
            return false;
        }
        self.modal = ModalVisibility::Hidden;
        true
    }
}
