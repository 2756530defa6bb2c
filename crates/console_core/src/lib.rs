//! Console core: pure state machines and view-model helpers.
mod browser;
mod effect;
mod msg;
mod state;
mod status;
mod update;
mod upload;
mod view_model;

pub use browser::{
    BrowseRequest, BrowseResult, BrowserPhase, DirectoryBrowser, FolderEntry, ModalVisibility,
    NavToken,
};
pub use effect::{Effect, MODAL_FADE};
pub use msg::{BrowserEvent, Msg, StatusEvent};
pub use state::{AppState, DROP_ZONE_PLACEHOLDER};
pub use status::{Badge, PollSeq, StatusPanel, StatusSnapshot, Tone};
pub use update::update;
pub use upload::{EventDisposition, SelectedFile, Submission, UploadEvent, UploadSelector};
pub use view_model::{
    AppViewModel, BrowserView, DropZoneView, FolderRowView, StatusView, SubmissionView,
};
