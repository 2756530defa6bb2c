use std::path::{Path, PathBuf};

/// A local file chosen for upload, with the name shown in the drop zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
}

impl SelectedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self { path, name }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    /// Files chosen through the file field.
    Picked(Vec<SelectedFile>),
    /// Something is being dragged over the drop zone.
    DragOver,
    /// The drag left the drop zone without dropping.
    DragLeave,
    /// Files dropped onto the drop zone.
    Dropped(Vec<SelectedFile>),
}

/// Whether the host should still run its default handling for an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Default,
    PreventDefault,
}

impl UploadEvent {
    pub fn disposition(&self) -> EventDisposition {
        match self {
            UploadEvent::DragOver | UploadEvent::Dropped(_) => EventDisposition::PreventDefault,
            UploadEvent::Picked(_) | UploadEvent::DragLeave => EventDisposition::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadSelector {
    selected: Option<SelectedFile>,
    active: bool,
    drag_over: bool,
}

impl UploadSelector {
    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    /// Applies an event and reports whether anything visible changed.
    pub fn handle(&mut self, event: UploadEvent) -> bool {
        match event {
            UploadEvent::Picked(files) => self.select_first(files),
            UploadEvent::DragOver => !std::mem::replace(&mut self.drag_over, true),
            UploadEvent::DragLeave => std::mem::replace(&mut self.drag_over, false),
            UploadEvent::Dropped(files) => {
                let was_hovering = std::mem::replace(&mut self.drag_over, false);
                self.select_first(files) || was_hovering
            }
        }
    }

    fn select_first(&mut self, files: Vec<SelectedFile>) -> bool {
        // Empty lists keep whatever was selected before.
        let Some(first) = files.into_iter().next() else {
            return false;
        };
        self.selected = Some(first);
        self.active = true;
        true
    }
}

/// Outcome of the last hand-off of the selected file to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Submission {
    #[default]
    Idle,
    Submitting,
    Accepted,
    Failed(String),
}
