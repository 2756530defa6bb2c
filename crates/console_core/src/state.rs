use crate::view_model::{
    AppViewModel, BrowserView, DropZoneView, FolderRowView, StatusView, SubmissionView,
};
use crate::{BrowserPhase, DirectoryBrowser, ModalVisibility, StatusPanel, Submission, UploadSelector};

pub const DROP_ZONE_PLACEHOLDER: &str = "Drop a .torrent file here or type its path";

/// Everything one console view knows. Owned by a single thread and changed
/// only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub(crate) upload: UploadSelector,
    pub(crate) browser: DirectoryBrowser,
    pub(crate) status: StatusPanel,
    pub(crate) destination: String,
    pub(crate) submission: Submission,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upload(&self) -> &UploadSelector {
        &self.upload
    }

    pub fn browser(&self) -> &DirectoryBrowser {
        &self.browser
    }

    pub fn status(&self) -> &StatusPanel {
        &self.status
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            drop_zone: self.drop_zone_view(),
            destination: self.destination.clone(),
            browser: self.browser_view(),
            status: self.status_view(),
            submission: self.submission_view(),
            dirty: self.dirty,
        }
    }

    fn drop_zone_view(&self) -> DropZoneView {
        DropZoneView {
            label: self
                .upload
                .selected()
                .map(|file| file.name.clone())
                .unwrap_or_else(|| DROP_ZONE_PLACEHOLDER.to_string()),
            active: self.upload.is_active(),
            drag_over: self.upload.is_drag_over(),
        }
    }

    fn browser_view(&self) -> BrowserView {
        let browser = &self.browser;
        BrowserView {
            visible: browser.modal() != ModalVisibility::Hidden,
            fading: browser.modal() == ModalVisibility::FadingOut,
            phase: browser.phase(),
            current_path: browser.displayed_path().to_string(),
            rows: browser
                .folders()
                .iter()
                .map(|folder| FolderRowView {
                    name: folder.name.clone(),
                    path: folder.path.clone(),
                })
                .collect(),
            highlighted: browser.highlighted(),
            error: browser.last_error().map(ToOwned::to_owned),
            can_select: browser.phase() == BrowserPhase::Loaded,
        }
    }

    fn status_view(&self) -> StatusView {
        let status = &self.status;
        StatusView {
            message: status.message().to_string(),
            percent_text: status.percent_text(),
            bar_width: status.bar_width(),
            percent: status.percent(),
            bar_tone: status.bar_tone(),
            badge_text: status.badge().label().to_string(),
            badge_tone: status.badge().tone(),
        }
    }

    fn submission_view(&self) -> SubmissionView {
        match &self.submission {
            Submission::Idle => SubmissionView::default(),
            Submission::Submitting => SubmissionView {
                in_flight: true,
                notice: Some("Submitting...".to_string()),
                failed: false,
            },
            Submission::Accepted => SubmissionView {
                in_flight: false,
                notice: Some("Submitted to engine".to_string()),
                failed: false,
            },
            Submission::Failed(reason) => SubmissionView {
                in_flight: false,
                notice: Some(format!("Submit failed: {reason}")),
                failed: true,
            },
        }
    }
}
