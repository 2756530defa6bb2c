use console_core::{
    BrowseResult, BrowserEvent, Effect, FolderEntry, Msg, PollSeq, StatusEvent, StatusSnapshot,
};
use console_engine::{
    DirectoryListing, EngineEvent, EngineHandle, PollSettings, PollerGuard, StatusReport,
};
use console_logging::{console_debug, console_info};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn start_polling(&self, settings: PollSettings) -> PollerGuard {
        console_info!(
            "Starting status poller every {:?} ({:?})",
            settings.interval,
            settings.policy
        );
        self.engine.start_polling(settings)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Browse { token, path } => {
                    console_debug!("Browse token={} path={:?}", token, path);
                    self.engine.browse(token, path);
                }
                Effect::HideModalAfter { generation, delay } => {
                    self.engine.schedule(generation, delay);
                }
                Effect::SubmitUpload { file, destination } => {
                    console_debug!("SubmitUpload file={:?} destination={:?}", file, destination);
                    self.engine.upload(file, destination);
                }
            }
        }
    }

    /// Collects every engine event that has arrived so far as core messages.
    pub fn drain(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(map_event(event));
        }
        inbox
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::BrowseCompleted { token, result } => Msg::Browser(match result {
            Ok(listing) => BrowserEvent::Loaded {
                token,
                result: map_listing(listing),
            },
            Err(err) => BrowserEvent::Failed {
                token,
                message: err.detail(),
            },
        }),
        EngineEvent::StatusPolled { seq, result } => Msg::Status(map_status(seq, result)),
        EngineEvent::UploadCompleted { result } => {
            Msg::SubmitFinished(result.map_err(|err| err.detail()))
        }
        EngineEvent::DelayElapsed { generation } => {
            Msg::Browser(BrowserEvent::FadeElapsed { generation })
        }
    }
}

fn map_listing(listing: DirectoryListing) -> BrowseResult {
    BrowseResult {
        current: listing.current,
        folders: listing
            .folders
            .into_iter()
            .map(|entry| FolderEntry {
                name: entry.name,
                path: entry.path,
            })
            .collect(),
    }
}

fn map_status(
    seq: PollSeq,
    result: Result<StatusReport, console_engine::ApiError>,
) -> StatusEvent {
    match result {
        Ok(report) => StatusEvent::Polled {
            seq,
            snapshot: StatusSnapshot {
                message: report.message,
                percent: report.percent,
                running: report.running,
            },
        },
        Err(err) => StatusEvent::PollFailed {
            seq,
            reason: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_engine::{ApiError, DirectoryEntry, FailureKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn listing_maps_to_loaded_event() {
        let msg = map_event(EngineEvent::BrowseCompleted {
            token: 4,
            result: Ok(DirectoryListing {
                current: "/srv".to_string(),
                folders: vec![DirectoryEntry {
                    name: "media".to_string(),
                    path: "/srv/media".to_string(),
                }],
            }),
        });
        assert_eq!(
            msg,
            Msg::Browser(BrowserEvent::Loaded {
                token: 4,
                result: BrowseResult {
                    current: "/srv".to_string(),
                    folders: vec![FolderEntry {
                        name: "media".to_string(),
                        path: "/srv/media".to_string(),
                    }],
                },
            })
        );
    }

    #[test]
    fn browse_failure_uses_server_text() {
        let msg = map_event(EngineEvent::BrowseCompleted {
            token: 2,
            result: Err(ApiError::new(
                FailureKind::HttpStatus(500),
                "open /root: permission denied",
            )),
        });
        assert_eq!(
            msg,
            Msg::Browser(BrowserEvent::Failed {
                token: 2,
                message: "open /root: permission denied".to_string(),
            })
        );
    }

    #[test]
    fn poll_results_keep_their_sequence() {
        let ok = map_event(EngineEvent::StatusPolled {
            seq: 9,
            result: Ok(StatusReport {
                message: "Chunk 2/5".to_string(),
                percent: 40.0,
                running: true,
            }),
        });
        assert_eq!(
            ok,
            Msg::Status(StatusEvent::Polled {
                seq: 9,
                snapshot: StatusSnapshot {
                    message: "Chunk 2/5".to_string(),
                    percent: 40.0,
                    running: true,
                },
            })
        );

        let failed = map_event(EngineEvent::StatusPolled {
            seq: 10,
            result: Err(ApiError::new(FailureKind::Timeout, "deadline")),
        });
        assert!(matches!(
            failed,
            Msg::Status(StatusEvent::PollFailed { seq: 10, .. })
        ));
    }

    #[test]
    fn upload_and_delay_events_map_directly() {
        assert_eq!(
            map_event(EngineEvent::UploadCompleted { result: Ok(()) }),
            Msg::SubmitFinished(Ok(()))
        );
        assert_eq!(
            map_event(EngineEvent::UploadCompleted {
                result: Err(ApiError::new(FailureKind::HttpStatus(413), "too large")),
            }),
            Msg::SubmitFinished(Err("too large".to_string()))
        );
        assert_eq!(
            map_event(EngineEvent::DelayElapsed { generation: 3 }),
            Msg::Browser(BrowserEvent::FadeElapsed { generation: 3 })
        );
    }
}
