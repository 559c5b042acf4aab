use leafscan_types::{PredictionResult, PreviewDataUri, RequestState, SelectedFile};

use crate::error::SessionError;

/// Identifies the selection a preview decode was started for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTicket(u64);

/// Identifies the predict call a response belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone)]
pub struct PreviewJob {
    pub ticket: PreviewTicket,
    pub file: SelectedFile,
}

#[derive(Debug, Clone)]
pub struct PredictJob {
    pub ticket: RequestTicket,
    pub file: SelectedFile,
}

/// Upload/predict/reset state of one client.
///
/// Async work (preview decoding, the HTTP request) happens outside; the
/// session hands out a ticket when it starts and only accepts the
/// completion if that ticket is still current. Selecting a new file or
/// resetting bumps the epochs, so late completions are dropped.
#[derive(Debug, Default)]
pub struct UploadSession {
    selected: Option<SelectedFile>,
    preview: Option<PreviewDataUri>,
    request: RequestState,
    result: Option<PredictionResult>,
    error: Option<SessionError>,
    selection_epoch: u64,
    request_epoch: u64,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_file(&mut self, file: SelectedFile) -> Result<PreviewJob, SessionError> {
        if !file.is_image() {
            tracing::debug!("Rejected {} ({})", file.name, file.mime);
            let err = SessionError::InvalidFileType {
                mime: file.mime.clone(),
            };
            self.error = Some(err.clone());
            return Err(err);
        }

        self.selection_epoch += 1;
        if self.request == RequestState::Loading {
            // The in-flight response describes the previous file
            self.request_epoch += 1;
        }

        self.selected = Some(file.clone());
        self.preview = None;
        self.result = None;
        self.error = None;
        self.request = RequestState::Idle;

        Ok(PreviewJob {
            ticket: PreviewTicket(self.selection_epoch),
            file,
        })
    }

    /// Returns false when the ticket is stale and the preview was dropped
    pub fn complete_preview(&mut self, ticket: PreviewTicket, uri: PreviewDataUri) -> bool {
        if ticket.0 != self.selection_epoch || self.selected.is_none() {
            tracing::debug!("Dropping stale preview {:?}", ticket);
            return false;
        }

        self.preview = Some(uri);
        true
    }

    pub fn begin_predict(&mut self) -> Result<PredictJob, SessionError> {
        let Some(file) = self.selected.clone() else {
            self.error = Some(SessionError::NoFileSelected);
            return Err(SessionError::NoFileSelected);
        };

        if self.request == RequestState::Loading {
            return Err(SessionError::Busy);
        }

        self.request_epoch += 1;
        self.request = RequestState::Loading;
        self.error = None;
        self.result = None;

        Ok(PredictJob {
            ticket: RequestTicket(self.request_epoch),
            file,
        })
    }

    /// Returns false when the ticket is stale and the outcome was dropped
    pub fn complete_predict(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<PredictionResult, SessionError>,
    ) -> bool {
        if ticket.0 != self.request_epoch || self.request != RequestState::Loading {
            tracing::debug!("Dropping stale prediction {:?}", ticket);
            return false;
        }

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.request = RequestState::Succeeded;
            }
            Err(err) => {
                self.error = Some(err);
                self.request = RequestState::Failed;
            }
        }
        true
    }

    pub fn reset(&mut self) {
        self.selection_epoch += 1;
        self.request_epoch += 1;
        self.selected = None;
        self.preview = None;
        self.result = None;
        self.error = None;
        self.request = RequestState::Idle;
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewDataUri> {
        self.preview.as_ref()
    }

    pub fn request(&self) -> RequestState {
        self.request
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn is_loading(&self) -> bool {
        self.request == RequestState::Loading
    }

    pub fn can_predict(&self) -> bool {
        self.selected.is_some() && !self.is_loading()
    }
}
