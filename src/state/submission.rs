//! Submission lifecycle state machine
//!
//! `Idle → Submitting → Success | Error(message)`. Controls are disabled
//! only while `Submitting`; `Success` and `Error` keep their banner on screen
//! with the form interactable, and accept a new submission like `Idle`.

use crate::submit::{SubmitError, SubmitResponse};

/// Body `message` value the backend sends on success
pub const SUCCESS_MARKER: &str = "Success";

/// Banner text when no server message is available
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again later.";

/// Where the form stands in the submission cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error(String),
}

/// How a finished request is classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted,
    /// The server answered but did not accept the form
    Rejected(String),
    /// No decoded answer was obtained
    Failed(String),
}

impl SubmissionOutcome {
    /// Classify a request result. Acceptance needs a 2xx status and the
    /// success marker; a rejection prefers the server's `error` text, then a
    /// status-derived message.
    pub fn from_result(result: &Result<SubmitResponse, SubmitError>) -> Self {
        match result {
            Ok(response)
                if response.is_ok()
                    && response.body.message.as_deref() == Some(SUCCESS_MARKER) =>
            {
                Self::Accepted
            }
            Ok(response) => {
                let message = response
                    .body
                    .error
                    .as_deref()
                    .map(str::trim)
                    .filter(|e| !e.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Server error: {}", response.status));
                Self::Rejected(message)
            }
            Err(_) => Self::Failed(GENERIC_ERROR_MESSAGE.to_string()),
        }
    }
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Inputs, selects and buttons accept interaction
    pub fn controls_enabled(&self) -> bool {
        !self.is_submitting()
    }

    pub fn loading_visible(&self) -> bool {
        self.is_submitting()
    }

    pub fn submit_visible(&self) -> bool {
        !self.is_submitting()
    }

    pub fn success_banner_visible(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Message of the visible error banner, if any
    pub fn error_banner(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Enter `Submitting`. Returns false, leaving the state untouched, when a
    /// submission is already outstanding.
    pub fn begin(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        *self = Self::Submitting;
        true
    }

    /// Leave `Submitting` for the outcome's settled state. Returns false when
    /// no submission was outstanding.
    pub fn finish(&mut self, outcome: SubmissionOutcome) -> bool {
        if !self.is_submitting() {
            return false;
        }
        *self = match outcome {
            SubmissionOutcome::Accepted => Self::Success,
            SubmissionOutcome::Rejected(message) | SubmissionOutcome::Failed(message) => {
                Self::Error(message)
            }
        };
        true
    }
}
