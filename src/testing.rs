//! Test doubles for the capabilities this crate consumes.
//!
//! Real dialogs must never appear during automated tests (see
//! [`is_running_tests`](crate::alert::is_running_tests)). These doubles
//! resolve synchronously, record what they were asked to do, and can be
//! cloned so a test keeps a handle after moving one into an alert or
//! emailer.
//!
//! The guard recognizes `cargo test` and `cargo nextest` binaries of any
//! crate, so integration tests in applications need no extra setup. Other
//! harnesses should set `ERROR_REPORTER_TESTING=1`.
//!
//! ```
//! use std::sync::Arc;
//!
//! use error_reporter::{
//!     ErrorAlert, Failure, ModalChoice,
//!     testing::{EmailCall, RecordingEmailer, ScriptedPresenter},
//! };
//!
//! let emailer = Arc::new(RecordingEmailer::new());
//! let presenter = ScriptedPresenter::new(ModalChoice::Primary);
//!
//! ErrorAlert::for_error(Failure::msg("boom"), emailer.clone()).display_modal(&presenter, None);
//!
//! assert_eq!(presenter.requests()[0].body_text, "boom\n\n");
//! assert_eq!(
//!     emailer.calls(),
//!     vec![EmailCall::Error { message: "boom".into(), instructions: None }]
//! );
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    Failure, ModalChoice, ModalPresenter, ModalRequest, Report, ReportEmailer,
    error::OpenError,
    platform::{ComposeOutcome, ComposeService, EmailDraft, UrlOpener},
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// One recorded [`ReportEmailer`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmailCall {
    /// [`ReportEmailer::email_text`] was called.
    Text {
        /// The text.
        text: String,
        /// The instructions.
        instructions: Option<String>,
    },
    /// [`ReportEmailer::email_error`] was called.
    Error {
        /// The failure message.
        message: String,
        /// The instructions.
        instructions: Option<String>,
    },
    /// [`ReportEmailer::email_report`] was called.
    Report {
        /// The report summary.
        summary: String,
        /// The instructions.
        instructions: Option<String>,
    },
}

/// A [`ReportEmailer`] that records every call.
#[derive(Clone, Debug, Default)]
pub struct RecordingEmailer {
    calls: Arc<Mutex<Vec<EmailCall>>>,
}

impl RecordingEmailer {
    /// Creates an emailer with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// The calls so far, oldest first.
    pub fn calls(&self) -> Vec<EmailCall> {
        lock(&self.calls).clone()
    }

    fn record(&self, call: EmailCall) {
        lock(&self.calls).push(call);
    }
}

impl ReportEmailer for RecordingEmailer {
    fn email_text(&self, text: &str, instructions: Option<&str>) {
        self.record(EmailCall::Text {
            text: text.to_string(),
            instructions: instructions.map(str::to_string),
        });
    }

    fn email_error(&self, error: &Failure, instructions: Option<&str>) {
        self.record(EmailCall::Error {
            message: error.message(),
            instructions: instructions.map(str::to_string),
        });
    }

    fn email_report(&self, report: &Report, instructions: Option<&str>) {
        self.record(EmailCall::Report {
            summary: report.summary(),
            instructions: instructions.map(str::to_string),
        });
    }
}

/// A non-interactive [`ModalPresenter`] that always returns the same choice.
#[derive(Clone, Debug)]
pub struct ScriptedPresenter {
    choice: ModalChoice,
    requests: Arc<Mutex<Vec<ModalRequest>>>,
}

impl ScriptedPresenter {
    /// Creates a presenter that answers every request with `choice`.
    pub fn new(choice: ModalChoice) -> Self {
        Self {
            choice,
            requests: Arc::default(),
        }
    }

    /// The requests presented so far, oldest first.
    pub fn requests(&self) -> Vec<ModalRequest> {
        lock(&self.requests).clone()
    }
}

impl ModalPresenter for ScriptedPresenter {
    fn present(&self, request: &ModalRequest) -> ModalChoice {
        lock(&self.requests).push(request.clone());
        self.choice
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// A [`ComposeService`] that records drafts and returns a fixed outcome.
#[derive(Clone, Debug)]
pub struct RecordingCompose {
    outcome: ComposeOutcome,
    drafts: Arc<Mutex<Vec<EmailDraft>>>,
}

impl RecordingCompose {
    /// Creates a compose service that answers every draft with `outcome`.
    pub fn new(outcome: ComposeOutcome) -> Self {
        Self {
            outcome,
            drafts: Arc::default(),
        }
    }

    /// The drafts received so far, oldest first.
    pub fn drafts(&self) -> Vec<EmailDraft> {
        lock(&self.drafts).clone()
    }
}

impl ComposeService for RecordingCompose {
    fn compose(&self, draft: &EmailDraft) -> ComposeOutcome {
        lock(&self.drafts).push(draft.clone());
        self.outcome
    }
}

/// A [`UrlOpener`] that records URIs instead of opening them.
#[derive(Clone, Debug, Default)]
pub struct RecordingOpener {
    fail: bool,
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingOpener {
    /// Creates an opener that accepts every URI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an opener that records every URI and then fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// The URIs received so far, oldest first.
    pub fn opened(&self) -> Vec<String> {
        lock(&self.opened).clone()
    }
}

impl UrlOpener for RecordingOpener {
    fn open(&self, uri: &str) -> Result<(), OpenError> {
        lock(&self.opened).push(uri.to_string());
        if self.fail {
            Err(OpenError {
                uri: uri.to_string(),
                source: None,
            })
        } else {
            Ok(())
        }
    }
}
