//! The confirm-then-report dialog.
//!
//! An [`ErrorAlert`] is created for one error occurrence, shown once with
//! [`ErrorAlert::display_modal`], and then dropped:
//!
//! ```text
//! Constructed ──display_modal──▶ Displaying ──Primary───▶ Confirmed (report dispatched)
//!                                          ╰─Secondary─▶ Cancelled (nothing happens)
//! ```
//!
//! Drawing the dialog is left to a [`ModalPresenter`]. The alert only builds a
//! [`ModalRequest`] and acts on the returned [`ModalChoice`].

use std::{
    path::Path,
    sync::{Arc, OnceLock},
};

use crate::{Failure, Report, ReportEmailer, Reportable};

/// The button the user picked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModalChoice {
    /// The default action: report the problem.
    Primary,
    /// The alternate action: ignore it and continue.
    Secondary,
}

/// Everything a presenter needs to draw the dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalRequest {
    /// The headline.
    pub title: String,
    /// Explains what reporting does.
    pub informative_text: String,
    /// The error description shown in the scrollable body.
    pub body_text: String,
    /// Label of the focused default button.
    pub default_action: String,
    /// Label of the cancel button.
    pub alternate_action: String,
}

/// Shows a blocking confirm/cancel dialog.
pub trait ModalPresenter {
    /// Shows `request` and blocks until the user picks a button.
    ///
    /// The [`default_action`](ModalRequest::default_action) button must have
    /// initial focus.
    fn present(&self, request: &ModalRequest) -> ModalChoice;

    /// Whether this presenter puts real UI on screen.
    ///
    /// Interactive presenters are refused while running under automated
    /// tests; test doubles return `false`.
    fn is_interactive(&self) -> bool {
        true
    }
}

impl<P: ModalPresenter + ?Sized> ModalPresenter for &P {
    fn present(&self, request: &ModalRequest) -> ModalChoice {
        (**self).present(request)
    }

    fn is_interactive(&self) -> bool {
        (**self).is_interactive()
    }
}

impl<P: ModalPresenter + ?Sized> ModalPresenter for Box<P> {
    fn present(&self, request: &ModalRequest) -> ModalChoice {
        (**self).present(request)
    }

    fn is_interactive(&self) -> bool {
        (**self).is_interactive()
    }
}

/// User-facing strings of the dialog.
///
/// The defaults are English. Replace them to localize the alert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertText {
    /// The headline.
    pub title: String,
    /// Explains what reporting does.
    pub informative_text: String,
    /// Label of the default button.
    pub report_button: String,
    /// Label of the cancel button.
    pub ignore_button: String,
}

impl Default for AlertText {
    fn default() -> Self {
        Self {
            title: "An unexpected error occured and the operation couldn't be completed."
                .to_string(),
            informative_text: "The report will not be sent directly. Reporting the error will \
                               compose an email draft that you can edit."
                .to_string(),
            report_button: "Report Problem".to_string(),
            ignore_button: "Ignore and Continue".to_string(),
        }
    }
}

/// How the dialog ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AlertOutcome {
    /// The user chose to report; the emailer was called.
    Confirmed,
    /// The user chose to ignore the error.
    Cancelled,
}

/// The error dialog controller.
///
/// Holds the [`Reportable`] to show and the [`ReportEmailer`] to hand it to.
/// The emailer is a required constructor argument; to get the "configure
/// once at startup" shape, use an [`ErrorReporter`](crate::ErrorReporter).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use error_reporter::{
///     AlertOutcome, ErrorAlert, Failure, ModalChoice, Report,
///     testing::{RecordingEmailer, ScriptedPresenter},
/// };
///
/// let emailer = Arc::new(RecordingEmailer::new());
/// let report = Report::new(Failure::msg("export failed"), None);
///
/// let outcome = ErrorAlert::new(report, emailer.clone())
///     .display_modal(&ScriptedPresenter::new(ModalChoice::Primary), Some("What happened?"));
///
/// assert_eq!(outcome, AlertOutcome::Confirmed);
/// assert_eq!(emailer.calls().len(), 1);
/// ```
pub struct ErrorAlert {
    reportable: Reportable,
    emailer: Arc<dyn ReportEmailer + Send + Sync>,
    text: AlertText,
}

impl ErrorAlert {
    /// Creates an alert for `reportable`.
    pub fn new(
        reportable: impl Into<Reportable>,
        emailer: Arc<dyn ReportEmailer + Send + Sync>,
    ) -> Self {
        Self {
            reportable: reportable.into(),
            emailer,
            text: AlertText::default(),
        }
    }

    /// Creates an alert for a raw failure.
    pub fn for_error(
        error: impl Into<Failure>,
        emailer: Arc<dyn ReportEmailer + Send + Sync>,
    ) -> Self {
        let failure: Failure = error.into();
        Self::new(failure, emailer)
    }

    /// Creates an alert for a report.
    pub fn for_report(report: Report, emailer: Arc<dyn ReportEmailer + Send + Sync>) -> Self {
        Self::new(report, emailer)
    }

    /// Replaces the dialog strings.
    pub fn with_text(mut self, text: AlertText) -> Self {
        self.text = text;
        self
    }

    /// What the alert is about.
    pub fn reportable(&self) -> &Reportable {
        &self.reportable
    }

    /// The request handed to the presenter.
    ///
    /// The body is the summary, a blank line, and the detail.
    pub fn request(&self) -> ModalRequest {
        ModalRequest {
            title: self.text.title.clone(),
            informative_text: self.text.informative_text.clone(),
            body_text: format!(
                "{}\n\n{}",
                self.reportable.summary(),
                self.reportable.detail()
            ),
            default_action: self.text.report_button.clone(),
            alternate_action: self.text.ignore_button.clone(),
        }
    }

    /// Shows the dialog and, if the user confirms, dispatches the report.
    ///
    /// `instructions` is passed to the emailer as a preamble, typically asking
    /// the user to describe what they were doing.
    ///
    /// # Panics
    ///
    /// Panics before presenting anything if `presenter` is interactive and
    /// the process is running under automated tests (see
    /// [`is_running_tests`]).
    pub fn display_modal(
        self,
        presenter: &dyn ModalPresenter,
        instructions: Option<&str>,
    ) -> AlertOutcome {
        if presenter.is_interactive() && is_running_tests() {
            panic!("ErrorAlert involuntarily used in tests");
        }

        tracing::debug!(summary = %self.reportable.summary(), "presenting error alert");

        match presenter.present(&self.request()) {
            ModalChoice::Primary => {
                tracing::info!("user chose to report the error");
                self.reportable.dispatch(&*self.emailer, instructions);
                AlertOutcome::Confirmed
            }
            ModalChoice::Secondary => {
                tracing::info!("user chose to ignore the error");
                AlertOutcome::Cancelled
            }
        }
    }
}

impl core::fmt::Debug for ErrorAlert {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ErrorAlert")
            .field("reportable", &self.reportable)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

/// The environment variable that marks the process as an automated test run.
pub const TESTING_ENV_VAR: &str = "ERROR_REPORTER_TESTING";

/// Whether the process is running under automated tests.
///
/// When [`TESTING_ENV_VAR`] is set it decides: anything but `0` or `false`
/// means tests. Otherwise the process counts as a test run when it runs
/// under `cargo nextest`, or when its executable sits in a Cargo `deps`
/// directory, which is where `cargo test` places unit and integration test
/// binaries of every crate. Examples and installed binaries live elsewhere.
/// This crate's own unit tests always count. The environment is read once.
///
/// Set `ERROR_REPORTER_TESTING=0` to show real dialogs from a test binary.
pub fn is_running_tests() -> bool {
    static RUNNING_TESTS: OnceLock<bool> = OnceLock::new();

    cfg!(test)
        || *RUNNING_TESTS.get_or_init(|| match std::env::var_os(TESTING_ENV_VAR) {
            Some(value) => {
                let value = value.to_string_lossy();
                !(value == "0" || value.eq_ignore_ascii_case("false"))
            }
            None => {
                std::env::var_os("NEXTEST_RUN_ID").is_some()
                    || std::env::current_exe().is_ok_and(|exe| in_cargo_deps_dir(&exe))
            }
        })
}

fn in_cargo_deps_dir(executable: &Path) -> bool {
    executable
        .parent()
        .and_then(Path::file_name)
        .is_some_and(|dir| dir == "deps")
}
