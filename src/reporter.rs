use std::sync::{Arc, OnceLock};

use crate::{
    AlertOutcome, AlertText, ErrorAlert, ModalPresenter, ReportEmailer, Reportable,
    error::ConfigError,
};

/// The application's reporting setup.
///
/// Create one at startup, give it a [`ModalPresenter`], set the emailer once,
/// and pass it (or a reference to it) to the code that needs to report
/// errors. Every alert it creates shares the same emailer.
///
/// Creating an alert before the emailer is set is a configuration mistake:
/// [`alert`](ErrorReporter::alert) panics, [`try_alert`](ErrorReporter::try_alert)
/// returns [`ConfigError::MissingEmailer`]. Either way no dialog is shown.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use error_reporter::{
///     AlertOutcome, ErrorReporter, Failure, ModalChoice,
///     testing::{RecordingEmailer, ScriptedPresenter},
/// };
///
/// let reporter = ErrorReporter::new(ScriptedPresenter::new(ModalChoice::Secondary));
/// let emailer = Arc::new(RecordingEmailer::new());
/// reporter.set_emailer(emailer.clone()).unwrap();
///
/// let outcome = reporter.report(Failure::msg("could not save"), None);
/// assert_eq!(outcome, AlertOutcome::Cancelled);
/// assert!(emailer.calls().is_empty());
/// ```
pub struct ErrorReporter {
    emailer: OnceLock<Arc<dyn ReportEmailer + Send + Sync>>,
    presenter: Box<dyn ModalPresenter + Send + Sync>,
    text: AlertText,
}

impl ErrorReporter {
    /// Creates a reporter without an emailer.
    pub fn new(presenter: impl ModalPresenter + Send + Sync + 'static) -> Self {
        Self {
            emailer: OnceLock::new(),
            presenter: Box::new(presenter),
            text: AlertText::default(),
        }
    }

    /// Sets the emailer while building the reporter.
    ///
    /// # Panics
    ///
    /// Panics if an emailer was already set.
    pub fn with_emailer(self, emailer: Arc<dyn ReportEmailer + Send + Sync>) -> Self {
        if let Err(error) = self.set_emailer(emailer) {
            panic!("{error}");
        }
        self
    }

    /// Replaces the dialog strings used by every alert.
    pub fn with_text(mut self, text: AlertText) -> Self {
        self.text = text;
        self
    }

    /// Sets the emailer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmailerAlreadySet`] if an emailer was already
    /// set; the existing emailer is kept.
    pub fn set_emailer(
        &self,
        emailer: Arc<dyn ReportEmailer + Send + Sync>,
    ) -> Result<(), ConfigError> {
        self.emailer
            .set(emailer)
            .map_err(|_| ConfigError::EmailerAlreadySet)
    }

    /// The configured emailer, if any.
    pub fn emailer(&self) -> Option<&Arc<dyn ReportEmailer + Send + Sync>> {
        self.emailer.get()
    }

    /// Creates an alert for `reportable`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEmailer`] if no emailer has been set.
    pub fn try_alert(
        &self,
        reportable: impl Into<Reportable>,
    ) -> Result<ErrorAlert, ConfigError> {
        let emailer = self.emailer().ok_or(ConfigError::MissingEmailer)?;
        Ok(ErrorAlert::new(reportable, emailer.clone()).with_text(self.text.clone()))
    }

    /// Creates an alert for `reportable`.
    ///
    /// # Panics
    ///
    /// Panics if no emailer has been set.
    pub fn alert(&self, reportable: impl Into<Reportable>) -> ErrorAlert {
        match self.try_alert(reportable) {
            Ok(alert) => alert,
            Err(error) => panic!("{error}"),
        }
    }

    /// Creates an alert for `reportable` and shows it with this reporter's
    /// presenter.
    ///
    /// # Panics
    ///
    /// Panics if no emailer has been set, or under the conditions described
    /// in [`ErrorAlert::display_modal`].
    pub fn report(
        &self,
        reportable: impl Into<Reportable>,
        instructions: Option<&str>,
    ) -> AlertOutcome {
        self.alert(reportable).display_modal(&*self.presenter, instructions)
    }
}

impl core::fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ErrorReporter")
            .field("emailer_set", &self.emailer.get().is_some())
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Failure, ModalChoice,
        testing::{RecordingEmailer, ScriptedPresenter},
    };

    #[test]
    fn test_error_reporter_send_sync() {
        static_assertions::assert_impl_all!(ErrorReporter: Send, Sync);
    }

    #[test]
    fn test_try_alert_without_emailer() {
        let reporter = ErrorReporter::new(ScriptedPresenter::new(ModalChoice::Primary));
        assert_eq!(
            reporter.try_alert(Failure::msg("boom")).unwrap_err(),
            ConfigError::MissingEmailer
        );
    }

    #[test]
    #[should_panic(expected = "set the emailer before creating an error alert")]
    fn test_alert_without_emailer_panics() {
        let reporter = ErrorReporter::new(ScriptedPresenter::new(ModalChoice::Primary));
        reporter.alert(Failure::msg("boom"));
    }

    #[test]
    fn test_emailer_is_write_once() {
        let first = Arc::new(RecordingEmailer::new());
        let reporter = ErrorReporter::new(ScriptedPresenter::new(ModalChoice::Primary))
            .with_emailer(first.clone());

        assert_eq!(
            reporter.set_emailer(Arc::new(RecordingEmailer::new())),
            Err(ConfigError::EmailerAlreadySet)
        );

        reporter.report(Failure::msg("boom"), None);
        assert_eq!(first.calls().len(), 1);
    }

    #[test]
    fn test_alerts_share_text() {
        let text = AlertText {
            title: "Oh no".to_string(),
            ..AlertText::default()
        };
        let presenter = ScriptedPresenter::new(ModalChoice::Secondary);
        let reporter = ErrorReporter::new(presenter.clone())
            .with_text(text)
            .with_emailer(Arc::new(RecordingEmailer::new()));

        reporter.report(Failure::msg("boom"), None);
        reporter.report(Failure::msg("bang"), None);

        let requests = presenter.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|request| request.title == "Oh no"));
        assert_eq!(requests[1].body_text, "bang\n\n");
    }
}
