use std::sync::Arc;

use crate::{Failure, Report, ReportEmailer};

/// Either a raw failure or a [`Report`], behind one description surface.
///
/// Alerts display a [`Reportable`] without caring which of the two it holds:
/// [`summary`](Reportable::summary) and [`detail`](Reportable::detail) are
/// defined for both, and [`dispatch`](Reportable::dispatch) routes to the
/// matching [`ReportEmailer`] method.
///
/// There is no empty state: a [`Reportable`] is only ever built from an
/// existing failure or report.
///
/// # Examples
///
/// ```
/// use error_reporter::{Failure, Report, Reportable};
///
/// let raw = Reportable::from(Failure::new(std::io::Error::other("disk full")));
/// assert_eq!(raw.summary(), "disk full");
/// assert!(!raw.detail().is_empty());
///
/// let report = Reportable::from(Report::new(
///     Failure::msg("disk full"),
///     Some("while exporting".to_string()),
/// ));
/// assert_eq!(report.summary(), "disk full\nwhile exporting");
/// assert_eq!(report.detail(), "");
/// ```
#[derive(Clone, Debug)]
pub enum Reportable {
    /// A raw failure without extra context.
    FromError(Arc<Failure>),
    /// A failure enriched with user-supplied context.
    FromReport(Arc<Report>),
}

impl Reportable {
    /// Short human-readable description.
    ///
    /// For raw failures this is the failure message. For reports it is
    /// [`Report::summary`].
    pub fn summary(&self) -> String {
        match self {
            Reportable::FromError(error) => error.message(),
            Reportable::FromReport(report) => report.summary(),
        }
    }

    /// Verbose description.
    ///
    /// For raw failures this is the failure's debug description, or an empty
    /// string when it has none. Reports currently have no detail section and
    /// always return an empty string.
    pub fn detail(&self) -> String {
        match self {
            Reportable::FromError(error) => error.debug_description().unwrap_or_default(),
            Reportable::FromReport(_) => String::new(),
        }
    }

    /// Hands the wrapped value to the matching `emailer` method.
    ///
    /// Reports go to [`ReportEmailer::email_report`], raw failures to
    /// [`ReportEmailer::email_error`]. Nothing else is called.
    pub fn dispatch(&self, emailer: &dyn ReportEmailer, instructions: Option<&str>) {
        match self {
            Reportable::FromError(error) => emailer.email_error(error, instructions),
            Reportable::FromReport(report) => emailer.email_report(report, instructions),
        }
    }

    /// The raw failure, or the failure inside the report.
    pub fn failure(&self) -> &Failure {
        match self {
            Reportable::FromError(error) => error,
            Reportable::FromReport(report) => report.error(),
        }
    }
}

impl From<Failure> for Reportable {
    fn from(error: Failure) -> Self {
        Reportable::FromError(Arc::new(error))
    }
}

impl From<Arc<Failure>> for Reportable {
    fn from(error: Arc<Failure>) -> Self {
        Reportable::FromError(error)
    }
}

impl From<Report> for Reportable {
    fn from(report: Report) -> Self {
        Reportable::FromReport(Arc::new(report))
    }
}

impl From<Arc<Report>> for Reportable {
    fn from(report: Arc<Report>) -> Self {
        Reportable::FromReport(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EmailCall, RecordingEmailer};

    #[derive(Debug, derive_more::Display, derive_more::Error)]
    #[display("amazing error")]
    struct AmazingError;

    #[test]
    fn test_reportable_send_sync() {
        static_assertions::assert_impl_all!(Reportable: Send, Sync, Clone);
        static_assertions::assert_not_impl_any!(Reportable: Default);
    }

    #[test]
    fn test_error_summary_and_detail() {
        let reportable = Reportable::from(Failure::new(AmazingError));
        assert_eq!(reportable.summary(), "amazing error");
        assert_eq!(reportable.detail(), "AmazingError");
    }

    #[test]
    fn test_message_detail_is_empty() {
        let reportable = Reportable::from(Failure::msg("amazing error"));
        assert_eq!(reportable.summary(), "amazing error");
        assert_eq!(reportable.detail(), "");
    }

    #[test]
    fn test_report_summary_and_detail() {
        let reportable = Reportable::from(Report::new(
            AmazingError,
            Some("steps to reproduce".to_string()),
        ));
        assert_eq!(reportable.summary(), "amazing error\nsteps to reproduce");
        assert_eq!(reportable.detail(), "");
        assert!(reportable.failure().is::<AmazingError>());
    }

    #[test]
    fn test_dispatch_report_calls_email_report_only() {
        let report = Arc::new(Report::new(AmazingError, None));
        let emailer = RecordingEmailer::new();

        Reportable::from(report.clone()).dispatch(&emailer, Some("please describe"));

        let calls = emailer.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            EmailCall::Report {
                summary: "amazing error".to_string(),
                instructions: Some("please describe".to_string()),
            }
        );
    }

    #[test]
    fn test_dispatch_error_calls_email_error_only() {
        let emailer = RecordingEmailer::new();

        Reportable::from(Failure::new(AmazingError)).dispatch(&emailer, None);

        assert_eq!(
            emailer.calls(),
            vec![EmailCall::Error {
                message: "amazing error".to_string(),
                instructions: None,
            }]
        );
    }

    #[test]
    fn test_dispatch_passes_the_same_report() {
        struct SameReport {
            expected: *const Report,
            seen: std::cell::Cell<usize>,
        }

        impl ReportEmailer for SameReport {
            fn email_text(&self, _text: &str, _instructions: Option<&str>) {
                unreachable!()
            }

            fn email_error(&self, _error: &Failure, _instructions: Option<&str>) {
                unreachable!()
            }

            fn email_report(&self, report: &Report, _instructions: Option<&str>) {
                assert!(std::ptr::eq(report, self.expected));
                self.seen.set(self.seen.get() + 1);
            }
        }

        let report = Arc::new(Report::new(AmazingError, Some("steps".to_string())));
        let emailer = SameReport {
            expected: Arc::as_ptr(&report),
            seen: std::cell::Cell::new(0),
        };

        Reportable::from(report).dispatch(&emailer, None);
        assert_eq!(emailer.seen.get(), 1);
    }
}
