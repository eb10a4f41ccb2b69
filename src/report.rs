use core::fmt;

use crate::Failure;

/// A failure paired with optional context supplied by the user.
///
/// Reports are immutable. Once handed to a [`Reportable`](crate::Reportable)
/// they are shared read-only.
///
/// # Examples
///
/// ```
/// use error_reporter::{Failure, Report};
///
/// let report = Report::new(
///     Failure::msg("sync failed"),
///     Some("happened after waking from sleep".to_string()),
/// );
/// assert_eq!(report.summary(), "sync failed\nhappened after waking from sleep");
///
/// let bare = Report::from_failure(Failure::msg("sync failed"));
/// assert_eq!(bare.summary(), "sync failed");
/// ```
#[derive(Debug)]
pub struct Report {
    error: Failure,
    additional_info: Option<String>,
}

impl Report {
    /// Creates a report with optional additional information.
    pub fn new(error: impl Into<Failure>, additional_info: Option<String>) -> Self {
        Self {
            error: error.into(),
            additional_info,
        }
    }

    /// Creates a report without additional information.
    pub fn from_failure(error: impl Into<Failure>) -> Self {
        Self {
            error: error.into(),
            additional_info: None,
        }
    }

    /// The reported failure.
    pub fn error(&self) -> &Failure {
        &self.error
    }

    /// The user-supplied context, if any.
    pub fn additional_info(&self) -> Option<&str> {
        self.additional_info.as_deref()
    }

    /// The failure message, followed by a newline and the additional
    /// information when present.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)?;
        if let Some(info) = &self.additional_info {
            write!(f, "\n{info}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, derive_more::Display, derive_more::Error)]
    #[display("amazing error")]
    struct AmazingError;

    #[test]
    fn test_summary_without_info_has_no_trailing_newline() {
        let report = Report::new(AmazingError, None);
        assert_eq!(report.summary(), "amazing error");
        assert_eq!(report.additional_info(), None);
    }

    #[test]
    fn test_summary_with_info() {
        let report = Report::new(AmazingError, Some("x".to_string()));
        assert_eq!(report.summary(), "amazing error\nx");
        assert_eq!(report.additional_info(), Some("x"));
    }

    #[test]
    fn test_empty_info_is_kept() {
        let report = Report::new(AmazingError, Some(String::new()));
        assert_eq!(report.summary(), "amazing error\n");
    }

    #[test]
    fn test_report_keeps_failure() {
        let report = Report::from_failure(AmazingError);
        assert!(report.error().is::<AmazingError>());
    }
}
