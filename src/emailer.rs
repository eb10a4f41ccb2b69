//! The capability an [`ErrorAlert`](crate::ErrorAlert) hands confirmed
//! reports to.
//!
//! [`ReportEmailer`] is deliberately small: three fire-and-forget methods,
//! one per kind of payload. The alert never learns which mechanism sits
//! behind it, so delivery can be swapped (email composition with
//! [`TextEmailer`](crate::TextEmailer), structured logging with
//! `error-reporter-tracing`, or a recording double in tests) without touching
//! the alert.

use std::{rc::Rc, sync::Arc};

use crate::{Failure, Report};

/// A mechanism that delivers error reports.
///
/// Every method takes an optional `instructions` preamble, typically asking
/// the user to describe what they were doing. Implementations decide how the
/// preamble is combined with the payload.
///
/// None of the methods return a value: the caller has no way to react to a
/// delivery failure, so implementations log such failures themselves.
///
/// # Examples
///
/// ```
/// use std::sync::Mutex;
///
/// use error_reporter::{Failure, Report, ReportEmailer};
///
/// #[derive(Default)]
/// struct Stderr {
///     sent: Mutex<usize>,
/// }
///
/// impl ReportEmailer for Stderr {
///     fn email_text(&self, text: &str, instructions: Option<&str>) {
///         if let Some(instructions) = instructions {
///             eprintln!("{instructions}");
///         }
///         eprintln!("{text}");
///         *self.sent.lock().unwrap() += 1;
///     }
///
///     fn email_error(&self, error: &Failure, instructions: Option<&str>) {
///         self.email_text(&error.message(), instructions);
///     }
///
///     fn email_report(&self, report: &Report, instructions: Option<&str>) {
///         self.email_text(&report.summary(), instructions);
///     }
/// }
///
/// let stderr = Stderr::default();
/// stderr.email_report(&Report::from_failure(Failure::msg("oops")), None);
/// assert_eq!(*stderr.sent.lock().unwrap(), 1);
/// ```
pub trait ReportEmailer {
    /// Sends freeform text.
    fn email_text(&self, text: &str, instructions: Option<&str>);

    /// Sends a raw failure.
    fn email_error(&self, error: &Failure, instructions: Option<&str>);

    /// Sends a report.
    fn email_report(&self, report: &Report, instructions: Option<&str>);
}

macro_rules! forward_emailer {
    ($($ptr:ty),* $(,)?) => {$(
        impl<E: ReportEmailer + ?Sized> ReportEmailer for $ptr {
            fn email_text(&self, text: &str, instructions: Option<&str>) {
                (**self).email_text(text, instructions)
            }

            fn email_error(&self, error: &Failure, instructions: Option<&str>) {
                (**self).email_error(error, instructions)
            }

            fn email_report(&self, report: &Report, instructions: Option<&str>) {
                (**self).email_report(report, instructions)
            }
        }
    )*};
}

forward_emailer!(&E, Box<E>, Rc<E>, Arc<E>);
