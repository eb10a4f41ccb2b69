//! Integration with the [`rootcause`] 0.12.x error reporting library.
//!
//! To enable this integration, add the `compat-rootcause` feature flag to
//! your `Cargo.toml`.
//!
//! A rootcause [`Report`](rootcause::Report) is a tree. The failure message is
//! only the context of the root node, which keeps alert summaries short. The
//! debug description is the fully formatted tree, with attachments and child
//! reports, so nothing is lost in the email.
//!
//! ```
//! use error_reporter::{Reportable, compat::IntoFailure};
//!
//! let report: rootcause::Report = rootcause::report!("the index is corrupt");
//! let reportable = Reportable::from(report.into_failure());
//!
//! assert_eq!(reportable.summary(), "the index is corrupt");
//! assert!(reportable.detail().contains("the index is corrupt"));
//! ```

use core::fmt;

use super::IntoFailure;
use crate::{Failure, handlers::FailureHandler};

/// A handler for [`rootcause::Report`].
#[derive(Copy, Clone, Debug)]
pub struct RootcauseHandler;

impl FailureHandler<rootcause::Report> for RootcauseHandler {
    fn message(value: &rootcause::Report, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&value.format_current_context(), f)
    }

    fn has_debug(_value: &rootcause::Report) -> bool {
        true
    }

    fn debug(value: &rootcause::Report, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(value, f)
    }

    fn source(value: &rootcause::Report) -> Option<&(dyn core::error::Error + 'static)> {
        value.current_context_error_source()
    }
}

impl IntoFailure for rootcause::Report {
    type Output = Failure;

    #[inline(always)]
    fn into_failure(self) -> Self::Output {
        Failure::new_custom::<RootcauseHandler, _>(self)
    }
}

impl<T> IntoFailure for Result<T, rootcause::Report> {
    type Output = Result<T, Failure>;

    #[inline(always)]
    fn into_failure(self) -> Self::Output {
        self.map_err(|e| e.into_failure())
    }
}
