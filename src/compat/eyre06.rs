//! Integration with the [`eyre`] 0.6.x error handling library.
//!
//! This module specifically supports `eyre` version 0.6.x. To enable this
//! integration, add the `compat-eyre06` feature flag to your `Cargo.toml`.
//!
//! ```
//! use error_reporter::{Reportable, compat::IntoFailure};
//!
//! let error = eyre::eyre!("connection reset").wrap_err("sync failed");
//! let reportable = Reportable::from(error.into_failure());
//!
//! assert_eq!(reportable.summary(), "sync failed");
//! assert!(reportable.detail().contains("connection reset"));
//! ```

use core::fmt;

use super::IntoFailure;
use crate::{Failure, handlers::FailureHandler};

/// A handler for [`eyre::Report`] that delegates to eyre's own formatting.
///
/// The debug description is whatever the installed eyre handler renders for
/// `{:?}`, so a custom `color-eyre` style handler shows up in reports too.
#[derive(Copy, Clone, Debug)]
pub struct EyreHandler;

impl FailureHandler<eyre::Report> for EyreHandler {
    fn message(value: &eyre::Report, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(value, f)
    }

    fn has_debug(_value: &eyre::Report) -> bool {
        true
    }

    fn debug(value: &eyre::Report, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(value, f)
    }

    fn source(value: &eyre::Report) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&**value)
    }
}

impl IntoFailure for eyre::Report {
    type Output = Failure;

    #[inline(always)]
    fn into_failure(self) -> Self::Output {
        Failure::new_custom::<EyreHandler, _>(self)
    }
}

impl<T> IntoFailure for eyre::Result<T> {
    type Output = Result<T, Failure>;

    #[inline(always)]
    fn into_failure(self) -> Self::Output {
        self.map_err(|e| e.into_failure())
    }
}
