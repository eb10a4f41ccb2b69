//! Integration with the [`anyhow`] 1.x error handling library.
//!
//! This module specifically supports `anyhow` version 1.x. To enable this
//! integration, add the `compat-anyhow1` feature flag to your `Cargo.toml`.
//!
//! ```
//! use error_reporter::{Reportable, compat::IntoFailure};
//!
//! let error = anyhow::anyhow!("disk full").context("failed to save draft");
//! let reportable = Reportable::from(error.into_failure());
//!
//! assert_eq!(reportable.summary(), "failed to save draft");
//! assert!(reportable.detail().contains("disk full"));
//! ```

use core::fmt;

use super::IntoFailure;
use crate::{Failure, handlers::FailureHandler};

/// A handler for [`anyhow::Error`] that delegates to anyhow's own formatting.
///
/// - **Message**: [`anyhow::Error`]'s `Display`, the outermost context only
/// - **Debug description**: [`anyhow::Error`]'s `Debug`, including the
///   `Caused by:` chain and a backtrace when one was captured
#[derive(Copy, Clone, Debug)]
pub struct AnyhowHandler;

impl FailureHandler<anyhow::Error> for AnyhowHandler {
    fn message(value: &anyhow::Error, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(value, f)
    }

    fn has_debug(_value: &anyhow::Error) -> bool {
        true
    }

    fn debug(value: &anyhow::Error, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(value, f)
    }

    fn source(value: &anyhow::Error) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&**value)
    }
}

impl IntoFailure for anyhow::Error {
    type Output = Failure;

    #[inline(always)]
    fn into_failure(self) -> Self::Output {
        Failure::new_custom::<AnyhowHandler, _>(self)
    }
}

impl<T> IntoFailure for anyhow::Result<T> {
    type Output = Result<T, Failure>;

    #[inline(always)]
    fn into_failure(self) -> Self::Output {
        self.map_err(|e| e.into_failure())
    }
}
