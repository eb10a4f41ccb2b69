//! Compatibility with other error handling libraries.
//!
//! # Overview
//!
//! Applications rarely use one error type everywhere. The error that ends up
//! in an alert might be an `anyhow::Error` from one layer, an `eyre::Report`
//! from another, or a `rootcause::Report` from a third. None of those
//! implement [`core::error::Error`], so the blanket `From` conversion into
//! [`Failure`](crate::Failure) does not apply to them. Each submodule
//! provides a handler that keeps the library's own formatting, plus an
//! [`IntoFailure`] implementation.
//!
//! # Available Integrations
//!
//! - [`anyhow1`] - `anyhow` 1.x (requires the `compat-anyhow1` feature flag)
//! - [`eyre06`] - `eyre` 0.6.x (requires the `compat-eyre06` feature flag)
//! - [`rootcause012`] - `rootcause` 0.12.x (requires the `compat-rootcause`
//!   feature flag)
//!
//! In every case the failure message is the outermost context only, and the
//! debug description is the library's full rendering including the chain of
//! causes.
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "compat-anyhow1")] {
//! use error_reporter::{Report, compat::IntoFailure};
//!
//! fn legacy_export() -> anyhow::Result<()> {
//!     anyhow::bail!("the export target is read-only");
//! }
//!
//! let failure = legacy_export().into_failure().unwrap_err();
//! let report = Report::new(failure, Some("exporting to a USB stick".to_string()));
//! assert_eq!(
//!     report.summary(),
//!     "the export target is read-only\nexporting to a USB stick"
//! );
//! # }
//! ```

/// A trait for converting external error types into a
/// [`Failure`](crate::Failure).
///
/// Implemented by the compatibility modules for the error type of each
/// supported library and for `Result`s carrying it.
pub trait IntoFailure {
    /// The type produced by the conversion.
    ///
    /// For error types, this is [`Failure`](crate::Failure). For `Result`
    /// types, this is `Result<T, Failure>`.
    type Output;

    /// Converts this value, keeping the library's own formatting.
    fn into_failure(self) -> Self::Output;
}

#[cfg(feature = "compat-anyhow1")]
#[cfg_attr(docsrs, doc(cfg(feature = "compat-anyhow1")))]
pub mod anyhow1;

#[cfg(feature = "compat-eyre06")]
#[cfg_attr(docsrs, doc(cfg(feature = "compat-eyre06")))]
pub mod eyre06;

#[cfg(feature = "compat-rootcause")]
#[cfg_attr(docsrs, doc(cfg(feature = "compat-rootcause")))]
pub mod rootcause012;
