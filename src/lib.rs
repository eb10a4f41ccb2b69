#![deny(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Ask the user before turning an unexpected error into a report.
//!
//! ## Overview
//!
//! When something goes wrong that the application cannot recover from on its
//! own, the most useful thing it can do is ask the user whether they want to
//! tell the developers. This crate provides the logic behind that dialog:
//!
//! - a small report model ([`Failure`], [`Report`], [`Reportable`]) that
//!   normalizes "a raw error" and "an error plus what the user was doing"
//!   into one shape,
//! - the [`ErrorAlert`] controller that shows a confirm/cancel dialog and, on
//!   confirmation, hands the report to a [`ReportEmailer`],
//! - [`TextEmailer`], a [`ReportEmailer`] that composes an email to the
//!   support address, preferring a native compose mechanism and falling back
//!   to a `mailto:` URI.
//!
//! The dialog itself, the platform's share mechanism and the system's URL
//! handler are all traits ([`ModalPresenter`],
//! [`ComposeService`](platform::ComposeService),
//! [`UrlOpener`](platform::UrlOpener)), so the crate works with any GUI
//! toolkit and is fully testable with the doubles in [`testing`].
//!
//! ## Quick Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use error_reporter::{
//!     ErrorReporter, Report, TextEmailer,
//!     app_info::AppInfo,
//!     testing::{RecordingOpener, ScriptedPresenter},
//!     ModalChoice,
//! };
//!
//! // At startup: configure the reporter once.
//! let opener = RecordingOpener::new();
//! let emailer = TextEmailer::new(AppInfo::new("Foo", "support@example.com"), opener.clone());
//! let reporter = ErrorReporter::new(ScriptedPresenter::new(ModalChoice::Primary))
//!     .with_emailer(Arc::new(emailer));
//!
//! // Whenever something goes wrong:
//! let error = std::io::Error::other("the library file is locked");
//! let report = Report::new(error, Some("happened right after launch".to_string()));
//! reporter.report(report, Some("Please describe what you were doing."));
//!
//! assert!(opener.opened()[0].starts_with("mailto:support@example.com?subject=Report%20for%20Foo"));
//! ```
//!
//! ## Core Concepts
//!
//! A [`Failure`] is the opaque "what went wrong": any error type, a plain
//! message, or an error from another library via [`compat`]. A [`Report`]
//! adds optional free-form context from the user. A [`Reportable`] is either
//! of the two and is what alerts display: a short
//! [`summary`](Reportable::summary) and a verbose [`detail`](Reportable::detail).
//!
//! Delivery goes through the [`ReportEmailer`] capability. The alert never
//! knows which implementation it has, so logging (see the
//! `error-reporter-tracing` crate) or a test double can stand in for email.
//!
//! ## Configuration Errors
//!
//! A missing emailer or missing application metadata is a programming error,
//! not something the user can fix. Constructors report it as a
//! [`ConfigError`] so startup code can fail fast with `?`, and
//! [`ErrorReporter::alert`] panics rather than show a dialog that cannot do
//! anything.
//!
//! ## Tests
//!
//! [`ErrorAlert::display_modal`] refuses to put real UI on screen while the
//! process runs under automated tests (see [`alert::is_running_tests`]). Use
//! [`testing::ScriptedPresenter`], which resolves synchronously.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events when alerts are shown, when the user
//! decides, and when a report cannot be handed off. It never installs a
//! subscriber.

#[macro_use]
mod macros;

pub mod alert;
pub mod app_info;
pub mod compat;
pub mod error;
pub mod handlers;
pub mod mailto;
pub mod platform;
pub mod prelude;
pub mod testing;

mod emailer;
mod failure;
mod report;
mod reportable;
mod reporter;
mod text_emailer;

pub use self::{
    alert::{AlertOutcome, AlertText, ErrorAlert, ModalChoice, ModalPresenter, ModalRequest},
    emailer::ReportEmailer,
    error::{ConfigError, DeliveryError},
    failure::Failure,
    report::Report,
    reportable::Reportable,
    reporter::ErrorReporter,
    text_emailer::{Delivery, TextEmailer},
};
