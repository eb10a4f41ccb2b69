//! Commonly used items for convenient importing.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use error_reporter::prelude::*;
//! use error_reporter::testing::{RecordingEmailer, ScriptedPresenter};
//!
//! let reporter = ErrorReporter::new(ScriptedPresenter::new(ModalChoice::Primary))
//!     .with_emailer(Arc::new(RecordingEmailer::new()));
//!
//! let outcome = reporter.report(Report::new(Failure::msg("boom"), None), None);
//! assert_eq!(outcome, AlertOutcome::Confirmed);
//! ```
//!
//! # What's Included
//!
//! - **[`Failure`]**, **[`Report`]** and **[`Reportable`]**: the report model
//! - **[`ReportEmailer`]** and **[`TextEmailer`]**: delivery
//! - **[`ErrorAlert`]**, **[`ErrorReporter`]**, **[`ModalPresenter`]** and
//!   their result types: the dialog
//! - **[`IntoFailure`]**: conversions from other error libraries
//! - **[`app_info!`]**: application identity from Cargo metadata

pub use crate::{
    AlertOutcome, ErrorAlert, ErrorReporter, Failure, ModalChoice, ModalPresenter, Report,
    ReportEmailer, Reportable, TextEmailer, app_info, compat::IntoFailure,
};
