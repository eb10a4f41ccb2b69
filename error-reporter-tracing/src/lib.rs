#![deny(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]

//! Send error reports to [`tracing`] instead of email.
//!
//! [`TracingEmailer`] is a [`ReportEmailer`] that turns every report into a
//! single structured event. Use it in headless builds, in CI, or stacked in
//! front of a real emailer while developing, so confirmed reports end up in
//! the same place as the rest of your logs.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use error_reporter::{
//!     ErrorReporter, Failure, ModalChoice, testing::ScriptedPresenter,
//! };
//! use error_reporter_tracing::TracingEmailer;
//!
//! tracing_subscriber::fmt().init();
//!
//! let reporter = ErrorReporter::new(ScriptedPresenter::new(ModalChoice::Primary))
//!     .with_emailer(Arc::new(TracingEmailer::new()));
//!
//! reporter.report(Failure::msg("the index is corrupt"), Some("What were you doing?"));
//! ```
//!
//! Output:
//! ```text
//! 2026-01-01T00:00:00.000000Z ERROR error_reporter::report: error report kind=error summary=the index is corrupt detail= instructions=What were you doing?
//! ```
//!
//! # Event Fields
//!
//! Every event has the target [`TARGET`] and these fields:
//!
//! - `kind` - `text`, `error` or `report`, after the [`ReportEmailer`]
//!   method that was called
//! - `summary` - the text, the failure message, or the report summary
//! - `detail` - the failure's debug description, or empty
//! - `instructions` - the instructions passed along, or empty
//!
//! # Environment Variables
//!
//! - `ERROR_REPORTER_TRACING` - Comma-separated options:
//!   - `summary-only` - Leave the `detail` field empty
//!   - `error`, `warn`, `info`, `debug`, `trace` - The level of the events
//!     (default `error`)

use std::sync::OnceLock;

use error_reporter::{Failure, Report, ReportEmailer};
use tracing::Level;

/// The target of every event emitted by [`TracingEmailer`].
pub const TARGET: &str = "error_reporter::report";

/// A [`ReportEmailer`] that emits one [`tracing`] event per report.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TracingEmailer {
    /// The level of the emitted events.
    pub level: Level,
    /// Whether to fill in the `detail` field.
    pub include_detail: bool,
}

#[derive(Debug)]
struct TracingEmailerEnvOptions {
    level: Option<Level>,
    summary_only: bool,
}

impl TracingEmailerEnvOptions {
    fn get() -> &'static Self {
        static ERROR_REPORTER_TRACING_FLAGS: OnceLock<TracingEmailerEnvOptions> = OnceLock::new();

        ERROR_REPORTER_TRACING_FLAGS.get_or_init(|| {
            let mut level = None;
            let mut summary_only = false;

            if let Some(var) = std::env::var_os("ERROR_REPORTER_TRACING") {
                for v in var.to_string_lossy().split(',') {
                    let v = v.trim();
                    if v.eq_ignore_ascii_case("summary-only") {
                        summary_only = true;
                    } else if let Ok(parsed) = v.parse::<Level>() {
                        level = Some(parsed);
                    }
                }
            }

            TracingEmailerEnvOptions {
                level,
                summary_only,
            }
        })
    }
}

impl TracingEmailer {
    /// Creates a new [`TracingEmailer`] with default settings.
    ///
    /// Configuration is controlled by environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ERROR_REPORTER_TRACING` - Comma-separated options:
    ///   - `summary-only` - Leave the `detail` field empty
    ///   - `error`, `warn`, `info`, `debug`, `trace` - The level of the
    ///     events (default `error`)
    ///
    /// # Examples
    ///
    /// ```
    /// use error_reporter_tracing::TracingEmailer;
    ///
    /// // Respects ERROR_REPORTER_TRACING environment variable
    /// let emailer = TracingEmailer::new();
    /// ```
    pub fn new() -> Self {
        let env_options = TracingEmailerEnvOptions::get();

        Self {
            level: env_options.level.unwrap_or(Level::ERROR),
            include_detail: !env_options.summary_only,
        }
    }

    /// Sets the level of the emitted events.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets whether the `detail` field is filled in.
    pub fn with_detail(mut self, include_detail: bool) -> Self {
        self.include_detail = include_detail;
        self
    }

    fn emit(&self, kind: &str, summary: &str, detail: &str, instructions: Option<&str>) {
        let detail = if self.include_detail { detail } else { "" };
        let instructions = instructions.unwrap_or_default();

        macro_rules! emit_at {
            ($macro:ident) => {
                tracing::$macro!(
                    target: TARGET,
                    kind = %kind,
                    summary = %summary,
                    detail = %detail,
                    instructions = %instructions,
                    "error report"
                )
            };
        }

        if self.level == Level::ERROR {
            emit_at!(error);
        } else if self.level == Level::WARN {
            emit_at!(warn);
        } else if self.level == Level::INFO {
            emit_at!(info);
        } else if self.level == Level::DEBUG {
            emit_at!(debug);
        } else {
            emit_at!(trace);
        }
    }
}

impl Default for TracingEmailer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportEmailer for TracingEmailer {
    fn email_text(&self, text: &str, instructions: Option<&str>) {
        self.emit("text", text, "", instructions);
    }

    fn email_error(&self, error: &Failure, instructions: Option<&str>) {
        let detail = error.debug_description().unwrap_or_default();
        self.emit("error", &error.message(), &detail, instructions);
    }

    fn email_report(&self, report: &Report, instructions: Option<&str>) {
        self.emit("report", &report.summary(), "", instructions);
    }
}
