//! Routes confirmed error reports to the log instead of the mail client.
//!
//! Run with `ERROR_REPORTER_TRACING=warn,summary-only` to change how the
//! events look.

use std::sync::Arc;

use error_reporter::{ErrorReporter, Failure, ModalChoice, Report, testing::ScriptedPresenter};
use error_reporter_tracing::TracingEmailer;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("failed to load {path}")]
struct LoadError {
    path: String,
    source: std::io::Error,
}

fn load(path: &str) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|source| LoadError {
        path: path.to_string(),
        source,
    })
}

fn main() {
    tracing_subscriber::fmt().init();

    // A headless build answers every dialog with "Report Problem".
    let reporter = ErrorReporter::new(ScriptedPresenter::new(ModalChoice::Primary))
        .with_emailer(Arc::new(TracingEmailer::new()));

    if let Err(error) = load("/does/not/exist.library") {
        reporter.report(Failure::new(error), Some("What were you doing when this happened?"));
    }

    let report = Report::new(
        Failure::msg("the library index is out of date"),
        Some("Opened the library while a sync was running.".to_string()),
    );
    reporter.report(report, None);
}
