//! Reporting errors that come from anyhow code.
//!
//! # Running this Example
//!
//! ```bash
//! cargo run --example anyhow_failure --features compat-anyhow1
//! ```

use std::sync::Arc;

use anyhow::Context;
use error_reporter::{
    compat::IntoFailure,
    prelude::*,
    testing::{EmailCall, RecordingEmailer, ScriptedPresenter},
};

fn parse_port(value: &str) -> anyhow::Result<u16> {
    value
        .parse::<u16>()
        .with_context(|| format!("invalid port {value:?}"))
}

fn main() {
    let presenter = ScriptedPresenter::new(ModalChoice::Primary);
    let emailer = Arc::new(RecordingEmailer::new());
    let reporter = ErrorReporter::new(presenter.clone()).with_emailer(emailer.clone());

    // `.into_failure()` keeps the anyhow context chain for the detail section.
    if let Err(failure) = parse_port("80a").into_failure() {
        reporter.report(failure, None);
    }

    for request in presenter.requests() {
        println!("{}", request.body_text);
    }
    for call in emailer.calls() {
        if let EmailCall::Error { message, .. } = call {
            println!("Reported: {message}");
        }
    }
}
