//! Asks on the terminal whether to report an error, then prints the draft.
//!
//! # Running this Example
//!
//! ```bash
//! cargo run --example report_problem
//! ```
//!
//! Answer `y` to report the problem. Without a mail client to hand the draft
//! to, the `mailto:` URI is printed instead of opened; build with
//! `--features system-open` to open it with the system default handler.

use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use error_reporter::{ModalRequest, prelude::*};
#[cfg(not(feature = "system-open"))]
use error_reporter::{error::OpenError, platform::UrlOpener};

/// Shows the dialog as text and reads the answer from stdin.
struct TerminalPresenter;

impl ModalPresenter for TerminalPresenter {
    fn present(&self, request: &ModalRequest) -> ModalChoice {
        println!("{}", request.title);
        println!();
        println!("{}", request.body_text.trim_end());
        println!();
        println!("{}", request.informative_text);
        print!(
            "[Y] {} / [n] {}: ",
            request.default_action, request.alternate_action
        );
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return ModalChoice::Secondary;
        }

        // The default action has focus, so an empty answer confirms.
        match answer.trim() {
            "" | "y" | "Y" => ModalChoice::Primary,
            _ => ModalChoice::Secondary,
        }
    }
}

/// Prints URIs instead of opening them.
#[cfg(not(feature = "system-open"))]
struct PrintOpener;

#[cfg(not(feature = "system-open"))]
impl UrlOpener for PrintOpener {
    fn open(&self, uri: &str) -> Result<(), OpenError> {
        println!("Would open: {uri}");
        Ok(())
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("could not import {file}")]
struct ImportError {
    file: String,
    source: io::Error,
}

fn import(file: &str) -> Result<(), ImportError> {
    std::fs::read_to_string(file).map(drop).map_err(|source| ImportError {
        file: file.to_string(),
        source,
    })
}

fn main() {
    #[cfg(feature = "system-open")]
    let emailer = TextEmailer::system(app_info!("support@example.com", build = "demo"));
    #[cfg(not(feature = "system-open"))]
    let emailer = TextEmailer::new(app_info!("support@example.com", build = "demo"), PrintOpener);

    let reporter = ErrorReporter::new(TerminalPresenter).with_emailer(Arc::new(emailer));

    if let Err(error) = import("/does/not/exist.csv") {
        let report = Report::new(
            error,
            Some("Imported a file from the welcome screen.".to_string()),
        );
        let outcome = reporter.report(report, Some("Please describe what you were doing:"));
        println!("{outcome:?}");
    }
}
