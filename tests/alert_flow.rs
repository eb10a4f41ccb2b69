//! End-to-end flows from a failure to a handed-off draft.

use std::sync::{Arc, Mutex};

use error_reporter::{
    AlertOutcome, ConfigError, Delivery, ErrorAlert, ErrorReporter, Failure, ModalChoice,
    ModalPresenter, ModalRequest, Report, ReportEmailer, TextEmailer,
    app_info::{AppInfo, EnvMetadata, MetadataKey, StaticMetadata},
    platform::ComposeOutcome,
    testing::{EmailCall, RecordingCompose, RecordingEmailer, RecordingOpener, ScriptedPresenter},
};

#[derive(Debug, thiserror::Error)]
#[error("failed to open library {name}")]
struct OpenLibraryError {
    name: String,
    #[source]
    source: std::io::Error,
}

fn open_library_error() -> OpenLibraryError {
    OpenLibraryError {
        name: "Photos".to_string(),
        source: std::io::Error::other("permission denied"),
    }
}

fn info() -> AppInfo {
    AppInfo::new("Foo", "support@example.com").with_version("1.2")
}

#[test]
fn confirmed_report_reaches_the_mail_client() {
    let opener = RecordingOpener::new();
    let presenter = ScriptedPresenter::new(ModalChoice::Primary);
    let reporter = ErrorReporter::new(presenter.clone())
        .with_emailer(Arc::new(TextEmailer::new(info(), opener.clone())));

    let report = Report::new(open_library_error(), Some("right after launch".to_string()));
    let outcome = reporter.report(report, Some("What were you doing?"));

    assert_eq!(outcome, AlertOutcome::Confirmed);
    assert_eq!(
        presenter.requests()[0].body_text,
        "failed to open library Photos\nright after launch\n\n"
    );

    let opened = opener.opened();
    assert_eq!(opened.len(), 1);
    assert!(opened[0].starts_with(
        "mailto:support@example.com?subject=Report%20for%20Foo%20%20%28v1.2%29&body="
    ));
    assert!(opened[0].ends_with(
        "What%20were%20you%20doing%3F%0A%0Afailed%20to%20open%20library%20Photos%0Aright%20after%20launch"
    ));
}

#[test]
fn ignored_report_sends_nothing() {
    let opener = RecordingOpener::new();
    let compose = RecordingCompose::new(ComposeOutcome::Invoked);
    let emailer = TextEmailer::new(info(), opener.clone()).with_compose(compose.clone());
    let reporter = ErrorReporter::new(ScriptedPresenter::new(ModalChoice::Secondary))
        .with_emailer(Arc::new(emailer));

    let outcome = reporter.report(Failure::new(open_library_error()), None);

    assert_eq!(outcome, AlertOutcome::Cancelled);
    assert!(compose.drafts().is_empty());
    assert!(opener.opened().is_empty());
}

#[test]
fn raw_error_detail_includes_its_sources() {
    let presenter = ScriptedPresenter::new(ModalChoice::Primary);
    let compose = RecordingCompose::new(ComposeOutcome::Invoked);
    let emailer = TextEmailer::new(info(), RecordingOpener::new()).with_compose(compose.clone());

    ErrorAlert::for_error(open_library_error(), Arc::new(emailer)).display_modal(&presenter, None);

    let body = &presenter.requests()[0].body_text;
    assert!(body.starts_with("failed to open library Photos\n\n"), "{body}");
    assert!(body.contains("Caused by: permission denied"), "{body}");

    let items = &compose.drafts()[0].items;
    assert_eq!(items.len(), 1);
    assert!(items[0].contains("Caused by: permission denied"));
}

#[test]
fn missing_emailer_fails_before_presenting() {
    let presenter = ScriptedPresenter::new(ModalChoice::Primary);
    let reporter = ErrorReporter::new(presenter.clone());

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        reporter.report(Failure::msg("boom"), None);
    }));

    assert!(result.is_err());
    assert!(presenter.requests().is_empty());
}

#[test]
fn emailer_set_later_is_used_by_every_alert() {
    let reporter = ErrorReporter::new(ScriptedPresenter::new(ModalChoice::Primary));
    let emailer = Arc::new(RecordingEmailer::new());

    assert_eq!(
        reporter.try_alert(Failure::msg("early")).unwrap_err(),
        ConfigError::MissingEmailer
    );
    reporter.set_emailer(emailer.clone()).unwrap();

    reporter.report(Failure::msg("first"), None);
    reporter.report(Report::new(Failure::msg("second"), None), Some("describe"));

    assert_eq!(
        emailer.calls(),
        vec![
            EmailCall::Error {
                message: "first".to_string(),
                instructions: None,
            },
            EmailCall::Report {
                summary: "second".to_string(),
                instructions: Some("describe".to_string()),
            },
        ]
    );
}

#[test]
fn emailer_from_metadata() {
    let metadata = StaticMetadata::new()
        .with(MetadataKey::AppName, "Foo")
        .with(MetadataKey::SupportAddress, "support@example.com")
        .with(MetadataKey::Build, "7");
    let opener = RecordingOpener::new();
    let emailer = TextEmailer::from_metadata(&metadata, opener.clone()).unwrap();

    let Delivery::Mailto(uri) = emailer.send("text", None).unwrap() else {
        panic!("expected the mailto fallback");
    };
    assert_eq!(uri.query_value("subject").as_deref(), Some("Report for Foo  (b7)"));
}

#[test]
fn env_metadata_without_variables_is_a_config_error() {
    let metadata = EnvMetadata::with_prefix("ERROR_REPORTER_ALERT_FLOW_UNSET");
    assert_eq!(
        TextEmailer::from_metadata(&metadata, RecordingOpener::new()).unwrap_err(),
        ConfigError::MissingMetadata(MetadataKey::AppName)
    );
}

/// Accepts only the one report it was built for.
struct ExpectReport {
    expected: usize,
    instructions: Mutex<Vec<Option<String>>>,
}

impl ExpectReport {
    fn new(report: &Arc<Report>) -> Self {
        Self {
            expected: Arc::as_ptr(report) as usize,
            instructions: Mutex::default(),
        }
    }
}

impl ReportEmailer for ExpectReport {
    fn email_text(&self, _text: &str, _instructions: Option<&str>) {
        panic!("unexpected email_text");
    }

    fn email_error(&self, _error: &Failure, _instructions: Option<&str>) {
        panic!("unexpected email_error");
    }

    fn email_report(&self, report: &Report, instructions: Option<&str>) {
        assert_eq!(report as *const Report as usize, self.expected);
        self.instructions
            .lock()
            .unwrap()
            .push(instructions.map(str::to_string));
    }
}

#[test]
fn confirmed_alert_hands_over_the_original_report() {
    let report = Arc::new(Report::new(
        open_library_error(),
        Some("steps to reproduce".to_string()),
    ));
    let emailer = Arc::new(ExpectReport::new(&report));
    let presenter = ScriptedPresenter::new(ModalChoice::Primary);

    let outcome =
        ErrorAlert::new(report, emailer.clone()).display_modal(&presenter, Some("please describe"));

    assert_eq!(outcome, AlertOutcome::Confirmed);
    assert_eq!(
        *emailer.instructions.lock().unwrap(),
        vec![Some("please describe".to_string())]
    );
}

#[test]
fn ignored_alert_never_reaches_the_emailer() {
    let report = Arc::new(Report::new(open_library_error(), None));
    let emailer = Arc::new(ExpectReport::new(&report));
    let presenter = ScriptedPresenter::new(ModalChoice::Secondary);

    let outcome =
        ErrorAlert::new(report, emailer.clone()).display_modal(&presenter, Some("please describe"));

    assert_eq!(outcome, AlertOutcome::Cancelled);
    assert!(emailer.instructions.lock().unwrap().is_empty());
}

struct OnScreen;

impl ModalPresenter for OnScreen {
    fn present(&self, _request: &ModalRequest) -> ModalChoice {
        unreachable!("a real dialog was shown during tests")
    }
}

#[test]
#[should_panic(expected = "ErrorAlert involuntarily used in tests")]
fn interactive_presenter_is_refused_in_integration_tests() {
    let alert = ErrorAlert::for_error(Failure::msg("boom"), Arc::new(RecordingEmailer::new()));
    alert.display_modal(&OnScreen, None);
}

#[test]
fn unusable_support_address_fails_at_startup() {
    let metadata = StaticMetadata::new()
        .with(MetadataKey::AppName, "Foo")
        .with(MetadataKey::SupportAddress, "a b@example.com");

    assert!(matches!(
        TextEmailer::from_metadata(&metadata, RecordingOpener::new()),
        Err(ConfigError::InvalidSupportAddress { .. })
    ));
}
