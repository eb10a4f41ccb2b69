use crate::{
    Failure, Report, ReportEmailer,
    app_info::{AppInfo, AppMetadata},
    error::{ConfigError, DeliveryError},
    mailto::MailtoUri,
    platform::{ComposeOutcome, ComposeService, EmailDraft, NoCompose, UrlOpener},
};

/// How a report left the application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// The native compose mechanism took the draft.
    Composed,
    /// The `mailto:` fallback was opened.
    Mailto(MailtoUri),
}

/// A [`ReportEmailer`] that turns reports into email drafts.
///
/// Messages are addressed to the support address from [`AppInfo`] with the
/// subject [`AppInfo::email_subject`]. Sending first tries the configured
/// [`ComposeService`]; if it reports [`ComposeOutcome::Unavailable`], a
/// `mailto:` URI is built and handed to the [`UrlOpener`].
///
/// When instructions are given they come first: as a separate draft item on
/// the compose path, and separated from the text by a blank line in the
/// `mailto:` body.
///
/// # Examples
///
/// ```
/// use error_reporter::{
///     Delivery, TextEmailer,
///     app_info::AppInfo,
///     testing::RecordingOpener,
/// };
///
/// let opener = RecordingOpener::new();
/// let emailer = TextEmailer::new(
///     AppInfo::new("Foo", "support@example.com").with_version("1.2"),
///     opener.clone(),
/// );
///
/// let delivery = emailer.send("the index is corrupt", None).unwrap();
/// assert!(matches!(delivery, Delivery::Mailto(_)));
/// assert_eq!(
///     opener.opened(),
///     vec![
///         "mailto:support@example.com?subject=Report%20for%20Foo%20%20%28v1.2%29\
///          &body=the%20index%20is%20corrupt"
///             .to_string()
///     ]
/// );
/// ```
pub struct TextEmailer {
    info: AppInfo,
    compose: Box<dyn ComposeService + Send + Sync>,
    opener: Box<dyn UrlOpener + Send + Sync>,
}

impl TextEmailer {
    /// Creates an emailer without a compose mechanism: every report goes
    /// through `opener`.
    pub fn new(info: AppInfo, opener: impl UrlOpener + Send + Sync + 'static) -> Self {
        Self {
            info,
            compose: Box::new(NoCompose),
            opener: Box::new(opener),
        }
    }

    /// Resolves [`AppInfo`] from `metadata` and creates an emailer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingMetadata`] when the application name or
    /// support address cannot be resolved, and
    /// [`ConfigError::InvalidSupportAddress`] when the support address cannot
    /// receive mail.
    pub fn from_metadata(
        metadata: &dyn AppMetadata,
        opener: impl UrlOpener + Send + Sync + 'static,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(AppInfo::from_metadata(metadata)?, opener))
    }

    /// Creates an emailer that opens `mailto:` URIs with the system default
    /// handler.
    #[cfg(feature = "system-open")]
    #[cfg_attr(docsrs, doc(cfg(feature = "system-open")))]
    pub fn system(info: AppInfo) -> Self {
        Self::new(info, crate::platform::SystemUrlOpener)
    }

    /// Uses `compose` as the preferred delivery path.
    pub fn with_compose(mut self, compose: impl ComposeService + Send + Sync + 'static) -> Self {
        self.compose = Box::new(compose);
        self
    }

    /// The application identity used for addressing.
    pub fn info(&self) -> &AppInfo {
        &self.info
    }

    /// The draft that would be sent for `text`.
    pub fn draft(&self, text: &str, instructions: Option<&str>) -> EmailDraft {
        EmailDraft {
            recipients: vec![self.info.support_address().to_string()],
            subject: self.info.email_subject(),
            items: [instructions, Some(text)]
                .into_iter()
                .flatten()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Sends `text`, reporting how it went.
    ///
    /// The [`ReportEmailer`] methods call this and log any error.
    ///
    /// # Errors
    ///
    /// - [`DeliveryError::Compose`] when the compose mechanism failed to start
    /// - [`DeliveryError::Mailto`] when the fallback URI could not be built
    /// - [`DeliveryError::Open`] when the fallback URI could not be opened
    pub fn send(&self, text: &str, instructions: Option<&str>) -> Result<Delivery, DeliveryError> {
        let draft = self.draft(text, instructions);

        match self.compose.compose(&draft) {
            ComposeOutcome::Invoked => {
                tracing::debug!(subject = %draft.subject, "handed report to compose mechanism");
                Ok(Delivery::Composed)
            }
            ComposeOutcome::Failed => Err(DeliveryError::Compose),
            ComposeOutcome::Unavailable => {
                tracing::debug!("compose mechanism unavailable, falling back to mailto");
                let uri = MailtoUri::new(&draft.recipients[0], &draft.subject, &draft.body())?;
                self.opener.open(uri.as_str())?;
                Ok(Delivery::Mailto(uri))
            }
        }
    }

    fn deliver(&self, text: &str, instructions: Option<&str>) {
        if let Err(error) = self.send(text, instructions) {
            tracing::warn!(%error, "failed to hand off error report");
        }
    }
}

impl ReportEmailer for TextEmailer {
    fn email_text(&self, text: &str, instructions: Option<&str>) {
        self.deliver(text, instructions);
    }

    fn email_error(&self, error: &Failure, instructions: Option<&str>) {
        let text = error
            .debug_description()
            .unwrap_or_else(|| error.message());
        self.deliver(&text, instructions);
    }

    fn email_report(&self, report: &Report, instructions: Option<&str>) {
        self.deliver(&report.summary(), instructions);
    }
}

impl core::fmt::Debug for TextEmailer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TextEmailer")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app_info::{MetadataKey, StaticMetadata},
        testing::{RecordingCompose, RecordingOpener},
    };

    #[derive(Debug, derive_more::Display, derive_more::Error)]
    #[display("amazing error")]
    struct AmazingError;

    fn info() -> AppInfo {
        AppInfo::new("Foo", "support@example.com")
            .with_version("1.2")
            .with_build("7")
    }

    #[test]
    fn test_text_emailer_send_sync() {
        static_assertions::assert_impl_all!(TextEmailer: Send, Sync);
    }

    #[test]
    fn test_from_metadata_requires_support_address() {
        let metadata = StaticMetadata::new().with(MetadataKey::AppName, "Foo");
        let error = TextEmailer::from_metadata(&metadata, RecordingOpener::new()).unwrap_err();
        assert_eq!(error, ConfigError::MissingMetadata(MetadataKey::SupportAddress));
    }

    #[test]
    fn test_from_metadata_rejects_unusable_support_address() {
        let metadata = StaticMetadata::new()
            .with(MetadataKey::AppName, "Foo")
            .with(MetadataKey::SupportAddress, "support");
        let error = TextEmailer::from_metadata(&metadata, RecordingOpener::new()).unwrap_err();
        assert_eq!(
            error,
            ConfigError::InvalidSupportAddress {
                reason: "it has no @"
            }
        );
    }

    #[test]
    fn test_draft_omits_missing_instructions() {
        let emailer = TextEmailer::new(info(), RecordingOpener::new());
        let draft = emailer.draft("text", None);
        assert_eq!(draft.items, vec!["text".to_string()]);
        assert_eq!(draft.recipients, vec!["support@example.com".to_string()]);
        assert_eq!(draft.subject, "Report for Foo  (v1.2 b7)");
    }

    #[test]
    fn test_draft_puts_instructions_first() {
        let emailer = TextEmailer::new(info(), RecordingOpener::new());
        let draft = emailer.draft("text", Some("please describe"));
        assert_eq!(draft.items, vec!["please describe".to_string(), "text".to_string()]);
    }

    #[test]
    fn test_compose_path_skips_fallback() {
        let compose = RecordingCompose::new(ComposeOutcome::Invoked);
        let opener = RecordingOpener::new();
        let emailer = TextEmailer::new(info(), opener.clone()).with_compose(compose.clone());

        let delivery = emailer.send("text", Some("please describe")).unwrap();

        assert_eq!(delivery, Delivery::Composed);
        assert_eq!(compose.drafts().len(), 1);
        assert_eq!(compose.drafts()[0].items.len(), 2);
        assert!(opener.opened().is_empty());
    }

    #[test]
    fn test_compose_failure_does_not_fall_back() {
        let compose = RecordingCompose::new(ComposeOutcome::Failed);
        let opener = RecordingOpener::new();
        let emailer = TextEmailer::new(info(), opener.clone()).with_compose(compose);

        assert!(matches!(
            emailer.send("text", None),
            Err(DeliveryError::Compose)
        ));
        assert!(opener.opened().is_empty());
    }

    #[test]
    fn test_fallback_includes_instructions_before_text() {
        let compose = RecordingCompose::new(ComposeOutcome::Unavailable);
        let opener = RecordingOpener::new();
        let emailer = TextEmailer::new(info(), opener.clone()).with_compose(compose.clone());

        let Delivery::Mailto(uri) = emailer.send("a & b?", Some("please describe")).unwrap()
        else {
            panic!("expected the mailto fallback");
        };

        assert_eq!(compose.drafts().len(), 1);
        assert_eq!(opener.opened(), vec![uri.as_str().to_string()]);
        assert_eq!(
            uri.query_value("body").as_deref(),
            Some("please describe\n\na & b?")
        );
        assert_eq!(
            uri.query_value("subject").as_deref(),
            Some("Report for Foo  (v1.2 b7)")
        );
    }

    #[test]
    fn test_open_failure_is_reported_by_send_and_swallowed_by_trait() {
        let opener = RecordingOpener::failing();
        let emailer = TextEmailer::new(info(), opener.clone());

        assert!(matches!(
            emailer.send("text", None),
            Err(DeliveryError::Open(_))
        ));
        emailer.email_text("text", None);
        assert_eq!(opener.opened().len(), 2);
    }

    #[test]
    fn test_invalid_support_address_fails_fallback() {
        let emailer = TextEmailer::new(AppInfo::new("Foo", "support"), RecordingOpener::new());
        assert!(matches!(
            emailer.send("text", None),
            Err(DeliveryError::Mailto(_))
        ));
    }

    #[test]
    fn test_email_error_sends_debug_description() {
        let compose = RecordingCompose::new(ComposeOutcome::Invoked);
        let emailer =
            TextEmailer::new(info(), RecordingOpener::new()).with_compose(compose.clone());

        emailer.email_error(&Failure::new(AmazingError), None);
        emailer.email_error(&Failure::msg("plain message"), None);

        let drafts = compose.drafts();
        assert_eq!(drafts[0].items, vec!["AmazingError".to_string()]);
        assert_eq!(drafts[1].items, vec!["plain message".to_string()]);
    }

    #[test]
    fn test_email_report_sends_summary() {
        let compose = RecordingCompose::new(ComposeOutcome::Invoked);
        let emailer =
            TextEmailer::new(info(), RecordingOpener::new()).with_compose(compose.clone());

        let report = Report::new(AmazingError, Some("steps to reproduce".to_string()));
        emailer.email_report(&report, Some("please describe"));

        assert_eq!(
            compose.drafts()[0].items,
            vec![
                "please describe".to_string(),
                "amazing error\nsteps to reproduce".to_string()
            ]
        );
    }
}
