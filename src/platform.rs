//! Platform boundaries used by [`TextEmailer`](crate::TextEmailer).
//!
//! The emailer prefers a native "compose email" mechanism ([`ComposeService`])
//! and falls back to asking the system to open a `mailto:` URI
//! ([`UrlOpener`]). Both are traits so that a GUI integration can plug in its
//! own share sheet or URL handler, and so tests can record what would have
//! been sent.

use std::sync::Arc;

use crate::error::OpenError;

/// A ready-to-send email.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailDraft {
    /// Recipient addresses.
    pub recipients: Vec<String>,
    /// Subject line.
    pub subject: String,
    /// Body items, in order. Never contains placeholder entries for absent
    /// parts.
    pub items: Vec<String>,
}

impl EmailDraft {
    /// The body items joined by blank lines.
    pub fn body(&self) -> String {
        self.items.join("\n\n")
    }
}

/// What happened when a compose mechanism was asked to send a draft.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ComposeOutcome {
    /// The compose flow was started.
    Invoked,
    /// A compose mechanism exists but failed to start.
    Failed,
    /// No compose mechanism is available on this system.
    Unavailable,
}

/// A native interactive "compose email" mechanism.
pub trait ComposeService {
    /// Starts composing `draft`.
    ///
    /// Implementations return [`ComposeOutcome::Unavailable`] when there is
    /// nothing to compose with, which makes the caller fall back to a
    /// `mailto:` URI.
    fn compose(&self, draft: &EmailDraft) -> ComposeOutcome;
}

/// A [`ComposeService`] that is never available.
///
/// Useful on platforms without a share mechanism: every report goes through
/// the `mailto:` fallback.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoCompose;

impl ComposeService for NoCompose {
    fn compose(&self, _draft: &EmailDraft) -> ComposeOutcome {
        ComposeOutcome::Unavailable
    }
}

/// Opens URIs with the system default handler.
pub trait UrlOpener {
    /// Asks the system to open `uri`.
    fn open(&self, uri: &str) -> Result<(), OpenError>;
}

/// Opens URIs through the [`webbrowser`] crate.
///
/// Requires the `system-open` feature.
#[cfg(feature = "system-open")]
#[cfg_attr(docsrs, doc(cfg(feature = "system-open")))]
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemUrlOpener;

#[cfg(feature = "system-open")]
impl UrlOpener for SystemUrlOpener {
    fn open(&self, uri: &str) -> Result<(), OpenError> {
        webbrowser::open(uri).map_err(|source| OpenError {
            uri: uri.to_string(),
            source: Some(source),
        })
    }
}

impl<S: ComposeService + ?Sized> ComposeService for Box<S> {
    fn compose(&self, draft: &EmailDraft) -> ComposeOutcome {
        (**self).compose(draft)
    }
}

impl<S: ComposeService + ?Sized> ComposeService for Arc<S> {
    fn compose(&self, draft: &EmailDraft) -> ComposeOutcome {
        (**self).compose(draft)
    }
}

impl<O: UrlOpener + ?Sized> UrlOpener for Box<O> {
    fn open(&self, uri: &str) -> Result<(), OpenError> {
        (**self).open(uri)
    }
}

impl<O: UrlOpener + ?Sized> UrlOpener for Arc<O> {
    fn open(&self, uri: &str) -> Result<(), OpenError> {
        (**self).open(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_compose_is_unavailable() {
        let draft = EmailDraft {
            recipients: vec!["support@example.com".to_string()],
            subject: "Report for Foo".to_string(),
            items: vec!["text".to_string()],
        };
        assert_eq!(NoCompose.compose(&draft), ComposeOutcome::Unavailable);
        assert_eq!(draft.body(), "text");
    }
}
