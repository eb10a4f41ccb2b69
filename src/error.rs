//! Errors returned by this crate.
//!
//! Configuration problems ([`ConfigError`]) are programming errors in the
//! host application and are meant to be propagated out of startup code with
//! `?`. Delivery problems ([`DeliveryError`]) are only visible through
//! [`TextEmailer::send`](crate::TextEmailer::send); the [`ReportEmailer`]
//! methods log and swallow them.
//!
//! [`ReportEmailer`]: crate::ReportEmailer

use crate::app_info::MetadataKey;

/// The reporting machinery was not set up correctly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required piece of application metadata could not be resolved.
    #[error("expected {0} to be set in the application metadata")]
    MissingMetadata(MetadataKey),
    /// The support address cannot be used as a mail recipient.
    #[error("the support address is not a usable email address: {reason}")]
    InvalidSupportAddress {
        /// Why it was rejected.
        reason: &'static str,
    },
    /// An alert was requested before an emailer was configured.
    #[error("set the emailer before creating an error alert")]
    MissingEmailer,
    /// The emailer slot can only be written once.
    #[error("the emailer has already been set")]
    EmailerAlreadySet,
}

/// A `mailto:` URI could not be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailtoError {
    /// The recipient is not a plausible email address.
    #[error("invalid mail recipient {recipient:?}: {reason}")]
    InvalidRecipient {
        /// The rejected recipient.
        recipient: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// The platform refused to open a URI.
#[derive(Debug, thiserror::Error)]
#[error("could not open {uri}")]
pub struct OpenError {
    /// The URI that could not be opened.
    pub uri: String,
    /// The platform error, when there is one.
    #[source]
    pub source: Option<std::io::Error>,
}

/// A report could not be handed off.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The compose mechanism was available but failed to start.
    #[error("the compose mechanism failed to start")]
    Compose,
    /// Building the fallback `mailto:` URI failed.
    #[error(transparent)]
    Mailto(#[from] MailtoError),
    /// Opening the fallback `mailto:` URI failed.
    #[error(transparent)]
    Open(#[from] OpenError),
}
