//! `mailto:` URI construction for the fallback delivery path.
//!
//! Each component is percent-encoded on its own, keeping only RFC 3986
//! unreserved characters (and `@` in the recipient). Encoding components
//! separately means `&`, `?`, `=` and `#` inside the subject or body can
//! never be mistaken for URI structure.

use core::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::MailtoError;

const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const RECIPIENT: &AsciiSet = &QUERY_VALUE.remove(b'@');

/// A percent-encoded `mailto:` URI.
///
/// # Examples
///
/// ```
/// use error_reporter::mailto::MailtoUri;
///
/// let uri = MailtoUri::new("support@example.com", "Report for Foo", "a & b").unwrap();
/// assert_eq!(
///     uri.as_str(),
///     "mailto:support@example.com?subject=Report%20for%20Foo&body=a%20%26%20b"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailtoUri(String);

impl MailtoUri {
    /// Builds the URI `mailto:{recipient}?subject={subject}&body={body}`.
    ///
    /// # Errors
    ///
    /// Returns [`MailtoError::InvalidRecipient`] when `recipient` is empty,
    /// has no `@`, or contains whitespace or control characters.
    pub fn new(recipient: &str, subject: &str, body: &str) -> Result<Self, MailtoError> {
        validate_recipient(recipient)?;

        Ok(Self(format!(
            "mailto:{}?subject={}&body={}",
            utf8_percent_encode(recipient, RECIPIENT),
            utf8_percent_encode(subject, QUERY_VALUE),
            utf8_percent_encode(body, QUERY_VALUE),
        )))
    }

    /// The encoded URI.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The decoded value of the query parameter `name`, if present.
    pub fn query_value(&self, name: &str) -> Option<String> {
        let (_, query) = self.0.split_once('?')?;
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| {
                percent_encoding::percent_decode_str(value)
                    .decode_utf8_lossy()
                    .into_owned()
            })
    }
}

/// Why `recipient` cannot be used as a `mailto:` recipient, if it cannot.
pub(crate) fn recipient_problem(recipient: &str) -> Option<&'static str> {
    if recipient.is_empty() {
        Some("it is empty")
    } else if !recipient.contains('@') {
        Some("it has no @")
    } else if recipient
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        Some("it contains whitespace or control characters")
    } else {
        None
    }
}

fn validate_recipient(recipient: &str) -> Result<(), MailtoError> {
    match recipient_problem(recipient) {
        Some(reason) => Err(MailtoError::InvalidRecipient {
            recipient: recipient.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

impl fmt::Display for MailtoUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MailtoUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
