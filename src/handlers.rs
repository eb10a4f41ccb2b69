//! Handlers that control how a [`Failure`] renders its message and its
//! debug description.
//!
//! A [`Failure`] is type-erased: once constructed, the only things the rest of
//! the crate can ask of it are a short human-readable message (shown as the
//! alert summary) and, when available, a verbose rendering (shown as the alert
//! detail and sent by [`TextEmailer`] for raw failures). Handlers are the types
//! that decide how those two strings are produced for a given value.
//!
//! # Built-in Handlers
//!
//! ## [`Error`]
//!
//! For types implementing [`core::error::Error`]. The message is the error's
//! `Display` output. The debug description is its `Debug` output followed by
//! one `Caused by:` line for every link in the [`source`] chain. This is the
//! handler selected by [`Failure::new`] and the blanket `From` conversion.
//!
//! ## [`Message`]
//!
//! For plain messages that carry no structured debug representation. The
//! debug description is absent, so alerts show an empty detail section. This
//! is the handler selected by [`Failure::msg`].
//!
//! # Custom Handlers
//!
//! Error types from other libraries that do not implement
//! [`core::error::Error`] (such as `anyhow::Error`) get their own handler in
//! the [`compat`](crate::compat) modules. You can write your own and use it
//! through [`Failure::new_custom`]:
//!
//! ```
//! use core::fmt;
//!
//! use error_reporter::{Failure, handlers::FailureHandler};
//!
//! struct ExitCode(i32);
//!
//! struct ExitCodeHandler;
//!
//! impl FailureHandler<ExitCode> for ExitCodeHandler {
//!     fn message(value: &ExitCode, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "helper process exited with status {}", value.0)
//!     }
//! }
//!
//! let failure = Failure::new_custom::<ExitCodeHandler, _>(ExitCode(3));
//! assert_eq!(failure.message(), "helper process exited with status 3");
//! assert_eq!(failure.debug_description(), None);
//! ```
//!
//! [`Failure`]: crate::Failure
//! [`Failure::new`]: crate::Failure::new
//! [`Failure::msg`]: crate::Failure::msg
//! [`Failure::new_custom`]: crate::Failure::new_custom
//! [`TextEmailer`]: crate::TextEmailer
//! [`source`]: core::error::Error::source

use core::fmt;

/// Controls how a value wrapped in a [`Failure`](crate::Failure) is rendered.
///
/// Only [`message`](FailureHandler::message) is required. Handlers that can
/// produce a verbose rendering override [`has_debug`](FailureHandler::has_debug)
/// and [`debug`](FailureHandler::debug) together.
pub trait FailureHandler<F>: 'static {
    /// Writes the short human-readable message for `value`.
    fn message(value: &F, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Whether `value` has a verbose rendering at all.
    fn has_debug(_value: &F) -> bool {
        false
    }

    /// Writes the verbose rendering for `value`.
    ///
    /// Only called when [`has_debug`](FailureHandler::has_debug) returned
    /// `true`.
    fn debug(_value: &F, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }

    /// The underlying error, if `value` can be viewed as one.
    fn source(_value: &F) -> Option<&(dyn core::error::Error + 'static)> {
        None
    }
}

/// Handler for types implementing [`core::error::Error`].
///
/// # Example
///
/// ```
/// use error_reporter::Failure;
///
/// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "settings.toml");
/// let failure = Failure::new(io);
///
/// assert_eq!(failure.message(), "settings.toml");
/// assert!(failure.debug_description().unwrap().contains("NotFound"));
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Error;

impl<E> FailureHandler<E> for Error
where
    E: core::error::Error + 'static,
{
    fn message(value: &E, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(value, f)
    }

    fn has_debug(_value: &E) -> bool {
        true
    }

    fn debug(value: &E, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(value, f)?;
        let mut source = value.source();
        while let Some(cause) = source {
            write!(f, "\nCaused by: {cause}")?;
            source = cause.source();
        }
        Ok(())
    }

    fn source(value: &E) -> Option<&(dyn core::error::Error + 'static)> {
        Some(value)
    }
}

/// Handler for plain messages without a debug representation.
///
/// # Example
///
/// ```
/// use error_reporter::Failure;
///
/// let failure = Failure::msg("the document could not be autosaved");
/// assert_eq!(failure.message(), "the document could not be autosaved");
/// assert_eq!(failure.debug_description(), None);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Message;

impl<M> FailureHandler<M> for Message
where
    M: fmt::Display,
{
    fn message(value: &M, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(value, f)
    }
}
