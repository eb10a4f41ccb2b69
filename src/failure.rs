use core::{any::Any, fmt, marker::PhantomData};

use crate::handlers::{self, FailureHandler};

/// An opaque failure value, the "something went wrong" half of every report.
///
/// A [`Failure`] can hold any error type that is `Send + Sync + 'static`, a
/// plain message, or (with the matching `compat-*` feature) an error from
/// another error handling library. Whatever it holds, it answers two
/// questions:
///
/// - [`message`](Failure::message): the short human-readable text, and
/// - [`debug_description`](Failure::debug_description): a verbose rendering,
///   if the underlying representation has one.
///
/// `Failure` intentionally does not implement [`core::error::Error`], which is
/// what allows the blanket `From<E: Error>` conversion and therefore `?`.
///
/// # Examples
///
/// ```
/// use error_reporter::Failure;
///
/// fn load() -> Result<String, Failure> {
///     let text = std::fs::read_to_string("/definitely/not/here.toml")?;
///     Ok(text)
/// }
///
/// let failure = load().unwrap_err();
/// assert!(failure.downcast_ref::<std::io::Error>().is_some());
/// assert!(failure.debug_description().is_some());
/// ```
pub struct Failure {
    inner: Box<dyn ErasedFailure>,
}

trait ErasedFailure: Send + Sync + 'static {
    fn fmt_message(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    fn has_debug(&self) -> bool;
    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)>;
    fn as_any(&self) -> &dyn Any;
}

struct Handled<F, H> {
    value: F,
    _handler: PhantomData<fn() -> H>,
}

impl<F, H> ErasedFailure for Handled<F, H>
where
    F: Send + Sync + 'static,
    H: FailureHandler<F>,
{
    fn fmt_message(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        H::message(&self.value, f)
    }

    fn has_debug(&self) -> bool {
        H::has_debug(&self.value)
    }

    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        H::debug(&self.value, f)
    }

    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        H::source(&self.value)
    }

    fn as_any(&self) -> &dyn Any {
        &self.value
    }
}

struct DebugRendering<'a>(&'a dyn ErasedFailure);

impl fmt::Display for DebugRendering<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_debug(f)
    }
}

impl Failure {
    /// Wraps an error type using the [`handlers::Error`] handler.
    pub fn new<E>(error: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        Self::new_custom::<handlers::Error, E>(error)
    }

    /// Creates a failure from a plain message.
    ///
    /// Message failures have no debug description.
    pub fn msg<M>(message: M) -> Self
    where
        M: fmt::Display + Send + Sync + 'static,
    {
        Self::new_custom::<handlers::Message, M>(message)
    }

    /// Wraps `value`, rendering it with the handler `H`.
    ///
    /// See the [`handlers`] module for an example.
    pub fn new_custom<H, F>(value: F) -> Self
    where
        H: FailureHandler<F>,
        F: Send + Sync + 'static,
    {
        Self {
            inner: Box::new(Handled::<F, H> {
                value,
                _handler: PhantomData,
            }),
        }
    }

    /// The short human-readable message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// The verbose rendering, or `None` if the failure has none.
    pub fn debug_description(&self) -> Option<String> {
        if self.inner.has_debug() {
            Some(DebugRendering(&*self.inner).to_string())
        } else {
            None
        }
    }

    /// The wrapped value viewed as an error, if it is one.
    pub fn as_error(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.inner.source()
    }

    /// Returns the wrapped value if it is of type `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.as_any().downcast_ref::<T>()
    }

    /// Whether the wrapped value is of type `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

impl<E> From<E> for Failure
where
    E: core::error::Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt_message(f)
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inner.has_debug() {
            self.inner.fmt_debug(f)
        } else {
            f.debug_tuple("Failure")
                .field(&format_args!("{self}"))
                .finish()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, derive_more::Display, derive_more::Error)]
    #[display("the index is corrupt")]
    struct CorruptIndex {
        source: std::io::Error,
    }

    #[derive(Debug, derive_more::Display, derive_more::Error)]
    #[display("amazing error")]
    struct AmazingError;

    #[test]
    fn test_failure_send_sync() {
        static_assertions::assert_impl_all!(Failure: Send, Sync);
        static_assertions::assert_not_impl_any!(Failure: core::error::Error, Clone);
    }

    #[test]
    fn test_error_message_is_display() {
        let failure = Failure::new(AmazingError);
        assert_eq!(failure.message(), "amazing error");
        assert_eq!(failure.debug_description().as_deref(), Some("AmazingError"));
    }

    #[test]
    fn test_debug_description_walks_sources() {
        let failure = Failure::from(CorruptIndex {
            source: std::io::Error::other("disk went away"),
        });

        let debug = failure.debug_description().unwrap();
        assert!(debug.starts_with("CorruptIndex"));
        assert!(debug.ends_with("\nCaused by: disk went away"));
    }

    #[test]
    fn test_message_failure_has_no_debug() {
        let failure = Failure::msg(format!("lost {} changes", 3));
        assert_eq!(failure.message(), "lost 3 changes");
        assert_eq!(failure.debug_description(), None);
        assert!(failure.as_error().is_none());
        assert_eq!(format!("{failure:?}"), "Failure(lost 3 changes)");
    }

    #[test]
    fn test_downcast() {
        let failure = Failure::new(AmazingError);
        assert!(failure.is::<AmazingError>());
        assert!(failure.downcast_ref::<std::io::Error>().is_none());
        assert_eq!(
            failure.as_error().map(|e| e.to_string()).as_deref(),
            Some("amazing error")
        );
    }
}
