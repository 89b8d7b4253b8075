use ::http::Extensions;
use ::std::fmt;
use ::std::time::Duration;
use ::std::time::Instant;
use ::tokio_util::sync::CancellationToken;

/// Why a [`RequestContext`] is done.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// The context was cancelled, through [`RequestContext::cancel()`].
    Canceled,

    /// The deadline of the context has passed.
    DeadlineExceeded,
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canceled => write!(f, "context canceled"),
            Self::DeadlineExceeded => write!(f, "context deadline exceeded"),
        }
    }
}

impl std::error::Error for ContextError {}

///
/// The execution context attached to a request,
/// carrying cancellation, an optional deadline, and typed values.
///
/// A context is set on a request using [`RequestConfig::set_context()`](crate::RequestConfig::set_context()).
/// The handler can then read it back out of the request it is given.
///
/// ```rust
/// use ::axum_fight::RequestConfig;
/// use ::axum_fight::RequestContext;
/// use ::axum_fight::ResponseRecorder;
/// use ::axum_fight::TestRequest;
/// use ::std::time::Duration;
///
/// let handler = |request: &TestRequest, recorder: &mut ResponseRecorder| {
///     if request.context().is_done() {
///         recorder.set_status(::http::StatusCode::REQUEST_TIMEOUT);
///     }
/// };
///
/// RequestConfig::new()
///     .get("/slow")
///     .set_context(RequestContext::new().with_timeout(Duration::ZERO))
///     .run(&handler, |response, _request| {
///         response.assert_status(::http::StatusCode::REQUEST_TIMEOUT);
///     });
/// ```
///
/// Clones share the same cancellation, so cancelling one cancels them all.
#[derive(Clone, Default)]
pub struct RequestContext {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
    values: Extensions,
}

impl RequestContext {
    /// A context which is never done, unless cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a deadline of now plus the timeout given.
    ///
    /// A timeout of zero gives a context that is already done.
    /// A timeout too large to represent leaves the deadline unchanged.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Sets the deadline for this context.
    ///
    /// If a deadline is already set, the earliest of the two is kept.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    /// Stores a value, which the handler can read back using [`RequestContext::value()`].
    ///
    /// Values are keyed by their type.
    pub fn with_value<T>(mut self, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.values.insert(value);
        self
    }

    /// Returns the value stored for the type given.
    pub fn value<T>(&self) -> Option<&T>
    where
        T: Send + Sync + 'static,
    {
        self.values.get::<T>()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancels this context, and every clone of it.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Returns a token which is cancelled when this context is cancelled.
    ///
    /// This allows async handlers to wait on `cancelled().await`.
    /// Note the token is not triggered by the deadline passing.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Returns true if the context has been cancelled, or it's deadline has passed.
    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }

    /// Returns why this context is done, or `None` if it is still live.
    pub fn err(&self) -> Option<ContextError> {
        if self.cancellation.is_cancelled() {
            return Some(ContextError::Canceled);
        }

        match self.deadline {
            Some(deadline) if deadline <= Instant::now() => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("is_cancelled", &self.cancellation.is_cancelled())
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test_err {
    use super::*;

    #[test]
    fn it_should_not_be_done_by_default() {
        let context = RequestContext::new();

        assert!(!context.is_done());
        assert_eq!(context.err(), None);
    }

    #[test]
    fn it_should_be_canceled_when_cancelled() {
        let context = RequestContext::new();
        context.cancel();

        assert!(context.is_done());
        assert_eq!(context.err(), Some(ContextError::Canceled));
    }

    #[test]
    fn it_should_cancel_clones() {
        let context = RequestContext::new();
        let cloned = context.clone();
        context.cancel();

        assert_eq!(cloned.err(), Some(ContextError::Canceled));
        assert!(cloned.cancellation_token().is_cancelled());
    }

    #[test]
    fn it_should_exceed_a_zero_timeout() {
        let context = RequestContext::new().with_timeout(Duration::ZERO);

        assert_eq!(context.err(), Some(ContextError::DeadlineExceeded));
    }

    #[test]
    fn it_should_not_exceed_a_long_timeout() {
        let context = RequestContext::new().with_timeout(Duration::from_secs(3600));

        assert_eq!(context.err(), None);
    }

    #[test]
    fn it_should_prefer_cancelled_over_deadline() {
        let context = RequestContext::new().with_timeout(Duration::ZERO);
        context.cancel();

        assert_eq!(context.err(), Some(ContextError::Canceled));
    }
}

#[cfg(test)]
mod test_with_timeout {
    use super::*;

    #[test]
    fn it_should_ignore_timeouts_past_the_end_of_time() {
        let context = RequestContext::new().with_timeout(Duration::MAX);

        assert_eq!(context.deadline(), None);
        assert!(!context.is_done());
        assert_eq!(context.err(), None);
    }

    #[test]
    fn it_should_keep_earlier_deadline_on_huge_timeout() {
        let context = RequestContext::new()
            .with_timeout(Duration::ZERO)
            .with_timeout(Duration::MAX);

        assert!(context.deadline().is_some());
        assert_eq!(context.err(), Some(ContextError::DeadlineExceeded));
    }
}
