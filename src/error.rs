//! Unified error type.

/// A boxed error raised by application middleware.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type returned by strata's fallible operations.
///
/// Application-level outcomes (404, 422, etc.) are expressed as
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// broken contracts and failures raised by member middleware. The pipeline
/// itself never catches one: an `Err` aborts the whole dispatch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A dynamically registered value was not one of the erased middleware
    /// shapes [`Handler::from_any`](crate::Handler::from_any) recognises.
    #[error(
        "invalid middleware: expected a Handler, Pipeline, Trace, PathMiddleware, \
         Arc<dyn Middleware>, Box<dyn Middleware> or MiddlewareFn"
    )]
    InvalidHandler,

    /// A decorated callable returned something other than a response.
    #[error(
        "decorated callable middleware of type {middleware} failed to produce a response \
         (returned {returned})"
    )]
    MissingResponse {
        middleware: &'static str,
        returned: &'static str,
    },

    /// Raised by a member middleware or fallback.
    #[error(transparent)]
    Middleware(#[from] BoxError),
}

impl Error {
    /// Wraps any error raised by application code.
    pub fn middleware(err: impl Into<BoxError>) -> Self {
        Self::Middleware(err.into())
    }
}
