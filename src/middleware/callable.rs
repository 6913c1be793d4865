//! `(request, next)` callables as middleware.

use std::any::type_name;
use std::fmt;

use crate::error::Error;
use crate::handler::{HandlerKind, Middleware};
use crate::next::Next;
use crate::request::Request;
use crate::response::Response;

/// What a decorated callable produced.
pub enum Outcome {
    Response(Response),
    Failed(Error),
    /// Anything that is not a response.
    Missing,
}

/// Return types a decorated callable may have.
///
/// Only [`Response`] (bare, in `Ok`, or in `Some`) counts as producing a
/// response. `()`, strings and `None` are accepted by the type checker so
/// that forgetting to return is caught, and reported, at dispatch time.
pub trait IntoOutcome {
    fn into_outcome(self) -> Outcome;
}

impl IntoOutcome for Response {
    fn into_outcome(self) -> Outcome { Outcome::Response(self) }
}

impl<E: Into<Error>> IntoOutcome for Result<Response, E> {
    fn into_outcome(self) -> Outcome {
        match self {
            Ok(res) => Outcome::Response(res),
            Err(e) => Outcome::Failed(e.into()),
        }
    }
}

impl IntoOutcome for Option<Response> {
    fn into_outcome(self) -> Outcome {
        self.map_or(Outcome::Missing, Outcome::Response)
    }
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Outcome { Outcome::Missing }
}

impl IntoOutcome for &str {
    fn into_outcome(self) -> Outcome { Outcome::Missing }
}

impl IntoOutcome for String {
    fn into_outcome(self) -> Outcome { Outcome::Missing }
}

/// Settles an outcome of callable `F` returning `R`.
pub(super) fn settle<F, R>(outcome: Outcome) -> Result<Response, Error> {
    match outcome {
        Outcome::Response(res) => Ok(res),
        Outcome::Failed(err) => Err(err),
        Outcome::Missing => Err(Error::MissingResponse {
            middleware: type_name::<F>(),
            returned: type_name::<R>(),
        }),
    }
}

/// A `(request, next)` callable decorated as [`Middleware`].
///
/// Created by [`middleware`].
#[derive(Clone)]
pub struct CallableMiddleware<F>(F);

impl<F, R> Middleware for CallableMiddleware<F>
where
    F: Fn(Request, Next<'_>) -> R + Send + Sync,
    R: IntoOutcome,
{
    fn process(&self, req: Request, next: Next<'_>) -> Result<Response, Error> {
        settle::<F, R>((self.0)(req, next).into_outcome())
    }

    fn kind(&self) -> HandlerKind {
        HandlerKind::Function
    }
}

impl<F> fmt::Debug for CallableMiddleware<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CallableMiddleware").field(&type_name::<F>()).finish()
    }
}

/// Decorates `f` as middleware.
///
/// The returned response is passed through untouched. Any non-response
/// return value fails the dispatch with [`Error::MissingResponse`].
///
/// ```rust
/// use strata::{Pipeline, Request, Response, middleware::middleware};
///
/// let mut app = Pipeline::new();
/// app.pipe(middleware(|req: Request, next| {
///     let res = next.run(req)?;
///     Ok::<_, strata::Error>(res.write(" (seen)"))
/// }));
/// app.pipe(middleware(|_req, _next| Response::text("hello")));
///
/// let res = app.handle(Request::get("/"), Response::new()).unwrap();
/// assert_eq!(res.body_text(), "hello (seen)");
/// ```
pub fn middleware<F, R>(f: F) -> CallableMiddleware<F>
where
    F: Fn(Request, Next<'_>) -> R + Send + Sync,
    R: IntoOutcome,
{
    CallableMiddleware(f)
}
