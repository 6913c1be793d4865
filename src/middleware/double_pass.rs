//! Legacy `(request, response, next)` callables as middleware.

use std::any::type_name;
use std::fmt;

use super::callable::{IntoOutcome, settle};
use crate::error::Error;
use crate::handler::{HandlerKind, Middleware};
use crate::next::Next;
use crate::request::Request;
use crate::response::Response;

/// The continuation handed to a double-pass callable.
///
/// Unlike [`Next`], it only continues with an explicit response: the one
/// the callable received has been moved into it.
pub struct DoublePassNext<'a>(Next<'a>);

impl DoublePassNext<'_> {
    pub fn run(self, req: Request, res: Response) -> Result<Response, Error> {
        self.0.run_with(req, res)
    }

    /// The path seen by the current pipeline level.
    pub fn path(&self) -> &str {
        self.0.path()
    }
}

/// A `(request, response, next)` callable decorated as [`Middleware`].
///
/// Created by [`double_pass`].
#[derive(Clone)]
pub struct DoublePassMiddleware<F>(F);

impl<F, R> Middleware for DoublePassMiddleware<F>
where
    F: Fn(Request, Response, DoublePassNext<'_>) -> R + Send + Sync,
    R: IntoOutcome,
{
    fn process(&self, req: Request, mut next: Next<'_>) -> Result<Response, Error> {
        let res = next.take_response();
        settle::<F, R>((self.0)(req, res, DoublePassNext(next)).into_outcome())
    }

    fn kind(&self) -> HandlerKind {
        HandlerKind::DoublePass
    }
}

impl<F> fmt::Debug for DoublePassMiddleware<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DoublePassMiddleware").field(&type_name::<F>()).finish()
    }
}

/// Decorates a legacy double-pass callable as middleware.
///
/// The callable receives the response threaded through the dispatch
/// (initially the one passed to [`Pipeline::dispatch`](crate::Pipeline::dispatch))
/// and must return a response, typically the one `next` returned.
///
/// ```rust
/// use strata::{Pipeline, Request, Response, middleware::double_pass};
///
/// let mut app = Pipeline::new();
/// app.pipe(double_pass(|req, res: Response, next| next.run(req, res.write("a"))));
/// app.pipe(double_pass(|_req, res: Response, _next| res.write("b")));
///
/// let res = app.handle(Request::get("/"), Response::new()).unwrap();
/// assert_eq!(res.body_text(), "ab");
/// ```
pub fn double_pass<F, R>(f: F) -> DoublePassMiddleware<F>
where
    F: Fn(Request, Response, DoublePassNext<'_>) -> R + Send + Sync,
    R: IntoOutcome,
{
    DoublePassMiddleware(f)
}
