//! Ordered, path-scoped middleware pipelines.

use std::any::Any;

use tracing::{debug, debug_span};

use crate::error::Error;
use crate::fallback::{Fallback, Noop};
use crate::handler::{Handler, HandlerKind, IntoHandler, Middleware};
use crate::next::Next;
use crate::path::Prefix;
use crate::request::Request;
use crate::response::Response;

/// One registered middleware and the prefix it is scoped to.
///
/// Entries are immutable once piped.
#[derive(Clone, Debug)]
pub struct Entry {
    prefix: Prefix,
    handler: Handler,
}

impl Entry {
    pub fn prefix(&self) -> &Prefix { &self.prefix }
    pub fn handler(&self) -> &Handler { &self.handler }
}

/// An ordered queue of `(prefix, middleware)` entries.
///
/// Entries run in insertion order. Each one whose prefix matches the
/// request path (see [`Prefix`]) is invoked with the prefix stripped from
/// the path; the others are skipped. The first middleware that returns
/// without calling [`Next::run`] ends the dispatch, and its response is the
/// result. When the queue runs out, the [`Fallback`] decides.
///
/// A `Pipeline` is itself [`Middleware`], so pipelines nest: piped into an
/// outer pipeline, an exhausted inner queue resumes the outer queue rather
/// than ending the dispatch.
///
/// Build it completely before the first dispatch. Dispatching takes `&self`
/// and keeps no cursor in the pipeline, so one instance can serve any
/// number of threads at once.
///
/// ```rust
/// use strata::{Pipeline, Request, Response, middleware::middleware};
///
/// let mut api = Pipeline::new();
/// api.pipe_at("/users", middleware(|req: Request, _next| {
///     Response::text(format!("users at {}", req.path()))
/// }));
///
/// let mut app = Pipeline::new();
/// app.pipe_at("/api", api);
///
/// let res = app.handle(Request::get("/api/users/42"), Response::new()).unwrap();
/// assert_eq!(res.body_text(), "users at /42");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    queue: Vec<Entry>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Appends a middleware scoped to the root prefix.
    pub fn pipe(&mut self, handler: impl IntoHandler) -> &mut Self {
        self.push(Prefix::root(), handler.into_handler())
    }

    /// Appends a middleware scoped to `prefix`.
    ///
    /// `""` and `"/"` mean the root prefix; `foo`, `/foo` and `/foo/` are
    /// all the same prefix.
    pub fn pipe_at(&mut self, prefix: &str, handler: impl IntoHandler) -> &mut Self {
        self.push(Prefix::new(prefix), handler.into_handler())
    }

    /// Appends a type-erased value, validating it against the shapes
    /// [`Handler::from_any`] accepts: [`Handler`], [`Pipeline`],
    /// [`Trace`](crate::middleware::Trace),
    /// [`PathMiddleware`](crate::middleware::PathMiddleware),
    /// `Arc<dyn Middleware>`, `Box<dyn Middleware>` and
    /// [`MiddlewareFn`](crate::MiddlewareFn). Anything else fails with
    /// [`Error::InvalidHandler`] and nothing is appended.
    pub fn try_pipe(
        &mut self,
        prefix: &str,
        handler: Box<dyn Any + Send + Sync>,
    ) -> Result<&mut Self, Error> {
        let handler = Handler::from_any(handler)?;
        Ok(self.push(Prefix::new(prefix), handler))
    }

    fn push(&mut self, prefix: Prefix, handler: Handler) -> &mut Self {
        debug!(%prefix, kind = %handler.kind(), position = self.queue.len(), "middleware piped");
        self.queue.push(Entry { prefix, handler });
        self
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.queue.iter()
    }

    /// Dispatches with the [`Noop`] fallback.
    pub fn handle(&self, req: Request, res: Response) -> Result<Response, Error> {
        self.dispatch(req, res, &Noop)
    }

    /// Dispatches `req` through the queue. `res` is threaded through the
    /// dispatch and handed to `fallback` if no middleware answers.
    pub fn dispatch(
        &self,
        req: Request,
        res: Response,
        fallback: &dyn Fallback,
    ) -> Result<Response, Error> {
        let span = debug_span!("dispatch", method = %req.method(), path = %req.path());
        let _guard = span.enter();
        let path = req.path().to_owned();
        Next::root(&self.queue, path, res, fallback).run(req)
    }
}

impl Middleware for Pipeline {
    fn process(&self, req: Request, next: Next<'_>) -> Result<Response, Error> {
        let path = req.path().to_owned();
        Next::nested(&self.queue, path, next).run(req)
    }

    fn kind(&self) -> HandlerKind {
        HandlerKind::Pipeline
    }
}
