//! The `next` continuation.
//!
//! A [`Next`] is "the rest of the pipeline after this point": the queue of
//! the current pipeline level, a cursor into it, the path that level was
//! dispatched with, and what to do once the queue runs dry. That last part
//! is either the caller's [`Fallback`] or, for a nested pipeline, the
//! parent level's own `Next`. This is how an exhausted inner pipeline hands
//! control back to its parent's remaining entries.
//!
//! ```text
//! outer: [ A, /api → inner, C ]          inner: [ /v1 → X, Y ]
//!
//! GET /api/v2
//!   A ── next ──▶ inner (path /v2) ── /v1 skipped ──▶ Y ── next ──▶ (inner exhausted)
//!                                                           └──▶ outer C (path /api/v2)
//! ```
//!
//! `Next` is consumed by [`run`](Next::run), so a middleware can delegate at
//! most once. Cursor state lives only in the `Next` values on the current
//! call stack; concurrent dispatches on one pipeline never share it.

use tracing::{debug, trace};

use crate::error::Error;
use crate::fallback::Fallback;
use crate::pipeline::Entry;
use crate::request::Request;
use crate::response::Response;

/// The remainder of a pipeline, handed to every middleware.
pub struct Next<'a> {
    queue: &'a [Entry],
    index: usize,
    path: String,
    response: Response,
    done: Done<'a>,
}

/// Where control goes once a level's queue is exhausted.
enum Done<'a> {
    Fallback(&'a dyn Fallback),
    Parent(Box<Next<'a>>),
}

impl<'a> Next<'a> {
    /// Continuation for a top-level dispatch.
    pub(crate) fn root(
        queue: &'a [Entry],
        path: String,
        response: Response,
        fallback: &'a dyn Fallback,
    ) -> Self {
        Self { queue, index: 0, path, response, done: Done::Fallback(fallback) }
    }

    /// Continuation for a pipeline nested inside `parent`'s level.
    ///
    /// The threaded response moves into the nested level and comes back out
    /// through [`run_with`](Next::run_with) if the nested queue runs dry.
    pub(crate) fn nested(queue: &'a [Entry], path: String, mut parent: Next<'a>) -> Self {
        let response = parent.take_response();
        Self { queue, index: 0, path, response, done: Done::Parent(Box::new(parent)) }
    }

    /// The path seen by the current pipeline level.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The response threaded through this dispatch; handed to the fallback
    /// if no middleware produces one of its own.
    pub fn response(&self) -> &Response {
        &self.response
    }

    pub(crate) fn take_response(&mut self) -> Response {
        std::mem::take(&mut self.response)
    }

    /// Continues the dispatch with `req` and returns whatever response
    /// terminates the rest of the chain, unchanged.
    ///
    /// The request's path is reset to the path of the current level first,
    /// so a prefix rewrite never leaks to sibling entries.
    pub fn run(mut self, req: Request) -> Result<Response, Error> {
        let req = if req.path() == self.path {
            req
        } else {
            trace!(from = %req.path(), to = %self.path, "path reset to level path");
            req.with_path(&self.path)
        };
        let queue = self.queue;

        while let Some(entry) = queue.get(self.index) {
            self.index += 1;
            let Some(scoped) = entry.prefix().strip(&self.path) else {
                trace!(prefix = %entry.prefix(), path = %self.path, "entry skipped");
                continue;
            };
            trace!(
                prefix = %entry.prefix(),
                kind = %entry.handler().kind(),
                path = %scoped,
                "entry matched",
            );
            let req = if scoped == self.path { req } else { req.with_path(scoped) };
            return entry.handler().process(req, self);
        }

        let response = self.response;
        match self.done {
            Done::Fallback(fallback) => {
                debug!(path = %req.path(), "queue exhausted, invoking fallback");
                fallback.handle(req, response)
            }
            Done::Parent(parent) => {
                debug!(path = %parent.path, "nested queue exhausted, resuming parent");
                parent.run_with(req, response)
            }
        }
    }

    /// Like [`run`](Next::run), replacing the threaded response first.
    pub fn run_with(mut self, req: Request, response: Response) -> Result<Response, Error> {
        self.response = response;
        self.run(req)
    }
}

impl std::fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Next")
            .field("path", &self.path)
            .field("remaining", &(self.queue.len() - self.index))
            .field("nested", &matches!(self.done, Done::Parent(_)))
            .finish()
    }
}
