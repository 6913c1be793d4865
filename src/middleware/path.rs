//! A single middleware scoped to a path prefix.

use crate::error::Error;
use crate::handler::{Handler, HandlerKind, IntoHandler, Middleware};
use crate::next::Next;
use crate::path::Prefix;
use crate::request::Request;
use crate::response::Response;

/// Runs the wrapped handler only when the request path falls under the
/// prefix, with the prefix stripped; otherwise passes straight to `next`.
///
/// Created by [`path`].
#[derive(Clone, Debug)]
pub struct PathMiddleware {
    prefix: Prefix,
    handler: Handler,
}

impl PathMiddleware {
    pub fn prefix(&self) -> &Prefix { &self.prefix }
}

impl Middleware for PathMiddleware {
    fn process(&self, req: Request, next: Next<'_>) -> Result<Response, Error> {
        let Some(scoped) = self.prefix.strip(req.path()) else {
            return next.run(req);
        };
        let req = if scoped == req.path() {
            req
        } else {
            let scoped = scoped.to_owned();
            req.with_path(&scoped)
        };
        // `next` restores the unscoped path when the handler delegates.
        self.handler.process(req, next)
    }

    fn kind(&self) -> HandlerKind {
        HandlerKind::Path
    }
}

/// Scopes `handler` to `prefix`.
///
/// ```rust
/// use strata::{Pipeline, Request, Response, middleware::{middleware, path}};
///
/// let mut app = Pipeline::new();
/// app.pipe(path("/admin", middleware(|req: Request, _next| {
///     Response::text(format!("admin {}", req.path()))
/// })));
///
/// let res = app.handle(Request::get("/admin/users"), Response::new()).unwrap();
/// assert_eq!(res.body_text(), "admin /users");
/// ```
pub fn path(prefix: &str, handler: impl IntoHandler) -> PathMiddleware {
    PathMiddleware { prefix: Prefix::new(prefix), handler: handler.into_handler() }
}
