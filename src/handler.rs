//! The middleware capability and its type-erased, tagged form.
//!
//! A pipeline holds middleware of *different* concrete types in one queue,
//! so every registered value is erased behind `Arc<dyn Middleware>` and
//! stored together with a [`HandlerKind`] tag:
//!
//! ```text
//! middleware(|req, next| next.run(req))       ← user writes this
//!        ↓ pipeline.pipe(…)
//! IntoHandler::into_handler                   ← blanket impl over Middleware
//!        ↓
//! Handler { kind: Function, inner: Arc<CallableMiddleware<F>> }
//!        ↓
//! handler.process(req, next)  at dispatch     ← one vtable call
//! ```
//!
//! Statically typed registration cannot produce an invalid handler. Values
//! that arrive type-erased (plugin registries, configuration-driven
//! assembly) go through [`Handler::from_any`], which checks them against the
//! known capability set up front and fails with
//! [`Error::InvalidHandler`] before any request is dispatched.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::Error;
use crate::middleware::{PathMiddleware, Trace};
use crate::next::Next;
use crate::pipeline::Pipeline;
use crate::request::Request;
use crate::response::Response;

/// A function-pointer middleware, accepted by [`Handler::from_any`].
pub type MiddlewareFn = fn(Request, Next<'_>) -> Result<Response, Error>;

/// A unit of request processing.
///
/// `process` either produces a response itself (short-circuit) or delegates
/// to the rest of the pipeline through [`Next::run`]. Errors are not caught
/// anywhere inside a pipeline; return `Err` only to abort the dispatch.
///
/// ```rust
/// use strata::{Error, Middleware, Next, Request, Response};
/// use http::StatusCode;
///
/// struct RequireToken;
///
/// impl Middleware for RequireToken {
///     fn process(&self, req: Request, next: Next<'_>) -> Result<Response, Error> {
///         if req.header("authorization").is_none() {
///             return Ok(Response::status(StatusCode::UNAUTHORIZED));
///         }
///         next.run(req)
///     }
/// }
/// ```
pub trait Middleware: Send + Sync {
    fn process(&self, req: Request, next: Next<'_>) -> Result<Response, Error>;

    /// Capability tag recorded at registration.
    fn kind(&self) -> HandlerKind {
        HandlerKind::External
    }
}

impl<M: Middleware + ?Sized> Middleware for Arc<M> {
    fn process(&self, req: Request, next: Next<'_>) -> Result<Response, Error> {
        (**self).process(req, next)
    }

    fn kind(&self) -> HandlerKind {
        (**self).kind()
    }
}

impl<M: Middleware + ?Sized> Middleware for Box<M> {
    fn process(&self, req: Request, next: Next<'_>) -> Result<Response, Error> {
        (**self).process(req, next)
    }

    fn kind(&self) -> HandlerKind {
        (**self).kind()
    }
}

/// The closed set of handler shapes a pipeline distinguishes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum HandlerKind {
    /// A `(request, next)` callable wrapped by [`middleware`](crate::middleware::middleware).
    Function,
    /// A legacy `(request, response, next)` callable wrapped by
    /// [`double_pass`](crate::middleware::double_pass).
    DoublePass,
    /// A nested [`Pipeline`].
    Pipeline,
    /// A single handler scoped by [`path`](crate::middleware::path).
    Path,
    /// Any other [`Middleware`] implementation.
    External,
}

impl HandlerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Function   => "function",
            Self::DoublePass => "double-pass",
            Self::Pipeline   => "pipeline",
            Self::Path       => "path",
            Self::External   => "external",
        }
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered, type-erased middleware.
///
/// Cloning is one atomic increment; the underlying middleware is shared.
#[derive(Clone)]
pub struct Handler {
    kind: HandlerKind,
    inner: Arc<dyn Middleware>,
}

impl Handler {
    pub fn new<M: Middleware + 'static>(middleware: M) -> Self {
        let kind = middleware.kind();
        Self { kind, inner: Arc::new(middleware) }
    }

    /// Accepts a type-erased value if it belongs to the known capability set:
    /// [`Handler`], [`Pipeline`], [`Trace`], [`PathMiddleware`],
    /// `Arc<dyn Middleware>`, `Box<dyn Middleware>` or a [`MiddlewareFn`]
    /// pointer.
    ///
    /// Generic middleware such as [`CallableMiddleware<F>`] cannot be
    /// recognised behind `dyn Any`; erase them as `Box<dyn Middleware>` or
    /// wrap them in a [`Handler`] first.
    ///
    /// [`Trace`]: crate::middleware::Trace
    /// [`PathMiddleware`]: crate::middleware::PathMiddleware
    /// [`CallableMiddleware<F>`]: crate::middleware::CallableMiddleware
    pub fn from_any(value: Box<dyn Any + Send + Sync>) -> Result<Self, Error> {
        let value = match value.downcast::<Handler>() {
            Ok(handler) => return Ok(*handler),
            Err(value) => value,
        };
        let value = match value.downcast::<Pipeline>() {
            Ok(pipeline) => return Ok(Self::new(*pipeline)),
            Err(value) => value,
        };
        let value = match value.downcast::<Trace>() {
            Ok(trace) => return Ok(Self::new(*trace)),
            Err(value) => value,
        };
        let value = match value.downcast::<PathMiddleware>() {
            Ok(scoped) => return Ok(Self::new(*scoped)),
            Err(value) => value,
        };
        let value = match value.downcast::<Arc<dyn Middleware>>() {
            Ok(shared) => {
                let kind = shared.kind();
                return Ok(Self { kind, inner: *shared });
            }
            Err(value) => value,
        };
        let value = match value.downcast::<Box<dyn Middleware>>() {
            Ok(boxed) => {
                let kind = boxed.kind();
                return Ok(Self { kind, inner: Arc::from(*boxed) });
            }
            Err(value) => value,
        };
        match value.downcast::<MiddlewareFn>() {
            Ok(f) => Ok(Self::new(crate::middleware::middleware(*f))),
            Err(_) => Err(Error::InvalidHandler),
        }
    }

    pub fn kind(&self) -> HandlerKind {
        self.kind
    }

    pub fn process(&self, req: Request, next: Next<'_>) -> Result<Response, Error> {
        self.inner.process(req, next)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").field("kind", &self.kind).finish_non_exhaustive()
    }
}

/// Conversion into a registered [`Handler`].
///
/// Implemented for every [`Middleware`] and for `Handler` itself; raw
/// closures are wrapped first with [`middleware`](crate::middleware::middleware)
/// or [`double_pass`](crate::middleware::double_pass).
pub trait IntoHandler {
    fn into_handler(self) -> Handler;
}

impl<M: Middleware + 'static> IntoHandler for M {
    fn into_handler(self) -> Handler {
        Handler::new(self)
    }
}

impl IntoHandler for Handler {
    fn into_handler(self) -> Handler {
        self
    }
}
