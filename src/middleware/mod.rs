//! Middleware decorators and built-in middleware.
//!
//! Plain functions do not implement [`Middleware`](crate::Middleware) on
//! their own; wrap them so the pipeline knows which calling convention they
//! follow:
//!
//! - [`middleware`]: `(request, next) -> response`
//! - [`double_pass`]: legacy `(request, response, next) -> response`
//!
//! Both enforce the response contract: a callable that returns anything
//! but a response fails the dispatch with
//! [`Error::MissingResponse`](crate::Error::MissingResponse). Falling
//! through is spelled `next.run(req)`, never "return nothing".
//!
//! [`path`] scopes a single middleware to a prefix without a pipeline, and
//! [`Trace`] records a span per request.

mod callable;
mod double_pass;
mod path;
mod trace;

pub use callable::{CallableMiddleware, IntoOutcome, Outcome, middleware};
pub use double_pass::{DoublePassMiddleware, DoublePassNext, double_pass};
pub use path::{PathMiddleware, path};
pub use trace::Trace;
