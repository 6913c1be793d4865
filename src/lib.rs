//! # strata
//!
//! Path-scoped middleware pipelines. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! A [`Pipeline`] is an ordered queue of middleware, each scoped to a path
//! prefix. A dispatch walks the queue in order. Every entry whose prefix
//! matches sees the request with that prefix stripped and decides: answer
//! with a [`Response`], or hand the request on through [`Next::run`]. When
//! nobody answers, the caller's [`Fallback`] does.
//!
//! Prefix matching is segment-aligned: `/foo` matches `/foo`, `/foo/` and
//! `/foo/bar`, never `/foobar`.
//!
//! Transport, header and body encoding, TLS, and routing by verb or query
//! string belong to whatever feeds requests in. strata only composes.
//!
//! ## Quick start
//!
//! ```rust
//! use strata::{NotFound, Pipeline, Request, Response};
//! use strata::middleware::{Trace, middleware};
//!
//! let mut admin = Pipeline::new();
//! admin.pipe_at("/users", middleware(|req: Request, _next| {
//!     Response::text(format!("admin users, rest {}", req.path()))
//! }));
//!
//! let mut app = Pipeline::new();
//! app.pipe(Trace)
//!     .pipe_at("/admin", admin)
//!     .pipe(middleware(|req: Request, next| {
//!         // siblings always see the unmodified path
//!         assert!(!req.path().starts_with("/users"));
//!         next.run(req)
//!     }));
//!
//! let res = app
//!     .dispatch(Request::get("/admin/users/7"), Response::new(), &NotFound)
//!     .unwrap();
//! assert_eq!(res.body_text(), "admin users, rest /7");
//!
//! let res = app
//!     .dispatch(Request::get("/admin/groups"), Response::new(), &NotFound)
//!     .unwrap();
//! assert_eq!(res.body_text(), "Cannot GET /admin/groups");
//! ```
//!
//! ## Errors
//!
//! A pipeline never catches anything. An [`Error`] returned by any
//! middleware, or raised by a decorated callable that failed to produce a
//! response, aborts the whole dispatch and comes back to the caller as is.

mod error;
mod fallback;
mod handler;
mod next;
mod path;
mod pipeline;
mod request;
mod response;

pub mod middleware;

pub use error::{BoxError, Error};
pub use fallback::{Fallback, Noop, NotFound};
pub use handler::{Handler, HandlerKind, IntoHandler, Middleware, MiddlewareFn};
pub use next::Next;
pub use path::Prefix;
pub use pipeline::{Entry, Pipeline};
pub use request::Request;
pub use response::{ContentType, Response, ResponseBuilder};
