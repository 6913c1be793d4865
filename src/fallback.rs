//! Terminal continuations.
//!
//! A [`Fallback`] runs only when a pipeline's queue is exhausted without any
//! member producing a response. It receives the request (with the path the
//! top-level dispatch started from) and the response threaded through the
//! dispatch.

use http::StatusCode;

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;

/// The terminal continuation of a top-level dispatch.
///
/// Implemented for any `Fn(Request, Response) -> Result<Response, Error>`.
pub trait Fallback: Send + Sync {
    fn handle(&self, req: Request, res: Response) -> Result<Response, Error>;
}

impl<F> Fallback for F
where
    F: Fn(Request, Response) -> Result<Response, Error> + Send + Sync,
{
    fn handle(&self, req: Request, res: Response) -> Result<Response, Error> {
        self(req, res)
    }
}

/// Returns the response it is given. The default fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct Noop;

impl Fallback for Noop {
    fn handle(&self, _req: Request, res: Response) -> Result<Response, Error> {
        Ok(res)
    }
}

/// Answers `404 Not Found` with `Cannot <METHOD> <path>`.
///
/// The path reported is the one the client asked for, before any pipeline
/// stripped a prefix from it.
#[derive(Clone, Copy, Debug, Default)]
pub struct NotFound;

impl Fallback for NotFound {
    fn handle(&self, req: Request, _res: Response) -> Result<Response, Error> {
        Ok(Response::builder()
            .status(StatusCode::NOT_FOUND)
            .text(format!("Cannot {} {}", req.method(), req.original_path())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_returns_response_unchanged() {
        let res = Response::text("kept");
        let out = Noop.handle(Request::get("/"), res).expect("noop never fails");
        assert_eq!(out.body_text(), "kept");
    }

    #[test]
    fn not_found_reports_original_path() {
        let req = Request::get("/api/users").with_path("/users");
        let out = NotFound.handle(req, Response::new()).expect("not found never fails");
        assert_eq!(out.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(out.body_text(), "Cannot GET /api/users");
    }
}
