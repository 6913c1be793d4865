//! Minimal strata example: a nested admin pipeline, a path-scoped guard, and
//! a 404 fallback, dispatched against a handful of paths.
//!
//! Run with:
//!   RUST_LOG=trace cargo run --example basic

use http::{HeaderValue, StatusCode};
use strata::middleware::{Trace, double_pass, middleware, path};
use strata::{Error, Next, NotFound, Pipeline, Request, Response};

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let mut admin = Pipeline::new();
    admin.pipe_at("/users", middleware(list_users));

    let mut app = Pipeline::new();
    app.pipe(Trace)
        .pipe(double_pass(|req, res: Response, next| {
            next.run(req, res.with_header("x-powered-by", HeaderValue::from_static("strata")))
        }))
        .pipe(path("/admin", middleware(require_token)))
        .pipe_at("/admin", admin)
        .pipe_at("/healthz", middleware(|_req: Request, _next: Next<'_>| Response::text("ok")));

    for (path, token) in [
        ("/healthz", None),
        ("/admin/users/42", Some("secret")),
        ("/admin/users/42", None),
        ("/administrator", None),
        ("/admin/groups", Some("secret")),
    ] {
        let mut req = Request::get(path);
        if let Some(token) = token {
            req = req.with_header("authorization", HeaderValue::from_static(token));
        }
        let res = app.dispatch(req, Response::new(), &NotFound)?;
        println!("{path:<18} {} {}", res.status_code(), res.body_text());
    }

    Ok(())
}

// /admin/* without a token never reaches the admin pipeline.
fn require_token(req: Request, next: Next<'_>) -> Result<Response, Error> {
    if req.header("authorization") != Some("secret") {
        return Ok(Response::status(StatusCode::UNAUTHORIZED));
    }
    next.run(req)
}

// Sees only what follows `/admin/users`.
fn list_users(req: Request, _next: Next<'_>) -> Response {
    Response::text(format!("user {} (asked for {})", req.path(), req.original_path()))
}
