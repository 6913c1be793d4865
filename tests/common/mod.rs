//! Shared helpers for integration tests.

use std::sync::Once;

use http::HeaderValue;
use strata::middleware::middleware;
use strata::{Handler, Next, Request, Response};

static TRACING: Once = Once::new();

/// Routes `tracing` output through the test harness so it only shows up
/// for failing tests.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

/// Middleware that answers with an `x-found: true` header.
#[allow(dead_code)]
pub fn found() -> Handler {
    Handler::new(middleware(|_req: Request, _next: Next<'_>| {
        Response::new().with_header("x-found", HeaderValue::from_static("true"))
    }))
}

/// Middleware that echoes the path it was handed.
#[allow(dead_code)]
pub fn echo_path() -> Handler {
    Handler::new(middleware(|req: Request, _next: Next<'_>| Response::text(req.path())))
}
