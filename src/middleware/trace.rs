//! Per-request tracing.

use std::time::Instant;

use tracing::{error, info, info_span};

use crate::error::Error;
use crate::handler::Middleware;
use crate::next::Next;
use crate::request::Request;
use crate::response::Response;

/// Opens an `info` span carrying method and path around the rest of the
/// pipeline, then logs the status and latency, or the error that aborted
/// the dispatch.
///
/// Pipe it first so the span covers every other middleware.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl Middleware for Trace {
    fn process(&self, req: Request, next: Next<'_>) -> Result<Response, Error> {
        let span = info_span!("request", method = %req.method(), path = %req.path());
        let _guard = span.enter();
        let started = Instant::now();

        match next.run(req) {
            Ok(res) => {
                info!(
                    status = res.status_code().as_u16(),
                    latency_us = started.elapsed().as_micros() as u64,
                    "request completed",
                );
                Ok(res)
            }
            Err(e) => {
                error!(
                    error = %e,
                    latency_us = started.elapsed().as_micros() as u64,
                    "request failed",
                );
                Err(e)
            }
        }
    }
}
