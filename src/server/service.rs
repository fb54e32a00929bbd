use super::request::parse_request;
use super::response::{write_handler_response, write_plain_error};
use crate::dispatcher::{DispatchError, Dispatcher, HandlerResponse, RawRequest};
use may_minihttp::{HttpService, Request, Response};
use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// `may_minihttp` service that feeds every request through a [`Dispatcher`].
///
/// This is where dispatch failures turn into HTTP: an invalid method becomes 400,
/// a failing or panicking handler becomes 500. The body of those responses is generic;
/// details only go to the log.
#[derive(Clone)]
pub struct AppService {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppService {
    #[must_use]
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Dispatch a raw request and fold every failure into a response triple.
    ///
    /// Kept separate from [`HttpService::call`] so it can run without a socket.
    #[must_use]
    pub fn respond(&self, raw: RawRequest) -> HandlerResponse {
        let method = raw.method.clone();
        let target = raw.target.clone();
        let start = Instant::now();

        let outcome = catch_unwind(AssertUnwindSafe(|| self.dispatcher.dispatch_raw(raw)));

        let resp = match outcome {
            Ok(Ok(resp)) => resp,
            Ok(Err(err)) => error_response(&err),
            Err(panic) => {
                let panic_message = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(
                    method = %method,
                    target = %target,
                    panic_message = %panic_message,
                    "Handler panicked - CRITICAL"
                );
                HandlerResponse::text(500, "Internal Server Error")
            }
        };

        info!(
            method = %method,
            target = %target,
            status = resp.status,
            latency_us = start.elapsed().as_micros() as u64,
            "Request completed"
        );
        resp
    }
}

fn error_response(err: &DispatchError) -> HandlerResponse {
    let status = err.status();
    match err {
        DispatchError::InvalidMethod(_) => {
            warn!(error = %err, "Rejected request");
            HandlerResponse::text(status, "Bad Request")
        }
        DispatchError::Handler { .. } | DispatchError::InvalidResponse { .. } => {
            error!(error = %err, "Dispatch failed");
            HandlerResponse::text(status, "Internal Server Error")
        }
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let raw = match parse_request(req) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to read request body");
                write_plain_error(res, 400, "Bad Request");
                return Ok(());
            }
        };
        let resp = self.respond(raw);
        if let Err(e) = write_handler_response(res, &resp) {
            error!(status = resp.status, error = %e, "Response cannot be written");
            write_plain_error(res, 500, "Internal Server Error");
        }
        Ok(())
    }
}
