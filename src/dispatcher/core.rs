//! Dispatcher core - lookup, handler invocation, reply coercion.

use super::handler::Reply;
use super::request::{HandlerRequest, RawRequest};
use super::response::HandlerResponse;
use crate::router::Router;
use arc_swap::ArcSwap;
use http::Method;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Failures surfaced by dispatch. A missing route is not one of them; it is a
/// regular 404 response.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The raw request carried a method that is not a valid HTTP token.
    #[error("invalid HTTP method: {0:?}")]
    InvalidMethod(String),

    /// The handler returned an error. Nothing is recovered locally.
    #[error("handler for {method} {path} failed: {source}")]
    Handler {
        method: Method,
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// The handler returned a full response that cannot be put on the wire.
    #[error("handler for {method} {path} returned a malformed response: {reason}")]
    InvalidResponse {
        method: Method,
        path: String,
        reason: String,
    },
}

impl DispatchError {
    /// Status the hosting server should answer with.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            DispatchError::InvalidMethod(_) => 400,
            DispatchError::Handler { .. } | DispatchError::InvalidResponse { .. } => 500,
        }
    }
}

/// Dispatch a normalized request against a route table.
///
/// The request is consumed: it lives exactly as long as this call.
///
/// # Errors
///
/// [`DispatchError::Handler`] when the handler fails, [`DispatchError::InvalidResponse`]
/// when it returns a triple that fails [`HandlerResponse::validate`].
pub fn dispatch(router: &Router, request: HandlerRequest) -> Result<HandlerResponse, DispatchError> {
    let Some(handler) = router.lookup(&request.method, &request.path) else {
        warn!(
            request_id = %request.request_id,
            method = %request.method,
            path = %request.path,
            "No route matched"
        );
        return Ok(HandlerResponse::not_found(&request.method, &request.path));
    };

    info!(
        request_id = %request.request_id,
        method = %request.method,
        path = %request.path,
        "Request dispatched to handler"
    );

    let start = Instant::now();
    let result = handler.call(&request);
    let latency_us = start.elapsed().as_micros() as u64;

    let reply = match result {
        Ok(reply) => reply,
        Err(source) => {
            error!(
                request_id = %request.request_id,
                method = %request.method,
                path = %request.path,
                latency_us = latency_us,
                error = %source,
                "Handler failed"
            );
            return Err(DispatchError::Handler {
                method: request.method,
                path: request.path,
                source,
            });
        }
    };

    let response = coerce(reply, request.method, request.path)?;
    debug!(
        request_id = %request.request_id,
        status = response.status,
        body_bytes = response.body_len(),
        latency_us = latency_us,
        "Handler response coerced"
    );
    Ok(response)
}

fn coerce(reply: Reply, method: Method, path: String) -> Result<HandlerResponse, DispatchError> {
    match reply {
        Reply::Text(text) => Ok(HandlerResponse::ok(text)),
        Reply::Full(response) => match response.validate() {
            Ok(()) => Ok(response),
            Err(reason) => {
                error!(
                    method = %method,
                    path = %path,
                    status = response.status,
                    reason = %reason,
                    "Handler returned a malformed response"
                );
                Err(DispatchError::InvalidResponse {
                    method,
                    path,
                    reason,
                })
            }
        },
    }
}

/// The dispatch entry point used by the hosting server.
///
/// Holds the route table behind an [`ArcSwap`], so the table can be replaced or extended
/// while requests are in flight. Each dispatch works on the snapshot it loaded.
pub struct Dispatcher {
    router: ArcSwap<Router>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Router::new())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("router", &*self.router.load())
            .finish()
    }
}

impl Dispatcher {
    #[must_use]
    pub fn new(router: Router) -> Self {
        info!(total_routes = router.len(), "Dispatcher ready");
        Self {
            router: ArcSwap::from_pointee(router),
        }
    }

    /// Current route table snapshot.
    #[must_use]
    pub fn router(&self) -> Arc<Router> {
        self.router.load_full()
    }

    /// Publish a whole new route table.
    pub fn replace_router(&self, router: Router) {
        info!(total_routes = router.len(), "Route table replaced");
        self.router.store(Arc::new(router));
    }

    /// Register routes while serving: clone the current table, apply `f`, publish.
    ///
    /// `f` may run more than once if another update races with this one.
    pub fn update<F>(&self, mut f: F)
    where
        F: FnMut(&mut Router),
    {
        self.router.rcu(|current| {
            let mut next = Router::clone(current);
            f(&mut next);
            next
        });
        debug!(total_routes = self.router.load().len(), "Route table updated");
    }

    /// Dispatch an already normalized request.
    ///
    /// # Errors
    ///
    /// See [`dispatch`].
    pub fn dispatch(&self, request: HandlerRequest) -> Result<HandlerResponse, DispatchError> {
        let router = self.router.load();
        dispatch(&router, request)
    }

    /// Normalize a raw request and dispatch it.
    ///
    /// # Errors
    ///
    /// [`DispatchError::InvalidMethod`] for an unparseable method, otherwise see [`dispatch`].
    pub fn dispatch_raw(&self, raw: RawRequest) -> Result<HandlerResponse, DispatchError> {
        let request = HandlerRequest::from_raw(raw)?;
        self.dispatch(request)
    }
}
