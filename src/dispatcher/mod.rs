//! # Dispatcher Module
//!
//! Turns a request into a response: look up `(method, path)` in the [`Router`],
//! invoke the handler with an explicit [`HandlerRequest`], coerce the [`Reply`].
//!
//! ## Request Flow
//!
//! 1. The hosting server builds a [`RawRequest`] (method token, target, headers, body)
//! 2. [`HandlerRequest::from_raw`] splits path and query and merges params
//! 3. The route table is consulted with the exact method and path
//! 4. No handler: `(404, {}, ["Oops! No route for GET /missing"])`
//! 5. Handler found: its [`Reply`] is coerced: `Text(s)` → `(200, {}, [s])`,
//!    `Full(response)` → passed through after a well-formedness check
//!
//! ## Error Handling
//!
//! Handler errors are not recovered here. They come back as
//! [`DispatchError::Handler`] and the hosting server decides what the client sees
//! (the bundled [`crate::server::AppService`] answers 500).
//!
//! ## Example
//!
//! ```rust
//! use plainrouter::dispatcher::{Dispatcher, HandlerRequest, RawRequest};
//! use plainrouter::router::Router;
//!
//! let mut router = Router::new();
//! router.get("/hello", |_req: &HandlerRequest| "Hello World!!!!");
//! router.post("/hello", |req: &HandlerRequest| req.body().to_vec());
//!
//! let dispatcher = Dispatcher::new(router);
//! let resp = dispatcher.dispatch_raw(RawRequest::new("GET", "/hello")).unwrap();
//! assert_eq!(resp.status, 200);
//! assert_eq!(resp.body_bytes(), b"Hello World!!!!");
//! ```
//!
//! [`Router`]: crate::router::Router

mod core;
mod handler;
mod request;
mod response;

pub use core::{dispatch, DispatchError, Dispatcher};
pub use handler::{Handler, HandlerError, HandlerResult, IntoReply, Reply};
pub use request::{
    HandlerRequest, HeaderVec, ParamVec, RawRequest, MAX_INLINE_HEADERS, MAX_INLINE_PARAMS,
};
pub use response::{HandlerResponse, HeaderMap};
