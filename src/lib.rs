//! # plainrouter
//!
//! **plainrouter** is a small exact-match HTTP router. Handlers are registered under an
//! HTTP method and a literal path; a dispatcher looks the pair up, hands the handler an
//! explicit request context and turns what it returns into a status/headers/body triple.
//!
//! ## Architecture
//!
//! - **[`router`]** - the route table: `(method, path) → handler`, verb helpers
//! - **[`dispatcher`]** - request context, reply coercion, the 404 fallback
//! - **[`server`]** - hosting adapter on top of `may_minihttp`
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`runtime_config`]** - coroutine runtime settings from the environment
//! - **[`cli`]** - the `plainrouter` binary
//!
//! ## Quick Start
//!
//! ```rust
//! use plainrouter::{Dispatcher, HandlerRequest, HandlerResponse, RawRequest, Router};
//!
//! let mut router = Router::new();
//! router
//!     .get("/hello", |_req: &HandlerRequest| "Hello World!!!!")
//!     .put("/teapot", |_req: &HandlerRequest| {
//!         HandlerResponse::text(418, "short and stout").with_header("x-pot", "1")
//!     });
//!
//! let dispatcher = Dispatcher::new(router);
//!
//! let resp = dispatcher.dispatch_raw(RawRequest::new("GET", "/hello")).unwrap();
//! assert_eq!((resp.status, resp.body_bytes()), (200, b"Hello World!!!!".to_vec()));
//!
//! let resp = dispatcher.dispatch_raw(RawRequest::new("GET", "/missing")).unwrap();
//! assert_eq!(resp.status, 404);
//! assert_eq!(resp.body_bytes(), b"Oops! No route for GET /missing".to_vec());
//! ```
//!
//! ## Serving
//!
//! ```rust,no_run
//! use plainrouter::server::{AppService, HttpServer};
//! use plainrouter::{Dispatcher, HandlerRequest, Router};
//! use std::sync::Arc;
//!
//! let mut router = Router::new();
//! router.get("/hello", |_req: &HandlerRequest| "Hello World!!!!");
//!
//! let service = AppService::new(Arc::new(Dispatcher::new(router)));
//! let handle = HttpServer(service).start("127.0.0.1:8080").unwrap();
//! handle.join().unwrap();
//! ```

pub mod cli;
pub mod demo;
pub mod dispatcher;
pub mod ids;
pub mod logging;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use dispatcher::{
    dispatch, DispatchError, Dispatcher, Handler, HandlerError, HandlerRequest, HandlerResponse,
    HandlerResult, IntoReply, RawRequest, Reply,
};
pub use ids::RequestId;
pub use router::Router;
