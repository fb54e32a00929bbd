//! # Server Module
//!
//! Bridge between `may_minihttp` and the dispatcher. The HTTP server owns sockets,
//! parsing, keep-alive and serialization; this module only converts its request into a
//! [`RawRequest`](crate::dispatcher::RawRequest) and writes the resulting triple back.
//!
//! ```rust,no_run
//! use plainrouter::dispatcher::{Dispatcher, HandlerRequest};
//! use plainrouter::router::Router;
//! use plainrouter::server::{AppService, HttpServer};
//! use std::sync::Arc;
//!
//! let mut router = Router::new();
//! router.get("/hello", |_req: &HandlerRequest| "Hello World!!!!");
//!
//! let service = AppService::new(Arc::new(Dispatcher::new(router)));
//! let handle = HttpServer(service).start("127.0.0.1:8080").unwrap();
//! handle.join().unwrap();
//! ```

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::parse_request;
pub use response::{
    header_lines, write_handler_response, write_plain_error, HeaderLines, WriteError,
    MAX_INTERNED_HEADER_LINES, MAX_RESPONSE_HEADERS,
};
pub use service::AppService;
