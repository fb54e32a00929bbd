//! # Router Module
//!
//! The route table: a map from HTTP method to a map from exact path to handler.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Storing handlers under `(method, path)` via [`Router::register`] and the per-verb
//!   helpers ([`Router::get`], [`Router::post`], [`Router::put`], [`Router::patch`],
//!   [`Router::delete`], [`Router::head`])
//! - Exact-match retrieval with [`Router::lookup`]
//!
//! Matching is literal. `/Hello` and `/hello` are different routes, `GET /x` says nothing
//! about `POST /x`, and there are no path parameters or wildcards.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use plainrouter::dispatcher::HandlerRequest;
//! use plainrouter::router::Router;
//!
//! let mut router = Router::new();
//! router
//!     .get("/hello", |_req: &HandlerRequest| "Hello World!!!!")
//!     .post("/hello", |req: &HandlerRequest| req.body().to_vec());
//!
//! assert!(router.lookup(&Method::GET, "/hello").is_some());
//! assert!(router.lookup(&Method::GET, "/Hello").is_none());
//! assert!(router.lookup(&Method::PUT, "/hello").is_none());
//! ```

mod core;

pub use core::{Router, SUPPORTED_METHODS};
