//! Router core - the route table.
//!
//! Two-level map: method first, then the exact path string. Lookup is two hash probes
//! and never allocates.

use crate::dispatcher::{Handler, HandlerRequest, IntoReply};
use http::Method;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Methods that have a dedicated registration helper.
pub const SUPPORTED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::HEAD,
];

/// Exact-match route table.
///
/// Paths are compared byte-for-byte: no parameters, no wildcards, no trailing-slash or
/// case folding. Registering the same `(method, path)` twice keeps the second handler.
///
/// The table is `Send + Sync` and meant to be frozen once serving starts. For
/// registration while serving, go through [`crate::dispatcher::Dispatcher::update`].
#[derive(Clone, Default)]
pub struct Router {
    routes: HashMap<Method, HashMap<String, Arc<dyn Handler>>>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes())
            .finish()
    }
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `handler` under `(method, path)`, replacing any previous handler for that pair.
    ///
    /// The path is taken verbatim.
    pub fn register<F, R>(&mut self, method: Method, path: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&HandlerRequest) -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        self.register_handler(method, path, Arc::new(handler))
    }

    /// Same as [`Router::register`] for a handler that is already shared.
    pub fn register_handler(
        &mut self,
        method: Method,
        path: impl Into<String>,
        handler: Arc<dyn Handler>,
    ) -> &mut Self {
        let path = path.into();
        let by_path = self.routes.entry(method.clone()).or_default();
        if by_path.insert(path.clone(), handler).is_some() {
            warn!(
                method = %method,
                path = %path,
                "Replaced existing handler"
            );
        } else {
            info!(
                method = %method,
                path = %path,
                total_routes = self.len(),
                "Route registered"
            );
        }
        self
    }

    /// Register `handler` for `GET path`.
    pub fn get<F, R>(&mut self, path: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&HandlerRequest) -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        self.register(Method::GET, path, handler)
    }

    /// Register `handler` for `POST path`.
    pub fn post<F, R>(&mut self, path: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&HandlerRequest) -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        self.register(Method::POST, path, handler)
    }

    /// Register `handler` for `PUT path`.
    pub fn put<F, R>(&mut self, path: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&HandlerRequest) -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        self.register(Method::PUT, path, handler)
    }

    /// Register `handler` for `PATCH path`.
    pub fn patch<F, R>(&mut self, path: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&HandlerRequest) -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        self.register(Method::PATCH, path, handler)
    }

    /// Register `handler` for `DELETE path`.
    pub fn delete<F, R>(&mut self, path: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&HandlerRequest) -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        self.register(Method::DELETE, path, handler)
    }

    /// Register `handler` for `HEAD path`.
    pub fn head<F, R>(&mut self, path: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&HandlerRequest) -> R + Send + Sync + 'static,
        R: IntoReply,
    {
        self.register(Method::HEAD, path, handler)
    }

    /// Exact-match lookup.
    ///
    /// # Returns
    ///
    /// * `Some(handler)` - the handler registered for exactly this method and path
    /// * `None` - no such route (a normal outcome, answered with 404)
    #[must_use]
    pub fn lookup(&self, method: &Method, path: &str) -> Option<Arc<dyn Handler>> {
        let found = self
            .routes
            .get(method)
            .and_then(|by_path| by_path.get(path))
            .cloned();
        debug!(
            method = %method,
            path = %path,
            matched = found.is_some(),
            "Route lookup"
        );
        found
    }

    /// Number of registered `(method, path)` pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All registered routes, sorted by path then method.
    #[must_use]
    pub fn routes(&self) -> Vec<(Method, String)> {
        let mut routes: Vec<(Method, String)> = self
            .routes
            .iter()
            .flat_map(|(method, by_path)| {
                by_path
                    .keys()
                    .map(move |path| (method.clone(), path.clone()))
            })
            .collect();
        routes.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
        routes
    }

    /// Print all registered routes to stdout.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.len());
        for (method, path) in self.routes() {
            println!("[route] {method} {path}");
        }
    }
}
