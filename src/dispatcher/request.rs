//! Request types on both sides of normalization.
//!
//! [`RawRequest`] is what the hosting HTTP server hands over: a method string, the request
//! target (path plus optional query), headers and the body bytes. [`HandlerRequest`] is the
//! normalized context a handler reads: parsed method, bare path, body, merged params.

use super::core::DispatchError;
use crate::ids::{RequestId, REQUEST_ID_HEADER};
use http::Method;
use serde::de::DeserializeOwned;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Maximum number of params before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Maximum inline headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Parameter storage for the dispatch path, kept inline for the common case.
///
/// Names use `Arc<str>` so a request context can be cloned cheaply.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Header storage, names lowercased.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A request as produced by the hosting HTTP server, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRequest {
    /// Method token exactly as received (e.g. `GET`)
    pub method: String,
    /// Request target: path with optional `?query`
    pub target: String,
    /// Header name/value pairs in arrival order
    pub headers: Vec<(String, String)>,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl RawRequest {
    #[must_use]
    pub fn new(method: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            target: target.into(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

/// The request context handed to a handler.
///
/// One instance exists per dispatch call. Handlers only ever see it by shared reference,
/// so nothing a handler does can leak into another request.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// Unique request ID for tracing and correlation
    pub request_id: RequestId,
    /// HTTP method
    pub method: Method,
    /// Request path without the query string, byte-for-byte as received
    pub path: String,
    /// HTTP headers, names lowercased
    pub headers: HeaderVec,
    /// Request body bytes
    pub body: Vec<u8>,
    /// Query params followed by form-body params; lookups take the last match
    pub params: ParamVec,
}

impl HandlerRequest {
    /// Build a context by hand, with no headers, body or params.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            method,
            path: path.into(),
            headers: HeaderVec::new(),
            body: Vec::new(),
            params: ParamVec::new(),
        }
    }

    /// Normalize a raw request.
    ///
    /// The target is split at the first `?`. Query pairs are decoded first, then the body
    /// is decoded too when the content type is `application/x-www-form-urlencoded`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidMethod`] when the method is not a valid HTTP token.
    pub fn from_raw(raw: RawRequest) -> Result<Self, DispatchError> {
        let method = Method::from_bytes(raw.method.as_bytes())
            .map_err(|_| DispatchError::InvalidMethod(raw.method.clone()))?;

        let (path, query) = match raw.target.split_once('?') {
            Some((path, query)) => (path.to_string(), Some(query)),
            None => (raw.target.clone(), None),
        };

        let headers: HeaderVec = raw
            .headers
            .into_iter()
            .map(|(name, value)| (Arc::from(name.to_ascii_lowercase()), value))
            .collect();

        let mut params = ParamVec::new();
        if let Some(query) = query {
            extend_form_pairs(&mut params, query.as_bytes());
        }
        let is_form = find_header(&headers, "content-type")
            .map(|ct| ct.trim_start().to_ascii_lowercase().starts_with(FORM_CONTENT_TYPE))
            .unwrap_or(false);
        if is_form && !raw.body.is_empty() {
            extend_form_pairs(&mut params, &raw.body);
        }

        let request_id = RequestId::from_header_or_new(find_header(&headers, REQUEST_ID_HEADER));

        debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            param_count = params.len(),
            body_bytes = raw.body.len(),
            "Request normalized"
        );

        Ok(Self {
            request_id,
            method,
            path,
            headers,
            body: raw.body,
            params,
        })
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn with_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params.push((Arc::from(name), value.into()));
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .push((Arc::from(name.to_ascii_lowercase()), value.into()));
        self
    }

    #[inline]
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Raw body bytes.
    #[inline]
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8, `None` if the bytes are not valid UTF-8.
    #[must_use]
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Deserialize the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Get a parameter by name.
    ///
    /// Uses "last write wins" semantics, so a form-body value shadows a query value
    /// of the same name, and `?a=1&a=2` yields `2`.
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Merged params as a map, same precedence as [`HandlerRequest::param`].
    /// Note: This allocates - use `param()` when only a few keys are needed.
    #[must_use]
    pub fn params_map(&self) -> HashMap<String, String> {
        self.params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a HeaderVec, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

fn extend_form_pairs(params: &mut ParamVec, input: &[u8]) {
    params.extend(
        url::form_urlencoded::parse(input).map(|(k, v)| (Arc::from(k.as_ref()), v.into_owned())),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_is_split_at_first_question_mark() {
        let req = HandlerRequest::from_raw(RawRequest::new("GET", "/search?q=a?b")).unwrap();
        assert_eq!(req.path(), "/search");
        assert_eq!(req.param("q"), Some("a?b"));
    }

    #[test]
    fn test_path_is_kept_verbatim() {
        let req = HandlerRequest::from_raw(RawRequest::new("GET", "/Hello%20World/")).unwrap();
        assert_eq!(req.path(), "/Hello%20World/");
    }

    #[test]
    fn test_query_params_are_decoded() {
        let req =
            HandlerRequest::from_raw(RawRequest::new("GET", "/p?name=J%C3%BCrgen&x=a+b")).unwrap();
        assert_eq!(req.param("name"), Some("Jürgen"));
        assert_eq!(req.param("x"), Some("a b"));
        assert_eq!(req.param("missing"), None);
    }

    #[test]
    fn test_form_body_overrides_query() {
        let raw = RawRequest::new("POST", "/p?name=query&only_query=1")
            .with_header("Content-Type", "application/x-www-form-urlencoded; charset=utf-8")
            .with_body("name=body&only_body=2");
        let req = HandlerRequest::from_raw(raw).unwrap();
        assert_eq!(req.param("name"), Some("body"));
        assert_eq!(req.param("only_query"), Some("1"));
        assert_eq!(req.param("only_body"), Some("2"));

        let map = req.params_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("name").map(String::as_str), Some("body"));
    }

    #[test]
    fn test_non_form_body_is_not_parsed_as_params() {
        let raw = RawRequest::new("POST", "/p")
            .with_header("content-type", "application/json")
            .with_body("name=body");
        let req = HandlerRequest::from_raw(raw).unwrap();
        assert_eq!(req.param("name"), None);
        assert_eq!(req.body(), b"name=body");
    }

    #[test]
    fn test_repeated_query_key_last_wins() {
        let req = HandlerRequest::from_raw(RawRequest::new("GET", "/p?a=1&a=2")).unwrap();
        assert_eq!(req.param("a"), Some("2"));
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let raw = RawRequest::new("GET", "/").with_header("X-Custom", "yes");
        let req = HandlerRequest::from_raw(raw).unwrap();
        assert_eq!(req.header("x-custom"), Some("yes"));
        assert_eq!(req.header("X-CUSTOM"), Some("yes"));
    }

    #[test]
    fn test_request_id_header_is_honoured() {
        let id = RequestId::new();
        let raw = RawRequest::new("GET", "/").with_header("X-Request-Id", id.to_string());
        let req = HandlerRequest::from_raw(raw).unwrap();
        assert_eq!(req.request_id(), id);
    }

    #[test]
    fn test_invalid_method_is_rejected() {
        let err = HandlerRequest::from_raw(RawRequest::new("GE T", "/")).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidMethod(ref m) if m == "GE T"));
    }

    #[test]
    fn test_extension_method_is_accepted() {
        let req = HandlerRequest::from_raw(RawRequest::new("PURGE", "/cache")).unwrap();
        assert_eq!(req.method().as_str(), "PURGE");
    }

    #[test]
    fn test_body_accessors() {
        let req = HandlerRequest::new(Method::POST, "/j").with_body(r#"{"n":3}"#);
        assert_eq!(req.body_str(), Some(r#"{"n":3}"#));
        let value: serde_json::Value = req.json().unwrap();
        assert_eq!(value["n"], 3);

        let binary = HandlerRequest::new(Method::POST, "/b").with_body(vec![0xff, 0xfe]);
        assert_eq!(binary.body_str(), None);
        assert!(binary.json::<serde_json::Value>().is_err());
    }
}
