use http::header::{HeaderName, HeaderValue};
use http::{Method, StatusCode};
use serde_json::Value;
use std::collections::HashMap;

/// Header name to value, as returned by handlers.
pub type HeaderMap = HashMap<String, String>;

/// The normalized response triple: status, headers, body chunks.
///
/// This is the only shape that leaves the dispatcher. The hosting server serializes it
/// to the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Body as a sequence of byte chunks, written back to back
    pub body: Vec<Vec<u8>>,
}

impl HandlerResponse {
    #[must_use]
    pub fn new(status: u16, headers: HeaderMap, body: Vec<Vec<u8>>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A single-chunk response with no headers.
    #[must_use]
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, HeaderMap::new(), vec![body.into().into_bytes()])
    }

    /// `(200, {}, [body])`, the shape a plain-text reply coerces to.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self::text(200, body)
    }

    /// A JSON response with `content-type: application/json`.
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self::new(status, headers, vec![body.to_string().into_bytes()])
    }

    /// The fixed response for a (verb, path) with no registered handler.
    #[must_use]
    pub fn not_found(method: &Method, path: &str) -> Self {
        Self::text(404, format!("Oops! No route for {method} {path}"))
    }

    /// Set a header, replacing any existing header with the same name in any case.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
        self
    }

    /// Get a header by name (case-insensitive)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All body chunks concatenated.
    #[must_use]
    pub fn body_bytes(&self) -> Vec<u8> {
        self.body.concat()
    }

    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body.iter().map(Vec::len).sum()
    }

    /// Check that the triple can be written to the wire: a three-digit status, header
    /// names/values that are valid HTTP tokens/values, no name set twice in different case.
    ///
    /// # Errors
    ///
    /// Returns a human readable reason for the first defect found.
    pub fn validate(&self) -> Result<(), String> {
        StatusCode::from_u16(self.status)
            .map_err(|_| format!("status {} is not a valid HTTP status code", self.status))?;
        let mut seen: Vec<HeaderName> = Vec::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let parsed = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| format!("header name {name:?} is not a valid HTTP token"))?;
            if seen.contains(&parsed) {
                return Err(format!("header {name:?} is set more than once"));
            }
            seen.push(parsed);
            HeaderValue::from_str(value)
                .map_err(|_| format!("header {name:?} has an invalid value"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_interpolates_method_and_path() {
        let resp = HandlerResponse::not_found(&Method::DELETE, "/things/7");
        assert_eq!(resp.status, 404);
        assert!(resp.headers.is_empty());
        assert_eq!(resp.body, vec![b"Oops! No route for DELETE /things/7".to_vec()]);
    }

    #[test]
    fn test_json_sets_content_type() {
        let resp = HandlerResponse::json(201, &serde_json::json!({"id": 1}));
        assert_eq!(resp.status, 201);
        assert_eq!(resp.header("Content-Type"), Some("application/json"));
        assert_eq!(resp.body_bytes(), br#"{"id":1}"#.to_vec());
    }

    #[test]
    fn test_chunks_concatenate_in_order() {
        let resp = HandlerResponse::new(
            200,
            HeaderMap::new(),
            vec![b"Hello, ".to_vec(), Vec::new(), b"world".to_vec()],
        );
        assert_eq!(resp.body_bytes(), b"Hello, world".to_vec());
        assert_eq!(resp.body_len(), 12);
    }

    #[test]
    fn test_validate_rejects_bad_status() {
        assert!(HandlerResponse::text(42, "").validate().is_err());
        assert!(HandlerResponse::text(1000, "").validate().is_err());
        assert!(HandlerResponse::text(100, "").validate().is_ok());
        assert!(HandlerResponse::text(599, "").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_headers() {
        let bad_name = HandlerResponse::ok("x").with_header("bad header", "v");
        assert!(bad_name.validate().is_err());

        let bad_value = HandlerResponse::ok("x").with_header("x-ok", "line\r\nbreak");
        assert!(bad_value.validate().is_err());

        let fine = HandlerResponse::ok("x").with_header("X-Trace", "abc");
        assert!(fine.validate().is_ok());
    }

    #[test]
    fn test_with_header_replaces_regardless_of_case() {
        let resp = HandlerResponse::json(200, &serde_json::json!({}))
            .with_header("Content-Type", "text/plain");
        assert_eq!(resp.headers.len(), 1);
        assert_eq!(resp.header("content-type"), Some("text/plain"));
        assert!(resp.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_case_duplicates() {
        let headers = HeaderMap::from([
            ("content-type".to_string(), "application/json".to_string()),
            ("Content-Type".to_string(), "text/plain".to_string()),
        ]);
        let resp = HandlerResponse::new(200, headers, Vec::new());
        assert!(resp.validate().is_err());
    }
}
