use crate::dispatcher::HandlerResponse;
use dashmap::DashMap;
use http::StatusCode;
use may_minihttp::Response;
use once_cell::sync::Lazy;
use thiserror::Error;

/// Header slots in a `may_minihttp` response. `Date`, `Server` and `Content-Length`
/// are written by the server outside these slots.
pub const MAX_RESPONSE_HEADERS: usize = 16;

/// Upper bound on distinct header lines leaked for `may_minihttp`.
pub const MAX_INTERNED_HEADER_LINES: usize = 4096;

static HEADER_LINES: Lazy<HeaderLines> =
    Lazy::new(|| HeaderLines::with_capacity_limit(MAX_INTERNED_HEADER_LINES));

/// Handler responses that cannot be put on a `may_minihttp` response.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WriteError {
    #[error("response has {count} headers, the server supports at most {limit}")]
    TooManyHeaders { count: usize, limit: usize },

    #[error("header line cache is full ({limit} distinct lines), refusing {name:?}")]
    HeaderCacheFull { name: String, limit: usize },
}

/// Interned `Name: value` lines.
///
/// `may_minihttp` only takes `&'static str` header lines, so each distinct line is
/// leaked once and reused afterwards. The number of leaked lines is capped.
pub struct HeaderLines {
    lines: DashMap<String, &'static str>,
    limit: usize,
}

impl HeaderLines {
    #[must_use]
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            lines: DashMap::new(),
            limit,
        }
    }

    /// Interned line, or `None` once the cap is reached and the line is new.
    #[must_use]
    pub fn get_or_intern(&self, name: &str, value: &str) -> Option<&'static str> {
        let line = format!("{name}: {value}");
        if let Some(existing) = self.lines.get(&line) {
            return Some(*existing);
        }
        if self.lines.len() >= self.limit {
            return None;
        }
        let interned = *self.lines.entry(line.clone()).or_insert_with(|| {
            let leaked: &'static str = Box::leak(line.into_boxed_str());
            leaked
        });
        Some(interned)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Reason phrase for the status line, `"Unknown"` for codes without one.
pub(crate) fn status_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

/// Header lines for `resp`, in the form `may_minihttp` takes them.
///
/// `content-length` from the handler is dropped; the server derives it from the body it
/// actually sends.
///
/// # Errors
///
/// [`WriteError::TooManyHeaders`] past [`MAX_RESPONSE_HEADERS`],
/// [`WriteError::HeaderCacheFull`] when `lines` refuses a new line.
pub fn header_lines(
    resp: &HandlerResponse,
    lines: &HeaderLines,
) -> Result<Vec<&'static str>, WriteError> {
    let headers: Vec<(&String, &String)> = resp
        .headers
        .iter()
        .filter(|(name, _)| !name.eq_ignore_ascii_case("content-length"))
        .collect();
    if headers.len() > MAX_RESPONSE_HEADERS {
        return Err(WriteError::TooManyHeaders {
            count: headers.len(),
            limit: MAX_RESPONSE_HEADERS,
        });
    }
    headers
        .into_iter()
        .map(|(name, value)| {
            lines
                .get_or_intern(name, value)
                .ok_or_else(|| WriteError::HeaderCacheFull {
                    name: name.clone(),
                    limit: lines.limit,
                })
        })
        .collect()
}

/// Write a response triple. Nothing is written when it fails.
///
/// # Errors
///
/// See [`header_lines`].
pub fn write_handler_response(res: &mut Response, resp: &HandlerResponse) -> Result<(), WriteError> {
    let lines = header_lines(resp, &HEADER_LINES)?;
    res.status_code(resp.status as usize, status_reason(resp.status));
    for line in lines {
        res.header(line);
    }
    res.body_vec(resp.body_bytes());
    Ok(())
}

/// Plain-text error response written by the server itself.
pub fn write_plain_error(res: &mut Response, status: u16, message: &str) {
    res.status_code(status as usize, status_reason(status));
    res.header("Content-Type: text/plain");
    res.body_vec(message.as_bytes().to_vec());
}
