use crate::dispatcher::RawRequest;
use may_minihttp::Request;
use std::io::{self, Read};
use tracing::debug;

/// Copy a `may_minihttp::Request` into an owned [`RawRequest`].
///
/// Header names are lowercased, values decoded lossily as UTF-8. The body is read
/// to the end as bytes; no content-type based parsing happens here.
///
/// # Errors
///
/// Returns the I/O error raised while reading the body.
pub fn parse_request(req: Request) -> io::Result<RawRequest> {
    let method = req.method().to_string();
    let target = req.path().to_string();

    let headers: Vec<(String, String)> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).into_owned(),
            )
        })
        .collect();

    // headers
    debug!(
        header_count = headers.len(),
        size_bytes = headers.iter().map(|(k, v)| k.len() + v.len()).sum::<usize>(),
        "Headers extracted"
    );

    let mut body = Vec::new();
    req.body().read_to_end(&mut body)?;

    debug!(
        method = %method,
        target = %target,
        body_bytes = body.len(),
        "HTTP request parsed"
    );

    Ok(RawRequest {
        method,
        target,
        headers,
        body,
    })
}
