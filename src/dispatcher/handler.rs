//! Handler trait and the tagged reply type handlers produce.

use super::request::HandlerRequest;
use super::response::{HandlerResponse, HeaderMap};

/// Error type a handler may fail with. It is carried out of dispatch untouched.
pub type HandlerError = anyhow::Error;

/// What a handler hands back once its return value has been normalized.
pub type HandlerResult = Result<Reply, HandlerError>;

/// A handler's return value.
///
/// Dispatch coerces `Text` into `(200, {}, [text])` and passes `Full` through as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Full(HandlerResponse),
}

/// Conversion from whatever a handler closure returns into a [`HandlerResult`].
///
/// Implemented for string types, byte vectors, [`HandlerResponse`], [`Reply`], and any `Result` of
/// those whose error converts into [`HandlerError`].
pub trait IntoReply {
    fn into_reply(self) -> HandlerResult;
}

impl IntoReply for Reply {
    fn into_reply(self) -> HandlerResult {
        Ok(self)
    }
}

impl IntoReply for HandlerResponse {
    fn into_reply(self) -> HandlerResult {
        Ok(Reply::Full(self))
    }
}

impl IntoReply for String {
    fn into_reply(self) -> HandlerResult {
        Ok(Reply::Text(self))
    }
}

impl IntoReply for &'static str {
    fn into_reply(self) -> HandlerResult {
        Ok(Reply::Text(self.to_string()))
    }
}

/// Raw bytes take the same `(200, {}, [bytes])` shape a text reply does, without
/// requiring UTF-8.
impl IntoReply for Vec<u8> {
    fn into_reply(self) -> HandlerResult {
        Ok(Reply::Full(HandlerResponse::new(
            200,
            HeaderMap::new(),
            vec![self],
        )))
    }
}

impl<T, E> IntoReply for Result<T, E>
where
    T: IntoReply,
    E: Into<HandlerError>,
{
    fn into_reply(self) -> HandlerResult {
        self.map_err(Into::into)?.into_reply()
    }
}

/// User logic bound to a route.
///
/// Closures of the form `Fn(&HandlerRequest) -> impl IntoReply` implement this
/// automatically. The request is borrowed for the duration of the call only.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, request: &HandlerRequest) -> HandlerResult;
}

impl<F, R> Handler for F
where
    F: Fn(&HandlerRequest) -> R + Send + Sync + 'static,
    R: IntoReply,
{
    fn call(&self, request: &HandlerRequest) -> HandlerResult {
        (self)(request).into_reply()
    }
}
