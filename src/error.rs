use std::fmt;

use http::StatusCode;

use crate::response::{RawResponse, Response};

/// Error type for awaiting a call.
///
/// `E` is the transport failure of the [`AsyncCall`][crate::AsyncCall].
#[derive(Debug)]
#[non_exhaustive]
pub enum Error<E> {
    /// The call completed with a non-2xx status.
    Http(HttpError),
    /// The call completed with a 2xx status, but without a body.
    NullBody(NullBodyError),
    /// The call could not complete.
    Transport(E),
    /// The transport dropped the callback without invoking it.
    Dropped,
}

impl<E> Error<E> {
    /// The HTTP error, if this is a protocol failure.
    pub fn as_http(&self) -> Option<&HttpError> {
        match self {
            Error::Http(v) => Some(v),
            _ => None,
        }
    }

    /// The transport failure, if this is one.
    pub fn as_transport(&self) -> Option<&E> {
        match self {
            Error::Transport(v) => Some(v),
            _ => None,
        }
    }

    /// Consume the error, returning the transport failure if this is one.
    pub fn into_transport(self) -> Option<E> {
        match self {
            Error::Transport(v) => Some(v),
            _ => None,
        }
    }
}

impl<E> From<HttpError> for Error<E> {
    fn from(value: HttpError) -> Self {
        Error::Http(value)
    }
}

impl<E> From<NullBodyError> for Error<E> {
    fn from(value: NullBodyError) -> Self {
        Error::NullBody(value)
    }
}

impl<E> std::error::Error for Error<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(v) => Some(v),
            Error::NullBody(v) => Some(v),
            Error::Transport(v) => Some(v),
            Error::Dropped => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(v) => write!(f, "{}", v),
            Error::NullBody(v) => write!(f, "{}", v),
            Error::Transport(v) => write!(f, "transport failure: {}", v),
            Error::Dropped => write!(f, "callback dropped without a response or failure"),
        }
    }
}

/// A call that completed with a non-2xx status.
///
/// Holds the response head and the error body, if the transport provided one.
#[derive(Debug)]
pub struct HttpError {
    message: String,
    error_body: Option<Vec<u8>>,
    response: RawResponse,
}

impl HttpError {
    /// Create from a completed response.
    pub fn new<T>(response: &Response<T>) -> Self {
        let message = format!("HTTP {} {}", response.code(), response.message());

        HttpError {
            message,
            error_body: response.error_body().map(|b| b.to_vec()),
            response: response.raw(),
        }
    }

    /// Status code as a number, i.e. `500`.
    pub fn code(&self) -> u16 {
        self.response.status().as_u16()
    }

    /// Status of the response.
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// Message derived from the status, i.e. `HTTP 500 Internal Server Error`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The error body sent by the server.
    pub fn error_body(&self) -> Option<&[u8]> {
        self.error_body.as_deref()
    }

    /// The response head (no body).
    pub fn response(&self) -> &RawResponse {
        &self.response
    }
}

impl std::error::Error for HttpError {}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A 2xx response where the body was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NullBodyError {
    status: StatusCode,
}

impl NullBodyError {
    pub(crate) fn new(status: StatusCode) -> Self {
        NullBodyError { status }
    }

    /// Status of the response that had no body.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl std::error::Error for NullBodyError {}

impl fmt::Display for NullBodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "response body is null: {}", self.status)
    }
}
