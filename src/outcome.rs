use std::fmt;

use crate::error::{Error, HttpError, NullBodyError};
use crate::response::{RawResponse, Response};

/// Terminal state of a call, as a value.
///
/// Exactly one of three things happened:
///
/// * [`Outcome::Ok`] - a 2xx response with a body.
/// * [`Outcome::Error`] - the call completed, but with a non-2xx status.
/// * [`Outcome::Exception`] - anything else. The transport failed, the body
///   was absent, or the callback was never invoked.
///
/// `Ok` and `Error` have a response ([`Outcome::response`]), `Error` and
/// `Exception` have a failure ([`Outcome::failure`]). Code that only cares
/// about one of those facets does not need to match all variants.
#[derive(Debug)]
pub enum Outcome<T, E> {
    /// Successful call.
    Ok {
        /// The response body.
        value: T,
        /// Response head.
        response: RawResponse,
    },
    /// Call rejected with a non-2xx status.
    Error {
        /// The protocol failure.
        error: HttpError,
        /// Response head.
        response: RawResponse,
    },
    /// Call failed without a usable response.
    Exception(Exception<E>),
}

/// Failures that are not an HTTP status.
#[derive(Debug)]
#[non_exhaustive]
pub enum Exception<E> {
    /// 2xx response without a body.
    NullBody(NullBodyError),
    /// The transport failed.
    Transport(E),
    /// The transport dropped the callback without invoking it.
    Dropped,
}

impl<T, E> Outcome<T, E> {
    /// Classify a response delivered by the transport.
    pub fn from_response(response: Response<T>) -> Self {
        if !response.is_successful() {
            let error = HttpError::new(&response);
            return Outcome::Error {
                error,
                response: response.raw(),
            };
        }

        let status = response.status();

        match response.into_parts() {
            (response, Some(value)) => Outcome::Ok { value, response },
            (_, None) => Outcome::Exception(Exception::NullBody(NullBodyError::new(status))),
        }
    }

    /// The value, if this is `Ok`.
    pub fn get_or_none(self) -> Option<T> {
        match self {
            Outcome::Ok { value, .. } => Some(value),
            _ => None,
        }
    }

    /// The value, if this is `Ok`, otherwise `fallback`.
    pub fn get_or(self, fallback: T) -> T {
        self.get_or_none().unwrap_or(fallback)
    }

    /// The value, if this is `Ok`, otherwise the carried failure.
    pub fn get_or_err(self) -> Result<T, Error<E>> {
        match self {
            Outcome::Ok { value, .. } => Ok(value),
            Outcome::Error { error, .. } => Err(Error::Http(error)),
            Outcome::Exception(e) => Err(e.into()),
        }
    }

    /// The value, if this is `Ok`, otherwise `err`.
    ///
    /// The carried failure is discarded.
    pub fn get_or_err_with<F>(self, err: F) -> Result<T, F> {
        self.get_or_none().ok_or(err)
    }

    /// Response head for `Ok` and `Error`.
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Outcome::Ok { response, .. } | Outcome::Error { response, .. } => Some(response),
            Outcome::Exception(_) => None,
        }
    }

    /// Whether this is `Ok`.
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok { .. })
    }

    /// Whether this is `Error`.
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error { .. })
    }

    /// Whether this is `Exception`.
    pub fn is_exception(&self) -> bool {
        matches!(self, Outcome::Exception(_))
    }

    /// Map the value of `Ok`, leaving other variants untouched.
    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Ok { value, response } => Outcome::Ok {
                value: f(value),
                response,
            },
            Outcome::Error { error, response } => Outcome::Error { error, response },
            Outcome::Exception(e) => Outcome::Exception(e),
        }
    }
}

impl<T, E> Outcome<T, E>
where
    E: std::error::Error + 'static,
{
    /// Failure for `Error` and `Exception`.
    pub fn failure(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Outcome::Ok { .. } => None,
            Outcome::Error { error, .. } => Some(error),
            Outcome::Exception(e) => Some(e),
        }
    }
}

impl<T, E> From<Result<Response<T>, Exception<E>>> for Outcome<T, E> {
    fn from(value: Result<Response<T>, Exception<E>>) -> Self {
        match value {
            Ok(response) => Outcome::from_response(response),
            Err(e) => Outcome::Exception(e),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, Error<E>> {
    fn from(value: Outcome<T, E>) -> Self {
        value.get_or_err()
    }
}

impl<E> From<Exception<E>> for Error<E> {
    fn from(value: Exception<E>) -> Self {
        match value {
            Exception::NullBody(v) => Error::NullBody(v),
            Exception::Transport(v) => Error::Transport(v),
            Exception::Dropped => Error::Dropped,
        }
    }
}

impl<E> std::error::Error for Exception<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Exception::NullBody(v) => Some(v),
            Exception::Transport(v) => Some(v),
            Exception::Dropped => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for Exception<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exception::NullBody(v) => write!(f, "{}", v),
            Exception::Transport(v) => write!(f, "{}", v),
            Exception::Dropped => write!(f, "callback dropped"),
        }
    }
}

impl<T: fmt::Display, E: fmt::Display> fmt::Display for Outcome<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ok { value, response } => write!(
                f,
                "Outcome::Ok{{value={}, response={:?} {}}}",
                value,
                response.version(),
                response.status()
            ),
            Outcome::Error { error, .. } => write!(f, "Outcome::Error{{error={}}}", error),
            Outcome::Exception(e) => write!(f, "Outcome::Exception{{{}}}", e),
        }
    }
}
