//! Await callback-driven, cancellable HTTP calls
//!
//! Transports hand out calls that complete through a callback: one of
//! "response received" or "failed" fires, at most once. This crate turns such a
//! call into a single future that resolves exactly once, and forwards
//! cancellation (dropping the future) to the call.
//!
//! There is no I/O in here. The transport implements [`AsyncCall`] and this
//! crate adapts it.
//!
//! Three ways to await a call:
//!
//! * [`await_body`] - the body of a successful response, or an [`Error`].
//! * [`await_response`] - the raw [`Response`] regardless of status code. Only
//!   transport failures end up as errors.
//! * [`await_outcome`] - never fails. Every terminal state is an [`Outcome`].
//!
//! The [`AwaitExt`] trait provides the same as methods on the call.
//!
//! # Example
//!
//! ```
//! use std::sync::Mutex;
//!
//! use call_await::{AsyncCall, AwaitExt, Callback, Outcome, Response};
//!
//! // A transport that answers immediately.
//! struct Immediate(Mutex<Option<Response<String>>>);
//!
//! impl AsyncCall<String> for Immediate {
//!     type Error = std::io::Error;
//!
//!     fn enqueue(&self, callback: Callback<String, Self::Error>) {
//!         match self.0.lock().unwrap().take() {
//!             Some(response) => callback.on_response(response),
//!             None => callback.on_failure(std::io::ErrorKind::Other.into()),
//!         }
//!     }
//!
//!     fn cancel(&self) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//!
//!     fn is_cancelled(&self) -> bool {
//!         false
//!     }
//!
//!     fn execute(&self) -> Result<Response<String>, Self::Error> {
//!         Err(std::io::ErrorKind::Unsupported.into())
//!     }
//! }
//!
//! let call = Immediate(Mutex::new(Some(Response::success("Done!".to_string()))));
//! let outcome = futures::executor::block_on(call.await_outcome());
//!
//! match outcome {
//!     Outcome::Ok { value, response } => {
//!         assert_eq!(value, "Done!");
//!         assert_eq!(response.status(), 200);
//!     }
//!     _ => panic!("expected Outcome::Ok"),
//! }
//! ```
//!
//! # Cancellation
//!
//! Dropping a future that is waiting on a call requests [`AsyncCall::cancel`].
//! The request is best-effort: any error (or panic) from `cancel()` is logged
//! and discarded. A callback that arrives after the future is gone is ignored.
//!
//! # The http crate
//!
//! Status codes, versions and headers come from the
//! [http crate](https://crates.io/crates/http), which is re-exported.

#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![deny(missing_docs)]

#[macro_use]
extern crate log;

mod error;
pub use error::{Error, HttpError, NullBodyError};

mod response;
pub use response::{RawResponse, Response};

mod outcome;
pub use outcome::{Exception, Outcome};

mod call;
pub use call::{AsyncCall, Callback};

mod cancel;
pub use cancel::{request_cancel, CancelFailure};

pub mod bridge;
pub use bridge::{await_body, await_outcome, await_response, Await, AwaitExt};

#[cfg(feature = "blocking")]
pub mod blocking;

#[cfg(test)]
mod test;

pub use http;
