use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::call::AsyncCall;

/// Why a cancellation request did not go through.
///
/// Cancellation is best-effort, so this is normally logged and discarded.
#[derive(Debug)]
pub enum CancelFailure<E> {
    /// [`AsyncCall::cancel`] returned an error.
    Failed(E),
    /// [`AsyncCall::cancel`] panicked.
    Panicked,
}

impl<E: fmt::Display> fmt::Display for CancelFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelFailure::Failed(e) => write!(f, "cancel failed: {}", e),
            CancelFailure::Panicked => write!(f, "cancel panicked"),
        }
    }
}

impl<E> std::error::Error for CancelFailure<E> where E: std::error::Error {}

/// Request cancellation of a call.
///
/// A panic inside `cancel()` is caught and returned as
/// [`CancelFailure::Panicked`]. The call may still complete afterwards.
pub fn request_cancel<T, C>(call: &C) -> Result<(), CancelFailure<C::Error>>
where
    C: AsyncCall<T> + ?Sized,
{
    match panic::catch_unwind(AssertUnwindSafe(|| call.cancel())) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(CancelFailure::Failed(e)),
        Err(_) => Err(CancelFailure::Panicked),
    }
}

/// Cancel on behalf of an await that is going away.
///
/// Nothing is propagated, the caller is already being torn down.
pub(crate) fn cancel_abandoned<T, C>(call: &C)
where
    C: AsyncCall<T> + ?Sized,
{
    debug!("Cancel call of dropped await");

    match request_cancel(call) {
        Ok(()) => {}
        Err(CancelFailure::Failed(_)) => debug!("Ignore cancel failure"),
        Err(CancelFailure::Panicked) => warn!("Ignore panic in cancel"),
    }
}
