//! Synchronous counterparts of the await functions.
//!
//! These run [`AsyncCall::execute`] on the current thread and classify the
//! result exactly like the futures in [`bridge`][crate::bridge] do.

use crate::bridge::{Body, Classified, Mode, Raw};
use crate::call::AsyncCall;
use crate::error::Error;
use crate::outcome::{Exception, Outcome};
use crate::response::Response;

/// Execute and return the body of a successful response.
///
/// See [`await_body`][crate::await_body] for how the response is classified.
pub fn execute_body<T, C>(call: &C) -> Result<T, Error<C::Error>>
where
    C: AsyncCall<T> + ?Sized,
{
    execute::<T, C, Body>(call)
}

/// Execute and return the response, whatever the status.
pub fn execute_response<T, C>(call: &C) -> Result<Response<T>, Error<C::Error>>
where
    C: AsyncCall<T> + ?Sized,
{
    execute::<T, C, Raw>(call)
}

/// Execute and return the [`Outcome`].
pub fn execute_outcome<T, C>(call: &C) -> Outcome<T, C::Error>
where
    C: AsyncCall<T> + ?Sized,
{
    execute::<T, C, Classified>(call)
}

fn execute<T, C, M>(call: &C) -> M::Output
where
    C: AsyncCall<T> + ?Sized,
    M: Mode<T, C::Error>,
{
    let result = call.execute().map_err(Exception::Transport);
    M::resolve(result)
}
