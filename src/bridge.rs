//! Futures that await an [`AsyncCall`].
//!
//! An [`Await`] starts its call on the first poll and resolves once, when the
//! transport invokes the [`Callback`]. What it resolves to depends on the mode:
//!
//! | mode                 | 2xx with body    | 2xx without body   | non-2xx            | transport failure     |
//! |----------------------|------------------|--------------------|--------------------|-----------------------|
//! | [`Body`]             | `Ok(body)`       | `Err(NullBody)`    | `Err(Http)`        | `Err(Transport)`      |
//! | [`Raw`]              | `Ok(response)`   | `Ok(response)`     | `Ok(response)`     | `Err(Transport)`      |
//! | [`Classified`]       | `Outcome::Ok`    | `Outcome::Exception` | `Outcome::Error` | `Outcome::Exception`  |
//!
//! Dropping an `Await` that is still waiting requests cancellation of the call.
//! See [`request_cancel`][crate::request_cancel].

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;

use crate::call::{AsyncCall, Callback, Delivery};
use crate::cancel::cancel_abandoned;
use crate::error::Error;
use crate::outcome::{Exception, Outcome};
use crate::response::Response;

pub use self::mode::{Body, Classified, Mode, Raw};

/// Modes deciding what an [`Await`] resolves to.
pub mod mode {
    use super::*;

    mod sealed {
        pub trait Sealed {
            fn name() -> &'static str;
        }
    }
    pub(crate) use self::sealed::Sealed;

    /// Maps what the transport delivered to the output of the await.
    ///
    /// This trait is sealed.
    pub trait Mode<T, E>: sealed::Sealed {
        /// What the await resolves to.
        type Output;

        #[doc(hidden)]
        fn resolve(delivery: Result<Response<T>, Exception<E>>) -> Self::Output;
    }

    macro_rules! await_mode {
        ($(#[$m:meta])* $n:ident) => {
            $(#[$m])*
            #[derive(Debug)]
            pub struct $n(());
            impl sealed::Sealed for $n {
                fn name() -> &'static str {
                    stringify!($n)
                }
            }
        };
    }

    await_mode!(
        /// Resolve to the body of a 2xx response.
        Body
    );
    await_mode!(
        /// Resolve to the response, whatever the status.
        Raw
    );
    await_mode!(
        /// Resolve to an [`Outcome`]. Never fails.
        Classified
    );

    impl<T, E> Mode<T, E> for Body {
        type Output = Result<T, Error<E>>;

        fn resolve(delivery: Result<Response<T>, Exception<E>>) -> Self::Output {
            Outcome::from(delivery).get_or_err()
        }
    }

    impl<T, E> Mode<T, E> for Raw {
        type Output = Result<Response<T>, Error<E>>;

        fn resolve(delivery: Result<Response<T>, Exception<E>>) -> Self::Output {
            delivery.map_err(Error::from)
        }
    }

    impl<T, E> Mode<T, E> for Classified {
        type Output = Outcome<T, E>;

        fn resolve(delivery: Result<Response<T>, Exception<E>>) -> Self::Output {
            Outcome::from(delivery)
        }
    }
}

/// Future awaiting the completion of a call.
///
/// Created by [`await_body`], [`await_response`] and [`await_outcome`], or the
/// corresponding [`AwaitExt`] methods.
#[must_use = "futures do nothing unless polled"]
pub struct Await<'a, T, C, M>
where
    C: AsyncCall<T> + ?Sized,
{
    call: &'a C,
    state: State<T, C::Error>,
    _ph: PhantomData<fn() -> M>,
}

enum State<T, E> {
    /// Not polled yet, the call is not enqueued.
    Idle,
    Waiting(oneshot::Receiver<Delivery<T, E>>),
    Done,
}

impl<'a, T, C, M> Await<'a, T, C, M>
where
    C: AsyncCall<T> + ?Sized,
{
    fn new(call: &'a C) -> Self {
        Await {
            call,
            state: State::Idle,
            _ph: PhantomData,
        }
    }

    /// Whether the call has been enqueued and not yet completed.
    pub fn is_waiting(&self) -> bool {
        matches!(self.state, State::Waiting(_))
    }

    /// Whether this await has resolved.
    pub fn is_done(&self) -> bool {
        matches!(self.state, State::Done)
    }
}

impl<'a, T, C, M> Future for Await<'a, T, C, M>
where
    C: AsyncCall<T> + ?Sized,
    M: Mode<T, C::Error>,
{
    type Output = M::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if let State::Idle = this.state {
            let (tx, rx) = oneshot::channel();
            // Waiting before enqueue, since the callback might fire right away.
            this.state = State::Waiting(rx);
            debug!("{:?} enqueue", this);
            this.call.enqueue(Callback::new(tx));
        }

        let State::Waiting(rx) = &mut this.state else {
            panic!("Await polled after completion");
        };

        let delivery = match Pin::new(rx).poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(Ok(Ok(response))) => Ok(response),
            Poll::Ready(Ok(Err(cause))) => Err(Exception::Transport(cause)),
            Poll::Ready(Err(oneshot::Canceled)) => Err(Exception::Dropped),
        };

        this.state = State::Done;
        debug!("{:?} resolved", this);

        Poll::Ready(M::resolve(delivery))
    }
}

impl<'a, T, C, M> Drop for Await<'a, T, C, M>
where
    C: AsyncCall<T> + ?Sized,
{
    fn drop(&mut self) {
        let State::Waiting(rx) = &mut self.state else {
            return;
        };

        // After close, the callback can no longer deliver. Anything that made
        // it in before means the call already completed.
        rx.close();

        match rx.try_recv() {
            Ok(Some(_)) => trace!("Await dropped after call completed"),
            _ => cancel_abandoned::<T, C>(self.call),
        }
    }
}

impl<'a, T, C, M> fmt::Debug for Await<'a, T, C, M>
where
    C: AsyncCall<T> + ?Sized,
    M: mode::Sealed,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Await<{}>", M::name())
    }
}

/// Await the body of a successful response.
///
/// * 2xx with a body resolves to the body.
/// * 2xx without a body is [`Error::NullBody`].
/// * Any other status is [`Error::Http`].
/// * A transport failure is [`Error::Transport`].
pub fn await_body<T, C>(call: &C) -> Await<'_, T, C, Body>
where
    C: AsyncCall<T> + ?Sized,
{
    Await::new(call)
}

/// Await the response, whatever the status.
///
/// The body is not inspected and may be absent. Only a transport failure
/// (or a dropped callback) is an error.
pub fn await_response<T, C>(call: &C) -> Await<'_, T, C, Raw>
where
    C: AsyncCall<T> + ?Sized,
{
    Await::new(call)
}

/// Await the [`Outcome`] of a call.
///
/// This never fails. A 2xx response without a body is
/// [`Exception::NullBody`].
pub fn await_outcome<T, C>(call: &C) -> Await<'_, T, C, Classified>
where
    C: AsyncCall<T> + ?Sized,
{
    Await::new(call)
}

/// Await methods for any [`AsyncCall`].
pub trait AwaitExt<T>: AsyncCall<T> {
    /// See [`await_body`].
    fn await_body(&self) -> Await<'_, T, Self, Body> {
        await_body(self)
    }

    /// See [`await_response`].
    fn await_response(&self) -> Await<'_, T, Self, Raw> {
        await_response(self)
    }

    /// See [`await_outcome`].
    fn await_outcome(&self) -> Await<'_, T, Self, Classified> {
        await_outcome(self)
    }
}

impl<T, C> AwaitExt<T> for C where C: AsyncCall<T> + ?Sized {}
