use std::fmt;

use futures::channel::oneshot;

use crate::response::Response;

/// What the transport delivers to a [`Callback`].
pub(crate) type Delivery<T, E> = Result<Response<T>, E>;

/// An asynchronous call provided by a transport.
///
/// One call represents one request. It is started with [`enqueue`][AsyncCall::enqueue]
/// and eventually completes by invoking the [`Callback`], possibly from a
/// different thread. The call is owned by the caller; the futures in this crate
/// only borrow it while waiting.
///
/// All methods take `&self` since the transport typically shares the call with
/// its own workers.
pub trait AsyncCall<T> {
    /// Transport failure, such as a network error.
    type Error;

    /// Start the call. The callback is to be invoked once the call completes.
    ///
    /// Implementations may invoke the callback before returning.
    fn enqueue(&self, callback: Callback<T, Self::Error>);

    /// Request cancellation of the call.
    ///
    /// Cancelling a call that already completed is allowed to fail.
    fn cancel(&self) -> Result<(), Self::Error>;

    /// Whether [`cancel`][AsyncCall::cancel] has been requested.
    fn is_cancelled(&self) -> bool;

    /// Run the call synchronously.
    fn execute(&self) -> Result<Response<T>, Self::Error>;

    /// A fresh, not yet started, call for the same request.
    ///
    /// Transports that can't re-issue a call return `None`, which is the default.
    fn try_clone(&self) -> Option<Self>
    where
        Self: Sized,
    {
        None
    }
}

/// Completion handle for an [`AsyncCall`].
///
/// Both methods consume the callback, so a call completes at most once.
/// Dropping a callback without invoking it makes the awaiting side resolve
/// with [`Error::Dropped`][crate::Error::Dropped].
pub struct Callback<T, E> {
    tx: oneshot::Sender<Delivery<T, E>>,
}

impl<T, E> Callback<T, E> {
    pub(crate) fn new(tx: oneshot::Sender<Delivery<T, E>>) -> Self {
        Callback { tx }
    }

    /// The call completed with a response, whatever the status code.
    pub fn on_response(self, response: Response<T>) {
        self.deliver(Ok(response));
    }

    /// The call failed before a response was received.
    pub fn on_failure(self, cause: E) {
        self.deliver(Err(cause));
    }

    /// Whether the awaiting side has gone away.
    ///
    /// Transports can use this to skip work, but are not required to.
    pub fn is_cancelled(&self) -> bool {
        self.tx.is_canceled()
    }

    fn deliver(self, delivery: Delivery<T, E>) {
        // The receiver is closed once the future is dropped.
        if self.tx.is_canceled() {
            trace!("Ignore delivery to cancelled await");
            return;
        }

        if self.tx.send(delivery).is_err() {
            trace!("Await cancelled during delivery");
        }
    }
}

impl<T, E> fmt::Debug for Callback<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
