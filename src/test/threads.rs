use std::sync::Arc;
use std::thread;
use std::time::Duration;

use futures::executor::block_on;

use super::mock::{MockCall, MockError};
use super::{poll_once, DONE};
use crate::{AsyncCall, AwaitExt, Outcome};

fn wait_enqueued(call: &MockCall<String>) {
    while !call.is_enqueued() {
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn callback_from_other_thread() {
    let call = Arc::new(MockCall::builder().ok(DONE.to_string()).manual().build());

    let transport = {
        let call = call.clone();
        thread::spawn(move || {
            wait_enqueued(&call);
            call.start();
        })
    };

    assert_eq!(block_on(call.await_body()).unwrap(), DONE);
    transport.join().unwrap();
    assert!(!call.is_cancelled());
}

#[test]
fn outcome_from_other_thread() {
    let call = Arc::new(MockCall::<String>::builder().http_error(503).manual().build());

    let transport = {
        let call = call.clone();
        thread::spawn(move || {
            wait_enqueued(&call);
            call.start();
        })
    };

    let outcome = block_on(call.await_outcome());
    transport.join().unwrap();

    assert!(matches!(outcome, Outcome::Error { ref error, .. } if error.code() == 503));
}

#[test]
fn drop_races_delivery() {
    for i in 0..2000 {
        let builder = MockCall::<String>::builder().manual();
        let builder = if i % 2 == 0 {
            builder.ok(DONE.to_string())
        } else {
            builder.failure(MockError("late"))
        };
        let call = Arc::new(builder.build());

        let mut fut = call.await_body();
        assert!(poll_once(&mut fut).is_pending());

        let transport = {
            let call = call.clone();
            thread::spawn(move || call.start())
        };

        // Either the delivery lands first and there is no cancel, or the
        // drop wins and the delivery is ignored.
        drop(fut);
        transport.join().unwrap();

        assert!(call.cancel_count() <= 1);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn abort_task_cancels_call() {
    let call = Arc::new(MockCall::builder().ok(DONE.to_string()).manual().build());

    let task = {
        let call = call.clone();
        tokio::spawn(async move { call.await_body().await })
    };

    while !call.is_enqueued() {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    task.abort();
    let err = task.await.unwrap_err();
    assert!(err.is_cancelled());

    assert!(call.is_cancelled());
    assert_eq!(call.cancel_count(), 1);

    // The transport completes after the task is gone.
    call.start();
}

#[tokio::test]
async fn await_inside_runtime() {
    let call = MockCall::builder().ok(DONE.to_string()).build();
    assert_eq!(call.await_response().await.unwrap().into_body().unwrap(), DONE);
}
