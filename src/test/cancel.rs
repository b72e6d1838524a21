use std::future::Future;

use super::mock::{CancelBehavior, MockCall, MockError};
use super::{poll_once, DONE};
use crate::{AsyncCall, AwaitExt};

fn manual_call(cancel: CancelBehavior) -> MockCall<String> {
    MockCall::builder()
        .ok(DONE.to_string())
        .manual()
        .cancel(cancel)
        .build()
}

/// Poll until the call is enqueued, then drop the future.
fn poll_and_drop<F: Future + Unpin>(mut fut: F) {
    assert!(poll_once(&mut fut).is_pending());
    drop(fut);
}

#[test]
fn await_body_cancel() {
    let call = manual_call(CancelBehavior::Ok);
    assert!(!call.is_cancelled());

    poll_and_drop(call.await_body());

    assert!(call.is_cancelled());
    assert_eq!(call.cancel_count(), 1);
}

#[test]
fn await_response_cancel() {
    let call = manual_call(CancelBehavior::Ok);
    poll_and_drop(call.await_response());
    assert_eq!(call.cancel_count(), 1);
}

#[test]
fn await_outcome_cancel() {
    let call = manual_call(CancelBehavior::Ok);
    poll_and_drop(call.await_outcome());
    assert_eq!(call.cancel_count(), 1);
}

#[test]
fn cancel_failure_is_swallowed() {
    let call = manual_call(CancelBehavior::Fail);
    poll_and_drop(call.await_body());
    assert!(call.is_cancelled());

    let call = manual_call(CancelBehavior::Fail);
    poll_and_drop(call.await_response());
    assert!(call.is_cancelled());

    let call = manual_call(CancelBehavior::Fail);
    poll_and_drop(call.await_outcome());
    assert!(call.is_cancelled());
}

#[test]
fn cancel_panic_is_swallowed() {
    let call = manual_call(CancelBehavior::Panic);
    poll_and_drop(call.await_body());
    assert!(call.is_cancelled());

    let call = manual_call(CancelBehavior::Panic);
    poll_and_drop(call.await_response());
    assert!(call.is_cancelled());
    assert_eq!(call.cancel_count(), 1);

    let call = manual_call(CancelBehavior::Panic);
    poll_and_drop(call.await_outcome());
    assert!(call.is_cancelled());
}

#[test]
fn late_failure_after_cancel_is_ignored() {
    let call = MockCall::<String>::builder()
        .failure(MockError("illegal argument"))
        .manual()
        .build();

    poll_and_drop(call.await_body());
    assert!(call.is_cancelled());

    // The transport completes anyway. Nothing to resume.
    call.start();
    assert_eq!(call.cancel_count(), 1);
}

#[test]
fn late_response_after_cancel_is_ignored() {
    let call = manual_call(CancelBehavior::Ok);

    poll_and_drop(call.await_outcome());
    call.start();

    assert_eq!(call.cancel_count(), 1);
}

#[test]
fn drop_before_poll_does_nothing() {
    let call = manual_call(CancelBehavior::Ok);

    let fut = call.await_body();
    assert!(!fut.is_waiting());
    drop(fut);

    assert!(!call.is_enqueued());
    assert!(!call.is_cancelled());
}

#[test]
fn drop_after_completion_does_not_cancel() {
    let call = MockCall::builder().ok(DONE.to_string()).build();

    let mut fut = call.await_body();
    assert!(poll_once(&mut fut).is_ready());
    assert!(fut.is_done());
    drop(fut);

    assert!(!call.is_cancelled());
}

#[test]
fn drop_with_undelivered_completion_does_not_cancel() {
    let call = manual_call(CancelBehavior::Ok);

    let mut fut = call.await_body();
    assert!(poll_once(&mut fut).is_pending());
    assert!(fut.is_waiting());

    // Delivered, but never polled again.
    call.start();
    drop(fut);

    assert!(!call.is_cancelled());
}
