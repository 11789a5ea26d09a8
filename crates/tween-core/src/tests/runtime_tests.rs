use super::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

#[test]
fn frame_callbacks_fire_in_registration_order() {
    let test_runtime = TestRuntime::new();
    let runtime = test_runtime.runtime();
    let handle = runtime.handle();
    let clock = runtime.frame_clock();
    let events: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
    let mut guards = Vec::new();
    {
        let events = events.clone();
        guards.push(clock.with_frame_nanos(move |_| {
            events.borrow_mut().push("first");
        }));
    }
    {
        let events = events.clone();
        guards.push(clock.with_frame_nanos(move |_| {
            events.borrow_mut().push("second");
        }));
    }

    handle.drain_frame_callbacks(42);
    drop(guards);

    let events = events.borrow();
    assert_eq!(events.as_slice(), ["first", "second"]);
    assert!(!runtime.needs_frame());
}

#[test]
fn cancelling_frame_callback_prevents_execution() {
    let test_runtime = TestRuntime::new();
    let runtime = test_runtime.runtime();
    let handle = runtime.handle();
    let clock = runtime.frame_clock();
    let events: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

    let registration = {
        let events = events.clone();
        clock.with_frame_nanos(move |_| {
            events.borrow_mut().push("fired");
        })
    };

    assert!(runtime.needs_frame());
    assert!(registration.is_active());
    drop(registration);
    handle.drain_frame_callbacks(84);
    assert!(events.borrow().is_empty());
    assert!(!runtime.needs_frame());
}

#[test]
fn explicit_cancel_removes_pending_callback() {
    let test_runtime = TestRuntime::new();
    let handle = test_runtime.handle();
    let clock = handle.frame_clock();

    let registration = clock.with_frame_nanos(|_| panic!("cancelled callback ran"));
    assert!(handle.has_frame_callbacks());
    registration.cancel();
    assert!(!handle.has_frame_callbacks());
    handle.drain_frame_callbacks(1);
}

#[test]
fn draining_callbacks_clears_needs_frame() {
    let test_runtime = TestRuntime::new();
    let runtime = test_runtime.runtime();
    let handle = runtime.handle();
    let clock = runtime.frame_clock();

    let guard = clock.with_frame_nanos(|_| {});
    assert!(runtime.needs_frame());
    handle.drain_frame_callbacks(128);
    assert!(!guard.is_active());
    drop(guard);
    assert!(!runtime.needs_frame());
}

#[test]
fn callbacks_registered_during_drain_run_on_next_frame() {
    let test_runtime = TestRuntime::new();
    let handle = test_runtime.handle();
    let seen: Rc<RefCell<Vec<u64>>> = Rc::new(RefCell::new(Vec::new()));
    let next: Rc<RefCell<Option<FrameCallbackRegistration>>> = Rc::new(RefCell::new(None));

    let first = {
        let seen = seen.clone();
        let next = next.clone();
        let clock = handle.frame_clock();
        handle.frame_clock().with_frame_nanos(move |time| {
            seen.borrow_mut().push(time);
            let seen = seen.clone();
            let registration = clock.with_frame_nanos(move |time| {
                seen.borrow_mut().push(time);
            });
            *next.borrow_mut() = Some(registration);
        })
    };

    handle.drain_frame_callbacks(10);
    assert_eq!(seen.borrow().as_slice(), [10]);
    assert!(handle.needs_frame());

    handle.drain_frame_callbacks(20);
    assert_eq!(seen.borrow().as_slice(), [10, 20]);
    drop(first);
}

#[test]
fn frame_time_never_runs_backwards() {
    let test_runtime = TestRuntime::new();
    let handle = test_runtime.handle();
    let seen: Rc<RefCell<Vec<u64>>> = Rc::new(RefCell::new(Vec::new()));

    handle.drain_frame_callbacks(500);
    let _guard = {
        let seen = seen.clone();
        handle
            .frame_clock()
            .with_frame_nanos(move |time| seen.borrow_mut().push(time))
    };
    handle.drain_frame_callbacks(200);

    assert_eq!(seen.borrow().as_slice(), [500]);
    assert_eq!(handle.last_frame_nanos(), Some(500));
}

#[test]
fn with_frame_millis_converts_timestamp() {
    let test_runtime = TestRuntime::new();
    let handle = test_runtime.handle();
    let seen = Rc::new(RefCell::new(None));

    let _guard = {
        let seen = seen.clone();
        handle
            .frame_clock()
            .with_frame_millis(move |millis| *seen.borrow_mut() = Some(millis))
    };
    handle.drain_frame_callbacks(16_600_000);

    assert_eq!(*seen.borrow(), Some(16));
}

#[test]
fn now_reads_time_source() {
    let test_runtime = TestRuntime::new();
    test_runtime.set_time(1_234);
    assert_eq!(test_runtime.handle().frame_clock().now_nanos(), 1_234);
}

#[test]
fn registration_after_runtime_dropped_is_inactive() {
    let clock = {
        let runtime = Runtime::new(Arc::new(DefaultScheduler), Arc::new(TestTimeSource::default()));
        runtime.frame_clock()
    };

    let registration = clock.with_frame_nanos(|_| {});
    assert!(!registration.is_active());
    assert!(!clock.runtime_handle().is_alive());
    assert_eq!(clock.now_nanos(), 0);
}

#[test]
fn needs_frame_stays_raised_while_callbacks_are_queued() {
    let test_runtime = TestRuntime::new();
    let runtime = test_runtime.runtime();
    let clock = runtime.frame_clock();

    let first = clock.with_frame_nanos(|_| {});
    let second = clock.with_frame_nanos(|_| {});
    first.cancel();
    assert!(runtime.needs_frame());
    assert!(second.is_active());

    runtime.handle().drain_frame_callbacks(64);
    assert!(!runtime.needs_frame());
}
