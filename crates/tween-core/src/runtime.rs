use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::frame_clock::FrameClock;
use crate::platform::{FrameTimeSource, RuntimeScheduler};
use crate::FrameCallbackId;

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    time_source: Arc<dyn FrameTimeSource>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    last_frame_nanos: Cell<Option<u64>>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>, time_source: Arc<dyn FrameTimeSource>) -> Self {
        Self {
            scheduler,
            time_source,
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            last_frame_nanos: Cell::new(None),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn is_frame_callback_pending(&self, id: FrameCallbackId) -> bool {
        self.frame_callbacks
            .borrow()
            .iter()
            .any(|entry| entry.id == id)
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        if callbacks.is_empty() {
            self.needs_frame.set(false);
        }
    }

    /// Timestamps never run backwards; a stale frame time is raised to the
    /// last one delivered.
    fn advance_frame_time(&self, frame_time_nanos: u64) -> u64 {
        let frame_time = match self.last_frame_nanos.get() {
            Some(last) if last > frame_time_nanos => {
                log::trace!("frame time {frame_time_nanos} behind {last}; clamping");
                last
            }
            _ => frame_time_nanos,
        };
        self.last_frame_nanos.set(Some(frame_time));
        frame_time
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let frame_time = self.advance_frame_time(frame_time_nanos);
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        log::trace!("draining {} frame callbacks at {frame_time}", pending.len());
        for callback in pending {
            callback(frame_time);
        }
        if !self.has_frame_callbacks() {
            self.needs_frame.set(false);
        }
    }
}

#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(
        scheduler: Arc<dyn RuntimeScheduler>,
        time_source: Arc<dyn FrameTimeSource>,
    ) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler, time_source)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle(Rc::downgrade(&self.inner))
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

/// Scheduler for hosts that poll [`Runtime::needs_frame`] instead of
/// being woken.
#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

#[cfg(test)]
#[derive(Default)]
pub struct TestScheduler;

#[cfg(test)]
impl RuntimeScheduler for TestScheduler {
    fn schedule_frame(&self) {}
}

#[cfg(test)]
#[derive(Default)]
pub struct TestTimeSource(std::sync::atomic::AtomicU64);

#[cfg(test)]
impl TestTimeSource {
    pub fn set(&self, nanos: u64) {
        self.0.store(nanos, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
impl FrameTimeSource for TestTimeSource {
    fn now_nanos(&self) -> u64 {
        self.0.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
pub struct TestRuntime {
    runtime: Runtime,
    time: Arc<TestTimeSource>,
}

#[cfg(test)]
impl TestRuntime {
    pub fn new() -> Self {
        let time = Arc::new(TestTimeSource::default());
        Self {
            runtime: Runtime::new(Arc::new(TestScheduler), time.clone()),
            time,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn set_time(&self, nanos: u64) {
        self.time.set(nanos);
    }
}

#[derive(Clone)]
pub struct RuntimeHandle(pub(crate) Weak<RuntimeInner>);

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Current frame-domain time; zero once the runtime is gone.
    pub fn now_nanos(&self) -> u64 {
        self.0
            .upgrade()
            .map(|inner| inner.time_source.now_nanos())
            .unwrap_or(0)
    }

    pub fn last_frame_nanos(&self) -> Option<u64> {
        self.0
            .upgrade()
            .and_then(|inner| inner.last_frame_nanos.get())
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.0
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.0.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn is_frame_callback_pending(&self, id: FrameCallbackId) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.is_frame_callback_pending(id))
            .unwrap_or(false)
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.0.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    pub fn needs_frame(&self) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.needs_frame.get())
            .unwrap_or(false)
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }
}

pub(crate) struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}
