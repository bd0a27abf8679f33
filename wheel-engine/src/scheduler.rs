use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Host facility that delivers animation ticks.
///
/// The engine asks for one tick at a time. When the tick fires, the host
/// calls back into the engine with the handle it was given and the current
/// clock reading; the engine then decides whether to ask for another.
pub trait FrameScheduler {
    type Handle: Copy + Eq + fmt::Debug;

    /// Ask for one tick, delivered "soon" with the host's timestamp.
    fn request_tick(&mut self) -> Self::Handle;

    /// Revoke a request. Must be harmless for handles that already fired or
    /// were already cancelled.
    fn cancel_tick(&mut self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct QueueInner {
    next_id: u64,
    pending: Vec<FrameHandle>,
    requested: u64,
    cancelled: Vec<FrameHandle>,
}

/// Single-threaded scheduler shared between the engine and its host loop.
///
/// Clones share one queue: the engine's copy registers requests, the host's
/// copy drains them with [`FrameQueue::take_pending`] and delivers the tick.
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    inner: Rc<RefCell<QueueInner>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest outstanding request, removed from the queue.
    pub fn take_pending(&self) -> Option<FrameHandle> {
        let mut inner = self.inner.borrow_mut();
        if inner.pending.is_empty() {
            None
        } else {
            Some(inner.pending.remove(0))
        }
    }

    pub fn pending_len(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    pub fn has_pending(&self) -> bool {
        self.pending_len() > 0
    }

    /// Number of `request_tick` calls so far.
    pub fn requested(&self) -> u64 {
        self.inner.borrow().requested
    }

    /// Every handle passed to `cancel_tick`, in call order.
    pub fn cancelled(&self) -> Vec<FrameHandle> {
        self.inner.borrow().cancelled.clone()
    }
}

impl FrameScheduler for FrameQueue {
    type Handle = FrameHandle;

    fn request_tick(&mut self) -> FrameHandle {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        inner.requested += 1;
        let handle = FrameHandle(inner.next_id);
        inner.pending.push(handle);
        handle
    }

    fn cancel_tick(&mut self, handle: FrameHandle) {
        let mut inner = self.inner.borrow_mut();
        inner.pending.retain(|h| *h != handle);
        inner.cancelled.push(handle);
    }
}
