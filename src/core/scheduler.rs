//! Frame scheduling seam.
//!
//! The controller never owns a render loop.  It asks a [`FrameScheduler`]
//! for "one more tick before the next paint" and gets a [`TickHandle`]
//! back; the host later calls `on_tick(handle, now)`.  Cancelling a handle
//! guarantees that tick is ignored even if the host still delivers it.

/// Registration id of one requested tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Host primitive for scheduling work before the next repaint.
pub trait FrameScheduler {
    /// Register interest in the next frame.
    fn request_tick(&mut self) -> TickHandle;
    /// Withdraw a registration.  Unknown or already-delivered handles are
    /// ignored.
    fn cancel_tick(&mut self, handle: TickHandle);
}

/// Deterministic frame queue: registrations pile up until the host takes
/// them at its next frame.  Used by the terminal host and by tests as a
/// fake clock.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Vec<TickHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every registration due this frame.  Ticks requested while the
    /// returned handles are being delivered wait for the following frame.
    pub fn take_due(&mut self) -> Vec<TickHandle> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_tick(&mut self) -> TickHandle {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = TickHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.pending.retain(|&h| h != handle);
    }
}
