//! Single-shot, re-arming tick scheduling.

/// Cadence of a running hold counter.
pub const TICK_MS: u32 = 100;
/// Delay before the first tick of a holding phase.
pub const FIRST_TICK_MS: u32 = 0;

/// Opaque reference to one scheduled tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimerHandle(u32);

impl TimerHandle {
    pub fn from_raw(raw: u32) -> Self {
        TimerHandle(raw)
    }

    pub fn to_raw(self) -> u32 {
        self.0
    }
}

pub trait TickScheduler {
    /// Schedule exactly one tick after `delay_ms`.
    fn arm(&mut self, delay_ms: u32) -> TimerHandle;
    /// Stop `handle` from firing. Stale or already-fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

/// At-most-one pending tick, with handles that are never reused.
#[derive(Debug, Default)]
pub struct TimerSlot {
    next_id: u32,
    pending: Option<TimerHandle>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self) -> TimerHandle {
        self.next_id = self.next_id.wrapping_add(1);
        let handle = TimerHandle(self.next_id);
        if let Some(old) = self.pending.replace(handle) {
            log::warn!("tick {:?} replaced while pending", old);
        }
        handle
    }

    pub fn cancel(&mut self, handle: TimerHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    /// Consume `handle` if it is the pending one; false means drop the tick.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }
}
