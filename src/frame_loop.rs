use std::collections::HashMap;

/// Token for one pending display-refresh callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Per-canvas "request animation frame" queue. A canvas has at most one pending
/// frame; the host's refresh primitive takes it with [`FrameScheduler::take_due`]
/// and hands it to whoever requested it.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: HashMap<String, FrameHandle>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, canvas_id: &str) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending.insert(canvas_id.to_string(), handle);
        handle
    }

    /// Cancelling a handle that already fired or was replaced does nothing.
    pub fn cancel(&mut self, handle: FrameHandle) {
        self.pending.retain(|_, pending| *pending != handle);
    }

    pub fn take_due(&mut self, canvas_id: &str) -> Option<FrameHandle> {
        self.pending.remove(canvas_id)
    }

    pub fn has_pending(&self, canvas_id: &str) -> bool {
        self.pending.contains_key(canvas_id)
    }
}
