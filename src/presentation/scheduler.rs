/// Opaque ticket for one scheduled frame
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct FrameHandle(u64);

/// Single-slot frame queue driven by the UI loop.
///
/// Stands in for an animation-frame service: the owner requests a frame,
/// the loop hands it back through [`FrameScheduler::take_due`] on the next
/// iteration, and a cancelled frame is simply never handed back.
/// At most one frame is outstanding at any time.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    outstanding: Option<FrameHandle>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self) -> FrameHandle {
        debug_assert!(
            self.outstanding.is_none(),
            "frame requested while {:?} is still outstanding",
            self.outstanding
        );

        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.outstanding = Some(handle);
        handle
    }

    /// Drops `handle` if it is the outstanding frame. Safe to call twice.
    pub fn cancel(&mut self, handle: FrameHandle) {
        if self.outstanding == Some(handle) {
            self.outstanding = None;
        }
    }

    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.outstanding.take()
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.iter().count()
    }
}
