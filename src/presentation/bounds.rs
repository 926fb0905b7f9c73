/// Vertical travel available to the message, in rows
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct ScrollBounds {
    padding: u16,
    max_scroll: f64,
}

impl ScrollBounds {
    pub fn new(padding: u16) -> Self {
        ScrollBounds {
            padding,
            max_scroll: 0.0,
        }
    }

    /// Re-measures after a layout change. Returns true if the travel changed.
    pub fn measure(&mut self, content_rows: usize, viewport_rows: u16) -> bool {
        let travel = content_rows as f64 - viewport_rows as f64 + self.padding as f64;
        let max_scroll = travel.max(0.0);

        let changed = max_scroll != self.max_scroll;
        self.max_scroll = max_scroll;
        changed
    }

    pub fn max_scroll(&self) -> f64 {
        self.max_scroll
    }

    pub fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(-self.max_scroll, 0.0)
    }

    pub fn offset_for(&self, progress: f64) -> f64 {
        match self.max_scroll > 0.0 {
            true => -progress * self.max_scroll,
            false => 0.0,
        }
    }

    pub fn progress_for(&self, offset: f64) -> f64 {
        match self.max_scroll > 0.0 {
            true => (offset.abs() / self.max_scroll).min(1.0),
            false => 0.0,
        }
    }
}
