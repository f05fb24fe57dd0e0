use std::time::{Duration, Instant};

/// Rings once `duration` has elapsed since the last reset. A timer that was
/// never reset rings immediately.
pub struct Timer {
    duration: Duration,
    last: Option<Instant>,
}

impl Timer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            last: None,
        }
    }

    pub fn ringing_at(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.duration,
        }
    }

    pub fn reset_at(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// Forgets the last reset so the next check rings
    pub fn expire(&mut self) {
        self.last = None;
    }
}
