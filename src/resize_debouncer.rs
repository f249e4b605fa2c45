use std::time::{Duration, Instant};

/// Collapses a burst of window resizes into one notification once `quiet`
/// has passed without another resize.
#[derive(Debug, Clone, Copy)]
pub struct ResizeDebouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl ResizeDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Restarts the quiet period.
    pub fn notify(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Returns true exactly once per burst, when the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(100);

    #[test]
    fn fires_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(QUIET);
        debouncer.notify(start);

        assert!(!debouncer.poll(start + Duration::from_millis(99)));
        assert!(debouncer.poll(start + QUIET));
        assert!(!debouncer.poll(start + Duration::from_millis(500)));
    }

    #[test]
    fn burst_restarts_the_timer() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(QUIET);

        for step in 0..5 {
            debouncer.notify(start + Duration::from_millis(step * 50));
        }

        // Last notify at 200ms, so nothing before 300ms.
        assert!(!debouncer.poll(start + Duration::from_millis(250)));
        assert!(debouncer.poll(start + Duration::from_millis(300)));
    }

    #[test]
    fn idle_never_fires() {
        let mut debouncer = ResizeDebouncer::new(QUIET);
        assert!(debouncer.deadline().is_none());
        assert!(!debouncer.poll(Instant::now()));
    }
}
