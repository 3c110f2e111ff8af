use std::time::Duration;

/// Turns variable frame times into a whole number of fixed-cadence ticks.
#[derive(Clone, Copy, Debug)]
pub(super) struct TickPacer {
    interval: Duration,
    accumulated: Duration,
    max_catch_up: u32,
}

impl TickPacer {
    pub(super) fn new(interval: Duration, max_catch_up: u32) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            accumulated: Duration::ZERO,
            max_catch_up: max_catch_up.max(1),
        }
    }

    /// Ticks owed after `frame_delta`. Backlog beyond the catch-up limit is dropped.
    pub(super) fn due_ticks(&mut self, frame_delta: Duration) -> u32 {
        self.accumulated += frame_delta;

        let mut ticks = 0;
        while self.accumulated >= self.interval {
            if ticks == self.max_catch_up {
                self.accumulated = Duration::ZERO;
                break;
            }
            self.accumulated -= self.interval;
            ticks += 1;
        }
        ticks
    }
}
