use std::thread;
use std::time::{Duration, Instant};

/// Keeps consecutive search invocations at least `delay` apart.
#[derive(Debug, Clone)]
pub struct SearchThrottle {
    delay: Duration,
    last_call: Option<Instant>,
}

impl SearchThrottle {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_call: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Blocks until the delay since the previous call has elapsed. The first
    /// call never waits.
    pub fn wait(&mut self) {
        if let Some(last) = self.last_call {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                thread::sleep(self.delay - elapsed);
            }
        }
        self.last_call = Some(Instant::now());
    }
}
