use std::time::{Duration, Instant};

/// Logs how long a scope took when dropped.
pub struct TimeLogger {
    name: String,
    start: Instant,
}

impl TimeLogger {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for TimeLogger {
    fn drop(&mut self) {
        // Millisecond precision is enough for log output.
        let elapsed = Duration::from_millis(self.elapsed().as_millis() as u64);
        tracing::debug!(
            "{} took {}",
            self.name,
            humantime::format_duration(elapsed)
        );
    }
}
