use serde::Serialize;
use std::time::{Duration, Instant};

/// A value together with the time it took to compute.
#[derive(Debug, Clone, Serialize)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed_secs: f64,
}

pub struct SectionTimer {
    section: &'static str,
    start_time: Instant,
}

impl SectionTimer {
    pub fn start(section: &'static str) -> Self {
        tracing::debug!("⏱️ {} started", section);
        Self {
            section,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn finish<T>(self, value: T) -> Timed<T> {
        let elapsed = self.elapsed();
        tracing::debug!("⏱️ {} finished in {:?}", self.section, elapsed);
        Timed {
            value,
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }
}

pub fn timed<T>(section: &'static str, f: impl FnOnce() -> T) -> Timed<T> {
    let timer = SectionTimer::start(section);
    let value = f();
    timer.finish(value)
}
