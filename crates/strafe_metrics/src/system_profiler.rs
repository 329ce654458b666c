//! Per-system wall-time profiling

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Records the most recent run duration of each named system.
#[derive(Default)]
pub struct SystemProfiler {
    timings: HashMap<String, Duration>,
}

impl SystemProfiler {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
        }
    }

    /// Run `f`, recording its duration under `name`.
    pub fn time_system<F, R>(&mut self, name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        self.timings.insert(name.to_string(), start.elapsed());
        result
    }

    /// Last recorded duration for `name`; zero if never timed.
    pub fn get_timing(&self, name: &str) -> Duration {
        self.timings.get(name).copied().unwrap_or(Duration::ZERO)
    }
}
