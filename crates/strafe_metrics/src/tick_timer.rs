//! Tick timing utilities

use super::ring_buffer::RingBuffer;
use std::time::{Duration, Instant};

/// Measures logic tick durations against the fixed tick budget.
pub struct TickTimer {
    tick_start: Instant,
    tick_times: RingBuffer<Duration>,
    budget: Duration,
    overruns: u64,
}

impl TickTimer {
    pub fn new(capacity: usize, budget: Duration) -> Self {
        Self {
            tick_start: Instant::now(),
            tick_times: RingBuffer::new(capacity),
            budget,
            overruns: 0,
        }
    }

    pub fn begin(&mut self) {
        self.tick_start = Instant::now();
    }

    pub fn end(&mut self) {
        let elapsed = self.tick_start.elapsed();
        if elapsed > self.budget {
            self.overruns += 1;
        }
        self.tick_times.push(elapsed);
    }

    /// Ticks per second the measured work could sustain.
    pub fn tps(&self) -> f64 {
        let avg = self.tick_times.average();
        if avg.as_secs_f64() > 0.0 {
            1.0 / avg.as_secs_f64()
        } else {
            0.0
        }
    }

    pub fn tick_time_ms(&self) -> f64 {
        self.tick_times.average().as_secs_f64() * 1000.0
    }

    pub fn tick_time_range_ms(&self) -> (f64, f64) {
        let (min, max) = self.tick_times.min_max();
        (min.as_secs_f64() * 1000.0, max.as_secs_f64() * 1000.0)
    }

    /// Ticks that ran past their budget since construction.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measured_ticks_produce_a_rate() {
        let mut timer = TickTimer::new(4, Duration::from_millis(100));
        timer.begin();
        std::thread::sleep(Duration::from_millis(2));
        timer.end();

        assert!(timer.tick_time_ms() >= 2.0);
        assert!(timer.tps() > 0.0);
        assert_eq!(timer.overruns(), 0);
    }

    #[test]
    fn budget_overrun_is_counted() {
        let mut timer = TickTimer::new(4, Duration::from_micros(1));
        timer.begin();
        std::thread::sleep(Duration::from_millis(1));
        timer.end();

        assert_eq!(timer.overruns(), 1);
    }
}
