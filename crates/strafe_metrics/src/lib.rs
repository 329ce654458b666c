//! Strafe Metrics - Common utilities for performance tracking
//!
//! Provides instrumentation for the fixed-tick loop that completely
//! vanishes in production builds via feature flags.
//!
//! # Feature Flags
//!
//! - `metrics` - Enable metrics collection (default: disabled)
//!
//! # Usage
//!
//! ```ignore
//! use strafe_metrics::TickTimer;
//!
//! let mut timer = TickTimer::new(120, tick_budget); // Track last 120 ticks
//! timer.begin();
//! // ... run the tick ...
//! timer.end();
//! println!("TPS: {:.1}", timer.tps());
//! ```
//!
//! In production builds (without the `metrics` feature), all
//! instrumentation is compiled down to no-op stubs.

#[cfg(feature = "metrics")]
mod counter;
#[cfg(feature = "metrics")]
mod ring_buffer;
#[cfg(feature = "metrics")]
mod system_profiler;
#[cfg(feature = "metrics")]
mod tick_timer;

#[cfg(feature = "metrics")]
pub use counter::Counter;
#[cfg(feature = "metrics")]
pub use ring_buffer::RingBuffer;
#[cfg(feature = "metrics")]
pub use system_profiler::SystemProfiler;
#[cfg(feature = "metrics")]
pub use tick_timer::TickTimer;

// ============================================================================
// No-op stubs when metrics disabled
// ============================================================================

#[cfg(not(feature = "metrics"))]
pub struct TickTimer;

#[cfg(not(feature = "metrics"))]
impl TickTimer {
    pub fn new(_capacity: usize, _budget: std::time::Duration) -> Self {
        Self
    }
    pub fn begin(&mut self) {}
    pub fn end(&mut self) {}
    pub fn tps(&self) -> f64 {
        0.0
    }
    pub fn tick_time_ms(&self) -> f64 {
        0.0
    }
    pub fn overruns(&self) -> u64 {
        0
    }
}

#[cfg(not(feature = "metrics"))]
pub struct RingBuffer<T>(std::marker::PhantomData<T>);

#[cfg(not(feature = "metrics"))]
impl<T> RingBuffer<T> {
    pub fn new(_capacity: usize) -> Self {
        Self(std::marker::PhantomData)
    }
    pub fn push(&mut self, _value: T) {}
}

#[cfg(not(feature = "metrics"))]
#[derive(Default)]
pub struct Counter;

#[cfg(not(feature = "metrics"))]
impl Counter {
    pub fn new() -> Self {
        Self
    }
    pub fn increment(&mut self, _name: &str, _value: usize) {}
    pub fn get(&self, _name: &str) -> usize {
        0
    }
}

#[cfg(not(feature = "metrics"))]
#[derive(Default)]
pub struct SystemProfiler;

#[cfg(not(feature = "metrics"))]
impl SystemProfiler {
    pub fn new() -> Self {
        Self
    }
    pub fn time_system<F, R>(&mut self, _name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        f()
    }
    pub fn get_timing(&self, _name: &str) -> std::time::Duration {
        std::time::Duration::ZERO
    }
}
