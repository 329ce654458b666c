use crate::ecs::World;
use crate::msg::MessageQueue;

/// A named unit of per-tick logic.
///
/// Systems are registered with the [`SystemManager`](crate::sys::SystemManager)
/// during game setup and run once per logic tick in registration order. An
/// entity missing the components a system cares about is simply not
/// relevant to it; absence is never an error. A panic out of `run` is a
/// programming error and propagates to the engine loop unmodified.
pub trait System: Send {
    /// Unique name within the manager; enable/disable address systems by it.
    fn name(&self) -> &str;

    /// Advance one logic tick.
    fn run(&mut self, world: &mut World, queue: &mut MessageQueue, tick: u64);
}
