//! Game hooks: the boundary to input, rendering, and game content.

use crate::ecs::World;
use crate::engine::Context;
use crate::msg::Message;

/// Implemented by the game built on the engine.
///
/// `setup` and `cleanup` bracket a game session; `poll_input` and `render`
/// are the per-tick boundary to the platform collaborators (input backend,
/// renderer) that live outside the core.
pub trait Game {
    /// Register systems, spawns, and starting entities; load scripts.
    /// Runs with a cleared world and an open (un-finalized) system manager.
    fn setup(&mut self, ctx: &mut Context);

    /// Tear down game-specific state; the context is cleared right after.
    fn cleanup(&mut self, _ctx: &mut Context) {}

    /// Poll the input backend; returned messages are enqueued this tick.
    fn poll_input(&mut self, _tick: u64) -> Vec<Message> {
        Vec::new()
    }

    /// Hand the current component state to the renderer.
    fn render(&mut self, _world: &World) {}
}
