//! Logic system: per-entity scripted behaviour.

use crate::ecs::{AiLogic, Enabled, World};
use crate::msg::MessageQueue;
use crate::sys::System;

/// Runs every enabled entity's [`AiLogic`] handler once per tick and
/// enqueues whatever messages the handlers return.
pub struct Logic;

impl System for Logic {
    fn name(&self) -> &str {
        "logic"
    }

    fn run(&mut self, world: &mut World, queue: &mut MessageQueue, tick: u64) {
        // Snapshot the handlers; they get mutable world access.
        let handlers: Vec<_> = world
            .get_components::<AiLogic>()
            .into_iter()
            .map(|(id, logic)| (id, logic.clone()))
            .collect();

        for (id, logic) in handlers {
            // A handler earlier this tick may have deleted the entity.
            if !world.is_alive(id) {
                continue;
            }
            let enabled = world
                .get_component::<Enabled>(id)
                .map(|e| e.0)
                .unwrap_or(true);
            if !enabled {
                continue;
            }
            for msg in logic.run(world, id, tick) {
                queue.add_message(msg);
            }
        }
    }
}
