//! Movement system: integrates motion into location.

use glam::Vec2;

use crate::ecs::{BoundingBox, Enabled, EntityId, Location, Motion, World};
use crate::msg::MessageQueue;
use crate::sys::System;

/// Applies each entity's [`Motion`] to its [`Location`] once per tick,
/// clamping to the entity's [`BoundingBox`] when it has one.
pub struct Movement;

impl System for Movement {
    fn name(&self) -> &str {
        "movement"
    }

    fn run(&mut self, world: &mut World, _queue: &mut MessageQueue, _tick: u64) {
        let moving: Vec<(EntityId, Vec2)> = world
            .get_components::<Motion>()
            .into_iter()
            .map(|(id, motion)| (id, motion.velocity))
            .collect();

        for (id, velocity) in moving {
            let enabled = world
                .get_component::<Enabled>(id)
                .map(|e| e.0)
                .unwrap_or(true);
            if !enabled {
                continue;
            }
            let bounds = world
                .get_component::<BoundingBox>(id)
                .ok()
                .map(|b| (b.min, b.max));
            let Ok(location) = world.set_component::<Location>(id) else {
                continue;
            };
            location.pos += velocity;
            if let Some((min, max)) = bounds {
                location.pos = location.pos.clamp(min, max);
            }
        }
    }
}
