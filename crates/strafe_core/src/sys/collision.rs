//! Collision system: axis-aligned overlap between hitbox owners.

use glam::Vec2;

use crate::ecs::{Enabled, Hitbox, Location, Team, World};
use crate::msg::{Message, MessageQueue};
use crate::sys::System;

/// Wire command emitted to both parties of an overlap. The spelling is
/// historic and load-bearing: scripts and dispatch handlers match on it.
pub const COLLISION_CMD: &str = "colision";

struct Body {
    name: String,
    pos: Vec2,
    half: Vec2,
    team: Option<u8>,
}

/// Tests every pair of solid hitboxes on different teams and emits a
/// [`COLLISION_CMD`] message to each party, `from` naming the other.
/// Entities without a [`Team`] collide with everyone.
pub struct Collision;

impl System for Collision {
    fn name(&self) -> &str {
        "collision"
    }

    fn run(&mut self, world: &mut World, queue: &mut MessageQueue, _tick: u64) {
        let mut bodies = Vec::new();
        for (id, hitbox) in world.get_components::<Hitbox>() {
            if !hitbox.solid {
                continue;
            }
            let enabled = world
                .get_component::<Enabled>(id)
                .map(|e| e.0)
                .unwrap_or(true);
            if !enabled {
                continue;
            }
            let Ok(location) = world.get_component::<Location>(id) else {
                continue;
            };
            let Ok(name) = world.get_name(id) else {
                continue;
            };
            bodies.push(Body {
                name: name.to_string(),
                pos: location.pos,
                half: hitbox.half_extent,
                team: world.get_component::<Team>(id).ok().map(|t| t.0),
            });
        }

        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (a, b) = (&bodies[i], &bodies[j]);
                if let (Some(ta), Some(tb)) = (a.team, b.team) {
                    if ta == tb {
                        continue;
                    }
                }
                let gap = (a.pos - b.pos).abs();
                let reach = a.half + b.half;
                if gap.x < reach.x && gap.y < reach.y {
                    queue.add_message(Message::to_entity(&a.name, &b.name, COLLISION_CMD, ""));
                    queue.add_message(Message::to_entity(&b.name, &a.name, COLLISION_CMD, ""));
                }
            }
        }
    }
}
