//! Animation system: advances sprite frames.

use crate::ecs::{EntityId, Sprite, Visible, World};
use crate::msg::MessageQueue;
use crate::sys::System;

/// Steps every visible entity's [`Sprite`] playback once per tick.
pub struct Animate;

impl System for Animate {
    fn name(&self) -> &str {
        "animate"
    }

    fn run(&mut self, world: &mut World, _queue: &mut MessageQueue, _tick: u64) {
        let animated: Vec<EntityId> = world
            .get_components::<Sprite>()
            .into_iter()
            .map(|(id, _)| id)
            .collect();

        for id in animated {
            let visible = world
                .get_component::<Visible>(id)
                .map(|v| v.0)
                .unwrap_or(true);
            if !visible {
                continue;
            }
            if let Ok(sprite) = world.set_component::<Sprite>(id) {
                sprite.advance();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_sprites_advance() {
        let mut world = World::new();
        let mut queue = MessageQueue::new();
        let e = world.new_entity(None).unwrap();
        world.add_component(e, Sprite::new("ship", 4, 1)).unwrap();

        Animate.run(&mut world, &mut queue, 0);
        assert_eq!(world.get_component::<Sprite>(e).unwrap().frame, 1);
    }

    #[test]
    fn hidden_sprites_hold_their_frame() {
        let mut world = World::new();
        let mut queue = MessageQueue::new();
        let e = world.new_entity(None).unwrap();
        world.add_component(e, Sprite::new("ship", 4, 1)).unwrap();
        world.add_component(e, Visible(false)).unwrap();

        Animate.run(&mut world, &mut queue, 0);
        assert_eq!(world.get_component::<Sprite>(e).unwrap().frame, 0);
    }
}
