//! Standard engine components.
//!
//! Plain data attached to entities; systems look them up by entity id and
//! skip entities that lack what they need. Games are free to define more —
//! storage accepts any `'static + Send + Sync` type.

use std::fmt;
use std::sync::Arc;

use glam::Vec2;

use crate::ecs::{EntityId, World};
use crate::msg::Message;

/// World position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub pos: Vec2,
}

impl Location {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}

/// Per-tick velocity, integrated into [`Location`] by the movement system.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Motion {
    pub velocity: Vec2,
}

impl Motion {
    pub fn new(vx: f32, vy: f32) -> Self {
        Self {
            velocity: Vec2::new(vx, vy),
        }
    }
}

/// Axis-aligned region the entity's location is clamped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec2,
    pub max: Vec2,
}

/// Collision extent centred on the entity's location.
///
/// Non-solid hitboxes are ignored by the collision system (used for
/// entities that are mid-spawn or despawning).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub half_extent: Vec2,
    pub solid: bool,
}

impl Hitbox {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            half_extent: Vec2::new(width / 2.0, height / 2.0),
            solid: true,
        }
    }
}

/// Team tag; the collision system ignores overlap within a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team(pub u8);

/// Sprite sheet playback state, advanced by the animate system.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub sheet: String,
    pub frame: u32,
    pub frames: u32,
    pub ticks_per_frame: u32,
    counter: u32,
}

impl Sprite {
    pub fn new(sheet: impl Into<String>, frames: u32, ticks_per_frame: u32) -> Self {
        Self {
            sheet: sheet.into(),
            frame: 0,
            frames: frames.max(1),
            ticks_per_frame: ticks_per_frame.max(1),
            counter: 0,
        }
    }

    /// Advance one tick; wraps to the first frame after the last.
    pub fn advance(&mut self) {
        self.counter += 1;
        if self.counter >= self.ticks_per_frame {
            self.counter = 0;
            self.frame = (self.frame + 1) % self.frames;
        }
    }
}

/// Marks a background drawable; the renderer sorts by `layer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    pub layer: i32,
}

/// Marks an overlay drawable; the renderer sorts by `layer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub layer: i32,
}

/// Gameplay on/off flag; disabled entities are skipped by the stock systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enabled(pub bool);

/// Draw flag consumed by the renderer and the animate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visible(pub bool);

/// Looping audio sample bound to the entity; the audio collaborator reads
/// this state each tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleLoop {
    pub sample: String,
    pub playing: bool,
}

/// Buttons this entity reacts to; the input router re-addresses matching
/// input messages to the entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBinding {
    pub buttons: Vec<String>,
}

impl InputBinding {
    pub fn new<I, S>(buttons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            buttons: buttons.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, button: &str) -> bool {
        self.buttons.iter().any(|b| b == button)
    }
}

/// Handler invoked for each message delivered to a dispatcher entity.
///
/// Handlers get mutable world access and return reply messages; the
/// dispatch loop enqueues the replies, so a chain of reactions resolves
/// within the same tick.
pub type MessageHandler =
    Arc<dyn Fn(&mut World, EntityId, &Message, u64) -> Vec<Message> + Send + Sync>;

/// Marks the entity as able to receive entity-addressed messages.
#[derive(Clone)]
pub struct Dispatcher {
    handler: MessageHandler,
}

impl Dispatcher {
    pub fn new(
        handler: impl Fn(&mut World, EntityId, &Message, u64) -> Vec<Message> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Deliver one message; returns messages to enqueue.
    pub fn handle(
        &self,
        world: &mut World,
        id: EntityId,
        msg: &Message,
        tick: u64,
    ) -> Vec<Message> {
        (self.handler)(world, id, msg, tick)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Dispatcher")
    }
}

/// Handler run once per tick for an [`AiLogic`] entity.
pub type LogicHandler = Arc<dyn Fn(&mut World, EntityId, u64) -> Vec<Message> + Send + Sync>;

/// Per-tick scripted behaviour, run by the logic system while the entity
/// is enabled.
#[derive(Clone)]
pub struct AiLogic {
    handler: LogicHandler,
}

impl AiLogic {
    pub fn new(
        handler: impl Fn(&mut World, EntityId, u64) -> Vec<Message> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Run one tick of behaviour; returns messages to enqueue.
    pub fn run(&self, world: &mut World, id: EntityId, tick: u64) -> Vec<Message> {
        (self.handler)(world, id, tick)
    }
}

impl fmt::Debug for AiLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AiLogic")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sprite_advances_and_wraps() {
        let mut sprite = Sprite::new("ship", 3, 2);
        assert_eq!(sprite.frame, 0);

        sprite.advance();
        assert_eq!(sprite.frame, 0); // mid-frame
        sprite.advance();
        assert_eq!(sprite.frame, 1);

        for _ in 0..4 {
            sprite.advance();
        }
        assert_eq!(sprite.frame, 0); // wrapped past the last frame
    }

    #[test]
    fn input_binding_matches_any_listed_button() {
        let binding = InputBinding::new(["left", "right"]);
        assert!(binding.matches("left"));
        assert!(binding.matches("right"));
        assert!(!binding.matches("fire"));
    }
}
