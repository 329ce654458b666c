//! Entity Component System core types.
//!
//! Storage is a sparse association keyed by component type and entity id:
//! each component type gets its own column, and a column maps entity ids to
//! owned instances. There is no central enum of component types — any
//! `'static + Send + Sync` value is a component, so games define their own
//! without touching the engine.

mod component;
mod components;
mod entity;
mod error;
mod world;

pub use component::Component;
pub use components::{
    AiLogic, Background, BoundingBox, Dispatcher, Enabled, Hitbox, InputBinding, Location,
    LogicHandler, MessageHandler, Motion, Overlay, SampleLoop, Sprite, Team, Visible,
};
pub use entity::EntityId;
pub use error::WorldError;
pub use world::World;
