//! Systems: per-tick logic units and their manager.
//!
//! The stock systems cover the standard component set (movement,
//! collision, logic, animation, input routing); games add their own by
//! implementing [`System`] and registering before the manager is
//! finalized.

mod animate;
mod collision;
mod input;
mod logic;
mod manager;
mod movement;
mod spawner;
mod system;

pub use animate::Animate;
pub use collision::{Collision, COLLISION_CMD};
pub use input::InputRouter;
pub use logic::Logic;
pub use manager::{DispatchError, SystemError, SystemManager};
pub use movement::Movement;
pub use spawner::{SpawnFactory, Spawner};
pub use system::System;
