//! Strafe Engine Core
//!
//! Contains the fundamental simulation systems:
//! - Entity Component System (ECS)
//! - Timed message queue and command tables
//! - System manager with per-entity message dispatch
//! - Fixed-tick engine loop

pub mod ecs;
pub mod engine;
pub mod msg;
pub mod sys;
pub mod time;

pub use glam;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
