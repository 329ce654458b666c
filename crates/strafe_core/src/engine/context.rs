//! Engine context: one instance of every manager.
//!
//! The managers live as plain fields with their lifetime tied to the
//! engine instance, passed by reference to whoever needs them. There is
//! exactly one `Context` because exactly one is constructed — no globals,
//! no "already running" runtime check.

use crate::ecs::World;
use crate::engine::VarMap;
use crate::msg::MessageQueue;
use crate::sys::{Spawner, SystemManager};

/// Run-state flags, set by the built-in commands and consumed by the
/// engine loop between message processing and the system pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EngineFlags {
    pub running: bool,
    pub game_started: bool,
    pub new_game_requested: bool,
    pub end_game_requested: bool,
    pub exit_requested: bool,
}

/// The application context handed to games, systems, and command handlers.
#[derive(Default)]
pub struct Context {
    pub world: World,
    pub queue: MessageQueue,
    pub systems: SystemManager,
    pub spawner: Spawner,
    pub vars: VarMap,
    pub flags: EngineFlags,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }
}
