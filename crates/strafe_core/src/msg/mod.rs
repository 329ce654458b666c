//! Message passing.
//!
//! Messages are the engine's only inter-system communication channel: the
//! input pump, the spawner, the command table, and per-entity dispatchers
//! all speak through the [`MessageQueue`].

mod commands;
mod message;
mod queue;
mod trace;

pub use commands::CommandTable;
pub use message::{join_args, split_args, Message, ScriptEvent};
pub use queue::MessageQueue;
pub use trace::MessageTrace;

/// Well-known message targets.
pub mod target {
    /// The engine's top-level command table.
    pub const SYSTEM: &str = "system";
    /// The spawner (`new` / `delete` commands).
    pub const SPAWNER: &str = "spawner";
    /// Per-entity dispatch; `to` names the recipient entity.
    pub const ENTITIES: &str = "entities";
    /// Raw input events awaiting routing.
    pub const INPUT: &str = "input";
}
