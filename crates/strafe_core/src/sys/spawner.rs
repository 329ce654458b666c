//! Spawner: data-driven entity creation and deletion.
//!
//! Games register named spawn factories during setup; `"new"` and
//! `"delete"` messages drive entity lifecycle from scripts and handlers at
//! runtime. Bad references (unknown spawn names, wrong argument counts,
//! already-deleted entities) are skipped, not errors — scripts written for
//! one game variant may reference spawns another variant never registers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ecs::{EntityId, World, WorldError};
use crate::msg::Message;

/// Populates components on a freshly created entity.
pub type SpawnFactory =
    Arc<dyn Fn(&mut World, EntityId, &[String]) -> Result<(), WorldError> + Send + Sync>;

struct SpawnEntry {
    arg_count: usize,
    factory: SpawnFactory,
}

/// Registry of named spawn factories.
#[derive(Default)]
pub struct Spawner {
    spawns: HashMap<String, SpawnEntry>,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory. Returns `false` if the name is already taken.
    ///
    /// `arg_count` is the exact number of arguments the factory expects,
    /// not counting the spawn name itself.
    pub fn add(
        &mut self,
        name: &str,
        arg_count: usize,
        factory: impl Fn(&mut World, EntityId, &[String]) -> Result<(), WorldError>
            + Send
            + Sync
            + 'static,
    ) -> bool {
        if self.spawns.contains_key(name) {
            return false;
        }
        self.spawns.insert(
            name.to_string(),
            SpawnEntry {
                arg_count,
                factory: Arc::new(factory),
            },
        );
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.spawns.contains_key(name)
    }

    /// Apply a batch of `"spawner"`-targeted messages to the world.
    pub fn process_messages(&self, world: &mut World, messages: &[Message]) {
        for msg in messages {
            match msg.cmd() {
                "new" => self.spawn_from(world, msg),
                "delete" => self.delete_from(world, msg),
                other => {
                    tracing::debug!(cmd = other, "spawner ignored unknown command");
                }
            }
        }
    }

    fn spawn_from(&self, world: &mut World, msg: &Message) {
        let Some(name) = msg.arg(0) else {
            return;
        };
        let Some(entry) = self.spawns.get(name) else {
            tracing::debug!(spawn = name, "skipped unregistered spawn");
            return;
        };
        let args = &msg.args()[1..];
        if args.len() != entry.arg_count {
            tracing::debug!(
                spawn = name,
                expected = entry.arg_count,
                got = args.len(),
                "spawn skipped: argument count mismatch"
            );
            return;
        }

        let id = match world.new_entity(None) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(%err, spawn = name, "could not create entity");
                return;
            }
        };
        if let Err(err) = (entry.factory)(world, id, args) {
            tracing::warn!(%err, spawn = name, "spawn factory failed; entity removed");
            // NotFound here means the factory deleted its own entity.
            world.delete_entity(id).ok();
        }
    }

    fn delete_from(&self, world: &mut World, msg: &Message) {
        let Some(name) = msg.arg(0) else {
            return;
        };
        match world.get_id(name) {
            Ok(id) => {
                if world.delete_entity(id).is_ok() {
                    tracing::debug!(entity = name, "entity deleted by message");
                }
            }
            Err(_) => {
                tracing::trace!(entity = name, "delete skipped: no such entity");
            }
        }
    }
}
