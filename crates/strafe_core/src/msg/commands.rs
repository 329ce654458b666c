//! Command table: message commands mapped to handlers.
//!
//! Generic over a context type so handlers close over no global state; the
//! engine instantiates one table over its context for `"system"`-targeted
//! messages, and games may keep their own tables for their own targets.

use std::collections::HashMap;

use crate::msg::Message;

type Handler<C> = Box<dyn FnMut(&mut C, &[String]) + Send>;

struct Entry<C> {
    min_args: usize,
    handler: Handler<C>,
}

/// Maps command name to `(minimum argument count, handler)`.
pub struct CommandTable<C> {
    table: HashMap<String, Entry<C>>,
}

impl<C> CommandTable<C> {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Register a handler. Returns `false` if the name is already taken.
    pub fn add(
        &mut self,
        name: &str,
        min_args: usize,
        handler: impl FnMut(&mut C, &[String]) + Send + 'static,
    ) -> bool {
        if self.table.contains_key(name) {
            return false;
        }
        self.table.insert(
            name.to_string(),
            Entry {
                min_args,
                handler: Box::new(handler),
            },
        );
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Run each registered command found in `messages`.
    ///
    /// Unregistered commands and messages with too few arguments are
    /// skipped silently — this is how the engine's command set coexists
    /// with game-specific commands on the same target without cross-talk.
    pub fn process_messages(&mut self, ctx: &mut C, messages: &[Message]) {
        for msg in messages {
            let Some(entry) = self.table.get_mut(msg.cmd()) else {
                continue;
            };
            if msg.args().len() < entry.min_args {
                tracing::debug!(cmd = msg.cmd(), "command dropped: too few arguments");
                continue;
            }
            (entry.handler)(ctx, msg.args());
        }
    }
}

impl<C> Default for CommandTable<C> {
    fn default() -> Self {
        Self::new()
    }
}
