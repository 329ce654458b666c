//! System manager: runs registered systems and dispatches entity messages.

use thiserror::Error;

use crate::ecs::{Dispatcher, World};
use crate::msg::{target, MessageQueue};
use crate::sys::System;

use strafe_metrics::SystemProfiler;

/// Outer dispatch passes allowed before a reaction chain is declared
/// runaway. Handlers replying to each other is normal; sixty-four rounds
/// of replies within a single tick is not.
const MAX_DISPATCH_PASSES: u32 = 64;

/// Errors from system registration.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("system '{name}' is already registered")]
    DuplicateName { name: String },

    #[error("system manager is finalized; systems cannot be added mid-game")]
    Finalized,
}

/// Errors from message dispatch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("dispatch exceeded {passes} passes; a handler chain keeps re-enqueueing messages")]
    ReactionOverflow { passes: u32 },
}

struct Entry {
    system: Box<dyn System>,
    enabled: bool,
}

/// Ordered collection of systems plus the entity message dispatch loop.
///
/// Systems begin enabled on registration and run in registration order.
/// `finalize` is a one-way flag (until `clear`) preventing registration
/// mid-game.
#[derive(Default)]
pub struct SystemManager {
    systems: Vec<Entry>,
    finalized: bool,
    profiler: SystemProfiler,
}

impl SystemManager {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            finalized: false,
            profiler: SystemProfiler::new(),
        }
    }

    /// Register a system. Fails once the manager is finalized or when the
    /// name is already taken.
    pub fn add(&mut self, system: Box<dyn System>) -> Result<(), SystemError> {
        if self.finalized {
            return Err(SystemError::Finalized);
        }
        if self.systems.iter().any(|e| e.system.name() == system.name()) {
            return Err(SystemError::DuplicateName {
                name: system.name().to_string(),
            });
        }
        tracing::debug!(system = system.name(), "system registered");
        self.systems.push(Entry {
            system,
            enabled: true,
        });
        Ok(())
    }

    /// Close registration; called once game setup completes.
    pub fn finalize(&mut self) {
        self.finalized = true;
        tracing::debug!(count = self.systems.len(), "system manager finalized");
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Drop all systems and reopen registration (end-game path).
    pub fn clear(&mut self) {
        self.systems.clear();
        self.finalized = false;
    }

    /// Run every enabled system in registration order.
    pub fn run(&mut self, world: &mut World, queue: &mut MessageQueue, tick: u64) {
        for entry in &mut self.systems {
            if !entry.enabled {
                continue;
            }
            let name = entry.system.name().to_string();
            self.profiler
                .time_system(&name, || entry.system.run(world, queue, tick));
        }
    }

    /// Enable a system by name; `false` if no such system.
    pub fn enable_system(&mut self, name: &str) -> bool {
        self.set_enabled(name, true)
    }

    /// Disable a system by name; `false` if no such system.
    pub fn disable_system(&mut self, name: &str) -> bool {
        self.set_enabled(name, false)
    }

    fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.systems.iter_mut().find(|e| e.system.name() == name) {
            Some(entry) => {
                entry.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Per-system timing collected by [`SystemManager::run`].
    pub fn profiler(&self) -> &SystemProfiler {
        &self.profiler
    }

    /// Deliver entity-addressed messages to dispatcher components.
    ///
    /// Each pass drains the due `"entities"` messages and walks dispatcher
    /// owners in ascending entity-id order, delivering every message whose
    /// `to` matches the entity's name. Handlers return reply messages which
    /// are enqueued immediately, so the next pass picks them up — chained
    /// reactions resolve within the same tick. Messages addressed to names
    /// with no live dispatcher are dropped at the end of their pass.
    ///
    /// Termination is the handlers' responsibility; a chain that keeps
    /// re-enqueueing trips the pass ceiling and returns
    /// [`DispatchError::ReactionOverflow`] instead of hanging the tick.
    pub fn dispatch(
        &mut self,
        world: &mut World,
        queue: &mut MessageQueue,
        tick: u64,
    ) -> Result<(), DispatchError> {
        for _pass in 0..MAX_DISPATCH_PASSES {
            let mut pending = queue.get_messages(target::ENTITIES, tick);
            if pending.is_empty() {
                return Ok(());
            }

            // Snapshot the dispatcher handles; handlers may mutate the
            // world (spawn, delete, attach components) while we iterate.
            let dispatchers: Vec<_> = world
                .get_components::<Dispatcher>()
                .into_iter()
                .map(|(id, dispatcher)| (id, dispatcher.clone()))
                .collect();

            for (id, dispatcher) in dispatchers {
                // An earlier handler this pass may have deleted the entity.
                let Ok(name) = world.get_name(id).map(str::to_string) else {
                    continue;
                };
                pending.retain(|msg| {
                    if msg.to() != name {
                        return true;
                    }
                    for reply in dispatcher.handle(world, id, msg, tick) {
                        queue.add_message(reply);
                    }
                    false
                });
                if pending.is_empty() {
                    break;
                }
            }

            if !pending.is_empty() {
                tracing::trace!(
                    dropped = pending.len(),
                    "entity messages had no live recipient"
                );
            }
        }
        Err(DispatchError::ReactionOverflow {
            passes: MAX_DISPATCH_PASSES,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::Message;
    use std::sync::{Arc, Mutex};

    /// Records its runs into a shared log.
    struct Probe {
        name: String,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Probe {
        fn boxed(name: &str, log: &Arc<Mutex<Vec<String>>>) -> Box<dyn System> {
            Box::new(Self {
                name: name.to_string(),
                log: Arc::clone(log),
            })
        }
    }

    impl System for Probe {
        fn name(&self) -> &str {
            &self.name
        }

        fn run(&mut self, _world: &mut World, _queue: &mut MessageQueue, _tick: u64) {
            self.log.lock().unwrap().push(self.name.clone());
        }
    }

    #[test]
    fn add_after_finalize_fails() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = SystemManager::new();
        manager.add(Probe::boxed("a", &log)).unwrap();
        manager.finalize();

        let err = manager.add(Probe::boxed("b", &log)).unwrap_err();
        assert!(matches!(err, SystemError::Finalized));
    }

    #[test]
    fn duplicate_system_name_fails() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = SystemManager::new();
        manager.add(Probe::boxed("movement", &log)).unwrap();

        let err = manager.add(Probe::boxed("movement", &log)).unwrap_err();
        assert!(matches!(err, SystemError::DuplicateName { .. }));
    }

    #[test]
    fn run_honors_registration_order_and_enable_state() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = SystemManager::new();
        manager.add(Probe::boxed("first", &log)).unwrap();
        manager.add(Probe::boxed("second", &log)).unwrap();
        manager.add(Probe::boxed("third", &log)).unwrap();
        manager.finalize();

        assert!(manager.disable_system("second"));
        assert!(!manager.disable_system("nonexistent"));

        let mut world = World::new();
        let mut queue = MessageQueue::new();
        manager.run(&mut world, &mut queue, 0);
        assert_eq!(*log.lock().unwrap(), ["first", "third"]);

        assert!(manager.enable_system("second"));
        log.lock().unwrap().clear();
        manager.run(&mut world, &mut queue, 1);
        assert_eq!(*log.lock().unwrap(), ["first", "second", "third"]);
    }

    #[test]
    fn clear_reopens_registration() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = SystemManager::new();
        manager.add(Probe::boxed("a", &log)).unwrap();
        manager.finalize();
        manager.clear();

        assert!(!manager.is_finalized());
        assert!(manager.add(Probe::boxed("a", &log)).is_ok());
    }

    #[test]
    fn dispatch_without_replies_is_a_single_pass() {
        let mut world = World::new();
        let mut queue = MessageQueue::new();
        let hits = Arc::new(Mutex::new(0u32));

        let e = world.new_entity(Some("target_1")).unwrap();
        let hits_inner = Arc::clone(&hits);
        world
            .add_component(
                e,
                Dispatcher::new(move |_, _, _, _| {
                    *hits_inner.lock().unwrap() += 1;
                    Vec::new()
                }),
            )
            .unwrap();

        queue.add_message(Message::to_entity("target_1", "", "ping", ""));
        queue.add_message(Message::to_entity("target_1", "", "ping", ""));

        let mut manager = SystemManager::new();
        manager.dispatch(&mut world, &mut queue, 0).unwrap();

        assert_eq!(*hits.lock().unwrap(), 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn dispatch_resolves_reply_chains_within_one_call() {
        let mut world = World::new();
        let mut queue = MessageQueue::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        // a replies to b; b records the delivery.
        let a = world.new_entity(Some("a")).unwrap();
        world
            .add_component(
                a,
                Dispatcher::new(move |_, _, _, _| vec![Message::to_entity("b", "a", "reply", "")]),
            )
            .unwrap();

        let b = world.new_entity(Some("b")).unwrap();
        let log_inner = Arc::clone(&log);
        world
            .add_component(
                b,
                Dispatcher::new(move |_, _, msg, _| {
                    log_inner.lock().unwrap().push(msg.cmd().to_string());
                    Vec::new()
                }),
            )
            .unwrap();

        queue.add_message(Message::to_entity("a", "", "poke", ""));

        let mut manager = SystemManager::new();
        manager.dispatch(&mut world, &mut queue, 0).unwrap();

        assert_eq!(*log.lock().unwrap(), ["reply"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn runaway_reaction_chain_reports_overflow() {
        let mut world = World::new();
        let mut queue = MessageQueue::new();

        let e = world.new_entity(Some("echo")).unwrap();
        world
            .add_component(
                e,
                Dispatcher::new(|_, _, _, _| vec![Message::to_entity("echo", "echo", "again", "")]),
            )
            .unwrap();

        queue.add_message(Message::to_entity("echo", "", "start", ""));

        let mut manager = SystemManager::new();
        let err = manager.dispatch(&mut world, &mut queue, 0).unwrap_err();
        assert!(matches!(err, DispatchError::ReactionOverflow { .. }));
    }

    #[test]
    fn unaddressed_entity_messages_are_dropped() {
        let mut world = World::new();
        let mut queue = MessageQueue::new();
        queue.add_message(Message::to_entity("ghost", "", "boo", ""));

        let mut manager = SystemManager::new();
        manager.dispatch(&mut world, &mut queue, 0).unwrap();
        assert!(queue.is_empty());
    }
}
