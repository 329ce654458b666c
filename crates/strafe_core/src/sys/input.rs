//! Input routing system.
//!
//! The input pump (an engine-loop collaborator) drops raw press/release
//! messages onto the `"input"` target with the button name as the command.
//! This system re-addresses each event to every entity whose
//! [`InputBinding`] lists that button; delivery then happens through the
//! normal entity dispatch path.

use crate::ecs::{InputBinding, World};
use crate::msg::{join_args, target, Message, MessageQueue};
use crate::sys::System;

pub struct InputRouter;

impl System for InputRouter {
    fn name(&self) -> &str {
        "input"
    }

    fn run(&mut self, world: &mut World, queue: &mut MessageQueue, tick: u64) {
        let events = queue.get_messages(target::INPUT, tick);
        if events.is_empty() {
            return;
        }

        let bindings: Vec<(String, InputBinding)> = world
            .get_components::<InputBinding>()
            .into_iter()
            .filter_map(|(id, binding)| {
                world
                    .get_name(id)
                    .ok()
                    .map(|name| (name.to_string(), binding.clone()))
            })
            .collect();

        for event in &events {
            for (entity, binding) in &bindings {
                if binding.matches(event.cmd()) {
                    queue.add_message(Message::to_entity(
                        entity,
                        target::INPUT,
                        event.cmd(),
                        &join_args(event.args()),
                    ));
                }
            }
        }
    }
}
