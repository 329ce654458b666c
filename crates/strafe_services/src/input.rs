//! Input abstraction: snapshots diffed into messages.
//!
//! The raw backend (keyboard/joystick/touch polling) lives outside the
//! engine; whatever it is, it fills an [`InputState`] once per tick.
//! Diffing the previous snapshot against the current one yields
//! press/release messages targeted at the `"input"` system, where the
//! input router re-addresses them to bound entities.

use std::collections::BTreeSet;

use strafe_core::msg::{target, Message};

/// One frame of input: held buttons plus the movement axes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    buttons: BTreeSet<String>,
    pub move_x: f32,
    pub move_y: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: &str) {
        self.buttons.insert(button.to_string());
    }

    pub fn release(&mut self, button: &str) {
        self.buttons.remove(button);
    }

    pub fn is_down(&self, button: &str) -> bool {
        self.buttons.contains(button)
    }
}

/// Messages for every transition between two snapshots.
///
/// Buttons are compared as sets (deterministic order); a button held in
/// both snapshots emits nothing. Axis changes emit a message carrying the
/// new value.
pub fn diff_messages(prev: &InputState, next: &InputState) -> Vec<Message> {
    let mut messages = Vec::new();

    for button in next.buttons.difference(&prev.buttons) {
        messages.push(Message::to_system(target::INPUT, button, "down"));
    }
    for button in prev.buttons.difference(&next.buttons) {
        messages.push(Message::to_system(target::INPUT, button, "up"));
    }
    if next.move_x != prev.move_x {
        messages.push(Message::to_system(
            target::INPUT,
            "move_x",
            &next.move_x.to_string(),
        ));
    }
    if next.move_y != prev.move_y {
        messages.push(Message::to_system(
            target::INPUT,
            "move_y",
            &next.move_y.to_string(),
        ));
    }

    messages
}
