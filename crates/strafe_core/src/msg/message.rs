//! Message value type and the `;` argument encoding.

use serde::{Deserialize, Serialize};

/// Split a `;`-delimited argument string into an argument list.
///
/// An empty string yields a one-element list containing `""`, not an empty
/// list — downstream consumers rely on `args[0]` always existing. A literal
/// `;` cannot appear inside an argument; there is no escaping mechanism.
pub fn split_args(raw: &str) -> Vec<String> {
    raw.split(';').map(str::to_string).collect()
}

/// Join an argument list back into the `;`-delimited wire form.
pub fn join_args(args: &[String]) -> String {
    args.join(";")
}

/// A unit of cross-system or cross-entity communication.
///
/// Immutable once built. `timer` is the scheduled delivery tick; `None`
/// means immediate — due on the very next processing pass regardless of the
/// current tick. Queue ordering is defined solely by `timer` (with `None`
/// sorting first); two messages with equal timers keep their insertion
/// order, a property the queue provides, not the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    system: String,
    to: String,
    from: String,
    cmd: String,
    args: Vec<String>,
    timer: Option<u64>,
}

impl Message {
    /// Immediate message addressed to a named engine target
    /// (see [`crate::msg::target`]).
    pub fn to_system(system: &str, cmd: &str, args: &str) -> Self {
        Self {
            system: system.to_string(),
            to: String::new(),
            from: String::new(),
            cmd: cmd.to_string(),
            args: split_args(args),
            timer: None,
        }
    }

    /// Immediate message addressed to a named entity.
    pub fn to_entity(to: &str, from: &str, cmd: &str, args: &str) -> Self {
        Self {
            system: super::target::ENTITIES.to_string(),
            to: to.to_string(),
            from: from.to_string(),
            cmd: cmd.to_string(),
            args: split_args(args),
            timer: None,
        }
    }

    /// System-addressed message scheduled for a future tick.
    pub fn scheduled(timer: u64, system: &str, cmd: &str, args: &str) -> Self {
        Self {
            timer: Some(timer),
            ..Self::to_system(system, cmd, args)
        }
    }

    /// Entity-addressed message scheduled for a future tick.
    pub fn scheduled_to_entity(timer: u64, to: &str, from: &str, cmd: &str, args: &str) -> Self {
        Self {
            timer: Some(timer),
            ..Self::to_entity(to, from, cmd, args)
        }
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    pub fn timer(&self) -> Option<u64> {
        self.timer
    }

    pub fn is_timed(&self) -> bool {
        self.timer.is_some()
    }

    /// Whether this message is deliverable at `now`.
    pub fn is_due(&self, now: u64) -> bool {
        match self.timer {
            Some(tick) => tick <= now,
            None => true,
        }
    }
}

/// One record of a timed script, as stored in data files.
///
/// `args` is the `;`-joined single string field from the wire format; an
/// absent `timer` marks the event immediate. Sources that want immediate
/// playback of historic events may carry ticks in the past — the queue
/// treats those as due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEvent {
    #[serde(default)]
    pub timer: Option<u64>,
    pub system: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub from: String,
    pub cmd: String,
    #[serde(default)]
    pub args: String,
}

impl From<ScriptEvent> for Message {
    fn from(event: ScriptEvent) -> Self {
        Self {
            system: event.system,
            to: event.to,
            from: event.from,
            cmd: event.cmd,
            args: split_args(&event.args),
            timer: event.timer,
        }
    }
}
