//! Timed message queue.
//!
//! Messages are held ascending by scheduled tick with immediates first.
//! `Option<u64>` already orders `None` before every `Some`, so the timer is
//! the ordering key directly. Equal keys keep insertion order: new messages
//! are inserted after the run of equal timers, which is what makes
//! same-tick delivery stable.

use crate::msg::Message;

/// Ordered multiset of pending messages.
#[derive(Default)]
pub struct MessageQueue {
    pending: Vec<Message>,
}

impl MessageQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a message, maintaining timer order.
    pub fn add_message(&mut self, msg: Message) {
        let at = self
            .pending
            .partition_point(|queued| queued.timer() <= msg.timer());
        self.pending.insert(at, msg);
    }

    /// Remove and return every due message addressed to `target`.
    ///
    /// Only the due prefix is scanned — the queue is timer-ordered, so the
    /// first future message ends the scan. Returned messages preserve
    /// tick-then-insertion order. Calling again with no intervening adds
    /// returns empty.
    pub fn get_messages(&mut self, target: &str, now: u64) -> Vec<Message> {
        let due = self.pending.partition_point(|msg| msg.is_due(now));
        if due == 0 {
            return Vec::new();
        }

        let mut claimed = Vec::new();
        let mut kept = Vec::with_capacity(self.pending.len());
        for (index, msg) in self.pending.drain(..).enumerate() {
            if index < due && msg.system() == target {
                claimed.push(msg);
            } else {
                kept.push(msg);
            }
        }
        self.pending = kept;
        claimed
    }

    /// Drop timed messages whose tick is strictly in the past and were
    /// never claimed. Runs once per tick, after dispatch. Immediate
    /// messages are never pruned; if nothing consumes their target they
    /// stay pending by design.
    ///
    /// Returns the number of messages dropped.
    pub fn prune(&mut self, now: u64) -> usize {
        let before = self.pending.len();
        self.pending.retain(|msg| match msg.timer() {
            Some(tick) => tick >= now,
            None => true,
        });
        let dropped = before - self.pending.len();
        if dropped > 0 {
            tracing::trace!(dropped, tick = now, "pruned stale timed messages");
        }
        dropped
    }

    /// Drop all pending messages (new-game / end-game path).
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Bulk-load pre-built messages, e.g. a timed script. Ticks may lie in
    /// the past; those deliver on the next pass like immediates.
    pub fn load<I>(&mut self, messages: I)
    where
        I: IntoIterator<Item = Message>,
    {
        for msg in messages {
            self.add_message(msg);
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::target;

    #[test]
    fn immediates_sort_before_scheduled() {
        let mut queue = MessageQueue::new();
        queue.add_message(Message::scheduled(5, target::SYSTEM, "later", ""));
        queue.add_message(Message::to_system(target::SYSTEM, "now", ""));

        let got = queue.get_messages(target::SYSTEM, 5);
        let cmds: Vec<&str> = got.iter().map(Message::cmd).collect();
        assert_eq!(cmds, ["now", "later"]);
    }

    #[test]
    fn get_messages_filters_target_and_due() {
        let mut queue = MessageQueue::new();
        queue.add_message(Message::to_system(target::SPAWNER, "new", "asteroid;1;2"));
        queue.add_message(Message::to_system(target::SYSTEM, "exit", ""));
        queue.add_message(Message::scheduled(100, target::SPAWNER, "new", "asteroid;3;4"));

        let got = queue.get_messages(target::SPAWNER, 0);
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].args()[0], "asteroid");

        // The future spawner message and the system message stay queued.
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn get_messages_is_idempotent() {
        let mut queue = MessageQueue::new();
        queue.add_message(Message::to_system(target::SYSTEM, "exit", ""));

        assert_eq!(queue.get_messages(target::SYSTEM, 0).len(), 1);
        assert!(queue.get_messages(target::SYSTEM, 0).is_empty());
    }

    #[test]
    fn same_tick_messages_keep_insertion_order() {
        let mut queue = MessageQueue::new();
        queue.add_message(Message::scheduled(7, target::SYSTEM, "first", ""));
        queue.add_message(Message::scheduled(7, target::SYSTEM, "second", ""));
        queue.add_message(Message::scheduled(7, target::SYSTEM, "third", ""));

        let got = queue.get_messages(target::SYSTEM, 7);
        let cmds: Vec<&str> = got.iter().map(Message::cmd).collect();
        assert_eq!(cmds, ["first", "second", "third"]);
    }

    #[test]
    fn future_messages_are_not_delivered_early() {
        let mut queue = MessageQueue::new();
        queue.add_message(Message::scheduled(10, target::SYSTEM, "later", ""));

        assert!(queue.get_messages(target::SYSTEM, 9).is_empty());
        assert_eq!(queue.get_messages(target::SYSTEM, 10).len(), 1);
    }

    #[test]
    fn prune_drops_only_stale_timed_messages() {
        let mut queue = MessageQueue::new();
        queue.add_message(Message::scheduled(3, "nobody", "stale", ""));
        queue.add_message(Message::scheduled(8, target::SYSTEM, "future", ""));
        queue.add_message(Message::to_system("nobody", "immediate", ""));

        let dropped = queue.prune(5);
        assert_eq!(dropped, 1);
        assert_eq!(queue.len(), 2);

        // Messages due exactly now survive pruning.
        assert_eq!(queue.prune(8), 0);
    }

    #[test]
    fn load_accepts_past_ticks_as_due() {
        let mut queue = MessageQueue::new();
        queue.load(vec![
            Message::scheduled(2, target::SYSTEM, "b", ""),
            Message::scheduled(1, target::SYSTEM, "a", ""),
        ]);

        let got = queue.get_messages(target::SYSTEM, 50);
        let cmds: Vec<&str> = got.iter().map(Message::cmd).collect();
        assert_eq!(cmds, ["a", "b"]);
    }

    #[test]
    fn round_trip_preserves_message_fields() {
        let mut queue = MessageQueue::new();
        let original = Message::scheduled_to_entity(4, "player_1", "boss_1", "hit", "12;fire");
        queue.load(vec![original.clone()]);

        let got = queue.get_messages(target::ENTITIES, 4);
        assert_eq!(got, vec![original]);
    }

    #[test]
    fn clear_empties_the_queue() {
        let mut queue = MessageQueue::new();
        queue.add_message(Message::to_system(target::SYSTEM, "exit", ""));
        queue.clear();
        assert!(queue.is_empty());
    }
}
