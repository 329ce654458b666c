//! The engine loop: fixed-tick scheduling over the context managers.
//!
//! Each tick runs to completion in a fixed order: input pump, engine
//! commands, spawner, systems, entity dispatch, queue prune, render
//! handoff. There is no preemption within a tick; a hung handler blocks
//! the tick and is a programming error.

mod context;
mod game;
mod vars;

pub use context::{Context, EngineFlags};
pub use game::Game;
pub use vars::{VarError, VarMap};

use std::io;
use std::path::Path;

use strafe_metrics::{Counter, TickTimer};

use crate::msg::{target, CommandTable, Message, MessageTrace};
use crate::sys::DispatchError;
use crate::time::GameClock;

/// Ticks between engine stats log lines (10 s at the default rate).
const STATS_INTERVAL: u64 = 600;

/// Ties the context, the game hooks, and the clock together.
pub struct Engine<G: Game> {
    game: G,
    ctx: Context,
    commands: CommandTable<Context>,
    clock: GameClock,
    trace: Option<MessageTrace>,
    timer: TickTimer,
    counters: Counter,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G) -> Self {
        Self::with_clock(game, GameClock::new())
    }

    pub fn with_tick_rate(game: G, hz: u32) -> Self {
        Self::with_clock(game, GameClock::with_tick_rate(hz))
    }

    fn with_clock(game: G, clock: GameClock) -> Self {
        let budget = clock.tick_duration();
        let mut engine = Self {
            game,
            ctx: Context::new(),
            commands: CommandTable::new(),
            clock,
            trace: None,
            timer: TickTimer::new(120, budget),
            counters: Counter::new(),
        };
        engine.register_builtin_commands();
        engine
    }

    /// The engine's own command set, reacting to `"system"`-targeted
    /// messages. Games extend the same target with their own table.
    fn register_builtin_commands(&mut self) {
        let cmds = &mut self.commands;
        // The table is empty here; no name can collide.
        cmds.add("new_game", 0, |ctx, _| ctx.flags.new_game_requested = true);
        cmds.add("end_game", 0, |ctx, _| ctx.flags.end_game_requested = true);
        cmds.add("exit", 0, |ctx, _| ctx.flags.exit_requested = true);
        cmds.add("enable_system", 1, |ctx, args| {
            if !ctx.systems.enable_system(&args[0]) {
                tracing::warn!(system = %args[0], "enable_system: no such system");
            }
        });
        cmds.add("disable_system", 1, |ctx, args| {
            if !ctx.systems.disable_system(&args[0]) {
                tracing::warn!(system = %args[0], "disable_system: no such system");
            }
        });
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    /// Current logical tick.
    pub fn tick(&self) -> u64 {
        self.clock.tick()
    }

    /// Tap message traffic seen by the engine loop into `path`.
    ///
    /// Input, `"system"`, and `"spawner"` messages are recorded as the
    /// loop handles them; entity dispatch traffic drains inside the system
    /// manager and is not tapped.
    pub fn enable_message_trace(&mut self, path: impl AsRef<Path>) -> io::Result<()> {
        self.trace = Some(MessageTrace::create(path)?);
        Ok(())
    }

    /// Start a fresh game session: clear everything, run the game's setup
    /// hook, and close system registration.
    pub fn new_game(&mut self) {
        tracing::info!("starting new game");
        self.ctx.world.clear();
        self.ctx.queue.clear();
        self.ctx.systems.clear();
        self.game.setup(&mut self.ctx);
        self.ctx.systems.finalize();
        self.ctx.flags.game_started = true;
    }

    /// End the current session and clear the context.
    pub fn end_game(&mut self) {
        tracing::info!("ending game");
        self.game.cleanup(&mut self.ctx);
        self.ctx.world.clear();
        self.ctx.queue.clear();
        self.ctx.systems.clear();
        self.ctx.flags.game_started = false;
    }

    /// Advance exactly one logical tick.
    pub fn step(&mut self) -> Result<(), DispatchError> {
        let tick = self.clock.tick();
        self.timer.begin();

        // 1. Input pump.
        let input = self.game.poll_input(tick);
        self.counters.increment("input_messages", input.len());
        for msg in input {
            self.record(tick, &msg);
            self.ctx.queue.add_message(msg);
        }

        // 2. Engine commands, then any requested session transition.
        let system_msgs = self.ctx.queue.get_messages(target::SYSTEM, tick);
        for msg in &system_msgs {
            self.record(tick, msg);
        }
        self.commands.process_messages(&mut self.ctx, &system_msgs);
        self.apply_transitions();

        if self.ctx.flags.game_started {
            // 3. Spawner.
            let spawn_msgs = self.ctx.queue.get_messages(target::SPAWNER, tick);
            for msg in &spawn_msgs {
                self.record(tick, msg);
            }
            self.ctx
                .spawner
                .process_messages(&mut self.ctx.world, &spawn_msgs);

            // 4. Systems.
            self.ctx
                .systems
                .run(&mut self.ctx.world, &mut self.ctx.queue, tick);

            // 5. Entity dispatch.
            self.ctx
                .systems
                .dispatch(&mut self.ctx.world, &mut self.ctx.queue, tick)?;
        }

        // 6. Prune unclaimed timed messages.
        let pruned = self.ctx.queue.prune(tick);
        self.counters.increment("pruned_messages", pruned);

        // 7. Render handoff.
        self.game.render(&self.ctx.world);

        self.timer.end();
        self.clock.advance();
        if self.clock.tick() % STATS_INTERVAL == 0 {
            self.log_stats();
        }
        Ok(())
    }

    /// Drive the clock until exit. Catch-up ticks run back to back after a
    /// stall; otherwise the loop sleeps out the remainder of the tick.
    pub fn run(&mut self) -> Result<(), DispatchError> {
        self.ctx.flags.running = true;
        self.new_game();

        while self.ctx.flags.running {
            let due = self.clock.due_ticks();
            if due == 0 {
                std::thread::sleep(self.clock.until_next_tick());
                continue;
            }
            for _ in 0..due {
                self.step()?;
                if !self.ctx.flags.running {
                    break;
                }
            }
        }

        if self.ctx.flags.game_started {
            self.end_game();
        }
        Ok(())
    }

    fn apply_transitions(&mut self) {
        if std::mem::take(&mut self.ctx.flags.new_game_requested) {
            if self.ctx.flags.game_started {
                self.end_game();
            }
            self.new_game();
        }
        if std::mem::take(&mut self.ctx.flags.end_game_requested) && self.ctx.flags.game_started {
            self.end_game();
        }
        if self.ctx.flags.exit_requested {
            self.ctx.flags.running = false;
        }
    }

    fn record(&self, tick: u64, msg: &Message) {
        if let Some(trace) = &self.trace {
            trace.record(tick, msg);
        }
    }

    fn log_stats(&self) {
        tracing::debug!(
            tick = self.clock.tick(),
            tps = self.timer.tps(),
            tick_ms = self.timer.tick_time_ms(),
            entities = self.ctx.world.entity_count(),
            queued = self.ctx.queue.len(),
            input = self.counters.get("input_messages"),
            pruned = self.counters.get("pruned_messages"),
            "engine stats"
        );
    }
}
