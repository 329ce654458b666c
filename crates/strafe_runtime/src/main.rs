//! Strafe Engine Runtime
//!
//! Demo binary: a tiny arcade game (one ship, scripted asteroid waves)
//! wired to the engine and driven headless. `render` logs instead of
//! drawing, which keeps the binary runnable anywhere; a real game swaps
//! the hooks for a display backend.

use std::path::Path;

use anyhow::{Context as _, Result};
use glam::Vec2;

use strafe_core::ecs::{
    BoundingBox, Dispatcher, Enabled, Hitbox, InputBinding, Location, Motion, Sprite, Team,
    Visible, World,
};
use strafe_core::engine::{Context, Engine, Game, VarMap};
use strafe_core::msg::{target, Message};
use strafe_core::sys::{Animate, Collision, InputRouter, Logic, Movement, System, COLLISION_CMD};
use strafe_services::input::{diff_messages, InputState};
use strafe_services::script;
use strafe_services::settings::Settings;

const ARENA: Vec2 = Vec2::new(1280.0, 720.0);
const PLAYER_SPEED: f32 = 4.0;

struct DemoGame {
    script: Option<Vec<Message>>,
    held: InputState,
}

impl DemoGame {
    fn new(script: Option<Vec<Message>>) -> Self {
        Self {
            script,
            held: InputState::new(),
        }
    }

    fn spawn_player(ctx: &mut Context) {
        let world = &mut ctx.world;
        let id = match world.new_entity(Some("player_1")) {
            Ok(id) => id,
            Err(err) => {
                tracing::error!(%err, "could not create player");
                return;
            }
        };
        let built = world
            .add_component(id, Location::new(ARENA.x / 2.0, ARENA.y / 2.0))
            .and_then(|_| world.add_component(id, Motion::default()))
            .and_then(|_| {
                world.add_component(
                    id,
                    BoundingBox {
                        min: Vec2::ZERO,
                        max: ARENA,
                    },
                )
            })
            .and_then(|_| world.add_component(id, Hitbox::new(24.0, 24.0)))
            .and_then(|_| world.add_component(id, Team(0)))
            .and_then(|_| world.add_component(id, Sprite::new("ship", 2, 8)))
            .and_then(|_| world.add_component(id, Enabled(true)))
            .and_then(|_| world.add_component(id, Visible(true)))
            .and_then(|_| {
                world.add_component(id, InputBinding::new(["left", "right", "up", "down"]))
            })
            .and_then(|_| world.add_component(id, Dispatcher::new(Self::player_handler)));
        if let Err(err) = built {
            tracing::error!(%err, "player setup incomplete");
        }
    }

    fn player_handler(world: &mut World, id: strafe_core::ecs::EntityId, msg: &Message, _tick: u64) -> Vec<Message> {
        match msg.cmd() {
            "left" | "right" | "up" | "down" => {
                let pressed = msg.arg(0) == Some("down");
                if let Ok(motion) = world.set_component::<Motion>(id) {
                    let speed = if pressed { PLAYER_SPEED } else { 0.0 };
                    motion.velocity = match msg.cmd() {
                        "left" => Vec2::new(-speed, 0.0),
                        "right" => Vec2::new(speed, 0.0),
                        "up" => Vec2::new(0.0, -speed),
                        _ => Vec2::new(0.0, speed),
                    };
                }
                Vec::new()
            }
            cmd if cmd == COLLISION_CMD => {
                tracing::info!(hit_by = msg.from(), "player destroyed");
                vec![Message::to_system(target::SYSTEM, "exit", "")]
            }
            _ => Vec::new(),
        }
    }

    fn default_script() -> Vec<Message> {
        vec![
            // Asteroid waves falling toward the ship's row.
            Message::scheduled(30, target::SPAWNER, "new", "asteroid;640;200"),
            Message::scheduled(60, target::SPAWNER, "new", "asteroid;400;100"),
            Message::scheduled(90, target::SPAWNER, "new", "asteroid;900;150"),
            // Stop the demo even if everything misses.
            Message::scheduled(300, target::SYSTEM, "exit", ""),
        ]
    }
}

impl Game for DemoGame {
    fn setup(&mut self, ctx: &mut Context) {
        for system in [
            Box::new(InputRouter) as Box<dyn System>,
            Box::new(Movement),
            Box::new(Collision),
            Box::new(Logic),
            Box::new(Animate),
        ] {
            let name = system.name().to_string();
            if let Err(err) = ctx.systems.add(system) {
                tracing::error!(%err, system = %name, "system registration failed");
            }
        }

        if !ctx.spawner.add("asteroid", 2, |world, id, args| {
            let x: f32 = args[0].parse().unwrap_or(0.0);
            let y: f32 = args[1].parse().unwrap_or(0.0);
            world.add_component(id, Location::new(x, y))?;
            world.add_component(id, Motion::new(0.0, 2.0))?;
            world.add_component(id, Hitbox::new(20.0, 20.0))?;
            world.add_component(id, Team(1))?;
            world.add_component(id, Sprite::new("asteroid", 4, 8))?;
            world.add_component(id, Visible(true))?;
            world.add_component(
                id,
                Dispatcher::new(|world, id, msg, _| {
                    if msg.cmd() != COLLISION_CMD {
                        return Vec::new();
                    }
                    // Asteroids shatter on any contact.
                    match world.get_name(id) {
                        Ok(name) => vec![Message::to_system(target::SPAWNER, "delete", name)],
                        Err(_) => Vec::new(),
                    }
                }),
            )
        }) {
            tracing::error!("spawn 'asteroid' already registered");
        }

        Self::spawn_player(ctx);

        let script = self
            .script
            .clone()
            .unwrap_or_else(Self::default_script);
        ctx.queue.load(script);
    }

    fn poll_input(&mut self, tick: u64) -> Vec<Message> {
        // Scripted pilot standing in for the real input backend.
        let mut next = self.held.clone();
        match tick {
            20 => next.press("right"),
            80 => next.release("right"),
            100 => next.press("up"),
            140 => next.release("up"),
            _ => {}
        }
        let messages = diff_messages(&self.held, &next);
        self.held = next;
        messages
    }

    fn render(&mut self, world: &World) {
        // Headless render handoff: report instead of drawing.
        if let Ok(id) = world.get_id("player_1") {
            if let Ok(location) = world.get_component::<Location>(id) {
                tracing::trace!(
                    entities = world.entity_count(),
                    player = %location.pos,
                    "frame"
                );
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("Strafe Engine v{}", strafe_core::VERSION);

    let mut vars = VarMap::new();
    let cfg = Path::new("strafe.cfg");
    if cfg.exists() {
        vars.load_file(cfg).context("loading strafe.cfg")?;
    }
    let settings = Settings::from_vars(&vars);

    let script = match std::env::args().nth(1) {
        Some(path) => {
            let messages =
                script::load_file(&path).with_context(|| format!("loading script {path}"))?;
            Some(messages)
        }
        None => None,
    };

    let mut engine = Engine::with_tick_rate(DemoGame::new(script), settings.tick_rate);
    engine.context_mut().vars = vars;
    if settings.message_trace {
        engine
            .enable_message_trace("messages.log")
            .context("opening message trace")?;
    }

    engine.run().context("engine loop failed")?;
    tracing::info!("clean shutdown");
    Ok(())
}
