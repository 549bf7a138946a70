//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world deterministically.

use super::autopilot;
use super::barrel::{spawn_barrel, update_barrel};
use super::encounter::{
    advance_hammer, advance_pickup_respawn, collect_pickup, reached_goal, resolve_barrel_contacts,
};
use super::player::{PlayerStep, update_player};
use super::state::{GameEvent, GamePhase, World};
use crate::platform::input::{Action, InputSource};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Movement keys, held
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Jump pressed this step (edge, not held)
    pub jump: bool,
    /// Start a new run (only honoured after game over)
    pub restart: bool,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    /// Sample an input source: held keys for movement, presses for the rest
    pub fn from_source<S: InputSource + ?Sized>(source: &S) -> Self {
        Self {
            left: source.is_held(Action::MoveLeft),
            right: source.is_held(Action::MoveRight),
            up: source.is_held(Action::MoveUp),
            down: source.is_held(Action::MoveDown),
            jump: source.was_pressed(Action::Jump),
            restart: source.was_pressed(Action::Restart) || source.was_pressed(Action::Confirm),
            idle_mode: false,
        }
    }
}

/// Advance the world by one fixed timestep and report what happened
pub fn tick(world: &mut World, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if world.phase == GamePhase::GameOver {
        if input.restart {
            world.restart();
            log::info!("New run started (seed {})", world.seed);
            events.push(GameEvent::Restarted);
        }
        return events;
    }

    // Demo mode overrides the player's keys
    let input = if input.idle_mode {
        autopilot::steer(world)
    } else {
        input.clone()
    };

    world.time_ticks += 1;

    // Survival points
    let seconds = world.score_clock.tick_repeating(dt, 1.0);
    world.score += u64::from(seconds) * world.tuning.points_per_second;

    // Barrel spawning
    if world.spawn_timer.tick(dt) {
        let id = world.next_entity_id();
        let barrel = spawn_barrel(id, &world.layout, &world.tuning);
        log::debug!("Barrel {} spawned at x={}", id, barrel.pos.x);
        world.barrels.push(barrel);
        events.push(GameEvent::BarrelSpawned { id });
        let interval = world.tuning.next_spawn_interval(&mut world.rng, world.level);
        world.spawn_timer.reset(interval);
    }

    if let Some(pickup) = world.pickup.as_mut() {
        advance_pickup_respawn(pickup, dt, &mut events);
    }
    advance_hammer(&mut world.player, dt, &mut events);

    // Motion
    let step = update_player(&mut world.player, &world.layout, &input, &world.tuning, dt);
    if step == PlayerStep::FellOutOfWorld {
        events.push(GameEvent::PlayerFell {
            lives: world.player.lives,
        });
    }

    for barrel in world.barrels.iter_mut() {
        update_barrel(
            barrel,
            &world.layout,
            &world.tuning,
            world.level,
            &mut world.rng,
            dt,
            &mut events,
        );
    }

    // Encounters
    if let Some(pickup) = world.pickup.as_mut() {
        collect_pickup(&mut world.player, pickup, &world.tuning, &mut events);
    }
    resolve_barrel_contacts(world, &mut events);
    world.barrels.retain(|b| b.alive);

    if world.player.lives == 0 {
        world.phase = GamePhase::GameOver;
        log::info!(
            "Game over on level {} with {} points",
            world.level,
            world.score
        );
        events.push(GameEvent::GameOver {
            score: world.score,
            level: world.level,
        });
        return events;
    }

    if reached_goal(&world.player, &world.layout) {
        world.score += world.tuning.level_bonus;
        let next = world.level + 1;
        world.load_level(next);
        events.push(GameEvent::LevelCleared { level: next });
    }

    events
}
