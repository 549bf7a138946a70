//! Encounters between the player and everything else
//!
//! Pickups, barrel contacts and the goal. Runs after all actors have moved.

use super::barrel::Barrel;
use super::geometry::{circle_rect_overlaps, overlaps};
use super::level::LevelLayout;
use super::player::Player;
use super::state::{BarrelLoss, GameEvent, Pickup, World};
use super::timer::Countdown;
use crate::consts::*;
use crate::tuning::{BarrelHitPolicy, Tuning};

/// Count the hammer down; it disappears on the step it runs out
pub fn advance_hammer(player: &mut Player, dt: f32, events: &mut Vec<GameEvent>) {
    let expired = player.hammer.as_mut().is_some_and(|h| h.tick(dt) || h.expired());
    if expired {
        player.hammer = None;
        log::debug!("Hammer expired");
        events.push(GameEvent::HammerExpired);
    }
}

/// Bring a taken pickup back once its respawn countdown finishes
pub fn advance_pickup_respawn(pickup: &mut Pickup, dt: f32, events: &mut Vec<GameEvent>) {
    if pickup.available {
        return;
    }
    if let Some(timer) = pickup.respawn.as_mut() {
        if timer.tick(dt) {
            pickup.available = true;
            pickup.respawn = None;
            events.push(GameEvent::PickupRespawned);
        }
    }
}

/// Hand the hammer to a player touching an available pickup
pub fn collect_pickup(
    player: &mut Player,
    pickup: &mut Pickup,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> bool {
    if !pickup.available || !overlaps(&player.rect(), &pickup.rect) {
        return false;
    }
    pickup.available = false;
    pickup.respawn = tuning.pickup_respawn_secs.map(Countdown::new);
    player.hammer = Some(Countdown::new(tuning.hammer_secs));
    log::debug!("Hammer collected ({}s)", tuning.hammer_secs);
    events.push(GameEvent::HammerCollected);
    true
}

/// Whether a barrel's circle touches the player's box
pub fn barrel_touches_player(barrel: &Barrel, player: &Player) -> bool {
    barrel.alive && circle_rect_overlaps(barrel.center(), barrel.radius(), &player.rect())
}

/// Resolve every barrel touching the player.
///
/// With the hammer each one is smashed for points. Without it the first
/// contact costs a life and the score penalty and sends the player back to the
/// start; later contacts in the same step are ignored.
pub fn resolve_barrel_contacts(world: &mut World, events: &mut Vec<GameEvent>) {
    let hammer = world.player.hammer_active();
    let mut hit_by = None;

    for barrel in world.barrels.iter_mut() {
        if !barrel_touches_player(barrel, &world.player) {
            continue;
        }
        if hammer {
            let points = world.tuning.smash_bonus;
            barrel.destroy(BarrelLoss::Smashed, events);
            world.score += points;
            log::debug!("Barrel {} smashed (+{})", barrel.id, points);
            events.push(GameEvent::BarrelSmashed {
                id: barrel.id,
                points,
            });
        } else if hit_by.is_none() {
            hit_by = Some(barrel.id);
            if world.tuning.barrel_hit_policy == BarrelHitPolicy::Destroy {
                barrel.destroy(BarrelLoss::HitPlayer, events);
            }
        }
    }

    if let Some(barrel) = hit_by {
        world.player.lives = world.player.lives.saturating_sub(1);
        world.apply_penalty(world.tuning.hit_penalty);
        world.player.respawn();
        log::info!(
            "Player hit by barrel {}, {} lives left",
            barrel,
            world.player.lives
        );
        events.push(GameEvent::PlayerHit {
            barrel,
            lives: world.player.lives,
        });
    }
}

/// Player has climbed up to the goal
pub fn reached_goal(player: &Player, layout: &LevelLayout) -> bool {
    let goal = &layout.goal;
    let centre_gap = (player.rect().center_x() - goal.center_x()).abs();
    player.feet() < goal.top() + WIN_CLEARANCE && centre_gap < SCREEN_W * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::barrel::{Barrel, Heading};
    use crate::sim::player::PlayerState;
    use glam::Vec2;

    fn world() -> World {
        World::new(7, Tuning::default())
    }

    /// A rolling barrel centred on the player's chest
    fn barrel_on_player(world: &mut World) -> u32 {
        let id = world.next_entity_id();
        let mut barrel = Barrel::rolling_on(id, &world.layout, 0, 0.0, Heading::Left, 18.0);
        barrel.pos = world.player.rect().center() - Vec2::splat(9.0);
        world.barrels.push(barrel);
        id
    }

    #[test]
    fn test_hammer_smash() {
        let mut world = world();
        world.player.pos = Vec2::new(300.0, 640.0);
        world.player.hammer = Some(Countdown::new(5.0));
        world.score = 40;
        let id = barrel_on_player(&mut world);
        let pos = world.player.pos;

        let mut events = Vec::new();
        resolve_barrel_contacts(&mut world, &mut events);

        assert!(!world.barrels[0].alive);
        assert_eq!(world.score, 140);
        assert_eq!(world.player.pos, pos);
        assert_eq!(world.player.lives, 3);
        assert_eq!(world.player.state, PlayerState::Ground);
        assert!(events.contains(&GameEvent::BarrelSmashed { id, points: 100 }));
    }

    #[test]
    fn test_harmful_hit() {
        let mut world = world();
        world.player.pos = Vec2::new(300.0, 500.0);
        world.player.vel = Vec2::new(160.0, -100.0);
        world.player.state = PlayerState::Jump;
        world.score = 120;
        let id = barrel_on_player(&mut world);

        let mut events = Vec::new();
        resolve_barrel_contacts(&mut world, &mut events);

        assert_eq!(world.player.lives, 2);
        assert_eq!(world.score, 70);
        assert_eq!(world.player.pos, Vec2::new(START_X, START_Y));
        assert_eq!(world.player.vel, Vec2::ZERO);
        assert!(!world.barrels[0].alive);
        assert!(events.contains(&GameEvent::PlayerHit { barrel: id, lives: 2 }));
    }

    #[test]
    fn test_penalty_floors_at_zero() {
        let mut world = world();
        world.player.pos = Vec2::new(300.0, 640.0);
        world.score = 20;
        barrel_on_player(&mut world);
        resolve_barrel_contacts(&mut world, &mut Vec::new());
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_one_harmful_hit_per_step() {
        let mut world = world();
        world.player.pos = Vec2::new(300.0, 640.0);
        barrel_on_player(&mut world);
        barrel_on_player(&mut world);
        let mut events = Vec::new();
        resolve_barrel_contacts(&mut world, &mut events);
        assert_eq!(world.player.lives, 2);
        assert!(!world.barrels[0].alive);
        assert!(world.barrels[1].alive);
    }

    #[test]
    fn test_survive_policy_keeps_barrel() {
        let mut world = World::new(
            7,
            Tuning {
                barrel_hit_policy: BarrelHitPolicy::Survive,
                ..Default::default()
            },
        );
        world.player.pos = Vec2::new(300.0, 640.0);
        barrel_on_player(&mut world);
        resolve_barrel_contacts(&mut world, &mut Vec::new());
        assert_eq!(world.player.lives, 2);
        assert!(world.barrels[0].alive);
    }

    #[test]
    fn test_no_contact_no_change() {
        let mut world = world();
        let id = world.next_entity_id();
        world
            .barrels
            .push(Barrel::rolling_on(id, &world.layout, 3, 400.0, Heading::Left, 18.0));
        let mut events = Vec::new();
        resolve_barrel_contacts(&mut world, &mut events);
        assert!(events.is_empty());
        assert_eq!(world.player.lives, 3);
    }

    #[test]
    fn test_pickup_grants_hammer_once() {
        let mut world = world();
        let tuning = Tuning::default();
        let mut pickup = world.pickup.clone().unwrap();
        world.player.pos = pickup.rect.center() - Player::size() * 0.5;
        let mut events = Vec::new();

        assert!(collect_pickup(&mut world.player, &mut pickup, &tuning, &mut events));
        assert!(!pickup.available);
        assert!(pickup.respawn.is_none());
        assert_eq!(world.player.hammer.map(|h| h.remaining()), Some(10.0));
        assert!(!collect_pickup(&mut world.player, &mut pickup, &tuning, &mut events));
        assert_eq!(events, vec![GameEvent::HammerCollected]);
    }

    #[test]
    fn test_pickup_respawns_when_configured() {
        let mut world = world();
        let tuning = Tuning {
            pickup_respawn_secs: Some(0.5),
            ..Default::default()
        };
        let mut pickup = world.pickup.clone().unwrap();
        world.player.pos = pickup.rect.center() - Player::size() * 0.5;
        let mut events = Vec::new();
        collect_pickup(&mut world.player, &mut pickup, &tuning, &mut events);

        for _ in 0..29 {
            advance_pickup_respawn(&mut pickup, SIM_DT, &mut events);
        }
        assert!(!pickup.available);
        for _ in 0..2 {
            advance_pickup_respawn(&mut pickup, SIM_DT, &mut events);
        }
        assert!(pickup.available);
        assert!(events.contains(&GameEvent::PickupRespawned));
    }

    #[test]
    fn test_zero_respawn_is_clamped_and_returns() {
        let mut world = world();
        let tuning = Tuning {
            pickup_respawn_secs: Some(0.0),
            ..Default::default()
        }
        .validated();
        let mut pickup = world.pickup.clone().unwrap();
        world.player.pos = pickup.rect.center() - Player::size() * 0.5;
        let mut events = Vec::new();
        collect_pickup(&mut world.player, &mut pickup, &tuning, &mut events);
        assert!(!pickup.available);

        advance_pickup_respawn(&mut pickup, SIM_DT, &mut events);
        assert!(pickup.available);
    }

    #[test]
    fn test_hammer_counts_down_and_expires() {
        let mut player = Player::new(3);
        player.hammer = Some(Countdown::new(0.09));
        let mut events = Vec::new();
        let mut last = 0.09;
        for _ in 0..5 {
            advance_hammer(&mut player, SIM_DT, &mut events);
            let remaining = player.hammer.map(|h| h.remaining()).unwrap();
            assert!(remaining < last);
            last = remaining;
        }
        advance_hammer(&mut player, SIM_DT, &mut events);
        assert!(!player.hammer_active());
        assert_eq!(events, vec![GameEvent::HammerExpired]);
    }

    #[test]
    fn test_goal_reached_only_above_threshold() {
        let layout = crate::sim::level::build_level(1);
        let mut player = Player::new(3);
        player.pos = Vec2::new(120.0, layout.goal.top() + WIN_CLEARANCE - PLAYER_H);
        assert!(!reached_goal(&player, &layout));
        player.pos.y -= 1.0;
        assert!(reached_goal(&player, &layout));
        player.pos.x = 500.0;
        assert!(reached_goal(&player, &layout));
        // More than half the screen away from the goal does not count
        player.pos.x = 760.0;
        assert!(!reached_goal(&player, &layout));
    }
}
