//! Idle/demo mode AI
//!
//! Walks to the ladder leading up from the current platform, climbs it, hops
//! over barrels rolling toward it, grabs the hammer when it passes by and
//! jumps for the goal from the top row. Reads the world only, so demo runs are
//! as deterministic as player-driven ones.

use super::barrel::Barrel;
use super::geometry::horizontally_aligned;
use super::player::PlayerState;
use super::state::World;
use super::tick::TickInput;
use crate::consts::*;

/// Barrels closer than this (horizontally) and heading our way get jumped
const DANGER_RANGE: f32 = 70.0;
/// Close enough to a target x to stop walking
const ARRIVE_SLACK: f32 = 4.0;

/// Platform the player is standing on, or the nearest one below the feet
fn platform_below(world: &World) -> Option<usize> {
    let body = world.player.rect();
    let feet = world.player.feet();
    world
        .layout
        .platforms
        .iter()
        .enumerate()
        .filter(|(_, p)| {
            horizontally_aligned(&body, &p.rect, EDGE_INSET) && p.top() >= feet - LAND_ABOVE
        })
        .min_by(|(_, a), (_, b)| a.top().total_cmp(&b.top()))
        .map(|(i, _)| i)
}

fn barrel_incoming(world: &World, barrel: &Barrel, platform: usize) -> bool {
    if !barrel.is_rolling() || barrel.platform() != platform {
        return false;
    }
    let dx = barrel.center().x - world.player.rect().center_x();
    let approaching = barrel.vel.x * dx < 0.0;
    approaching && dx.abs() < DANGER_RANGE
}

/// Pick this step's input for the demo player
pub fn steer(world: &World) -> TickInput {
    let mut input = TickInput::default();
    let player = &world.player;
    let centre = player.rect().center_x();

    if let PlayerState::Climb { .. } = player.state {
        input.up = true;
        return input;
    }

    let Some(platform) = platform_below(world) else {
        return input;
    };

    let hammer_here = world
        .pickup
        .as_ref()
        .filter(|p| p.available && !player.hammer_active() && platform == PICKUP_PLATFORM)
        .map(|p| p.rect.center_x());
    let ladder_up = world
        .layout
        .ladders
        .iter()
        .find(|l| l.lower == platform)
        .map(|l| l.rect.center_x());
    let on_top = platform == world.layout.top_platform();

    let target = match (hammer_here, ladder_up) {
        (Some(x), _) => x,
        _ if on_top => world.layout.goal.center_x(),
        (None, Some(x)) => x,
        (None, None) => centre,
    };

    let dx = target - centre;
    if dx > ARRIVE_SLACK {
        input.right = true;
    } else if dx < -ARRIVE_SLACK {
        input.left = true;
    } else if on_top {
        input.jump = true;
    } else if hammer_here.is_none() {
        input.up = true;
    }

    if player.state == PlayerState::Ground
        && !player.hammer_active()
        && world
            .barrels
            .iter()
            .any(|b| barrel_incoming(world, b, platform))
    {
        input.jump = true;
    }

    input
}
