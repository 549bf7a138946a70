//! Player motion: run, jump, climb, fall

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, horizontally_aligned, overlaps};
use super::level::{LevelLayout, start_position};
use super::tick::TickInput;
use super::timer::Countdown;
use crate::consts::*;
use crate::tuning::Tuning;

/// Player movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Standing or running on a platform
    Ground,
    /// Rising after a jump
    Jump,
    /// On the ladder with the given index
    Climb { ladder: usize },
    /// Airborne and descending
    Fall,
}

/// Outcome of one motion step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStep {
    Moved,
    /// Dropped out of the level; a life was lost and the player respawned
    FellOutOfWorld,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub state: PlayerState,
    pub lives: u32,
    /// Hammer power-up, counting down while active
    pub hammer: Option<Countdown>,
}

impl Player {
    pub fn new(lives: u32) -> Self {
        Self {
            pos: start_position(),
            vel: Vec2::ZERO,
            state: PlayerState::Ground,
            lives,
            hammer: None,
        }
    }

    pub fn size() -> Vec2 {
        Vec2::new(PLAYER_W, PLAYER_H)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, Self::size())
    }

    pub fn feet(&self) -> f32 {
        self.pos.y + PLAYER_H
    }

    pub fn chest(&self) -> f32 {
        self.pos.y + PLAYER_H * CHEST_FRACTION
    }

    pub fn hammer_active(&self) -> bool {
        self.hammer.is_some()
    }

    /// Back to the start position, standing still
    pub fn respawn(&mut self) {
        self.pos = start_position();
        self.vel = Vec2::ZERO;
        self.state = PlayerState::Ground;
    }

    /// Narrower box used to decide whether the player can grab a ladder
    fn ladder_probe(&self) -> Rect {
        self.rect().inset_x(LADDER_PROBE_INSET)
    }

    fn clamp_to_play_area(&mut self) {
        self.pos.x = self.pos.x.clamp(0.0, SCREEN_W - PLAYER_W);
    }

    fn stand_on(&mut self, top: f32) {
        self.pos.y = top - PLAYER_H;
        self.vel.y = 0.0;
        self.state = PlayerState::Ground;
    }
}

/// Ladder the player can start climbing in the requested direction
fn climbable_ladder(player: &Player, layout: &LevelLayout, up: bool, down: bool) -> Option<usize> {
    let probe = player.ladder_probe();
    let feet = player.feet();
    layout.ladders.iter().position(|l| {
        overlaps(&probe, &l.rect) && ((up && feet > l.rect.top()) || (down && feet < l.rect.bottom()))
    })
}

fn touching_any_ladder(player: &Player, layout: &LevelLayout) -> bool {
    let probe = player.ladder_probe();
    layout.ladders.iter().any(|l| overlaps(&probe, &l.rect))
}

/// Platform top lying between the head and the chest point.
///
/// Once a climber's chest is at or below such a surface they pull themselves
/// up onto it.
fn ledge_at_chest(player: &Player, layout: &LevelLayout) -> Option<f32> {
    let body = player.rect();
    let head = player.pos.y;
    let chest = player.chest();
    layout
        .platforms
        .iter()
        .find(|p| {
            horizontally_aligned(&body, &p.rect, EDGE_INSET) && p.top() >= head && p.top() <= chest
        })
        .map(|p| p.top())
}

/// Snap onto a platform if moving down (or resting) with feet in the landing band.
///
/// Returns true if the player landed.
pub(crate) fn resolve_landing(player: &mut Player, layout: &LevelLayout) -> bool {
    if player.vel.y < 0.0 {
        return false;
    }
    match layout.support_under(&player.rect()) {
        Some(i) => {
            let top = layout.platforms[i].top();
            player.stand_on(top);
            true
        }
        None => false,
    }
}

/// Advance the player by one step
pub fn update_player(
    player: &mut Player,
    layout: &LevelLayout,
    input: &TickInput,
    tuning: &Tuning,
    dt: f32,
) -> PlayerStep {
    if matches!(player.state, PlayerState::Ground | PlayerState::Fall) && vertical_input(input) {
        if let Some(ladder) = climbable_ladder(player, layout, input.up, input.down) {
            player.state = PlayerState::Climb { ladder };
            player.vel = Vec2::ZERO;
        }
    }

    match player.state {
        PlayerState::Climb { ladder } => climb(player, layout, input, tuning, dt, ladder),
        PlayerState::Ground | PlayerState::Jump | PlayerState::Fall => {
            run_and_fall(player, layout, input, tuning, dt)
        }
    }

    player.clamp_to_play_area();

    if player.pos.y > WORLD_BOTTOM {
        player.lives = player.lives.saturating_sub(1);
        player.respawn();
        log::debug!("Player fell out of the level, {} lives left", player.lives);
        return PlayerStep::FellOutOfWorld;
    }

    PlayerStep::Moved
}

fn climb(
    player: &mut Player,
    layout: &LevelLayout,
    input: &TickInput,
    tuning: &Tuning,
    dt: f32,
    ladder: usize,
) {
    player.vel = Vec2::ZERO;

    if input.jump {
        player.state = PlayerState::Jump;
        player.vel.y = -tuning.jump_impulse;
        return;
    }

    let Some(rail) = layout.ladders.get(ladder).map(|l| l.rect) else {
        player.state = PlayerState::Fall;
        return;
    };

    if input.up {
        player.pos.y -= tuning.climb_speed * dt;
    }
    if input.down {
        player.pos.y += tuning.climb_speed * dt;
    }
    // Feet stay on the rails
    let feet = player.feet().clamp(rail.top(), rail.bottom());
    player.pos.y = feet - PLAYER_H;

    // Only a climb upward pulls onto a ledge
    if input.up {
        if let Some(top) = ledge_at_chest(player, layout) {
            player.stand_on(top);
            return;
        }
    } else if input.down && player.feet() >= rail.bottom() && resolve_landing(player, layout) {
        return;
    }

    if !vertical_input(input)
        && !touching_any_ladder(player, layout)
        && layout.support_under(&player.rect()).is_none()
    {
        player.state = PlayerState::Fall;
    }
}

fn vertical_input(input: &TickInput) -> bool {
    input.up || input.down
}

fn run_and_fall(
    player: &mut Player,
    layout: &LevelLayout,
    input: &TickInput,
    tuning: &Tuning,
    dt: f32,
) {
    player.vel.x = if input.right {
        tuning.player_speed
    } else if input.left {
        -tuning.player_speed
    } else {
        0.0
    };
    player.vel.y += tuning.gravity * dt;
    player.pos += player.vel * dt;
    player.clamp_to_play_area();

    if !resolve_landing(player, layout) && player.vel.y > 0.0 {
        player.state = PlayerState::Fall;
    }

    if input.jump
        && player.state == PlayerState::Ground
        && layout.support_under(&player.rect()).is_some()
    {
        player.state = PlayerState::Jump;
        player.vel.y = -tuning.jump_impulse;
    }
}
