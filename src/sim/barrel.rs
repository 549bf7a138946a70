//! Barrel motion: roll along a girder, drop to the next one, sometimes take a ladder
//!
//! Barrels follow platform indices downward. Rolling off the end of platform
//! `n` drops them onto platform `n - 1` heading the other way; rolling off the
//! floor (index 0) removes them.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, horizontally_aligned, overlaps};
use super::level::LevelLayout;
use super::state::{BarrelLoss, GameEvent};
use crate::consts::*;
use crate::tuning::Tuning;

/// Horizontal roll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    pub fn sign(self) -> f32 {
        match self {
            Heading::Left => -1.0,
            Heading::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    /// Default heading when nothing else decides it
    pub fn for_level(level: u32) -> Self {
        if level % 2 == 1 {
            Heading::Right
        } else {
            Heading::Left
        }
    }
}

/// Barrel motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarrelState {
    /// Resting on and rolling along the given platform
    Rolling { platform: usize },
    /// Airborne, will land on the given platform
    Falling { platform: usize },
}

/// A barrel entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barrel {
    pub id: u32,
    /// Top-left corner of the bounding square
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub alive: bool,
    pub state: BarrelState,
    /// None while descending a ladder; decided on landing
    pub heading: Option<Heading>,
    /// Ladder the drop rule last rolled for (one draw per ladder visit)
    pub last_ladder: Option<usize>,
}

impl Barrel {
    /// A barrel resting on `platform` at horizontal position `x`
    pub fn rolling_on(
        id: u32,
        layout: &LevelLayout,
        platform: usize,
        x: f32,
        heading: Heading,
        size: f32,
    ) -> Self {
        debug_assert!(
            platform < layout.platforms.len(),
            "no platform {platform} in a layout of {}",
            layout.platforms.len()
        );
        let top = layout.platforms.get(platform).map(|p| p.top()).unwrap_or(0.0);
        Self {
            id,
            pos: Vec2::new(x, top - size),
            vel: Vec2::ZERO,
            size,
            alive: true,
            state: BarrelState::Rolling { platform },
            heading: Some(heading),
            last_ladder: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size * 0.5)
    }

    pub fn radius(&self) -> f32 {
        self.size * 0.5
    }

    pub fn feet(&self) -> f32 {
        self.pos.y + self.size
    }

    pub fn is_rolling(&self) -> bool {
        matches!(self.state, BarrelState::Rolling { .. })
    }

    /// Platform the barrel is on or heading for
    pub fn platform(&self) -> usize {
        match self.state {
            BarrelState::Rolling { platform } | BarrelState::Falling { platform } => platform,
        }
    }

    pub(crate) fn destroy(&mut self, cause: BarrelLoss, events: &mut Vec<GameEvent>) {
        if self.alive {
            self.alive = false;
            events.push(GameEvent::BarrelDestroyed { id: self.id, cause });
        }
    }
}

/// Create a barrel at the top platform's edge on the goal's side, heading away from it
pub fn spawn_barrel(id: u32, layout: &LevelLayout, tuning: &Tuning) -> Barrel {
    let top = layout.top_platform();
    let surface = layout.platforms[top].rect;
    let size = tuning.barrel_size;
    let (x, heading) = if layout.goal_on_left() {
        (surface.left(), Heading::Right)
    } else {
        (surface.right() - size, Heading::Left)
    };
    Barrel::rolling_on(id, layout, top, x, heading, size)
}

/// One ladder-drop draw: uniform integer in 0..100 against the percentage
pub fn roll_ladder_drop<R: Rng>(rng: &mut R, percent: u32) -> bool {
    rng.random_range(0..100u32) < percent
}

/// Heading for a barrel landing without one
fn landing_heading(barrel: &Barrel, surface: &Rect, level: u32) -> Heading {
    if barrel.pos.x <= surface.left() + BARREL_EDGE_NUDGE {
        Heading::Right
    } else if barrel.pos.x + barrel.size >= surface.right() - BARREL_EDGE_NUDGE {
        Heading::Left
    } else {
        Heading::for_level(level)
    }
}

/// Ladder leading down from the barrel's platform that it currently overlaps
fn ladder_below(barrel: &Barrel, layout: &LevelLayout, platform: usize) -> Option<usize> {
    let body = barrel.rect();
    layout
        .ladders
        .iter()
        .position(|l| l.upper == platform && overlaps(&body, &l.rect))
}

/// Advance one barrel by one step
pub fn update_barrel<R: Rng>(
    barrel: &mut Barrel,
    layout: &LevelLayout,
    tuning: &Tuning,
    level: u32,
    rng: &mut R,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    if !barrel.alive {
        return;
    }

    match barrel.state {
        BarrelState::Rolling { platform } => {
            roll(barrel, layout, tuning, level, rng, dt, platform, events)
        }
        BarrelState::Falling { platform } => {
            fall(barrel, layout, tuning, level, dt, platform, events)
        }
    }

    if barrel.alive
        && (barrel.pos.x < -BARREL_BOUNDS_MARGIN
            || barrel.pos.x > SCREEN_W + BARREL_BOUNDS_MARGIN
            || barrel.pos.y > WORLD_BOTTOM)
    {
        barrel.destroy(BarrelLoss::OutOfBounds, events);
    }
}

#[allow(clippy::too_many_arguments)]
fn roll<R: Rng>(
    barrel: &mut Barrel,
    layout: &LevelLayout,
    tuning: &Tuning,
    level: u32,
    rng: &mut R,
    dt: f32,
    platform: usize,
    events: &mut Vec<GameEvent>,
) {
    let Some(surface) = layout.platforms.get(platform).map(|p| p.rect) else {
        barrel.destroy(BarrelLoss::OutOfBounds, events);
        return;
    };
    let heading = *barrel.heading.get_or_insert_with(|| Heading::for_level(level));
    barrel.vel = Vec2::new(heading.sign() * tuning.barrel_speed_for(level), 0.0);

    let eligible =
        barrel.vel.x.abs() > BARREL_DROP_MIN_VX && barrel.vel.y.abs() < BARREL_DROP_MAX_VY;
    let candidate = if eligible {
        ladder_below(barrel, layout, platform).filter(|&i| barrel.last_ladder != Some(i))
    } else {
        None
    };
    if let Some(index) = candidate {
        barrel.last_ladder = Some(index);
        if roll_ladder_drop(rng, tuning.ladder_drop_percent) {
            let ladder = &layout.ladders[index];
            barrel.vel = Vec2::new(0.0, tuning.ladder_drop_speed);
            barrel.pos.x = ladder.rect.center_x() - barrel.size * 0.5;
            barrel.heading = None;
            barrel.state = BarrelState::Falling {
                platform: ladder.lower,
            };
            log::debug!("Barrel {} takes ladder {}", barrel.id, index);
            events.push(GameEvent::BarrelTookLadder {
                id: barrel.id,
                ladder: index,
            });
            return;
        }
    }

    barrel.pos.x += barrel.vel.x * dt;
    barrel.pos.y = surface.top() - barrel.size;

    let off_edge = match heading {
        Heading::Right => barrel.pos.x > surface.right(),
        Heading::Left => barrel.pos.x + barrel.size < surface.left(),
    };
    if !off_edge {
        return;
    }

    if platform == 0 {
        barrel.destroy(BarrelLoss::RolledOffFloor, events);
        return;
    }

    barrel.state = BarrelState::Falling {
        platform: platform - 1,
    };
    barrel.heading = Some(heading.flipped());
    barrel.vel.x = 0.0;
    barrel.last_ladder = None;
    events.push(GameEvent::BarrelDropped {
        id: barrel.id,
        platform: platform - 1,
    });
}

fn fall(
    barrel: &mut Barrel,
    layout: &LevelLayout,
    tuning: &Tuning,
    level: u32,
    dt: f32,
    platform: usize,
    events: &mut Vec<GameEvent>,
) {
    let Some(surface) = layout.platforms.get(platform).map(|p| p.rect) else {
        barrel.destroy(BarrelLoss::OutOfBounds, events);
        return;
    };
    let prev_feet = barrel.feet();

    barrel.vel.x = 0.0;
    barrel.vel.y += tuning.gravity * dt;
    barrel.pos += barrel.vel * dt;

    let landed = barrel.vel.y >= 0.0
        && horizontally_aligned(&barrel.rect(), &surface, EDGE_INSET)
        && barrel.feet() >= surface.top()
        && prev_feet <= surface.top() + BARREL_LAND_BAND;
    if !landed {
        return;
    }

    barrel.pos.y = surface.top() - barrel.size;
    barrel.vel.y = 0.0;
    if barrel.heading.is_none() {
        barrel.heading = Some(landing_heading(barrel, &surface, level));
    }
    barrel.state = BarrelState::Rolling { platform };
    barrel.last_ladder = None;
}
