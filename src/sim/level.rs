//! Level layout generation
//!
//! Layouts are pure functions of the level index: no randomness, so the same
//! level always plays on the same girders.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, horizontally_aligned};
use crate::consts::*;

/// A walkable girder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    /// Slope direction; reserved, every generated platform is flat
    pub slope: Option<f32>,
}

impl Platform {
    pub fn flat(rect: Rect) -> Self {
        Self { rect, slope: None }
    }

    /// Y coordinate actors stand on
    #[inline]
    pub fn top(&self) -> f32 {
        self.rect.top()
    }
}

/// A ladder joining two platforms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    /// Spans from the upper platform's surface down to the lower one's
    pub rect: Rect,
    /// Platform index at the foot of the ladder
    pub lower: usize,
    /// Platform index at the head of the ladder
    pub upper: usize,
}

/// Immutable geometry of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub index: u32,
    /// Index 0 is the floor, then rows bottom-up
    pub platforms: Vec<Platform>,
    pub ladders: Vec<Ladder>,
    /// The ape the player climbs toward
    pub goal: Rect,
    /// Where the hammer pickup sits, if the level has one
    pub pickup: Option<Rect>,
}

impl LevelLayout {
    /// Topmost platform (barrels spawn here)
    pub fn top_platform(&self) -> usize {
        self.platforms.len().saturating_sub(1)
    }

    /// Platform whose surface supports `body` within the landing band
    pub fn support_under(&self, body: &Rect) -> Option<usize> {
        let feet = body.bottom();
        self.platforms.iter().position(|p| {
            horizontally_aligned(body, &p.rect, EDGE_INSET)
                && feet >= p.top() - LAND_ABOVE
                && feet <= p.top() + LAND_BELOW
        })
    }

    /// Whether the goal sits on the left half of the screen
    pub fn goal_on_left(&self) -> bool {
        self.goal.center_x() < SCREEN_W / 2.0
    }
}

/// Row `k` (0 = lowest) is cut on the right on odd levels for even `k`.
/// Even levels mirror the whole pattern.
fn row_cut_right(row: usize, level: u32) -> bool {
    (row % 2 == 0) == (level % 2 == 1)
}

/// Build the layout for a level (index >= 1)
pub fn build_level(index: u32) -> LevelLayout {
    let index = index.max(1);
    let mut platforms = Vec::with_capacity(PLATFORM_ROWS + 1);

    platforms.push(Platform::flat(Rect::new(
        0.0,
        SCREEN_H - FLOOR_H,
        SCREEN_W,
        FLOOR_H,
    )));

    let full_w = SCREEN_W - PLATFORM_MARGIN * 2.0;
    for row in 0..PLATFORM_ROWS {
        let y = LOWEST_ROW_Y - row as f32 * ROW_GAP;
        let (left_cut, right_cut) = if row_cut_right(row, index) {
            (0.0, ROW_CUT)
        } else {
            (ROW_CUT, 0.0)
        };
        platforms.push(Platform::flat(Rect::new(
            PLATFORM_MARGIN + left_cut,
            y,
            full_w - left_cut - right_cut,
            PLATFORM_THICKNESS,
        )));
    }

    // One ladder per gap, inside the x-range both platforms share
    let mut ladders = Vec::with_capacity(PLATFORM_ROWS);
    for gap in 0..PLATFORM_ROWS {
        let lower = &platforms[gap].rect;
        let upper = &platforms[gap + 1].rect;
        let lo = lower.left().max(upper.left());
        let hi = lower.right().min(upper.right());
        let on_left = row_cut_right(gap, index);
        let x = if on_left {
            lo + LADDER_EDGE_OFFSET
        } else {
            hi - LADDER_EDGE_OFFSET - LADDER_W
        };
        ladders.push(Ladder {
            rect: Rect::new(x, upper.top(), LADDER_W, lower.top() - upper.top()),
            lower: gap,
            upper: gap + 1,
        });
    }

    let top_row_y = LOWEST_ROW_Y - (PLATFORM_ROWS - 1) as f32 * ROW_GAP;
    let goal_x = if index % 2 == 1 {
        100.0
    } else {
        SCREEN_W - 140.0
    };
    let goal = Rect::new(goal_x, top_row_y - GOAL_RISE, GOAL_W, GOAL_H);

    let pickup = platforms.get(PICKUP_PLATFORM).map(|p| {
        Rect::new(
            p.rect.center_x() - PICKUP_SIZE * 0.5,
            p.top() - PICKUP_SIZE,
            PICKUP_SIZE,
            PICKUP_SIZE,
        )
    });

    log::debug!(
        "Built level {}: {} platforms, {} ladders, goal at x={}",
        index,
        platforms.len(),
        ladders.len(),
        goal_x
    );

    LevelLayout {
        index,
        platforms,
        ladders,
        goal,
        pickup,
    }
}

/// Player start position, feet on the floor
pub fn start_position() -> Vec2 {
    Vec2::new(START_X, START_Y)
}
