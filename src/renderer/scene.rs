//! Scene drawing: world, HUD and game-over overlay

use glam::Vec2;

use super::{Canvas, Color, palette};
use crate::consts::*;
use crate::highscores::HighScores;
use crate::sim::{GamePhase, Rect, World};

const HUD_TEXT: f32 = 20.0;
const RUNG_SPACING: f32 = 12.0;

/// Draw one frame of the world.
///
/// `scores` is shown on the game-over screen when given.
pub fn draw_frame<C: Canvas + ?Sized>(canvas: &mut C, world: &World, scores: Option<&HighScores>) {
    canvas.clear(palette::BACKGROUND);

    for (i, platform) in world.layout.platforms.iter().enumerate() {
        let color = if i == 0 {
            palette::FLOOR
        } else {
            palette::GIRDER
        };
        canvas.fill_rect(platform.rect, color);
    }

    for ladder in &world.layout.ladders {
        draw_ladder(canvas, ladder.rect);
    }

    canvas.fill_rect(world.layout.goal, palette::GOAL);

    if let Some(pickup) = world.pickup.as_ref().filter(|p| p.available) {
        canvas.fill_rect(pickup.rect, palette::PICKUP);
    }

    for barrel in world.barrels.iter().filter(|b| b.alive) {
        canvas.fill_circle(barrel.center(), barrel.radius(), palette::BARREL);
    }

    let player_color = if world.player.hammer_active() {
        palette::PLAYER_ARMED
    } else {
        palette::PLAYER
    };
    canvas.fill_rect(world.player.rect(), player_color);

    draw_hud(canvas, world);

    if world.phase == GamePhase::GameOver {
        draw_game_over(canvas, world, scores);
    }
}

fn draw_ladder<C: Canvas + ?Sized>(canvas: &mut C, rect: Rect) {
    canvas.stroke_rect(rect, 3.0, palette::LADDER);
    let mut y = rect.top() + RUNG_SPACING;
    while y < rect.bottom() {
        canvas.fill_rect(Rect::new(rect.x, y, rect.w, 2.0), palette::LADDER);
        y += RUNG_SPACING;
    }
}

fn draw_hud<C: Canvas + ?Sized>(canvas: &mut C, world: &World) {
    let line = format!(
        "Score: {}  Lives: {}  Level: {}",
        world.score, world.player.lives, world.level
    );
    canvas.text(Vec2::new(12.0, 8.0), HUD_TEXT, palette::TEXT, &line);

    if let Some(hammer) = world.player.hammer {
        let secs = hammer.remaining().max(0.0).ceil() as u32;
        canvas.text(
            Vec2::new(12.0, 8.0 + HUD_TEXT + 4.0),
            HUD_TEXT,
            palette::PLAYER_ARMED,
            &format!("HAMMER {secs}s"),
        );
    }
}

fn draw_game_over<C: Canvas + ?Sized>(
    canvas: &mut C,
    world: &World,
    scores: Option<&HighScores>,
) {
    canvas.fill_rect(Rect::new(0.0, 0.0, SCREEN_W, SCREEN_H), palette::OVERLAY);

    let cx = SCREEN_W * 0.5;
    let mut y = SCREEN_H * 0.3;
    centered(canvas, cx, y, 48.0, palette::ALERT, "GAME OVER");
    y += 72.0;
    centered(
        canvas,
        cx,
        y,
        HUD_TEXT,
        palette::BACKGROUND,
        &format!("Final Score: {}", world.score),
    );
    y += 48.0;

    if let Some(scores) = scores.filter(|s| !s.is_empty()) {
        centered(canvas, cx, y, HUD_TEXT, palette::LADDER, "HIGH SCORES");
        y += 32.0;
        for (rank, entry) in scores.entries.iter().enumerate() {
            let line = format!("{}. {:<12} {:>7}", rank + 1, entry.name, entry.score);
            centered(canvas, cx, y, HUD_TEXT, palette::BACKGROUND, &line);
            y += 24.0;
        }
        y += 24.0;
    }

    centered(canvas, cx, y, HUD_TEXT, palette::BACKGROUND, "Press R to restart");
}

/// Text horizontally centred on `cx`, assuming glyphs half as wide as tall
fn centered<C: Canvas + ?Sized>(
    canvas: &mut C,
    cx: f32,
    y: f32,
    size: f32,
    color: Color,
    text: &str,
) {
    let width = text.chars().count() as f32 * size * 0.5;
    canvas.text(Vec2::new(cx - width * 0.5, y), size, color, text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    /// Records every call for inspection
    #[derive(Default)]
    struct Recorder {
        rects: Vec<(Rect, [f32; 4])>,
        circles: Vec<Vec2>,
        texts: Vec<String>,
        clears: usize,
    }

    impl Canvas for Recorder {
        fn clear(&mut self, _color: [f32; 4]) {
            self.clears += 1;
        }
        fn fill_rect(&mut self, rect: Rect, color: [f32; 4]) {
            self.rects.push((rect, color));
        }
        fn stroke_rect(&mut self, rect: Rect, _thickness: f32, color: [f32; 4]) {
            self.rects.push((rect, color));
        }
        fn fill_circle(&mut self, center: Vec2, _radius: f32, _color: [f32; 4]) {
            self.circles.push(center);
        }
        fn text(&mut self, _pos: Vec2, _size: f32, _color: [f32; 4], text: &str) {
            self.texts.push(text.to_string());
        }
    }

    #[test]
    fn test_draws_world_and_hud() {
        let mut world = World::new(1, Tuning::default());
        let id = world.next_entity_id();
        let barrel = crate::sim::barrel::spawn_barrel(id, &world.layout, &world.tuning);
        world.barrels.push(barrel);

        let mut canvas = Recorder::default();
        draw_frame(&mut canvas, &world, None);

        assert_eq!(canvas.clears, 1);
        assert_eq!(canvas.circles.len(), 1);
        assert!(canvas.rects.iter().any(|(r, _)| *r == world.player.rect()));
        assert!(canvas.rects.iter().any(|(r, _)| *r == world.layout.goal));
        assert!(canvas.texts[0].starts_with("Score: 0  Lives: 3  Level: 1"));
        assert!(!canvas.texts.iter().any(|t| t == "GAME OVER"));
    }

    #[test]
    fn test_game_over_overlay_lists_scores() {
        let mut world = World::new(1, Tuning::default());
        world.phase = GamePhase::GameOver;
        let mut scores = HighScores::new();
        scores.record("ann", 900);

        let mut canvas = Recorder::default();
        draw_frame(&mut canvas, &world, Some(&scores));
        assert!(canvas.texts.iter().any(|t| t == "GAME OVER"));
        assert!(canvas.texts.iter().any(|t| t.contains("ann") && t.contains("900")));
        assert!(canvas.texts.iter().any(|t| t.contains("restart")));
    }

    #[test]
    fn test_taken_pickup_not_drawn() {
        let mut world = World::new(1, Tuning::default());
        let pickup = world.pickup.as_ref().map(|p| p.rect).unwrap();
        let mut canvas = Recorder::default();
        draw_frame(&mut canvas, &world, None);
        assert!(canvas.rects.iter().any(|(r, _)| *r == pickup));

        if let Some(p) = world.pickup.as_mut() {
            p.available = false;
        }
        let mut canvas = Recorder::default();
        draw_frame(&mut canvas, &world, None);
        assert!(!canvas.rects.iter().any(|(r, _)| *r == pickup));
    }
}
