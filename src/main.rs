//! Ape Climb native entry point
//!
//! Plays in the terminal from the keyboard by default. `demo` hands the
//! controls to the autopilot; `headless` runs the autopilot at a fixed step
//! without drawing.

use std::io::{self, Write};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue, style};

use ape_climb::consts::SIM_DT;
use ape_climb::persistence::{ScoreFile, ScoreStore};
use ape_climb::platform::{Action, Clock, FixedClock, KeyState, SystemClock};
use ape_climb::renderer::text::ROWS;
use ape_climb::renderer::{TextCanvas, draw_frame};
use ape_climb::sim::{GameEvent, GamePhase, TickInput, World};
use ape_climb::{Session, Settings};

/// Without release events a key counts as held until it goes quiet this long
const KEY_HOLD: Duration = Duration::from_millis(500);

/// Seed from the wall clock when the settings do not pin one
fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

/// Demo input: the autopilot plays, and starts a new run after game over
fn demo_input<S: ScoreStore>(session: &Session<S>) -> TickInput {
    TickInput {
        idle_mode: true,
        restart: session.world().phase == GamePhase::GameOver,
        ..Default::default()
    }
}

/// Key bindings
fn key_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') => Some(Action::MoveRight),
        KeyCode::Up | KeyCode::Char('w') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('s') => Some(Action::MoveDown),
        KeyCode::Char(' ') => Some(Action::Jump),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
        KeyCode::Enter => Some(Action::Confirm),
        _ => None,
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Char('q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Keyboard state fed from terminal key events.
///
/// Most terminals only report presses and auto-repeats, so holds are timed
/// out unless the terminal reports releases.
struct TerminalKeys {
    keys: KeyState,
    last_seen: [Option<Instant>; Action::ALL.len()],
    reports_release: bool,
}

impl TerminalKeys {
    fn new(reports_release: bool) -> Self {
        Self {
            keys: KeyState::default(),
            last_seen: [None; Action::ALL.len()],
            reports_release,
        }
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant) {
        let Some(action) = key_action(key.code) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.keys.press(action);
                self.last_seen[action as usize] = Some(now);
            }
            KeyEventKind::Release => {
                self.keys.release(action);
                self.last_seen[action as usize] = None;
            }
        }
    }

    /// Release keys that have gone quiet
    fn expire(&mut self, now: Instant) {
        if self.reports_release {
            return;
        }
        for action in Action::ALL {
            let slot = &mut self.last_seen[action as usize];
            if slot.is_some_and(|seen| now.duration_since(seen) > KEY_HOLD) {
                self.keys.release(action);
                *slot = None;
            }
        }
    }

    /// This frame's input; presses are consumed
    fn take_input(&mut self) -> TickInput {
        let input = TickInput::from_source(&self.keys);
        self.keys.end_frame();
        input
    }
}

#[derive(Debug, Default)]
struct RunSummary {
    runs: u32,
    levels_cleared: u32,
    barrels_smashed: u32,
    best_score: u64,
}

impl RunSummary {
    fn observe(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::GameOver { score, .. } => {
                    self.runs += 1;
                    self.best_score = self.best_score.max(*score);
                }
                GameEvent::LevelCleared { .. } => self.levels_cleared += 1,
                GameEvent::BarrelSmashed { .. } => self.barrels_smashed += 1,
                _ => {}
            }
        }
    }
}

fn run_headless<S: ScoreStore>(
    session: &mut Session<S>,
    demo_ticks: u64,
    summary: &mut RunSummary,
) {
    let mut clock = FixedClock::new(SIM_DT);
    while session.world().time_ticks < demo_ticks {
        session.set_input(demo_input(session));
        let events = session.advance(clock.elapsed_secs());
        summary.observe(&events);
    }
}

/// Redraw the whole frame from the top-left corner
fn present(out: &mut io::Stdout, canvas: &TextCanvas) -> io::Result<()> {
    queue!(out, cursor::MoveTo(0, 0), terminal::Clear(ClearType::All))?;
    for row in 0..ROWS {
        queue!(
            out,
            cursor::MoveTo(0, row as u16),
            style::Print(canvas.row(row).trim_end())
        )?;
    }
    out.flush()
}

fn run_terminal<S: ScoreStore>(
    session: &mut Session<S>,
    settings: &Settings,
    demo_ticks: u64,
    summary: &mut RunSummary,
) -> io::Result<()> {
    let mut out = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        out,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide
    )?;
    let reports_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if reports_release {
        execute!(
            out,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let result = play_loop(&mut out, session, settings, demo_ticks, summary, reports_release);

    // Restore the terminal even when the loop failed
    if reports_release {
        execute!(out, PopKeyboardEnhancementFlags)?;
    }
    execute!(out, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn play_loop<S: ScoreStore>(
    out: &mut io::Stdout,
    session: &mut Session<S>,
    settings: &Settings,
    demo_ticks: u64,
    summary: &mut RunSummary,
    reports_release: bool,
) -> io::Result<()> {
    let frame = Duration::from_secs_f32(1.0 / settings.render_fps.max(1) as f32);
    let mut clock = SystemClock::new();
    let mut canvas = TextCanvas::new();
    let mut keys = TerminalKeys::new(reports_release);

    loop {
        let deadline = Instant::now() + frame;

        // --- INPUT (waiting on the keyboard paces the frame) ---
        loop {
            let now = Instant::now();
            let wait = deadline.saturating_duration_since(now);
            if !event::poll(wait)? {
                break;
            }
            if let Event::Key(key) = event::read()? {
                if is_quit(&key) {
                    return Ok(());
                }
                keys.on_key(key, now);
            }
        }
        keys.expire(Instant::now());

        // --- UPDATE ---
        let input = if settings.demo {
            demo_input(session)
        } else {
            keys.take_input()
        };
        session.set_input(input);
        let events = session.advance(clock.elapsed_secs());
        summary.observe(&events);

        // --- DRAW ---
        draw_frame(&mut canvas, session.world(), Some(session.scores()));
        present(out, &canvas)?;

        if settings.demo && session.world().time_ticks >= demo_ticks {
            return Ok(());
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Ape Climb (native) starting...");

    let settings = Settings::load(&Settings::default_path());
    let seed = settings.seed.unwrap_or_else(time_seed);
    log::info!("Seed {}", seed);

    let world = World::new(seed, settings.tuning.clone());
    let store = ScoreFile::new(settings.scores_path.clone());
    let mut session = Session::new(world, store, settings.player_name.clone());

    let demo_ticks = (settings.demo_seconds / SIM_DT).ceil() as u64;
    let mut summary = RunSummary::default();

    if settings.headless {
        run_headless(&mut session, demo_ticks, &mut summary);
    } else if let Err(e) = run_terminal(&mut session, &settings, demo_ticks, &mut summary) {
        log::error!("Terminal error: {}", e);
    }

    let world = session.world();
    summary.best_score = summary.best_score.max(world.score);
    log::info!(
        "Finished: {} runs over, {} levels cleared, {} barrels smashed, best score {}",
        summary.runs,
        summary.levels_cleared,
        summary.barrels_smashed,
        summary.best_score
    );
    if let Some(top) = session.scores().top_score() {
        log::info!("High score: {}", top);
    }
}
