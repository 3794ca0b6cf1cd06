//! Fixed timestep simulation tick
//!
//! The engine owns all mutable session state and advances it one tick at a
//! time from edge-triggered input.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::flyer::Flyer;
use super::levels::LevelTable;
use super::snapshot::{LevelNameView, ObstacleView, Snapshot, TransitionView};
use super::stream::{ObstacleStream, RngState};
use crate::consts::MAX_OBSTACLES;
use crate::settings::Settings;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump (space); honoured only while active
    pub jump: bool,
    /// Restart (R); honoured only after game over
    pub restart: bool,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Physics, scoring and spawning run
    Active,
    /// Frozen level-up window
    LevelTransition { ticks_remaining: u32 },
    /// Run ended; only a restart has effect
    GameOver,
}

/// Things that happened during a tick, for effects and HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Flyer jumped from this top-left position
    Jumped { x: f32, y: f32 },
    /// An obstacle was cleared; `score` is the new total
    Passed { score: u32 },
    /// Level increased and the freeze window began
    LevelUp { level: u32 },
    /// Freeze window ended and the stream restarted
    TransitionEnded { level: u32 },
    /// Flyer hit an obstacle
    Crashed { score: u32 },
    /// Session restarted
    Reset,
}

/// Owns one game session: flyer, obstacle stream, score and level progression
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    settings: Settings,
    /// Levels rescaled to the configured tick rate
    levels: LevelTable,
    transition_ticks: u32,
    level_name_ticks: u32,

    flyer: Flyer,
    stream: ObstacleStream,
    score: u32,
    level: u32,
    phase: Phase,
    /// Level name banner countdown (0 = hidden)
    name_ticks_remaining: u32,
    /// Ticks since session start
    tick: u64,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Start a session seeded from `settings.seed`.
    ///
    /// Panics if the settings do not validate; configuration errors are
    /// caught before the loop starts.
    pub fn new(settings: Settings) -> Self {
        let rng = RngState::new(settings.seed).to_rng();
        Self::session(settings, rng)
    }

    fn session(settings: Settings, rng: Pcg32) -> Self {
        if let Err(e) = settings.validate() {
            panic!("invalid settings: {}", e);
        }

        let levels = settings.timed_levels();
        let mut stream = ObstacleStream::new(settings.screen_height, rng);
        stream.reset_with(
            settings.screen_width,
            levels.get(1).gap_size,
            1,
            MAX_OBSTACLES,
        );

        log::info!(
            "Session started: {}x{} @ {} Hz, {} levels",
            settings.screen_width,
            settings.screen_height,
            settings.tick_rate,
            levels.max_level()
        );

        Self {
            transition_ticks: settings.transition_ticks(),
            level_name_ticks: settings.level_name_ticks(),
            flyer: Flyer::spawn(settings.screen_height),
            stream,
            score: 0,
            level: 1,
            phase: Phase::Active,
            name_ticks_remaining: 0,
            tick: 0,
            events: Vec::new(),
            levels,
            settings,
        }
    }

    /// Replace this session with a fresh one. The random source carries
    /// over, so the next run gets new gap placements.
    pub fn reset(&mut self) {
        let rng = self.stream.rng().clone();
        *self = Self::session(self.settings.clone(), rng);
        self.events.push(GameEvent::Reset);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn flyer(&self) -> &Flyer {
        &self.flyer
    }

    pub fn stream(&self) -> &ObstacleStream {
        &self.stream
    }

    /// Events raised by the last call to `step`
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Advance the session by one fixed tick
    pub fn step(&mut self, input: &TickInput) {
        self.events.clear();

        let input = if input.idle_mode {
            self.autopilot()
        } else {
            *input
        };

        if self.phase == Phase::GameOver {
            if input.restart {
                self.reset();
            } else {
                self.name_ticks_remaining = self.name_ticks_remaining.saturating_sub(1);
            }
            return;
        }

        if self.phase == Phase::Active {
            self.tick_active(&input);
        }

        // Runs in the trigger tick too, so the window lasts exactly transition_ticks
        if let Phase::LevelTransition { ticks_remaining } = self.phase {
            let ticks_remaining = ticks_remaining.saturating_sub(1);
            if ticks_remaining == 0 {
                self.finish_transition();
            } else {
                self.phase = Phase::LevelTransition { ticks_remaining };
            }
        }

        self.name_ticks_remaining = self.name_ticks_remaining.saturating_sub(1);
        self.tick += 1;
    }

    fn tick_active(&mut self, input: &TickInput) {
        // Physics for the whole tick comes from the level at tick start
        let entry = self.levels.get(self.level);
        let (gravity, jump_impulse, scroll_speed, gap_size) = (
            entry.gravity,
            entry.jump_impulse,
            entry.scroll_speed,
            entry.gap_size,
        );

        if input.jump {
            self.flyer.jump(jump_impulse);
            self.events.push(GameEvent::Jumped {
                x: self.flyer.x,
                y: self.flyer.y,
            });
        }
        self.flyer.step(gravity);

        if self.level_up_due() {
            self.level += 1;
            self.phase = Phase::LevelTransition {
                ticks_remaining: self.transition_ticks,
            };
            self.name_ticks_remaining = self.level_name_ticks;
            self.events.push(GameEvent::LevelUp { level: self.level });
            log::info!(
                "Level up: {} ({}) at score {}",
                self.level,
                self.levels.get(self.level).name,
                self.score
            );
        }

        self.stream.advance(scroll_speed);
        if self.stream.detect_collision(&self.flyer) {
            self.phase = Phase::GameOver;
            self.events.push(GameEvent::Crashed { score: self.score });
            log::info!("Game over: score {} on level {}", self.score, self.level);
            return;
        }

        let passed = self.stream.consume_passes(self.flyer.x);
        for _ in 0..passed {
            self.score += 1;
            self.events.push(GameEvent::Passed { score: self.score });
            log::debug!("Passed obstacle, score {}", self.score);
        }

        self.stream
            .maybe_spawn(self.settings.screen_width, gap_size, self.level);
    }

    /// Score sits on a multiple of ten that the current level has not yet
    /// been promoted for. Assumes the score grows by at most one per tick;
    /// a multi-point jump over a boundary would skip that level-up.
    fn level_up_due(&self) -> bool {
        self.score > 0
            && self.score % 10 == 0
            && self.score / 10 + 1 > self.level
            && self.level < self.levels.max_level()
    }

    fn finish_transition(&mut self) {
        self.phase = Phase::Active;
        self.stream.reset_with(
            self.settings.screen_width,
            self.levels.get(self.level).gap_size,
            self.level,
            MAX_OBSTACLES,
        );
        self.events
            .push(GameEvent::TransitionEnded { level: self.level });
        log::info!("Level {} begins", self.level);
    }

    /// Demo input: hop whenever the flyer sinks toward the bottom of the next
    /// gap, and restart after a crash.
    fn autopilot(&self) -> TickInput {
        let mut input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        match self.phase {
            Phase::GameOver => input.restart = true,
            Phase::LevelTransition { .. } => {}
            Phase::Active => {
                let flyer = &self.flyer;
                let entry = self.levels.get(self.level);
                let (gap_top, gap_bottom) = self
                    .stream
                    .obstacles()
                    .iter()
                    .find(|o| !o.is_fully_passed(flyer.x))
                    .map(|o| (o.gap_top, o.gap_bottom()))
                    .unwrap_or((
                        self.settings.screen_height / 2.0 - flyer.size,
                        self.settings.screen_height / 2.0 + flyer.size,
                    ));

                // Height gained by one jump before gravity turns it around
                let rise = entry.jump_impulse * entry.jump_impulse / (2.0 * entry.gravity);
                let trigger = (gap_top + flyer.size + rise + 4.0).min(gap_bottom - 4.0);
                input.jump = flyer.y + flyer.size >= trigger && flyer.vel_y >= 0.0;
            }
        }
        input
    }

    /// Read-only view of the session for the renderer
    pub fn snapshot(&self) -> Snapshot {
        let (transition_active, ticks_remaining) = match self.phase {
            Phase::LevelTransition { ticks_remaining } => (true, ticks_remaining),
            _ => (false, 0),
        };
        let name_active = self.name_ticks_remaining > 0;

        Snapshot {
            tick: self.tick,
            screen_size: glam::Vec2::new(self.settings.screen_width, self.settings.screen_height),
            flyer_position: self.flyer.pos(),
            flyer_velocity: self.flyer.vel_y,
            flyer_size: self.flyer.size,
            level_physics: self.levels.get(self.level).clone(),
            obstacles: self.stream.obstacles().iter().map(ObstacleView::from).collect(),
            score: self.score,
            current_level: self.level,
            game_over: self.is_game_over(),
            level_transition: TransitionView {
                active: transition_active,
                ticks_remaining,
                total_ticks: self.transition_ticks,
            },
            level_name_display: LevelNameView {
                active: name_active,
                level_name: if name_active {
                    self.levels.get(self.level).name.clone()
                } else {
                    String::new()
                },
            },
            events: self.events.clone(),
        }
    }
}
