//! Ghost Flyer - A side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, scoring, levels)
//! - `renderer`: Frame building from read-only simulation snapshots
//! - `settings`: Data-driven viewport, timing and level configuration

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{SimulationEngine, Snapshot, TickInput};

/// Game configuration constants
pub mod consts {
    /// Reference simulation rate; all level physics is tuned against it
    pub const REFERENCE_TICK_RATE: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Flyer hitbox (square) and fixed horizontal position
    pub const FLYER_SIZE: f32 = 40.0;
    pub const FLYER_X: f32 = 100.0;

    /// Obstacle column width
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    /// Minimum distance between consecutive spawns
    pub const SPAWN_SPACING: f32 = 300.0;
    /// Live obstacle cap
    pub const MAX_OBSTACLES: usize = 3;
    /// Keep-out band above and below every gap
    pub const GAP_MARGIN: f32 = 100.0;

    /// Frozen level-up window (seconds)
    pub const LEVEL_TRANSITION_SECS: f32 = 2.0;
    /// Level name banner duration (seconds)
    pub const LEVEL_NAME_SECS: f32 = 3.0;
}

/// Convert a duration in seconds to a whole number of ticks at `tick_rate`
#[inline]
pub fn secs_to_ticks(secs: f32, tick_rate: u32) -> u32 {
    (secs * tick_rate as f32).round().max(1.0) as u32
}
