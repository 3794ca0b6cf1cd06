//! Read-only per-frame view of the simulation for the renderer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::engine::GameEvent;
use super::levels::LevelEntry;
use super::obstacle::Obstacle;

/// Obstacle as seen by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub x: f32,
    pub gap_top: f32,
    pub gap_size: f32,
    pub width: f32,
    /// Level active at spawn, for styling
    pub level: u32,
}

impl From<&Obstacle> for ObstacleView {
    fn from(o: &Obstacle) -> Self {
        Self {
            x: o.x,
            gap_top: o.gap_top,
            gap_size: o.gap_size,
            width: o.width,
            level: o.level,
        }
    }
}

/// Level-up freeze window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionView {
    pub active: bool,
    pub ticks_remaining: u32,
    /// Full window length, for fade ratios
    pub total_ticks: u32,
}

/// Level name banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelNameView {
    pub active: bool,
    pub level_name: String,
}

/// Everything the renderer may read about one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Ticks since the session started
    pub tick: u64,
    pub screen_size: Vec2,
    /// Flyer top-left corner
    pub flyer_position: Vec2,
    pub flyer_velocity: f32,
    pub flyer_size: f32,
    /// Physics of the current level
    pub level_physics: LevelEntry,
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    pub current_level: u32,
    pub game_over: bool,
    pub level_transition: TransitionView,
    pub level_name_display: LevelNameView,
    /// Events raised during the last tick
    pub events: Vec<GameEvent>,
}
