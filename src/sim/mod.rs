//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (obstacles leftmost first)
//! - No rendering or platform dependencies

pub mod engine;
pub mod flyer;
pub mod levels;
pub mod obstacle;
pub mod snapshot;
pub mod stream;

pub use engine::{GameEvent, Phase, SimulationEngine, TickInput};
pub use flyer::Flyer;
pub use levels::{LevelEntry, LevelTable};
pub use obstacle::Obstacle;
pub use snapshot::{LevelNameView, ObstacleView, Snapshot, TransitionView};
pub use stream::{ObstacleStream, RngState};
