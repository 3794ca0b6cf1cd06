//! Live obstacle set: spawning, scrolling, retiring, passes and hits

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::flyer::Flyer;
use super::obstacle::Obstacle;
use crate::consts::{MAX_OBSTACLES, SPAWN_SPACING};

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Obstacles ordered leftmost first; the stream owns them exclusively
#[derive(Debug, Clone)]
pub struct ObstacleStream {
    obstacles: Vec<Obstacle>,
    screen_height: f32,
    rng: Pcg32,
}

impl ObstacleStream {
    /// Empty stream drawing gap placements from `rng`
    pub fn new(screen_height: f32, rng: Pcg32) -> Self {
        Self {
            obstacles: Vec::with_capacity(MAX_OBSTACLES),
            screen_height,
            rng,
        }
    }

    /// Stream starting from an explicit obstacle layout, leftmost first
    pub fn with_obstacles(obstacles: Vec<Obstacle>, screen_height: f32, rng: Pcg32) -> Self {
        Self {
            obstacles,
            screen_height,
            rng,
        }
    }

    /// Empty stream seeded for reproducible gap placement
    pub fn seeded(screen_height: f32, seed: u64) -> Self {
        Self::new(screen_height, RngState::new(seed).to_rng())
    }

    /// Live obstacles, leftmost first
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Current random source state (carried into the next session)
    pub fn rng(&self) -> &Pcg32 {
        &self.rng
    }

    /// Scroll every obstacle, then drop those whose right edge left the screen
    pub fn advance(&mut self, scroll_speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.step(scroll_speed);
        }
        let before = self.obstacles.len();
        self.obstacles.retain(|o| !o.is_off_screen());
        let retired = before - self.obstacles.len();
        if retired > 0 {
            log::debug!("Retired {} obstacle(s), {} live", retired, self.obstacles.len());
        }
    }

    /// Append one obstacle at the spawn edge when below the live cap and the
    /// newest obstacle has cleared `SPAWN_SPACING`. Returns true if spawned.
    pub fn maybe_spawn(&mut self, screen_width: f32, gap_size: f32, level: u32) -> bool {
        if self.obstacles.len() >= MAX_OBSTACLES {
            return false;
        }
        let has_room = self
            .obstacles
            .last()
            .map(|last| last.x < screen_width - SPAWN_SPACING)
            .unwrap_or(true);
        if !has_room {
            return false;
        }

        let obstacle = Obstacle::new(screen_width, gap_size, level, self.screen_height, &mut self.rng);
        log::debug!("Spawned obstacle at x={} gap_top={}", obstacle.x, obstacle.gap_top);
        self.obstacles.push(obstacle);
        true
    }

    /// Replace the stream with `count` fresh obstacles spaced from the spawn edge
    pub fn reset_with(&mut self, screen_width: f32, gap_size: f32, level: u32, count: usize) {
        self.obstacles.clear();
        for i in 0..count {
            let x = screen_width + i as f32 * SPAWN_SPACING;
            let obstacle = Obstacle::new(x, gap_size, level, self.screen_height, &mut self.rng);
            self.obstacles.push(obstacle);
        }
    }

    /// Whether any live obstacle hits the flyer
    pub fn detect_collision(&self, flyer: &Flyer) -> bool {
        self.obstacles.iter().any(|o| o.collides_with(flyer))
    }

    /// Mark newly passed obstacles and return how many there were
    pub fn consume_passes(&mut self, flyer_x: f32) -> u32 {
        let mut count = 0;
        for obstacle in &mut self.obstacles {
            if !obstacle.passed && obstacle.is_fully_passed(flyer_x) {
                obstacle.passed = true;
                count += 1;
            }
        }
        count
    }
}
