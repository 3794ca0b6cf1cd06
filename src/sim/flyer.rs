//! The player-controlled ghost

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FLYER_SIZE, FLYER_X};

/// Falling/jumping entity with a square hitbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flyer {
    /// Fixed horizontal position (left edge)
    pub x: f32,
    /// Top edge, in `[0, screen_height - size]`
    pub y: f32,
    /// Vertical velocity (pixels/tick, positive = down)
    pub vel_y: f32,
    /// Hitbox edge length
    pub size: f32,
    /// Floor used for clamping
    screen_height: f32,
}

impl Flyer {
    pub fn new(x: f32, y: f32, size: f32, screen_height: f32) -> Self {
        Self {
            x,
            y,
            vel_y: 0.0,
            size,
            screen_height,
        }
    }

    /// Stock flyer for a viewport: fixed column, vertically centered
    pub fn spawn(screen_height: f32) -> Self {
        Self::new(FLYER_X, (screen_height / 2.0).floor(), FLYER_SIZE, screen_height)
    }

    /// Integrate one tick of gravity, then clamp to the viewport.
    ///
    /// Hitting either bound zeroes the velocity.
    pub fn step(&mut self, gravity: f32) {
        self.vel_y += gravity;
        self.y += self.vel_y;

        if self.y < 0.0 {
            self.y = 0.0;
            self.vel_y = 0.0;
        }
        let floor = self.max_y();
        if self.y > floor {
            self.y = floor;
            self.vel_y = 0.0;
        }
    }

    /// Overwrite vertical velocity with the jump impulse
    pub fn jump(&mut self, jump_impulse: f32) {
        self.vel_y = jump_impulse;
    }

    /// Lowest allowed top edge
    #[inline]
    pub fn max_y(&self) -> f32 {
        self.screen_height - self.size
    }

    /// Top-left corner
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
