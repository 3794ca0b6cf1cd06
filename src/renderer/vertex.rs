//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride of one vertex in an upload buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// RGBA from 0-255 channels
pub const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Same color with a new alpha
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const WHITE: [f32; 4] = rgb(255, 255, 255);
    pub const BLACK: [f32; 4] = rgb(0, 0, 0);
    pub const GOLD: [f32; 4] = rgb(255, 215, 0);
    pub const RED: [f32; 4] = rgb(255, 0, 0);
    pub const GHOST_SHADE: [f32; 4] = rgb(240, 240, 255);
    pub const GHOST_GLOW: [f32; 4] = [100.0 / 255.0, 100.0 / 255.0, 1.0, 30.0 / 255.0];

    /// Sky color per level (1-based, clamped)
    pub const SKY: [[f32; 4]; 5] = [
        rgb(135, 206, 250),
        rgb(100, 150, 255),
        rgb(70, 100, 200),
        rgb(50, 50, 150),
        rgb(30, 20, 100),
    ];

    pub fn sky(level: u32) -> [f32; 4] {
        let idx = (level.max(1) as usize - 1).min(SKY.len() - 1);
        SKY[idx]
    }
}
