//! A single gap obstacle: a top and bottom column with clearance between

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::flyer::Flyer;
use crate::consts::{GAP_MARGIN, OBSTACLE_WIDTH};

/// Paired top/bottom barrier scrolling right to left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Top of the clearance window (fixed at creation)
    pub gap_top: f32,
    /// Height of the clearance window
    pub gap_size: f32,
    pub width: f32,
    /// Set once when the trailing edge crosses the flyer
    pub passed: bool,
    /// Level active when spawned (presentation only)
    pub level: u32,
}

impl Obstacle {
    /// Spawn at `x` with a random gap placement in
    /// `[GAP_MARGIN, screen_height - gap_size - GAP_MARGIN]`.
    ///
    /// Callers guarantee `gap_size <= screen_height - 2 * GAP_MARGIN`.
    pub fn new<R: Rng>(x: f32, gap_size: f32, level: u32, screen_height: f32, rng: &mut R) -> Self {
        let lo = GAP_MARGIN as i32;
        let hi = ((screen_height - gap_size - GAP_MARGIN) as i32).max(lo);
        let gap_top = rng.random_range(lo..=hi) as f32;
        Self::with_gap(x, gap_top, gap_size, level)
    }

    /// Build with an explicit gap placement
    pub fn with_gap(x: f32, gap_top: f32, gap_size: f32, level: u32) -> Self {
        Self {
            x,
            gap_top,
            gap_size,
            width: OBSTACLE_WIDTH,
            passed: false,
            level,
        }
    }

    /// Scroll left
    pub fn step(&mut self, scroll_speed: f32) {
        self.x -= scroll_speed;
    }

    /// Right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom of the clearance window
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_size
    }

    /// Horizontal overlap and the flyer not fully inside the gap.
    ///
    /// Touching a gap edge from outside counts as a hit; there is no margin.
    pub fn collides_with(&self, flyer: &Flyer) -> bool {
        let overlaps_x = flyer.x < self.right() && flyer.x + flyer.size > self.x;
        overlaps_x && (flyer.y < self.gap_top || flyer.y + flyer.size > self.gap_bottom())
    }

    /// Trailing edge is strictly left of `flyer_x`
    pub fn is_fully_passed(&self, flyer_x: f32) -> bool {
        self.right() < flyer_x
    }

    /// Right edge has left the screen
    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn flyer_at(y: f32) -> Flyer {
        Flyer::new(100.0, y, 40.0, 600.0)
    }

    #[test]
    fn test_gap_drawn_inside_margins() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let obstacle = Obstacle::new(800.0, 220.0, 1, 600.0, &mut rng);
            assert!(obstacle.gap_top >= 100.0);
            assert!(obstacle.gap_top <= 280.0);
            assert_eq!(obstacle.gap_top.fract(), 0.0);
            assert_eq!(obstacle.width, OBSTACLE_WIDTH);
            assert!(!obstacle.passed);
        }
    }

    #[test]
    fn test_gap_with_no_slack() {
        let mut rng = Pcg32::seed_from_u64(1);
        let obstacle = Obstacle::new(800.0, 400.0, 1, 600.0, &mut rng);
        assert_eq!(obstacle.gap_top, 100.0);
    }

    #[test]
    fn test_step_scrolls_left() {
        let mut obstacle = Obstacle::with_gap(800.0, 200.0, 200.0, 1);
        obstacle.step(3.0);
        obstacle.step(3.0);
        assert_eq!(obstacle.x, 794.0);
        assert_eq!(obstacle.gap_top, 200.0);
    }

    #[test]
    fn test_collision_edges() {
        // Horizontally overlapping the flyer column
        let obstacle = Obstacle::with_gap(90.0, 100.0, 200.0, 1);

        assert!(obstacle.collides_with(&flyer_at(59.0)), "fully above gap");
        assert!(obstacle.collides_with(&flyer_at(99.0)), "top edge pokes above gap");
        assert!(!obstacle.collides_with(&flyer_at(100.0)), "flush with gap top");
        assert!(!obstacle.collides_with(&flyer_at(180.0)));
        assert!(!obstacle.collides_with(&flyer_at(220.0)));
        assert!(!obstacle.collides_with(&flyer_at(260.0)), "flush with gap bottom");
        assert!(obstacle.collides_with(&flyer_at(261.0)), "bottom edge pokes below gap");
    }

    #[test]
    fn test_no_collision_without_horizontal_overlap() {
        // Flyer spans [100, 140)
        let ahead = Obstacle::with_gap(140.0, 100.0, 200.0, 1);
        let behind = Obstacle::with_gap(40.0, 100.0, 200.0, 1);
        assert!(!ahead.collides_with(&flyer_at(0.0)));
        assert!(!behind.collides_with(&flyer_at(0.0)));

        let touching = Obstacle::with_gap(139.0, 100.0, 200.0, 1);
        assert!(touching.collides_with(&flyer_at(0.0)));
    }

    #[test]
    fn test_fully_passed_is_strict() {
        let mut obstacle = Obstacle::with_gap(40.0, 100.0, 200.0, 1);
        assert!(!obstacle.is_fully_passed(100.0));
        obstacle.step(0.5);
        assert!(obstacle.is_fully_passed(100.0));
    }

    #[test]
    fn test_off_screen_is_strict() {
        let mut obstacle = Obstacle::with_gap(-60.0, 100.0, 200.0, 1);
        assert!(!obstacle.is_off_screen());
        obstacle.step(1.0);
        assert!(obstacle.is_off_screen());
    }
}
