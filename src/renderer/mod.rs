//! Frame building for the presentation layer
//!
//! Turns a read-only [`Snapshot`] into a triangle list plus HUD text labels.
//! Nothing here feeds back into the simulation.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::sim::{ObstacleView, Snapshot};
use vertex::{colors, with_alpha};
pub use vertex::Vertex;

/// Relative text size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Normal,
    Big,
}

/// How a label's position is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    Center,
}

/// A piece of HUD text for whatever font backend draws it
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub text: String,
    /// Pixel position
    pub position: Vec2,
    pub anchor: Anchor,
    pub size: TextSize,
    pub color: [f32; 4],
    /// Draw a dark drop shadow first
    pub shadow: bool,
}

impl TextLabel {
    fn new(text: impl Into<String>, position: Vec2, anchor: Anchor, size: TextSize, color: [f32; 4]) -> Self {
        Self {
            text: text.into(),
            position,
            anchor,
            size,
            color,
            shadow: false,
        }
    }
}

/// One rendered frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Triangle list in normalized device coordinates
    pub vertices: Vec<Vertex>,
    pub labels: Vec<TextLabel>,
}

impl Frame {
    /// Vertex data ready for a GPU buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Label texts in draw order
    pub fn label_texts(&self) -> Vec<&str> {
        self.labels.iter().map(|l| l.text.as_str()).collect()
    }
}

/// Build the frame for a snapshot
pub fn build_frame(snapshot: &Snapshot) -> Frame {
    let screen = snapshot.screen_size;
    let mut vertices = Vec::new();

    // Sky
    let sky = colors::sky(snapshot.current_level);
    let darker = [
        (sky[0] - 50.0 / 255.0).max(0.0),
        (sky[1] - 50.0 / 255.0).max(0.0),
        (sky[2] - 50.0 / 255.0).max(0.0),
        1.0,
    ];
    vertices.extend(shapes::gradient_rect(Vec2::ZERO, screen, sky, darker));

    vertices.extend(ghost(snapshot));

    for obstacle in &snapshot.obstacles {
        vertices.extend(obstacle_shapes(obstacle, screen.y, snapshot.tick));
    }

    let transition = snapshot.level_transition;
    if transition.active && transition.total_ticks > 0 {
        let alpha = transition.ticks_remaining as f32 / transition.total_ticks as f32;
        vertices.extend(shapes::rect(Vec2::ZERO, screen, with_alpha(colors::WHITE, alpha)));
    }
    if snapshot.game_over {
        vertices.extend(shapes::rect(Vec2::ZERO, screen, with_alpha(colors::BLACK, 0.5)));
    }

    for v in &mut vertices {
        v.position = to_ndc(Vec2::from(v.position), screen).to_array();
    }

    Frame {
        vertices,
        labels: hud_labels(snapshot),
    }
}

/// Pixel space (origin top-left, y down) to NDC (y up)
pub fn to_ndc(p: Vec2, screen: Vec2) -> Vec2 {
    Vec2::new(p.x / screen.x * 2.0 - 1.0, 1.0 - p.y / screen.y * 2.0)
}

/// Column colors (main, inner shade, highlight) by spawn level
fn obstacle_palette(level: u32, anim: f32) -> ([f32; 4], [f32; 4], [f32; 4]) {
    let c = |r: f32, g: f32, b: f32| [r / 255.0, g / 255.0, b / 255.0, 1.0];
    if level <= 2 {
        (c(0.0, 200.0, 0.0), c(0.0, 150.0, 0.0), c(100.0, 255.0, 100.0))
    } else if level == 3 {
        // Lightning flicker
        let flash = (anim * 3.0).sin().abs() * 50.0;
        (
            c(50.0 + flash, 50.0 + flash, 150.0 + flash),
            c(30.0 + flash, 30.0 + flash, 100.0 + flash),
            c(100.0 + flash, 100.0 + flash, 200.0 + flash),
        )
    } else {
        let pulse = (anim * 2.0).sin().abs() * 30.0;
        (
            c(100.0 + pulse, 0.0, 50.0 + pulse),
            c(80.0 + pulse, 0.0, 30.0 + pulse),
            c(150.0 + pulse, 50.0, 100.0 + pulse),
        )
    }
}

fn obstacle_shapes(o: &ObstacleView, screen_height: f32, tick: u64) -> Vec<Vertex> {
    const CAP_HEIGHT: f32 = 20.0;
    let (main, inner, highlight) = obstacle_palette(o.level, tick as f32 * 0.1);
    let gap_bottom = o.gap_top + o.gap_size;
    let mut v = Vec::new();

    for (top, height) in [(0.0, o.gap_top), (gap_bottom, screen_height - gap_bottom)] {
        v.extend(shapes::rect(Vec2::new(o.x, top), Vec2::new(o.width, height), main));
        v.extend(shapes::rect(
            Vec2::new(o.x + 5.0, top),
            Vec2::new(o.width - 10.0, height),
            inner,
        ));
        v.extend(shapes::rect(Vec2::new(o.x, top), Vec2::new(8.0, height), highlight));
    }

    let cap = Vec2::new(o.width + 10.0, CAP_HEIGHT);
    v.extend(shapes::rect(Vec2::new(o.x - 5.0, o.gap_top - CAP_HEIGHT), cap, highlight));
    v.extend(shapes::rect(Vec2::new(o.x - 5.0, gap_bottom), cap, highlight));
    v
}

fn ghost(snapshot: &Snapshot) -> Vec<Vertex> {
    let pos = snapshot.flyer_position;
    let size = snapshot.flyer_size;
    let center = pos + Vec2::splat(size / 2.0);
    let anim = snapshot.tick as f32 * 0.2;
    let mut v = Vec::new();

    let glow = 5.0 + 3.0 * anim.sin();
    v.extend(shapes::circle(center, size / 2.0 + glow, colors::GHOST_GLOW, 24));

    v.extend(shapes::circle(center, size / 2.0, colors::WHITE, 24));
    v.extend(shapes::circle(center - Vec2::splat(3.0), size / 2.0 - 5.0, colors::GHOST_SHADE, 24));

    let wave = anim.sin() * 3.0;
    let tail = [
        Vec2::new(pos.x, pos.y + size),
        Vec2::new(pos.x + size / 4.0, pos.y + size - 10.0 + wave),
        Vec2::new(pos.x + size / 2.0, pos.y + size + wave),
        Vec2::new(pos.x + 3.0 * size / 4.0, pos.y + size - 10.0 - wave),
        Vec2::new(pos.x + size, pos.y + size),
    ];
    v.extend(shapes::polygon(&tail, colors::WHITE));

    let eye_offset = (anim * 2.0).sin();
    for eye_x in [pos.x + size / 3.0, pos.x + 2.0 * size / 3.0] {
        let eye = Vec2::new(eye_x, pos.y + size / 3.0 + eye_offset);
        v.extend(shapes::circle(eye, 6.0, colors::BLACK, 12));
        v.extend(shapes::circle(eye + Vec2::new(2.0, -2.0), 2.0, colors::WHITE, 8));
    }
    v
}

fn hud_labels(snapshot: &Snapshot) -> Vec<TextLabel> {
    let screen = snapshot.screen_size;
    let mid = screen / 2.0;
    let mut labels = vec![
        TextLabel::new(
            format!("Score: {}", snapshot.score),
            Vec2::new(10.0, 10.0),
            Anchor::TopLeft,
            TextSize::Normal,
            colors::WHITE,
        ),
        TextLabel::new(
            format!("Level: {}", snapshot.current_level),
            Vec2::new(10.0, 50.0),
            Anchor::TopLeft,
            TextSize::Small,
            colors::WHITE,
        ),
    ];

    let name = &snapshot.level_name_display;
    if name.active {
        let mut label = TextLabel::new(
            name.level_name.clone(),
            Vec2::new(mid.x, 100.0),
            Anchor::Center,
            TextSize::Big,
            colors::GOLD,
        );
        label.shadow = true;
        labels.push(label);
    }

    let transition = snapshot.level_transition;
    if transition.active && transition.ticks_remaining * 2 > transition.total_ticks {
        labels.push(TextLabel::new("LEVEL UP!", mid, Anchor::Center, TextSize::Big, colors::GOLD));
    }

    if snapshot.game_over {
        labels.push(TextLabel::new(
            "GAME OVER",
            mid - Vec2::new(0.0, 50.0),
            Anchor::Center,
            TextSize::Big,
            colors::RED,
        ));
        labels.push(TextLabel::new(
            format!("Final Score: {}", snapshot.score),
            mid,
            Anchor::Center,
            TextSize::Normal,
            colors::WHITE,
        ));
        labels.push(TextLabel::new(
            "Press R to restart",
            mid + Vec2::new(0.0, 50.0),
            Anchor::Center,
            TextSize::Small,
            colors::WHITE,
        ));
    } else if !transition.active {
        labels.push(TextLabel::new(
            "Press SPACE to fly!",
            Vec2::new(10.0, screen.y - 30.0),
            Anchor::TopLeft,
            TextSize::Small,
            colors::WHITE,
        ));
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::SimulationEngine;

    fn snapshot() -> Snapshot {
        SimulationEngine::new(Settings::default()).snapshot()
    }

    #[test]
    fn test_ndc_corners() {
        let screen = Vec2::new(800.0, 600.0);
        assert_eq!(to_ndc(Vec2::ZERO, screen), Vec2::new(-1.0, 1.0));
        assert_eq!(to_ndc(screen, screen), Vec2::new(1.0, -1.0));
        assert_eq!(to_ndc(screen / 2.0, screen), Vec2::ZERO);
    }

    #[test]
    fn test_active_frame_labels() {
        let frame = build_frame(&snapshot());
        assert_eq!(
            frame.label_texts(),
            vec!["Score: 0", "Level: 1", "Press SPACE to fly!"]
        );
        assert!(!frame.vertices.is_empty());
    }

    #[test]
    fn test_vertex_bytes_match_count() {
        let frame = build_frame(&snapshot());
        assert_eq!(frame.vertex_bytes().len(), frame.vertices.len() * Vertex::STRIDE);
    }

    #[test]
    fn test_obstacle_split_around_gap() {
        let o = ObstacleView {
            x: 100.0,
            gap_top: 150.0,
            gap_size: 200.0,
            width: 60.0,
            level: 1,
        };
        let v = obstacle_shapes(&o, 600.0, 0);
        // Three rects per column, two columns, two caps
        assert_eq!(v.len(), 8 * 6);
        // No vertex lies strictly inside the gap
        let inside_gap = v
            .iter()
            .filter(|v| v.position[1] > 150.0 && v.position[1] < 350.0)
            .count();
        assert_eq!(inside_gap, 0);
    }

    #[test]
    fn test_storm_palette_flashes() {
        let (calm, _, _) = obstacle_palette(3, 0.0);
        let (bright, _, _) = obstacle_palette(3, 0.5);
        assert!(bright[0] > calm[0]);
        assert_eq!(obstacle_palette(1, 0.0), obstacle_palette(2, 3.0));
    }

    #[test]
    fn test_game_over_frame() {
        let mut snap = snapshot();
        snap.game_over = true;
        snap.score = 7;
        let frame = build_frame(&snap);
        let texts = frame.label_texts();
        assert!(texts.contains(&"GAME OVER"));
        assert!(texts.contains(&"Final Score: 7"));
        assert!(texts.contains(&"Press R to restart"));
        assert!(!texts.contains(&"Press SPACE to fly!"));
    }

    #[test]
    fn test_level_up_banner_first_half_only() {
        let mut snap = snapshot();
        snap.level_transition = crate::sim::TransitionView {
            active: true,
            ticks_remaining: 100,
            total_ticks: 120,
        };
        snap.level_name_display.active = true;
        snap.level_name_display.level_name = "Windy Skies".to_string();

        let frame = build_frame(&snap);
        let texts = frame.label_texts();
        assert!(texts.contains(&"LEVEL UP!"));
        assert!(texts.contains(&"Windy Skies"));
        assert!(!texts.contains(&"Press SPACE to fly!"));

        snap.level_transition.ticks_remaining = 60;
        assert!(!build_frame(&snap).label_texts().contains(&"LEVEL UP!"));
    }
}
