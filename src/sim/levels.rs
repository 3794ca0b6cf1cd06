//! Level table: per-level physics and difficulty parameters
//!
//! Levels are 1-based. Lookups past the last level clamp to the hardest entry.

use serde::{Deserialize, Serialize};

use crate::consts::REFERENCE_TICK_RATE;

/// Physics and difficulty for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelEntry {
    /// Display label (passed through to the renderer)
    pub name: String,
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative = up)
    pub jump_impulse: f32,
    /// Pixels obstacles move left per tick
    pub scroll_speed: f32,
    /// Vertical clearance of each gap
    pub gap_size: f32,
}

impl LevelEntry {
    pub fn new(name: &str, gravity: f32, jump_impulse: f32, scroll_speed: f32, gap_size: f32) -> Self {
        Self {
            name: name.to_string(),
            gravity,
            jump_impulse,
            scroll_speed,
            gap_size,
        }
    }
}

/// Ordered table of levels 1..=N
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelTable {
    levels: Vec<LevelEntry>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl LevelTable {
    /// Build a table from explicit entries (index 0 is level 1)
    pub fn new(levels: Vec<LevelEntry>) -> Self {
        Self { levels }
    }

    /// The five stock levels, tuned for 60 ticks/s
    pub fn standard() -> Self {
        Self::new(vec![
            LevelEntry::new("Peaceful Clouds", 0.8, -12.0, 3.0, 220.0),
            LevelEntry::new("Windy Skies", 0.9, -13.0, 4.0, 200.0),
            LevelEntry::new("Storm Clouds", 1.0, -14.0, 5.0, 180.0),
            LevelEntry::new("Lightning Zone", 1.1, -15.0, 6.0, 160.0),
            LevelEntry::new("Nightmare Realm", 1.2, -16.0, 7.0, 140.0),
        ])
    }

    /// Highest level index
    pub fn max_level(&self) -> u32 {
        self.levels.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Entries in level order
    pub fn entries(&self) -> &[LevelEntry] {
        &self.levels
    }

    /// Look up a level. Indices below 1 map to level 1, indices past the end
    /// map to the last level.
    ///
    /// The table must not be empty; `Settings::validate` guarantees this for
    /// every table that reaches the engine.
    pub fn get(&self, level: u32) -> &LevelEntry {
        let last = self.levels.len().saturating_sub(1);
        let idx = (level.max(1) as usize - 1).min(last);
        &self.levels[idx]
    }

    /// Rescale per-tick constants from the 60 Hz reference rate to `tick_rate`.
    ///
    /// Velocities scale with the tick period, accelerations with its square,
    /// so trajectories in pixels per second stay the same.
    pub fn retimed(&self, tick_rate: u32) -> Self {
        if tick_rate == REFERENCE_TICK_RATE || tick_rate == 0 {
            return self.clone();
        }
        let k = REFERENCE_TICK_RATE as f32 / tick_rate as f32;
        Self::new(
            self.levels
                .iter()
                .map(|l| LevelEntry {
                    name: l.name.clone(),
                    gravity: l.gravity * k * k,
                    jump_impulse: l.jump_impulse * k,
                    scroll_speed: l.scroll_speed * k,
                    gap_size: l.gap_size,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_clamps_past_last_level() {
        let table = LevelTable::standard();
        assert_eq!(table.max_level(), 5);
        assert_eq!(table.get(6), table.get(5));
        assert_eq!(table.get(100), table.get(5));
        assert_eq!(table.get(0), table.get(1));
    }

    #[test]
    fn test_difficulty_is_monotonic() {
        let table = LevelTable::standard();
        for pair in table.entries().windows(2) {
            let (easy, hard) = (&pair[0], &pair[1]);
            assert!(hard.gravity > easy.gravity);
            assert!(hard.jump_impulse.abs() > easy.jump_impulse.abs());
            assert!(hard.scroll_speed > easy.scroll_speed);
            assert!(hard.gap_size < easy.gap_size);
        }
    }

    #[test]
    fn test_retimed_keeps_reference_rate() {
        let table = LevelTable::standard();
        assert_eq!(table.retimed(60), table);
    }

    #[test]
    fn test_retimed_doubles_rate() {
        let table = LevelTable::standard().retimed(120);
        let level = table.get(1);
        assert!((level.gravity - 0.2).abs() < 1e-6);
        assert!((level.jump_impulse + 6.0).abs() < 1e-6);
        assert!((level.scroll_speed - 1.5).abs() < 1e-6);
        assert_eq!(level.gap_size, 220.0);
        assert_eq!(level.name, "Peaceful Clouds");
    }

    #[test]
    fn test_table_json_is_a_plain_list() {
        let json = serde_json::to_string(&LevelTable::standard()).unwrap();
        assert!(json.starts_with('['));
        let back: LevelTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(3).name, "Storm Clouds");
    }
}
