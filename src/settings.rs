//! Game settings
//!
//! Stored as JSON next to the binary (or wherever the caller points).
//! Missing or unreadable files fall back to defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{BlockGrid, SessionConfig};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed for reproducible block layouts
    pub seed: u64,

    // === Session ===
    /// Life points at the start of a run (1 - 4)
    pub initial_life_points: u8,
    /// Block grid rows
    pub grid_rows: u32,
    /// Block grid columns
    pub grid_cols: u32,

    // === Paddle ===
    /// Pointer move tween duration (seconds)
    pub pointer_move_secs: f32,
    /// Directional step tween duration (seconds)
    pub step_move_secs: f32,
    /// Keep directional steps inside the field
    pub clamp_paddle_steps: bool,

    // === Ball ===
    /// Seconds between ball speed-ups
    pub speed_up_interval_secs: f32,
    /// Velocity multiplier per speed-up
    pub speed_up_factor: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,

            initial_life_points: MAX_LIFE_POINTS,
            grid_rows: GRID_ROWS,
            grid_cols: GRID_COLS,

            pointer_move_secs: PADDLE_POINTER_SECS,
            step_move_secs: PADDLE_STEP_SECS,
            clamp_paddle_steps: false,

            speed_up_interval_secs: BALL_SPEED_UP_SECS,
            speed_up_factor: BALL_SPEED_UP_FACTOR,
        }
    }
}

impl Settings {
    /// Starting life points, clamped to 1..=4
    pub fn effective_life_points(&self) -> u8 {
        self.initial_life_points.clamp(1, MAX_LIFE_POINTS)
    }

    /// Block grid, clamped so every stage has at least one block and fits the field
    pub fn effective_grid(&self) -> BlockGrid {
        BlockGrid::new(
            self.grid_rows.clamp(1, MAX_GRID_ROWS),
            self.grid_cols.clamp(1, MAX_GRID_COLS),
        )
    }

    /// Config for the first stage of a new run
    pub fn first_session(&self) -> SessionConfig {
        SessionConfig {
            life_points: self.effective_life_points(),
            stage: FIRST_STAGE,
            grid: self.effective_grid(),
            field: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
            pointer_move_secs: self.pointer_move_secs.max(0.0),
            step_move_secs: self.step_move_secs.max(0.0),
            speed_up_interval_secs: self.speed_up_interval_secs,
            // Speed-ups never slow the ball down
            speed_up_factor: self.speed_up_factor.max(1.0),
            clamp_paddle_steps: self.clamp_paddle_steps,
        }
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings {}: {}", path.display(), e),
            },
            Err(_) => log::info!("No settings at {}", path.display()),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Failed to save settings to {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Failed to serialize settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_life_points_clamped() {
        let mut settings = Settings::default();
        settings.initial_life_points = 9;
        assert_eq!(settings.first_session().life_points, 4);
        settings.initial_life_points = 0;
        assert_eq!(settings.first_session().life_points, 1);
    }

    #[test]
    fn test_grid_clamped() {
        let empty = Settings {
            grid_rows: 0,
            grid_cols: 0,
            ..Default::default()
        };
        assert_eq!(empty.first_session().grid, BlockGrid::new(1, 1));

        let huge = Settings {
            grid_rows: 70_000,
            grid_cols: 70_000,
            ..Default::default()
        };
        let grid = huge.first_session().grid;
        assert_eq!(grid, BlockGrid::new(MAX_GRID_ROWS, MAX_GRID_COLS));
        assert_eq!(grid.len(), (MAX_GRID_ROWS * MAX_GRID_COLS) as usize);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "seed": 7, "grid_rows": 4, "grid_cols": 8 }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.first_session().grid.len(), 32);
        assert_eq!(settings.initial_life_points, MAX_LIFE_POINTS);
    }

    #[test]
    fn test_save_then_load() {
        let name = format!("block_breaker_settings_{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        let settings = Settings {
            seed: 99,
            clamp_paddle_steps: true,
            ..Default::default()
        };
        settings.save(&path);
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load("/nonexistent/block_breaker.json");
        assert_eq!(settings, Settings::default());
    }
}
