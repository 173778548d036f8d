//! Block Breaker - A minimal breakout arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (blocks, paddle, ball, collisions, session state)
//! - `scene`: Title / Playing / GameOver scene flow driven by session decisions
//! - `hud`: Text the presentation layer shows (title, life hearts, game over)
//! - `settings`: Data-driven game configuration

pub mod hud;
pub mod scene;
pub mod settings;
pub mod sim;

pub use scene::{Presenter, Scene, SceneDirector, SceneKind, TransitionDirection};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the accumulator accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions (origin bottom-left, y up)
    pub const FIELD_WIDTH: f32 = 640.0;
    pub const FIELD_HEIGHT: f32 = 480.0;

    /// Block grid defaults
    pub const BLOCK_MARGIN: f32 = 16.0;
    pub const BLOCK_HEIGHT: f32 = 16.0;
    pub const GRID_ROWS: u32 = 5;
    pub const GRID_COLS: u32 = 6;
    /// Largest grid that still leaves room above the paddle
    pub const MAX_GRID_ROWS: u32 = 8;
    pub const MAX_GRID_COLS: u32 = 16;
    /// Block life range (inclusive)
    pub const BLOCK_MIN_LIFE: u8 = 1;
    pub const BLOCK_MAX_LIFE: u8 = 5;
    /// Alpha contributed by each point of block life
    pub const BLOCK_INTENSITY_PER_LIFE: f32 = 0.2;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 70.0;
    pub const PADDLE_HEIGHT: f32 = 14.0;
    pub const PADDLE_Y: f32 = 40.0;
    /// Pointer move tween duration (seconds)
    pub const PADDLE_POINTER_SECS: f32 = 0.5;
    /// Directional step tween duration (seconds)
    pub const PADDLE_STEP_SECS: f32 = 1.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 6.0;
    pub const BALL_START_VX: f32 = 50.0;
    pub const BALL_START_VY: f32 = 120.0;
    /// Seconds between speed-ups
    pub const BALL_SPEED_UP_SECS: f32 = 5.0;
    /// Multiplicative speed-up per interval (no cap)
    pub const BALL_SPEED_UP_FACTOR: f32 = 1.001;

    /// Life points
    pub const MAX_LIFE_POINTS: u8 = 4;
    pub const FIRST_STAGE: u32 = 1;
}

/// Axis-aligned rectangle (center + half extents)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Closest point inside the rectangle to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }
}

/// Reflect a velocity about a unit surface normal
#[inline]
pub fn reflect(vel: Vec2, normal: Vec2) -> Vec2 {
    vel - 2.0 * vel.dot(normal) * normal
}
