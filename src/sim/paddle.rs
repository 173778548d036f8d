//! The player's paddle
//!
//! The paddle is an immovable rebound surface: the ball never pushes it.
//! Input moves it through a linear tween toward a target X.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::consts::*;

/// Directional key input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Linear tween of the paddle's X coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleMotion {
    pub from_x: f32,
    pub to_x: f32,
    pub duration: f32,
    pub elapsed: f32,
}

impl PaddleMotion {
    fn x_at(&self, elapsed: f32) -> f32 {
        if self.duration <= 0.0 {
            return self.to_x;
        }
        let t = (elapsed / self.duration).clamp(0.0, 1.0);
        self.from_x + (self.to_x - self.from_x) * t
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Active tween, if any
    pub motion: Option<PaddleMotion>,
}

impl Paddle {
    /// Paddle centered horizontally in a field of width `field_width`
    pub fn new(field_width: f32) -> Self {
        Self {
            pos: Vec2::new(field_width / 2.0, PADDLE_Y),
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            motion: None,
        }
    }

    pub fn half_width(&self) -> f32 {
        self.size.x / 2.0
    }

    /// Top edge (ball spawns resting on it)
    pub fn top(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Clamp a pointer target so the paddle stays a margin inside the field.
    ///
    /// Targets closer than half a paddle to either bound snap to
    /// `bound ± (half_width + margin)`; anything else passes through.
    pub fn clamp_target(&self, target_x: f32, min_x: f32, max_x: f32) -> f32 {
        let half = self.half_width();
        if target_x < min_x + half {
            min_x + half + BLOCK_MARGIN
        } else if target_x > max_x - half {
            max_x - half - BLOCK_MARGIN
        } else {
            target_x
        }
    }

    /// Start a tween toward the clamped pointer target. Returns the target.
    pub fn move_toward(&mut self, target_x: f32, min_x: f32, max_x: f32, duration: f32) -> f32 {
        let to_x = self.clamp_target(target_x, min_x, max_x);
        self.start_motion(to_x, duration);
        to_x
    }

    /// Move exactly one paddle width in `direction`.
    ///
    /// Unclamped unless `bounds` is given: stepping may carry the paddle
    /// past the field edge.
    pub fn step(&mut self, direction: Direction, duration: f32, bounds: Option<(f32, f32)>) -> f32 {
        let mut to_x = self.pos.x + direction.sign() * self.size.x;
        if let Some((min_x, max_x)) = bounds {
            let half = self.half_width();
            to_x = to_x.clamp(min_x + half + BLOCK_MARGIN, max_x - half - BLOCK_MARGIN);
        }
        self.start_motion(to_x, duration);
        to_x
    }

    fn start_motion(&mut self, to_x: f32, duration: f32) {
        self.motion = Some(PaddleMotion {
            from_x: self.pos.x,
            to_x,
            duration,
            elapsed: 0.0,
        });
    }

    /// Advance the active tween by `dt`
    pub fn advance(&mut self, dt: f32) {
        if let Some(motion) = &mut self.motion {
            motion.elapsed += dt;
            self.pos.x = motion.x_at(motion.elapsed);
            if motion.is_finished() {
                self.motion = None;
            }
        }
    }

    /// Snap back to the field center, cancelling any tween
    pub fn reset(&mut self, field_width: f32) {
        self.pos.x = field_width / 2.0;
        self.motion = None;
    }
}
