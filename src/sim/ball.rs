//! The ball and its periodic speed-up

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::paddle::Paddle;
use crate::consts::*;

/// A ball entity
///
/// Bounces are perfectly elastic and there is no gravity or damping, so
/// speed only changes through the [`SpeedUpTimer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// Ball resting on top of the paddle, moving with the launch velocity
    pub fn new(paddle: &Paddle) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
        };
        ball.reset(paddle);
        ball
    }

    /// Launch position: directly above the paddle center
    pub fn start_position(paddle: &Paddle, radius: f32) -> Vec2 {
        Vec2::new(paddle.pos.x, paddle.top() + radius)
    }

    pub fn start_velocity() -> Vec2 {
        Vec2::new(BALL_START_VX, BALL_START_VY)
    }

    /// Put the ball back at its launch position and velocity
    pub fn reset(&mut self, paddle: &Paddle) {
        self.pos = Self::start_position(paddle, self.radius);
        self.vel = Self::start_velocity();
    }

    /// Back to the launch position after a lost life, keeping any speed-ups
    /// already earned. Direction returns to the launch direction.
    pub fn respawn(&mut self, paddle: &Paddle) {
        let speed = self.speed().max(Self::start_velocity().length());
        self.pos = Self::start_position(paddle, self.radius);
        self.vel = Self::start_velocity().normalize() * speed;
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Below the near-floor threshold (twice the radius)
    pub fn is_lost(&self) -> bool {
        self.pos.y < 2.0 * self.radius
    }
}

/// Scales ball velocity by a fixed factor every `interval` seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedUpTimer {
    pub interval: f32,
    pub factor: f32,
    elapsed: f32,
}

impl Default for SpeedUpTimer {
    fn default() -> Self {
        Self::new(BALL_SPEED_UP_SECS, BALL_SPEED_UP_FACTOR)
    }
}

impl SpeedUpTimer {
    pub fn new(interval: f32, factor: f32) -> Self {
        Self {
            interval,
            factor,
            elapsed: 0.0,
        }
    }

    /// Advance the timer and apply any due speed-ups. Returns how many fired.
    pub fn advance(&mut self, dt: f32, vel: &mut Vec2) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            *vel *= self.factor;
            fired += 1;
        }
        fired
    }
}
