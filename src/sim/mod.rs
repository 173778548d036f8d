//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by block ID)
//! - No rendering or platform dependencies

pub mod ball;
pub mod block;
pub mod collision;
pub mod paddle;
pub mod physics;
pub mod session;

pub use ball::{Ball, SpeedUpTimer};
pub use block::{Block, BlockGrid, BlockId, HitResult};
pub use collision::{BodyKind, Contact, ContactEffect, resolve};
pub use paddle::{Direction, Paddle, PaddleMotion};
pub use physics::Physics;
pub use session::{Session, SessionConfig, SessionState, TickInput};
