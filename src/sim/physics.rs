//! Reference physics for the playfield
//!
//! Stands in for a host engine's rigid-body world: the ball is the only
//! dynamic body, everything else (walls, paddle, blocks) is static. Bounces
//! are perfectly elastic with zero friction and no gravity. The floor is
//! open so a missed ball keeps falling.
//!
//! Each step is split into substeps so the ball never travels more than
//! half its radius at once, which keeps it from tunneling through thin
//! blocks at high speed. Only contact *begin* events are reported.

use glam::Vec2;

use super::ball::Ball;
use super::block::Block;
use super::collision::{BodyKind, Contact};
use super::paddle::Paddle;
use crate::{Rect, reflect};

/// Maximum travel per substep, as a fraction of ball radius
const MAX_TRAVEL_FRACTION: f32 = 0.5;
/// Hard cap on substeps per step
const MAX_PHYSICS_SUBSTEPS: u32 = 256;

/// Result of a circle vs shape overlap test
#[derive(Debug, Clone, Copy)]
struct Overlap {
    /// Unit normal pointing from the surface toward the ball center
    normal: Vec2,
    /// Penetration depth (for position correction)
    penetration: f32,
}

#[derive(Debug, Clone)]
pub struct Physics {
    field: Vec2,
    /// Bodies overlapping the ball at the end of the last substep
    touching: Vec<BodyKind>,
}

impl Physics {
    pub fn new(field: Vec2) -> Self {
        Self {
            field,
            touching: Vec::new(),
        }
    }

    pub fn field(&self) -> Vec2 {
        self.field
    }

    /// Forget contact history (after the ball is teleported)
    pub fn clear_contacts(&mut self) {
        self.touching.clear();
    }

    /// Split `dt` so the ball never moves more than half its radius at once.
    /// Returns the substep count and the substep length.
    pub fn substeps(&self, ball: &Ball, dt: f32) -> (u32, f32) {
        let travel = ball.vel.length() * dt;
        let max_travel = (ball.radius * MAX_TRAVEL_FRACTION).max(f32::EPSILON);
        let count = ((travel / max_travel).ceil() as u32).clamp(1, MAX_PHYSICS_SUBSTEPS);
        (count, dt / count as f32)
    }

    /// Integrate the ball over one substep and return the contacts that began.
    ///
    /// Callers apply the contacts before the next substep so a destroyed
    /// block stops colliding at once.
    pub fn substep(
        &mut self,
        ball: &mut Ball,
        paddle: &Paddle,
        blocks: &[Block],
        h: f32,
    ) -> Vec<Contact> {
        ball.pos += ball.vel * h;
        let now = self.resolve_overlaps(ball, paddle, blocks);

        let contacts = now
            .iter()
            .filter(|&body| !self.touching.contains(body))
            .map(|body| Contact::new(BodyKind::Ball, *body))
            .collect();
        self.touching = now;
        contacts
    }

    /// Integrate the ball over `dt` against a fixed set of blocks
    pub fn step(
        &mut self,
        ball: &mut Ball,
        paddle: &Paddle,
        blocks: &[Block],
        dt: f32,
    ) -> Vec<Contact> {
        let (count, h) = self.substeps(ball, dt);
        let mut contacts = Vec::new();
        for _ in 0..count {
            contacts.extend(self.substep(ball, paddle, blocks, h));
        }
        contacts
    }

    /// Push the ball out of everything it overlaps and reflect its velocity
    fn resolve_overlaps(
        &self,
        ball: &mut Ball,
        paddle: &Paddle,
        blocks: &[Block],
    ) -> Vec<BodyKind> {
        let mut hits: Vec<(BodyKind, Overlap)> = Vec::new();

        for overlap in self.wall_overlaps(ball) {
            hits.push((BodyKind::Wall, overlap));
        }
        if let Some(overlap) = circle_rect_overlap(ball.pos, ball.radius, &paddle.bounds()) {
            hits.push((BodyKind::Paddle, overlap));
        }
        for block in blocks {
            if let Some(overlap) = circle_rect_overlap(ball.pos, ball.radius, &block.bounds) {
                hits.push((BodyKind::Block(block.id), overlap));
            }
        }

        let mut bodies = Vec::with_capacity(hits.len());
        for (body, overlap) in hits {
            // Reflect only while approaching so two faces sharing a normal
            // don't cancel each other out
            if ball.vel.dot(overlap.normal) < 0.0 {
                ball.vel = reflect(ball.vel, overlap.normal);
            }
            ball.pos += overlap.normal * overlap.penetration;
            if !bodies.contains(&body) {
                bodies.push(body);
            }
        }
        bodies
    }

    /// Left, right and top edges of the field
    fn wall_overlaps(&self, ball: &Ball) -> Vec<Overlap> {
        let mut overlaps = Vec::new();
        let r = ball.radius;
        if ball.pos.x - r < 0.0 {
            overlaps.push(Overlap {
                normal: Vec2::X,
                penetration: r - ball.pos.x,
            });
        }
        if ball.pos.x + r > self.field.x {
            overlaps.push(Overlap {
                normal: Vec2::NEG_X,
                penetration: ball.pos.x + r - self.field.x,
            });
        }
        if ball.pos.y + r > self.field.y {
            overlaps.push(Overlap {
                normal: Vec2::NEG_Y,
                penetration: ball.pos.y + r - self.field.y,
            });
        }
        overlaps
    }
}

/// Circle vs axis-aligned rectangle
fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> Option<Overlap> {
    let closest = rect.closest_point(center);
    let delta = center - closest;
    let dist_sq = delta.length_squared();
    if dist_sq > radius * radius {
        return None;
    }

    let dist = dist_sq.sqrt();
    if dist > 1e-4 {
        return Some(Overlap {
            normal: delta / dist,
            penetration: radius - dist,
        });
    }

    // Center is inside the rectangle: exit through the nearest face
    let min = rect.min();
    let max = rect.max();
    let faces = [
        (center.x - min.x, Vec2::NEG_X),
        (max.x - center.x, Vec2::X),
        (center.y - min.y, Vec2::NEG_Y),
        (max.y - center.y, Vec2::Y),
    ];
    let (depth, normal) = faces
        .into_iter()
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or((0.0, Vec2::Y));
    Some(Overlap {
        normal,
        penetration: depth + radius,
    })
}
