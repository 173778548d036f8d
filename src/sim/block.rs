//! Destructible blocks and the stage grid layout

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::consts::*;

/// Stable block identifier (unique within a session)
pub type BlockId = u32;

/// Outcome of a single ball hit on a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitResult {
    pub remaining_life: u8,
    /// True once life has reached zero; the owner removes the block
    pub destroyed: bool,
}

/// A block entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    life: u8,
    /// Alpha derived from life (life * 0.2, clamped to [0, 1])
    intensity: f32,
    pub bounds: Rect,
}

impl Block {
    /// Create a block with life drawn uniformly from 1..=5
    pub fn new<R: Rng + ?Sized>(width: f32, height: f32, rng: &mut R) -> Self {
        let life = rng.random_range(BLOCK_MIN_LIFE..=BLOCK_MAX_LIFE);
        Self::with_life(life, width, height)
    }

    /// Create a block with a fixed life (tests, scripted layouts)
    pub fn with_life(life: u8, width: f32, height: f32) -> Self {
        Self {
            id: 0,
            life,
            intensity: intensity_for(life),
            bounds: Rect::new(Vec2::ZERO, Vec2::new(width, height)),
        }
    }

    pub fn life(&self) -> u8 {
        self.life
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn is_destroyed(&self) -> bool {
        self.life == 0
    }

    /// Take one point of damage. Hits on a dead block are no-ops that keep
    /// reporting `destroyed`.
    pub fn apply_hit(&mut self) -> HitResult {
        if self.life > 0 {
            self.life -= 1;
            self.intensity = intensity_for(self.life);
        }
        HitResult {
            remaining_life: self.life,
            destroyed: self.life == 0,
        }
    }
}

fn intensity_for(life: u8) -> f32 {
    (life as f32 * BLOCK_INTENSITY_PER_LIFE).clamp(0.0, 1.0)
}

/// Rows × cols grid of equally sized blocks filled from the top of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockGrid {
    pub rows: u32,
    pub cols: u32,
}

impl Default for BlockGrid {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
        }
    }
}

impl BlockGrid {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    pub fn len(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of one block so that `cols` blocks and `cols + 1` margins span the field
    pub fn block_width(&self, field: Vec2) -> f32 {
        if self.cols == 0 {
            return 0.0;
        }
        let cols = self.cols as f32;
        (field.x - (cols + 1.0) * BLOCK_MARGIN) / cols
    }

    /// Build the stage's blocks, ids assigned from `first_id` in row-major order
    pub fn build<R: Rng + ?Sized>(
        &self,
        field: Vec2,
        first_id: BlockId,
        rng: &mut R,
    ) -> Vec<Block> {
        let width = self.block_width(field);
        let mut blocks = Vec::with_capacity(self.len());
        let mut id = first_id;

        let mut y = field.y - BLOCK_MARGIN - BLOCK_HEIGHT / 2.0;
        for _ in 0..self.rows {
            let mut x = BLOCK_MARGIN + width / 2.0;
            for _ in 0..self.cols {
                let mut block = Block::new(width, BLOCK_HEIGHT, rng);
                block.id = id;
                block.bounds.center = Vec2::new(x, y);
                blocks.push(block);
                id += 1;
                x += width + BLOCK_MARGIN;
            }
            y -= BLOCK_HEIGHT + BLOCK_MARGIN;
        }
        blocks
    }
}
