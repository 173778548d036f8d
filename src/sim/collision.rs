//! Contact classification and dispatch
//!
//! Physics bodies carry a [`BodyKind`] tag. The resolver looks at an
//! unordered pair of tags and decides whether the contact damages a block.

use serde::{Deserialize, Serialize};

use super::block::BlockId;

/// Category tag of a physics body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    Block(BlockId),
    Paddle,
    Ball,
    Wall,
}

impl BodyKind {
    /// Category rank, used only to normalize pair order
    pub fn category(&self) -> u32 {
        match self {
            BodyKind::Block(_) => 1,
            BodyKind::Ball => 2,
            BodyKind::Paddle => 4,
            BodyKind::Wall => 8,
        }
    }
}

/// Contact-begin notification between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub a: BodyKind,
    pub b: BodyKind,
}

impl Contact {
    pub fn new(a: BodyKind, b: BodyKind) -> Self {
        Self { a, b }
    }

    /// The pair with the lower category first
    pub fn normalized(&self) -> (BodyKind, BodyKind) {
        if self.a.category() <= self.b.category() {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }
}

/// What a contact means for the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEffect {
    /// Ball struck a block: apply one hit
    DamageBlock(BlockId),
    /// Handled entirely by the elastic physics response
    None,
}

/// Decide the effect of a contact. Symmetric in `a`/`b`.
pub fn resolve(contact: &Contact) -> ContactEffect {
    match contact.normalized() {
        (BodyKind::Block(id), BodyKind::Ball) => ContactEffect::DamageBlock(id),
        (BodyKind::Block(_), BodyKind::Block(_))
        | (BodyKind::Block(_), BodyKind::Paddle | BodyKind::Wall)
        | (BodyKind::Ball, _)
        | (BodyKind::Paddle | BodyKind::Wall, _) => ContactEffect::None,
    }
}
