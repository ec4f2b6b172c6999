//! Ship classes, identities and health.

use core::fmt;

use crate::common::BoardError;
use crate::config::{MAX_SHIP_SIZE, MIN_SHIP_SIZE, SHIPS};
use crate::position::Position;

/// Orientation of a ship on the board. Horizontal ships grow towards higher
/// columns, vertical ships towards higher rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The `index`-th cell of a ship starting at `start`. May be off-board.
    pub fn cell(self, start: Position, index: usize) -> Position {
        match self {
            Orientation::Horizontal => Position::new(start.row, start.col.saturating_add(index)),
            Orientation::Vertical => Position::new(start.row.saturating_add(index), start.col),
        }
    }
}

/// Class of ship: name and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipClass {
    name: &'static str,
    size: u8,
}

impl ShipClass {
    pub const fn new(name: &'static str, size: u8) -> Self {
        Self { name, size }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn size(&self) -> u8 {
        self.size
    }
}

/// Stable identity of a ship within its fleet. Cells refer to ships by id,
/// so "same ship" is id equality and survives serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub u32);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A ship with a fixed size and a health pool that shots deplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    id: ShipId,
    size: u8,
    health: u8,
    class: usize,
}

impl Ship {
    /// Create an undamaged ship. Fails if `size` is outside the legal range.
    pub fn new(id: ShipId, size: u8) -> Result<Self, BoardError> {
        if !(MIN_SHIP_SIZE..=MAX_SHIP_SIZE).contains(&size) {
            return Err(BoardError::InvalidShipSize(size));
        }
        let class = SHIPS.iter().position(|c| c.size() == size).unwrap_or(0);
        Ok(Ship {
            id,
            size,
            health: size,
            class,
        })
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn is_sunk(&self) -> bool {
        self.health == 0
    }

    pub fn name(&self) -> &'static str {
        SHIPS[self.class].name()
    }

    pub(crate) fn set_class(&mut self, class: usize) {
        self.class = class;
    }

    pub(crate) fn class_index(&self) -> usize {
        self.class
    }

    /// Take one point of damage. Returns `true` if this hit sank the ship.
    pub fn hit(&mut self) -> Result<bool, BoardError> {
        if self.is_sunk() {
            return Err(BoardError::ShipAlreadySunk);
        }
        self.health -= 1;
        Ok(self.is_sunk())
    }

    /// Restore one point of health. Sunk and undamaged ships are unchanged
    /// and `false` is returned.
    pub fn repair(&mut self) -> bool {
        if self.is_sunk() || self.health >= self.size {
            return false;
        }
        self.health += 1;
        true
    }
}
