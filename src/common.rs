//! Common types: board errors and shot outcomes.

use core::fmt;

use crate::bitboard::BitBoardError;
use crate::position::Position;
use crate::ship::ShipId;

/// Outcome of a single resolved shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// Shot landed in open water.
    Miss,
    /// Shot struck a ship that is still afloat.
    Hit,
    /// Shot sank the ship it struck.
    Sunk,
    /// Target was off the board or already shot; nothing changed.
    Invalid,
}

/// Immutable record of one shot: what happened and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotResult {
    pub outcome: ShotOutcome,
    pub position: Position,
    /// Identity of the ship sunk by this shot, set only for `Sunk`.
    pub sunk_ship: Option<ShipId>,
}

impl ShotResult {
    pub fn miss(position: Position) -> Self {
        Self {
            outcome: ShotOutcome::Miss,
            position,
            sunk_ship: None,
        }
    }

    pub fn hit(position: Position) -> Self {
        Self {
            outcome: ShotOutcome::Hit,
            position,
            sunk_ship: None,
        }
    }

    pub fn sunk(position: Position, ship: ShipId) -> Self {
        Self {
            outcome: ShotOutcome::Sunk,
            position,
            sunk_ship: Some(ship),
        }
    }

    pub fn invalid(position: Position) -> Self {
        Self {
            outcome: ShotOutcome::Invalid,
            position,
            sunk_ship: None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.outcome != ShotOutcome::Invalid
    }

    /// `true` for both `Hit` and `Sunk`.
    pub fn struck_ship(&self) -> bool {
        matches!(self.outcome, ShotOutcome::Hit | ShotOutcome::Sunk)
    }
}

/// Why a ship could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Part of the ship would leave the board.
    OutOfBounds,
    /// Part of the ship would overlap another ship.
    Collision,
}

/// Errors returned by board, fleet and ship operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error (e.g. index out of range).
    BitBoardError(BitBoardError),
    InvalidPlacement(PlacementError),
    /// The fleet already holds its quota of ships of this size.
    FleetCompositionExceeded { size: u8 },
    /// Ship sizes must lie in `MIN_SHIP_SIZE..=MAX_SHIP_SIZE`.
    InvalidShipSize(u8),
    /// Low-level double shot on a cell. Callers must filter with
    /// `Grid::is_target_valid` first.
    AlreadyShot { row: usize, col: usize },
    /// `hit()` on a ship with no health left.
    ShipAlreadySunk,
    /// No ship with this id in the fleet.
    UnknownShip(ShipId),
    /// The fleet already holds a ship with this id.
    DuplicateShip(ShipId),
    /// Random placement gave up after too many attempts.
    UnableToPlaceShip,
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl From<PlacementError> for BoardError {
    fn from(err: PlacementError) -> Self {
        BoardError::InvalidPlacement(err)
    }
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "ship placement is out of bounds"),
            PlacementError::Collision => write!(f, "ship placement overlaps with another ship"),
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::InvalidPlacement(e) => write!(f, "Invalid placement: {}", e),
            BoardError::FleetCompositionExceeded { size } => {
                write!(f, "Fleet already holds every ship of size {}", size)
            }
            BoardError::InvalidShipSize(size) => write!(f, "Invalid ship size {}", size),
            BoardError::AlreadyShot { row, col } => {
                write!(f, "Cell ({}, {}) was already shot", row, col)
            }
            BoardError::ShipAlreadySunk => write!(f, "Ship is already sunk"),
            BoardError::UnknownShip(id) => write!(f, "No ship with id {} in the fleet", id),
            BoardError::DuplicateShip(id) => write!(f, "Fleet already holds ship {}", id),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
