//! Grid state: cells, the fleet, and the occupancy/shot masks kept beside them.

use alloc::vec::Vec;
use core::fmt;

use log::{debug, warn};
use rand::Rng;

use crate::bitboard::{BitBoard, BitBoardError};
use crate::common::{BoardError, PlacementError, ShotResult};
use crate::config::BOARD_SIZE;
use crate::fleet::Fleet;
use crate::position::Position;
use crate::ship::{Orientation, Ship, ShipId};

const GRID_SIZE: usize = BOARD_SIZE as usize;

type BB = BitBoard<u128, GRID_SIZE>;

/// Shot history of a single cell. Once a cell leaves `NeverShot` only a
/// repair can bring it back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum HitStatus {
    #[default]
    NeverShot,
    Miss,
    Hit,
    Sunk,
}

/// What a reconnaissance scan revealed about a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ScanResult {
    #[default]
    Unscanned,
    Water,
    Ship,
}

/// Display-oriented projection of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellView {
    Fog,
    Water,
    Ship,
    HitWater,
    HitShip,
    SunkShip,
    RevealedShip,
    RevealedWater,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    ship: Option<ShipId>,
    status: HitStatus,
    scan: ScanResult,
}

impl Cell {
    pub fn ship(&self) -> Option<ShipId> {
        self.ship
    }

    pub fn status(&self) -> HitStatus {
        self.status
    }

    pub fn scan(&self) -> ScanResult {
        self.scan
    }

    pub fn is_occupied(&self) -> bool {
        self.ship.is_some()
    }

    pub fn is_shot(&self) -> bool {
        self.status != HitStatus::NeverShot
    }

    /// Record a shot. A cell can only be shot once.
    fn mark(&mut self, status: HitStatus, pos: Position) -> Result<(), BoardError> {
        if self.is_shot() {
            return Err(BoardError::AlreadyShot {
                row: pos.row,
                col: pos.col,
            });
        }
        self.status = status;
        Ok(())
    }
}

/// A 10×10 board and the fleet placed on it. All cell mutation goes
/// through here.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
    fleet: Fleet,
    occupied: BB,
    shot: BB,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create an empty grid with no ships and no shots.
    pub fn new() -> Self {
        Grid {
            cells: [[Cell::default(); GRID_SIZE]; GRID_SIZE],
            fleet: Fleet::new(),
            occupied: BB::new(),
            shot: BB::new(),
        }
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if !pos.in_bounds() {
            return None;
        }
        Some(&self.cells[pos.row][pos.col])
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.fleet.get(id)
    }

    pub fn ship_at(&self, pos: Position) -> Option<&Ship> {
        self.cell(pos)?.ship.and_then(|id| self.fleet.get(id))
    }

    /// Mask of every cell holding a ship, sunk or not.
    pub fn occupancy_mask(&self) -> BB {
        self.occupied
    }

    /// Mask of every cell that has been shot.
    pub fn shot_mask(&self) -> BB {
        self.shot
    }

    fn footprint(
        &self,
        size: u8,
        start: Position,
        orientation: Orientation,
    ) -> Result<BB, PlacementError> {
        let cells = (0..size as usize).map(|i| orientation.cell(start, i));
        let mask = BB::from_positions(cells).map_err(|_| PlacementError::OutOfBounds)?;
        if !(self.occupied & mask).is_empty() {
            return Err(PlacementError::Collision);
        }
        Ok(mask)
    }

    /// Whether `size` consecutive cells from `start` are on the board and free.
    pub fn is_placement_valid(&self, size: u8, start: Position, orientation: Orientation) -> bool {
        self.footprint(size, start, orientation).is_ok()
    }

    /// Place `ship` and register it with the fleet. Both the cells and the
    /// composition quota are checked before anything is written.
    pub fn place_ship(
        &mut self,
        ship: Ship,
        start: Position,
        orientation: Orientation,
    ) -> Result<ShipId, BoardError> {
        let mask = self.footprint(ship.size(), start, orientation)?;
        if self.fleet.get(ship.id()).is_some() {
            return Err(BoardError::DuplicateShip(ship.id()));
        }
        if !self.fleet.can_add(ship.size()) {
            return Err(BoardError::FleetCompositionExceeded { size: ship.size() });
        }
        let id = self.fleet.add_ship(ship)?;
        for pos in mask.positions() {
            self.cells[pos.row][pos.col].ship = Some(id);
        }
        self.occupied |= mask;
        debug!(
            "placed {} {} at {} {:?}",
            ship.name(),
            id,
            start,
            orientation
        );
        Ok(id)
    }

    /// Build a new ship of `size` and place it.
    pub fn place_new_ship(
        &mut self,
        size: u8,
        start: Position,
        orientation: Orientation,
    ) -> Result<ShipId, BoardError> {
        let ship = self.fleet.new_ship(size)?;
        self.place_ship(ship, start, orientation)
    }

    /// Clear a ship from its cells and the fleet. Meant for the setup phase.
    pub fn remove_ship(&mut self, id: ShipId) -> Result<Ship, BoardError> {
        let ship = self.fleet.remove_ship(id)?;
        for (r, row) in self.cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                if cell.ship == Some(id) {
                    cell.ship = None;
                    self.occupied.clear(r, c)?;
                }
            }
        }
        debug!("removed ship {}", id);
        Ok(ship)
    }

    /// On the board and not yet shot.
    pub fn is_target_valid(&self, pos: Position) -> bool {
        pos.in_bounds() && !self.shot.contains(pos)
    }

    /// Low-level shot primitive. Shooting a cell twice is a contract
    /// violation and returns `AlreadyShot`.
    pub fn shoot_cell(&mut self, pos: Position) -> Result<ShotResult, BoardError> {
        if !pos.in_bounds() {
            return Err(BoardError::BitBoardError(BitBoardError::IndexOutOfBounds {
                row: pos.row,
                col: pos.col,
            }));
        }
        let cell = self.cells[pos.row][pos.col];
        if cell.is_shot() {
            return Err(BoardError::AlreadyShot {
                row: pos.row,
                col: pos.col,
            });
        }
        let Some(id) = cell.ship else {
            self.cells[pos.row][pos.col].mark(HitStatus::Miss, pos)?;
            self.shot.set(pos.row, pos.col)?;
            return Ok(ShotResult::miss(pos));
        };
        // Damage the ship first so a dangling id leaves the cell untouched.
        let sunk = self.fleet.get_mut(id)?.hit()?;
        self.cells[pos.row][pos.col].mark(HitStatus::Hit, pos)?;
        self.shot.set(pos.row, pos.col)?;
        if !sunk {
            return Ok(ShotResult::hit(pos));
        }
        for cell in self.cells.iter_mut().flatten() {
            if cell.ship == Some(id) && cell.status == HitStatus::Hit {
                cell.status = HitStatus::Sunk;
            }
        }
        Ok(ShotResult::sunk(pos, id))
    }

    /// Resolve a shot. Off-board or repeated targets yield an `Invalid`
    /// result and leave the grid untouched.
    pub fn receive_shot(&mut self, pos: Position) -> ShotResult {
        if !self.is_target_valid(pos) {
            return ShotResult::invalid(pos);
        }
        match self.shoot_cell(pos) {
            Ok(result) => result,
            Err(e) => {
                warn!("shot at {} rejected: {}", pos, e);
                ShotResult::invalid(pos)
            }
        }
    }

    /// Undo one hit on a damaged, still-floating ship. The cell becomes a
    /// valid target again.
    pub fn repair(&mut self, pos: Position) -> bool {
        let Some(cell) = self.cell(pos).copied() else {
            return false;
        };
        let Some(id) = cell.ship else {
            return false;
        };
        if cell.status != HitStatus::Hit {
            return false;
        }
        let Ok(ship) = self.fleet.get_mut(id) else {
            return false;
        };
        if !ship.repair() {
            return false;
        }
        self.cells[pos.row][pos.col].status = HitStatus::NeverShot;
        let _ = self.shot.clear(pos.row, pos.col);
        debug!("repaired {} at {}", id, pos);
        true
    }

    /// Reveal whether `pos` holds a ship without shooting it. Returns
    /// `None` for off-board positions.
    pub fn scan(&mut self, pos: Position) -> Option<bool> {
        if !pos.in_bounds() {
            return None;
        }
        let cell = &mut self.cells[pos.row][pos.col];
        let found = cell.is_occupied();
        cell.scan = if found {
            ScanResult::Ship
        } else {
            ScanResult::Water
        };
        Some(found)
    }

    /// Every position not yet shot, in row-major order.
    pub fn available_targets(&self) -> Vec<Position> {
        (!self.shot).positions().collect()
    }

    /// Every position holding a ship reference, sunk or afloat.
    pub fn occupied_positions(&self) -> Vec<Position> {
        self.occupied.positions().collect()
    }

    pub fn is_defeated(&self) -> bool {
        self.fleet.is_defeated()
    }

    /// Returns a random free `(start, orientation)` for a ship of `size`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        size: u8,
    ) -> Result<(Position, Orientation), BoardError> {
        let len = size as usize;
        if len == 0 || len > GRID_SIZE {
            return Err(BoardError::InvalidShipSize(size));
        }
        for _ in 0..100 {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orient {
                Orientation::Horizontal => (GRID_SIZE - 1, GRID_SIZE - len),
                Orientation::Vertical => (GRID_SIZE - len, GRID_SIZE - 1),
            };
            let start = Position::new(rng.random_range(0..=max_r), rng.random_range(0..=max_c));
            if self.is_placement_valid(size, start, orient) {
                return Ok((start, orient));
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Place every ship the fleet is still missing at random.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        for size in self.fleet.missing_sizes() {
            let (start, orient) = self.random_placement(rng, size)?;
            self.place_new_ship(size, start, orient)?;
        }
        Ok(())
    }

    /// Projection of one cell for display. `is_enemy` selects the view the
    /// human has of the bot's grid.
    pub fn cell_view(&self, pos: Position, is_enemy: bool) -> Option<CellView> {
        let cell = self.cell(pos)?;
        let view = if cell.is_shot() {
            match cell.ship.and_then(|id| self.fleet.get(id)) {
                Some(ship) if ship.is_sunk() => CellView::SunkShip,
                Some(_) => CellView::HitShip,
                None => CellView::HitWater,
            }
        } else if is_enemy {
            match cell.scan {
                ScanResult::Ship => CellView::RevealedShip,
                ScanResult::Water => CellView::RevealedWater,
                ScanResult::Unscanned => CellView::Fog,
            }
        } else if cell.is_occupied() {
            CellView::Ship
        } else {
            CellView::Water
        };
        Some(view)
    }

    /// Projection of the whole grid.
    pub fn project(&self, is_enemy: bool) -> [[CellView; GRID_SIZE]; GRID_SIZE] {
        core::array::from_fn(|r| {
            core::array::from_fn(|c| {
                self.cell_view(Position::new(r, c), is_enemy)
                    .unwrap_or(CellView::Fog)
            })
        })
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Grid {{\n  occupied: {:?},\n  shot: {:?},\n  fleet: {:?}\n}}",
            self.occupied, self.shot, self.fleet
        )
    }
}
