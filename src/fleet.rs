//! The ships placed on one grid and the composition contract they obey.

use alloc::vec::Vec;

use crate::common::BoardError;
use crate::config::{quota_for, FLEET_COMPOSITION, SHIPS};
use crate::ship::{Ship, ShipId};

/// Owner of every ship on a grid. Cells only hold [`ShipId`]s into this arena.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    ships: Vec<Ship>,
    next_id: u32,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn get(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id() == id)
    }

    pub(crate) fn get_mut(&mut self, id: ShipId) -> Result<&mut Ship, BoardError> {
        self.ships
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or(BoardError::UnknownShip(id))
    }

    /// Number of ships of `size` currently in the fleet.
    pub fn count_of_size(&self, size: u8) -> usize {
        self.ships.iter().filter(|s| s.size() == size).count()
    }

    /// Whether another ship of `size` fits within the composition quota.
    pub fn can_add(&self, size: u8) -> bool {
        self.count_of_size(size) < quota_for(size)
    }

    /// Build a fresh ship with the next free id. The ship is not registered.
    pub fn new_ship(&mut self, size: u8) -> Result<Ship, BoardError> {
        let ship = Ship::new(ShipId(self.next_id), size)?;
        self.next_id += 1;
        Ok(ship)
    }

    /// Register a ship. Fails once the quota for its size is reached or if
    /// its id is already taken.
    pub fn add_ship(&mut self, mut ship: Ship) -> Result<ShipId, BoardError> {
        if self.get(ship.id()).is_some() {
            return Err(BoardError::DuplicateShip(ship.id()));
        }
        if !self.can_add(ship.size()) {
            return Err(BoardError::FleetCompositionExceeded { size: ship.size() });
        }
        // Give it the first class slot of its size not already taken.
        if let Some(slot) = SHIPS.iter().enumerate().position(|(i, class)| {
            class.size() == ship.size() && !self.ships.iter().any(|s| s.class_index() == i)
        }) {
            ship.set_class(slot);
        }
        self.next_id = self.next_id.max(ship.id().0 + 1);
        let id = ship.id();
        self.ships.push(ship);
        Ok(id)
    }

    /// Remove a ship by id, returning it.
    pub fn remove_ship(&mut self, id: ShipId) -> Result<Ship, BoardError> {
        let idx = self
            .ships
            .iter()
            .position(|s| s.id() == id)
            .ok_or(BoardError::UnknownShip(id))?;
        Ok(self.ships.remove(idx))
    }

    /// True iff the fleet matches the composition contract exactly.
    pub fn is_topology_valid(&self) -> bool {
        let expected: usize = FLEET_COMPOSITION.iter().map(|(_, n)| n).sum();
        self.ships.len() == expected
            && FLEET_COMPOSITION
                .iter()
                .all(|(size, n)| self.count_of_size(*size) == *n)
    }

    /// True iff the fleet has ships and every one of them is sunk.
    pub fn is_defeated(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(|s| s.is_sunk())
    }

    pub fn ships_afloat(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    /// Sizes still required to complete the composition, largest first,
    /// one entry per missing ship.
    pub fn missing_sizes(&self) -> Vec<u8> {
        let mut missing = Vec::new();
        for (size, n) in FLEET_COMPOSITION.iter() {
            for _ in self.count_of_size(*size)..*n {
                missing.push(*size);
            }
        }
        missing
    }
}
