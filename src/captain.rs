//! Captains: one special ability per human player, gated by a cooldown.

use alloc::vec::Vec;
use core::fmt;

use log::{debug, info};
use rand::Rng;

use crate::board::Grid;
use crate::common::ShotResult;
use crate::config::{ENGINEER_COOLDOWN, GUNNER_COOLDOWN, SONAR_OFFICER_COOLDOWN};
use crate::position::Position;
use crate::shot::HitStrategy;
use crate::weather::Weather;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CaptainKind {
    /// Repairs one damaged cell of a floating ship on the own grid.
    Engineer,
    /// Fires a 2×2 area shot at the enemy grid.
    Gunner,
    /// Reveals whether an enemy cell holds a ship.
    SonarOfficer,
}

impl CaptainKind {
    pub const ALL: [CaptainKind; 3] = [
        CaptainKind::Engineer,
        CaptainKind::Gunner,
        CaptainKind::SonarOfficer,
    ];

    pub fn max_cooldown(self) -> u8 {
        match self {
            CaptainKind::Engineer => ENGINEER_COOLDOWN,
            CaptainKind::Gunner => GUNNER_COOLDOWN,
            CaptainKind::SonarOfficer => SONAR_OFFICER_COOLDOWN,
        }
    }

    /// Whether the ability is aimed at the opponent's grid.
    pub fn targets_enemy_grid(self) -> bool {
        !matches!(self, CaptainKind::Engineer)
    }

    /// Whether using the ability ends the player's turn.
    pub fn consumes_turn(self) -> bool {
        !matches!(self, CaptainKind::Engineer)
    }
}

impl fmt::Display for CaptainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CaptainKind::Engineer => "Engineer",
            CaptainKind::Gunner => "Gunner",
            CaptainKind::SonarOfficer => "Sonar Officer",
        };
        f.write_str(name)
    }
}

/// What a successful ability activation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbilityEffect {
    Repaired(Position),
    Barrage(Vec<ShotResult>),
    Scanned { position: Position, ship_found: bool },
}

/// Cooldown state of one captain. `current_cooldown` counts up from zero
/// and the ability is ready once it reaches the kind's maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Captain {
    kind: CaptainKind,
    current_cooldown: u8,
    used_this_turn: bool,
}

impl Captain {
    /// A freshly appointed captain starts discharged.
    pub fn new(kind: CaptainKind) -> Self {
        Self {
            kind,
            current_cooldown: 0,
            used_this_turn: false,
        }
    }

    pub fn kind(&self) -> CaptainKind {
        self.kind
    }

    pub fn max_cooldown(&self) -> u8 {
        self.kind.max_cooldown()
    }

    pub fn current_cooldown(&self) -> u8 {
        self.current_cooldown
    }

    pub fn is_ready(&self) -> bool {
        self.current_cooldown >= self.max_cooldown()
    }

    /// Turns left until ready.
    pub fn turns_until_ready(&self) -> u8 {
        self.max_cooldown().saturating_sub(self.current_cooldown)
    }

    pub fn targets_enemy_grid(&self) -> bool {
        self.kind.targets_enemy_grid()
    }

    pub fn consumes_turn(&self) -> bool {
        self.kind.consumes_turn()
    }

    /// Fire the ability at `pos` on `grid`, which must be the grid selected
    /// by [`Captain::targets_enemy_grid`]. Returns `None` without touching
    /// any state if the captain is not ready, `pos` is off the board, or the
    /// effect itself fails. On success the cooldown restarts.
    pub fn use_ability<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        pos: Position,
        weather: Option<&Weather>,
        rng: &mut R,
    ) -> Option<AbilityEffect> {
        if !self.is_ready() || !pos.in_bounds() {
            debug!("{} ability rejected at {}", self.kind, pos);
            return None;
        }
        let effect = match self.kind {
            CaptainKind::Engineer => {
                if !grid.repair(pos) {
                    return None;
                }
                AbilityEffect::Repaired(pos)
            }
            CaptainKind::Gunner => {
                let strategy = HitStrategy::Area {
                    weather_immune: false,
                };
                AbilityEffect::Barrage(strategy.resolve(pos, grid, weather, rng))
            }
            CaptainKind::SonarOfficer => {
                let ship_found = grid.scan(pos)?;
                AbilityEffect::Scanned {
                    position: pos,
                    ship_found,
                }
            }
        };
        self.current_cooldown = 0;
        self.used_this_turn = true;
        info!("{} used ability at {}", self.kind, pos);
        Some(effect)
    }

    /// Turn-end tick. Skipped once on the turn the ability fired.
    pub fn process_turn_end(&mut self) {
        if self.used_this_turn {
            self.used_this_turn = false;
            return;
        }
        if self.current_cooldown < self.max_cooldown() {
            self.current_cooldown += 1;
        }
    }
}
