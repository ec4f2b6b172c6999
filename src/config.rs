use crate::ship::ShipClass;

pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 5;
pub const SHIPS: [ShipClass; NUM_SHIPS] = [
    ShipClass::new("Carrier", 5),
    ShipClass::new("Battleship", 4),
    ShipClass::new("Cruiser", 3),
    ShipClass::new("Submarine", 3),
    ShipClass::new("Destroyer", 2),
];

/// Smallest and largest legal ship sizes.
pub const MIN_SHIP_SIZE: u8 = 2;
pub const MAX_SHIP_SIZE: u8 = 5;

/// Required number of ships per size, as `(size, count)`.
pub const FLEET_COMPOSITION: [(u8, usize); 4] = [(5, 1), (4, 1), (3, 2), (2, 1)];

/// Total number of ship segments in a complete fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Turns each captain needs to recharge after using its ability.
pub const ENGINEER_COOLDOWN: u8 = 3;
pub const GUNNER_COOLDOWN: u8 = 4;
pub const SONAR_OFFICER_COOLDOWN: u8 = 2;

/// Chance that the sniper bot ignores its leaked intel on a given turn.
pub const SNIPER_MISS_CHANCE: f64 = 0.18;

/// Default weather schedule, in turn-end ticks.
pub const SUNNY_TURNS: u16 = 6;
pub const FOG_TURNS: u16 = 3;

/// Number of ships of `size` a complete fleet holds.
pub fn quota_for(size: u8) -> usize {
    FLEET_COMPOSITION
        .iter()
        .find(|(s, _)| *s == size)
        .map(|(_, count)| *count)
        .unwrap_or(0)
}

