//! Shot resolution: turn a chosen target into one or more grid mutations.

use alloc::vec::Vec;

use log::debug;
use rand::Rng;

use crate::board::Grid;
use crate::common::ShotResult;
use crate::config::BOARD_SIZE;
use crate::position::Position;
use crate::weather::Weather;

const LAST: usize = BOARD_SIZE as usize - 1;

/// How a shot spreads over the target grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitStrategy {
    /// One cell.
    Standard,
    /// A 2×2 block. `weather_immune` anchors the block on the chosen target
    /// even in fog.
    Area { weather_immune: bool },
}

impl HitStrategy {
    /// Resolve against `grid`. `weather` is `Some` only for shots the
    /// weather is allowed to displace. Displacement happens once per shot and
    /// the displaced position is what the results record.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        target: Position,
        grid: &mut Grid,
        weather: Option<&Weather>,
        rng: &mut R,
    ) -> Vec<ShotResult> {
        match *self {
            HitStrategy::Standard => {
                let aimed = match weather {
                    Some(w) => w.displace(target, rng),
                    None => target,
                };
                if aimed != target {
                    debug!("fog pushed shot from {} to {}", target, aimed);
                }
                let mut results = Vec::with_capacity(1);
                results.push(grid.receive_shot(aimed));
                results
            }
            HitStrategy::Area { weather_immune } => {
                let anchor = match weather {
                    Some(w) if !weather_immune => w.displace(target, rng),
                    _ => target,
                };
                let mut results = Vec::with_capacity(4);
                for pos in area_block(anchor) {
                    if grid.is_target_valid(pos) {
                        results.push(grid.receive_shot(pos));
                    }
                }
                results
            }
        }
    }
}

/// The four cells of the 2×2 block anchored at `anchor`. The block grows
/// down and right unless the anchor sits on the last row or column, in which
/// case it grows up or left, so it never leaves the board.
pub fn area_block(anchor: Position) -> [Position; 4] {
    let row2 = if anchor.row >= LAST {
        anchor.row.saturating_sub(1)
    } else {
        anchor.row + 1
    };
    let col2 = if anchor.col >= LAST {
        anchor.col.saturating_sub(1)
    } else {
        anchor.col + 1
    };
    [
        Position::new(anchor.row, anchor.col),
        Position::new(anchor.row, col2),
        Position::new(row2, anchor.col),
        Position::new(row2, col2),
    ]
}
