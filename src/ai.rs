//! Target selection for the computer player.
//!
//! Three strategies share one interface: pick a target on the enemy grid,
//! then learn from the outcome. Only the pro strategy keeps state between
//! turns; its hunt/seek/destroy machine is a plain value with a pure
//! transition function so it can be driven without a grid.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;

use log::{debug, trace};
use rand::Rng;

use crate::board::Grid;
use crate::common::ShotOutcome;
use crate::config::SNIPER_MISS_CHANCE;
use crate::position::{Direction, Position};

/// Difficulty levels offered to the human.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    Beginner,
    Pro,
    Sniper,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Pro => "pro",
            Difficulty::Sniper => "sniper",
        };
        f.write_str(name)
    }
}

/// Uniformly random target among the cells not yet shot.
pub fn random_target<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<Position> {
    let targets = grid.available_targets();
    if targets.is_empty() {
        return None;
    }
    Some(targets[rng.random_range(0..targets.len())])
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ProPhase {
    /// No lead: shoot at random.
    #[default]
    Hunting,
    /// One hit known: try its four neighbours.
    Seeking,
    /// Two hits in line: follow the line, then its other end.
    Destroying,
}

/// State of the hunt/seek/destroy machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ProState {
    phase: ProPhase,
    anchor: Option<Position>,
    last_target: Option<Position>,
    candidates: VecDeque<Direction>,
    direction: Option<Direction>,
}

impl ProState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ProPhase {
        self.phase
    }

    /// First confirmed hit on the ship being chased.
    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    pub fn last_target(&self) -> Option<Position> {
        self.last_target
    }

    /// Direction locked while destroying.
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Directions still to try around the anchor, in order.
    pub fn candidates(&self) -> impl Iterator<Item = Direction> + '_ {
        self.candidates.iter().copied()
    }

    fn start_seeking(&mut self, anchor: Position) {
        self.phase = ProPhase::Seeking;
        self.anchor = Some(anchor);
        self.last_target = None;
        self.direction = None;
        self.candidates = Direction::ALL.into_iter().collect();
    }

    /// Transition on the outcome of a shot at `target`.
    pub fn after_feedback(mut self, target: Position, outcome: ShotOutcome) -> Self {
        match (outcome, self.phase) {
            (ShotOutcome::Invalid, _) => {}
            (ShotOutcome::Sunk, _) => self = ProState::new(),
            (ShotOutcome::Miss, ProPhase::Destroying) => {
                self.direction = self.direction.map(Direction::opposite);
                self.last_target = self.anchor;
            }
            // Seeking already consumed the direction when it was chosen.
            (ShotOutcome::Miss, _) => {}
            (ShotOutcome::Hit, ProPhase::Hunting) => self.start_seeking(target),
            (ShotOutcome::Hit, ProPhase::Seeking) => {
                match self.anchor.and_then(|a| a.direction_to(target)) {
                    Some(dir) => {
                        self.phase = ProPhase::Destroying;
                        self.last_target = Some(target);
                        self.direction = Some(dir);
                    }
                    // A hit away from the anchor starts a fresh lead.
                    None => self.start_seeking(target),
                }
            }
            (ShotOutcome::Hit, ProPhase::Destroying) => self.last_target = Some(target),
        }
        self
    }

    /// In-place form of [`ProState::after_feedback`].
    pub fn on_feedback(&mut self, target: Position, outcome: ShotOutcome) {
        let before = self.phase;
        *self = core::mem::take(self).after_feedback(target, outcome);
        if before != self.phase {
            debug!("pro bot {:?} -> {:?} after {:?} at {}", before, self.phase, outcome, target);
        }
    }

    pub fn select_target<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> Option<Position> {
        match self.phase {
            ProPhase::Hunting => random_target(grid, rng),
            ProPhase::Seeking => self.seek(grid, rng),
            ProPhase::Destroying => self.destroy(grid, rng),
        }
    }

    fn seek<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> Option<Position> {
        let Some(anchor) = self.anchor else {
            return random_target(grid, rng);
        };
        for refill in [false, true] {
            if refill {
                self.candidates = Direction::ALL.into_iter().collect();
            }
            while let Some(dir) = self.candidates.pop_front() {
                if let Some(pos) = anchor.step(dir).filter(|p| grid.is_target_valid(*p)) {
                    return Some(pos);
                }
            }
        }
        trace!("no neighbour of {} left to try", anchor);
        random_target(grid, rng)
    }

    fn destroy<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> Option<Position> {
        let (Some(anchor), Some(last), Some(dir)) = (self.anchor, self.last_target, self.direction)
        else {
            return self.seek(grid, rng);
        };
        if let Some(pos) = last.step(dir).filter(|p| grid.is_target_valid(*p)) {
            return Some(pos);
        }
        let opposite = dir.opposite();
        self.direction = Some(opposite);
        if let Some(pos) = anchor.step(opposite).filter(|p| grid.is_target_valid(*p)) {
            self.last_target = Some(anchor);
            return Some(pos);
        }
        self.start_seeking(anchor);
        self.seek(grid, rng)
    }
}

/// Leaked intel for the sniper strategy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SniperIntel {
    leaked: Vec<Position>,
    miss_chance: f64,
}

impl SniperIntel {
    pub fn new(leaked: Vec<Position>) -> Self {
        Self::with_miss_chance(leaked, SNIPER_MISS_CHANCE)
    }

    /// `miss_chance` is clamped to `0.0..=1.0`; NaN falls back to the default.
    pub fn with_miss_chance(leaked: Vec<Position>, miss_chance: f64) -> Self {
        let miss_chance = if miss_chance.is_nan() {
            SNIPER_MISS_CHANCE
        } else {
            miss_chance.clamp(0.0, 1.0)
        };
        Self {
            leaked,
            miss_chance,
        }
    }

    pub fn miss_chance(&self) -> f64 {
        self.miss_chance
    }

    pub fn leaked(&self) -> &[Position] {
        &self.leaked
    }

    pub fn select_target<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> Option<Position> {
        if rng.random_bool(self.miss_chance) {
            return random_target(grid, rng);
        }
        self.leaked.retain(|p| grid.is_target_valid(*p));
        if self.leaked.is_empty() {
            return random_target(grid, rng);
        }
        Some(self.leaked[rng.random_range(0..self.leaked.len())])
    }
}

/// The computer player's targeting strategy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum BotStrategy {
    Beginner,
    Pro(ProState),
    Sniper(SniperIntel),
}

impl BotStrategy {
    /// Build the strategy for `difficulty`. `leaked` is only kept by the
    /// sniper.
    pub fn new(difficulty: Difficulty, leaked: Vec<Position>) -> Self {
        match difficulty {
            Difficulty::Beginner => BotStrategy::Beginner,
            Difficulty::Pro => BotStrategy::Pro(ProState::new()),
            Difficulty::Sniper => BotStrategy::Sniper(SniperIntel::new(leaked)),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        match self {
            BotStrategy::Beginner => Difficulty::Beginner,
            BotStrategy::Pro(_) => Difficulty::Pro,
            BotStrategy::Sniper(_) => Difficulty::Sniper,
        }
    }

    /// Choose the next target on the enemy grid. `None` once every cell has
    /// been shot.
    pub fn select_target<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> Option<Position> {
        match self {
            BotStrategy::Beginner => random_target(grid, rng),
            BotStrategy::Pro(state) => state.select_target(grid, rng),
            BotStrategy::Sniper(intel) => intel.select_target(grid, rng),
        }
    }

    /// Learn from the outcome of the shot at `target`.
    pub fn on_feedback(&mut self, target: Position, outcome: ShotOutcome) {
        if let BotStrategy::Pro(state) = self {
            state.on_feedback(target, outcome);
        }
    }
}
