//! Weather owned by a match. Fog displaces the human's standard shots by one
//! cell; the schedule alternates sunny and foggy spells of fixed length.

use log::info;
use rand::Rng;

use crate::config::{FOG_TURNS, SUNNY_TURNS};
use crate::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum WeatherCondition {
    Sunny,
    Fog,
}

/// Tunable schedule. With `enabled == false` the weather never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherConfig {
    pub enabled: bool,
    pub sunny_turns: u16,
    pub fog_turns: u16,
    pub initial: WeatherCondition,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sunny_turns: SUNNY_TURNS,
            fog_turns: FOG_TURNS,
            initial: WeatherCondition::Sunny,
        }
    }
}

impl WeatherConfig {
    /// Permanently sunny.
    pub fn calm() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    fn duration(&self, condition: WeatherCondition) -> u16 {
        match condition {
            WeatherCondition::Sunny => self.sunny_turns,
            WeatherCondition::Fog => self.fog_turns,
        }
    }
}

/// Current weather and the turns left before it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Weather {
    condition: WeatherCondition,
    turns_remaining: u16,
    config: WeatherConfig,
}

impl Default for Weather {
    fn default() -> Self {
        Self::new(WeatherConfig::default())
    }
}

impl Weather {
    pub fn new(config: WeatherConfig) -> Self {
        let condition = if config.enabled {
            config.initial
        } else {
            WeatherCondition::Sunny
        };
        Self {
            condition,
            turns_remaining: config.duration(condition),
            config,
        }
    }

    pub fn condition(&self) -> WeatherCondition {
        self.condition
    }

    pub fn turns_remaining(&self) -> u16 {
        self.turns_remaining
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Turn-end tick. When the current spell runs out the condition flips.
    pub fn process_turn_end(&mut self) {
        if !self.config.enabled {
            return;
        }
        self.turns_remaining = self.turns_remaining.saturating_sub(1);
        if self.turns_remaining > 0 {
            return;
        }
        let next = match self.condition {
            WeatherCondition::Sunny => WeatherCondition::Fog,
            WeatherCondition::Fog => WeatherCondition::Sunny,
        };
        // A zero-length spell is skipped straight back.
        let duration = self.config.duration(next);
        if duration == 0 {
            self.turns_remaining = self.config.duration(self.condition).max(1);
            return;
        }
        info!("weather changes from {:?} to {:?}", self.condition, next);
        self.condition = next;
        self.turns_remaining = duration;
    }

    /// Effective target for a weather-affected shot. Under fog the target
    /// moves to a random neighbour; a neighbour off the board falls back to
    /// the original target.
    pub fn displace<R: Rng + ?Sized>(&self, target: Position, rng: &mut R) -> Position {
        if self.condition != WeatherCondition::Fog {
            return target;
        }
        let (d_row, d_col) = loop {
            let dr: i32 = rng.random_range(-1..=1);
            let dc: i32 = rng.random_range(-1..=1);
            if (dr, dc) != (0, 0) {
                break (dr, dc);
            }
        };
        target.offset(d_row, d_col).unwrap_or(target)
    }
}
