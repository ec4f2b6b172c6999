//! Commonly used types and utilities for ease of import.

pub use crate::{
    BotStrategy, CaptainKind, Difficulty, GameEngine, GameStatus, Grid, MatchConfig, Orientation,
    Position, ShotOutcome, ShotResult, WeatherConfig,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, parse_coord, print_player_view};
