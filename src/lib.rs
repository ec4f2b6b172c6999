#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
mod bitboard;
mod board;
mod captain;
mod common;
mod config;
mod fleet;
mod game;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod persistence;
#[cfg(feature = "std")]
mod player_cli;
mod position;
pub mod prelude;
mod ship;
mod shot;
mod weather;

pub use ai::*;
pub use bitboard::{BitBoard, BitBoardError};
pub use board::*;
pub use captain::*;
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with, level_from_env, LOG_ENV};
#[cfg(feature = "std")]
pub use player_cli::*;
pub use position::*;
pub use ship::*;
pub use shot::*;
pub use weather::*;
