#![cfg(feature = "std")]

//! Save and load whole matches. The byte format is bincode over
//! [`GameState`]; a short magic header rejects foreign files early.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use log::info;

use crate::game::{GameEngine, GameState};

const MAGIC: &[u8; 4] = b"FCMD";
const FORMAT_VERSION: u8 = 1;

/// Encode a snapshot.
pub fn to_bytes(state: &GameState) -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(1024);
    bytes.extend_from_slice(MAGIC);
    bytes.push(FORMAT_VERSION);
    let body = bincode::serialize(state).context("failed to encode game state")?;
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

/// Decode a snapshot produced by [`to_bytes`].
pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<GameState> {
    let header = MAGIC.len() + 1;
    if bytes.len() < header || &bytes[..MAGIC.len()] != MAGIC {
        bail!("not a saved game");
    }
    let version = bytes[MAGIC.len()];
    if version != FORMAT_VERSION {
        bail!(
            "unsupported save format version {} (expected {})",
            version,
            FORMAT_VERSION
        );
    }
    bincode::deserialize(&bytes[header..]).context("failed to decode game state")
}

/// Write the engine's current state to `path`.
pub fn save_game(engine: &GameEngine, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(&engine.state())?;
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    info!("saved game to {}", path.display());
    Ok(())
}

/// Read an engine back from `path`.
pub fn load_game(path: impl AsRef<Path>) -> anyhow::Result<GameEngine> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let state = from_bytes(&bytes)?;
    info!("loaded game from {} at turn {}", path.display(), state.turn);
    Ok(GameEngine::from_state(state))
}
