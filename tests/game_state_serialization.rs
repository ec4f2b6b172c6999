use std::collections::HashMap;

use fleet_command::persistence::{from_bytes, load_game, save_game, to_bytes};
use fleet_command::{
    CaptainKind, Difficulty, GameEngine, GameState, Grid, MatchConfig, Phase, Position,
    WeatherConfig,
};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn played(seed: u64, difficulty: Difficulty, turns: usize) -> GameEngine {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut engine = GameEngine::new(MatchConfig {
        captain: CaptainKind::SonarOfficer,
        difficulty,
        weather: WeatherConfig::default(),
    });
    engine.auto_place_human(&mut rng).unwrap();
    engine.begin_battle(&mut rng).unwrap();
    for _ in 0..turns {
        if engine.phase() != Phase::Battle {
            break;
        }
        if engine.is_human_turn() {
            let targets = engine.bot_grid().available_targets();
            let target = targets[rng.random_range(0..targets.len())];
            if engine.captain().is_ready() {
                engine.human_use_ability(target, &mut rng).unwrap();
            } else {
                engine.human_fire(target, &mut rng).unwrap();
            }
        } else {
            engine.bot_turn(&mut rng).unwrap();
        }
    }
    engine
}

/// Every cell pointing at a ship id agrees with that ship's size.
fn assert_identity_consistent(grid: &Grid) {
    let mut seen: HashMap<_, usize> = HashMap::new();
    for pos in grid.occupied_positions() {
        let id = grid.cell(pos).unwrap().ship().unwrap();
        *seen.entry(id).or_default() += 1;
    }
    for ship in grid.fleet().ships() {
        assert_eq!(seen.get(&ship.id()).copied(), Some(ship.size() as usize));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn game_state_roundtrip(seed in any::<u64>(), turns in 0usize..120) {
        let engine = played(seed, Difficulty::Pro, turns);
        let state = engine.state();
        let bytes = bincode::serialize(&state).unwrap();
        let decoded: GameState = bincode::deserialize(&bytes).unwrap();
        let restored = GameEngine::from_state(decoded);
        prop_assert_eq!(engine.state(), restored.state());
    }
}

#[test]
fn test_ship_identity_survives_roundtrip() {
    let engine = played(17, Difficulty::Sniper, 60);
    let bytes = to_bytes(&engine.state()).unwrap();
    let restored = GameEngine::from_state(from_bytes(&bytes).unwrap());

    for grid in [restored.human_grid(), restored.bot_grid()] {
        assert_identity_consistent(grid);
    }
    for r in 0..10 {
        for c in 0..10 {
            let pos = Position::new(r, c);
            let before = engine.human_grid().ship_at(pos);
            let after = restored.human_grid().ship_at(pos);
            assert_eq!(before.map(|s| s.id()), after.map(|s| s.id()));
            assert_eq!(before.map(|s| s.health()), after.map(|s| s.health()));
            assert_eq!(before.map(|s| s.is_sunk()), after.map(|s| s.is_sunk()));
        }
    }
    assert_eq!(restored.captain(), engine.captain());
    assert_eq!(restored.bot(), engine.bot());
    assert_eq!(restored.weather(), engine.weather());
}

#[test]
fn test_restored_game_keeps_playing() {
    let engine = played(5, Difficulty::Pro, 30);
    let bytes = to_bytes(&engine.state()).unwrap();
    let mut restored = GameEngine::from_state(from_bytes(&bytes).unwrap());
    let mut rng = SmallRng::seed_from_u64(5);
    while restored.phase() == Phase::Battle {
        if restored.is_human_turn() {
            let target = restored.bot_grid().available_targets()[0];
            restored.human_fire(target, &mut rng).unwrap();
        } else {
            restored.bot_turn(&mut rng).unwrap();
        }
    }
    assert!(restored.is_game_over());
}

#[test]
fn test_rejects_foreign_bytes() {
    assert!(from_bytes(b"").is_err());
    assert!(from_bytes(b"not a save file").is_err());

    let engine = played(1, Difficulty::Beginner, 4);
    let mut bytes = to_bytes(&engine.state()).unwrap();
    bytes[4] = 99;
    let err = from_bytes(&bytes).unwrap_err();
    assert!(err.to_string().contains("version"));
}

#[test]
fn test_save_and_load_file() {
    let engine = played(23, Difficulty::Pro, 10);
    let path = std::env::temp_dir().join(format!(
        "fleet_command_test_{}.save",
        std::process::id()
    ));
    save_game(&engine, &path).unwrap();
    let loaded = load_game(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded.state(), engine.state());
    assert!(load_game(&path).is_err());
}
