use fleet_command::{
    AbilityEffect, CaptainKind, CellView, Difficulty, GameEngine, GameError, GameStatus,
    HitStatus, MatchConfig, Orientation, Phase, Position, ShotResult, Side, WeatherCondition,
    WeatherConfig, TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn calm(captain: CaptainKind, difficulty: Difficulty) -> MatchConfig {
    MatchConfig {
        captain,
        difficulty,
        weather: WeatherConfig::calm(),
    }
}

fn battle(config: MatchConfig, seed: u64) -> (GameEngine, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut engine = GameEngine::new(config);
    engine.auto_place_human(&mut rng).unwrap();
    engine.begin_battle(&mut rng).unwrap();
    (engine, rng)
}

fn human_random_fire(engine: &mut GameEngine, rng: &mut SmallRng) -> ShotResult {
    let targets = engine.bot_grid().available_targets();
    let target = targets[rng.random_range(0..targets.len())];
    engine.human_fire(target, rng).unwrap()
}

#[test]
fn test_setup_phase_rules() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut engine = GameEngine::new(MatchConfig::default());
    assert_eq!(engine.phase(), Phase::Setup);
    assert_eq!(
        engine.human_fire(Position::new(0, 0), &mut rng).unwrap_err(),
        GameError::NotInBattle
    );

    let id = engine
        .place_human_ship(5, Position::new(0, 0), Orientation::Horizontal)
        .unwrap();
    assert_eq!(
        engine.begin_battle(&mut rng).unwrap_err(),
        GameError::FleetIncomplete(Side::Human)
    );
    engine.remove_human_ship(id).unwrap();
    assert!(engine.human_grid().fleet().is_empty());

    engine.auto_place_human(&mut rng).unwrap();
    engine.begin_battle(&mut rng).unwrap();
    assert_eq!(engine.phase(), Phase::Battle);
    assert!(engine.bot_grid().fleet().is_topology_valid());
    assert!(engine.is_human_turn());
    assert_eq!(
        engine
            .place_human_ship(2, Position::new(9, 0), Orientation::Horizontal)
            .unwrap_err(),
        GameError::SetupClosed
    );
}

#[test]
fn test_turns_alternate() {
    let (mut engine, mut rng) = battle(calm(CaptainKind::Gunner, Difficulty::Pro), 2);
    assert_eq!(engine.turn(), 0);
    assert_eq!(
        engine.bot_turn(&mut rng).unwrap_err(),
        GameError::NotBotTurn
    );

    let result = engine.human_fire(Position::new(0, 0), &mut rng).unwrap();
    assert!(result.is_valid());
    assert_eq!(engine.turn(), 1);
    assert_eq!(engine.current_side(), Side::Bot);
    assert_eq!(
        engine
            .human_fire(Position::new(0, 1), &mut rng)
            .unwrap_err(),
        GameError::NotHumanTurn
    );

    engine.bot_turn(&mut rng).unwrap();
    assert_eq!(engine.turn(), 2);
    assert!(engine.is_human_turn());
    assert_eq!(engine.bot_stats().shots, 1);
}

#[test]
fn test_invalid_shot_keeps_the_turn() {
    let (mut engine, mut rng) = battle(calm(CaptainKind::Gunner, Difficulty::Beginner), 3);
    engine.human_fire(Position::new(4, 4), &mut rng).unwrap();
    engine.bot_turn(&mut rng).unwrap();

    let before = engine.state();
    for target in [Position::new(4, 4), Position::new(10, 2)] {
        let result = engine.human_fire(target, &mut rng).unwrap();
        assert!(!result.is_valid());
    }
    assert_eq!(engine.state(), before);
    assert!(engine.is_human_turn());
}

#[test]
fn test_cooldown_ticks_on_human_turns() {
    let (mut engine, mut rng) = battle(calm(CaptainKind::Gunner, Difficulty::Beginner), 4);
    for round in 1..=4u8 {
        human_random_fire(&mut engine, &mut rng);
        assert_eq!(engine.captain().current_cooldown(), round);
        engine.bot_turn(&mut rng).unwrap();
        assert_eq!(engine.captain().current_cooldown(), round);
    }
    assert!(engine.captain().is_ready());

    let target = engine.bot_grid().available_targets()[0];
    let effect = engine.human_use_ability(target, &mut rng).unwrap().unwrap();
    assert!(matches!(effect, AbilityEffect::Barrage(_)));
    assert_eq!(engine.current_side(), Side::Bot);
    assert_eq!(engine.captain().current_cooldown(), 0);

    engine.bot_turn(&mut rng).unwrap();
    human_random_fire(&mut engine, &mut rng);
    assert_eq!(engine.captain().current_cooldown(), 1);
}

#[test]
fn test_unready_ability_is_refused() {
    let (mut engine, mut rng) = battle(calm(CaptainKind::SonarOfficer, Difficulty::Pro), 5);
    assert!(engine
        .human_use_ability(Position::new(0, 0), &mut rng)
        .unwrap()
        .is_none());
    assert!(engine.is_human_turn());
    assert_eq!(engine.turn(), 0);
}

#[test]
fn test_sonar_marks_enemy_view() {
    let (mut engine, mut rng) = battle(calm(CaptainKind::SonarOfficer, Difficulty::Pro), 6);
    for _ in 0..2 {
        human_random_fire(&mut engine, &mut rng);
        engine.bot_turn(&mut rng).unwrap();
    }
    let target = engine
        .bot_grid()
        .occupied_positions()
        .into_iter()
        .find(|p| engine.bot_grid().is_target_valid(*p))
        .unwrap();
    let effect = engine.human_use_ability(target, &mut rng).unwrap().unwrap();
    assert_eq!(
        effect,
        AbilityEffect::Scanned {
            position: target,
            ship_found: true
        }
    );
    assert_eq!(
        engine.enemy_view()[target.row][target.col],
        CellView::RevealedShip
    );
    assert_eq!(engine.current_side(), Side::Bot);
}

#[test]
fn test_engineer_repair_keeps_the_turn() {
    let (mut engine, mut rng) = battle(calm(CaptainKind::Engineer, Difficulty::Sniper), 7);
    let mut repaired = false;
    for _ in 0..40 {
        if engine.phase() != Phase::Battle {
            break;
        }
        let damaged = engine
            .human_grid()
            .occupied_positions()
            .into_iter()
            .find(|p| {
                engine.human_grid().cell(*p).unwrap().status() == HitStatus::Hit
                    && !engine.human_grid().ship_at(*p).unwrap().is_sunk()
            });
        if let (true, Some(pos)) = (engine.captain().is_ready(), damaged) {
            let turn = engine.turn();
            let effect = engine.human_use_ability(pos, &mut rng).unwrap();
            assert_eq!(effect, Some(AbilityEffect::Repaired(pos)));
            assert!(engine.is_human_turn());
            assert_eq!(engine.turn(), turn);
            assert!(engine.human_grid().is_target_valid(pos));
            repaired = true;
            break;
        }
        human_random_fire(&mut engine, &mut rng);
        if engine.phase() == Phase::Battle {
            engine.bot_turn(&mut rng).unwrap();
        }
    }
    assert!(repaired, "the sniper should have damaged a ship by now");
}

#[test]
fn test_weather_advances_with_turns() {
    let config = MatchConfig {
        weather: WeatherConfig::default(),
        ..MatchConfig::default()
    };
    let (mut engine, mut rng) = battle(config, 8);
    assert_eq!(engine.weather().condition(), WeatherCondition::Sunny);
    for _ in 0..3 {
        human_random_fire(&mut engine, &mut rng);
        engine.bot_turn(&mut rng).unwrap();
    }
    assert_eq!(engine.turn(), 6);
    assert_eq!(engine.weather().condition(), WeatherCondition::Fog);
}

#[test]
fn test_initial_views() {
    let (engine, _) = battle(MatchConfig::default(), 9);
    let enemy = engine.enemy_view();
    assert!(enemy.iter().flatten().all(|v| *v == CellView::Fog));
    let own = engine.own_view();
    assert_eq!(
        own.iter().flatten().filter(|v| **v == CellView::Ship).count(),
        TOTAL_SHIP_CELLS
    );
}

#[test]
fn test_full_games_produce_a_winner() {
    for difficulty in [Difficulty::Beginner, Difficulty::Pro, Difficulty::Sniper] {
        for seed in 0..5 {
            let config = MatchConfig {
                captain: CaptainKind::Gunner,
                difficulty,
                weather: WeatherConfig::default(),
            };
            let (mut engine, mut rng) = battle(config, seed);
            while engine.phase() == Phase::Battle {
                assert!(engine.turn() < 400, "game should finish");
                if engine.is_human_turn() {
                    human_random_fire(&mut engine, &mut rng);
                } else {
                    engine.bot_turn(&mut rng).unwrap();
                }
            }
            assert!(engine.is_game_over());
            assert_ne!(engine.status(), GameStatus::InProgress);
            let expected = match engine.status() {
                GameStatus::HumanWon => engine.bot_grid().is_defeated(),
                _ => engine.human_grid().is_defeated(),
            };
            assert!(expected);
            assert_eq!(
                engine
                    .human_fire(Position::new(0, 0), &mut rng)
                    .unwrap_err(),
                GameError::GameOver
            );
            assert!(engine.bot_stats().hits as usize <= TOTAL_SHIP_CELLS);
        }
    }
}

#[test]
fn test_turn_clock_only_runs_in_battle() {
    let mut rng = SmallRng::seed_from_u64(11);
    let mut engine = GameEngine::new(MatchConfig::default());
    let cooldown = engine.captain().current_cooldown();
    let weather = *engine.weather();
    let target = Position::new(0, 0);

    assert_eq!(
        engine.human_fire(target, &mut rng).unwrap_err(),
        GameError::NotInBattle
    );
    assert_eq!(
        engine.human_use_ability(target, &mut rng).unwrap_err(),
        GameError::NotInBattle
    );
    assert_eq!(engine.bot_turn(&mut rng).unwrap_err(), GameError::NotInBattle);
    assert_eq!(engine.turn(), 0);
    assert_eq!(engine.captain().current_cooldown(), cooldown);
    assert_eq!(*engine.weather(), weather);
    assert!(engine.is_human_turn());

    let (mut engine, mut rng) = battle(calm(CaptainKind::Gunner, Difficulty::Pro), 12);
    while engine.phase() == Phase::Battle {
        if engine.is_human_turn() {
            human_random_fire(&mut engine, &mut rng);
        } else {
            engine.bot_turn(&mut rng).unwrap();
        }
    }
    let turn = engine.turn();
    let side = engine.current_side();
    let cooldown = engine.captain().current_cooldown();
    assert_eq!(
        engine.human_use_ability(target, &mut rng).unwrap_err(),
        GameError::GameOver
    );
    assert_eq!(engine.bot_turn(&mut rng).unwrap_err(), GameError::GameOver);
    assert_eq!(engine.turn(), turn);
    assert_eq!(engine.current_side(), side);
    assert_eq!(engine.captain().current_cooldown(), cooldown);
}
