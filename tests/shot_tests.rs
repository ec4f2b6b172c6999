use fleet_command::{
    area_block, Grid, HitStrategy, Orientation, Position, ShotOutcome, Weather, WeatherCondition,
    WeatherConfig,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn foggy() -> Weather {
    Weather::new(WeatherConfig {
        initial: WeatherCondition::Fog,
        ..WeatherConfig::default()
    })
}

#[test]
fn test_area_block_stays_on_board() {
    let mut corner = area_block(Position::new(9, 9)).to_vec();
    corner.sort();
    assert_eq!(
        corner,
        vec![
            Position::new(8, 8),
            Position::new(8, 9),
            Position::new(9, 8),
            Position::new(9, 9)
        ]
    );
    let origin = area_block(Position::new(0, 0));
    assert!(origin.contains(&Position::new(1, 1)));
    let edge = area_block(Position::new(4, 9));
    assert!(edge.contains(&Position::new(5, 8)));
}

#[test]
fn test_area_shot_skips_already_shot_cells() {
    let mut grid = Grid::new();
    let mut rng = SmallRng::seed_from_u64(3);
    grid.place_new_ship(2, Position::new(0, 0), Orientation::Horizontal)
        .unwrap();
    grid.receive_shot(Position::new(1, 1));

    let results = HitStrategy::Area {
        weather_immune: false,
    }
    .resolve(Position::new(0, 0), &mut grid, None, &mut rng);
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.position != Position::new(1, 1)));
    assert!(results.iter().any(|r| r.outcome == ShotOutcome::Sunk));
    assert!(grid.is_defeated());
}

#[test]
fn test_standard_shot_without_weather_hits_target() {
    let mut grid = Grid::new();
    let mut rng = SmallRng::seed_from_u64(1);
    let sunny = Weather::default();
    let results =
        HitStrategy::Standard.resolve(Position::new(4, 4), &mut grid, Some(&sunny), &mut rng);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].position, Position::new(4, 4));
    assert_eq!(results[0].outcome, ShotOutcome::Miss);
}

#[test]
fn test_fog_moves_shot_to_a_neighbour() {
    let weather = foggy();
    let mut rng = SmallRng::seed_from_u64(11);
    let target = Position::new(5, 5);
    for _ in 0..200 {
        let aimed = weather.displace(target, &mut rng);
        assert_ne!(aimed, target);
        assert!(aimed.row.abs_diff(target.row) <= 1);
        assert!(aimed.col.abs_diff(target.col) <= 1);
    }
}

#[test]
fn test_fog_at_corner_never_leaves_board() {
    let weather = foggy();
    let mut rng = SmallRng::seed_from_u64(12);
    let target = Position::new(0, 0);
    let mut stayed = false;
    for _ in 0..200 {
        let aimed = weather.displace(target, &mut rng);
        assert!(aimed.in_bounds());
        assert!(aimed.row <= 1 && aimed.col <= 1);
        stayed |= aimed == target;
    }
    assert!(stayed, "off-board neighbours fall back to the target");
}

#[test]
fn test_weather_immune_area_ignores_fog() {
    let weather = foggy();
    let mut grid = Grid::new();
    let mut rng = SmallRng::seed_from_u64(5);
    let results = HitStrategy::Area {
        weather_immune: true,
    }
    .resolve(Position::new(3, 3), &mut grid, Some(&weather), &mut rng);
    let mut hit: Vec<Position> = results.iter().map(|r| r.position).collect();
    hit.sort();
    assert_eq!(hit, area_block(Position::new(3, 3)).to_vec());
}

#[test]
fn test_foggy_standard_shot_records_displaced_position() {
    let weather = foggy();
    let mut grid = Grid::new();
    let mut rng = SmallRng::seed_from_u64(8);
    let results =
        HitStrategy::Standard.resolve(Position::new(5, 5), &mut grid, Some(&weather), &mut rng);
    let landed = results[0].position;
    assert_ne!(landed, Position::new(5, 5));
    assert!(grid.cell(landed).unwrap().is_shot());
    assert!(!grid.cell(Position::new(5, 5)).unwrap().is_shot());
}
