use fleet_command::{
    Position, Weather, WeatherCondition, WeatherConfig, FOG_TURNS, SUNNY_TURNS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_default_schedule_alternates() {
    let mut weather = Weather::default();
    assert_eq!(weather.condition(), WeatherCondition::Sunny);
    assert_eq!(weather.turns_remaining(), SUNNY_TURNS);

    for _ in 0..SUNNY_TURNS - 1 {
        weather.process_turn_end();
        assert_eq!(weather.condition(), WeatherCondition::Sunny);
    }
    weather.process_turn_end();
    assert_eq!(weather.condition(), WeatherCondition::Fog);
    assert_eq!(weather.turns_remaining(), FOG_TURNS);

    for _ in 0..FOG_TURNS {
        weather.process_turn_end();
    }
    assert_eq!(weather.condition(), WeatherCondition::Sunny);
}

#[test]
fn test_calm_weather_never_changes() {
    let mut weather = Weather::new(WeatherConfig::calm());
    for _ in 0..100 {
        weather.process_turn_end();
        assert_eq!(weather.condition(), WeatherCondition::Sunny);
    }
}

#[test]
fn test_disabled_weather_ignores_foggy_start() {
    let weather = Weather::new(WeatherConfig {
        enabled: false,
        initial: WeatherCondition::Fog,
        ..WeatherConfig::default()
    });
    assert_eq!(weather.condition(), WeatherCondition::Sunny);
}

#[test]
fn test_zero_length_fog_is_skipped() {
    let mut weather = Weather::new(WeatherConfig {
        fog_turns: 0,
        ..WeatherConfig::default()
    });
    for _ in 0..50 {
        weather.process_turn_end();
        assert_eq!(weather.condition(), WeatherCondition::Sunny);
    }
}

#[test]
fn test_fog_keeps_far_off_board_target() {
    let weather = Weather::new(WeatherConfig {
        initial: WeatherCondition::Fog,
        ..WeatherConfig::default()
    });
    assert_eq!(weather.condition(), WeatherCondition::Fog);
    let mut rng = SmallRng::seed_from_u64(9);
    let far = Position::new(usize::MAX, usize::MAX);
    for _ in 0..50 {
        assert_eq!(weather.displace(far, &mut rng), far);
    }
}
