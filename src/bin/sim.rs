use fleet_command::{
    AbilityEffect, CaptainKind, Difficulty, GameEngine, GameStatus, HitStatus, MatchConfig, Phase,
    Position, ProState, WeatherConfig,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Upper bound on turns; a full match needs at most 200 shots.
const MAX_TURNS: u32 = 1000;

fn parse_difficulty(s: &str) -> anyhow::Result<Difficulty> {
    match s.to_ascii_lowercase().as_str() {
        "beginner" => Ok(Difficulty::Beginner),
        "pro" => Ok(Difficulty::Pro),
        "sniper" => Ok(Difficulty::Sniper),
        other => Err(anyhow::anyhow!("unknown difficulty '{}'", other)),
    }
}

fn parse_captain(s: &str) -> anyhow::Result<CaptainKind> {
    match s.to_ascii_lowercase().as_str() {
        "engineer" => Ok(CaptainKind::Engineer),
        "gunner" => Ok(CaptainKind::Gunner),
        "sonar" => Ok(CaptainKind::SonarOfficer),
        other => Err(anyhow::anyhow!("unknown captain '{}'", other)),
    }
}

/// Damaged cells of the human's own fleet that a repair could restore.
fn repair_candidates(engine: &GameEngine) -> Vec<Position> {
    let grid = engine.human_grid();
    grid.occupied_positions()
        .into_iter()
        .filter(|p| {
            grid.cell(*p).map(|c| c.status()) == Some(HitStatus::Hit)
                && grid.ship_at(*p).map(|s| !s.is_sunk()).unwrap_or(false)
        })
        .collect()
}

/// Play the human side: use the captain when it is ready, then fire using
/// the same hunt/seek/destroy logic the pro bot uses.
fn autopilot_turn(
    engine: &mut GameEngine,
    brain: &mut ProState,
    rng: &mut SmallRng,
) -> anyhow::Result<()> {
    let captain = *engine.captain();
    if captain.is_ready() {
        let targets = match captain.kind() {
            CaptainKind::Engineer => repair_candidates(engine),
            _ => brain.select_target(engine.bot_grid(), rng).into_iter().collect(),
        };
        for target in targets {
            let effect = engine
                .human_use_ability(target, rng)
                .map_err(|e| anyhow::anyhow!(e))?;
            if let Some(AbilityEffect::Barrage(results)) = &effect {
                for r in results {
                    brain.on_feedback(r.position, r.outcome);
                }
            }
            if effect.is_some() {
                break;
            }
        }
        if engine.phase() != Phase::Battle || !engine.is_human_turn() {
            return Ok(());
        }
    }
    let target = brain
        .select_target(engine.bot_grid(), rng)
        .ok_or_else(|| anyhow::anyhow!("no targets left"))?;
    let result = engine
        .human_fire(target, rng)
        .map_err(|e| anyhow::anyhow!(e))?;
    brain.on_feedback(result.position, result.outcome);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        let program = args.first().map(String::as_str).unwrap_or("sim");
        eprintln!("Usage: {} <seed> [beginner|pro|sniper] [engineer|gunner|sonar]", program);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let difficulty = args
        .get(2)
        .map(|s| parse_difficulty(s))
        .transpose()?
        .unwrap_or(Difficulty::Pro);
    let captain = args
        .get(3)
        .map(|s| parse_captain(s))
        .transpose()?
        .unwrap_or(CaptainKind::Gunner);

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut engine = GameEngine::new(MatchConfig {
        captain,
        difficulty,
        weather: WeatherConfig::default(),
    });
    engine
        .auto_place_human(&mut rng)
        .map_err(|e| anyhow::anyhow!(e))?;
    engine
        .begin_battle(&mut rng)
        .map_err(|e| anyhow::anyhow!(e))?;

    let mut brain = ProState::new();
    while engine.phase() == Phase::Battle {
        if engine.turn() > MAX_TURNS {
            anyhow::bail!("match did not finish within {} turns", MAX_TURNS);
        }
        if engine.is_human_turn() {
            autopilot_turn(&mut engine, &mut brain, &mut rng)?;
        } else {
            engine.bot_turn(&mut rng).map_err(|e| anyhow::anyhow!(e))?;
        }
    }

    let winner = match engine.status() {
        GameStatus::HumanWon => Some("human"),
        GameStatus::BotWon => Some("bot"),
        GameStatus::InProgress => None,
    };
    let human = engine.human_stats();
    let bot = engine.bot_stats();
    let result = json!({
        "seed": seed,
        "difficulty": difficulty.to_string(),
        "captain": captain.to_string(),
        "turns": engine.turn(),
        "human": {"shots": human.shots, "hits": human.hits},
        "bot": {"shots": bot.shots, "hits": bot.hits},
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
