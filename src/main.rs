#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use fleet_command::{
    coord_to_string, describe_effect, describe_shot, init_logging, init_logging_with, parse_coord,
    parse_orientation, persistence, print_player_view, CaptainKind, Difficulty, GameEngine,
    GameStatus, MatchConfig, Phase, WeatherConfig, LOG_ENV,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use std::io::{self, BufRead, Write};
#[cfg(feature = "std")]
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum BotLevel {
    Beginner,
    Pro,
    Sniper,
}

#[cfg(feature = "std")]
impl From<BotLevel> for Difficulty {
    fn from(level: BotLevel) -> Self {
        match level {
            BotLevel::Beginner => Difficulty::Beginner,
            BotLevel::Pro => Difficulty::Pro,
            BotLevel::Sniper => Difficulty::Sniper,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum CaptainChoice {
    Engineer,
    Gunner,
    Sonar,
}

#[cfg(feature = "std")]
impl From<CaptainChoice> for CaptainKind {
    fn from(choice: CaptainChoice) -> Self {
        match choice {
            CaptainChoice::Engineer => CaptainKind::Engineer,
            CaptainChoice::Gunner => CaptainKind::Gunner,
            CaptainChoice::Sonar => CaptainKind::SonarOfficer,
        }
    }
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the computer in the terminal.
    Play {
        #[arg(long, value_enum, default_value_t = BotLevel::Pro)]
        difficulty: BotLevel,
        #[arg(long, value_enum, default_value_t = CaptainChoice::Gunner)]
        captain: CaptainChoice,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Keep the weather sunny for the whole match")]
        no_weather: bool,
        #[arg(long, help = "Resume a match saved earlier")]
        load: Option<PathBuf>,
        #[arg(long, help = "Where the `save` command writes the match")]
        save: Option<PathBuf>,
    },
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    // Engine chatter would drown the board unless asked for.
    if std::env::var(LOG_ENV).is_ok() {
        init_logging();
    } else {
        init_logging_with(log::LevelFilter::Warn);
    }
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            difficulty,
            captain,
            seed,
            no_weather,
            load,
            save,
        } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut rng = if let Some(s) = seed {
                SmallRng::seed_from_u64(s)
            } else {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            };
            let mut engine = match load {
                Some(path) => persistence::load_game(&path)?,
                None => {
                    let config = MatchConfig {
                        captain: captain.into(),
                        difficulty: difficulty.into(),
                        weather: if no_weather {
                            WeatherConfig::calm()
                        } else {
                            WeatherConfig::default()
                        },
                    };
                    GameEngine::new(config)
                }
            };
            let save_path = save.unwrap_or_else(|| PathBuf::from("fleet_command.save"));
            let stdin = io::stdin();
            let mut input = stdin.lock();
            if engine.phase() == Phase::Setup {
                place_fleet(&mut engine, &mut rng, &mut input)?;
                engine
                    .begin_battle(&mut rng)
                    .map_err(|e| anyhow::anyhow!(e))?;
            }
            run_battle(&mut engine, &mut rng, &mut input, &save_path)?;
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
fn prompt(input: &mut impl BufRead, text: &str) -> anyhow::Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(feature = "std")]
fn place_fleet(
    engine: &mut GameEngine,
    rng: &mut SmallRng,
    input: &mut impl BufRead,
) -> anyhow::Result<()> {
    println!("\nSHIP PLACEMENT");
    println!("  Enter a start square and orientation (e.g. A5 H or A5 V).");
    println!("  Press ENTER to place the current ship at random, 'auto' for the rest.\n");
    loop {
        let missing = engine.human_grid().fleet().missing_sizes();
        let Some(&size) = missing.first() else {
            return Ok(());
        };
        print_player_view(engine);
        let Some(line) = prompt(input, &format!("Ship of size {}: ", size))? else {
            anyhow::bail!("input closed during setup");
        };
        if line.eq_ignore_ascii_case("auto") {
            engine
                .auto_place_human(rng)
                .map_err(|e| anyhow::anyhow!(e))?;
            continue;
        }
        if line.is_empty() {
            let (start, orient) = engine
                .human_grid()
                .random_placement(rng, size)
                .map_err(|e| anyhow::anyhow!(e))?;
            engine
                .place_human_ship(size, start, orient)
                .map_err(|e| anyhow::anyhow!(e))?;
            println!("Placed at {} {:?}", coord_to_string(start), orient);
            continue;
        }
        let mut parts = line.split_whitespace();
        let coord = parts.next().map(parse_coord);
        let orient = parts.next().map(parse_orientation);
        match (coord, orient) {
            (Some(Ok(start)), Some(Ok(orient))) => {
                if let Err(e) = engine.place_human_ship(size, start, orient) {
                    println!("Cannot place there: {}", e);
                }
            }
            (Some(Err(e)), _) | (_, Some(Err(e))) => println!("{}", e),
            _ => println!("Enter a square and an orientation, e.g. B2 V"),
        }
    }
}

#[cfg(feature = "std")]
fn run_battle(
    engine: &mut GameEngine,
    rng: &mut SmallRng,
    input: &mut impl BufRead,
    save_path: &Path,
) -> anyhow::Result<()> {
    println!("\nCommands: <square> to fire, 'ability <square>', 'save', 'quit'.");
    while engine.phase() == Phase::Battle {
        if !engine.is_human_turn() {
            let result = engine.bot_turn(rng).map_err(|e| anyhow::anyhow!(e))?;
            println!("Enemy fires at {}", describe_shot(&result));
            continue;
        }
        print_player_view(engine);
        let Some(line) = prompt(input, "> ")? else {
            return Ok(());
        };
        let mut parts = line.split_whitespace();
        match parts.next() {
            None => continue,
            Some(cmd) if cmd.eq_ignore_ascii_case("quit") => return Ok(()),
            Some(cmd) if cmd.eq_ignore_ascii_case("save") => {
                persistence::save_game(engine, save_path)?;
                println!("Saved to {}", save_path.display());
            }
            Some(cmd) if cmd.eq_ignore_ascii_case("ability") => {
                let target = match parts.next().map(parse_coord) {
                    Some(Ok(pos)) => pos,
                    Some(Err(e)) => {
                        println!("{}", e);
                        continue;
                    }
                    None => {
                        println!("Usage: ability <square>");
                        continue;
                    }
                };
                match engine
                    .human_use_ability(target, rng)
                    .map_err(|e| anyhow::anyhow!(e))?
                {
                    Some(effect) => println!("{}", describe_effect(&effect)),
                    None => println!("The ability cannot be used there right now."),
                }
            }
            Some(square) => match parse_coord(square) {
                Ok(target) => {
                    let result = engine
                        .human_fire(target, rng)
                        .map_err(|e| anyhow::anyhow!(e))?;
                    if result.position != target {
                        println!("The fog pulls your shot off course...");
                    }
                    if result.position != target && !result.is_valid() {
                        println!("It splashes into water you already searched.");
                    } else {
                        println!("{}", describe_shot(&result));
                    }
                }
                Err(e) => println!("{}", e),
            },
        }
    }
    print_player_view(engine);
    match engine.status() {
        GameStatus::HumanWon => println!("\nVICTORY! Every enemy ship is on the sea floor."),
        GameStatus::BotWon => println!("\nDEFEAT. Your fleet has been destroyed."),
        GameStatus::InProgress => {}
    }
    let stats = engine.human_stats();
    println!("Your shots: {} ({} hits)", stats.shots, stats.hits);
    Ok(())
}
