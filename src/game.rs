//! Match session: both grids, the human's captain, the bot's strategy, the
//! weather and the turn controller that alternates between the two sides.

use core::fmt;

use log::{debug, info};
use rand::Rng;

use crate::ai::{BotStrategy, Difficulty};
use crate::board::{CellView, Grid};
use crate::captain::{AbilityEffect, Captain, CaptainKind};
use crate::common::{BoardError, ShotResult};
use crate::config::BOARD_SIZE;
use crate::position::Position;
use crate::ship::{Orientation, Ship, ShipId};
use crate::shot::HitStrategy;
use crate::weather::{Weather, WeatherConfig};

const GRID_SIZE: usize = BOARD_SIZE as usize;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Human,
    Bot,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Bot,
            Side::Bot => Side::Human,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Ships are being placed; nothing can be shot.
    Setup,
    Battle,
    Finished,
}

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    HumanWon,
    BotWon,
}

/// Shots fired by one side and how many struck a ship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotStats {
    pub shots: u32,
    pub hits: u32,
}

impl ShotStats {
    fn record(&mut self, result: &ShotResult) {
        if result.is_valid() {
            self.shots += 1;
            if result.struck_ship() {
                self.hits += 1;
            }
        }
    }
}

/// Choices made before a match starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub captain: CaptainKind,
    pub difficulty: Difficulty,
    pub weather: WeatherConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            captain: CaptainKind::Gunner,
            difficulty: Difficulty::Pro,
            weather: WeatherConfig::default(),
        }
    }
}

/// Errors returned by match-level operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The action belongs to the human but it is the bot's turn.
    NotHumanTurn,
    /// The bot was asked to move out of turn.
    NotBotTurn,
    /// Shots and abilities need the battle phase.
    NotInBattle,
    /// Placement is only allowed during setup.
    SetupClosed,
    /// A fleet does not match the required composition.
    FleetIncomplete(Side),
    /// The match already has a winner.
    GameOver,
    /// Every cell of the target grid has been shot.
    NoTargetsLeft,
    Board(BoardError),
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NotHumanTurn => write!(f, "It is not the human player's turn"),
            GameError::NotBotTurn => write!(f, "It is not the bot's turn"),
            GameError::NotInBattle => write!(f, "The battle has not started"),
            GameError::SetupClosed => write!(f, "Ships can only be placed during setup"),
            GameError::FleetIncomplete(side) => write!(f, "{:?} fleet is incomplete", side),
            GameError::GameOver => write!(f, "The game is already over"),
            GameError::NoTargetsLeft => write!(f, "No targets left to shoot"),
            GameError::Board(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

/// Serializable snapshot of a whole match. Ships are referenced from cells
/// by id, so restoring keeps every cell of a vessel pointing at the same
/// ship.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub human_grid: Grid,
    pub bot_grid: Grid,
    pub captain: Captain,
    pub bot: BotStrategy,
    pub current: Side,
    pub turn: u32,
    pub weather: Weather,
    pub phase: Phase,
    pub human_stats: ShotStats,
    pub bot_stats: ShotStats,
}

/// Core match logic and turn controller.
pub struct GameEngine {
    human_grid: Grid,
    bot_grid: Grid,
    captain: Captain,
    bot: BotStrategy,
    current: Side,
    turn: u32,
    weather: Weather,
    phase: Phase,
    human_stats: ShotStats,
    bot_stats: ShotStats,
}

impl GameEngine {
    /// New match in the setup phase with empty grids. The human moves first.
    pub fn new(config: MatchConfig) -> Self {
        Self {
            human_grid: Grid::new(),
            bot_grid: Grid::new(),
            captain: Captain::new(config.captain),
            bot: BotStrategy::new(config.difficulty, alloc::vec::Vec::new()),
            current: Side::Human,
            turn: 0,
            weather: Weather::new(config.weather),
            phase: Phase::Setup,
            human_stats: ShotStats::default(),
            bot_stats: ShotStats::default(),
        }
    }

    pub fn human_grid(&self) -> &Grid {
        &self.human_grid
    }

    pub fn bot_grid(&self) -> &Grid {
        &self.bot_grid
    }

    pub fn captain(&self) -> &Captain {
        &self.captain
    }

    pub fn bot(&self) -> &BotStrategy {
        &self.bot
    }

    pub fn difficulty(&self) -> Difficulty {
        self.bot.difficulty()
    }

    pub fn weather(&self) -> &Weather {
        &self.weather
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn current_side(&self) -> Side {
        self.current
    }

    pub fn is_human_turn(&self) -> bool {
        self.current == Side::Human
    }

    pub fn human_stats(&self) -> ShotStats {
        self.human_stats
    }

    pub fn bot_stats(&self) -> ShotStats {
        self.bot_stats
    }

    /// Place one of the human's ships during setup.
    pub fn place_human_ship(
        &mut self,
        size: u8,
        start: Position,
        orientation: Orientation,
    ) -> Result<ShipId, GameError> {
        self.ensure_setup()?;
        Ok(self.human_grid.place_new_ship(size, start, orientation)?)
    }

    /// Take one of the human's ships back off the grid during setup.
    pub fn remove_human_ship(&mut self, id: ShipId) -> Result<Ship, GameError> {
        self.ensure_setup()?;
        Ok(self.human_grid.remove_ship(id)?)
    }

    /// Randomly place whatever the human fleet is still missing.
    pub fn auto_place_human<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        self.ensure_setup()?;
        Ok(self.human_grid.place_fleet_randomly(rng)?)
    }

    /// Deploy the bot fleet and start the battle. The human fleet must be
    /// complete. A sniper bot is handed the human's ship positions here.
    pub fn begin_battle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        self.ensure_setup()?;
        if !self.human_grid.fleet().is_topology_valid() {
            return Err(GameError::FleetIncomplete(Side::Human));
        }
        self.bot_grid.place_fleet_randomly(rng)?;
        if !self.bot_grid.fleet().is_topology_valid() {
            return Err(GameError::FleetIncomplete(Side::Bot));
        }
        self.bot = BotStrategy::new(self.difficulty(), self.human_grid.occupied_positions());
        self.phase = Phase::Battle;
        info!(
            "battle begins: {} captain vs {} bot",
            self.captain.kind(),
            self.difficulty()
        );
        Ok(())
    }

    fn ensure_setup(&self) -> Result<(), GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::SetupClosed);
        }
        Ok(())
    }

    fn ensure_turn(&self, side: Side) -> Result<(), GameError> {
        match self.phase {
            Phase::Setup => return Err(GameError::NotInBattle),
            Phase::Finished => return Err(GameError::GameOver),
            Phase::Battle => {}
        }
        if self.current != side {
            return Err(match side {
                Side::Human => GameError::NotHumanTurn,
                Side::Bot => GameError::NotBotTurn,
            });
        }
        Ok(())
    }

    /// Human fires a standard shot at the bot's grid. The weather may move
    /// the shot.
    ///
    /// Aiming at an off-board or already-shot cell is a rejected action:
    /// the result is `Invalid`, nothing changes and it is still the human's
    /// turn. A valid aim that the fog pushes onto an already-shot cell is
    /// lost: the result is `Invalid` at the displaced position but the turn
    /// is spent.
    pub fn human_fire<R: Rng + ?Sized>(
        &mut self,
        target: Position,
        rng: &mut R,
    ) -> Result<ShotResult, GameError> {
        self.ensure_turn(Side::Human)?;
        if !self.bot_grid.is_target_valid(target) {
            debug!("human shot at {} rejected", target);
            return Ok(ShotResult::invalid(target));
        }
        let result = HitStrategy::Standard
            .resolve(target, &mut self.bot_grid, Some(&self.weather), rng)
            .into_iter()
            .next()
            .unwrap_or(ShotResult::invalid(target));
        if result.is_valid() {
            self.human_stats.record(&result);
            info!("human fires at {}: {:?}", result.position, result.outcome);
        } else {
            info!("human shot drifted onto {} and was lost", result.position);
        }
        self.finish_action();
        Ok(result)
    }

    /// Human activates the captain's ability at `pos`. `Ok(None)` means the
    /// ability was refused and nothing changed.
    pub fn human_use_ability<R: Rng + ?Sized>(
        &mut self,
        pos: Position,
        rng: &mut R,
    ) -> Result<Option<AbilityEffect>, GameError> {
        self.ensure_turn(Side::Human)?;
        let grid = if self.captain.targets_enemy_grid() {
            &mut self.bot_grid
        } else {
            &mut self.human_grid
        };
        let Some(effect) = self.captain.use_ability(grid, pos, Some(&self.weather), rng) else {
            return Ok(None);
        };
        if let AbilityEffect::Barrage(results) = &effect {
            for result in results {
                self.human_stats.record(result);
            }
        }
        if self.captain.consumes_turn() || self.is_game_over() {
            self.finish_action();
        }
        Ok(Some(effect))
    }

    /// Bot picks a target on the human grid and fires. Bot shots ignore the
    /// weather. The outcome is fed back to the strategy before the turn ends.
    pub fn bot_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<ShotResult, GameError> {
        self.ensure_turn(Side::Bot)?;
        let target = self
            .bot
            .select_target(&self.human_grid, rng)
            .ok_or(GameError::NoTargetsLeft)?;
        let result = self.human_grid.receive_shot(target);
        self.bot.on_feedback(result.position, result.outcome);
        self.bot_stats.record(&result);
        info!("bot fires at {}: {:?}", result.position, result.outcome);
        if result.is_valid() {
            self.finish_action();
        }
        Ok(result)
    }

    /// Either the match is over or the turn passes.
    fn finish_action(&mut self) {
        if self.is_game_over() {
            self.phase = Phase::Finished;
            info!("game over after {} turns: {:?}", self.turn, self.status());
        } else {
            self.end_turn();
        }
    }

    /// Advance the turn counter, tick the acting side's cooldown and the
    /// weather, then hand over to the other side.
    fn end_turn(&mut self) {
        self.turn += 1;
        if self.current == Side::Human {
            self.captain.process_turn_end();
        }
        self.weather.process_turn_end();
        self.current = self.current.opponent();
        debug!("turn {} ends, {:?} to move", self.turn, self.current);
    }

    /// Either fleet fully sunk. There is no draw.
    pub fn is_game_over(&self) -> bool {
        self.human_grid.is_defeated() || self.bot_grid.is_defeated()
    }

    pub fn status(&self) -> GameStatus {
        if self.bot_grid.is_defeated() {
            GameStatus::HumanWon
        } else if self.human_grid.is_defeated() {
            GameStatus::BotWon
        } else {
            GameStatus::InProgress
        }
    }

    /// The human's own grid as the human sees it.
    pub fn own_view(&self) -> [[CellView; GRID_SIZE]; GRID_SIZE] {
        self.human_grid.project(false)
    }

    /// The bot's grid as the human sees it.
    pub fn enemy_view(&self) -> [[CellView; GRID_SIZE]; GRID_SIZE] {
        self.bot_grid.project(true)
    }

    /// Generate a serializable snapshot of the current state.
    pub fn state(&self) -> GameState {
        GameState {
            human_grid: self.human_grid.clone(),
            bot_grid: self.bot_grid.clone(),
            captain: self.captain,
            bot: self.bot.clone(),
            current: self.current,
            turn: self.turn,
            weather: self.weather,
            phase: self.phase,
            human_stats: self.human_stats,
            bot_stats: self.bot_stats,
        }
    }

    /// Restore an engine from a previously saved state.
    pub fn from_state(state: GameState) -> Self {
        Self {
            human_grid: state.human_grid,
            bot_grid: state.bot_grid,
            captain: state.captain,
            bot: state.bot,
            current: state.current,
            turn: state.turn,
            weather: state.weather,
            phase: state.phase,
            human_stats: state.human_stats,
            bot_stats: state.bot_stats,
        }
    }
}
