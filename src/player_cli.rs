#![cfg(feature = "std")]

//! Terminal helpers: coordinate parsing and text rendering of the cell
//! projection.

use std::fmt::Write as _;
use std::string::String;

use crate::board::CellView;
use crate::captain::{AbilityEffect, Captain};
use crate::common::{ShotOutcome, ShotResult};
use crate::config::BOARD_SIZE;
use crate::game::GameEngine;
use crate::position::Position;
use crate::ship::Orientation;
use crate::weather::WeatherCondition;

const GRID_SIZE: usize = BOARD_SIZE as usize;

/// `A1`-style label for a position.
pub fn coord_to_string(pos: Position) -> String {
    let col = (b'A' + pos.col as u8) as char;
    format!("{}{}", col, pos.row + 1)
}

/// Parse `A5`-style input (column letter, 1-based row).
pub fn parse_coord(input: &str) -> Result<Position, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let col = (col_ch as u8).wrapping_sub(b'A') as usize;
    if col >= GRID_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > GRID_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok(Position::new(row - 1, col))
}

/// Parse `H`/`V` (case-insensitive, full words accepted).
pub fn parse_orientation(input: &str) -> Result<Orientation, String> {
    match input.trim().to_ascii_uppercase().as_str() {
        "H" | "HORIZONTAL" => Ok(Orientation::Horizontal),
        "V" | "VERTICAL" => Ok(Orientation::Vertical),
        other => Err(format!("Invalid orientation '{}' - use H or V", other)),
    }
}

pub fn view_char(view: CellView) -> char {
    match view {
        CellView::Fog => '.',
        CellView::Water => '~',
        CellView::Ship => 'S',
        CellView::HitWater => 'o',
        CellView::HitShip => 'X',
        CellView::SunkShip => '#',
        CellView::RevealedShip => '?',
        CellView::RevealedWater => '-',
    }
}

/// Render a projected grid with column letters and row numbers.
pub fn render_grid(view: &[[CellView; GRID_SIZE]; GRID_SIZE]) -> String {
    let mut out = String::new();
    out.push_str("    ");
    for c in 0..GRID_SIZE {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push('\n');
    for (r, row) in view.iter().enumerate() {
        let _ = write!(out, "  {:2}", r + 1);
        for cell in row.iter() {
            let _ = write!(out, " {}", view_char(*cell));
        }
        out.push('\n');
    }
    out
}

pub fn describe_shot(result: &ShotResult) -> String {
    let at = coord_to_string(result.position);
    match result.outcome {
        ShotOutcome::Miss => format!("{}: miss", at),
        ShotOutcome::Hit => format!("{}: hit!", at),
        ShotOutcome::Sunk => format!("{}: ship sunk!", at),
        ShotOutcome::Invalid => format!("{}: not a valid target", at),
    }
}

pub fn describe_effect(effect: &AbilityEffect) -> String {
    match effect {
        AbilityEffect::Repaired(pos) => format!("Repaired {}", coord_to_string(*pos)),
        AbilityEffect::Barrage(results) => {
            let parts: Vec<String> = results.iter().map(describe_shot).collect();
            format!("Barrage: {}", parts.join(", "))
        }
        AbilityEffect::Scanned {
            position,
            ship_found,
        } => format!(
            "Sonar at {}: {}",
            coord_to_string(*position),
            if *ship_found { "ship detected" } else { "open water" }
        ),
    }
}

pub fn describe_captain(captain: &Captain) -> String {
    if captain.is_ready() {
        format!("{}: READY", captain.kind())
    } else {
        format!(
            "{}: charging {}/{}",
            captain.kind(),
            captain.current_cooldown(),
            captain.max_cooldown()
        )
    }
}

/// Display the enemy grid (top) and the player's grid (bottom).
pub fn print_player_view(engine: &GameEngine) {
    let weather = match engine.weather().condition() {
        WeatherCondition::Sunny => "sunny",
        WeatherCondition::Fog => "fog",
    };
    println!(
        "Turn {} | weather: {} | {}",
        engine.turn(),
        weather,
        describe_captain(engine.captain())
    );
    println!("Enemy waters:");
    print!("{}", render_grid(&engine.enemy_view()));
    println!("Your fleet:");
    print!("{}", render_grid(&engine.own_view()));
    println!("Legend: S=ship X=hit #=sunk o=miss ?=sonar contact -=sonar clear .=unknown");
}
