// Battlesnake API Types
// See https://docs.battlesnake.com/api

use serde::{Deserialize, Serialize};

/// Game metadata including ID, ruleset, and timeout
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Game {
    pub id: String,
    pub ruleset: Ruleset,
    pub timeout: u32,
}

/// Ruleset name, version and per-game settings
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Ruleset {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub settings: RulesetSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RulesetSettings {
    pub food_spawn_chance: i32,
    pub minimum_food: i32,
    pub hazard_damage_per_turn: i32,
}

/// Board state including dimensions, food, snakes, and hazards
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Board {
    pub height: i32,
    pub width: i32,
    pub food: Vec<Coord>,
    pub snakes: Vec<Battlesnake>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
}

/// Snake representation with all state information
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Battlesnake {
    pub id: String,
    pub name: String,
    pub health: i32,
    pub body: Vec<Coord>,
    pub head: Coord,
    pub length: i32,
    #[serde(default)]
    pub latency: Option<String>,
    #[serde(default)]
    pub shout: Option<String>,
}

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn manhattan(&self, other: &Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Represents the four possible movement directions for a Battlesnake
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Candidate order used when scoring; ties are broken in this order
    pub fn all() -> [Direction; 4] {
        [Direction::Right, Direction::Left, Direction::Up, Direction::Down]
    }

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    pub fn parse(s: &str) -> Result<Direction, String> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }

    /// Calculates the next coordinate when moving in this direction.
    /// The result is not bounds-checked; see `position::adjust`.
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y + 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
        }
    }
}

/// Rule variants that change how the board is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesetKind {
    Standard,
    Wrapped,
    Constrictor,
}

impl RulesetKind {
    /// Unknown ruleset names (royale, solo, squad, ...) play like standard
    pub fn from_name(name: &str) -> Self {
        match name {
            "wrapped" => RulesetKind::Wrapped,
            "constrictor" => RulesetKind::Constrictor,
            _ => RulesetKind::Standard,
        }
    }

    /// Out-of-bounds coordinates wrap to the opposite edge
    pub fn wraps(&self) -> bool {
        *self == RulesetKind::Wrapped
    }

    /// Tails never vacate, so every body segment blocks
    pub fn constricts(&self) -> bool {
        *self == RulesetKind::Constrictor
    }
}

/// Complete game state received from the API
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    pub game: Game,
    pub turn: i32,
    pub board: Board,
    pub you: Battlesnake,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_state_parses_wire_json() {
        let raw = r#"{
            "game": {
                "id": "g1",
                "ruleset": {
                    "name": "wrapped",
                    "version": "v1.2.3",
                    "settings": { "foodSpawnChance": 15, "minimumFood": 1, "hazardDamagePerTurn": 14 }
                },
                "timeout": 500
            },
            "turn": 7,
            "board": {
                "height": 11,
                "width": 11,
                "food": [{ "x": 5, "y": 5 }],
                "hazards": [],
                "snakes": [{
                    "id": "s1", "name": "me", "health": 90,
                    "body": [{ "x": 1, "y": 1 }, { "x": 1, "y": 0 }],
                    "head": { "x": 1, "y": 1 }, "length": 2,
                    "latency": "111", "shout": ""
                }]
            },
            "you": {
                "id": "s1", "name": "me", "health": 90,
                "body": [{ "x": 1, "y": 1 }, { "x": 1, "y": 0 }],
                "head": { "x": 1, "y": 1 }, "length": 2
            }
        }"#;

        let state: GameState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.turn, 7);
        assert_eq!(state.game.ruleset.settings.hazard_damage_per_turn, 14);
        assert_eq!(RulesetKind::from_name(&state.game.ruleset.name), RulesetKind::Wrapped);
        assert_eq!(state.board.food[0], Coord { x: 5, y: 5 });
        assert!(state.you.shout.is_none());
    }

    #[test]
    fn test_ruleset_kind_flags() {
        assert!(RulesetKind::from_name("wrapped").wraps());
        assert!(!RulesetKind::from_name("wrapped").constricts());
        assert!(RulesetKind::from_name("constrictor").constricts());
        assert_eq!(RulesetKind::from_name("royale"), RulesetKind::Standard);
    }

    #[test]
    fn test_direction_parse_and_serialize() {
        assert_eq!(Direction::parse("UP").unwrap(), Direction::Up);
        assert_eq!(Direction::parse("Left").unwrap(), Direction::Left);
        assert!(Direction::parse("sideways").is_err());
        assert_eq!(serde_json::to_string(&Direction::Right).unwrap(), "\"right\"");
    }
}
