// Battlesnake API Types
// See https://docs.battlesnake.com/api
//
// Both the legacy payload (no `head`/`length`, no ruleset) and the current one
// deserialize into these types. Only the fields the move selector relies on are
// mandatory.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Game metadata including ID, ruleset, and timeout
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Game {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub ruleset: Value,
    #[serde(default)]
    pub timeout: u32,
    #[serde(default)]
    pub source: String,
}

/// Board state including dimensions, food, snakes, and hazards
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Board {
    pub height: i32,
    pub width: i32,
    #[serde(default)]
    pub food: Vec<Coord>,
    #[serde(default)]
    pub snakes: Vec<Battlesnake>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
}

impl Board {
    /// Returns true when the coordinate lies within [0, width) x [0, height)
    pub fn contains(&self, coord: &Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }
}

/// Snake representation with all state information.
/// Opponents may arrive without `health` or `body`; `GameState::you` may not.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Battlesnake {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub health: i32,
    #[serde(default)]
    pub body: Vec<Coord>,
    #[serde(default)]
    pub head: Option<Coord>,
    #[serde(default)]
    pub length: Option<i32>,
    #[serde(default)]
    pub latency: Option<Value>,
    #[serde(default)]
    pub shout: Option<String>,
}

impl Battlesnake {
    /// First body segment. The `head` field is ignored because legacy payloads omit it.
    pub fn head(&self) -> Option<Coord> {
        self.body.first().copied()
    }

    /// Second body segment, if the snake has one
    pub fn neck(&self) -> Option<Coord> {
        self.body.get(1).copied()
    }

    /// Last body segment
    pub fn tail(&self) -> Option<Coord> {
        self.body.last().copied()
    }
}

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }
}

/// Represents the four possible movement directions for a Battlesnake
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

impl Direction {
    /// Returns all directions in candidate order: up, down, right, left
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Right, Direction::Left]
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

    /// Parses a direction name, case-insensitively
    pub fn parse(s: &str) -> Option<Direction> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Calculates the next coordinate when moving in this direction.
    /// The protocol puts y = 0 on the top row, so "up" decreases y.
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y + 1 },
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
        }
    }
}

/// Complete game state received from the API
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    #[serde(default)]
    pub game: Game,
    #[serde(default)]
    pub turn: i32,
    pub board: Board,
    #[serde(deserialize_with = "deserialize_you")]
    pub you: Battlesnake,
}

/// Our own snake must carry `health` and `body`
fn deserialize_you<'de, D>(deserializer: D) -> Result<Battlesnake, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    for field in ["health", "body"] {
        if value.get(field).is_none() {
            return Err(de::Error::missing_field(field));
        }
    }
    serde_json::from_value(value).map_err(de::Error::custom)
}
