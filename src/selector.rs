// Move selection for Curly
//
// Two heuristics share one validator: a move is legal when the resulting cell
// is on the board and not covered by any segment of any snake, ourselves
// included. Whatever the heuristic proposes is checked against it, and if the
// heuristic runs dry the remaining legal moves are enumerated explicitly. Only
// when nothing is legal does the selector settle for the least damaging
// collision.

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SelectorConfig;
use crate::error::SnakeError;
use crate::types::{Battlesnake, Board, Coord, Direction, GameState};

/// Named move-generation heuristics
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MovePolicy {
    /// Random draws while healthy, a turn-indexed cycle when low on health
    Randomized,
    /// Greedy steps toward the first food item when hungry, fixed order otherwise
    FoodSeeking,
}

/// The move sent back to the engine
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Selection {
    #[serde(rename = "move")]
    pub direction: Direction,
    pub shout: String,
}

/// Stateless move selector built once at startup
#[derive(Debug, Clone)]
pub struct MoveSelector {
    config: SelectorConfig,
    shout: String,
}

impl MoveSelector {
    pub fn new(config: SelectorConfig, shout: impl Into<String>) -> Self {
        MoveSelector {
            config,
            shout: shout.into(),
        }
    }

    pub fn policy(&self) -> MovePolicy {
        self.config.policy
    }

    /// Picks the next move for `state.you`.
    ///
    /// Returns a legal direction whenever one exists. Fails only when the
    /// request itself is unusable (see [`validate_request`]).
    pub fn select<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        rng: &mut R,
    ) -> Result<Selection, SnakeError> {
        let head = validate_request(state)?;

        let picked = match self.config.policy {
            MovePolicy::Randomized => self.randomized(state, head, rng),
            MovePolicy::FoodSeeking => self.food_seeking(state, head),
        };

        let direction = match picked {
            Ok(direction) => direction,
            Err(SnakeError::NoLegalMove(at)) => {
                let direction = least_bad_move(&state.board, &state.you, at);
                warn!(
                    "Turn {}: no legal move from ({}, {}), falling back to {}",
                    state.turn,
                    at.x,
                    at.y,
                    direction.as_str()
                );
                direction
            }
            Err(e) => return Err(e),
        };

        Ok(Selection {
            direction,
            shout: self.shout.clone(),
        })
    }

    fn randomized<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        head: Coord,
        rng: &mut R,
    ) -> Result<Direction, SnakeError> {
        let candidates = Direction::all();
        let healthy = state.you.health > self.config.low_health_threshold;
        let cycle_start = state.turn.rem_euclid(candidates.len() as i32) as usize;

        for attempt in 0..self.config.max_attempts {
            let direction = if healthy {
                candidates[rng.random_range(0..candidates.len())]
            } else {
                candidates[cycle_start]
            };

            if is_valid_move(&direction.apply(&head), &state.board, &state.you) {
                debug!("Accepted {} on attempt {}", direction.as_str(), attempt + 1);
                return Ok(direction);
            }
        }

        let legal = legal_moves(&state.board, &state.you);
        if legal.is_empty() {
            return Err(SnakeError::NoLegalMove(head));
        }

        debug!(
            "Random draws exhausted, choosing among {} legal moves",
            legal.len()
        );

        if healthy {
            return Ok(legal[rng.random_range(0..legal.len())]);
        }

        // Same cycle as the draw, skipping past the blocked entries
        (0..candidates.len())
            .map(|offset| candidates[(cycle_start + offset) % candidates.len()])
            .find(|dir| legal.contains(dir))
            .ok_or(SnakeError::NoLegalMove(head))
    }

    fn food_seeking(&self, state: &GameState, head: Coord) -> Result<Direction, SnakeError> {
        if state.you.health < self.config.hunger_threshold {
            let toward_food = state
                .board
                .food
                .first()
                .and_then(|food| food_direction(&head, food));

            if let Some(direction) = toward_food {
                if is_valid_move(&direction.apply(&head), &state.board, &state.you) {
                    return Ok(direction);
                }
                debug!("Food step {} is blocked", direction.as_str());
            }
        }

        Direction::all()
            .into_iter()
            .find(|dir| is_valid_move(&dir.apply(&head), &state.board, &state.you))
            .ok_or(SnakeError::NoLegalMove(head))
    }
}

/// Checks the fields the selector indexes and returns our head.
pub fn validate_request(state: &GameState) -> Result<Coord, SnakeError> {
    if state.board.width <= 0 || state.board.height <= 0 {
        return Err(SnakeError::MalformedRequest(format!(
            "board dimensions must be positive, got {}x{}",
            state.board.width, state.board.height
        )));
    }

    let head = state
        .you
        .head()
        .ok_or_else(|| SnakeError::MalformedRequest("you.body is empty".to_string()))?;

    if !state.board.contains(&head) {
        return Err(SnakeError::MalformedRequest(format!(
            "head ({}, {}) is outside the {}x{} board",
            head.x, head.y, state.board.width, state.board.height
        )));
    }

    Ok(head)
}

/// Greedy single step toward `food`: x is closed before y.
/// Returns None when the head already sits on the food.
pub fn food_direction(head: &Coord, food: &Coord) -> Option<Direction> {
    if food.x < head.x {
        Some(Direction::Left)
    } else if food.x > head.x {
        Some(Direction::Right)
    } else if food.y > head.y {
        Some(Direction::Down)
    } else if food.y < head.y {
        Some(Direction::Up)
    } else {
        None
    }
}

pub fn is_off_board(coord: &Coord, board: &Board) -> bool {
    !board.contains(coord)
}

/// True when any segment of any of `snakes` covers `coord`
pub fn is_snake(coord: &Coord, snakes: &[Battlesnake]) -> bool {
    snakes.iter().any(|snake| snake.body.contains(coord))
}

/// The single legality rule shared by every policy.
/// `you` is checked separately since it may be missing from `board.snakes`.
pub fn is_valid_move(coord: &Coord, board: &Board, you: &Battlesnake) -> bool {
    !is_off_board(coord, board) && !is_snake(coord, &board.snakes) && !you.body.contains(coord)
}

/// Every legal direction from our head, in candidate order
pub fn legal_moves(board: &Board, you: &Battlesnake) -> Vec<Direction> {
    let Some(head) = you.head() else {
        return vec![];
    };

    Direction::all()
        .into_iter()
        .filter(|dir| is_valid_move(&dir.apply(&head), board, you))
        .collect()
}

/// Ranks what moving onto `coord` would run into. Lower is better.
/// A tail normally moves away next turn, so it beats a body segment.
/// Running into our own body is ranked last among on-board cells.
fn collision_cost(coord: &Coord, board: &Board, you: &Battlesnake) -> u8 {
    if is_off_board(coord, board) {
        return 4;
    }

    let mut cost = 0;
    for snake in board.snakes.iter().chain(std::iter::once(you)) {
        let hits = snake.body.iter().filter(|c| *c == coord).count();
        if hits == 0 {
            continue;
        }

        // A stacked tail (just ate) stays put
        let moving_tail = hits == 1 && snake.body.len() > 1 && snake.tail() == Some(*coord);
        let snake_cost = if moving_tail {
            1
        } else if snake.body == you.body {
            3
        } else {
            2
        };
        cost = cost.max(snake_cost);
    }
    cost
}

/// Used only when no legal move exists
fn least_bad_move(board: &Board, you: &Battlesnake, head: Coord) -> Direction {
    Direction::all()
        .into_iter()
        .min_by_key(|dir| collision_cost(&dir.apply(&head), board, you))
        .unwrap_or(Direction::Up)
}
