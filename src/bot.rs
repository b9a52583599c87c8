// Curly the snake
//
// Bot ties the endpoint handlers to the move selector. Each call works on the
// payload it is given and nothing else; the only state kept between requests
// is the immutable configuration and the debug log handle.

use log::{debug, info};
use serde_json::{json, Value};

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::error::SnakeError;
use crate::selector::{MoveSelector, Selection};
use crate::types::GameState;

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    selector: MoveSelector,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    pub fn new(config: Config, debug_logger: DebugLogger) -> Self {
        let selector = MoveSelector::new(config.selector.clone(), config.appearance.shout.clone());
        Bot {
            config,
            selector,
            debug_logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Liveness text
    /// Corresponds to GET / endpoint
    pub fn index(&self) -> &'static str {
        "Your Battlesnake is alive!"
    }

    /// Called when a game starts. Returns the display metadata.
    /// Corresponds to POST /start endpoint
    pub fn start(&self, payload: Option<&Value>) -> Value {
        info!("START: {}", echo(payload));

        let appearance = &self.config.appearance;
        json!({
            "color": appearance.color,
            "headType": appearance.head_type,
            "tailType": appearance.tail_type,
        })
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, payload: Option<&Value>) {
        info!("END: {}", echo(payload));
    }

    /// Decodes a raw move payload and picks a move
    /// Corresponds to POST /move endpoint
    pub fn get_move(&self, payload: &Value) -> Result<Selection, SnakeError> {
        info!("MOVE: {}", payload);

        let state: GameState = serde_json::from_value(payload.clone())
            .map_err(|e| SnakeError::MalformedRequest(e.to_string()))?;

        self.choose_move(&state)
    }

    /// Picks a move for an already decoded game state
    pub fn choose_move(&self, state: &GameState) -> Result<Selection, SnakeError> {
        let mut rng = rand::rng();
        let selection = self.selector.select(state, &mut rng)?;

        debug!(
            "Turn {}: Chose {} ({:?}, health {})",
            state.turn,
            selection.direction.as_str(),
            self.selector.policy(),
            state.you.health
        );

        self.debug_logger.log_move(state, &selection);
        Ok(selection)
    }
}

fn echo(payload: Option<&Value>) -> String {
    payload.map(Value::to_string).unwrap_or_else(|| "null".to_string())
}
