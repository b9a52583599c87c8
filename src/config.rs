// Configuration module for reading Snake.toml and the process environment
//
// Snake.toml holds the tunable selector parameters and the snake's appearance.
// The bind address comes from the environment (IP, PORT, DEBUG) because hosting
// services set those.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

use crate::error::SnakeError;
use crate::selector::MovePolicy;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub selector: SelectorConfig,
    pub appearance: AppearanceConfig,
    pub debug: DebugConfig,
}

/// Move selection parameters
#[derive(Debug, Deserialize, Clone)]
pub struct SelectorConfig {
    pub policy: MovePolicy,
    /// Randomized policy: number of draws before the legal-move fallback
    pub max_attempts: u32,
    /// Randomized policy: at or below this health the draw cycles on the turn number
    pub low_health_threshold: i32,
    /// Food-seeking policy: below this health the head steers toward food
    pub hunger_threshold: i32,
}

/// Cosmetic metadata returned from /start, plus the shout sent with every move
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub color: String,
    pub head_type: String,
    pub tail_type: String,
    pub shout: String,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SnakeError> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| SnakeError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&contents)
            .map_err(|e| SnakeError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Loads Snake.toml from the project root, or from `SNAKE_CONFIG` when set
    pub fn load_default() -> Result<Self, SnakeError> {
        let path = env::var("SNAKE_CONFIG").unwrap_or_else(|_| "Snake.toml".to_string());
        Self::from_file(path)
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            selector: SelectorConfig {
                policy: MovePolicy::Randomized,
                max_attempts: 10,
                low_health_threshold: 20,
                hunger_threshold: 50,
            },
            appearance: AppearanceConfig {
                color: "#F4C2C2".to_string(),
                head_type: "bendr".to_string(),
                tail_type: "curled".to_string(),
                shout: "I am Curly the snake!".to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "curly_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }

    /// Returns a copy using the given policy
    pub fn with_policy(mut self, policy: MovePolicy) -> Self {
        self.selector.policy = policy;
        self
    }
}

/// Bind address and debug flag taken from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            ip: "0.0.0.0".to_string(),
            port: 8080,
            debug: true,
        }
    }
}

impl ServerConfig {
    /// Reads `IP`, `PORT` and `DEBUG` from the process environment
    pub fn from_env() -> Result<Self, SnakeError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the server config from any key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SnakeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServerConfig::default();

        if let Some(ip) = lookup("IP") {
            config.ip = ip;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| SnakeError::Config(format!("Invalid PORT '{}': {}", port, e)))?;
        }

        if let Some(debug) = lookup("DEBUG") {
            config.debug = parse_flag(&debug)
                .ok_or_else(|| SnakeError::Config(format!("Invalid DEBUG '{}'", debug)))?;
        }

        Ok(config)
    }

    /// Default `RUST_LOG` filter when the variable is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
