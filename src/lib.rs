// Library exports for Curly the snake
// The server binary, the replay tool and the integration tests share these

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod error;
pub mod handler;
pub mod replay;
pub mod selector;
pub mod server;
pub mod types;
