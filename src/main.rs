use log::info;

use curly_snake::bot::Bot;
use curly_snake::config::{Config, ServerConfig};
use curly_snake::debug_logger::DebugLogger;
use curly_snake::server;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // IP, PORT and DEBUG follow the usual hosting conventions
    let server_config = ServerConfig::from_env()?;

    // RUST_LOG wins when set; otherwise DEBUG picks the default level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(server_config.default_log_filter()),
    )
    .init();

    info!(
        "Starting Battlesnake Server on {}:{}...",
        server_config.ip, server_config.port
    );

    // Load configuration once at startup
    let config = Config::load_or_default();
    let debug_logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    let bot = Bot::new(config, debug_logger);

    server::build(bot, &server_config).launch().await?;

    Ok(())
}
