// Rocket instance construction
//
// The server is built from an explicit Bot and ServerConfig and handed back to
// the caller to launch; tests build the same instance and drive it through a
// local client.

use rocket::fairing::AdHoc;
use rocket::{catchers, routes, Build, Rocket};

use crate::bot::Bot;
use crate::config::ServerConfig;
use crate::handler;

pub const SERVER_HEADER: &str = "battlesnake/curly-snake";

/// Builds the Rocket instance serving every Battlesnake endpoint
pub fn build(bot: Bot, server: &ServerConfig) -> Rocket<Build> {
    let log_level = if server.debug { "normal" } else { "critical" };

    let figment = rocket::Config::figment()
        .merge(("address", server.ip.clone()))
        .merge(("port", server.port))
        .merge(("log_level", log_level));

    rocket::custom(figment)
        .manage(bot)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", SERVER_HEADER);
            })
        }))
        .mount(
            "/",
            routes![
                handler::index,
                handler::ping,
                handler::start,
                handler::get_move,
                handler::end
            ],
        )
        .register("/", catchers![handler::default_catcher])
}
