// HTTP handler bindings for Battlesnake API endpoints
//
// Thin wrappers binding Rocket routes to the Bot's methods. Handlers extract
// the Bot from managed state, pass the payload through, and serialize the
// result. /start and /end accept any body at all; /move needs JSON.

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{catch, get, post, Request};
use serde_json::{json, Value};

use crate::bot::Bot;
use crate::error::SnakeError;
use crate::selector::Selection;

/// GET / endpoint
/// Plain-text liveness check
#[get("/")]
pub fn index(bot: &rocket::State<Bot>) -> &'static str {
    bot.index()
}

/// POST /ping endpoint
/// The engine calls this to check the snake is up; the body is ignored
#[post("/ping")]
pub fn ping() -> Status {
    Status::Ok
}

/// POST /start endpoint
/// Returns display metadata for the new game
#[post("/start", data = "<start_req>")]
pub fn start(bot: &rocket::State<Bot>, start_req: Option<Json<Value>>) -> Json<Value> {
    Json(bot.start(start_req.as_deref()))
}

/// POST /move endpoint
/// Called each turn to compute and return the next move
#[post("/move", format = "json", data = "<move_req>")]
pub fn get_move(
    bot: &rocket::State<Bot>,
    move_req: Json<Value>,
) -> Result<Json<Selection>, SnakeError> {
    bot.get_move(&move_req).map(Json)
}

/// POST /end endpoint
/// Called when a game ends
#[post("/end", data = "<end_req>")]
pub fn end(bot: &rocket::State<Bot>, end_req: Option<Json<Value>>) -> Status {
    bot.end(end_req.as_deref());

    Status::Ok
}

/// JSON body for every error status Rocket produces itself
/// (unparseable JSON, unknown route, wrong content type)
#[catch(default)]
pub fn default_catcher(status: Status, req: &Request<'_>) -> (Status, Json<Value>) {
    log::warn!("{} {} -> {}", req.method(), req.uri(), status);

    (
        status,
        Json(json!({
            "error": status.reason().unwrap_or("error"),
            "status": status.code,
        })),
    )
}
