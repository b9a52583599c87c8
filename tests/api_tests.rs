// Integration tests for the HTTP surface
//
// Drives the real Rocket instance through a local blocking client, so route
// matching, body handling and catchers are exercised exactly as in production.

use curly_snake::bot::Bot;
use curly_snake::config::{Config, ServerConfig};
use curly_snake::debug_logger::DebugLogger;
use curly_snake::selector::MovePolicy;
use curly_snake::server;
use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use serde_json::{json, Value};

fn client(policy: MovePolicy) -> Client {
    let bot = Bot::new(
        Config::default_hardcoded().with_policy(policy),
        DebugLogger::disabled(),
    );
    let server_config = ServerConfig {
        ip: "127.0.0.1".to_string(),
        port: 0,
        debug: false,
    };
    Client::tracked(server::build(bot, &server_config)).expect("valid rocket instance")
}

fn move_payload(health: i32, turn: i32, body: &[(i32, i32)], food: &[(i32, i32)]) -> Value {
    let body: Vec<Value> = body.iter().map(|&(x, y)| json!({"x": x, "y": y})).collect();
    let food: Vec<Value> = food.iter().map(|&(x, y)| json!({"x": x, "y": y})).collect();
    let you = json!({"id": "me", "name": "Curly", "health": health, "body": body});
    json!({
        "game": {"id": "game-1"},
        "turn": turn,
        "board": {"height": 11, "width": 11, "food": food, "snakes": [you.clone()]},
        "you": you
    })
}

#[test]
fn test_index_reports_alive() {
    let client = client(MovePolicy::Randomized);
    let response = client.get("/").dispatch();
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Server"),
        Some(server::SERVER_HEADER)
    );
    assert_eq!(response.into_string().unwrap(), "Your Battlesnake is alive!");
}

#[test]
fn test_ping_is_empty_ok_for_any_body() {
    let client = client(MovePolicy::Randomized);
    for body in ["", "{}", "not json at all", r#"{"board": 1}"#] {
        let response = client
            .post("/ping")
            .header(ContentType::JSON)
            .body(body)
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().unwrap_or_default(), "");
    }
}

#[test]
fn test_start_returns_fixed_cosmetics() {
    let client = client(MovePolicy::Randomized);
    let expected = json!({"color": "#F4C2C2", "headType": "bendr", "tailType": "curled"});

    let payload = move_payload(100, 0, &[(1, 1)], &[(3, 3)]).to_string();
    for body in [payload.as_str(), "{}", "garbage"] {
        let response = client
            .post("/start")
            .header(ContentType::JSON)
            .body(body)
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_json::<Value>().unwrap(), expected);
    }
}

#[test]
fn test_end_is_idempotent() {
    let client = client(MovePolicy::Randomized);
    let payload = move_payload(100, 10, &[(1, 1)], &[(3, 3)]).to_string();
    for body in [payload.as_str(), payload.as_str(), "{}", "[]"] {
        let response = client
            .post("/end")
            .header(ContentType::JSON)
            .body(body)
            .dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().unwrap_or_default(), "");
    }
}

#[test]
fn test_move_returns_move_and_shout() {
    let client = client(MovePolicy::FoodSeeking);
    let response = client
        .post("/move")
        .header(ContentType::JSON)
        .body(move_payload(10, 5, &[(5, 5), (5, 6)], &[(2, 5)]).to_string())
        .dispatch();

    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().unwrap();
    assert_eq!(body, json!({"move": "left", "shout": "I am Curly the snake!"}));
}

#[test]
fn test_move_from_corner_stays_on_board() {
    let client = client(MovePolicy::Randomized);
    for turn in 0..20 {
        let response = client
            .post("/move")
            .header(ContentType::JSON)
            .body(move_payload(100, turn, &[(0, 0)], &[(5, 5)]).to_string())
            .dispatch();
        let body: Value = response.into_json().unwrap();
        let chosen = body["move"].as_str().unwrap();
        assert!(chosen == "down" || chosen == "right", "chose {}", chosen);
    }
}

#[test]
fn test_move_with_empty_body_is_bad_request() {
    let client = client(MovePolicy::Randomized);
    let response = client
        .post("/move")
        .header(ContentType::JSON)
        .body(move_payload(100, 0, &[], &[(5, 5)]).to_string())
        .dispatch();

    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().unwrap();
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().contains("you.body"));
}

#[test]
fn test_move_missing_fields_is_bad_request() {
    let client = client(MovePolicy::Randomized);
    let response = client
        .post("/move")
        .header(ContentType::JSON)
        .body(r#"{"turn": 1}"#)
        .dispatch();

    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("malformed request"));
}

#[test]
fn test_move_with_invalid_json_gets_json_error() {
    let client = client(MovePolicy::Randomized);
    let response = client
        .post("/move")
        .header(ContentType::JSON)
        .body("{ this is not json")
        .dispatch();

    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().unwrap();
    assert_eq!(body["status"], 400);
}

#[test]
fn test_unknown_route_is_json_not_found() {
    let client = client(MovePolicy::Randomized);
    let response = client.get("/nowhere").dispatch();
    assert_eq!(response.status(), Status::NotFound);
    let body: Value = response.into_json().unwrap();
    assert_eq!(body["status"], 404);
}
