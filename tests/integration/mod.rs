//! End-to-end API tests driving the router with in-memory databases

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use marquee::api::{api_router, AppState};
use marquee::auth;
use marquee::config::Config;
use marquee::db;
use marquee::domain::{CreateUserRequest, Role};

async fn setup_app() -> (Router, sqlx::SqlitePool) {
    let pool = db::init_database("sqlite::memory:").await.unwrap();
    let state = AppState::new(pool.clone(), Config::default());
    (api_router(state), pool)
}

/// Seed an admin account directly and hand back a session token
async fn admin_token(pool: &sqlx::SqlitePool) -> String {
    let hash = auth::hash_password("admin-password").unwrap();
    let req = CreateUserRequest {
        name: "Admin".to_string(),
        phone: "+10000000000".to_string(),
        email: "admin@example.com".to_string(),
        password: String::new(),
    };
    let admin = db::create_user(pool, &req, &hash, Role::Admin).await.unwrap();
    let session = db::create_token(pool, admin.id).await.unwrap();
    session.token.to_string()
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header("X-Token", token);
    }

    let body = match body {
        Some(value) => Body::from(serde_json::to_vec(&value).unwrap()),
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

/// Create hall + seats + film + seance; returns (seance_id, first seat id)
async fn seed_schedule(app: &Router, token: &str) -> (i64, i64) {
    let (status, hall) = send(
        app,
        Method::POST,
        "/api/v1/hall",
        Some(token),
        Some(json!({"name": "Main Hall", "rows": 3, "seatsPerRow": 4})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let hall_id = hall["data"]["id"].as_i64().unwrap();

    let (status, generated) = send(
        app,
        Method::POST,
        &format!("/api/v1/hall/{}/seats/generate", hall_id),
        Some(token),
        Some(json!({"vipBackRows": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(generated["data"]["seatsCreated"], 12);

    let (status, film) = send(
        app,
        Method::POST,
        "/api/v1/film",
        Some(token),
        Some(json!({"title": "Night Train", "description": "Thriller", "durationMin": 110})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let film_id = film["data"]["id"].as_i64().unwrap();

    let (status, seance) = send(
        app,
        Method::POST,
        "/api/v1/seance",
        Some(token),
        Some(json!({
            "hallId": hall_id,
            "filmId": film_id,
            "startTime": "2026-09-01T18:00:00Z",
            "priceStandard": 300.0,
            "priceVip": 500.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let seance_id = seance["data"]["id"].as_i64().unwrap();

    let (status, seats) = send(
        app,
        Method::GET,
        &format!("/api/v1/seat?hall_id={}", hall_id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let seat_id = seats["data"][0]["id"].as_i64().unwrap();

    (seance_id, seat_id)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _pool) = setup_app().await;

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_register_and_login() {
    let (app, _pool) = setup_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/user",
        None,
        Some(json!({
            "name": "Casey",
            "phone": "+15550001111",
            "email": "casey@example.com",
            "password": "long enough"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "user");
    // The password hash never leaves the database layer
    assert!(body["data"].get("passwordHash").is_none());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/user/login",
        None,
        Some(json!({"email": "casey@example.com", "password": "long enough"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/user/login",
        None,
        Some(json!({"email": "casey@example.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let (app, _pool) = setup_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/user",
        None,
        Some(json!({
            "name": "Casey",
            "phone": "+15550001111",
            "email": "casey@example.com",
            "password": "short"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_admin_routes_require_token_and_role() {
    let (app, pool) = setup_app().await;

    let hall = json!({"name": "Main Hall", "rows": 3, "seatsPerRow": 4});

    let (status, _) = send(&app, Method::POST, "/api/v1/hall", None, Some(hall.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A regular user holds a valid token but not the admin role
    send(
        &app,
        Method::POST,
        "/api/v1/user",
        None,
        Some(json!({
            "name": "Casey",
            "phone": "+15550001111",
            "email": "casey@example.com",
            "password": "long enough"
        })),
    )
    .await;
    let (_, login) = send(
        &app,
        Method::POST,
        "/api/v1/user/login",
        None,
        Some(json!({"email": "casey@example.com", "password": "long enough"})),
    )
    .await;
    let user_token = login["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/hall",
        Some(&user_token),
        Some(hall.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    let token = admin_token(&pool).await;
    let (status, _) = send(&app, Method::POST, "/api/v1/hall", Some(&token), Some(hall)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_booking_flow_end_to_end() {
    let (app, pool) = setup_app().await;
    let token = admin_token(&pool).await;
    let (seance_id, seat_id) = seed_schedule(&app, &token).await;

    // Everything is available before the first booking
    let (status, availability) = send(
        &app,
        Method::GET,
        &format!("/api/v1/seance/{}/available-seats", seance_id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(availability["data"]["totalSeats"], 12);
    assert_eq!(availability["data"]["availableCount"], 12);

    let booking = json!({
        "seanceId": seance_id,
        "seatId": seat_id,
        "userName": "Guest",
        "userPhone": "+15559998877",
        "userEmail": "guest@example.com"
    });

    let (status, confirmation) = send(
        &app,
        Method::POST,
        "/api/v1/ticket/booking",
        None,
        Some(booking.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let code = confirmation["data"]["bookingCode"].as_str().unwrap();
    assert_eq!(code.len(), 10);
    assert_eq!(confirmation["data"]["price"], 300.0);
    assert_eq!(
        confirmation["data"]["qrPayload"],
        format!("booking_code={}", code)
    );

    // The booked seat disappears from availability
    let (_, availability) = send(
        &app,
        Method::GET,
        &format!("/api/v1/seance/{}/available-seats", seance_id),
        None,
        None,
    )
    .await;
    assert_eq!(availability["data"]["availableCount"], 11);
    assert_eq!(availability["data"]["bookedSeats"], 1);

    // Booking the same seat twice is a conflict
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/ticket/booking",
        None,
        Some(booking),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "SEAT_TAKEN");

    // A guest account was created from the booking email
    let guest = db::get_user_auth(&pool, "guest@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(guest.role, "user");
}

#[tokio::test]
async fn test_booking_rejects_seat_from_another_hall() {
    let (app, pool) = setup_app().await;
    let token = admin_token(&pool).await;
    let (seance_id, _) = seed_schedule(&app, &token).await;

    // Second hall with its own seat grid
    let (_, hall) = send(
        &app,
        Method::POST,
        "/api/v1/hall",
        Some(&token),
        Some(json!({"name": "Annex", "rows": 2, "seatsPerRow": 2})),
    )
    .await;
    let other_hall = hall["data"]["id"].as_i64().unwrap();
    send(
        &app,
        Method::POST,
        &format!("/api/v1/hall/{}/seats/generate", other_hall),
        Some(&token),
        Some(json!({})),
    )
    .await;
    let (_, seats) = send(
        &app,
        Method::GET,
        &format!("/api/v1/seat?hall_id={}", other_hall),
        None,
        None,
    )
    .await;
    let foreign_seat = seats["data"][0]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/ticket/booking",
        None,
        Some(json!({
            "seanceId": seance_id,
            "seatId": foreign_seat,
            "userName": "Guest",
            "userPhone": "+15559998877",
            "userEmail": "guest@example.com"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_overlapping_seance_rejected() {
    let (app, pool) = setup_app().await;
    let token = admin_token(&pool).await;
    let (seance_id, _) = seed_schedule(&app, &token).await;

    let (_, seance) = send(
        &app,
        Method::GET,
        &format!("/api/v1/seance/{}", seance_id),
        None,
        None,
    )
    .await;
    let hall_id = seance["data"]["hallId"].as_i64().unwrap();
    let film_id = seance["data"]["filmId"].as_i64().unwrap();

    // Film runs 110 minutes from 18:00; 19:00 lands inside it
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/seance",
        Some(&token),
        Some(json!({
            "hallId": hall_id,
            "filmId": film_id,
            "startTime": "2026-09-01T19:00:00Z",
            "priceStandard": 300.0,
            "priceVip": 500.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "SCHEDULE_CONFLICT");

    // Back-to-back at 19:50 is fine
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/seance",
        Some(&token),
        Some(json!({
            "hallId": hall_id,
            "filmId": film_id,
            "startTime": "2026-09-01T19:50:00Z",
            "priceStandard": 300.0,
            "priceVip": 500.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Moving the existing seance onto itself is not a conflict
    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/seance/{}", seance_id),
        Some(&token),
        Some(json!({"startTime": "2026-09-01T18:00:00Z"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_price_quote_uses_override_then_seance_price() {
    let (app, pool) = setup_app().await;
    let token = admin_token(&pool).await;
    let (seance_id, _) = seed_schedule(&app, &token).await;

    let (_, seats) = send(&app, Method::GET, "/api/v1/seat", None, None).await;
    let standard_seat = seats["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["seatType"] == "standard")
        .unwrap()["id"]
        .as_i64()
        .unwrap();
    let vip_seat = seats["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["seatType"] == "vip")
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    // No override: quotes fall back to the seance's own prices
    let (status, quote) = send(
        &app,
        Method::GET,
        &format!("/api/v1/price/quote?seance_id={}&seat_id={}", seance_id, standard_seat),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["data"]["price"], 300.0);

    let (_, quote) = send(
        &app,
        Method::GET,
        &format!("/api/v1/price/quote?seance_id={}&seat_id={}", seance_id, vip_seat),
        None,
        None,
    )
    .await;
    assert_eq!(quote["data"]["price"], 500.0);

    // A vip override beats the seance price
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/price",
        Some(&token),
        Some(json!({"seatType": "vip", "price": 750.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, quote) = send(
        &app,
        Method::GET,
        &format!("/api/v1/price/quote?seance_id={}&seat_id={}", seance_id, vip_seat),
        None,
        None,
    )
    .await;
    assert_eq!(quote["data"]["price"], 750.0);
    assert_eq!(quote["data"]["seatType"], "vip");
}

#[tokio::test]
async fn test_released_ticket_frees_the_seat() {
    let (app, pool) = setup_app().await;
    let token = admin_token(&pool).await;
    let (seance_id, seat_id) = seed_schedule(&app, &token).await;

    let booking = json!({
        "seanceId": seance_id,
        "seatId": seat_id,
        "userName": "Guest",
        "userPhone": "+15559998877",
        "userEmail": "guest@example.com"
    });

    let (_, confirmation) = send(
        &app,
        Method::POST,
        "/api/v1/ticket/booking",
        None,
        Some(booking.clone()),
    )
    .await;
    let ticket_id = confirmation["data"]["ticketId"].as_i64().unwrap();

    // Admin releases the ticket
    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/ticket/{}", ticket_id),
        Some(&token),
        Some(json!({"booked": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The seat can be booked again
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/ticket/booking",
        None,
        Some(booking),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_booking_price_comes_from_seance_not_override() {
    let (app, pool) = setup_app().await;
    let token = admin_token(&pool).await;
    let (seance_id, seat_id) = seed_schedule(&app, &token).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/price",
        Some(&token),
        Some(json!({"seatType": "standard", "price": 999.0})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // The override only affects quotes
    let (_, quote) = send(
        &app,
        Method::GET,
        &format!("/api/v1/price/quote?seance_id={}&seat_id={}", seance_id, seat_id),
        None,
        None,
    )
    .await;
    assert_eq!(quote["data"]["price"], 999.0);

    // The booking charges what the seance itself advertises
    let (status, confirmation) = send(
        &app,
        Method::POST,
        "/api/v1/ticket/booking",
        None,
        Some(json!({
            "seanceId": seance_id,
            "seatId": seat_id,
            "userName": "Guest",
            "userPhone": "+15559998877",
            "userEmail": "guest@example.com"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(confirmation["data"]["price"], 300.0);
}

#[tokio::test]
async fn test_create_ticket_rejects_unknown_user() {
    let (app, pool) = setup_app().await;
    let token = admin_token(&pool).await;
    let (seance_id, seat_id) = seed_schedule(&app, &token).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/ticket",
        Some(&token),
        Some(json!({
            "seanceId": seance_id,
            "seatId": seat_id,
            "userId": 9999,
            "userName": "Nobody",
            "userPhone": "+15550000000",
            "userEmail": "nobody@example.com",
            "price": 300.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_booking_unknown_seance_is_not_found() {
    let (app, _pool) = setup_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/ticket/booking",
        None,
        Some(json!({
            "seanceId": 999,
            "seatId": 1,
            "userName": "Guest",
            "userPhone": "+15559998877",
            "userEmail": "guest@example.com"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}
