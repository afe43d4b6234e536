//! End-to-end API tests: the full scenario -> event -> zone -> seat chain
//! driven through the real router against an in-memory database.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use venue_server::db::MIGRATOR;
use venue_server::{Config, ServerState, build_app};

async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::query("PRAGMA foreign_keys = ON;")
        .execute(&pool)
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();
    build_app(ServerState::new(Config::from_env(), pool))
}

async fn request(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// POST helper that asserts success and returns the body
async fn post_ok(app: &Router, uri: &str, body: Value) -> Value {
    let (status, value) = request(app, "POST", uri, Some(body)).await;
    assert_eq!(status, StatusCode::OK, "POST {uri} failed: {value}");
    value
}

async fn seed_event(app: &Router) -> (String, String) {
    let scenario = post_ok(
        app,
        "/api/scenarios",
        json!({"nombre": "Foro Sol", "ciudad": "Ciudad de México"}),
    )
    .await;
    let scenario_id = scenario["id"].as_str().unwrap().to_string();

    let event = post_ok(
        app,
        "/api/events",
        json!({"scenario_id": scenario_id, "nombre": "Concierto"}),
    )
    .await;
    (scenario_id, event["id"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn health_is_public() {
    let app = test_app().await;
    let (status, body) = request(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn full_seating_flow() {
    let app = test_app().await;

    // Scenario: nombre is trimmed, aggregates start at zero
    let scenario = post_ok(
        &app,
        "/api/scenarios",
        json!({"nombre": "  Foro Sol  ", "ciudad": "Ciudad de México"}),
    )
    .await;
    assert_eq!(scenario["nombre"], "Foro Sol");
    assert_eq!(scenario["capacidad_total"], 0);
    assert_eq!(scenario["activo"], true);
    let scenario_id = scenario["id"].as_str().unwrap().to_string();

    let event = post_ok(
        &app,
        "/api/events",
        json!({"scenario_id": scenario_id, "nombre": "Concierto"}),
    )
    .await;
    let event_id = event["id"].as_str().unwrap().to_string();

    // Zone with a 3x4 grid: 12 seats labeled R1-1..R3-4, all AVAILABLE
    let zone = post_ok(
        &app,
        &format!("/api/events/{event_id}/zones"),
        json!({
            "name": "General",
            "numbering": {
                "mode": "ROWS_COLUMNS",
                "rows": 3,
                "columns": 4,
                "row_prefix": "R",
                "seat_prefix": "-"
            }
        }),
    )
    .await;
    assert_eq!(zone["seat_count"], 12);
    let zone_id = zone["id"].as_str().unwrap().to_string();

    let seats = zone["seats"].as_array().unwrap();
    assert_eq!(seats.len(), 12);
    assert!(seats.iter().all(|s| s["state"] == "AVAILABLE"));
    let labels: Vec<&str> = seats.iter().map(|s| s["label"].as_str().unwrap()).collect();
    for r in 1..=3 {
        for c in 1..=4 {
            assert!(labels.contains(&format!("R{r}-{c}").as_str()));
        }
    }

    // Capacity follows the new zone
    let (_, scenario) = request(&app, "GET", &format!("/api/scenarios/{scenario_id}"), None).await;
    assert_eq!(scenario["capacidad_total"], 12);

    // Seat listing in reading order
    let (status, seats) = request(
        &app,
        "GET",
        &format!("/api/events/{event_id}/zones/{zone_id}/seats"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let seats = seats.as_array().unwrap().clone();
    assert_eq!(seats.len(), 12);
    assert_eq!(seats[0]["label"], "R1-1");
    assert_eq!(seats[11]["label"], "R3-4");

    // Replace-all regeneration shrinks the zone; capacity follows
    let (status, regenerated) = request(
        &app,
        "PUT",
        &format!("/api/zones/{zone_id}/layout"),
        Some(json!({
            "numbering": {"mode": "ROWS_COLUMNS", "rows": 2, "columns": 2}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(regenerated["seat_count"], 4);

    let (_, scenario) = request(&app, "GET", &format!("/api/scenarios/{scenario_id}"), None).await;
    assert_eq!(scenario["capacidad_total"], 4);

    // Zone deletion brings the capacity back to zero
    let (status, _) = request(&app, "DELETE", &format!("/api/zones/{zone_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, scenario) = request(&app, "GET", &format!("/api/scenarios/{scenario_id}"), None).await;
    assert_eq!(scenario["capacidad_total"], 0);
}

#[tokio::test]
async fn layout_failures_are_unprocessable() {
    let app = test_app().await;
    let (_, event_id) = seed_event(&app).await;
    let uri = format!("/api/events/{event_id}/zones");

    // Overlapping rectangles
    let (status, body) = request(
        &app,
        "POST",
        &uri,
        Some(json!({
            "name": "Palcos",
            "numbering": {"mode": "MANUAL"},
            "seats": [
                {"label": "A", "grid_ref": {"start_row": 1, "start_col": 1, "row_span": 2, "col_span": 2}},
                {"label": "B", "grid_ref": {"start_row": 2, "start_col": 2}}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E0005");

    // Duplicate labels
    let (status, _) = request(
        &app,
        "POST",
        &uri,
        Some(json!({
            "name": "Palcos",
            "numbering": {"mode": "MANUAL"},
            "seats": [{"label": "A1"}, {"label": "A1"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Grid mode with missing dimensions
    let (status, _) = request(
        &app,
        "POST",
        &uri,
        Some(json!({
            "name": "Palcos",
            "numbering": {"mode": "ROWS_COLUMNS", "rows": 3}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Grid mode combined with explicit seats
    let (status, _) = request(
        &app,
        "POST",
        &uri,
        Some(json!({
            "name": "Palcos",
            "numbering": {"mode": "ROWS_COLUMNS", "rows": 2, "columns": 2},
            "seats": [{"label": "A1"}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing was created along the way
    let (_, zones) = request(&app, "GET", &uri, None).await;
    assert!(zones.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn seat_lookups_are_layered_by_event_and_zone() {
    let app = test_app().await;
    let (scenario_id, event_id) = seed_event(&app).await;

    let zone = post_ok(
        &app,
        &format!("/api/events/{event_id}/zones"),
        json!({"name": "General", "numbering": {"mode": "ROWS_COLUMNS", "rows": 1, "columns": 1}}),
    )
    .await;
    let zone_id = zone["id"].as_str().unwrap().to_string();
    let seat_id = zone["seats"][0]["id"].as_str().unwrap().to_string();

    // A second event the zone does not belong to
    let other = post_ok(
        &app,
        "/api/events",
        json!({"scenario_id": scenario_id, "nombre": "Otro concierto"}),
    )
    .await;
    let other_id = other["id"].as_str().unwrap().to_string();

    // Listing through the wrong event: empty, not an error
    let (status, seats) = request(
        &app,
        "GET",
        &format!("/api/events/{other_id}/zones/{zone_id}/seats"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(seats.as_array().unwrap().is_empty());

    // Seat lookup through the wrong event: 404 on the zone check
    let (status, body) = request(
        &app,
        "GET",
        &format!("/api/events/{other_id}/zones/{zone_id}/seats/{seat_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E0003");

    // Correct chain resolves the seat
    let (status, seat) = request(
        &app,
        "GET",
        &format!("/api/events/{event_id}/zones/{zone_id}/seats/{seat_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(seat["id"], seat_id.as_str());
}

#[tokio::test]
async fn regeneration_is_refused_once_a_seat_is_sold() {
    let app = test_app().await;
    let (_, event_id) = seed_event(&app).await;

    let zone = post_ok(
        &app,
        &format!("/api/events/{event_id}/zones"),
        json!({"name": "General", "numbering": {"mode": "ROWS_COLUMNS", "rows": 2, "columns": 2}}),
    )
    .await;
    let zone_id = zone["id"].as_str().unwrap().to_string();
    let seat_id = zone["seats"][0]["id"].as_str().unwrap().to_string();

    let (status, seat) = request(
        &app,
        "PATCH",
        &format!("/api/events/{event_id}/zones/{zone_id}/seats/{seat_id}"),
        Some(json!({"state": "SOLD"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(seat["state"], "SOLD");

    let (status, body) = request(
        &app,
        "PUT",
        &format!("/api/zones/{zone_id}/layout"),
        Some(json!({"numbering": {"mode": "ROWS_COLUMNS", "rows": 5, "columns": 5}})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");

    // Seat set untouched
    let (_, zone) = request(&app, "GET", &format!("/api/zones/{zone_id}"), None).await;
    assert_eq!(zone["seat_count"], 4);
}

#[tokio::test]
async fn scenario_validation_and_search() {
    let app = test_app().await;

    // Empty-after-trim nombre is unprocessable
    let (status, body) = request(
        &app,
        "POST",
        "/api/scenarios",
        Some(json!({"nombre": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E0002");

    post_ok(&app, "/api/scenarios", json!({"nombre": "Foro Sol", "ciudad": "CDMX"})).await;
    post_ok(&app, "/api/scenarios", json!({"nombre": "Movistar Arena", "ciudad": "Bogotá"})).await;

    let (status, page) = request(&app, "GET", "/api/scenarios?q=foro", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["nombre"], "Foro Sol");

    let (status, page) = request(&app, "GET", "/api/scenarios?ciudad=bogot", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["nombre"], "Movistar Arena");

    // 1-based pagination is enforced
    let (status, _) = request(&app, "GET", "/api/scenarios?page=0", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Unknown scenario is a 404
    let (status, _) = request(&app, "GET", "/api/scenarios/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
